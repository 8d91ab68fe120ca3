//! Coordinate and geometry types shared by the runtime and the console.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Renderers reach clip space through a [`Transform`].

mod transform;
mod vec2;
mod viewport;

pub use transform::Transform;
pub use vec2::Vec2;
pub use viewport::Viewport;
