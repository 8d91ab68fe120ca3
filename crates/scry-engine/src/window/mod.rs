//! winit event loop and its single window, paired with a `Gpu`.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
pub use winit::window::WindowId;
