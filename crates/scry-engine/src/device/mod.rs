//! GPU device and surface.
//!
//! Creates the wgpu instance, adapter, device and queue for a window, keeps the
//! surface configured across resizes, and hands out one encoder + view per
//! frame.

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
