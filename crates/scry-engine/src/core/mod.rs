//! Contract between the window runtime and applications: lifecycle
//! callbacks and the contexts handed to them.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, InitCtx, WindowCtx};
