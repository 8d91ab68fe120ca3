//! scry engine: a GPU text console and the small wgpu/winit runtime that
//! hosts it.
//!
//! [`console::Console`] is the part most callers want; the `device`,
//! `window`, `core`, `input` and `time` modules exist to give it a window and
//! a frame loop.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod console;
