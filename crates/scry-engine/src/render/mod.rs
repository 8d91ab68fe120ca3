//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers) and record into a
//! caller-provided encoder. Shaders live under `shaders/` as WGSL templates.

mod common;
mod ctx;
mod shader;

pub mod console;

pub use console::{ConsoleFrame, ConsoleRenderer, ConsoleUniform};
pub use ctx::{DrawContext, RenderCtx, RenderTarget};
pub use shader::TransformSlot;
