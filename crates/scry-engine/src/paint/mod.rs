//! Color model shared between the console and renderers.
//!
//! Colors are linear premultiplied RGBA; textual color specs are parsed here.

pub mod color;

pub use color::{Color, ColorParseError};
