//! Input subsystem.
//!
//! Platform-agnostic key, text and focus events. The window runtime translates
//! winit events through [`platform::winit`]; nothing else sees winit types.

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, Modifiers, TextEvent};
