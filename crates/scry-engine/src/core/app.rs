use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::{FrameCtx, InitCtx};

/// Returned by app callbacks to keep running or shut down.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Lifecycle callbacks driven by [`crate::window::Runtime`].
///
/// Order per window: `on_initialize` once after the GPU is up, then any mix
/// of `on_resize` / `on_window_event`, and `on_frame` on every redraw.
pub trait App {
    /// The window and its GPU context exist; create per-window state here.
    fn on_initialize(&mut self, ctx: &mut InitCtx<'_, '_>) -> AppControl {
        let _ = ctx;
        AppControl::Continue
    }

    /// Drawable size changed, in logical pixels.
    fn on_resize(&mut self, window_id: WindowId, width: f32, height: f32) {
        let _ = (window_id, width, height);
    }

    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Paint callback; called once per redraw per window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
