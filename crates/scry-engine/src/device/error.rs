/// What the frame loop should do after a failed surface acquire.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The surface was reconfigured; the next frame may proceed.
    Reconfigured,
    /// Drop this frame and try again on the next redraw.
    SkipFrame,
    /// Unrecoverable (out of memory); the runtime shuts down.
    Fatal,
}
