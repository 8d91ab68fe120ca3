//! Fixed-grid text console rendered with point sprites.
//!
//! Text is packed on the CPU into 48-bit glyph records, one per cell, and the
//! whole grid goes to the GPU in a single instanced draw. The fragment stage
//! decodes the bits, so no glyph texture exists anywhere.
//!
//! ```rust,ignore
//! let mut console = Console::new(ConsoleConfig::default().with_grid(10, 40))?;
//! console.write("frame 12: 16.6 ms");
//! console.draw(&rctx, &mut target, Some(&DrawContext::pixel_space(rctx.viewport)));
//! ```

mod buffer;
mod config;
mod error;
pub mod font;
pub mod layout;

pub use buffer::ScrollBuffer;
pub use config::{AnchorX, AnchorY, ConsoleConfig, Orientation};
pub use error::ConsoleError;
pub use font::GlyphRecord;

use crate::coords::{Transform, Vec2};
use crate::paint::Color;
use crate::render::{
    ConsoleFrame, ConsoleRenderer, ConsoleUniform, DrawContext, RenderCtx, RenderTarget,
    TransformSlot,
};

/// Pixel scale used when no [`DrawContext`] is supplied.
pub const FALLBACK_PX_SCALE: [f32; 2] = [0.01, 0.01];

/// A scrolling text console.
///
/// Owns the scroll buffer, the fixed layout table and the GPU resources that
/// draw them. All methods must be called from the render thread.
pub struct Console {
    pos: Vec2,
    color: Color,
    scale: u32,
    anchor_x: AnchorX,
    anchor_y: AnchorY,
    transform: Transform,

    buffer: ScrollBuffer,
    offsets: Vec<[f32; 2]>,

    renderer: ConsoleRenderer,
    warned_bad_context: bool,
}

impl Console {
    /// Validates `config` and allocates the grid.
    pub fn new(config: ConsoleConfig) -> Result<Self, ConsoleError> {
        config.validate()?;

        let offsets = layout::compute_offsets(
            config.rows,
            config.cols,
            layout::CELL_WIDTH,
            layout::CELL_HEIGHT,
            config.anchor_x,
            config.anchor_y,
        );

        log::debug!(
            "console {}x{} ({}, anchor {}/{})",
            config.rows,
            config.cols,
            config.orientation,
            config.anchor_x,
            config.anchor_y
        );

        Ok(Self {
            pos: config.pos,
            color: config.color,
            scale: config.scale.max(1),
            anchor_x: config.anchor_x,
            anchor_y: config.anchor_y,
            transform: Transform::identity(),
            buffer: ScrollBuffer::new(config.rows, config.cols, config.orientation),
            offsets,
            renderer: ConsoleRenderer::new(),
            warned_bad_context: false,
        })
    }

    /// Writes one line, scrolling older lines away once the grid is full.
    ///
    /// Text past the last column is dropped. Non-ASCII text shows the
    /// replacement glyph. `""` inserts a blank line.
    pub fn write(&mut self, line: impl AsRef<str>) {
        self.buffer.write(line.as_ref());
    }

    /// Writes raw bytes that are expected to be UTF-8 text.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ConsoleError> {
        self.buffer.write_bytes(bytes)
    }

    /// Blanks the console; the next line starts at the first row again.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Draws the console into `target`.
    ///
    /// Without a `context` the console uses its own transform and
    /// [`FALLBACK_PX_SCALE`], which is enough to render it in isolation.
    pub fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        context: Option<&DrawContext>,
    ) {
        if let Some(c) = context {
            let [sx, sy] = c.framebuffer_scale;
            if !(sx.is_finite() && sy.is_finite()) {
                if !self.warned_bad_context {
                    log::warn!("console: non-finite framebuffer scale {sx}, {sy}; draw skipped");
                    self.warned_bad_context = true;
                }
                return;
            }
        }

        let (uniform, slot) = self.uniform(context);
        let frame = ConsoleFrame {
            uniform,
            slot,
            offsets: &self.offsets,
            buffer: &self.buffer,
        };
        self.renderer.render(ctx, target, &frame);
    }

    /// True once the first draw has prepared GPU resources.
    pub fn is_ready(&self) -> bool {
        self.renderer.is_ready()
    }

    fn uniform(&self, context: Option<&DrawContext>) -> (ConsoleUniform, TransformSlot) {
        let (transform, px_scale) = match context {
            Some(c) => (c.render_transform, c.framebuffer_scale),
            None => (self.transform, FALLBACK_PX_SCALE),
        };
        let uniform = ConsoleUniform {
            transform: transform.cols(),
            pos: self.pos.to_array(),
            px_scale,
            color: self.color.to_array(),
            scale: self.scale as f32,
            _pad: [0.0; 3],
        };
        (uniform, TransformSlot::for_transform(&transform))
    }

    // ── accessors ────────────────────────────────────────────────────────

    #[inline]
    pub fn rows(&self) -> usize {
        self.buffer.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.buffer.cols()
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.buffer.orientation()
    }

    #[inline]
    pub fn anchor_x(&self) -> AnchorX {
        self.anchor_x
    }

    #[inline]
    pub fn anchor_y(&self) -> AnchorY {
        self.anchor_y
    }

    #[inline]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Read-only view of the glyph grid.
    #[inline]
    pub fn buffer(&self) -> &ScrollBuffer {
        &self.buffer
    }

    /// Per-cell pixel offsets, row-major.
    #[inline]
    pub fn offsets(&self) -> &[[f32; 2]] {
        &self.offsets
    }

    // ── setters ──────────────────────────────────────────────────────────

    /// Moves the anchor point. Non-finite coordinates are rejected.
    pub fn set_pos(&mut self, pos: impl Into<Vec2>) -> Result<(), ConsoleError> {
        let pos = pos.into();
        if !pos.is_finite() {
            return Err(ConsoleError::out_of_range(
                "pos",
                format!("({}, {})", pos.x, pos.y),
                "finite coordinates",
            ));
        }
        self.pos = pos;
        Ok(())
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Sets the color from a spec such as `"white"` or `"#00ff00"`.
    pub fn set_color_spec(&mut self, spec: &str) -> Result<(), ConsoleError> {
        self.color = Color::parse(spec)?;
        Ok(())
    }

    /// Sets the integer magnification; returns the value actually applied.
    pub fn set_scale(&mut self, scale: u32) -> u32 {
        self.scale = scale.max(1);
        self.scale
    }

    /// Sets the transform used when drawing without a [`DrawContext`].
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(rows: usize, cols: usize) -> Console {
        Console::new(ConsoleConfig::default().with_grid(rows, cols)).unwrap()
    }

    #[test]
    fn construction_rejects_bad_names_before_allocation() {
        let build = || -> Result<Console, ConsoleError> {
            Console::new(ConsoleConfig::default().with_names("sideways", "left", "top")?)
        };
        let err = build().err().unwrap();
        assert!(matches!(err, ConsoleError::Validation { field: "orientation", .. }));
        assert!(err.to_string().contains("scroll-up, scroll-down"));
    }

    #[test]
    fn construction_rejects_empty_grid() {
        assert!(Console::new(ConsoleConfig::default().with_grid(0, 80)).is_err());
    }

    #[test]
    fn accessors_reflect_config() {
        let c = Console::new(
            ConsoleConfig::default()
                .with_grid(5, 7)
                .with_pos(10.0, 20.0)
                .with_scale(0)
                .with_orientation(Orientation::ScrollDown)
                .with_anchor(AnchorX::Right, AnchorY::Bottom),
        )
        .unwrap();
        assert_eq!((c.rows(), c.cols()), (5, 7));
        assert_eq!(c.pos(), Vec2::new(10.0, 20.0));
        assert_eq!(c.scale(), 1);
        assert_eq!(c.orientation(), Orientation::ScrollDown);
        assert_eq!((c.anchor_x(), c.anchor_y()), (AnchorX::Right, AnchorY::Bottom));
        assert_eq!(c.offsets().len(), 35);
        assert!(!c.is_ready());
    }

    #[test]
    fn scale_is_clamped() {
        let mut c = console(1, 1);
        assert_eq!(c.set_scale(0), 1);
        assert_eq!(c.set_scale(3), 3);
        assert_eq!(c.scale(), 3);
    }

    #[test]
    fn color_spec_is_validated() {
        let mut c = console(1, 1);
        c.set_color_spec("#00ff00").unwrap();
        assert_eq!(c.color(), Color::from_srgb_u8(0, 255, 0, 255));

        let err = c.set_color_spec("plaid").unwrap_err();
        assert!(matches!(err, ConsoleError::Validation { field: "color", .. }));
        assert_eq!(c.color(), Color::from_srgb_u8(0, 255, 0, 255));
    }

    #[test]
    fn non_finite_pos_is_rejected() {
        let mut c = console(1, 1);
        let err = c.set_pos((f32::NAN, 0.0)).unwrap_err();
        assert_eq!(err.to_string(), "invalid pos (NaN, 0): expected finite coordinates");
        c.set_pos((3.0, 4.0)).unwrap();
        assert_eq!(c.pos(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn clear_then_every_pixel_is_discarded() {
        let mut c = console(3, 5);
        c.write("hello");
        c.write("world");
        c.clear();

        for r in 0..c.rows() {
            for col in 0..c.cols() {
                let g = c.buffer().cell(r, col);
                for v in 0..8 {
                    for u in 0..8 {
                        assert!(!g.pixel(u, v));
                    }
                }
            }
        }
    }

    #[test]
    fn draw_without_context_uses_fallback() {
        let mut c = console(2, 2);
        c.set_transform(Transform::translate(0.5, 0.0));
        let (u, slot) = c.uniform(None);
        assert_eq!(u.px_scale, FALLBACK_PX_SCALE);
        assert_eq!(u.transform, Transform::translate(0.5, 0.0).cols());
        assert_eq!(slot, TransformSlot::Matrix);

        c.set_transform(Transform::identity());
        assert_eq!(c.uniform(None).1, TransformSlot::Identity);
    }

    #[test]
    fn draw_with_context_uses_it() {
        let c = Console::new(ConsoleConfig::default().with_grid(1, 1).with_scale(2)).unwrap();
        let ctx = DrawContext::new(Transform::scale(0.5, 0.5), [0.1, 0.2]);
        let (u, slot) = c.uniform(Some(&ctx));
        assert_eq!(u.px_scale, [0.1, 0.2]);
        assert_eq!(u.transform, Transform::scale(0.5, 0.5).cols());
        assert_eq!(u.scale, 2.0);
        assert_eq!(slot, TransformSlot::Matrix);
    }

    #[test]
    fn write_bytes_error_leaves_console_unchanged() {
        let mut c = console(2, 4);
        c.write("keep");
        let before = c.buffer().clone();
        assert!(c.write_bytes(&[0xC3]).is_err());
        assert_eq!(c.buffer().grids(), before.grids());
        assert_eq!(c.buffer().current_row(), before.current_row());
    }
}
