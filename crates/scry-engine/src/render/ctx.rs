use crate::coords::{Transform, Viewport};

/// Renderer-facing context (device/queue + surface format + viewport).
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub viewport: Viewport, // logical px
    pub scale_factor: f32,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
        scale_factor: f32,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            viewport,
            scale_factor,
        }
    }
}

/// Target for drawing (encoder + color view).
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }
}

/// Placement supplied by whoever owns the scene.
///
/// `render_transform` maps the drawable's local space to clip space.
/// `framebuffer_scale` converts one framebuffer pixel to clip-space units
/// along each axis; a positive `y` means pixel offsets grow upward.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawContext {
    pub render_transform: Transform,
    pub framebuffer_scale: [f32; 2],
}

impl DrawContext {
    #[inline]
    pub fn new(render_transform: Transform, framebuffer_scale: [f32; 2]) -> Self {
        Self {
            render_transform,
            framebuffer_scale,
        }
    }

    /// Context for drawing in the logical pixels of `viewport`.
    ///
    /// Positions use the window convention (top-left origin, +Y down); pixel
    /// offsets are scaled so that one unit is one logical pixel.
    pub fn pixel_space(viewport: Viewport) -> Self {
        let w = viewport.width.max(1.0);
        let h = viewport.height.max(1.0);
        Self::new(Transform::pixels_to_ndc(viewport), [2.0 / w, 2.0 / h])
    }
}
