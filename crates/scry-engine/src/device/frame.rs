/// One acquired surface texture with its view and command encoder.
///
/// Hand it back to [`super::Gpu::submit`] promptly; while it is alive no other
/// frame can be acquired.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
