use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::console::ScrollBuffer;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{
    premul_alpha_blend, uniform_min_binding_size, QuadVertex, QUAD_INDICES, QUAD_VERTICES,
};
use super::shader::{self, TransformSlot};

/// Per-draw uniform block. Mirrors `struct Console` in `console.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ConsoleUniform {
    pub transform: [[f32; 4]; 4],
    pub pos: [f32; 2],
    pub px_scale: [f32; 2],
    pub color: [f32; 4],
    pub scale: f32,
    pub _pad: [f32; 3], // struct size rounds up to 16
}

/// Everything a single console draw needs from the CPU side.
pub struct ConsoleFrame<'a> {
    pub uniform: ConsoleUniform,
    pub slot: TransformSlot,
    /// Per-cell pixel offsets, row-major. Uploaded once.
    pub offsets: &'a [[f32; 2]],
    pub buffer: &'a ScrollBuffer,
}

/// GPU side of a console: one pipeline, one uniform block, one draw.
///
/// Resources are created on the first [`render`](Self::render) call. The glyph
/// buffer is sized for the grid once and rewritten in place every frame; the
/// offset buffer never changes after creation.
#[derive(Default)]
pub struct ConsoleRenderer {
    pipeline_key: Option<(wgpu::TextureFormat, TransformSlot)>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    bind_group: Option<wgpu::BindGroup>,
    uniform_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    offset_vbo: Option<wgpu::Buffer>,
    glyph_vbo: Option<wgpu::Buffer>,
    cell_count: usize,

    /// Interleaved copy of the scroll buffer, reused across frames.
    staging: Vec<GlyphInstance>,
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once GPU resources exist.
    pub fn is_ready(&self) -> bool {
        self.pipeline.is_some()
            && self.bind_group.is_some()
            && self.offset_vbo.is_some()
            && self.glyph_vbo.is_some()
    }

    /// Uploads the frame's uniforms and glyphs and issues one instanced draw
    /// covering every cell.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        frame: &ConsoleFrame<'_>,
    ) {
        let cells = frame.buffer.rows() * frame.buffer.cols();
        debug_assert_eq!(frame.offsets.len(), cells, "offset table does not match the grid");

        let was_ready = self.is_ready();
        self.ensure_pipeline(ctx, frame.slot);
        self.ensure_bindings(ctx);
        self.ensure_static_buffers(ctx, frame.offsets);
        self.ensure_glyph_buffer(ctx, cells);
        if !was_ready && self.is_ready() {
            log::debug!(
                "console renderer ready: {}x{} cells, {:?}",
                frame.buffer.rows(),
                frame.buffer.cols(),
                ctx.surface_format
            );
        }

        // Mutating methods must happen before borrowing pipeline/buffers immutably.
        self.fill_staging(frame.buffer);

        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&frame.uniform));

        let Some(glyph_vbo) = self.glyph_vbo.as_ref() else { return };
        ctx.queue.write_buffer(glyph_vbo, 0, bytemuck::cast_slice(&self.staging));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };
        let Some(offset_vbo) = self.offset_vbo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scry console pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, offset_vbo.slice(..));
        rpass.set_vertex_buffer(2, glyph_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..self.cell_count as u32);
    }

    fn fill_staging(&mut self, buffer: &ScrollBuffer) {
        let (lo, hi) = buffer.grids();
        self.staging.clear();
        self.staging.extend(lo.iter().zip(hi.iter()).map(|(a, b)| GlyphInstance {
            bytes_012: [a[0], a[1], a[2], 0],
            bytes_345: [b[0], b[1], b[2], 0],
        }));
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>, slot: TransformSlot) {
        let key = (ctx.surface_format, slot);
        if self.pipeline_key == Some(key) && self.pipeline.is_some() {
            return;
        }

        let source = shader::resolve(shader::CONSOLE_TEMPLATE, slot);
        let module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scry console shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("scry console bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: uniform_min_binding_size::<ConsoleUniform>(),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("scry console pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scry console pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), CellOffset::layout(), GlyphInstance::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        if self.pipeline_key.is_some() {
            log::debug!("console pipeline rebuilt for {:?} / {:?}", key.0, key.1);
        }

        self.pipeline_key = Some(key);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        // The bind group belongs to the old layout.
        self.bind_group = None;
        self.uniform_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.uniform_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let uniform_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scry console ubo"),
            size: std::mem::size_of::<ConsoleUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scry console bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_ubo.as_entire_binding(),
            }],
        });

        self.uniform_ubo = Some(uniform_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>, offsets: &[[f32; 2]]) {
        if self.quad_vbo.is_none() || self.quad_ibo.is_none() {
            self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("scry console quad vbo"),
                contents: bytemuck::cast_slice(&QUAD_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            }));
            self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("scry console quad ibo"),
                contents: bytemuck::cast_slice(&QUAD_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            }));
        }

        if self.offset_vbo.is_none() {
            let cells: Vec<CellOffset> = offsets.iter().map(|&offset| CellOffset { offset }).collect();
            self.offset_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("scry console offset vbo"),
                contents: bytemuck::cast_slice(&cells),
                usage: wgpu::BufferUsages::VERTEX,
            }));
        }
    }

    fn ensure_glyph_buffer(&mut self, ctx: &RenderCtx<'_>, cells: usize) {
        if self.glyph_vbo.is_some() && self.cell_count == cells {
            return;
        }

        self.glyph_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scry console glyph vbo"),
            size: (cells * std::mem::size_of::<GlyphInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.cell_count = cells;
        self.staging = Vec::with_capacity(cells);
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CellOffset {
    offset: [f32; 2],
}

impl CellOffset {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CellOffset>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// One cell's glyph record, each half padded to four bytes for `Uint8x4`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    bytes_012: [u8; 4],
    bytes_345: [u8; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        2 => Uint8x4, // bytes 0..3
        3 => Uint8x4  // bytes 3..6
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Orientation;

    #[test]
    fn uniform_matches_wgsl_layout() {
        // mat4x4 (64) + vec2 (8) + vec2 (8) + vec4 (16) + f32, rounded up to 16.
        assert_eq!(std::mem::size_of::<ConsoleUniform>(), 112);
        assert_eq!(std::mem::offset_of!(ConsoleUniform, pos), 64);
        assert_eq!(std::mem::offset_of!(ConsoleUniform, color), 80);
        assert_eq!(std::mem::offset_of!(ConsoleUniform, scale), 96);
    }

    #[test]
    fn vertex_strides_are_aligned() {
        assert_eq!(std::mem::size_of::<GlyphInstance>() % 4, 0);
        assert_eq!(std::mem::size_of::<CellOffset>() % 4, 0);
    }

    #[test]
    fn staging_interleaves_both_grids() {
        let mut buffer = ScrollBuffer::new(2, 3, Orientation::ScrollDown);
        buffer.write("A");

        let mut renderer = ConsoleRenderer::new();
        renderer.fill_staging(&buffer);

        assert_eq!(renderer.staging.len(), 6);
        assert_eq!(renderer.staging[0].bytes_012, [0x39, 0x14, 0x51, 0]);
        assert_eq!(renderer.staging[0].bytes_345, [0x7D, 0x14, 0x40, 0]);
        assert!(renderer.staging[1..].iter().all(|g| g.bytes_012 == [0; 4] && g.bytes_345 == [0; 4]));
        assert!(!renderer.is_ready());
    }
}
