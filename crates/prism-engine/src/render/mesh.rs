use anyhow::Result;
use wgpu::util::DeviceExt;

use crate::render::shader;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{SceneDesc, TextureData, TransformUniform, Variant};

/// Background color every frame starts from.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.337,
    g: 0.627,
    b: 0.827,
    a: 1.0,
};

const UNIFORM_BINDING: u32 = 0;
const TEXTURE_BINDING: u32 = 1;
const SAMPLER_BINDING: u32 = 2;

/// Renders one hard-coded mesh with a single draw call.
///
/// All GPU state is created once in [`MeshRenderer::new`] and never rebuilt.
/// Fields are declared in reverse creation order so that dropping the renderer
/// releases dependants (bind group, pipeline) before the buffers and shader.
pub struct MeshRenderer {
    bind_group: Option<wgpu::BindGroup>,
    pipeline: wgpu::RenderPipeline,
    _pipeline_layout: wgpu::PipelineLayout,
    _bind_group_layout: Option<wgpu::BindGroupLayout>,

    texture: Option<CheckerTexture>,
    uniform_buffer: Option<wgpu::Buffer>,
    index: Option<IndexBuffer>,
    vertex_buffer: wgpu::Buffer,
    _shader: wgpu::ShaderModule,

    vertex_count: u32,
    target_format: wgpu::TextureFormat,
    variant: Variant,
}

struct IndexBuffer {
    buffer: wgpu::Buffer,
    format: wgpu::IndexFormat,
    count: u32,
}

struct CheckerTexture {
    sampler: wgpu::Sampler,
    view: wgpu::TextureView,
    _texture: wgpu::Texture,
}

impl MeshRenderer {
    /// Builds every GPU resource `desc` asks for.
    ///
    /// Stops at the first failure; resources created before it are dropped with
    /// the partially built locals.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target_format: wgpu::TextureFormat,
        desc: &SceneDesc,
    ) -> Result<Self> {
        anyhow::ensure!(desc.vertex_count > 0, "{}: scene has no vertices", desc.variant);
        anyhow::ensure!(
            desc.vertices.len() as u64 == desc.vertex_layout.array_stride * desc.vertex_count as u64,
            "{}: vertex data does not match the input layout stride",
            desc.variant
        );
        if let Some(idx) = desc.indices {
            let max = idx.max_index().unwrap_or(0);
            anyhow::ensure!(
                idx.count() > 0 && max < desc.vertex_count,
                "{}: index {max} out of range for {} vertices",
                desc.variant,
                desc.vertex_count
            );
        }

        let shader = shader::compile(device, &desc.shader)?;
        log::debug!("{}: compiled {}", desc.variant, desc.shader.label);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism vertex buffer"),
            contents: desc.vertices,
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index = desc.indices.map(|idx| IndexBuffer {
            buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("prism index buffer"),
                contents: idx.bytes(),
                usage: wgpu::BufferUsages::INDEX,
            }),
            format: idx.format(),
            count: idx.count(),
        });

        let uniform_buffer = desc.uses_uniform().then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("prism transform ubo"),
                contents: bytemuck::bytes_of(&TransformUniform::default()),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            })
        });

        let texture = desc
            .texture_data()
            .map(|data| CheckerTexture::upload(device, queue, &data));

        let mut layout_entries = Vec::new();
        if uniform_buffer.is_some() {
            layout_entries.push(wgpu::BindGroupLayoutEntry {
                binding: UNIFORM_BINDING,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(TransformUniform::SIZE),
                },
                count: None,
            });
        }
        if texture.is_some() {
            layout_entries.push(wgpu::BindGroupLayoutEntry {
                binding: TEXTURE_BINDING,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            });
            layout_entries.push(wgpu::BindGroupLayoutEntry {
                binding: SAMPLER_BINDING,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            });
        }

        let bind_group_layout = (!layout_entries.is_empty()).then(|| {
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("prism mesh bgl"),
                entries: &layout_entries,
            })
        });

        let bind_group_layouts: Vec<&wgpu::BindGroupLayout> = bind_group_layout.iter().collect();
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("prism mesh pipeline layout"),
            bind_group_layouts: &bind_group_layouts,
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("prism mesh pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(desc.shader.vs_entry),
                compilation_options: Default::default(),
                buffers: &[desc.vertex_layout.clone()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(desc.shader.fs_entry),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // Direct3D rasterizer defaults: clockwise front faces, back faces culled.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Cw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let bind_group = bind_group_layout.as_ref().map(|bgl| {
            let mut entries = Vec::new();
            if let Some(ubo) = uniform_buffer.as_ref() {
                entries.push(wgpu::BindGroupEntry {
                    binding: UNIFORM_BINDING,
                    resource: ubo.as_entire_binding(),
                });
            }
            if let Some(tex) = texture.as_ref() {
                entries.push(wgpu::BindGroupEntry {
                    binding: TEXTURE_BINDING,
                    resource: wgpu::BindingResource::TextureView(&tex.view),
                });
                entries.push(wgpu::BindGroupEntry {
                    binding: SAMPLER_BINDING,
                    resource: wgpu::BindingResource::Sampler(&tex.sampler),
                });
            }

            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("prism mesh bind group"),
                layout: bgl,
                entries: &entries,
            })
        });

        log::info!(
            "{}: scene ready ({} vertices, {} indices, uniform: {}, textured: {})",
            desc.variant,
            desc.vertex_count,
            index.as_ref().map_or(0, |i| i.count),
            uniform_buffer.is_some(),
            texture.is_some()
        );

        Ok(Self {
            bind_group,
            pipeline,
            _pipeline_layout: pipeline_layout,
            _bind_group_layout: bind_group_layout,
            texture,
            uniform_buffer,
            index,
            vertex_buffer,
            _shader: shader,
            vertex_count: desc.vertex_count,
            target_format,
            variant: desc.variant,
        })
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[inline]
    pub fn has_uniform(&self) -> bool {
        self.uniform_buffer.is_some()
    }

    #[inline]
    pub fn is_textured(&self) -> bool {
        self.texture.is_some()
    }

    /// Elements covered by the single draw call (indices if indexed, else vertices).
    pub fn draw_count(&self) -> u32 {
        self.index.as_ref().map_or(self.vertex_count, |i| i.count)
    }

    /// Writes this frame's transform into the constant buffer.
    ///
    /// The write is staged by the queue and lands before the next submission,
    /// so no mapping outlives this call. Returns `false` for scenes without a
    /// constant buffer.
    pub fn write_transform(&self, queue: &wgpu::Queue, transform: &TransformUniform) -> bool {
        let Some(ubo) = self.uniform_buffer.as_ref() else {
            return false;
        };
        queue.write_buffer(ubo, 0, bytemuck::bytes_of(transform));
        true
    }

    /// Clears the target, binds all pipeline state and issues one draw.
    pub fn render(&self, ctx: &RenderCtx, target: &mut RenderTarget<'_>) {
        debug_assert_eq!(
            ctx.surface_format, self.target_format,
            "{}: pipeline built for a different target format",
            self.variant
        );

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("prism mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if ctx.viewport.is_valid() {
            rpass.set_viewport(0.0, 0.0, ctx.viewport.width, ctx.viewport.height, 0.0, 1.0);
        }

        rpass.set_pipeline(&self.pipeline);
        if let Some(bind_group) = self.bind_group.as_ref() {
            rpass.set_bind_group(0, bind_group, &[]);
        }
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

        match self.index.as_ref() {
            Some(index) => {
                rpass.set_index_buffer(index.buffer.slice(..), index.format);
                rpass.draw_indexed(0..index.count, 0, 0..1);
            }
            None => rpass.draw(0..self.vertex_count, 0..1),
        }
    }
}

impl CheckerTexture {
    fn upload(device: &wgpu::Device, queue: &wgpu::Queue, data: &TextureData) -> Self {
        let size = wgpu::Extent3d {
            width: data.width,
            height: data.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("prism checker texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &data.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(data.bytes_per_row()),
                rows_per_image: Some(data.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("prism checker sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Self {
            sampler,
            view,
            _texture: texture,
        }
    }
}
