//! GPU rendering for fields.
//!
//! Two instanced pipelines: one draws points as quads with a solid core and
//! a radial-gradient glow, the other draws connection lines as thin quads
//! with per-segment opacity. Positions arrive in surface pixels; the vertex
//! shaders map them to clip space with the surface size uniform.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use winit::window::Window;

use crate::error::GpuError;
use crate::field::{PointSprite, Segment};

/// One point: center, core radius, glow radius, color.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct SpriteInstance {
    center: [f32; 2],
    radius: f32,
    glow: f32,
    color: [f32; 4],
}

impl From<&PointSprite> for SpriteInstance {
    fn from(s: &PointSprite) -> Self {
        Self {
            center: s.position.to_array(),
            radius: s.radius,
            glow: s.glow.max(s.radius).max(0.5),
            color: s.color,
        }
    }
}

/// One connection line: both endpoints and the faded color.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct SegmentInstance {
    a: [f32; 2],
    b: [f32; 2],
    color: [f32; 4],
}

impl From<&Segment> for SegmentInstance {
    fn from(s: &Segment) -> Self {
        Self {
            a: s.a.to_array(),
            b: s.b.to_array(),
            color: s.color,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    surface_size: [f32; 2],
    _pad: [f32; 2],
}

pub(crate) struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    sprite_pipeline: wgpu::RenderPipeline,
    segment_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    sprite_buffer: wgpu::Buffer,
    sprite_capacity: usize,
    segment_buffer: wgpu::Buffer,
    segment_capacity: usize,
    sprite_scratch: Vec<SpriteInstance>,
    segment_scratch: Vec<SegmentInstance>,
}

const INSTANCE_STRIDE: u64 = 32;

impl GpuState {
    pub async fn new(window: Arc<Window>) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("driftfield device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniforms = Uniforms {
            surface_size: [config.width as f32, config.height as f32],
            _pad: [0.0; 2],
        };
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Uniform Buffer"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Field Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let sprite_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            SPRITE_SHADER,
            "Sprite",
            &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: 8,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32,
                },
                wgpu::VertexAttribute {
                    offset: 16,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
            config.format,
        );

        let segment_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            SEGMENT_SHADER,
            "Segment",
            &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: 8,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: 16,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
            config.format,
        );

        let sprite_capacity = 128;
        let sprite_buffer = create_instance_buffer(&device, "Sprite", sprite_capacity);
        let segment_capacity = 1024;
        let segment_buffer = create_instance_buffer(&device, "Segment", segment_capacity);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            sprite_pipeline,
            segment_pipeline,
            uniform_buffer,
            uniform_bind_group,
            sprite_buffer,
            sprite_capacity,
            segment_buffer,
            segment_capacity,
            sprite_scratch: Vec::new(),
            segment_scratch: Vec::new(),
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);

            let uniforms = Uniforms {
                surface_size: [self.config.width as f32, self.config.height as f32],
                _pad: [0.0; 2],
            };
            self.queue
                .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        }
    }

    /// Draw one frame: connection lines first, point sprites on top.
    pub fn render(
        &mut self,
        sprites: &[PointSprite],
        segments: &[Segment],
    ) -> Result<(), wgpu::SurfaceError> {
        self.sprite_scratch.clear();
        self.sprite_scratch.extend(sprites.iter().map(SpriteInstance::from));
        self.segment_scratch.clear();
        self.segment_scratch.extend(segments.iter().map(SegmentInstance::from));

        if self.sprite_scratch.len() > self.sprite_capacity {
            self.sprite_capacity = self.sprite_scratch.len().next_power_of_two();
            self.sprite_buffer = create_instance_buffer(&self.device, "Sprite", self.sprite_capacity);
        }
        if self.segment_scratch.len() > self.segment_capacity {
            self.segment_capacity = self.segment_scratch.len().next_power_of_two();
            self.segment_buffer =
                create_instance_buffer(&self.device, "Segment", self.segment_capacity);
        }

        if !self.sprite_scratch.is_empty() {
            self.queue.write_buffer(
                &self.sprite_buffer,
                0,
                bytemuck::cast_slice(&self.sprite_scratch),
            );
        }
        if !self.segment_scratch.is_empty() {
            self.queue.write_buffer(
                &self.segment_buffer,
                0,
                bytemuck::cast_slice(&self.segment_scratch),
            );
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Field Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.02,
                            g: 0.02,
                            b: 0.05,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            if !self.segment_scratch.is_empty() {
                render_pass.set_pipeline(&self.segment_pipeline);
                render_pass.set_vertex_buffer(0, self.segment_buffer.slice(..));
                render_pass.draw(0..6, 0..self.segment_scratch.len() as u32);
            }

            if !self.sprite_scratch.is_empty() {
                render_pass.set_pipeline(&self.sprite_pipeline);
                render_pass.set_vertex_buffer(0, self.sprite_buffer.slice(..));
                render_pass.draw(0..6, 0..self.sprite_scratch.len() as u32);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_instance_buffer(device: &wgpu::Device, label: &str, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(&format!("{} Instance Buffer", label)),
        size: capacity as u64 * INSTANCE_STRIDE,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader_source: &str,
    label: &str,
    attributes: &[wgpu::VertexAttribute],
    surface_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{} Shader", label)),
        source: wgpu::ShaderSource::Wgsl(shader_source.into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{} Pipeline", label)),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: INSTANCE_STRIDE,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes,
            }],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
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
        multiview: None,
        cache: None,
    })
}

const SPRITE_SHADER: &str = r#"
struct Uniforms {
    surface_size: vec2<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) core: f32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) center: vec2<f32>,
    @location(1) radius: f32,
    @location(2) glow: f32,
    @location(3) color: vec4<f32>,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let quad_pos = quad_vertices[vertex_index];
    let pos = center + quad_pos * glow;

    var out: VertexOutput;
    out.clip_position = vec4<f32>(
        pos.x / uniforms.surface_size.x * 2.0 - 1.0,
        1.0 - pos.y / uniforms.surface_size.y * 2.0,
        0.0,
        1.0,
    );
    out.color = color;
    out.uv = quad_pos;
    out.core = radius / glow;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.uv);
    if dist > 1.0 {
        discard;
    }

    // Solid core, then a radial gradient fading to zero at the rim.
    var alpha: f32;
    if dist <= in.core {
        alpha = in.color.a;
    } else {
        let t = (dist - in.core) / max(1.0 - in.core, 0.0001);
        let fade = 1.0 - t;
        alpha = in.color.a * 0.8 * fade * fade;
    }
    return vec4<f32>(in.color.rgb, alpha);
}
"#;

const SEGMENT_SHADER: &str = r#"
struct Uniforms {
    surface_size: vec2<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) a: vec2<f32>,
    @location(1) b: vec2<f32>,
    @location(2) color: vec4<f32>,
) -> VertexOutput {
    let dir = b - a;
    let len = max(length(dir), 0.0001);
    let unit = dir / len;
    // Half-pixel offset either side gives a one-pixel line.
    let perp = vec2<f32>(-unit.y, unit.x) * 0.5;

    var pos: vec2<f32>;
    switch vertex_index {
        case 0u: { pos = a - perp; }
        case 1u: { pos = a + perp; }
        case 2u: { pos = b - perp; }
        case 3u: { pos = a + perp; }
        case 4u: { pos = b - perp; }
        default: { pos = b + perp; }
    }

    var out: VertexOutput;
    out.clip_position = vec4<f32>(
        pos.x / uniforms.surface_size.x * 2.0 - 1.0,
        1.0 - pos.y / uniforms.surface_size.y * 2.0,
        0.0,
        1.0,
    );
    out.color = color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
