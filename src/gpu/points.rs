//! Point-cloud rendering.
//!
//! Each point is an instanced screen-facing square. Positions and colors live
//! in one instance-rate vertex buffer; the rotation of the Particle Effects
//! preset is folded into the uniform view-projection matrix so only Glitter
//! and Sparkle re-uploads vertices.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use super::validate::create_validated_module;
use super::DEPTH_FORMAT;
use crate::error::ShaderError;
use crate::particles::{ParticleCloud, PointVertex};

/// Point side length in clip units at unit depth.
pub const DEFAULT_POINT_SIZE: f32 = 0.05;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct PointUniforms {
    /// `projection * view * model`.
    pub view_proj: [[f32; 4]; 4],
    pub point_size: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub _padding: [f32; 2],
}

impl PointUniforms {
    pub fn new(view_proj: Mat4, point_size: f32, aspect: f32) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            point_size,
            aspect,
            _padding: [0.0; 2],
        }
    }
}

/// Billboard shader for the point cloud.
///
/// The corner offset is added in clip space without scaling by `w`, so the
/// divide shrinks far points the way perspective-attenuated points do.
pub const PARTICLE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    point_size: f32,
    aspect: f32,
    _pad0: f32,
    _pad1: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) particle_pos: vec3<f32>,
    @location(1) particle_color: vec3<f32>,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
    );

    let corner = quad_vertices[vertex_index];
    let half = uniforms.point_size * 0.5;

    var out: VertexOutput;
    var clip = uniforms.view_proj * vec4<f32>(particle_pos, 1.0);
    clip.x = clip.x + corner.x * half / uniforms.aspect;
    clip.y = clip.y + corner.y * half;
    out.clip_position = clip;
    out.color = particle_color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, 1.0);
}
"#;

/// GPU resources for one point cloud.
pub struct ParticlePipeline {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ParticlePipeline {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        cloud: &ParticleCloud,
    ) -> Result<Self, ShaderError> {
        let shader = create_validated_module(device, "Particle Shader", PARTICLE_SHADER)?;

        let vertices = cloud.vertices();
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Instance Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Uniform Buffer"),
            contents: bytemuck::bytes_of(&PointUniforms::new(Mat4::IDENTITY, DEFAULT_POINT_SIZE, 1.0)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Particle Bind Group Layout"),
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

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Particle Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Particle Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Particle Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<PointVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
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
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        log::debug!("Built particle pipeline with {} points", vertices.len());

        Ok(Self {
            pipeline,
            instance_buffer,
            instance_count: vertices.len() as u32,
            uniform_buffer,
            bind_group,
        })
    }

    /// Re-upload point positions after the cloud moved.
    pub fn upload(&self, queue: &wgpu::Queue, cloud: &ParticleCloud) {
        let vertices = cloud.vertices();
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&vertices));
    }

    pub fn update(&self, queue: &wgpu::Queue, uniforms: &PointUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    pub fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        pass.draw(0..6, 0..self.instance_count);
    }

    pub fn release(self) {
        self.instance_buffer.destroy();
        self.uniform_buffer.destroy();
        log::debug!("Released particle pipeline");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::validate::validate_wgsl;

    #[test]
    fn test_particle_shader_validates() {
        let module = validate_wgsl("Particle Shader", PARTICLE_SHADER).unwrap();
        let entry_points: Vec<_> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
        assert!(entry_points.contains(&"vs_main"));
        assert!(entry_points.contains(&"fs_main"));
    }

    #[test]
    fn test_uniform_layout_matches_wgsl() {
        assert_eq!(std::mem::size_of::<PointUniforms>(), 80);
    }

    #[test]
    fn test_uniforms_store_column_major() {
        let m = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let u = PointUniforms::new(m, 0.05, 2.0);
        assert_eq!(u.view_proj[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(u.aspect, 2.0);
    }
}
