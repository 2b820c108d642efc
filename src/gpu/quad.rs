//! Full-screen quad effects.
//!
//! The quad is a `subdivisions × subdivisions` grid spanning clip space, with
//! uv `(0, 0)` at the bottom-left and `(1, 1)` at the top-right. It is drawn
//! with a single indexed draw call.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::validate::create_validated_module;
use super::{blend_state, DEPTH_FORMAT};
use crate::color::ColorSet;
use crate::effects::{generate_shader, ShaderEffect};
use crate::error::ShaderError;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

/// Uniform block shared by every effect shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct EffectUniforms {
    pub colors: [[f32; 4]; 5],
    pub time: f32,
    pub _padding: [f32; 3],
}

impl EffectUniforms {
    pub fn new(colors: &ColorSet, time: f32) -> Self {
        Self {
            colors: colors.to_uniform_array(),
            time,
            _padding: [0.0; 3],
        }
    }
}

/// Build the grid: `(n + 1)²` vertices and `6n²` counter-clockwise indices.
pub fn grid_mesh(subdivisions: u32) -> (Vec<QuadVertex>, Vec<u32>) {
    let n = subdivisions.max(1);
    let row = n + 1;

    let mut vertices = Vec::with_capacity((row * row) as usize);
    for j in 0..=n {
        for i in 0..=n {
            let u = i as f32 / n as f32;
            let v = j as f32 / n as f32;
            vertices.push(QuadVertex {
                position: [u * 2.0 - 1.0, v * 2.0 - 1.0],
                uv: [u, v],
            });
        }
    }

    let mut indices = Vec::with_capacity((n * n * 6) as usize);
    for j in 0..n {
        for i in 0..n {
            let a = j * row + i;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;
            indices.extend_from_slice(&[a, b, c, c, b, d]);
        }
    }

    (vertices, indices)
}

/// GPU resources for one shader effect.
pub struct QuadPipeline {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    name: &'static str,
}

impl QuadPipeline {
    /// Compile the effect and upload its mesh.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        effect: &dyn ShaderEffect,
        subdivisions: u32,
    ) -> Result<Self, ShaderError> {
        let name = effect.name();
        let source = generate_shader(effect);
        let shader = create_validated_module(device, name, &source)?;

        let (vertices, indices) = grid_mesh(subdivisions);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Effect Uniform Buffer"),
            contents: bytemuck::bytes_of(&EffectUniforms::new(&ColorSet::default(), 0.0)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Effect Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Effect Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Effect Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(name),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: blend_state(effect.blend_mode()),
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
            // The quad ignores depth but shares the pass's depth attachment.
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        log::debug!(
            "Built {} pipeline: {} vertices, {} indices",
            name,
            vertices.len(),
            indices.len()
        );

        Ok(Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            uniform_buffer,
            bind_group,
            name,
        })
    }

    /// Write this frame's time and colors.
    pub fn update(&self, queue: &wgpu::Queue, colors: &ColorSet, time: f32) {
        let uniforms = EffectUniforms::new(colors, time);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    pub fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }

    /// Free GPU memory now rather than when the last reference drops.
    pub fn release(self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        self.uniform_buffer.destroy();
        log::debug!("Released {} pipeline", self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_counts() {
        let (vertices, indices) = grid_mesh(32);
        assert_eq!(vertices.len(), 33 * 33);
        assert_eq!(indices.len(), 32 * 32 * 6);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn test_grid_uv_orientation() {
        let (vertices, _) = grid_mesh(4);
        assert_eq!(vertices[0], QuadVertex { position: [-1.0, -1.0], uv: [0.0, 0.0] });
        assert_eq!(
            vertices.last().copied(),
            Some(QuadVertex { position: [1.0, 1.0], uv: [1.0, 1.0] })
        );
    }

    #[test]
    fn test_grid_triangles_counter_clockwise() {
        let (vertices, indices) = grid_mesh(2);
        for tri in indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| vertices[i as usize].position);
            let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
            assert!(cross > 0.0);
        }
    }

    #[test]
    fn test_uniform_colors_keep_srgb_encoding() {
        let colors = ColorSet::from_hex(&["#800080", "#000000", "#FFFFFF", "#404040", "#C0C0C0"]).unwrap();
        let uniforms = EffectUniforms::new(&colors, 1.5);
        let half = 128.0 / 255.0;
        assert_eq!(uniforms.colors[0], [half, 0.0, half, 1.0]);
        assert_eq!(uniforms.colors[3][0], 64.0 / 255.0);
        assert_eq!(uniforms.time, 1.5);
    }

    #[test]
    fn test_uniform_layout_matches_wgsl() {
        // array<vec4<f32>, 5> + time + three f32 pads
        assert_eq!(std::mem::size_of::<EffectUniforms>(), 96);
    }
}
