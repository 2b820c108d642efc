//! GPU host: surface, device and the pipeline for the active effect.
//!
//! At most one effect pipeline exists at a time. Switching presets releases
//! the old pipeline's buffers before the new one is built, so resources never
//! accumulate across switches.
//!
//! Colors are sRGB-encoded values from input to screen. Effects mix them in
//! that space and the host writes the results through a non-sRGB view of the
//! surface, so `#800080` lands on screen as `#800080`.

mod camera;
mod points;
mod quad;
pub mod validate;

use std::sync::Arc;

use winit::window::Window;

pub use camera::Camera;
pub use points::{ParticlePipeline, PointUniforms, DEFAULT_POINT_SIZE, PARTICLE_SHADER};
pub use quad::{grid_mesh, EffectUniforms, QuadPipeline, QuadVertex};

use crate::color::Color;
use crate::effects::BlendMode;
use crate::error::{GpuError, ShaderError};
use validate::settle_scope;
use crate::scene::{EffectInstance, Scene, Tick};

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Color-target blend state for an effect's blend mode.
pub fn blend_state(mode: BlendMode) -> Option<wgpu::BlendState> {
    match mode {
        BlendMode::Opaque => Some(wgpu::BlendState::REPLACE),
        BlendMode::Alpha => Some(wgpu::BlendState::ALPHA_BLENDING),
        BlendMode::Additive => Some(wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        }),
    }
}

/// Pick the surface format and the format effects render through.
///
/// An 8-bit RGBA/BGRA format is preferred. The render format is always the
/// non-sRGB twin of the surface format, so shader output is stored as is.
pub fn choose_formats(
    formats: &[wgpu::TextureFormat],
) -> Result<(wgpu::TextureFormat, wgpu::TextureFormat), GpuError> {
    let surface = formats
        .iter()
        .copied()
        .find(|f| {
            matches!(
                f.remove_srgb_suffix(),
                wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
            )
        })
        .or_else(|| formats.first().copied())
        .ok_or(GpuError::NoSurfaceFormat)?;
    Ok((surface, surface.remove_srgb_suffix()))
}

/// Render options fixed at startup.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub background: Color,
    /// Overrides every effect's own grid density when set.
    pub quad_subdivisions: Option<u32>,
    pub point_size: f32,
    pub vsync: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            quad_subdivisions: None,
            point_size: DEFAULT_POINT_SIZE,
            vsync: true,
        }
    }
}

enum ActivePipeline {
    Quad(QuadPipeline),
    Particles(ParticlePipeline),
}

impl ActivePipeline {
    fn release(self) {
        match self {
            ActivePipeline::Quad(p) => p.release(),
            ActivePipeline::Particles(p) => p.release(),
        }
    }
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    render_format: wgpu::TextureFormat,
    depth_texture: wgpu::TextureView,
    camera: Camera,
    options: RenderOptions,
    active: Option<ActivePipeline>,
}

impl GpuState {
    pub async fn new(window: Arc<Window>, options: RenderOptions) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let info = adapter.get_info();
        log::info!("Using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let (surface_format, render_format) = choose_formats(&surface_caps.formats)?;
        log::debug!("Surface {:?}, rendering through {:?}", surface_format, render_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if options.vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: if render_format == surface_format {
                vec![]
            } else {
                vec![render_format]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = create_depth_texture(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            render_format,
            depth_texture,
            camera: Camera::new(),
            options,
            active: None,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = create_depth_texture(&self.device, &self.config);
        }
    }

    /// Reconfigure the surface at its current size after it was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    #[inline]
    pub fn size(&self) -> winit::dpi::PhysicalSize<u32> {
        winit::dpi::PhysicalSize::new(self.config.width, self.config.height)
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height as f32
    }

    /// Rebuild the pipeline for the scene's active effect.
    ///
    /// A shader that fails to build is logged and leaves the host rendering
    /// blank frames; it never takes the process down. The whole build runs in
    /// one validation error scope.
    pub fn set_effect(&mut self, scene: &Scene) {
        if let Some(old) = self.active.take() {
            old.release();
        }

        let effect = scene.active().map_or("Blank", |a| a.preset().name());
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let built = self.build_pipeline(scene);
        let scope_error = pollster::block_on(self.device.pop_error_scope()).map(|e| e.to_string());
        let settled = settle_scope(effect, built, scope_error, |pipeline| {
            if let Some(pipeline) = pipeline {
                pipeline.release();
            }
        });

        self.active = match settled {
            Ok(pipeline) => pipeline,
            Err(e) => {
                log::error!("{}", e);
                None
            }
        };
    }

    fn build_pipeline(&self, scene: &Scene) -> Result<Option<ActivePipeline>, ShaderError> {
        let format = self.render_format;
        Ok(match scene.active() {
            Some(EffectInstance::Shader(effect)) => {
                let subdivisions = self
                    .options
                    .quad_subdivisions
                    .unwrap_or_else(|| effect.subdivisions());
                Some(ActivePipeline::Quad(QuadPipeline::new(
                    &self.device,
                    format,
                    *effect,
                    subdivisions,
                )?))
            }
            Some(EffectInstance::Particles { cloud, .. }) => Some(ActivePipeline::Particles(
                ParticlePipeline::new(&self.device, format, cloud)?,
            )),
            None => None,
        })
    }

    fn update(&self, scene: &Scene, tick: &Tick) {
        match (&self.active, scene.active()) {
            (Some(ActivePipeline::Quad(quad)), _) => {
                quad.update(&self.queue, scene.colors(), tick.effect_time);
            }
            (Some(ActivePipeline::Particles(points)), Some(EffectInstance::Particles { cloud, .. })) => {
                if tick.positions_changed {
                    points.upload(&self.queue, cloud);
                }
                let aspect = self.aspect();
                let view_proj = self.camera.view_projection(aspect) * scene.model_matrix();
                let uniforms = PointUniforms::new(view_proj, self.options.point_size, aspect);
                points.update(&self.queue, &uniforms);
            }
            _ => {}
        }
    }

    pub fn render(&mut self, scene: &Scene, tick: &Tick) -> Result<(), wgpu::SurfaceError> {
        self.update(scene, tick);

        let output = self.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.render_format),
            ..Default::default()
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let [r, g, b] = self.options.background.to_vec3().to_array();
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            match &self.active {
                Some(ActivePipeline::Quad(quad)) => quad.draw(&mut render_pass),
                Some(ActivePipeline::Particles(points)) => points.draw(&mut render_pass),
                None => {}
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_depth_texture(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
