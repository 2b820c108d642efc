//! Shader effects.
//!
//! Each quad effect is a pure function of `(uv, t, colors)` where `t` is the
//! effect's local time, `elapsed * speed`. An effect is described twice:
//!
//! - a WGSL body that the GPU runs per pixel, spliced into a shared shader
//!   template by [`generate_shader`], and
//! - a CPU reference [`ShaderEffect::shade`] that computes the same value,
//!   used by tests, benchmarks and anything that needs a pixel without a GPU.
//!
//! The two are kept in lock step; any change to one must be made to the other.
//!
//! # Example
//!
//! ```ignore
//! use hueflow::effects::{effect_for, generate_shader};
//! use hueflow::{ColorSet, PresetId};
//!
//! let wave = effect_for(PresetId::WaveLikeFlow).unwrap();
//! let pixel = wave.sample(glam::Vec2::new(0.5, 0.5), 2.0, &ColorSet::default());
//! let wgsl = generate_shader(wave);
//! ```

mod energy_burst;
mod fluid_gradient;
mod geometric;
mod gradient;
mod lens_flare;
mod shimmer;
mod slow_motion;
mod soft_gradient;
mod vortex;
mod wave;
mod wave_pulsation;

pub use energy_burst::EnergyBurst;
pub use fluid_gradient::FluidGradient;
pub use geometric::GeometricShapes;
pub use gradient::GradientAnimation;
pub use lens_flare::LensFlare;
pub use shimmer::ShimmeringLight;
pub use slow_motion::SlowMotion;
pub use soft_gradient::SoftMovingGradient;
pub use vortex::SwirlingVortex;
pub use wave::WaveFlow;
pub use wave_pulsation::WavePulsation;

use glam::{Vec2, Vec4};

use crate::color::ColorSet;
use crate::preset::PresetId;
use crate::shader_utils;

/// Grid resolution of the quad mesh unless an effect asks for more.
pub const DEFAULT_SUBDIVISIONS: u32 = 32;

/// How an effect's output is composited over the cleared frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Output replaces the framebuffer.
    #[default]
    Opaque,

    /// Standard alpha blending.
    ///
    /// The only mode where the effect's alpha channel is visible.
    Alpha,

    /// Additive blending.
    ///
    /// Source color scaled by its alpha is added to what is already there.
    Additive,
}

/// A full-screen procedural effect.
pub trait ShaderEffect: Send + Sync {
    /// The preset this effect renders.
    fn preset(&self) -> PresetId;

    /// Display name.
    fn name(&self) -> &'static str {
        self.preset().name()
    }

    /// Multiplier from elapsed seconds to effect time.
    fn speed(&self) -> f32 {
        1.0
    }

    fn blend_mode(&self) -> BlendMode {
        BlendMode::Opaque
    }

    /// Quad grid resolution per side.
    fn subdivisions(&self) -> u32 {
        DEFAULT_SUBDIVISIONS
    }

    /// Effect-specific WGSL functions, emitted before `shade`.
    ///
    /// Names must not clash with [`shader_utils`] or other effects.
    fn wgsl_helpers(&self) -> &'static str {
        ""
    }

    /// Body of `fn shade(frag_uv: vec2<f32>, t: f32, c1..c5: vec3<f32>) -> vec4<f32>`.
    fn wgsl_body(&self) -> &'static str;

    /// CPU reference for one pixel at effect time `t`.
    fn shade(&self, uv: Vec2, t: f32, colors: &ColorSet) -> Vec4;

    /// One pixel at `elapsed` seconds of wall-clock animation.
    fn sample(&self, uv: Vec2, elapsed: f32, colors: &ColorSet) -> Vec4 {
        self.shade(uv, elapsed * self.speed(), colors)
    }
}

static WAVE: WaveFlow = WaveFlow;
static VORTEX: SwirlingVortex = SwirlingVortex;
static LENS_FLARE: LensFlare = LensFlare;
static WAVE_PULSATION: WavePulsation = WavePulsation;
static GEOMETRIC: GeometricShapes = GeometricShapes;
static SLOW_MOTION: SlowMotion = SlowMotion;
static ENERGY_BURST: EnergyBurst = EnergyBurst;
static SHIMMER: ShimmeringLight = ShimmeringLight;
static GRADIENT: GradientAnimation = GradientAnimation;
static FLUID_GRADIENT: FluidGradient = FluidGradient;
static SOFT_GRADIENT: SoftMovingGradient = SoftMovingGradient;

/// The shader effect for a preset, or `None` for particle and unimplemented presets.
pub fn effect_for(preset: PresetId) -> Option<&'static dyn ShaderEffect> {
    let effect: &'static dyn ShaderEffect = match preset {
        PresetId::WaveLikeFlow => &WAVE,
        PresetId::SwirlingVortex => &VORTEX,
        PresetId::LensFlaresAndGlows => &LENS_FLARE,
        PresetId::WavePulsation => &WAVE_PULSATION,
        PresetId::GeometricShapes => &GEOMETRIC,
        PresetId::SlowMotionEffects => &SLOW_MOTION,
        PresetId::EnergyBurst => &ENERGY_BURST,
        PresetId::ShimmeringLight => &SHIMMER,
        PresetId::GradientAnimation => &GRADIENT,
        PresetId::FluidGradientAnimation => &FLUID_GRADIENT,
        PresetId::SoftMovingGradient => &SOFT_GRADIENT,
        PresetId::SmokeEffects
        | PresetId::FluidJarGradient
        | PresetId::ParticleEffects
        | PresetId::GlitterAndSparkle => return None,
    };
    Some(effect)
}

/// Every shader effect, in preset order.
pub fn all_effects() -> impl Iterator<Item = &'static dyn ShaderEffect> {
    PresetId::ALL.into_iter().filter_map(effect_for)
}

/// Generate the complete WGSL module for an effect.
///
/// Layout: uniforms, a pass-through vertex stage for the quad grid, the
/// shared utility functions, the effect's helpers and `shade`, and a fragment
/// stage that feeds `shade` the uniforms.
pub fn generate_shader(effect: &dyn ShaderEffect) -> String {
    let utils = shader_utils::all_utils_wgsl();
    let helpers = effect.wgsl_helpers();
    let body = effect.wgsl_body();
    let name = effect.name();

    format!(
        r#"// {name}
struct Uniforms {{
    colors: array<vec4<f32>, 5>,
    time: f32,
    _pad0: f32,
    _pad1: f32,
    _pad2: f32,
}};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {{
    @location(0) position: vec2<f32>,
    @location(1) uv: vec2<f32>,
}};

struct VertexOutput {{
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
}};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {{
    var out: VertexOutput;
    out.clip_position = vec4<f32>(in.position, 0.0, 1.0);
    out.uv = in.uv;
    return out;
}}

{utils}
{helpers}
fn shade(frag_uv: vec2<f32>, t: f32, c1: vec3<f32>, c2: vec3<f32>, c3: vec3<f32>, c4: vec3<f32>, c5: vec3<f32>) -> vec4<f32> {{
{body}
}}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {{
    return shade(
        in.uv,
        uniforms.time,
        uniforms.colors[0].rgb,
        uniforms.colors[1].rgb,
        uniforms.colors[2].rgb,
        uniforms.colors[3].rgb,
        uniforms.colors[4].rgb,
    );
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::PresetKind;

    #[test]
    fn test_every_shader_preset_has_an_effect() {
        for preset in PresetId::ALL {
            let has_effect = effect_for(preset).is_some();
            assert_eq!(has_effect, preset.kind() == PresetKind::Shader, "{}", preset);
        }
    }

    #[test]
    fn test_effects_report_their_preset() {
        for effect in all_effects() {
            assert_eq!(effect_for(effect.preset()).map(|e| e.name()), Some(effect.name()));
        }
        assert_eq!(all_effects().count(), 11);
    }

    #[test]
    fn test_speed_factors_in_range() {
        for effect in all_effects() {
            let speed = effect.speed();
            assert!((0.05..=1.0).contains(&speed), "{}: {}", effect.name(), speed);
        }
    }

    #[test]
    fn test_sample_scales_time() {
        let gradient = effect_for(PresetId::GradientAnimation).unwrap();
        let colors = ColorSet::default();
        let uv = Vec2::new(0.3, 0.6);
        assert_eq!(gradient.sample(uv, 10.0, &colors), gradient.shade(uv, 2.0, &colors));
    }

    #[test]
    fn test_generated_shader_structure() {
        let wgsl = generate_shader(&WAVE);
        assert!(wgsl.starts_with("// Wave-Like Flow"));
        assert!(wgsl.contains("fn vs_main"));
        assert!(wgsl.contains("fn fs_main"));
        assert!(wgsl.contains("fn snoise("));
        assert!(wgsl.contains("fn shade(frag_uv"));
    }

    #[test]
    fn test_only_expected_blend_modes() {
        assert_eq!(LENS_FLARE.blend_mode(), BlendMode::Additive);
        assert_eq!(SLOW_MOTION.blend_mode(), BlendMode::Alpha);
        assert_eq!(SLOW_MOTION.subdivisions(), 64);
        let opaque = all_effects()
            .filter(|e| e.blend_mode() == BlendMode::Opaque)
            .count();
        assert_eq!(opaque, 9);
    }
}
