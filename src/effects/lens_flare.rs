//! Lens Flares and Glows.

use glam::{Vec2, Vec4};

use super::{BlendMode, ShaderEffect};
use crate::color::ColorSet;
use crate::noise::{mix, smoothstep, unit};
use crate::preset::PresetId;

/// Soft disc: 1 inside `radius - softness`, falling to 0 at `radius`.
fn circle(uv: Vec2, center: Vec2, radius: f32, softness: f32) -> f32 {
    let d = (uv - center).length();
    1.0 - smoothstep(radius - softness, radius, d)
}

/// A central flare ringed by four small ones, a wide glow, and one flare
/// orbiting the center at radius 0.2. Drawn with additive blending.
#[derive(Debug, Clone, Copy, Default)]
pub struct LensFlare;

impl ShaderEffect for LensFlare {
    fn preset(&self) -> PresetId {
        PresetId::LensFlaresAndGlows
    }

    fn blend_mode(&self) -> BlendMode {
        BlendMode::Additive
    }

    fn wgsl_helpers(&self) -> &'static str {
        r#"
fn flare_circle(uv: vec2<f32>, center: vec2<f32>, radius: f32, softness: f32) -> f32 {
    let d = length(uv - center);
    return 1.0 - smoothstep(radius - softness, radius, d);
}
"#
    }

    fn wgsl_body(&self) -> &'static str {
        r#"
    let uv = frag_uv - 0.5;

    let flare1 = flare_circle(uv, vec2<f32>(0.0), 0.1, 0.05);
    let flare2 = flare_circle(uv, vec2<f32>(0.2, 0.0), 0.05, 0.02);
    let flare3 = flare_circle(uv, vec2<f32>(-0.2, 0.0), 0.05, 0.02);
    let flare4 = flare_circle(uv, vec2<f32>(0.0, 0.2), 0.05, 0.02);
    let flare5 = flare_circle(uv, vec2<f32>(0.0, -0.2), 0.05, 0.02);

    let glow = flare_circle(uv, vec2<f32>(0.0), 0.3, 0.2);

    let flare_pos = vec2<f32>(sin(t) * 0.2, cos(t) * 0.2);
    let animated = flare_circle(uv, flare_pos, 0.1, 0.05);

    let total = max(max(max(max(flare1, flare2), flare3), max(flare4, flare5)), animated);

    let color1 = mix(c1, c2, total);
    let color2 = mix(c2, c3, glow);
    let color3 = mix(c3, c4, animated);

    var final_color = mix(
        mix(color1, color2, uv.x + 0.5),
        mix(color2, color3, uv.y + 0.5),
        sin(t) * 0.5 + 0.5
    );
    final_color = mix(final_color, c5, pow(max(total, glow), 3.0));
    return vec4<f32>(final_color, 1.0);
"#
    }

    fn shade(&self, uv: Vec2, t: f32, colors: &ColorSet) -> Vec4 {
        let [c1, c2, c3, c4, c5] = colors.to_vec3s();
        let uv = uv - 0.5;

        let flare1 = circle(uv, Vec2::ZERO, 0.1, 0.05);
        let flare2 = circle(uv, Vec2::new(0.2, 0.0), 0.05, 0.02);
        let flare3 = circle(uv, Vec2::new(-0.2, 0.0), 0.05, 0.02);
        let flare4 = circle(uv, Vec2::new(0.0, 0.2), 0.05, 0.02);
        let flare5 = circle(uv, Vec2::new(0.0, -0.2), 0.05, 0.02);

        let glow = circle(uv, Vec2::ZERO, 0.3, 0.2);

        let flare_pos = Vec2::new(t.sin(), t.cos()) * 0.2;
        let animated = circle(uv, flare_pos, 0.1, 0.05);

        let total = flare1
            .max(flare2)
            .max(flare3)
            .max(flare4.max(flare5))
            .max(animated);

        let color1 = mix(c1, c2, total);
        let color2 = mix(c2, c3, glow);
        let color3 = mix(c3, c4, animated);

        let final_color = mix(
            mix(color1, color2, uv.x + 0.5),
            mix(color2, color3, uv.y + 0.5),
            unit(t.sin()),
        );
        mix(final_color, c5, total.max(glow).powi(3)).extend(1.0)
    }
}
