//! Gradient Animation.

use glam::{Vec2, Vec3, Vec4};

use super::ShaderEffect;
use crate::color::ColorSet;
use crate::noise::{fract, hash_dither, mix, smoothstep};
use crate::preset::PresetId;

/// A diagonal band of all five colors sliding toward the bottom-left, brighter
/// toward the center, with a gentle global pulse and a fixed per-pixel dither.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradientAnimation;

impl GradientAnimation {
    fn gradient_color(uv: Vec2, t: f32, colors: &ColorSet) -> Vec3 {
        let [c1, c2, c3, c4, c5] = colors.to_vec3s();

        let diagonal = (uv.x + uv.y) * 0.5;
        let k = fract(diagonal - t * 0.1);

        let mut color = mix(c1, c2, smoothstep(0.0, 0.3, k));
        color = mix(color, c3, smoothstep(0.3, 0.5, k));
        color = mix(color, c4, smoothstep(0.5, 0.7, k));
        color = mix(color, c5, smoothstep(0.7, 1.0, k));

        let radius = (uv - 0.5).length();
        let radial = 1.0 - smoothstep(0.0, 1.0, radius * 1.5);

        mix(color, color * 1.2, radial)
    }
}

impl ShaderEffect for GradientAnimation {
    fn preset(&self) -> PresetId {
        PresetId::GradientAnimation
    }

    fn speed(&self) -> f32 {
        0.2
    }

    fn wgsl_helpers(&self) -> &'static str {
        r#"
fn gradient_color(uv: vec2<f32>, t: f32, c1: vec3<f32>, c2: vec3<f32>, c3: vec3<f32>, c4: vec3<f32>, c5: vec3<f32>) -> vec3<f32> {
    let diagonal = (uv.x + uv.y) * 0.5;
    let k = fract(diagonal - t * 0.1);

    var color = mix(c1, c2, smoothstep(0.0, 0.3, k));
    color = mix(color, c3, smoothstep(0.3, 0.5, k));
    color = mix(color, c4, smoothstep(0.5, 0.7, k));
    color = mix(color, c5, smoothstep(0.7, 1.0, k));

    let radius = length(uv - vec2<f32>(0.5));
    let radial = 1.0 - smoothstep(0.0, 1.0, radius * 1.5);

    return mix(color, color * 1.2, radial);
}
"#
    }

    fn wgsl_body(&self) -> &'static str {
        r#"
    var color = gradient_color(frag_uv, t, c1, c2, c3, c4, c5);
    color *= sin(t * 0.5) * 0.05 + 0.95;
    color += hash_dither(frag_uv) * 0.02;
    return vec4<f32>(color, 1.0);
"#
    }

    fn shade(&self, uv: Vec2, t: f32, colors: &ColorSet) -> Vec4 {
        let mut color = Self::gradient_color(uv, t, colors);
        color *= (t * 0.5).sin() * 0.05 + 0.95;
        color += hash_dither(uv) * 0.02;
        color.extend(1.0)
    }
}
