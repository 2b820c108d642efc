//! Soft Moving Gradient.
//!
//! Not listed in the preset menu; reachable by name.

use glam::{Vec2, Vec3, Vec4};

use super::ShaderEffect;
use crate::color::ColorSet;
use crate::noise::{fract, hsv_to_rgb, mix, rgb_to_hsv, smoothstep};
use crate::preset::PresetId;

/// A slow diagonal sweep through the five colors in four equal segments,
/// with a faint hue and saturation wobble applied in HSV space.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftMovingGradient;

impl SoftMovingGradient {
    /// Piecewise blend across the palette for a position `k` in `[0, 1)`.
    fn sweep(k: f32, colors: &ColorSet) -> Vec3 {
        let [c1, c2, c3, c4, c5] = colors.to_vec3s();
        if k < 0.25 {
            mix(c1, c2, smoothstep(0.0, 0.25, k) * 4.0)
        } else if k < 0.5 {
            mix(c2, c3, smoothstep(0.25, 0.5, k) * 4.0 - 1.0)
        } else if k < 0.75 {
            mix(c3, c4, smoothstep(0.5, 0.75, k) * 4.0 - 2.0)
        } else {
            mix(c4, c5, smoothstep(0.75, 1.0, k) * 4.0 - 3.0)
        }
    }
}

impl ShaderEffect for SoftMovingGradient {
    fn preset(&self) -> PresetId {
        PresetId::SoftMovingGradient
    }

    fn speed(&self) -> f32 {
        0.05
    }

    fn wgsl_body(&self) -> &'static str {
        r#"
    let uv = frag_uv;
    let k = fract(t * 0.1 + uv.x * 0.7 + uv.y * 0.3);

    var color: vec3<f32>;
    if k < 0.25 {
        color = mix(c1, c2, smoothstep(0.0, 0.25, k) * 4.0);
    } else if k < 0.5 {
        color = mix(c2, c3, smoothstep(0.25, 0.5, k) * 4.0 - 1.0);
    } else if k < 0.75 {
        color = mix(c3, c4, smoothstep(0.5, 0.75, k) * 4.0 - 2.0);
    } else {
        color = mix(c4, c5, smoothstep(0.75, 1.0, k) * 4.0 - 3.0);
    }

    var hsv = rgb_to_hsv(color);
    hsv.x += sin(t * 0.2 + uv.x * 10.0) * 0.02;
    hsv.y += cos(t * 0.3 + uv.y * 8.0) * 0.02;

    return vec4<f32>(hsv_to_rgb(hsv), 1.0);
"#
    }

    fn shade(&self, uv: Vec2, t: f32, colors: &ColorSet) -> Vec4 {
        let k = fract(t * 0.1 + uv.x * 0.7 + uv.y * 0.3);
        let color = Self::sweep(k, colors);

        let mut hsv = rgb_to_hsv(color);
        hsv.x += (t * 0.2 + uv.x * 10.0).sin() * 0.02;
        hsv.y += (t * 0.3 + uv.y * 8.0).cos() * 0.02;

        hsv_to_rgb(hsv).extend(1.0)
    }
}
