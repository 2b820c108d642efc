//! Fluid Gradient Animation.
//!
//! Coordinates are first pushed around by a low-frequency noise field, then
//! three more noise fields pick and blend colors. A fine noise shimmer scales
//! the result by at most 5%.

use glam::{Vec2, Vec3, Vec4};

use super::ShaderEffect;
use crate::color::ColorSet;
use crate::noise::{mix, smoothstep, snoise, unit};
use crate::preset::PresetId;

#[derive(Debug, Clone, Copy, Default)]
pub struct FluidGradient;

impl FluidGradient {
    fn fluid_color(uv: Vec2, t: f32, colors: &ColorSet) -> Vec3 {
        let [c1, c2, c3, c4, c5] = colors.to_vec3s();

        let noise1 = unit(snoise(uv * 3.0 + t * 0.1));
        let noise2 = unit(snoise(uv * 2.0 - t * 0.15));
        let noise3 = unit(snoise(uv * 4.0 + t * 0.2));

        let color1 = mix(c1, c2, smoothstep(0.0, 0.33, noise1));
        let color2 = mix(c2, c3, smoothstep(0.33, 0.66, noise2));
        let color3 = mix(c3, c4, smoothstep(0.66, 1.0, noise3));

        let final_color = mix(mix(color1, color2, noise1), mix(color2, color3, noise2), noise3);
        mix(final_color, c5, noise1 * noise2 * noise3 * 0.2)
    }
}

impl ShaderEffect for FluidGradient {
    fn preset(&self) -> PresetId {
        PresetId::FluidGradientAnimation
    }

    fn speed(&self) -> f32 {
        0.5
    }

    fn wgsl_helpers(&self) -> &'static str {
        r#"
fn fluid_color(uv: vec2<f32>, t: f32, c1: vec3<f32>, c2: vec3<f32>, c3: vec3<f32>, c4: vec3<f32>, c5: vec3<f32>) -> vec3<f32> {
    let noise1 = snoise(uv * 3.0 + t * 0.1) * 0.5 + 0.5;
    let noise2 = snoise(uv * 2.0 - t * 0.15) * 0.5 + 0.5;
    let noise3 = snoise(uv * 4.0 + t * 0.2) * 0.5 + 0.5;

    let color1 = mix(c1, c2, smoothstep(0.0, 0.33, noise1));
    let color2 = mix(c2, c3, smoothstep(0.33, 0.66, noise2));
    let color3 = mix(c3, c4, smoothstep(0.66, 1.0, noise3));

    let final_color = mix(mix(color1, color2, noise1), mix(color2, color3, noise2), noise3);
    return mix(final_color, c5, noise1 * noise2 * noise3 * 0.2);
}
"#
    }

    fn wgsl_body(&self) -> &'static str {
        r#"
    let distortion = snoise(frag_uv * 2.0 + t * 0.1) * 0.1;
    let uv = frag_uv + distortion;

    var color = fluid_color(uv, t, c1, c2, c3, c4, c5);
    color *= snoise(uv * 10.0 + t) * 0.05 + 0.95;
    return vec4<f32>(color, 1.0);
"#
    }

    fn shade(&self, uv: Vec2, t: f32, colors: &ColorSet) -> Vec4 {
        let distortion = snoise(uv * 2.0 + t * 0.1) * 0.1;
        let uv = uv + distortion;

        let mut color = Self::fluid_color(uv, t, colors);
        color *= snoise(uv * 10.0 + t) * 0.05 + 0.95;
        color.extend(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn grid() -> impl Iterator<Item = Vec2> {
        (0..=12).flat_map(|j| (0..=12).map(move |i| Vec2::new(i as f32, j as f32) / 12.0))
    }

    #[test]
    fn test_fine_noise_scales_by_at_most_five_percent() {
        let gray = Color::rgb(0.5, 0.5, 0.5);
        let colors = ColorSet::new([gray; 5]);
        for t in [0.0, 2.5, 40.0] {
            for uv in grid() {
                let ratio = FluidGradient.shade(uv, t, &colors).x / 0.5;
                assert!((0.899..=1.001).contains(&ratio), "uv {:?} t {}: {}", uv, t, ratio);
            }
        }
    }

    #[test]
    fn test_highlight_weight_capped_at_a_fifth() {
        let black = Color::BLACK;
        let colors = ColorSet::new([black, black, black, black, Color::rgb(1.0, 1.0, 1.0)]);
        for uv in grid() {
            let c = FluidGradient::fluid_color(uv, 3.0, &colors);
            assert!(c.max_element() <= 0.2 + 1e-6, "uv {:?}: {:?}", uv, c);
            assert!(c.min_element() >= 0.0);
        }
    }

    #[test]
    fn test_distortion_moves_the_lookup() {
        // Without the coordinate push, shade would equal fluid_color times the shimmer at uv.
        let colors = ColorSet::default();
        let moved = grid().any(|uv| {
            let plain = FluidGradient::fluid_color(uv, 1.0, &colors) * (snoise(uv * 10.0 + 1.0) * 0.05 + 0.95);
            (FluidGradient.shade(uv, 1.0, &colors).truncate() - plain).abs().max_element() > 1e-3
        });
        assert!(moved);
    }
}
