//! Shimmering Light: three noise-jittered sine shimmers along x, y and the diagonal.

use glam::{Vec2, Vec4};

use super::ShaderEffect;
use crate::color::ColorSet;
use crate::noise::{mix, snoise, unit};
use crate::preset::PresetId;

#[derive(Debug, Clone, Copy, Default)]
pub struct ShimmeringLight;

impl ShaderEffect for ShimmeringLight {
    fn preset(&self) -> PresetId {
        PresetId::ShimmeringLight
    }

    fn wgsl_body(&self) -> &'static str {
        r#"
    let uv = frag_uv;
    let noise1 = snoise(uv * 5.0 + t * 0.2);
    let noise2 = snoise(uv * 7.0 - t * 0.3);
    let noise3 = snoise(uv * 9.0 + t * 0.4);

    let shimmer1 = sin(uv.x * 20.0 + t * 2.0 + noise1 * 5.0) * 0.5 + 0.5;
    let shimmer2 = sin(uv.y * 25.0 - t * 2.5 + noise2 * 5.0) * 0.5 + 0.5;
    let shimmer3 = sin((uv.x + uv.y) * 15.0 + t * 3.0 + noise3 * 5.0) * 0.5 + 0.5;

    let color1 = mix(c1, c2, shimmer1);
    let color2 = mix(c2, c3, shimmer2);
    let color3 = mix(c3, c4, shimmer3);

    var final_color = mix(
        mix(color1, color2, uv.x),
        mix(color2, color3, uv.y),
        sin(t) * 0.5 + 0.5
    );
    final_color = mix(final_color, c5, pow(max(shimmer1, max(shimmer2, shimmer3)), 3.0));
    return vec4<f32>(final_color, 1.0);
"#
    }

    fn shade(&self, uv: Vec2, t: f32, colors: &ColorSet) -> Vec4 {
        let [c1, c2, c3, c4, c5] = colors.to_vec3s();

        let noise1 = snoise(uv * 5.0 + t * 0.2);
        let noise2 = snoise(uv * 7.0 - t * 0.3);
        let noise3 = snoise(uv * 9.0 + t * 0.4);

        let shimmer1 = unit((uv.x * 20.0 + t * 2.0 + noise1 * 5.0).sin());
        let shimmer2 = unit((uv.y * 25.0 - t * 2.5 + noise2 * 5.0).sin());
        let shimmer3 = unit(((uv.x + uv.y) * 15.0 + t * 3.0 + noise3 * 5.0).sin());

        let color1 = mix(c1, c2, shimmer1);
        let color2 = mix(c2, c3, shimmer2);
        let color3 = mix(c3, c4, shimmer3);

        let final_color = mix(
            mix(color1, color2, uv.x),
            mix(color2, color3, uv.y),
            unit(t.sin()),
        );
        let peak = shimmer1.max(shimmer2.max(shimmer3));
        mix(final_color, c5, peak.powi(3)).extend(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn grid(n: u32) -> impl Iterator<Item = Vec2> {
        (0..=n).flat_map(move |j| (0..=n).map(move |i| Vec2::new(i as f32, j as f32) / n as f32))
    }

    #[test]
    fn test_highlight_follows_brightest_shimmer() {
        // Black base colors leave only the highlight, weighted by peak³.
        let black = Color::BLACK;
        let colors = ColorSet::new([black, black, black, black, Color::rgb(1.0, 1.0, 1.0)]);
        let mut brightest = 0.0_f32;
        for uv in grid(64) {
            let px = ShimmeringLight.shade(uv, 0.8, &colors);
            assert!((px.x - px.y).abs() < 1e-6 && (px.y - px.z).abs() < 1e-6);
            assert!((-1e-6..=1.0 + 1e-6).contains(&px.x));
            brightest = brightest.max(px.x);
        }
        assert!(brightest > 0.8, "no shimmer crest reached the highlight: {}", brightest);
    }

    #[test]
    fn test_dark_highlight_only_dims() {
        let base = Color::rgb(0.2, 0.6, 0.4);
        let colors = ColorSet::new([base, base, base, base, Color::BLACK]);
        for uv in grid(16) {
            let px = ShimmeringLight.shade(uv, 5.0, &colors).truncate();
            let scale = px.y / 0.6;
            assert!((0.0..=1.0 + 1e-6).contains(&scale));
            assert!((px - base.to_vec3() * scale).abs().max_element() < 1e-5);
        }
    }
}
