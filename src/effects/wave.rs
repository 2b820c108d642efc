//! Wave-Like Flow: four horizontally phased sine bands blended down the screen.

use glam::{Vec2, Vec4};

use super::ShaderEffect;
use crate::color::ColorSet;
use crate::noise::{mix, unit};
use crate::preset::PresetId;

/// Four sine waves across `x`, each drifting at its own rate, one per
/// neighbouring color pair. `uv.y` picks between the pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveFlow;

impl ShaderEffect for WaveFlow {
    fn preset(&self) -> PresetId {
        PresetId::WaveLikeFlow
    }

    fn wgsl_body(&self) -> &'static str {
        r#"
    let uv = frag_uv;
    let wave1 = sin(uv.x * 10.0 + t) * 0.5 + 0.5;
    let wave2 = sin(uv.x * 15.0 - t * 1.2) * 0.5 + 0.5;
    let wave3 = sin(uv.x * 20.0 + t * 0.8) * 0.5 + 0.5;
    let wave4 = sin(uv.x * 25.0 - t * 1.5) * 0.5 + 0.5;

    let color1 = mix(c1, c2, wave1);
    let color2 = mix(c2, c3, wave2);
    let color3 = mix(c3, c4, wave3);
    let color4 = mix(c4, c5, wave4);

    let k = uv.y;
    let final_color = mix(mix(color1, color2, k), mix(color3, color4, k), k);
    return vec4<f32>(final_color, 1.0);
"#
    }

    fn shade(&self, uv: Vec2, t: f32, colors: &ColorSet) -> Vec4 {
        let [c1, c2, c3, c4, c5] = colors.to_vec3s();

        let wave1 = unit((uv.x * 10.0 + t).sin());
        let wave2 = unit((uv.x * 15.0 - t * 1.2).sin());
        let wave3 = unit((uv.x * 20.0 + t * 0.8).sin());
        let wave4 = unit((uv.x * 25.0 - t * 1.5).sin());

        let color1 = mix(c1, c2, wave1);
        let color2 = mix(c2, c3, wave2);
        let color3 = mix(c3, c4, wave3);
        let color4 = mix(c4, c5, wave4);

        let k = uv.y;
        let final_color = mix(mix(color1, color2, k), mix(color3, color4, k), k);
        final_color.extend(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_bottom_row_ignores_upper_pairs() {
        // uv.y = 0 leaves only the first pair.
        let colors = ColorSet::default();
        let [c1, c2, ..] = colors.to_vec3s();
        let px = WaveFlow.shade(Vec2::new(0.0, 0.0), 0.0, &colors);
        let expected = mix(c1, c2, 0.5);
        assert!((px.truncate() - expected).abs().max_element() < 1e-6);
        assert_eq!(px.w, 1.0);
    }

    #[test]
    fn test_top_row_uses_last_pair() {
        let colors = ColorSet::default();
        let [_, _, _, c4, c5] = colors.to_vec3s();
        let t = 0.7;
        let x = 0.25_f32;
        let px = WaveFlow.shade(Vec2::new(x, 1.0), t, &colors);
        let color4: Vec3 = mix(c4, c5, unit((x * 25.0 - t * 1.5).sin()));
        assert!((px.truncate() - color4).abs().max_element() < 1e-5);
    }
}
