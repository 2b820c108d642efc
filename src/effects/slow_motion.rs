//! Slow-Motion Effects: four drifting noise fields at a tenth of real time.
//!
//! The only effect with variable transparency: alpha rises from 0 to 1 as the
//! strongest of the four noise fields goes from 0.4 to 0.9.

use glam::{Vec2, Vec4};

use super::{BlendMode, ShaderEffect};
use crate::color::ColorSet;
use crate::noise::{mix, smoothstep, snoise, unit};
use crate::preset::PresetId;

#[derive(Debug, Clone, Copy, Default)]
pub struct SlowMotion;

impl ShaderEffect for SlowMotion {
    fn preset(&self) -> PresetId {
        PresetId::SlowMotionEffects
    }

    fn speed(&self) -> f32 {
        0.1
    }

    fn blend_mode(&self) -> BlendMode {
        BlendMode::Alpha
    }

    fn subdivisions(&self) -> u32 {
        64
    }

    fn wgsl_body(&self) -> &'static str {
        r#"
    let uv = frag_uv;
    let noise1 = snoise(uv * 4.0 + t * 0.1) * 0.5 + 0.5;
    let noise2 = snoise(uv * 5.0 - t * 0.15) * 0.5 + 0.5;
    let noise3 = snoise(uv * 6.0 + t * 0.2) * 0.5 + 0.5;
    let noise4 = snoise(uv * 7.0 - t * 0.25) * 0.5 + 0.5;

    let color1 = mix(c1, c2, smoothstep(0.0, 0.5, noise1));
    let color2 = mix(c2, c3, smoothstep(0.0, 0.5, noise2));
    let color3 = mix(c3, c4, smoothstep(0.0, 0.5, noise3));
    let color4 = mix(c4, c5, smoothstep(0.0, 0.5, noise4));

    let final_color = mix(
        mix(color1, color2, smoothstep(0.0, 0.5, uv.x)),
        mix(color3, color4, smoothstep(0.5, 1.0, uv.x)),
        smoothstep(0.0, 1.0, uv.y)
    );
    let alpha = smoothstep(0.4, 0.9, max(noise1, max(noise2, max(noise3, noise4))));
    return vec4<f32>(final_color, alpha);
"#
    }

    fn shade(&self, uv: Vec2, t: f32, colors: &ColorSet) -> Vec4 {
        let [c1, c2, c3, c4, c5] = colors.to_vec3s();

        let noise1 = unit(snoise(uv * 4.0 + t * 0.1));
        let noise2 = unit(snoise(uv * 5.0 - t * 0.15));
        let noise3 = unit(snoise(uv * 6.0 + t * 0.2));
        let noise4 = unit(snoise(uv * 7.0 - t * 0.25));

        let color1 = mix(c1, c2, smoothstep(0.0, 0.5, noise1));
        let color2 = mix(c2, c3, smoothstep(0.0, 0.5, noise2));
        let color3 = mix(c3, c4, smoothstep(0.0, 0.5, noise3));
        let color4 = mix(c4, c5, smoothstep(0.0, 0.5, noise4));

        let final_color = mix(
            mix(color1, color2, smoothstep(0.0, 0.5, uv.x)),
            mix(color3, color4, smoothstep(0.5, 1.0, uv.x)),
            smoothstep(0.0, 1.0, uv.y),
        );
        let peak = noise1.max(noise2.max(noise3.max(noise4)));
        final_color.extend(smoothstep(0.4, 0.9, peak))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_varies_across_screen() {
        let colors = ColorSet::default();
        let mut lo = f32::MAX;
        let mut hi = f32::MIN;
        for y in 0..16 {
            for x in 0..16 {
                let uv = Vec2::new(x as f32, y as f32) / 15.0;
                let a = SlowMotion.shade(uv, 3.0, &colors).w;
                assert!((0.0..=1.0).contains(&a));
                lo = lo.min(a);
                hi = hi.max(a);
            }
        }
        assert!(hi > lo, "alpha should not be constant");
    }
}
