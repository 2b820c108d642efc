//! Energy Burst: a noise-warped radial sine under a slow pulse.

use glam::{Vec2, Vec4};

use super::ShaderEffect;
use crate::color::ColorSet;
use crate::noise::{mix, smoothstep, snoise, unit};
use crate::preset::PresetId;

#[derive(Debug, Clone, Copy, Default)]
pub struct EnergyBurst;

impl EnergyBurst {
    /// Scalar field driving every blend, in `[0, 1]`.
    pub fn intensity(uv: Vec2, t: f32) -> f32 {
        let uv = uv - 0.5;
        let dist = uv.length();
        // Raw noise, not remapped: it only warps the phase.
        let noise = snoise(uv * 3.0 + t * 0.5);
        let burst = unit((dist * 20.0 - t * 3.0 + noise * 5.0).sin());
        let pulse = unit((t * 2.0).sin()) * 0.5 + 0.5;
        burst * pulse
    }
}

impl ShaderEffect for EnergyBurst {
    fn preset(&self) -> PresetId {
        PresetId::EnergyBurst
    }

    fn wgsl_body(&self) -> &'static str {
        r#"
    let uv = frag_uv - 0.5;
    let dist = length(uv);

    let noise = snoise(uv * 3.0 + t * 0.5);
    let burst = sin(dist * 20.0 - t * 3.0 + noise * 5.0) * 0.5 + 0.5;
    let pulse = (sin(t * 2.0) * 0.5 + 0.5) * 0.5 + 0.5;
    let intensity = burst * pulse;

    let color1 = mix(c1, c2, smoothstep(0.0, 0.33, intensity));
    let color2 = mix(c2, c3, smoothstep(0.33, 0.66, intensity));
    let color3 = mix(c3, c4, smoothstep(0.66, 1.0, intensity));

    var final_color = mix(
        mix(color1, color2, smoothstep(0.0, 0.5, intensity)),
        mix(color2, color3, smoothstep(0.5, 1.0, intensity)),
        smoothstep(0.25, 0.75, intensity)
    );
    final_color = mix(final_color, c5, pow(intensity, 3.0));
    return vec4<f32>(final_color, 1.0);
"#
    }

    fn shade(&self, uv: Vec2, t: f32, colors: &ColorSet) -> Vec4 {
        let [c1, c2, c3, c4, c5] = colors.to_vec3s();
        let intensity = Self::intensity(uv, t);

        let color1 = mix(c1, c2, smoothstep(0.0, 0.33, intensity));
        let color2 = mix(c2, c3, smoothstep(0.33, 0.66, intensity));
        let color3 = mix(c3, c4, smoothstep(0.66, 1.0, intensity));

        let final_color = mix(
            mix(color1, color2, smoothstep(0.0, 0.5, intensity)),
            mix(color2, color3, smoothstep(0.5, 1.0, intensity)),
            smoothstep(0.25, 0.75, intensity),
        );
        mix(final_color, c5, intensity.powi(3)).extend(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_bounded() {
        for i in 0..400 {
            let uv = Vec2::new((i % 20) as f32 / 19.0, (i / 20) as f32 / 19.0);
            let v = EnergyBurst::intensity(uv, i as f32 * 0.05);
            assert!((0.0..=1.0).contains(&v), "{v}");
        }
    }

    #[test]
    fn test_trough_leans_primary() {
        let colors = ColorSet::default();
        let t = 0.0;
        let (uv, low) = (0..100 * 100)
            .map(|i| Vec2::new((i % 100) as f32 / 99.0, (i / 100) as f32 / 99.0))
            .map(|uv| (uv, EnergyBurst::intensity(uv, t)))
            .fold((Vec2::ZERO, f32::MAX), |best, cur| if cur.1 < best.1 { cur } else { best });
        assert!(low < 0.05, "{low}");

        let px = EnergyBurst.shade(uv, t, &colors);
        assert!((px.truncate() - colors.primary()).abs().max_element() < 0.1);
    }
}
