//! Wave Pulsation: radial waves under independently phased pulse envelopes.

use glam::{Vec2, Vec4};

use super::ShaderEffect;
use crate::color::ColorSet;
use crate::noise::{mix, unit};
use crate::preset::PresetId;

/// Envelope in `[0.5, 1]`.
fn pulse(phase: f32) -> f32 {
    unit(phase.sin()) * 0.5 + 0.5
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WavePulsation;

impl ShaderEffect for WavePulsation {
    fn preset(&self) -> PresetId {
        PresetId::WavePulsation
    }

    fn wgsl_body(&self) -> &'static str {
        r#"
    let uv = frag_uv - 0.5;
    let dist = length(uv);

    let wave1 = sin(dist * 20.0 - t * 2.0) * 0.5 + 0.5;
    let wave2 = sin(dist * 15.0 - t * 1.5) * 0.5 + 0.5;
    let wave3 = sin(dist * 10.0 - t * 1.0) * 0.5 + 0.5;

    let pulse1 = (sin(t * 3.0) * 0.5 + 0.5) * 0.5 + 0.5;
    let pulse2 = (sin(t * 2.5 + 1.0) * 0.5 + 0.5) * 0.5 + 0.5;
    let pulse3 = (sin(t * 2.0 + 2.0) * 0.5 + 0.5) * 0.5 + 0.5;

    let intensity1 = wave1 * pulse1;
    let intensity2 = wave2 * pulse2;
    let intensity3 = wave3 * pulse3;

    let color1 = mix(c1, c2, intensity1);
    let color2 = mix(c2, c3, intensity2);
    let color3 = mix(c3, c4, intensity3);

    var final_color = mix(
        mix(color1, color2, uv.x + 0.5),
        mix(color2, color3, uv.y + 0.5),
        sin(t) * 0.5 + 0.5
    );
    final_color = mix(final_color, c5, pow(max(intensity1, max(intensity2, intensity3)), 3.0));
    return vec4<f32>(final_color, 1.0);
"#
    }

    fn shade(&self, uv: Vec2, t: f32, colors: &ColorSet) -> Vec4 {
        let [c1, c2, c3, c4, c5] = colors.to_vec3s();
        let uv = uv - 0.5;
        let dist = uv.length();

        let wave1 = unit((dist * 20.0 - t * 2.0).sin());
        let wave2 = unit((dist * 15.0 - t * 1.5).sin());
        let wave3 = unit((dist * 10.0 - t * 1.0).sin());

        let intensity1 = wave1 * pulse(t * 3.0);
        let intensity2 = wave2 * pulse(t * 2.5 + 1.0);
        let intensity3 = wave3 * pulse(t * 2.0 + 2.0);

        let color1 = mix(c1, c2, intensity1);
        let color2 = mix(c2, c3, intensity2);
        let color3 = mix(c3, c4, intensity3);

        let final_color = mix(
            mix(color1, color2, uv.x + 0.5),
            mix(color2, color3, uv.y + 0.5),
            unit(t.sin()),
        );
        let peak = intensity1.max(intensity2.max(intensity3));
        mix(final_color, c5, peak.powi(3)).extend(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_pulse_envelope_range() {
        assert!((pulse(FRAC_PI_2) - 1.0).abs() < 1e-6);
        assert!((pulse(-FRAC_PI_2) - 0.5).abs() < 1e-6);
        assert!((pulse(0.0) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_waves_are_radial() {
        // With one base color only the radial intensity peak shows through.
        let base = Color::rgb(0.1, 0.3, 0.9);
        let colors = ColorSet::new([base, base, base, base, Color::rgb(1.0, 1.0, 0.0)]);
        for t in [0.0, 1.3, 9.0] {
            let right = WavePulsation.shade(Vec2::new(0.8, 0.5), t, &colors);
            let top = WavePulsation.shade(Vec2::new(0.5, 0.8), t, &colors);
            let left = WavePulsation.shade(Vec2::new(0.2, 0.5), t, &colors);
            assert!((right - top).abs().max_element() < 1e-4, "t {}", t);
            assert!((right - left).abs().max_element() < 1e-4, "t {}", t);
        }
    }

    #[test]
    fn test_highlight_weight_bounded_by_pulse() {
        // Intensity never exceeds its envelope, so the highlight weight stays below 1.
        let black = Color::BLACK;
        let colors = ColorSet::new([black, black, black, black, Color::rgb(1.0, 1.0, 1.0)]);
        let envelope = pulse(0.0).max(pulse(1.0)).max(pulse(2.0));
        for i in 0..=20 {
            let uv = Vec2::new(i as f32 / 20.0, 0.35);
            let px = WavePulsation.shade(uv, 0.0, &colors);
            assert!(px.x <= envelope.powi(3) + 1e-5, "uv {:?}: {}", uv, px.x);
        }
    }
}
