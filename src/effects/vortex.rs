//! Swirling Vortex: nested sinusoids in polar coordinates.

use glam::{Vec2, Vec4};

use super::ShaderEffect;
use crate::color::ColorSet;
use crate::noise::{mix, unit};
use crate::preset::PresetId;

/// Four spiral arms families in `(r, θ)`. The angle offset grows with time,
/// so the whole pattern rotates about the center.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwirlingVortex;

impl ShaderEffect for SwirlingVortex {
    fn preset(&self) -> PresetId {
        PresetId::SwirlingVortex
    }

    fn wgsl_body(&self) -> &'static str {
        r#"
    let uv = frag_uv - 0.5;
    let r = length(uv);
    let angle = atan2(uv.y, uv.x) + t;

    let vortex1 = sin(r * 10.0 - angle * 5.0) * 0.5 + 0.5;
    let vortex2 = sin(r * 15.0 - angle * 7.0) * 0.5 + 0.5;
    let vortex3 = sin(r * 20.0 - angle * 9.0) * 0.5 + 0.5;
    let vortex4 = sin(r * 25.0 - angle * 11.0) * 0.5 + 0.5;

    let color1 = mix(c1, c2, vortex1);
    let color2 = mix(c2, c3, vortex2);
    let color3 = mix(c3, c4, vortex3);
    let color4 = mix(c4, c5, vortex4);

    let final_color = mix(mix(color1, color2, 0.5), mix(color3, color4, 0.5), 0.5);
    return vec4<f32>(final_color, 1.0);
"#
    }

    fn shade(&self, uv: Vec2, t: f32, colors: &ColorSet) -> Vec4 {
        let [c1, c2, c3, c4, c5] = colors.to_vec3s();

        let uv = uv - 0.5;
        let r = uv.length();
        let angle = uv.y.atan2(uv.x) + t;

        let vortex1 = unit((r * 10.0 - angle * 5.0).sin());
        let vortex2 = unit((r * 15.0 - angle * 7.0).sin());
        let vortex3 = unit((r * 20.0 - angle * 9.0).sin());
        let vortex4 = unit((r * 25.0 - angle * 11.0).sin());

        let color1 = mix(c1, c2, vortex1);
        let color2 = mix(c2, c3, vortex2);
        let color3 = mix(c3, c4, vortex3);
        let color4 = mix(c4, c5, vortex4);

        mix(mix(color1, color2, 0.5), mix(color3, color4, 0.5), 0.5).extend(1.0)
    }
}
