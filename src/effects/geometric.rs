//! Geometric Shapes: four orbiting signed-distance primitives.
//!
//! Every shape orbits the center on its own sin/cos path at radius 0.3 and
//! drives the color pair matching its slot. Where any shape is present the
//! output leans toward the fifth color.

use std::f32::consts::PI;

use glam::{Vec2, Vec4};

use super::ShaderEffect;
use crate::color::ColorSet;
use crate::noise::{mix, smoothstep, unit};
use crate::preset::PresetId;

const SHAPE_SIZE: f32 = 0.1;
const ORBIT: f32 = 0.3;

/// Occupancy of a disc with a 0.02-wide antialiased rim.
fn circle(uv: Vec2, center: Vec2, radius: f32) -> f32 {
    1.0 - smoothstep(radius - 0.01, radius + 0.01, (uv - center).length())
}

fn sd_triangle(uv: Vec2, center: Vec2, size: f32) -> f32 {
    let q = (uv - center).abs() * 2.0;
    (q.x * 0.866025 + q.y * 0.5).max(q.y) - size
}

fn sd_square(uv: Vec2, center: Vec2, size: f32) -> f32 {
    let q = (uv - center).abs();
    q.x.max(q.y) - size
}

fn sd_pentagon(uv: Vec2, center: Vec2, size: f32) -> f32 {
    let q = (uv - center).abs();
    let angle = q.y.atan2(q.x) + 0.2;
    let radius = 0.5 * size / (PI / 5.0).cos();
    let p = Vec2::new(angle.cos(), angle.sin()) * radius;
    (q - p).length() - 0.02
}

/// Turn a signed distance into a hard-ish mask.
fn fill(sd: f32) -> f32 {
    1.0 - smoothstep(0.0, 0.01, sd)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GeometricShapes;

impl GeometricShapes {
    /// Shape centers at effect time `t`: circle, triangle, square, pentagon.
    pub fn centers(t: f32) -> [Vec2; 4] {
        [
            Vec2::new((t * 0.5).sin(), (t * 0.7).cos()) * ORBIT,
            Vec2::new((t * 0.6).cos(), (t * 0.8).sin()) * ORBIT,
            Vec2::new((t * 0.9).sin(), (t * 0.5).cos()) * ORBIT,
            Vec2::new((t * 0.7).cos(), (t * 0.6).sin()) * ORBIT,
        ]
    }
}

impl ShaderEffect for GeometricShapes {
    fn preset(&self) -> PresetId {
        PresetId::GeometricShapes
    }

    fn wgsl_helpers(&self) -> &'static str {
        r#"
fn shape_circle(uv: vec2<f32>, center: vec2<f32>, radius: f32) -> f32 {
    return 1.0 - smoothstep(radius - 0.01, radius + 0.01, length(uv - center));
}

fn sd_triangle(uv: vec2<f32>, center: vec2<f32>, size: f32) -> f32 {
    let q = abs(uv - center) * 2.0;
    return max(q.x * 0.866025 + q.y * 0.5, q.y) - size;
}

fn sd_square(uv: vec2<f32>, center: vec2<f32>, size: f32) -> f32 {
    let q = abs(uv - center);
    return max(q.x, q.y) - size;
}

fn sd_pentagon(uv: vec2<f32>, center: vec2<f32>, size: f32) -> f32 {
    let q = abs(uv - center);
    let angle = atan2(q.y, q.x) + 0.2;
    let radius = 0.5 * size / cos(3.14159265 / 5.0);
    let p = vec2<f32>(radius * cos(angle), radius * sin(angle));
    return length(q - p) - 0.02;
}
"#
    }

    fn wgsl_body(&self) -> &'static str {
        r#"
    let uv = frag_uv - 0.5;

    let circle_shape = shape_circle(uv, vec2<f32>(sin(t * 0.5), cos(t * 0.7)) * 0.3, 0.1);
    let triangle_shape = 1.0 - smoothstep(0.0, 0.01, sd_triangle(uv, vec2<f32>(cos(t * 0.6), sin(t * 0.8)) * 0.3, 0.1));
    let square_shape = 1.0 - smoothstep(0.0, 0.01, sd_square(uv, vec2<f32>(sin(t * 0.9), cos(t * 0.5)) * 0.3, 0.1));
    let pentagon_shape = 1.0 - smoothstep(0.0, 0.01, sd_pentagon(uv, vec2<f32>(cos(t * 0.7), sin(t * 0.6)) * 0.3, 0.1));

    let shape_mix = max(max(circle_shape, triangle_shape), max(square_shape, pentagon_shape));

    let color1 = mix(c1, c2, circle_shape);
    let color2 = mix(c2, c3, triangle_shape);
    let color3 = mix(c3, c4, square_shape);
    let color4 = mix(c4, c5, pentagon_shape);

    var final_color = mix(
        mix(color1, color2, uv.x + 0.5),
        mix(color3, color4, uv.y + 0.5),
        sin(t) * 0.5 + 0.5
    );
    final_color = mix(final_color, c5, pow(shape_mix, 3.0));
    return vec4<f32>(final_color, 1.0);
"#
    }

    fn shade(&self, uv: Vec2, t: f32, colors: &ColorSet) -> Vec4 {
        let [c1, c2, c3, c4, c5] = colors.to_vec3s();
        let uv = uv - 0.5;
        let [circle_at, triangle_at, square_at, pentagon_at] = Self::centers(t);

        let circle_shape = circle(uv, circle_at, SHAPE_SIZE);
        let triangle_shape = fill(sd_triangle(uv, triangle_at, SHAPE_SIZE));
        let square_shape = fill(sd_square(uv, square_at, SHAPE_SIZE));
        let pentagon_shape = fill(sd_pentagon(uv, pentagon_at, SHAPE_SIZE));

        let shape_mix = circle_shape
            .max(triangle_shape)
            .max(square_shape.max(pentagon_shape));

        let color1 = mix(c1, c2, circle_shape);
        let color2 = mix(c2, c3, triangle_shape);
        let color3 = mix(c3, c4, square_shape);
        let color4 = mix(c4, c5, pentagon_shape);

        let final_color = mix(
            mix(color1, color2, uv.x + 0.5),
            mix(color3, color4, uv.y + 0.5),
            unit(t.sin()),
        );
        mix(final_color, c5, shape_mix.powi(3)).extend(1.0)
    }
}
