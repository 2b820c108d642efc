//! Built-in WGSL utility functions for effect shaders.
//!
//! These functions are prepended to every generated effect shader, so any
//! effect body can call them. Each one has a CPU twin in [`crate::noise`].
//!
//! # Available Functions
//!
//! ## Noise
//! - `snoise(v: vec2<f32>) -> f32` - 2D simplex noise, roughly in [-1, 1]
//!
//! ## Random & Hash
//! - `hash_dither(uv: vec2<f32>) -> f32` - Per-pixel dither in [0, 1)
//!
//! ## Color
//! - `rgb_to_hsv(c: vec3<f32>) -> vec3<f32>` - Convert RGB to HSV
//! - `hsv_to_rgb(c: vec3<f32>) -> vec3<f32>` - Convert HSV to RGB (hue wraps)
//!
//! # Example
//!
//! ```ignore
//! fn wgsl_body(&self) -> &'static str {
//!     r#"
//!     let n = snoise(uv * 3.0 + t * 0.5);
//!     return vec4<f32>(mix(c1, c2, n * 0.5 + 0.5), 1.0);
//!     "#
//! }
//! ```

/// WGSL code for 2D simplex noise.
pub const NOISE_WGSL: &str = r#"
// Simplex noise helpers
fn mod289_2(x: vec2<f32>) -> vec2<f32> {
    return x - floor(x * (1.0 / 289.0)) * 289.0;
}

fn mod289_3(x: vec3<f32>) -> vec3<f32> {
    return x - floor(x * (1.0 / 289.0)) * 289.0;
}

fn permute3(x: vec3<f32>) -> vec3<f32> {
    return mod289_3(((x * 34.0) + 1.0) * x);
}

// 2D Simplex noise
fn snoise(v: vec2<f32>) -> f32 {
    let C = vec4<f32>(0.211324865405187, 0.366025403784439, -0.577350269189626, 0.024390243902439);

    // First corner
    var i = floor(v + dot(v, C.yy));
    let x0 = v - i + dot(i, C.xx);

    // Other corners
    var i1 = vec2<f32>(0.0, 1.0);
    if x0.x > x0.y {
        i1 = vec2<f32>(1.0, 0.0);
    }
    var x12 = x0.xyxy + C.xxzz;
    x12 = vec4<f32>(x12.xy - i1, x12.zw);

    // Permutations
    i = mod289_2(i);
    let p = permute3(permute3(i.y + vec3<f32>(0.0, i1.y, 1.0)) + i.x + vec3<f32>(0.0, i1.x, 1.0));

    var m = max(0.5 - vec3<f32>(dot(x0, x0), dot(x12.xy, x12.xy), dot(x12.zw, x12.zw)), vec3<f32>(0.0));
    m = m * m;
    m = m * m;

    // Gradients
    let x = 2.0 * fract(p * C.www) - 1.0;
    let h = abs(x) - 0.5;
    let ox = floor(x + 0.5);
    let a0 = x - ox;

    m *= 1.79284291400159 - 0.85373472095314 * (a0 * a0 + h * h);

    let g = vec3<f32>(a0.x * x0.x + h.x * x0.y, a0.yz * x12.xz + h.yz * x12.yw);
    return 130.0 * dot(m, g);
}
"#;

/// WGSL code for hash functions.
pub const HASH_WGSL: &str = r#"
// Per-pixel dither
fn hash_dither(uv: vec2<f32>) -> f32 {
    return fract(sin(dot(uv, vec2<f32>(12.9898, 78.233))) * 43758.5453);
}
"#;

/// WGSL code for color conversion functions.
pub const COLOR_WGSL: &str = r#"
// RGB to HSV conversion
fn rgb_to_hsv(c: vec3<f32>) -> vec3<f32> {
    let k = vec4<f32>(0.0, -1.0 / 3.0, 2.0 / 3.0, -1.0);
    let p = mix(vec4<f32>(c.bg, k.wz), vec4<f32>(c.gb, k.xy), step(c.b, c.g));
    let q = mix(vec4<f32>(p.xyw, c.r), vec4<f32>(c.r, p.yzx), step(p.x, c.r));
    let d = q.x - min(q.w, q.y);
    let e = 1.0e-10;
    return vec3<f32>(abs(q.z + (q.w - q.y) / (6.0 * d + e)), d / (q.x + e), q.x);
}

// HSV to RGB conversion
fn hsv_to_rgb(c: vec3<f32>) -> vec3<f32> {
    let k = vec4<f32>(1.0, 2.0 / 3.0, 1.0 / 3.0, 3.0);
    let p = abs(fract(c.xxx + k.xyz) * 6.0 - k.www);
    return c.z * mix(k.xxx, clamp(p - k.xxx, vec3<f32>(0.0), vec3<f32>(1.0)), c.y);
}
"#;

/// Get all built-in utility functions combined.
pub fn all_utils_wgsl() -> String {
    format!(
        "// Built-in utility functions\n{}\n{}\n{}\n",
        NOISE_WGSL, HASH_WGSL, COLOR_WGSL
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::validate::validate_wgsl;

    #[test]
    fn test_utils_are_valid_wgsl() {
        if let Err(e) = validate_wgsl("Utilities", &all_utils_wgsl()) {
            panic!("{}", e);
        }
    }

    #[test]
    fn test_utils_define_every_function() {
        let utils = all_utils_wgsl();
        for name in ["fn snoise(", "fn hash_dither(", "fn rgb_to_hsv(", "fn hsv_to_rgb("] {
            assert!(utils.contains(name), "missing {}", name);
        }
    }
}
