//! CPU counterparts of the shader helper functions.
//!
//! Each function here matches a WGSL function in [`crate::shader_utils`]
//! term for term, so an effect's CPU reference shading produces the same
//! value the GPU does (within float tolerance). GLSL semantics are kept where
//! they differ from Rust's: [`fract`] floors toward negative infinity and
//! the `mod 289` wrap uses a floored remainder.

use glam::{Vec2, Vec3, Vec4};

/// Hermite interpolation between two edges.
///
/// Reversed edges (`edge0 > edge1`) are allowed and produce the mirrored curve.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear blend `a * (1 - t) + b * t`. `t` is not clamped.
#[inline]
pub fn mix(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}

/// Fractional part, `x - floor(x)`. Always in `[0, 1)`.
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// `0` if `x < edge`, else `1`.
#[inline]
pub fn step(edge: f32, x: f32) -> f32 {
    if x < edge {
        0.0
    } else {
        1.0
    }
}

/// Remap `[-1, 1]` to `[0, 1]`.
#[inline]
pub fn unit(x: f32) -> f32 {
    x * 0.5 + 0.5
}

#[inline]
fn mod289(x: Vec3) -> Vec3 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn mod289_2(x: Vec2) -> Vec2 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn permute(x: Vec3) -> Vec3 {
    mod289((x * 34.0 + 1.0) * x)
}

#[inline]
fn fract3(x: Vec3) -> Vec3 {
    x - x.floor()
}

/// 2D simplex noise, roughly in `[-1, 1]`.
///
/// The classic Ashima Arts formulation: skewed simplex grid, permutation
/// polynomial hashing and a `130` normalisation factor.
pub fn snoise(v: Vec2) -> f32 {
    const C: Vec4 = Vec4::new(
        0.211_324_87,  // (3 - sqrt(3)) / 6
        0.366_025_42,  // (sqrt(3) - 1) / 2
        -0.577_350_26, // -1 + 2 * C.x
        0.024_390_243, // 1 / 41
    );

    // First corner
    let i = (v + v.dot(Vec2::splat(C.y))).floor();
    let x0 = v - i + i.dot(Vec2::splat(C.x));

    // Other corners
    let i1 = if x0.x > x0.y { Vec2::X } else { Vec2::Y };
    let x12 = Vec4::new(x0.x + C.x, x0.y + C.x, x0.x + C.z, x0.y + C.z);
    let x12 = Vec4::new(x12.x - i1.x, x12.y - i1.y, x12.z, x12.w);

    // Permutations
    let i = mod289_2(i);
    let p = permute(
        permute(Vec3::splat(i.y) + Vec3::new(0.0, i1.y, 1.0))
            + Vec3::splat(i.x)
            + Vec3::new(0.0, i1.x, 1.0),
    );

    let mut m = (Vec3::splat(0.5)
        - Vec3::new(
            x0.dot(x0),
            x12.x * x12.x + x12.y * x12.y,
            x12.z * x12.z + x12.w * x12.w,
        ))
    .max(Vec3::ZERO);
    m = m * m;
    m = m * m;

    // Gradients: 41 points uniformly over a line, mapped onto a diamond.
    let x = 2.0 * fract3(p * C.w) - 1.0;
    let h = x.abs() - 0.5;
    let ox = (x + 0.5).floor();
    let a0 = x - ox;

    // Normalise gradients implicitly by scaling m
    m *= Vec3::splat(1.792_842_9) - 0.853_734_7 * (a0 * a0 + h * h);

    let g = Vec3::new(
        a0.x * x0.x + h.x * x0.y,
        a0.y * x12.x + h.y * x12.y,
        a0.z * x12.z + h.z * x12.w,
    );
    130.0 * m.dot(g)
}

/// Per-pixel dither in `[0, 1)` from the classic `sin`-dot hash.
pub fn hash_dither(uv: Vec2) -> f32 {
    fract((uv.dot(Vec2::new(12.9898, 78.233))).sin() * 43_758.547)
}

/// RGB to HSV, branchless. Hue, saturation and value in `[0, 1]`.
pub fn rgb_to_hsv(c: Vec3) -> Vec3 {
    let k = Vec4::new(0.0, -1.0 / 3.0, 2.0 / 3.0, -1.0);
    let p = Vec4::new(c.z, c.y, k.w, k.z).lerp(Vec4::new(c.y, c.z, k.x, k.y), step(c.z, c.y));
    let q = Vec4::new(p.x, p.y, p.w, c.x).lerp(Vec4::new(c.x, p.y, p.z, p.x), step(p.x, c.x));
    let d = q.x - q.w.min(q.y);
    let e = 1.0e-10;
    Vec3::new(
        (q.z + (q.w - q.y) / (6.0 * d + e)).abs(),
        d / (q.x + e),
        q.x,
    )
}

/// HSV to RGB, branchless. Hue wraps.
pub fn hsv_to_rgb(c: Vec3) -> Vec3 {
    let k = Vec4::new(1.0, 2.0 / 3.0, 1.0 / 3.0, 3.0);
    let p = (fract3(Vec3::splat(c.x) + k.truncate()) * 6.0 - Vec3::splat(k.w)).abs();
    c.z * mix(Vec3::splat(k.x), (p - Vec3::splat(k.x)).clamp(Vec3::ZERO, Vec3::ONE), c.y)
}
