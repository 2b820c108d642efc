//! Integration tests for the shader effect catalog.
//!
//! Every quad effect is sampled through its CPU reference, which computes the
//! same pixel as the generated WGSL.

use glam::{Vec2, Vec3, Vec4};
use hueflow::effects::{all_effects, effect_for, ShaderEffect};
use hueflow::{ColorSet, PresetId};

fn primaries() -> ColorSet {
    ColorSet::from_hex(&["#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF"]).unwrap()
}

fn grid(n: usize) -> impl Iterator<Item = Vec2> {
    (0..=n).flat_map(move |j| {
        (0..=n).map(move |i| Vec2::new(i as f32 / n as f32, j as f32 / n as f32))
    })
}

fn catalog_effects() -> impl Iterator<Item = &'static dyn ShaderEffect> {
    all_effects().filter(|e| PresetId::CATALOG.contains(&e.preset()))
}

fn assert_close(actual: Vec4, expected: Vec4) {
    assert!(
        (actual - expected).abs().max_element() < 1e-5,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

// ============================================================================
// Golden values
// ============================================================================

#[test]
fn test_wave_flow_golden_bottom_left() {
    let wave = effect_for(PresetId::WaveLikeFlow).unwrap();
    // All waves sit at sin(0) = 0 -> 0.5; uv.y = 0 keeps only mix(red, green, 0.5).
    let px = wave.sample(Vec2::new(0.0, 0.0), 0.0, &primaries());
    assert_close(px, Vec4::new(0.5, 0.5, 0.0, 1.0));
}

#[test]
fn test_wave_flow_golden_top_right() {
    let wave = effect_for(PresetId::WaveLikeFlow).unwrap();
    // uv.y = 1 keeps only mix(yellow, magenta, wave4), wave4 = sin(25) * 0.5 + 0.5.
    let wave4 = 25.0_f32.sin() * 0.5 + 0.5;
    let px = wave.sample(Vec2::new(1.0, 1.0), 0.0, &primaries());
    assert_close(px, Vec4::new(1.0, 1.0 - wave4, wave4, 1.0));
    assert!((wave4 - 0.433_824).abs() < 1e-5);
}

#[test]
fn test_vortex_time_rotates_the_field() {
    let vortex = effect_for(PresetId::SwirlingVortex).unwrap();
    let colors = primaries();
    // Same radius; a quarter turn of time matches a quarter turn of angle.
    let right = vortex.sample(Vec2::new(0.75, 0.5), std::f32::consts::FRAC_PI_2, &colors);
    let top = vortex.sample(Vec2::new(0.5, 0.75), 0.0, &colors);
    assert_close(right, top);
}

// ============================================================================
// Range properties
// ============================================================================

#[test]
fn test_catalog_effects_stay_in_range() {
    let palettes = [ColorSet::default(), primaries()];
    for effect in catalog_effects() {
        for colors in &palettes {
            for t in [0.0, 0.37, 3.0, 41.5, 600.0] {
                for uv in grid(16) {
                    let px = effect.sample(uv, t, colors);
                    let rgb = px.truncate();
                    assert!(
                        rgb.cmpge(Vec3::splat(-1e-4)).all() && rgb.cmple(Vec3::splat(1.3)).all(),
                        "{} out of range at uv {:?}, t {}: {:?}",
                        effect.name(),
                        uv,
                        t,
                        px
                    );
                    assert!((0.0..=1.0).contains(&px.w), "{} alpha {}", effect.name(), px.w);
                }
            }
        }
    }
}

#[test]
fn test_only_slow_motion_varies_alpha() {
    let colors = ColorSet::default();
    for effect in all_effects() {
        let alphas: Vec<f32> = grid(12).map(|uv| effect.sample(uv, 2.0, &colors).w).collect();
        if effect.preset() == PresetId::SlowMotionEffects {
            let min = alphas.iter().copied().fold(f32::INFINITY, f32::min);
            let max = alphas.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            assert!(max > min, "Slow-Motion alpha should vary across the screen");
        } else {
            assert!(alphas.iter().all(|&a| a == 1.0), "{} alpha", effect.name());
        }
    }
}

#[test]
fn test_soft_gradient_is_finite() {
    let soft = effect_for(PresetId::SoftMovingGradient).unwrap();
    for t in [0.0, 5.0, 120.0] {
        for uv in grid(16) {
            assert!(soft.sample(uv, t, &ColorSet::default()).is_finite());
        }
    }
}

// ============================================================================
// Purity
// ============================================================================

#[test]
fn test_effects_are_deterministic() {
    let colors = primaries();
    for effect in all_effects() {
        for uv in grid(8) {
            let a = effect.sample(uv, 12.25, &colors);
            let b = effect.sample(uv, 12.25, &colors);
            assert_eq!(a.to_array().map(f32::to_bits), b.to_array().map(f32::to_bits));
        }
    }
}

#[test]
fn test_effects_animate() {
    let colors = ColorSet::default();
    for effect in catalog_effects() {
        let changed = grid(8).any(|uv| effect.sample(uv, 0.0, &colors) != effect.sample(uv, 7.0, &colors));
        assert!(changed, "{} is static", effect.name());
    }
}

#[test]
fn test_effects_depend_on_colors() {
    let dark = ColorSet::from_hex(&["#000000"; 5]).unwrap();
    for effect in all_effects() {
        let px = effect.sample(Vec2::new(0.3, 0.6), 1.0, &dark);
        assert!(px.truncate().abs().max_element() < 0.03, "{} with black input: {:?}", effect.name(), px);
    }
}

// ============================================================================
// Catalog coverage
// ============================================================================

#[test]
fn test_speed_factors() {
    let speed = |p| effect_for(p).unwrap().speed();
    assert_eq!(speed(PresetId::SlowMotionEffects), 0.1);
    assert_eq!(speed(PresetId::GradientAnimation), 0.2);
    assert_eq!(speed(PresetId::FluidGradientAnimation), 0.5);
    assert_eq!(speed(PresetId::SoftMovingGradient), 0.05);
    assert_eq!(speed(PresetId::WaveLikeFlow), 1.0);
}
