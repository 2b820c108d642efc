//! Point-cloud effects.
//!
//! Two presets draw a fixed-size cloud of points instead of a shaded quad.
//! Both lay the cloud out once, uniformly in a cube of side 10 around the
//! origin, and give every point one of the five colors picked uniformly with
//! replacement. Nothing is re-randomized afterwards; per frame the cloud is
//! only moved:
//!
//! - **Particle Effects** (5000 points) rotates rigidly about x and y.
//! - **Glitter and Sparkle** (1000 points) sets each point's height to a
//!   sine of time phase-shifted by its index.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::{ColorSet, COLOR_COUNT};
use crate::preset::PresetId;

/// Points in the Particle Effects cloud.
pub const PARTICLE_COUNT: usize = 5000;

/// Points in the Glitter and Sparkle cloud.
pub const GLITTER_COUNT: usize = 1000;

/// Side length of the spawn cube.
pub const SPREAD: f32 = 10.0;

/// How a cloud moves over time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleMotion {
    /// Whole-cloud rotation, radians per second about each axis.
    Rotate { x_rate: f32, y_rate: f32 },
    /// Per-point vertical oscillation: `y_i = sin(t + i * phase_step) * amplitude`.
    Glitter { amplitude: f32, phase_step: f32 },
}

impl ParticleMotion {
    /// Motion and point count for a particle preset.
    pub fn for_preset(preset: PresetId) -> Option<(ParticleMotion, usize)> {
        match preset {
            PresetId::ParticleEffects => Some((
                ParticleMotion::Rotate {
                    x_rate: 0.1,
                    y_rate: 0.05,
                },
                PARTICLE_COUNT,
            )),
            PresetId::GlitterAndSparkle => Some((
                ParticleMotion::Glitter {
                    amplitude: 0.2,
                    phase_step: 0.1,
                },
                GLITTER_COUNT,
            )),
            _ => None,
        }
    }
}

/// Per-point vertex data as uploaded to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// A fixed-size colored point cloud.
#[derive(Debug, Clone)]
pub struct ParticleCloud {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    motion: ParticleMotion,
    time: f32,
}

impl ParticleCloud {
    /// Lay out `count` points with the given motion.
    pub fn new<R: Rng + ?Sized>(
        count: usize,
        motion: ParticleMotion,
        palette: &ColorSet,
        rng: &mut R,
    ) -> Self {
        let palette = palette.to_vec3s();
        let mut positions = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);

        for _ in 0..count {
            positions.push(Vec3::new(
                (rng.gen::<f32>() - 0.5) * SPREAD,
                (rng.gen::<f32>() - 0.5) * SPREAD,
                (rng.gen::<f32>() - 0.5) * SPREAD,
            ));
            colors.push(palette[rng.gen_range(0..COLOR_COUNT)]);
        }

        Self {
            positions,
            colors,
            motion,
            time: 0.0,
        }
    }

    /// Build the cloud for a particle preset, or `None` for any other preset.
    pub fn for_preset<R: Rng + ?Sized>(
        preset: PresetId,
        palette: &ColorSet,
        rng: &mut R,
    ) -> Option<Self> {
        let (motion, count) = ParticleMotion::for_preset(preset)?;
        Some(Self::new(count, motion, palette, rng))
    }

    /// Same as [`ParticleCloud::for_preset`], seeded from OS entropy.
    pub fn from_entropy(preset: PresetId, palette: &ColorSet) -> Option<Self> {
        let mut rng = StdRng::from_entropy();
        Self::for_preset(preset, palette, &mut rng)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    #[inline]
    pub fn motion(&self) -> ParticleMotion {
        self.motion
    }

    /// Move the cloud to time `t`.
    ///
    /// Returns `true` when point positions changed and must be re-uploaded;
    /// rigid rotation only changes [`ParticleCloud::model_matrix`].
    pub fn update(&mut self, t: f32) -> bool {
        self.time = t;
        match self.motion {
            ParticleMotion::Rotate { .. } => false,
            ParticleMotion::Glitter {
                amplitude,
                phase_step,
            } => {
                for (i, p) in self.positions.iter_mut().enumerate() {
                    p.y = (t + i as f32 * phase_step).sin() * amplitude;
                }
                true
            }
        }
    }

    /// Object-to-world transform at the last updated time.
    pub fn model_matrix(&self) -> Mat4 {
        match self.motion {
            // X then Y, applied to the point in that nesting order.
            ParticleMotion::Rotate { x_rate, y_rate } => {
                Mat4::from_rotation_x(self.time * x_rate) * Mat4::from_rotation_y(self.time * y_rate)
            }
            ParticleMotion::Glitter { .. } => Mat4::IDENTITY,
        }
    }

    /// Interleaved vertex data for upload.
    pub fn vertices(&self) -> Vec<PointVertex> {
        self.positions
            .iter()
            .zip(&self.colors)
            .map(|(p, c)| PointVertex {
                position: p.to_array(),
                color: c.to_array(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_preset_counts() {
        let colors = ColorSet::default();
        let particles =
            ParticleCloud::for_preset(PresetId::ParticleEffects, &colors, &mut seeded()).unwrap();
        let glitter =
            ParticleCloud::for_preset(PresetId::GlitterAndSparkle, &colors, &mut seeded()).unwrap();
        assert_eq!(particles.len(), 5000);
        assert_eq!(particles.colors().len(), 5000);
        assert_eq!(glitter.len(), 1000);
        assert_eq!(glitter.colors().len(), 1000);
    }

    #[test]
    fn test_shader_preset_has_no_cloud() {
        let colors = ColorSet::default();
        assert!(ParticleCloud::for_preset(PresetId::WaveLikeFlow, &colors, &mut seeded()).is_none());
    }

    #[test]
    fn test_layout_inside_cube() {
        let cloud = ParticleCloud::new(
            2000,
            ParticleMotion::Rotate { x_rate: 0.0, y_rate: 0.0 },
            &ColorSet::default(),
            &mut seeded(),
        );
        let half = SPREAD / 2.0;
        assert!(cloud
            .positions()
            .iter()
            .all(|p| p.abs().max_element() <= half));
    }

    #[test]
    fn test_colors_drawn_from_palette() {
        let palette = ColorSet::default();
        let allowed = palette.to_vec3s();
        let cloud =
            ParticleCloud::for_preset(PresetId::ParticleEffects, &palette, &mut seeded()).unwrap();
        assert!(cloud.colors().iter().all(|c| allowed.contains(c)));
        // 5000 draws from 5 colors should hit every one.
        for c in allowed {
            assert!(cloud.colors().contains(&c));
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let colors = ColorSet::default();
        let a = ParticleCloud::for_preset(PresetId::GlitterAndSparkle, &colors, &mut seeded()).unwrap();
        let b = ParticleCloud::for_preset(PresetId::GlitterAndSparkle, &colors, &mut seeded()).unwrap();
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.colors(), b.colors());
    }

    #[test]
    fn test_glitter_update_sets_height_only() {
        let mut cloud =
            ParticleCloud::for_preset(PresetId::GlitterAndSparkle, &ColorSet::default(), &mut seeded())
                .unwrap();
        let before = cloud.positions().to_vec();
        assert!(cloud.update(2.5));
        for (i, (old, new)) in before.iter().zip(cloud.positions()).enumerate() {
            assert_eq!(old.x, new.x);
            assert_eq!(old.z, new.z);
            assert!((new.y - (2.5 + i as f32 * 0.1).sin() * 0.2).abs() < 1e-6);
        }
        assert_eq!(cloud.model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_rotation_is_rigid() {
        let mut cloud =
            ParticleCloud::for_preset(PresetId::ParticleEffects, &ColorSet::default(), &mut seeded())
                .unwrap();
        let before = cloud.positions().to_vec();
        assert!(!cloud.update(10.0));
        assert_eq!(cloud.positions(), &before[..]);

        let expected = Mat4::from_rotation_x(1.0) * Mat4::from_rotation_y(0.5);
        assert!(cloud.model_matrix().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_vertices_interleave() {
        let cloud = ParticleCloud::new(
            3,
            ParticleMotion::Glitter { amplitude: 0.2, phase_step: 0.1 },
            &ColorSet::default(),
            &mut seeded(),
        );
        let verts = cloud.vertices();
        assert_eq!(verts.len(), 3);
        assert_eq!(verts[1].position, cloud.positions()[1].to_array());
        assert_eq!(verts[1].color, cloud.colors()[1].to_array());
        assert_eq!(std::mem::size_of::<PointVertex>(), 24);
    }
}
