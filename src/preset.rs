//! Preset identifiers.
//!
//! A preset names exactly one effect. Names are the human-readable labels the
//! playground's dropdown shows; [`PresetId::CATALOG`] lists them in menu order.
//!
//! Lookup by name comes in two flavours:
//! - [`PresetId::from_str`] is strict and reports unknown names as an error.
//! - [`PresetSelection::from_name`] is what the host uses: an unknown name
//!   selects nothing and the host renders a blank frame.

use std::fmt;
use std::str::FromStr;

use crate::error::PresetError;

/// One of the playground's named effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetId {
    SmokeEffects,
    ParticleEffects,
    WaveLikeFlow,
    SwirlingVortex,
    GlitterAndSparkle,
    LensFlaresAndGlows,
    WavePulsation,
    GeometricShapes,
    SlowMotionEffects,
    EnergyBurst,
    ShimmeringLight,
    GradientAnimation,
    FluidGradientAnimation,
    FluidJarGradient,
    /// Selectable by name, not listed in the dropdown catalog.
    SoftMovingGradient,
}

/// How a preset is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetKind {
    /// Full-screen quad shaded per pixel.
    Shader,
    /// Fixed-size point cloud.
    Particles,
    /// Known name without an effect body; draws nothing.
    Unimplemented,
}

impl PresetId {
    /// The fourteen presets offered by the dropdown, in menu order.
    pub const CATALOG: [PresetId; 14] = [
        PresetId::SmokeEffects,
        PresetId::ParticleEffects,
        PresetId::WaveLikeFlow,
        PresetId::SwirlingVortex,
        PresetId::GlitterAndSparkle,
        PresetId::LensFlaresAndGlows,
        PresetId::WavePulsation,
        PresetId::GeometricShapes,
        PresetId::SlowMotionEffects,
        PresetId::EnergyBurst,
        PresetId::ShimmeringLight,
        PresetId::GradientAnimation,
        PresetId::FluidGradientAnimation,
        PresetId::FluidJarGradient,
    ];

    /// Every preset, catalog first.
    pub const ALL: [PresetId; 15] = [
        PresetId::SmokeEffects,
        PresetId::ParticleEffects,
        PresetId::WaveLikeFlow,
        PresetId::SwirlingVortex,
        PresetId::GlitterAndSparkle,
        PresetId::LensFlaresAndGlows,
        PresetId::WavePulsation,
        PresetId::GeometricShapes,
        PresetId::SlowMotionEffects,
        PresetId::EnergyBurst,
        PresetId::ShimmeringLight,
        PresetId::GradientAnimation,
        PresetId::FluidGradientAnimation,
        PresetId::FluidJarGradient,
        PresetId::SoftMovingGradient,
    ];

    /// Display name, as shown in the dropdown.
    pub fn name(self) -> &'static str {
        match self {
            PresetId::SmokeEffects => "Smoke Effects",
            PresetId::ParticleEffects => "Particle Effects",
            PresetId::WaveLikeFlow => "Wave-Like Flow",
            PresetId::SwirlingVortex => "Swirling Vortex",
            PresetId::GlitterAndSparkle => "Glitter and Sparkle",
            PresetId::LensFlaresAndGlows => "Lens Flares and Glows",
            PresetId::WavePulsation => "Wave Pulsation",
            PresetId::GeometricShapes => "Geometric Shapes",
            PresetId::SlowMotionEffects => "Slow-Motion Effects",
            PresetId::EnergyBurst => "Energy Burst",
            PresetId::ShimmeringLight => "Shimmering Light",
            PresetId::GradientAnimation => "Gradient Animation",
            PresetId::FluidGradientAnimation => "Fluid Gradient Animation",
            PresetId::FluidJarGradient => "Fluid Jar Gradient",
            PresetId::SoftMovingGradient => "Soft Moving Gradient",
        }
    }

    /// How this preset renders.
    pub fn kind(self) -> PresetKind {
        match self {
            PresetId::ParticleEffects | PresetId::GlitterAndSparkle => PresetKind::Particles,
            PresetId::SmokeEffects | PresetId::FluidJarGradient => PresetKind::Unimplemented,
            _ => PresetKind::Shader,
        }
    }

    /// Next catalog entry, wrapping around.
    ///
    /// Off-catalog presets step to the first catalog entry.
    pub fn next(self) -> PresetId {
        match Self::CATALOG.iter().position(|&p| p == self) {
            Some(i) => Self::CATALOG[(i + 1) % Self::CATALOG.len()],
            None => Self::CATALOG[0],
        }
    }

    /// Previous catalog entry, wrapping around.
    pub fn previous(self) -> PresetId {
        let len = Self::CATALOG.len();
        match Self::CATALOG.iter().position(|&p| p == self) {
            Some(i) => Self::CATALOG[(i + len - 1) % len],
            None => Self::CATALOG[len - 1],
        }
    }
}

impl Default for PresetId {
    fn default() -> Self {
        PresetId::SmokeEffects
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PresetId {
    type Err = PresetError;

    /// Exact display name first, then a case-insensitive match ignoring
    /// spaces, hyphens and underscores (`"wave-like-flow"`, `"EnergyBurst"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(p) = Self::ALL.iter().find(|p| p.name() == s) {
            return Ok(*p);
        }
        let key = normalize(s);
        Self::ALL
            .iter()
            .find(|p| normalize(p.name()) == key)
            .copied()
            .ok_or_else(|| PresetError::Unknown(s.to_string()))
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// What the host should draw: a preset, or nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresetSelection {
    Preset(PresetId),
    /// Unknown selector; the frame is cleared and nothing is drawn.
    #[default]
    None,
}

impl PresetSelection {
    /// Resolve a selector name, mapping unknown names to [`PresetSelection::None`].
    pub fn from_name(name: &str) -> Self {
        match name.parse::<PresetId>() {
            Ok(id) => PresetSelection::Preset(id),
            Err(e) => {
                log::warn!("{}; rendering blank frames", e);
                PresetSelection::None
            }
        }
    }

    /// The selected preset, if any.
    pub fn preset(self) -> Option<PresetId> {
        match self {
            PresetSelection::Preset(id) => Some(id),
            PresetSelection::None => None,
        }
    }
}

impl From<PresetId> for PresetSelection {
    fn from(id: PresetId) -> Self {
        PresetSelection::Preset(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_fourteen_unique_names() {
        let mut names: Vec<_> = PresetId::CATALOG.iter().map(|p| p.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 14);
    }

    #[test]
    fn test_names_round_trip() {
        for id in PresetId::ALL {
            assert_eq!(id.name().parse::<PresetId>(), Ok(id));
        }
    }

    #[test]
    fn test_loose_name_matching() {
        assert_eq!("wave-like-flow".parse(), Ok(PresetId::WaveLikeFlow));
        assert_eq!("EnergyBurst".parse(), Ok(PresetId::EnergyBurst));
        assert_eq!("slow_motion_effects".parse(), Ok(PresetId::SlowMotionEffects));
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            "Disco Inferno".parse::<PresetId>(),
            Err(PresetError::Unknown("Disco Inferno".into()))
        );
        assert_eq!(PresetSelection::from_name("Disco Inferno"), PresetSelection::None);
    }

    #[test]
    fn test_default_is_smoke() {
        assert_eq!(PresetId::default(), PresetId::SmokeEffects);
        assert_eq!(PresetId::default().kind(), PresetKind::Unimplemented);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(PresetId::ParticleEffects.kind(), PresetKind::Particles);
        assert_eq!(PresetId::GlitterAndSparkle.kind(), PresetKind::Particles);
        assert_eq!(PresetId::FluidJarGradient.kind(), PresetKind::Unimplemented);
        let shaders = PresetId::ALL
            .iter()
            .filter(|p| p.kind() == PresetKind::Shader)
            .count();
        assert_eq!(shaders, 11);
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(PresetId::FluidJarGradient.next(), PresetId::SmokeEffects);
        assert_eq!(PresetId::SmokeEffects.previous(), PresetId::FluidJarGradient);
        assert_eq!(PresetId::SoftMovingGradient.next(), PresetId::SmokeEffects);

        let mut p = PresetId::WaveLikeFlow;
        for _ in 0..PresetId::CATALOG.len() {
            p = p.next();
        }
        assert_eq!(p, PresetId::WaveLikeFlow);
    }
}
