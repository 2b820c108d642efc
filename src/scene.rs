//! The render host's device-independent state.
//!
//! [`Scene`] owns the animation clock, the current color set and at most one
//! active effect. The windowed playground drives it once per display refresh
//! and mirrors whatever it holds onto the GPU; tests drive it directly with
//! explicit time steps.
//!
//! # Example
//!
//! ```ignore
//! use hueflow::scene::Scene;
//! use hueflow::{ColorSet, PresetId, PresetSelection};
//!
//! let mut scene = Scene::new(ColorSet::default());
//! scene.set_active(PresetId::EnergyBurst.into(), ColorSet::default());
//!
//! let tick = scene.advance(1.0 / 60.0);
//! assert_eq!(scene.active_preset(), Some(PresetId::EnergyBurst));
//! ```

use glam::Mat4;
use rand::Rng;

use crate::color::ColorSet;
use crate::effects::{effect_for, ShaderEffect};
use crate::particles::ParticleCloud;
use crate::preset::{PresetId, PresetKind, PresetSelection};
use crate::time::Time;

/// The effect currently being rendered.
pub enum EffectInstance {
    /// Full-screen shaded quad.
    Shader(&'static dyn ShaderEffect),
    /// Point cloud with its one-time random layout.
    Particles {
        preset: PresetId,
        cloud: ParticleCloud,
    },
}

impl EffectInstance {
    /// Instantiate the effect for a preset.
    ///
    /// Returns `None` for presets without an effect body.
    pub fn create<R: Rng + ?Sized>(preset: PresetId, colors: &ColorSet, rng: &mut R) -> Option<Self> {
        match preset.kind() {
            PresetKind::Shader => effect_for(preset).map(EffectInstance::Shader),
            PresetKind::Particles => ParticleCloud::for_preset(preset, colors, rng)
                .map(|cloud| EffectInstance::Particles { preset, cloud }),
            PresetKind::Unimplemented => None,
        }
    }

    pub fn preset(&self) -> PresetId {
        match self {
            EffectInstance::Shader(effect) => effect.preset(),
            EffectInstance::Particles { preset, .. } => *preset,
        }
    }

    /// Multiplier from elapsed seconds to effect time.
    pub fn speed(&self) -> f32 {
        match self {
            EffectInstance::Shader(effect) => effect.speed(),
            EffectInstance::Particles { .. } => 1.0,
        }
    }

    /// The particle cloud, for point effects.
    pub fn cloud(&self) -> Option<&ParticleCloud> {
        match self {
            EffectInstance::Particles { cloud, .. } => Some(cloud),
            EffectInstance::Shader(_) => None,
        }
    }
}

impl std::fmt::Debug for EffectInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectInstance::Shader(effect) => f.debug_tuple("Shader").field(&effect.name()).finish(),
            EffectInstance::Particles { preset, cloud } => f
                .debug_struct("Particles")
                .field("preset", preset)
                .field("points", &cloud.len())
                .finish(),
        }
    }
}

/// Result of one clock step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Clock value after the step, in seconds.
    pub elapsed: f32,
    /// Active effect's local time (`elapsed * speed`); equals `elapsed` when nothing is active.
    pub effect_time: f32,
    /// Point positions moved and need re-uploading.
    pub positions_changed: bool,
}

/// Host state: clock, colors and the single active effect.
#[derive(Debug)]
pub struct Scene {
    time: Time,
    colors: ColorSet,
    selection: PresetSelection,
    active: Option<EffectInstance>,
}

impl Scene {
    /// An empty scene with the clock at zero. Nothing is drawn until
    /// [`Scene::set_active`] is called.
    pub fn new(colors: ColorSet) -> Self {
        Self {
            time: Time::new(),
            colors,
            selection: PresetSelection::None,
            active: None,
        }
    }

    /// Replace the rendered effect.
    ///
    /// The previous instance is taken out before the new one is built and is
    /// returned to the caller, which owns releasing anything tied to it. The
    /// clock keeps running across switches.
    pub fn set_active(&mut self, selection: PresetSelection, colors: ColorSet) -> Option<EffectInstance> {
        let mut rng = rand::thread_rng();
        self.set_active_with_rng(selection, colors, &mut rng)
    }

    /// [`Scene::set_active`] with a caller-provided RNG for the particle layout.
    pub fn set_active_with_rng<R: Rng + ?Sized>(
        &mut self,
        selection: PresetSelection,
        colors: ColorSet,
        rng: &mut R,
    ) -> Option<EffectInstance> {
        let previous = self.active.take();
        self.colors = colors;
        self.selection = selection;

        self.active = match selection {
            PresetSelection::Preset(preset) => {
                let instance = EffectInstance::create(preset, &self.colors, rng);
                match &instance {
                    Some(instance) => log::info!("Active effect: {}", instance.preset()),
                    None => log::warn!("{} has no effect body; rendering blank frames", preset),
                }
                instance
            }
            PresetSelection::None => {
                log::info!("No effect selected; rendering blank frames");
                None
            }
        };

        // Bring a fresh particle layout to the current time before its first draw.
        let t = self.effect_time();
        if let Some(EffectInstance::Particles { cloud, .. }) = &mut self.active {
            cloud.update(t);
        }

        previous
    }

    /// Switch preset, keeping the current colors.
    pub fn set_preset(&mut self, selection: PresetSelection) -> Option<EffectInstance> {
        self.set_active(selection, self.colors)
    }

    /// Advance the clock by the wall-clock time since the previous tick.
    pub fn tick(&mut self) -> Tick {
        self.time.update();
        self.step()
    }

    /// Advance the clock by an explicit delta in seconds.
    pub fn advance(&mut self, delta: f32) -> Tick {
        self.time.advance(delta);
        self.step()
    }

    fn step(&mut self) -> Tick {
        let elapsed = self.time.elapsed();
        let effect_time = self.effect_time();
        let positions_changed = match &mut self.active {
            Some(EffectInstance::Particles { cloud, .. }) => cloud.update(effect_time),
            _ => false,
        };
        Tick {
            elapsed,
            effect_time,
            positions_changed,
        }
    }

    /// Restart the clock from zero, as on host re-initialization.
    pub fn reset(&mut self) {
        self.time.reset();
        self.step();
    }

    /// Active effect's local time.
    pub fn effect_time(&self) -> f32 {
        let speed = self.active.as_ref().map_or(1.0, EffectInstance::speed);
        (self.time.elapsed_f64() * speed as f64) as f32
    }

    /// Model matrix for the active point cloud, identity otherwise.
    pub fn model_matrix(&self) -> Mat4 {
        self.active
            .as_ref()
            .and_then(EffectInstance::cloud)
            .map_or(Mat4::IDENTITY, ParticleCloud::model_matrix)
    }

    #[inline]
    pub fn active(&self) -> Option<&EffectInstance> {
        self.active.as_ref()
    }

    #[inline]
    pub fn active_preset(&self) -> Option<PresetId> {
        self.active.as_ref().map(EffectInstance::preset)
    }

    #[inline]
    pub fn selection(&self) -> PresetSelection {
        self.selection
    }

    #[inline]
    pub fn colors(&self) -> &ColorSet {
        &self.colors
    }

    #[inline]
    pub fn time(&self) -> &Time {
        &self.time
    }

    #[inline]
    pub fn time_mut(&mut self) -> &mut Time {
        &mut self.time
    }
}
