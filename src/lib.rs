//! # Hueflow
//!
//! GPU color-animation playground: five colors in, a continuously animated
//! full-screen visual out.
//!
//! Hueflow owns the window, the GPU and the frame clock. You pick a
//! [`ColorSet`] and a [`PresetId`]; every refresh it advances the clock and
//! draws the matching effect with one draw call.
//!
//! ## Quick Start
//!
//! ```ignore
//! use hueflow::prelude::*;
//!
//! fn main() -> Result<(), PlaygroundError> {
//!     Playground::new()
//!         .with_hex_colors(&["#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF"])
//!         .with_preset(PresetId::SwirlingVortex)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Colors
//!
//! A [`ColorSet`] is always exactly five colors. They are referenced by
//! position and play distinct roles in every effect: primary, secondary,
//! tertiary, accent and highlight. Building a set from any other count fails
//! with [`ColorError::WrongCount`].
//!
//! ### Effects
//!
//! Shader effects implement [`effects::ShaderEffect`]: a WGSL body compiled
//! into a full-screen quad pipeline, plus a CPU `shade` function computing
//! the same pixel. The CPU side is what the tests sample:
//!
//! ```ignore
//! use hueflow::effects::{effect_for, ShaderEffect};
//!
//! let wave = effect_for(PresetId::WaveLikeFlow).unwrap();
//! let rgba = wave.sample(Vec2::new(0.5, 0.5), 1.0, &ColorSet::default());
//! ```
//!
//! Particle Effects and Glitter and Sparkle draw a [`particles::ParticleCloud`]
//! instead. Smoke Effects and Fluid Jar Gradient have no effect body and
//! render blank frames.
//!
//! ### Time
//!
//! Each effect animates from `elapsed * speed`, where `elapsed` is the wall
//! clock accumulated by [`Time`]. Animation is time-based, so a slow frame
//! advances further instead of slowing the effect down.

pub mod color;
pub mod effects;
pub mod error;
pub mod gpu;
pub mod noise;
pub mod particles;
pub mod playground;
pub mod preset;
pub mod scene;
pub mod shader_utils;
pub mod time;

pub use color::{Color, ColorSet, COLOR_COUNT, DEFAULT_PALETTE};
pub use error::{ColorError, GpuError, PlaygroundError, PresetError, ShaderError};
pub use glam::{Vec2, Vec3, Vec4};
pub use playground::{Playground, PlaygroundConfig};
pub use preset::{PresetId, PresetKind, PresetSelection};
pub use scene::{EffectInstance, Scene, Tick};
pub use time::Time;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::color::{Color, ColorSet};
    pub use crate::effects::{BlendMode, ShaderEffect};
    pub use crate::error::{ColorError, PlaygroundError};
    pub use crate::playground::Playground;
    pub use crate::preset::{PresetId, PresetSelection};
    pub use crate::scene::Scene;
    pub use crate::time::Time;
    pub use crate::{Vec2, Vec3, Vec4};
}
