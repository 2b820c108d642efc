//! Color inputs for the playground.
//!
//! Every effect is parameterized by exactly five colors, referenced
//! positionally (primary, secondary, tertiary, accent, highlight). Colors
//! arrive as `#RRGGBB` strings from whatever UI drives the host and are
//! decoded once into sRGB-encoded `[0, 1]` channels. No linearization
//! happens anywhere: effects mix these values directly and the GPU host
//! stores the result unconverted.
//!
//! # Example
//!
//! ```ignore
//! use hueflow::color::ColorSet;
//!
//! let colors = ColorSet::from_hex(&["#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF"])?;
//! assert_eq!(colors.primary().x, 1.0);
//! ```

use std::fmt;
use std::str::FromStr;

use glam::{Vec3, Vec4};

use crate::error::ColorError;

/// Number of colors every effect expects.
pub const COLOR_COUNT: usize = 5;

/// Palette used before the user has made a selection.
pub const DEFAULT_PALETTE: [&str; COLOR_COUNT] =
    ["#FF00FF", "#800080", "#0000FF", "#00FFFF", "#FF69B4"];

/// A single RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub Vec3);

impl Color {
    /// Black.
    pub const BLACK: Color = Color(Vec3::ZERO);

    /// Create a color from float channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self(Vec3::new(r, g, b))
    }

    /// Decode a `#RRGGBB` or `#RGB` hex string. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || ColorError::InvalidHex(hex.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let (r, g, b) = match digits.len() {
            6 => (
                u8::from_str_radix(&digits[0..2], 16).map_err(|_| invalid())?,
                u8::from_str_radix(&digits[2..4], 16).map_err(|_| invalid())?,
                u8::from_str_radix(&digits[4..6], 16).map_err(|_| invalid())?,
            ),
            3 => {
                let expand = |s: &str| u8::from_str_radix(s, 16).map(|v| v * 17);
                (
                    expand(&digits[0..1]).map_err(|_| invalid())?,
                    expand(&digits[1..2]).map_err(|_| invalid())?,
                    expand(&digits[2..3]).map_err(|_| invalid())?,
                )
            }
            _ => return Err(invalid()),
        };

        Ok(Self::from_rgb8(r, g, b))
    }

    /// Create a color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self(Vec3::new(r as f32, g as f32, b as f32) / 255.0)
    }

    /// Channels as a vector.
    #[inline]
    pub fn to_vec3(self) -> Vec3 {
        self.0
    }

    /// Format back to `#RRGGBB`, clamping out-of-range channels.
    pub fn to_hex(self) -> String {
        let c = (self.0.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
        format!("#{:02X}{:02X}{:02X}", c.x as u8, c.y as u8, c.z as u8)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl From<Vec3> for Color {
    fn from(v: Vec3) -> Self {
        Color(v)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Exactly five colors in significant order.
///
/// The length invariant is enforced at construction: anything other than five
/// entries is rejected with [`ColorError::WrongCount`], so effects can index
/// all five slots without bounds concerns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorSet {
    colors: [Color; COLOR_COUNT],
}

impl ColorSet {
    /// Build from an array of five colors.
    pub const fn new(colors: [Color; COLOR_COUNT]) -> Self {
        Self { colors }
    }

    /// Build from a slice, rejecting any length other than five.
    pub fn from_slice(colors: &[Color]) -> Result<Self, ColorError> {
        let colors: [Color; COLOR_COUNT] =
            colors.try_into().map_err(|_| ColorError::WrongCount {
                expected: COLOR_COUNT,
                found: colors.len(),
            })?;
        Ok(Self { colors })
    }

    /// Decode five hex strings.
    ///
    /// The count is checked before any string is decoded, so a short list is
    /// always reported as [`ColorError::WrongCount`].
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self, ColorError> {
        if hex.len() != COLOR_COUNT {
            return Err(ColorError::WrongCount {
                expected: COLOR_COUNT,
                found: hex.len(),
            });
        }
        let decoded = hex
            .iter()
            .map(|s| Color::from_hex(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_slice(&decoded)
    }

    /// Color at a position (0-based).
    #[inline]
    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// All five colors.
    #[inline]
    pub fn as_array(&self) -> &[Color; COLOR_COUNT] {
        &self.colors
    }

    /// The five colors as vectors, in order.
    #[inline]
    pub fn to_vec3s(&self) -> [Vec3; COLOR_COUNT] {
        self.colors.map(Color::to_vec3)
    }

    /// The five colors padded to `vec4` for uniform upload.
    pub fn to_uniform_array(&self) -> [[f32; 4]; COLOR_COUNT] {
        self.colors.map(|c| Vec4::from((c.0, 1.0)).to_array())
    }

    #[inline]
    pub fn primary(&self) -> Vec3 {
        self.colors[0].0
    }

    #[inline]
    pub fn secondary(&self) -> Vec3 {
        self.colors[1].0
    }

    #[inline]
    pub fn tertiary(&self) -> Vec3 {
        self.colors[2].0
    }

    #[inline]
    pub fn accent(&self) -> Vec3 {
        self.colors[3].0
    }

    #[inline]
    pub fn highlight(&self) -> Vec3 {
        self.colors[4].0
    }
}

impl Default for ColorSet {
    fn default() -> Self {
        // Constants below are valid hex, decoding cannot fail.
        Self::new(DEFAULT_PALETTE.map(|hex| Color::from_hex(hex).unwrap_or(Color::BLACK)))
    }
}

impl TryFrom<&[Color]> for ColorSet {
    type Error = ColorError;

    fn try_from(colors: &[Color]) -> Result<Self, Self::Error> {
        ColorSet::from_slice(colors)
    }
}

impl TryFrom<Vec<String>> for ColorSet {
    type Error = ColorError;

    fn try_from(hex: Vec<String>) -> Result<Self, Self::Error> {
        ColorSet::from_hex(&hex)
    }
}
