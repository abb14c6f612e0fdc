//! Colors, corner gradients and blending modes.
//!
//! Every overlay primitive is a rectangle with four corner colors; a flat
//! fill is just the case where all four corners agree.

use serde::{Deserialize, Serialize};

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Solid red.
    pub const RED: Self = Self::rgba(1.0, 0.0, 0.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from 8-bit channels.
    #[must_use]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Creates a color from an `[r, g, b, a]` byte array.
    #[must_use]
    pub fn from_array8(c: [u8; 4]) -> Self {
        Self::from_rgba8(c[0], c[1], c[2], c[3])
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Returns the color with its alpha multiplied by `factor`.
    #[must_use]
    pub fn scale_alpha(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor)
    }

    /// Linearly interpolates between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// The four corner colors of a gradient rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerColors {
    /// Top-left corner.
    pub top_left: Color,
    /// Top-right corner.
    pub top_right: Color,
    /// Bottom-left corner.
    pub bottom_left: Color,
    /// Bottom-right corner.
    pub bottom_right: Color,
}

impl CornerColors {
    /// Same color on every corner.
    #[must_use]
    pub const fn uniform(color: Color) -> Self {
        Self {
            top_left: color,
            top_right: color,
            bottom_left: color,
            bottom_right: color,
        }
    }

    /// Left-to-right gradient.
    #[must_use]
    pub const fn horizontal(left: Color, right: Color) -> Self {
        Self {
            top_left: left,
            top_right: right,
            bottom_left: left,
            bottom_right: right,
        }
    }

    /// Top-to-bottom gradient.
    #[must_use]
    pub const fn vertical(top: Color, bottom: Color) -> Self {
        Self {
            top_left: top,
            top_right: top,
            bottom_left: bottom,
            bottom_right: bottom,
        }
    }

    /// Multiplies every corner's alpha by `factor`.
    #[must_use]
    pub fn scale_alpha(self, factor: f32) -> Self {
        Self {
            top_left: self.top_left.scale_alpha(factor),
            top_right: self.top_right.scale_alpha(factor),
            bottom_left: self.bottom_left.scale_alpha(factor),
            bottom_right: self.bottom_right.scale_alpha(factor),
        }
    }

    /// Corners in vertex order: top-left, top-right, bottom-right, bottom-left.
    #[must_use]
    pub const fn to_quad(self) -> [Color; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }
}

/// Compositing rule applied when a primitive is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Source replaces destination; alpha is ignored.
    Opaque,
    /// Standard `src_alpha, one_minus_src_alpha` blending.
    #[default]
    Alpha,
    /// Source added on top of destination (`src_alpha, one`).
    Additive,
    /// Destination darkened by source color.
    Multiply,
    /// Destination shaded by the inverse source color.
    SimpleShade,
    /// Inverse-multiply lightening.
    Screen,
    /// Primitive is not drawn at all.
    Hide,
}

impl BlendMode {
    /// Returns true if primitives with this mode produce no output.
    #[must_use]
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hide)
    }
}
