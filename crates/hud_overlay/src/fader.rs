//! Full-screen faders.
//!
//! A fader is a screen-sized rectangle drawn above everything else. Once
//! engaged it moves its alpha toward a bound at a fixed speed, which is how
//! level transitions, flashes, sun glare and the death screen are done.
//! Several faders live side by side, one per [`FaderId`].

use crate::error::OverlayError;
use crate::layout::ScreenSize;
use crate::render::{draw_rect, OverlayRenderer};
use crate::style::{BlendMode, Color, CornerColors};

/// The faders that always exist in the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaderId {
    /// Level transition fader.
    Black,
    /// Effect fader (flashes and the like).
    Colored,
    /// Engages when the camera looks at the sun.
    Sun,
    /// Death screen.
    Death,
}

impl FaderId {
    /// Number of faders.
    pub const COUNT: usize = 4;

    /// All faders in index order.
    pub const ALL: [Self; Self::COUNT] = [Self::Black, Self::Colored, Self::Sun, Self::Death];

    /// Index into per-fader arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<i32> for FaderId {
    type Error = OverlayError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(OverlayError::UnknownFader(value))
    }
}

/// Which way a fader moves once engaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FadeDirection {
    /// Alpha rises from zero to the maximum: the screen fades to the fader color.
    #[default]
    In,
    /// Alpha falls from the maximum to zero: the scene fades back in.
    Out,
}

impl TryFrom<i32> for FadeDirection {
    type Error = OverlayError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::In),
            1 => Ok(Self::Out),
            other => Err(OverlayError::UnknownFadeDirection(other)),
        }
    }
}

/// A corner of the fader rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Top-left.
    TopLeft,
    /// Top-right.
    TopRight,
    /// Bottom-left.
    BottomLeft,
    /// Bottom-right.
    BottomRight,
}

impl TryFrom<i32> for Corner {
    type Error = OverlayError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::TopLeft),
            1 => Ok(Self::TopRight),
            2 => Ok(Self::BottomLeft),
            3 => Ok(Self::BottomRight),
            other => Err(OverlayError::UnknownCorner(other)),
        }
    }
}

/// A single full-screen transition effect.
///
/// Invariant: `0 <= alpha <= max_alpha`.
#[derive(Debug, Clone, PartialEq)]
pub struct Fader {
    /// Corner colors; alpha comes from `current_alpha` at draw time.
    colors: CornerColors,
    blend: BlendMode,
    /// Current alpha on the 0-255 scale.
    current_alpha: f32,
    /// Maximum reachable alpha on the 0-255 scale.
    max_alpha: f32,
    /// Alpha units per second.
    speed: f32,
    autoreset: bool,
    active: bool,
    direction: FadeDirection,
}

impl Fader {
    /// Default speed in alpha units per second.
    pub const DEFAULT_SPEED: f32 = 200.0;
    /// Full opacity on the fader alpha scale.
    pub const FULL_ALPHA: u8 = 255;

    /// Creates an idle, black, fully opaque fader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            colors: CornerColors::uniform(Color::BLACK),
            blend: BlendMode::Alpha,
            current_alpha: 0.0,
            max_alpha: f32::from(Self::FULL_ALPHA),
            speed: Self::DEFAULT_SPEED,
            autoreset: false,
            active: false,
            direction: FadeDirection::In,
        }
    }

    /// Resets and starts the fader.
    ///
    /// Engaging again in the direction already running is a no-op until the
    /// bound is reached.
    pub fn engage(&mut self, direction: FadeDirection) {
        if self.active && self.direction == direction && !self.at_bound() {
            return;
        }

        self.direction = direction;
        self.active = true;
        self.current_alpha = match direction {
            FadeDirection::In => 0.0,
            FadeDirection::Out => self.max_alpha,
        };
        tracing::debug!(
            "Fader engaged: direction={:?}, speed={}, max_alpha={}",
            direction,
            self.speed,
            self.max_alpha
        );
    }

    /// Advances the fader by `dt` seconds and draws it.
    ///
    /// Does nothing while the fader is idle.
    pub fn show<R: OverlayRenderer + ?Sized>(
        &mut self,
        dt: f32,
        screen: ScreenSize,
        renderer: &mut R,
    ) {
        if !self.active {
            return;
        }

        let reached = self.advance(dt);

        if self.current_alpha > 0.0 {
            let alpha = self.current_alpha / f32::from(Self::FULL_ALPHA);
            draw_rect(renderer, screen.rect(), self.colors.scale_alpha(alpha), self.blend);
        }

        if reached && self.autoreset {
            self.current_alpha = 0.0;
            self.active = false;
        }
    }

    /// Immediately stops the fader and clears it.
    pub fn cut(&mut self) {
        if self.active {
            tracing::debug!("Fader cut at alpha {}", self.current_alpha);
        }
        self.current_alpha = 0.0;
        self.active = false;
    }

    /// Returns true while the fader is running or holding at its bound.
    #[must_use]
    pub fn is_fading(&self) -> bool {
        self.active
    }

    /// Current alpha on the 0-255 scale.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.current_alpha
    }

    /// Maximum alpha on the 0-255 scale.
    #[must_use]
    pub fn max_alpha(&self) -> f32 {
        self.max_alpha
    }

    /// Direction of the last engage.
    #[must_use]
    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    /// Current corner colors.
    #[must_use]
    pub fn colors(&self) -> CornerColors {
        self.colors
    }

    /// Current blending mode.
    #[must_use]
    pub fn blending_mode(&self) -> BlendMode {
        self.blend
    }

    /// Sets one corner color, or all four when `corner` is `None`.
    pub fn set_color(&mut self, r: u8, g: u8, b: u8, corner: Option<Corner>) {
        let color = Color::from_rgba8(r, g, b, 255);
        match corner {
            None => self.colors = CornerColors::uniform(color),
            Some(Corner::TopLeft) => self.colors.top_left = color,
            Some(Corner::TopRight) => self.colors.top_right = color,
            Some(Corner::BottomLeft) => self.colors.bottom_left = color,
            Some(Corner::BottomRight) => self.colors.bottom_right = color,
        }
    }

    /// Sets the blending mode.
    pub fn set_blending_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    /// Sets the maximum alpha.
    pub fn set_alpha(&mut self, alpha: u8) {
        self.max_alpha = f32::from(alpha);
        self.current_alpha = self.current_alpha.min(self.max_alpha);
    }

    /// Sets the speed in alpha units per second.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Sets whether the fader returns to idle once it reaches its bound.
    pub fn set_autoreset(&mut self, reset: bool) {
        self.autoreset = reset;
    }

    /// Moves alpha toward the bound; returns true once the bound is reached.
    fn advance(&mut self, dt: f32) -> bool {
        let step = self.speed * dt.max(0.0);
        match self.direction {
            FadeDirection::In => {
                self.current_alpha = (self.current_alpha + step).clamp(0.0, self.max_alpha);
            }
            FadeDirection::Out => {
                self.current_alpha = (self.current_alpha - step).clamp(0.0, self.max_alpha);
            }
        }
        self.at_bound()
    }

    fn at_bound(&self) -> bool {
        match self.direction {
            FadeDirection::In => self.current_alpha >= self.max_alpha,
            FadeDirection::Out => self.current_alpha <= 0.0,
        }
    }
}

impl Default for Fader {
    fn default() -> Self {
        Self::new()
    }
}
