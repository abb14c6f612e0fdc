//! Screen geometry and the resolution-independent metering space.
//!
//! Overlay widgets are authored on a fixed 1000 x 1000 grid. Each axis is
//! scaled to real pixels on its own, so a bar placed at `x = 25` sits 2.5% in
//! from the left edge whatever the window size is.

/// Size of the metering grid on each axis.
pub const METERING_RESOLUTION: f32 = 1000.0;

/// A rectangle in screen coordinates (origin top-left, y down).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle from two opposite corners `(x0, y0)` and `(x1, y1)`.
    #[must_use]
    pub fn from_corners(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrinks the rectangle by separate horizontal and vertical amounts.
    #[must_use]
    pub fn inset(&self, dx: f32, dy: f32) -> Self {
        Self::new(
            self.x + dx,
            self.y + dy,
            self.width - dx * 2.0,
            self.height - dy * 2.0,
        )
    }
}

/// Current output size in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScreenSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ScreenSize {
    /// Creates a new screen size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The whole screen as a rectangle.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    /// Pixels per metering unit along X.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn scale_x(self) -> f32 {
        self.width as f32 / METERING_RESOLUTION
    }

    /// Pixels per metering unit along Y.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn scale_y(self) -> f32 {
        self.height as f32 / METERING_RESOLUTION
    }

    /// Converts a horizontal metered distance to pixels.
    #[must_use]
    pub fn meter_x(self, units: f32) -> f32 {
        units * self.scale_x()
    }

    /// Converts a vertical metered distance to pixels.
    #[must_use]
    pub fn meter_y(self, units: f32) -> f32 {
        units * self.scale_y()
    }
}
