//! Resolution-independent status bars.
//!
//! A bar is authored in metering units (see [`crate::layout`]) and converts
//! itself to pixels whenever the screen size it last saw changes. Every frame
//! the owner calls [`ProgressBar::show`] with the value to display; the bar
//! clamps it, runs its blink and auto-show timers, and draws:
//!
//! ```text
//! ┌──────────────────────────────┐  border (frame, border colors)
//! │██████████████▓▓▓▓░░░░░░░░░░░░│  fill (main → fade) over background
//! └──────────────────────────────┘
//! ```

use crate::error::OverlayError;
use crate::layout::{Rect, ScreenSize};
use crate::render::{draw_rect, OverlayRenderer};
use crate::style::{BlendMode, Color, CornerColors};

/// The bars that always exist in the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarId {
    /// Player health.
    Health,
    /// Air left under water (alternate state: poison gas).
    Air,
    /// Sprint stamina.
    Sprint,
    /// Cold exposure in freezing water.
    Freeze,
    /// Level loading progress.
    Loading,
}

impl BarId {
    /// Number of bars.
    pub const COUNT: usize = 5;

    /// All bars in index order.
    pub const ALL: [Self; Self::COUNT] =
        [Self::Health, Self::Air, Self::Sprint, Self::Freeze, Self::Loading];

    /// Index into per-bar arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<i32> for BarId {
    type Error = OverlayError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(OverlayError::UnknownBar(value))
    }
}

/// Named color slots of a bar. Each part has a main and a fade color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarColorSlot {
    /// Fill color at the empty end.
    BaseMain,
    /// Fill color at the full end.
    BaseFade,
    /// Alternate fill color at the empty end.
    AltMain,
    /// Alternate fill color at the full end.
    AltFade,
    /// Background, first gradient stop.
    BackMain,
    /// Background, second gradient stop.
    BackFade,
    /// Border, first gradient stop.
    BorderMain,
    /// Border, second gradient stop.
    BorderFade,
}

impl BarColorSlot {
    /// Number of color slots.
    pub const COUNT: usize = 8;

    /// All slots in index order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::BaseMain,
        Self::BaseFade,
        Self::AltMain,
        Self::AltFade,
        Self::BackMain,
        Self::BackFade,
        Self::BorderMain,
        Self::BorderFade,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<i32> for BarColorSlot {
    type Error = OverlayError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(OverlayError::UnknownBarColorSlot(value))
    }
}

/// What a call to [`ProgressBar::show`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BarFrame {
    /// The bar was drawn this frame.
    pub drawn: bool,
    /// `clamp(value, 0, max) / max`, or 0 when `max` is 0.
    pub fill_ratio: f32,
    /// Fill length in pixels along the bar's axis.
    pub fill_length: f32,
    /// The fill was drawn (false during the "off" blink phase).
    pub fill_visible: bool,
    /// Value is at or under the warning threshold.
    pub blinking: bool,
    /// Alpha multiplier applied to every part (below 1 while fading out).
    pub opacity: f32,
}

/// A single status bar widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    /// Is it drawn at all.
    pub visible: bool,
    /// Use the alternate fill colors.
    pub alternate: bool,
    /// Fill from the far end instead of the near end.
    pub invert: bool,
    /// Lay the bar out vertically.
    pub vertical: bool,

    // Real geometry, pixels.
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    border_width: f32,
    border_height: f32,

    // Absolute geometry, metering units.
    abs_x: f32,
    abs_y: f32,
    abs_width: f32,
    abs_height: f32,
    abs_border_size: f32,

    colors: [Color; BarColorSlot::COUNT],

    base_blend: BlendMode,
    back_blend: BlendMode,
    border_blend: BlendMode,

    extrude: bool,
    extrude_highlight: Color,
    extrude_shadow: Color,

    max_value: f32,
    warn_value: f32,
    last_value: f32,

    blink: bool,
    /// Seconds per blink phase.
    blink_interval: f32,
    blink_cnt: f32,

    autoshow: bool,
    /// Seconds the bar stays up after a change.
    autoshow_delay: f32,
    autoshow_cnt: f32,
    autoshow_fade: bool,
    /// Seconds the fade-out takes.
    autoshow_fade_delay: f32,
    /// Remaining fade fraction, 1 → 0. Zero when not fading.
    autoshow_fade_cnt: f32,

    /// Interior length along the bar's axis, pixels.
    base_size: f32,

    last_screen: Option<ScreenSize>,
    last_vertical: bool,
}

impl ProgressBar {
    /// Creates a hidden horizontal bar with neutral colors.
    #[must_use]
    pub fn new() -> Self {
        let mut colors = [Color::TRANSPARENT; BarColorSlot::COUNT];
        colors[BarColorSlot::BaseMain.index()] = Color::from_rgba8(255, 50, 50, 200);
        colors[BarColorSlot::BaseFade.index()] = Color::from_rgba8(100, 255, 50, 200);
        colors[BarColorSlot::AltMain.index()] = Color::from_rgba8(255, 180, 0, 255);
        colors[BarColorSlot::AltFade.index()] = Color::from_rgba8(255, 255, 0, 255);
        colors[BarColorSlot::BackMain.index()] = Color::from_rgba8(0, 0, 0, 160);
        colors[BarColorSlot::BackFade.index()] = Color::from_rgba8(60, 60, 60, 130);
        colors[BarColorSlot::BorderMain.index()] = Color::from_rgba8(200, 200, 200, 50);
        colors[BarColorSlot::BorderFade.index()] = Color::from_rgba8(80, 80, 80, 100);

        Self {
            visible: false,
            alternate: false,
            invert: false,
            vertical: false,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            border_width: 0.0,
            border_height: 0.0,
            abs_x: 25.0,
            abs_y: 25.0,
            abs_width: 180.0,
            abs_height: 15.0,
            abs_border_size: 3.0,
            colors,
            base_blend: BlendMode::Alpha,
            back_blend: BlendMode::Alpha,
            border_blend: BlendMode::Alpha,
            extrude: false,
            extrude_highlight: Color::TRANSPARENT,
            extrude_shadow: Color::TRANSPARENT,
            max_value: 100.0,
            warn_value: 0.0,
            last_value: 0.0,
            blink: false,
            blink_interval: 0.3,
            blink_cnt: 0.3,
            autoshow: false,
            autoshow_delay: 0.0,
            autoshow_cnt: 0.0,
            autoshow_fade: false,
            autoshow_fade_delay: 0.0,
            autoshow_fade_cnt: 0.0,
            base_size: 0.0,
            last_screen: None,
            last_vertical: false,
        }
    }

    /// Updates timers for one frame of `dt` seconds and draws the bar with
    /// `value`.
    pub fn show<R: OverlayRenderer + ?Sized>(
        &mut self,
        value: f32,
        dt: f32,
        screen: ScreenSize,
        renderer: &mut R,
    ) -> BarFrame {
        self.update_resolution(screen);

        let value = self.clamp_value(value);
        let fill_ratio = self.fill_ratio(value);
        let hidden = BarFrame {
            fill_ratio,
            ..BarFrame::default()
        };

        if self.autoshow && (value - self.last_value).abs() > f32::EPSILON {
            self.last_value = value;
            self.visible = true;
            self.autoshow_cnt = self.autoshow_delay;
            self.autoshow_fade_cnt = 0.0;
        }

        if !self.visible {
            return hidden;
        }

        let Some(opacity) = self.step_autoshow(dt) else {
            return hidden;
        };

        let blinking = value <= self.warn_value;
        let fill_visible = self.step_blink(blinking, dt);

        let fill_length = fill_ratio * self.base_size;
        let outer = Rect::new(self.x, self.y, self.width, self.height);
        let inner = outer.inset(self.border_width, self.border_height);

        self.draw_background(renderer, inner, opacity);

        let fill = (fill_visible && fill_length > 0.0).then(|| {
            let fill = self.fill_rect(inner, fill_length);
            self.draw_fill(renderer, fill, fill_ratio, opacity);
            fill
        });

        self.draw_border(renderer, outer, opacity);

        if let Some(fill) = fill.filter(|_| self.extrude) {
            self.draw_extrude(renderer, fill, opacity);
        }

        BarFrame {
            drawn: true,
            fill_ratio,
            fill_length,
            fill_visible,
            blinking,
            opacity,
        }
    }

    /// Stores the geometry in metering units; pixels follow on the next show.
    pub fn set_dimensions(&mut self, x: f32, y: f32, width: f32, height: f32, border_size: f32) {
        self.abs_x = x;
        self.abs_y = y;
        self.abs_width = width;
        self.abs_height = height;
        self.abs_border_size = border_size;
        self.last_screen = None;
    }

    /// Sets one color slot.
    pub fn set_color(&mut self, slot: BarColorSlot, r: u8, g: u8, b: u8, alpha: u8) {
        self.colors[slot.index()] = Color::from_rgba8(r, g, b, alpha);
    }

    /// Sets the blending modes of the fill, background and border.
    pub fn set_blending_modes(&mut self, base: BlendMode, back: BlendMode, border: BlendMode) {
        self.base_blend = base;
        self.back_blend = back;
        self.border_blend = border;
    }

    /// Sets the maximum value and the warning threshold.
    pub fn set_values(&mut self, max_value: f32, warn_value: f32) {
        self.max_value = max_value;
        self.warn_value = warn_value;
    }

    /// Sets the length of one blink phase in milliseconds. Zero disables
    /// blinking.
    pub fn set_blink(&mut self, interval_ms: u32) {
        self.blink_interval = millis(interval_ms);
        self.blink_cnt = self.blink_interval;
    }

    /// Enables the pseudo-3D rim; `depth` is the rim's opacity.
    pub fn set_extrude(&mut self, enabled: bool, depth: u8) {
        self.extrude = enabled;
        self.extrude_highlight = Color::from_rgba8(255, 255, 255, depth);
        self.extrude_shadow = Color::from_rgba8(0, 0, 0, depth);
    }

    /// Configures show-on-change: the bar stays up for `delay_ms` after the
    /// value last changed, then hides, fading over `fade_delay_ms` if `fade`.
    pub fn set_autoshow(&mut self, enabled: bool, delay_ms: u32, fade: bool, fade_delay_ms: u32) {
        self.autoshow = enabled;
        self.autoshow_delay = millis(delay_ms);
        self.autoshow_fade = fade;
        self.autoshow_fade_delay = millis(fade_delay_ms);
        self.autoshow_cnt = 0.0;
        self.autoshow_fade_cnt = 0.0;
    }

    /// Color currently stored in `slot`.
    #[must_use]
    pub fn color(&self, slot: BarColorSlot) -> Color {
        self.colors[slot.index()]
    }

    /// Maximum value.
    #[must_use]
    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    /// Warning threshold.
    #[must_use]
    pub fn warn_value(&self) -> f32 {
        self.warn_value
    }

    /// True if the last shown value was at or under the warning threshold.
    #[must_use]
    pub fn is_blinking(&self) -> bool {
        self.blink
    }

    /// Real outer rectangle in pixels, as of the last layout.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Real border thickness `(horizontal, vertical)` in pixels.
    #[must_use]
    pub fn border_size(&self) -> (f32, f32) {
        (self.border_width, self.border_height)
    }

    /// Recomputes pixel geometry if the screen or orientation changed.
    /// Returns true if anything was recomputed.
    fn update_resolution(&mut self, screen: ScreenSize) -> bool {
        if self.last_screen == Some(screen) && self.last_vertical == self.vertical {
            return false;
        }

        tracing::debug!(
            "Bar layout: {:?} -> {}x{}",
            self.last_screen.map(|s| (s.width, s.height)),
            screen.width,
            screen.height
        );
        self.last_screen = Some(screen);
        self.last_vertical = self.vertical;
        self.recalculate_size(screen);
        self.recalculate_position(screen);
        true
    }

    fn recalculate_size(&mut self, screen: ScreenSize) {
        self.width = screen.meter_x(self.abs_width);
        self.height = screen.meter_y(self.abs_height);
        self.border_width = screen.meter_x(self.abs_border_size);
        self.border_height = screen.meter_y(self.abs_border_size);

        self.base_size = if self.vertical {
            self.height - self.border_height * 2.0
        } else {
            self.width - self.border_width * 2.0
        }
        .max(0.0);
    }

    fn recalculate_position(&mut self, screen: ScreenSize) {
        self.x = screen.meter_x(self.abs_x);
        self.y = screen.meter_y(self.abs_y);
    }

    /// `value / max_value`, or 0 when the bar has no range.
    fn fill_ratio(&self, value: f32) -> f32 {
        if self.max_value > 0.0 {
            value / self.max_value
        } else {
            0.0
        }
    }

    fn clamp_value(&self, value: f32) -> f32 {
        if value.is_nan() {
            return 0.0;
        }
        value.clamp(0.0, self.max_value.max(0.0))
    }

    /// Runs the auto-show countdown and fade. Returns the opacity to draw
    /// with, or `None` once the bar has hidden itself.
    fn step_autoshow(&mut self, dt: f32) -> Option<f32> {
        if !self.autoshow {
            return Some(1.0);
        }

        if self.autoshow_cnt > 0.0 {
            self.autoshow_cnt -= dt;
            if self.autoshow_cnt <= 0.0 {
                self.autoshow_cnt = 0.0;
                if self.autoshow_fade {
                    tracing::trace!("Bar auto-show expired, fading out");
                    self.autoshow_fade_cnt = 1.0;
                } else {
                    tracing::trace!("Bar auto-show expired, hiding");
                    self.visible = false;
                    return None;
                }
            }
        }

        if self.autoshow_fade_cnt > 0.0 {
            if self.autoshow_fade_delay > 0.0 {
                self.autoshow_fade_cnt -= dt / self.autoshow_fade_delay;
            } else {
                self.autoshow_fade_cnt = 0.0;
            }
            if self.autoshow_fade_cnt <= 0.0 {
                tracing::trace!("Bar fade-out finished");
                self.autoshow_fade_cnt = 0.0;
                self.visible = false;
                return None;
            }
            return Some(self.autoshow_fade_cnt);
        }

        Some(1.0)
    }

    /// Advances the blink counter. Returns whether the fill is lit.
    fn step_blink(&mut self, blinking: bool, dt: f32) -> bool {
        self.blink = blinking;
        if !blinking {
            self.blink_cnt = self.blink_interval;
            return true;
        }
        if self.blink_interval <= 0.0 {
            return true;
        }

        let period = self.blink_interval * 2.0;
        self.blink_cnt -= dt;
        if self.blink_cnt <= 0.0 {
            self.blink_cnt += period * ((-self.blink_cnt / period).floor() + 1.0);
        }
        self.blink_cnt <= self.blink_interval
    }

    fn fill_rect(&self, inner: Rect, length: f32) -> Rect {
        match (self.vertical, self.invert) {
            (false, false) => Rect::new(inner.x, inner.y, length, inner.height),
            (false, true) => Rect::new(inner.right() - length, inner.y, length, inner.height),
            (true, false) => Rect::new(inner.x, inner.bottom() - length, inner.width, length),
            (true, true) => Rect::new(inner.x, inner.y, inner.width, length),
        }
    }

    fn draw_background<R: OverlayRenderer + ?Sized>(&self, renderer: &mut R, inner: Rect, opacity: f32) {
        let main = self.color(BarColorSlot::BackMain);
        let fade = self.color(BarColorSlot::BackFade);
        let colors = self.cross_gradient(main, fade, inner, inner);
        draw_rect(renderer, inner, colors.scale_alpha(opacity), self.back_blend);
    }

    fn draw_fill<R: OverlayRenderer + ?Sized>(
        &self,
        renderer: &mut R,
        fill: Rect,
        ratio: f32,
        opacity: f32,
    ) {
        let (main, fade) = if self.alternate {
            (self.color(BarColorSlot::AltMain), self.color(BarColorSlot::AltFade))
        } else {
            (self.color(BarColorSlot::BaseMain), self.color(BarColorSlot::BaseFade))
        };
        let end = main.lerp(fade, ratio);

        let colors = match (self.vertical, self.invert) {
            (false, false) => CornerColors::horizontal(main, end),
            (false, true) => CornerColors::horizontal(end, main),
            (true, false) => CornerColors::vertical(end, main),
            (true, true) => CornerColors::vertical(main, end),
        };
        draw_rect(renderer, fill, colors.scale_alpha(opacity), self.base_blend);
    }

    fn draw_border<R: OverlayRenderer + ?Sized>(&self, renderer: &mut R, outer: Rect, opacity: f32) {
        let (bw, bh) = (self.border_width, self.border_height);
        if bw <= 0.0 && bh <= 0.0 {
            return;
        }

        let main = self.color(BarColorSlot::BorderMain);
        let fade = self.color(BarColorSlot::BorderFade);
        let strips = [
            Rect::new(outer.x, outer.y, outer.width, bh),
            Rect::new(outer.x, outer.bottom() - bh, outer.width, bh),
            Rect::new(outer.x, outer.y + bh, bw, outer.height - bh * 2.0),
            Rect::new(outer.right() - bw, outer.y + bh, bw, outer.height - bh * 2.0),
        ];
        for strip in strips {
            let colors = self.cross_gradient(main, fade, strip, outer);
            draw_rect(renderer, strip, colors.scale_alpha(opacity), self.border_blend);
        }
    }

    /// Lit upper (or left) half, shaded lower (or right) half.
    fn draw_extrude<R: OverlayRenderer + ?Sized>(&self, renderer: &mut R, fill: Rect, opacity: f32) {
        let highlight = self.extrude_highlight.scale_alpha(opacity);
        let shadow = self.extrude_shadow.scale_alpha(opacity);
        let clear = Color::TRANSPARENT;

        let (near, far, near_colors, far_colors) = if self.vertical {
            let half = fill.width * 0.5;
            (
                Rect::new(fill.x, fill.y, half, fill.height),
                Rect::new(fill.x + half, fill.y, half, fill.height),
                CornerColors::horizontal(highlight, clear),
                CornerColors::horizontal(clear, shadow),
            )
        } else {
            let half = fill.height * 0.5;
            (
                Rect::new(fill.x, fill.y, fill.width, half),
                Rect::new(fill.x, fill.y + half, fill.width, half),
                CornerColors::vertical(highlight, clear),
                CornerColors::vertical(clear, shadow),
            )
        };
        draw_rect(renderer, near, near_colors, self.base_blend);
        draw_rect(renderer, far, far_colors, self.base_blend);
    }

    /// Gradient from `main` to `fade` across the bar's thickness, sampled at
    /// the edges of `part` within `span`.
    fn cross_gradient(&self, main: Color, fade: Color, part: Rect, span: Rect) -> CornerColors {
        if self.vertical {
            let t0 = fraction(part.x - span.x, span.width);
            let t1 = fraction(part.right() - span.x, span.width);
            CornerColors::horizontal(main.lerp(fade, t0), main.lerp(fade, t1))
        } else {
            let t0 = fraction(part.y - span.y, span.height);
            let t1 = fraction(part.bottom() - span.y, span.height);
            CornerColors::vertical(main.lerp(fade, t0), main.lerp(fade, t1))
        }
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::cast_precision_loss)]
fn millis(ms: u32) -> f32 {
    ms as f32 / 1000.0
}

fn fraction(offset: f32, length: f32) -> f32 {
    if length > 0.0 {
        (offset / length).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::CommandRecorder;

    const SCREEN: ScreenSize = ScreenSize::new(1000, 1000);

    fn visible_bar() -> ProgressBar {
        let mut bar = ProgressBar::new();
        bar.visible = true;
        bar.set_dimensions(100.0, 100.0, 206.0, 26.0, 3.0);
        bar
    }

    #[test]
    fn test_values_are_clamped() {
        let mut bar = visible_bar();
        let mut recorder = CommandRecorder::new();

        let frame = bar.show(-5.0, 0.016, SCREEN, &mut recorder);
        assert!(frame.fill_ratio.abs() < f32::EPSILON);

        let frame = bar.show(150.0, 0.016, SCREEN, &mut recorder);
        assert!((frame.fill_ratio - 1.0).abs() < f32::EPSILON);
        assert!((frame.fill_length - 200.0).abs() < 0.001);

        let frame = bar.show(f32::NAN, 0.016, SCREEN, &mut recorder);
        assert!(frame.fill_ratio.abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_max_value() {
        let mut bar = visible_bar();
        let mut recorder = CommandRecorder::new();
        bar.set_values(0.0, -1.0);

        let frame = bar.show(50.0, 0.016, SCREEN, &mut recorder);
        assert!(frame.drawn);
        assert!(frame.fill_ratio.abs() < f32::EPSILON);
        assert!(frame.fill_length.abs() < f32::EPSILON);
        // Background and four border strips, no fill.
        assert_eq!(recorder.rects().count(), 5);
    }

    #[test]
    fn test_resolution_independence() {
        let mut bar = visible_bar();
        let mut recorder = CommandRecorder::new();

        let small = ScreenSize::new(800, 600);
        let _ = bar.show(50.0, 0.016, small, &mut recorder);
        let a = bar.bounds();

        let large = ScreenSize::new(1920, 1080);
        let _ = bar.show(50.0, 0.016, large, &mut recorder);
        let b = bar.bounds();

        assert!((a.x / 800.0 - b.x / 1920.0).abs() < 1e-5);
        assert!((a.y / 600.0 - b.y / 1080.0).abs() < 1e-5);
        assert!((a.width / 800.0 - b.width / 1920.0).abs() < 1e-5);
        assert!((a.height / 600.0 - b.height / 1080.0).abs() < 1e-5);

        let (bw, bh) = bar.border_size();
        assert!((bw - 3.0 * 1.92).abs() < 1e-3);
        assert!((bh - 3.0 * 1.08).abs() < 1e-3);
    }

    #[test]
    fn test_layout_only_recomputed_on_change() {
        let mut bar = visible_bar();
        assert!(bar.update_resolution(SCREEN));
        assert!(!bar.update_resolution(SCREEN));
        assert!(bar.update_resolution(ScreenSize::new(640, 480)));

        bar.set_dimensions(50.0, 50.0, 100.0, 10.0, 2.0);
        assert!(bar.update_resolution(ScreenSize::new(640, 480)));

        bar.vertical = true;
        assert!(bar.update_resolution(ScreenSize::new(640, 480)));
    }

    #[test]
    fn test_warning_blink_state() {
        let mut bar = visible_bar();
        let mut recorder = CommandRecorder::new();
        bar.set_values(100.0, 20.0);

        let frame = bar.show(15.0, 0.016, SCREEN, &mut recorder);
        assert!(frame.blinking);
        assert!(bar.is_blinking());

        let frame = bar.show(50.0, 0.016, SCREEN, &mut recorder);
        assert!(!frame.blinking);
        assert!((frame.fill_ratio - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_blink_period() {
        let mut bar = visible_bar();
        let mut recorder = CommandRecorder::new();
        bar.set_values(100.0, 20.0);
        bar.set_blink(500);

        let lit: Vec<bool> = (0..12)
            .map(|_| bar.show(10.0, 0.25, SCREEN, &mut recorder).fill_visible)
            .collect();

        // Half a second lit, half a second dark.
        for i in 0..8 {
            assert_eq!(lit[i], lit[i + 4]);
        }
        assert_eq!(lit[0..4].iter().filter(|l| **l).count(), 2);
    }

    #[test]
    fn test_dark_blink_phase_keeps_frame() {
        let mut bar = visible_bar();
        let mut recorder = CommandRecorder::new();
        bar.set_values(100.0, 20.0);
        bar.set_blink(500);

        let _ = bar.show(10.0, 0.25, SCREEN, &mut recorder);
        recorder.begin_frame();
        let frame = bar.show(10.0, 0.25, SCREEN, &mut recorder);
        assert!(!frame.fill_visible);
        assert_eq!(recorder.rects().count(), 5);
    }

    #[test]
    fn test_autoshow_hides_after_delay() {
        let mut bar = visible_bar();
        bar.visible = false;
        bar.set_autoshow(true, 2000, false, 0);
        let mut recorder = CommandRecorder::new();

        assert!(bar.show(40.0, 0.5, SCREEN, &mut recorder).drawn);
        assert!(bar.visible);
        for _ in 0..2 {
            assert!(bar.show(40.0, 0.5, SCREEN, &mut recorder).drawn);
        }
        assert!(!bar.show(40.0, 0.5, SCREEN, &mut recorder).drawn);
        assert!(!bar.visible);

        // A new value brings it straight back.
        assert!(bar.show(41.0, 0.5, SCREEN, &mut recorder).drawn);
        assert!(bar.visible);
    }

    #[test]
    fn test_autoshow_change_resets_countdown() {
        let mut bar = visible_bar();
        bar.set_autoshow(true, 1000, false, 0);
        let mut recorder = CommandRecorder::new();

        for step in 0..10u8 {
            let frame = bar.show(f32::from(step), 0.6, SCREEN, &mut recorder);
            assert!(frame.drawn);
        }
    }

    #[test]
    fn test_autoshow_fade() {
        let mut bar = visible_bar();
        bar.set_autoshow(true, 1000, true, 1000);
        let mut recorder = CommandRecorder::new();

        let frame = bar.show(70.0, 0.5, SCREEN, &mut recorder);
        assert!((frame.opacity - 1.0).abs() < f32::EPSILON);

        let frame = bar.show(70.0, 0.5, SCREEN, &mut recorder);
        assert!(frame.drawn);
        assert!((frame.opacity - 0.5).abs() < 1e-4);

        let frame = bar.show(70.0, 0.25, SCREEN, &mut recorder);
        assert!((frame.opacity - 0.25).abs() < 1e-4);

        let frame = bar.show(70.0, 0.25, SCREEN, &mut recorder);
        assert!(!frame.drawn);
        assert!(!bar.visible);
    }

    #[test]
    fn test_hidden_bar_draws_nothing() {
        let mut bar = ProgressBar::new();
        let mut recorder = CommandRecorder::new();
        let frame = bar.show(50.0, 0.016, SCREEN, &mut recorder);
        assert!(!frame.drawn);
        assert!((frame.fill_ratio - 0.5).abs() < f32::EPSILON);
        assert!(recorder.commands().is_empty());
    }

    #[test]
    fn test_fill_orientation() {
        let mut recorder = CommandRecorder::new();

        let mut bar = visible_bar();
        bar.invert = true;
        let _ = bar.show(25.0, 0.016, SCREEN, &mut recorder);
        let (fill, _, _) = recorder.rects().nth(1).unwrap();
        assert!((fill.right() - 303.0).abs() < 1e-3);
        assert!((fill.width - 50.0).abs() < 1e-3);

        recorder.begin_frame();
        let mut bar = ProgressBar::new();
        bar.visible = true;
        bar.vertical = true;
        bar.set_dimensions(100.0, 100.0, 26.0, 206.0, 3.0);
        let _ = bar.show(50.0, 0.016, SCREEN, &mut recorder);
        let (fill, colors, _) = recorder.rects().nth(1).unwrap();
        assert!((fill.bottom() - 303.0).abs() < 1e-3);
        assert!((fill.height - 100.0).abs() < 1e-3);
        assert_eq!(colors.bottom_left, bar.color(BarColorSlot::BaseMain));
    }

    #[test]
    fn test_alternate_colors() {
        let mut bar = visible_bar();
        bar.alternate = true;
        bar.set_color(BarColorSlot::AltMain, 0, 0, 255, 255);
        let mut recorder = CommandRecorder::new();
        let _ = bar.show(100.0, 0.016, SCREEN, &mut recorder);

        let (_, colors, _) = recorder.rects().nth(1).unwrap();
        assert_eq!(colors.top_left, Color::from_rgba8(0, 0, 255, 255));
        let full = bar.color(BarColorSlot::AltFade).to_array();
        for (got, want) in colors.top_right.to_array().iter().zip(full) {
            assert!((got - want).abs() < 1e-4);
        }
    }

    #[test]
    fn test_extrude_adds_rim() {
        let mut bar = visible_bar();
        bar.set_extrude(true, 100);
        let mut recorder = CommandRecorder::new();
        let _ = bar.show(50.0, 0.016, SCREEN, &mut recorder);

        // Background, fill, four border strips, two rim halves.
        let rects: Vec<_> = recorder.rects().collect();
        assert_eq!(rects.len(), 8);
        let (upper, colors, _) = rects[6];
        assert!((upper.height - 10.0).abs() < 1e-3);
        assert!((colors.top_left.a - 100.0 / 255.0).abs() < 1e-4);
        assert_eq!(colors.bottom_left, Color::TRANSPARENT);
    }

    #[test]
    fn test_hidden_part_blend() {
        let mut bar = visible_bar();
        bar.set_blending_modes(BlendMode::Additive, BlendMode::Hide, BlendMode::Hide);
        let mut recorder = CommandRecorder::new();
        let _ = bar.show(50.0, 0.016, SCREEN, &mut recorder);

        let rects: Vec<_> = recorder.rects().collect();
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].2, BlendMode::Additive);
    }

    #[test]
    fn test_full_value_fills_exactly() {
        let mut recorder = CommandRecorder::new();
        for max in [1.0_f32, 3.0, 41.0, 47.0, 60.0, 120.0, 333.0, 1800.0, 1999.0] {
            let mut bar = visible_bar();
            bar.set_values(max, -1.0);

            let frame = bar.show(max, 0.016, SCREEN, &mut recorder);
            assert_eq!(frame.fill_ratio.to_bits(), 1.0_f32.to_bits(), "max {max}");
            assert_eq!(frame.fill_length.to_bits(), 200.0_f32.to_bits(), "max {max}");

            let frame = bar.show(max * 0.25, 0.016, SCREEN, &mut recorder);
            assert_eq!(frame.fill_ratio.to_bits(), (max * 0.25 / max).to_bits(), "max {max}");
        }
    }

    #[test]
    fn test_value_change_during_fade_restores_opacity() {
        let mut bar = visible_bar();
        bar.set_autoshow(true, 1000, true, 1000);
        let mut recorder = CommandRecorder::new();

        let _ = bar.show(70.0, 0.5, SCREEN, &mut recorder);
        let frame = bar.show(70.0, 0.5, SCREEN, &mut recorder);
        assert!((frame.opacity - 0.5).abs() < 1e-4);

        let frame = bar.show(71.0, 0.1, SCREEN, &mut recorder);
        assert!(frame.drawn);
        assert!((frame.opacity - 1.0).abs() < f32::EPSILON);

        // The countdown starts over from the full delay.
        let frame = bar.show(71.0, 0.8, SCREEN, &mut recorder);
        assert!((frame.opacity - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_vertical_inverted_fill_hangs_from_top() {
        let mut recorder = CommandRecorder::new();
        let mut bar = ProgressBar::new();
        bar.visible = true;
        bar.vertical = true;
        bar.invert = true;
        bar.set_dimensions(100.0, 100.0, 26.0, 206.0, 3.0);

        let _ = bar.show(50.0, 0.016, SCREEN, &mut recorder);
        let (fill, colors, _) = recorder.rects().nth(1).unwrap();
        assert!((fill.x - 103.0).abs() < 1e-3);
        assert!((fill.y - 103.0).abs() < 1e-3);
        assert!((fill.width - 20.0).abs() < 1e-3);
        assert!((fill.height - 100.0).abs() < 1e-3);
        assert_eq!(colors.top_left, bar.color(BarColorSlot::BaseMain));
        assert_eq!(colors.top_right, bar.color(BarColorSlot::BaseMain));
    }

    #[test]
    fn test_raw_ids() {
        assert_eq!(BarId::try_from(4).unwrap(), BarId::Loading);
        assert!(BarId::try_from(5).is_err());
        assert_eq!(BarColorSlot::try_from(7).unwrap(), BarColorSlot::BorderFade);
        assert!(BarColorSlot::try_from(8).is_err());
    }
}
