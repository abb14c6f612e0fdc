//! The overlay facade.
//!
//! [`Overlay`] owns every fader, every bar and the text registry, and draws
//! them once per frame in a fixed order:
//!
//! ```text
//! begin_2d → bars → faders → text lines → temporary text → crosshair → end_2d
//! ```
//!
//! Faders come after bars so a death or flash effect covers the HUD.

use crate::bar::{BarFrame, BarId, ProgressBar};
use crate::config::OverlayConfig;
use crate::fader::{FadeDirection, Fader, FaderId};
use crate::layout::{Rect, ScreenSize};
use crate::render::{draw_rect, OverlayRenderer};
use crate::style::CornerColors;
use crate::text::{LineHandle, TextLine, TextLineRegistry};

/// Process-wide overlay state.
///
/// Create it once when the renderer comes up ([`Overlay::new`]) and call
/// [`Overlay::shutdown`] when it goes away.
#[derive(Debug, Clone)]
pub struct Overlay {
    faders: [Fader; FaderId::COUNT],
    bars: [ProgressBar; BarId::COUNT],
    /// Values handed in for the next frame.
    bar_values: [Option<f32>; BarId::COUNT],
    lines: TextLineRegistry,
    /// Preallocated pool for [`Overlay::out_text_xy`]; the first
    /// `temp_used` slots are drawn next frame.
    temp_lines: Vec<TextLine>,
    temp_used: usize,
    config: OverlayConfig,
}

impl Overlay {
    /// Builds every fader and bar from `config`, with an empty text registry.
    #[must_use]
    pub fn new(config: OverlayConfig) -> Self {
        let faders = FaderId::ALL.map(|id| config.faders.get(id).build());
        let bars = BarId::ALL.map(|id| config.bars.get(id).build());
        let temp_lines = (0..config.text.temp_lines)
            .map(|_| {
                let mut line = TextLine::with_capacity(0.0, 0.0, "", config.text.temp_line_capacity);
                line.rect_border = config.text.rect_border;
                line
            })
            .collect();
        tracing::debug!(
            "Overlay initialized: {} faders, {} bars, {} temp lines",
            FaderId::COUNT,
            BarId::COUNT,
            config.text.temp_lines
        );

        Self {
            faders,
            bars,
            bar_values: [None; BarId::COUNT],
            lines: TextLineRegistry::with_capacity(64),
            temp_lines,
            temp_used: 0,
            config,
        }
    }

    /// Drops every registered and temporary line and puts faders and bars
    /// back to their configured state. Returns how many registered lines
    /// were dropped.
    pub fn shutdown(&mut self) -> usize {
        let dropped = self.lines.clear();
        self.temp_used = 0;
        self.bar_values = [None; BarId::COUNT];
        for id in FaderId::ALL {
            self.faders[id.index()] = self.config.faders.get(id).build();
        }
        for id in BarId::ALL {
            self.bars[id.index()] = self.config.bars.get(id).build();
        }
        tracing::debug!("Overlay shut down, dropped {} text lines", dropped);
        dropped
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Faders
    // ------------------------------------------------------------------

    /// Gets a fader.
    #[must_use]
    pub fn fader(&self, id: FaderId) -> &Fader {
        &self.faders[id.index()]
    }

    /// Gets mutable access to a fader, e.g. to recolor it.
    pub fn fader_mut(&mut self, id: FaderId) -> &mut Fader {
        &mut self.faders[id.index()]
    }

    /// Starts a fader.
    pub fn engage(&mut self, id: FaderId, direction: FadeDirection) {
        self.faders[id.index()].engage(direction);
    }

    /// Returns true while the fader is running or holding.
    #[must_use]
    pub fn is_fading(&self, id: FaderId) -> bool {
        self.faders[id.index()].is_fading()
    }

    /// Stops and clears a fader.
    pub fn cut(&mut self, id: FaderId) {
        self.faders[id.index()].cut();
    }

    // ------------------------------------------------------------------
    // Bars
    // ------------------------------------------------------------------

    /// Gets a bar.
    #[must_use]
    pub fn bar(&self, id: BarId) -> &ProgressBar {
        &self.bars[id.index()]
    }

    /// Gets mutable access to a bar.
    pub fn bar_mut(&mut self, id: BarId) -> &mut ProgressBar {
        &mut self.bars[id.index()]
    }

    /// Sets the value a bar shows on the next [`Overlay::render`]. Bars that
    /// get no value for a frame are not shown that frame.
    pub fn set_bar_value(&mut self, id: BarId, value: f32) {
        self.bar_values[id.index()] = Some(value);
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Registers a line for drawing every frame.
    pub fn add_line(&mut self, line: TextLine) -> LineHandle {
        self.lines.add(line)
    }

    /// Unregisters a line and hands it back.
    pub fn delete_line(&mut self, handle: LineHandle) -> Option<TextLine> {
        self.lines.delete(handle)
    }

    /// Gets mutable access to a registered line.
    pub fn line_mut(&mut self, handle: LineHandle) -> Option<&mut TextLine> {
        self.lines.get_mut(handle)
    }

    /// The registered lines.
    #[must_use]
    pub fn lines(&self) -> &TextLineRegistry {
        &self.lines
    }

    /// Queues `text` at `(x, y)` for the next frame only.
    ///
    /// The line comes from a pool sized at start-up and is reset to default
    /// styling. Returns `None` once the frame's pool is used up.
    pub fn out_text_xy(&mut self, x: f32, y: f32, text: &str) -> Option<&mut TextLine> {
        if self.temp_used >= self.temp_lines.len() {
            tracing::warn!(
                "Temporary text pool exhausted ({} lines), dropping {:?}",
                self.temp_lines.len(),
                text
            );
            return None;
        }

        let line = &mut self.temp_lines[self.temp_used];
        line.reset(x, y, text);
        line.rect_border = self.config.text.rect_border;
        self.temp_used += 1;
        Some(line)
    }

    /// Number of temporary lines queued for the next frame.
    #[must_use]
    pub fn temp_line_count(&self) -> usize {
        self.temp_used
    }

    // ------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------

    /// Turns the crosshair on or off.
    pub fn set_crosshair_enabled(&mut self, enabled: bool) {
        self.config.crosshair.enabled = enabled;
    }

    /// Draws the whole overlay for one frame of `dt` seconds.
    pub fn render<R: OverlayRenderer + ?Sized>(
        &mut self,
        screen: ScreenSize,
        dt: f32,
        renderer: &mut R,
    ) {
        renderer.begin_2d(screen);

        self.draw_bars(screen, dt, renderer);
        self.draw_faders(screen, dt, renderer);
        self.lines.render_all(renderer);
        for line in &mut self.temp_lines[..self.temp_used] {
            line.render(renderer);
        }
        self.temp_used = 0;

        if self.config.crosshair.enabled {
            self.draw_crosshair(screen, renderer);
        }

        renderer.end_2d();
    }

    /// Shows every bar that was given a value this frame.
    pub fn draw_bars<R: OverlayRenderer + ?Sized>(
        &mut self,
        screen: ScreenSize,
        dt: f32,
        renderer: &mut R,
    ) {
        for (bar, value) in self.bars.iter_mut().zip(self.bar_values.iter_mut()) {
            if let Some(value) = value.take() {
                bar.show(value, dt, screen, renderer);
            }
        }
    }

    /// Advances and draws every fader.
    pub fn draw_faders<R: OverlayRenderer + ?Sized>(
        &mut self,
        screen: ScreenSize,
        dt: f32,
        renderer: &mut R,
    ) {
        for fader in &mut self.faders {
            fader.show(dt, screen, renderer);
        }
    }

    /// Draws the loading bar alone in its own 2D pass.
    pub fn draw_loading_bar<R: OverlayRenderer + ?Sized>(
        &mut self,
        value: f32,
        screen: ScreenSize,
        dt: f32,
        renderer: &mut R,
    ) -> BarFrame {
        renderer.begin_2d(screen);
        let frame = self.bars[BarId::Loading.index()].show(value, dt, screen, renderer);
        renderer.end_2d();
        frame
    }

    /// Draws the crosshair at the screen centre.
    pub fn draw_crosshair<R: OverlayRenderer + ?Sized>(&self, screen: ScreenSize, renderer: &mut R) {
        let crosshair = &self.config.crosshair;
        let (cx, cy) = screen.rect().center();
        let half = crosshair.thickness * 0.5;
        let colors = CornerColors::uniform(crosshair.color());

        let horizontal = Rect::new(cx - crosshair.size, cy - half, crosshair.size * 2.0, crosshair.thickness);
        let vertical = Rect::new(cx - half, cy - crosshair.size, crosshair.thickness, crosshair.size * 2.0);
        draw_rect(renderer, horizontal, colors, crosshair.blend);
        draw_rect(renderer, vertical, colors, crosshair.blend);
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}
