//! Drawing boundary of the overlay.
//!
//! The overlay never talks to the GPU. Everything it draws goes through
//! [`OverlayRenderer`], implemented by the engine's 2D backend. The
//! [`CommandRecorder`] implementation records the calls instead, which is
//! what a batching backend consumes and what the tests inspect.

use crate::layout::{Rect, ScreenSize};
use crate::style::{BlendMode, Color, CornerColors};

/// Size of a rendered string, with the origin at its top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextExtent {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

/// Primitive drawing routines the overlay consumes.
pub trait OverlayRenderer {
    /// Switches into orthographic 2D mode for the overlay pass.
    fn begin_2d(&mut self, screen: ScreenSize);

    /// Restores the state saved by [`OverlayRenderer::begin_2d`].
    fn end_2d(&mut self);

    /// Fills a rectangle with a four-corner gradient.
    fn fill_rect(&mut self, bounds: Rect, colors: CornerColors, blend: BlendMode);

    /// Measures `text` in the active overlay font.
    fn measure_text(&self, text: &str) -> TextExtent;

    /// Draws `text` with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, x: f32, y: f32, text: &str, color: Color);
}

/// Draws a gradient rectangle unless the blend mode hides it.
///
/// This is the single rectangle primitive shared by bars, faders, text
/// backgrounds and the crosshair.
pub fn draw_rect<R: OverlayRenderer + ?Sized>(
    renderer: &mut R,
    bounds: Rect,
    colors: CornerColors,
    blend: BlendMode,
) {
    if blend.is_hidden() {
        return;
    }
    renderer.fill_rect(bounds, colors, blend);
}

/// A recorded overlay draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Enter 2D mode.
    Begin2D {
        /// Screen size for the orthographic projection.
        screen: ScreenSize,
    },
    /// Leave 2D mode.
    End2D,
    /// Gradient rectangle.
    Rect {
        /// Bounds.
        bounds: Rect,
        /// Corner colors.
        colors: CornerColors,
        /// Blending mode.
        blend: BlendMode,
    },
    /// Text.
    Text {
        /// Text content.
        text: String,
        /// X position.
        x: f32,
        /// Y position.
        y: f32,
        /// Text color.
        color: Color,
    },
}

impl RenderCommand {
    /// Builds the four vertices of a rectangle command, in the order
    /// top-left, top-right, bottom-right, bottom-left.
    #[must_use]
    pub fn quad_vertices(&self) -> Option<[OverlayVertex; 4]> {
        let Self::Rect { bounds, colors, .. } = self else {
            return None;
        };
        let [tl, tr, br, bl] = colors.to_quad();
        Some([
            OverlayVertex::new(bounds.x, bounds.y, tl.to_array()),
            OverlayVertex::new(bounds.right(), bounds.y, tr.to_array()),
            OverlayVertex::new(bounds.right(), bounds.bottom(), br.to_array()),
            OverlayVertex::new(bounds.x, bounds.bottom(), bl.to_array()),
        ])
    }
}

/// Renderer that records draw calls.
///
/// Text is measured with fixed monospace metrics.
#[derive(Debug, Clone)]
pub struct CommandRecorder {
    /// All commands since the last [`CommandRecorder::begin_frame`].
    commands: Vec<RenderCommand>,
    /// Advance per character.
    char_width: f32,
    /// Height of one text line.
    line_height: f32,
    /// Current 2D nesting depth.
    depth: u32,
}

impl CommandRecorder {
    /// Default glyph advance.
    pub const DEFAULT_CHAR_WIDTH: f32 = 8.0;
    /// Default line height.
    pub const DEFAULT_LINE_HEIGHT: f32 = 16.0;

    /// Creates a recorder with the default font metrics.
    #[must_use]
    pub fn new() -> Self {
        Self::with_metrics(Self::DEFAULT_CHAR_WIDTH, Self::DEFAULT_LINE_HEIGHT)
    }

    /// Creates a recorder with custom monospace metrics.
    #[must_use]
    pub fn with_metrics(char_width: f32, line_height: f32) -> Self {
        Self {
            commands: Vec::with_capacity(256),
            char_width,
            line_height,
            depth: 0,
        }
    }

    /// Clears the recorded commands.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.depth = 0;
    }

    /// All recorded commands.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Returns true while inside a 2D pass.
    #[must_use]
    pub fn in_2d(&self) -> bool {
        self.depth > 0
    }

    /// Recorded rectangles as `(bounds, colors, blend)`.
    pub fn rects(&self) -> impl Iterator<Item = (Rect, CornerColors, BlendMode)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            RenderCommand::Rect { bounds, colors, blend } => Some((*bounds, *colors, *blend)),
            _ => None,
        })
    }

    /// Recorded strings, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|command| match command {
            RenderCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Vertices for every recorded rectangle, four per rectangle.
    #[must_use]
    pub fn vertices(&self) -> Vec<OverlayVertex> {
        self.commands
            .iter()
            .filter_map(RenderCommand::quad_vertices)
            .flatten()
            .collect()
    }

    /// Vertex data as raw bytes, ready for upload.
    #[must_use]
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.vertices()).to_vec()
    }
}

impl Default for CommandRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayRenderer for CommandRecorder {
    fn begin_2d(&mut self, screen: ScreenSize) {
        self.depth += 1;
        self.commands.push(RenderCommand::Begin2D { screen });
    }

    fn end_2d(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(RenderCommand::End2D);
    }

    fn fill_rect(&mut self, bounds: Rect, colors: CornerColors, blend: BlendMode) {
        self.commands.push(RenderCommand::Rect { bounds, colors, blend });
    }

    #[allow(clippy::cast_precision_loss)]
    fn measure_text(&self, text: &str) -> TextExtent {
        let mut lines = 0usize;
        let mut widest = 0usize;
        for line in text.lines() {
            lines += 1;
            widest = widest.max(line.chars().count());
        }
        TextExtent {
            width: widest as f32 * self.char_width,
            height: lines.max(1) as f32 * self.line_height,
        }
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, color: Color) {
        self.commands.push(RenderCommand::Text {
            text: text.to_owned(),
            x,
            y,
            color,
        });
    }
}

/// Vertex for overlay rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OverlayVertex {
    /// Position (x, y) in pixels.
    pub position: [f32; 2],
    /// Color (RGBA).
    pub color: [f32; 4],
}

impl OverlayVertex {
    /// Creates a new vertex.
    #[must_use]
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}
