//! On-screen text lines.
//!
//! Lines are created by whoever wants text on screen (engine, scripts) and
//! handed to the [`TextLineRegistry`], which keeps them in insertion order
//! and draws them every frame. The caller keeps a [`LineHandle`] to edit or
//! take the line back; deleting a line returns it to the caller intact.

use crate::layout::Rect;
use crate::render::{draw_rect, OverlayRenderer};
use crate::style::{BlendMode, Color, CornerColors};

/// A line of overlay text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    text: String,
    /// Maximum text length in bytes.
    capacity: usize,
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    /// Draw a background rectangle behind the text.
    pub show_rect: bool,
    /// Draw the line at all.
    pub show: bool,
    /// Background rectangle color.
    pub rect_color: Color,
    /// Text color.
    pub font_color: Color,
    /// Margin between the text and its background rectangle.
    pub rect_border: f32,
    /// Background rectangle from the last [`TextLine::auto_rect`].
    rect: Rect,
}

impl TextLine {
    /// Buffer size used by [`TextLine::new`].
    pub const DEFAULT_CAPACITY: usize = 256;
    /// Default background margin in pixels.
    pub const DEFAULT_RECT_BORDER: f32 = 2.0;
    /// Default background color.
    pub const DEFAULT_RECT_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.5);

    /// Creates a visible line at `(x, y)`.
    #[must_use]
    pub fn new(x: f32, y: f32, text: &str) -> Self {
        Self::with_capacity(x, y, text, Self::DEFAULT_CAPACITY)
    }

    /// Creates a visible line whose text never exceeds `capacity` bytes.
    #[must_use]
    pub fn with_capacity(x: f32, y: f32, text: &str, capacity: usize) -> Self {
        let mut line = Self {
            text: String::with_capacity(capacity),
            capacity,
            x,
            y,
            show_rect: false,
            show: true,
            rect_color: Self::DEFAULT_RECT_COLOR,
            font_color: Color::WHITE,
            rect_border: Self::DEFAULT_RECT_BORDER,
            rect: Rect::ZERO,
        };
        line.set_text(text);
        line
    }

    /// Replaces the text, cutting it at the buffer capacity.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(truncate(text, self.capacity));
    }

    /// Moves the line to `(x, y)` with new text and default styling. The
    /// text buffer is kept, so a reset never allocates.
    pub fn reset(&mut self, x: f32, y: f32, text: &str) {
        self.x = x;
        self.y = y;
        self.show_rect = false;
        self.show = true;
        self.rect_color = Self::DEFAULT_RECT_COLOR;
        self.font_color = Color::WHITE;
        self.rect = Rect::ZERO;
        self.set_text(text);
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Buffer capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Background rectangle as of the last layout.
    #[must_use]
    pub fn bounding_rect(&self) -> Rect {
        self.rect
    }

    /// Measures the text and stores a background rectangle enclosing it plus
    /// `rect_border` on every side.
    pub fn auto_rect<R: OverlayRenderer + ?Sized>(&mut self, renderer: &R) -> Rect {
        let extent = renderer.measure_text(&self.text);
        self.rect = Rect::from_corners(
            self.x - self.rect_border,
            self.y - self.rect_border,
            self.x + extent.width + self.rect_border,
            self.y + extent.height + self.rect_border,
        );
        self.rect
    }

    /// Draws the line: background first if enabled, then the text.
    pub fn render<R: OverlayRenderer + ?Sized>(&mut self, renderer: &mut R) {
        if !self.show {
            return;
        }
        if self.show_rect {
            let rect = self.auto_rect(renderer);
            draw_rect(renderer, rect, CornerColors::uniform(self.rect_color), BlendMode::Alpha);
        }
        renderer.draw_text(self.x, self.y, &self.text, self.font_color);
    }
}

fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Stable reference to a registered line.
///
/// Handles go stale when their line is deleted; a stale handle never
/// reaches a line registered later in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineHandle {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Slot {
    line: Option<TextLine>,
    generation: u32,
    prev: Option<u32>,
    next: Option<u32>,
}

/// Insertion-ordered set of lines with O(1) removal by handle.
///
/// Lines live in slots linked front to back; freed slots are reused.
#[derive(Debug, Clone, Default)]
pub struct TextLineRegistry {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    head: Option<u32>,
    tail: Option<u32>,
    len: usize,
}

impl TextLineRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with room for `capacity` lines.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Number of registered lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no lines are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a line; it draws after (on top of) every line already present.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add(&mut self, line: TextLine) -> LineHandle {
        let index = if let Some(index) = self.free_list.pop() {
            index
        } else {
            self.slots.push(Slot {
                line: None,
                generation: 0,
                prev: None,
                next: None,
            });
            (self.slots.len() - 1) as u32
        };

        let slot = &mut self.slots[index as usize];
        slot.line = Some(line);
        slot.prev = self.tail;
        slot.next = None;
        let generation = slot.generation;

        match self.tail {
            Some(tail) => self.slots[tail as usize].next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;

        LineHandle { index, generation }
    }

    /// Unlinks a line and hands it back. Returns `None` for stale handles.
    pub fn delete(&mut self, handle: LineHandle) -> Option<TextLine> {
        self.slot(handle)?;

        let slot = &mut self.slots[handle.index as usize];
        let line = slot.line.take();
        let (prev, next) = (slot.prev.take(), slot.next.take());
        slot.generation = slot.generation.wrapping_add(1);

        match prev {
            Some(prev) => self.slots[prev as usize].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.slots[next as usize].prev = prev,
            None => self.tail = prev,
        }

        self.free_list.push(handle.index);
        self.len -= 1;
        line
    }

    /// Returns true if `handle` still names a registered line.
    #[must_use]
    pub fn contains(&self, handle: LineHandle) -> bool {
        self.slot(handle).is_some()
    }

    /// Gets a registered line.
    #[must_use]
    pub fn get(&self, handle: LineHandle) -> Option<&TextLine> {
        self.slot(handle)?.line.as_ref()
    }

    /// Gets mutable access to a registered line.
    #[must_use]
    pub fn get_mut(&mut self, handle: LineHandle) -> Option<&mut TextLine> {
        self.slot(handle)?;
        self.slots[handle.index as usize].line.as_mut()
    }

    /// Walks the lines front to back (draw order).
    #[must_use]
    pub fn iter(&self) -> Lines<'_> {
        Lines {
            registry: self,
            cursor: self.head,
        }
    }

    /// Draws every visible line in insertion order.
    pub fn render_all<R: OverlayRenderer + ?Sized>(&mut self, renderer: &mut R) {
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let slot = &mut self.slots[index as usize];
            cursor = slot.next;
            if let Some(line) = slot.line.as_mut() {
                line.render(renderer);
            }
        }
    }

    /// Drops every registered line. Returns how many there were.
    #[allow(clippy::cast_possible_truncation)]
    pub fn clear(&mut self) -> usize {
        let count = self.len;
        for slot in &mut self.slots {
            if slot.line.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            slot.prev = None;
            slot.next = None;
        }
        self.free_list.clear();
        self.free_list.extend((0..self.slots.len() as u32).rev());
        self.head = None;
        self.tail = None;
        self.len = 0;
        count
    }

    fn slot(&self, handle: LineHandle) -> Option<&Slot> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation && slot.line.is_some())
    }
}

/// Front-to-back iterator over registered lines.
pub struct Lines<'a> {
    registry: &'a TextLineRegistry,
    cursor: Option<u32>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = (LineHandle, &'a TextLine);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(index) = self.cursor {
            let slot = &self.registry.slots[index as usize];
            self.cursor = slot.next;
            if let Some(line) = slot.line.as_ref() {
                let handle = LineHandle {
                    index,
                    generation: slot.generation,
                };
                return Some((handle, line));
            }
        }
        None
    }
}

impl<'a> IntoIterator for &'a TextLineRegistry {
    type Item = (LineHandle, &'a TextLine);
    type IntoIter = Lines<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::CommandRecorder;

    fn texts(registry: &TextLineRegistry) -> Vec<String> {
        registry.iter().map(|(_, line)| line.text().to_owned()).collect()
    }

    #[test]
    fn test_insertion_order() {
        let mut registry = TextLineRegistry::new();
        for name in ["a", "b", "c"] {
            registry.add(TextLine::new(0.0, 0.0, name));
        }
        assert_eq!(texts(&registry), ["a", "b", "c"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_delete_keeps_relative_order() {
        let mut registry = TextLineRegistry::new();
        let handles: Vec<_> = ["a", "b", "c", "d"]
            .iter()
            .map(|name| registry.add(TextLine::new(0.0, 0.0, name)))
            .collect();

        let taken = registry.delete(handles[1]).unwrap();
        assert_eq!(taken.text(), "b");
        assert_eq!(texts(&registry), ["a", "c", "d"]);

        registry.delete(handles[0]);
        registry.delete(handles[3]);
        assert_eq!(texts(&registry), ["c"]);

        registry.delete(handles[2]);
        assert!(registry.is_empty());
        assert_eq!(registry.iter().count(), 0);
    }

    #[test]
    fn test_stale_handle() {
        let mut registry = TextLineRegistry::new();
        let first = registry.add(TextLine::new(0.0, 0.0, "first"));
        registry.delete(first);
        assert!(registry.delete(first).is_none());

        let second = registry.add(TextLine::new(0.0, 0.0, "second"));
        assert!(!registry.contains(first));
        assert!(registry.get(first).is_none());
        assert_eq!(registry.get(second).unwrap().text(), "second");
    }

    #[test]
    fn test_slot_reuse_appends_at_tail() {
        let mut registry = TextLineRegistry::new();
        let a = registry.add(TextLine::new(0.0, 0.0, "a"));
        registry.add(TextLine::new(0.0, 0.0, "b"));
        registry.delete(a);
        registry.add(TextLine::new(0.0, 0.0, "c"));
        assert_eq!(texts(&registry), ["b", "c"]);
    }

    #[test]
    fn test_traversal_is_restartable() {
        let mut registry = TextLineRegistry::new();
        registry.add(TextLine::new(0.0, 0.0, "x"));
        registry.add(TextLine::new(0.0, 0.0, "y"));
        assert_eq!(registry.iter().count(), 2);
        assert_eq!((&registry).into_iter().count(), 2);
    }

    #[test]
    fn test_auto_rect_encloses_text() {
        let recorder = CommandRecorder::new();
        let mut line = TextLine::new(100.0, 50.0, "hello");
        line.rect_border = 4.0;

        let rect = line.auto_rect(&recorder);
        assert_eq!(rect, Rect::new(96.0, 46.0, 48.0, 24.0));
        assert_eq!(line.bounding_rect(), rect);
    }

    #[test]
    fn test_render_all_skips_hidden_lines() {
        let mut registry = TextLineRegistry::new();
        let mut recorder = CommandRecorder::new();

        let mut boxed = TextLine::new(10.0, 10.0, "boxed");
        boxed.show_rect = true;
        registry.add(boxed);
        let hidden = registry.add(TextLine::new(10.0, 30.0, "hidden"));
        registry.get_mut(hidden).unwrap().show = false;
        registry.add(TextLine::new(10.0, 50.0, "plain"));

        registry.render_all(&mut recorder);
        assert_eq!(recorder.texts().collect::<Vec<_>>(), ["boxed", "plain"]);
        assert_eq!(recorder.rects().count(), 1);
        assert!(matches!(
            recorder.commands()[0],
            crate::render::RenderCommand::Rect { .. }
        ));
    }

    #[test]
    fn test_text_capacity() {
        let mut line = TextLine::with_capacity(0.0, 0.0, "status: ok", 6);
        assert_eq!(line.text(), "status");

        line.set_text("héllo");
        assert_eq!(line.text(), "héllo");
        line.set_text("ééé");
        assert_eq!(line.text(), "ééé");
        line.set_text("éééé");
        assert_eq!(line.text(), "ééé");
        assert_eq!(line.capacity(), 6);
    }

    #[test]
    fn test_reset_keeps_buffer() {
        let mut line = TextLine::with_capacity(5.0, 5.0, "old text", 16);
        line.show_rect = true;
        line.font_color = Color::RED;
        let buffer = line.text().as_ptr();

        line.reset(1.0, 2.0, "new text that runs long");
        assert_eq!(line.text(), "new text that ru");
        assert_eq!(line.text().as_ptr(), buffer);
        assert!(!line.show_rect);
        assert_eq!(line.font_color, Color::WHITE);
        assert!((line.x - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_clear() {
        let mut registry = TextLineRegistry::with_capacity(4);
        let a = registry.add(TextLine::new(0.0, 0.0, "a"));
        registry.add(TextLine::new(0.0, 0.0, "b"));
        assert_eq!(registry.clear(), 2);
        assert!(registry.is_empty());
        assert!(!registry.contains(a));

        registry.add(TextLine::new(0.0, 0.0, "c"));
        assert_eq!(texts(&registry), ["c"]);
    }
}
