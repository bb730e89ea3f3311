//! Widget trait and paint primitives.
//!
//! Widgets follow a measure-layout-paint cycle, and turn input events into
//! typed messages:
//!
//! 1. **Measure**: compute intrinsic size given constraints
//! 2. **Layout**: take the on-screen bounds allocated by the parent
//! 3. **Paint**: emit draw operations onto a [`Canvas`]
//! 4. **Event**: react to input, optionally producing a message

use crate::color::Color;
use crate::constraints::Constraints;
use crate::event::Event;
use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Result of laying out a widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutResult {
    /// Computed size after layout
    pub size: Size,
}

/// Core widget trait.
pub trait Widget {
    /// Message produced by [`Widget::event`].
    type Message;

    /// Compute intrinsic size given constraints.
    fn measure(&self, constraints: Constraints) -> Size;

    /// Accept the allocated on-screen bounds.
    fn layout(&mut self, bounds: Rect) -> LayoutResult;

    /// Emit draw operations.
    fn paint(&self, canvas: &mut dyn Canvas);

    /// Handle an input event.
    fn event(&mut self, event: &Event) -> Option<Self::Message>;

    /// Current on-screen bounds.
    fn bounds(&self) -> Rect;

    /// Test ID for this widget (if any).
    fn test_id(&self) -> Option<&str> {
        None
    }
}

/// Canvas trait for paint operations.
///
/// This is a minimal abstraction over the rendering backend.
pub trait Canvas {
    /// Draw a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a stroked rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);

    /// Draw text.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);
}

/// Text style for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
}

impl TextStyle {
    /// Approximate rendered width of `text`.
    ///
    /// Uses an average glyph width of 0.6em; good enough to size a panel
    /// before the backend has measured it.
    #[must_use]
    pub fn estimate_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.size * 0.6
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 14.0,
            color: Color::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_style_default() {
        let style = TextStyle::default();
        assert_eq!(style.size, 14.0);
        assert_eq!(style.color, Color::BLACK);
    }

    #[test]
    fn test_estimate_width_counts_chars_not_bytes() {
        let style = TextStyle {
            size: 10.0,
            ..TextStyle::default()
        };
        assert_eq!(style.estimate_width("UK"), 12.0);
        assert_eq!(style.estimate_width("Ünï"), 18.0);
        assert_eq!(style.estimate_width(""), 0.0);
    }
}
