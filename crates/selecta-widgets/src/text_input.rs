//! `TextInput` widget: the text surface a select renders its value into.

use selecta_core::{
    widget::{LayoutResult, TextStyle},
    Canvas, Color, Constraints, Event, Key, Point, Rect, Size, Widget,
};
use serde::{Deserialize, Serialize};

/// Message emitted when the user edits the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChanged {
    /// The new text value
    pub value: String,
}

/// Where the label sits relative to the input box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelPosition {
    /// Label above the input
    #[default]
    Top,
    /// Label to the left of the input
    Left,
}

/// A text-input-like surface a select can drive.
///
/// Programmatic [`TextSurface::set_text`] never produces a [`TextChanged`];
/// only user edits delivered through [`Widget::event`] do.
pub trait TextSurface: Widget<Message = TextChanged> {
    /// Current text.
    fn text(&self) -> &str;

    /// Replace the text. The title follows the text.
    fn set_text(&mut self, text: &str);

    /// Hover title.
    fn title(&self) -> &str;

    /// Whether the text differs from the text at the last reset.
    fn is_dirty(&self) -> bool;

    /// Take the current text as the new clean baseline.
    fn reset_dirtiness(&mut self);

    /// Whether the surface has input focus.
    fn is_focused(&self) -> bool;

    /// On-screen rectangle of the input box, excluding the label.
    fn input_rect(&self) -> Rect;
}

/// Single-line text input with an optional label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextInput {
    text: String,
    title: String,
    label: Option<String>,
    label_position: LabelPosition,
    show_dirtiness_indicator: bool,
    text_style: TextStyle,
    background_color: Color,
    border_color: Color,
    focus_border_color: Color,
    dirty_color: Color,
    padding: f32,
    min_width: f32,
    label_width: f32,
    #[serde(skip)]
    clean_text: String,
    #[serde(skip)]
    bounds: Rect,
    #[serde(skip)]
    focused: bool,
    /// Cursor position (character index)
    #[serde(skip)]
    cursor: usize,
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInput {
    /// Create an empty, unlabeled input.
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: String::new(),
            title: String::new(),
            label: None,
            label_position: LabelPosition::Top,
            show_dirtiness_indicator: false,
            text_style: TextStyle::default(),
            background_color: Color::WHITE,
            border_color: Color::new(0.8, 0.8, 0.8, 1.0),
            focus_border_color: Color::new(0.2, 0.6, 1.0, 1.0),
            dirty_color: Color::new(1.0, 0.6, 0.0, 1.0),
            padding: 8.0,
            min_width: 100.0,
            label_width: 80.0,
            clean_text: String::new(),
            bounds: Rect::default(),
            focused: false,
            cursor: 0,
        }
    }

    /// Set the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the label position.
    #[must_use]
    pub const fn label_position(mut self, position: LabelPosition) -> Self {
        self.label_position = position;
        self
    }

    /// Paint a marker while the text is dirty.
    #[must_use]
    pub const fn show_dirtiness_indicator(mut self, show: bool) -> Self {
        self.show_dirtiness_indicator = show;
        self
    }

    /// Set padding.
    #[must_use]
    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// Set minimum width of the input box.
    #[must_use]
    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = width.max(0.0);
        self
    }

    /// Get the label.
    #[must_use]
    pub fn get_label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Get the label position.
    #[must_use]
    pub const fn get_label_position(&self) -> LabelPosition {
        self.label_position
    }

    /// Get cursor position.
    #[must_use]
    pub const fn cursor_position(&self) -> usize {
        self.cursor
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn label_height(&self) -> f32 {
        match (&self.label, self.label_position) {
            (Some(_), LabelPosition::Top) => self.text_style.size + 4.0,
            _ => 0.0,
        }
    }

    fn label_offset(&self) -> f32 {
        match (&self.label, self.label_position) {
            (Some(_), LabelPosition::Left) => self.label_width,
            _ => 0.0,
        }
    }

    fn insert_text(&mut self, text: &str) -> bool {
        let mut changed = false;
        for c in text.chars() {
            let at = self.byte_index(self.cursor);
            self.text.insert(at, c);
            self.cursor += 1;
            changed = true;
        }
        changed
    }

    fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    fn delete(&mut self) -> bool {
        if self.cursor >= self.char_count() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    fn changed(&self) -> Option<TextChanged> {
        Some(TextChanged {
            value: self.text.clone(),
        })
    }
}

impl TextSurface for TextInput {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.title = text.to_string();
        self.cursor = self.char_count();
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn is_dirty(&self) -> bool {
        self.text != self.clean_text
    }

    fn reset_dirtiness(&mut self) {
        self.clean_text.clone_from(&self.text);
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn input_rect(&self) -> Rect {
        let dy = self.label_height();
        let dx = self.label_offset();
        Rect::new(
            self.bounds.x + dx,
            self.bounds.y + dy,
            (self.bounds.width - dx).max(0.0),
            (self.bounds.height - dy).max(0.0),
        )
    }
}

impl Widget for TextInput {
    type Message = TextChanged;

    fn measure(&self, constraints: Constraints) -> Size {
        let height = 2.0f32.mul_add(self.padding, self.text_style.size) + self.label_height();
        let width = (self.min_width + self.label_offset()).max(constraints.min_width);
        constraints.constrain(Size::new(width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if let Some(label) = &self.label {
            canvas.draw_text(label, self.bounds.origin(), &self.text_style);
        }

        let input = self.input_rect();
        canvas.fill_rect(input, self.background_color);

        let border_color = if self.show_dirtiness_indicator && self.is_dirty() {
            self.dirty_color
        } else if self.focused {
            self.focus_border_color
        } else {
            self.border_color
        };
        canvas.stroke_rect(input, border_color, 1.0);

        let position = Point::new(input.x + self.padding, input.y + self.padding);
        canvas.draw_text(&self.text, position, &self.text_style);
    }

    fn event(&mut self, event: &Event) -> Option<Self::Message> {
        match event {
            Event::MouseDown { position, .. } => {
                let was_focused = self.focused;
                self.focused = self.input_rect().contains_point(position);
                if self.focused && !was_focused {
                    self.cursor = self.char_count();
                }
            }
            Event::FocusIn => self.focused = true,
            Event::FocusOut => self.focused = false,
            Event::TextInput { text } if self.focused => {
                if self.insert_text(text) {
                    return self.changed();
                }
            }
            Event::KeyDown { key } if self.focused => match key {
                Key::Backspace => {
                    if self.backspace() {
                        return self.changed();
                    }
                }
                Key::Delete => {
                    if self.delete() {
                        return self.changed();
                    }
                }
                Key::Left => self.cursor = self.cursor.saturating_sub(1),
                Key::Right => self.cursor = (self.cursor + 1).min(self.char_count()),
                Key::Home => self.cursor = 0,
                Key::End => self.cursor = self.char_count(),
                Key::Enter => {}
            },
            _ => {}
        }
        None
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
