//! On-screen surfaces that floating panels are rendered into.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// One row rendered into a surface.
///
/// The uuid is the row's identity on screen; the label doubles as its hover
/// title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceRow {
    /// Uuid of the option the row renders
    pub uuid: String,
    /// Visible label and title
    pub label: String,
    /// Whether the row carries the selected marker
    pub selected: bool,
}

/// A surface that can be attached to the document and positioned.
///
/// This is the rendering primitive the select engine needs from its host:
/// put the panel on screen, take it off, give it a rectangle, fill it with
/// rows and scroll through them.
pub trait Surface {
    /// Attach the surface to the document. Attaching twice is harmless.
    fn attach(&mut self);

    /// Detach the surface from the document. Detaching twice is harmless.
    fn detach(&mut self);

    /// Whether the surface is currently attached.
    fn is_attached(&self) -> bool;

    /// Apply a position and size.
    fn apply_rect(&mut self, rect: Rect);

    /// Drop any applied size so the surface can report its natural size.
    fn clear_size(&mut self) {}

    /// The last applied rectangle, if any.
    fn rect(&self) -> Option<Rect>;

    /// Replace every rendered row. Each row is `row_height` tall.
    fn render_rows(&mut self, rows: &[SurfaceRow], row_height: f32);

    /// Set or clear the selected marker of the row rendering `uuid`.
    fn set_row_selected(&mut self, uuid: &str, selected: bool);

    /// Vertical scroll offset of the rows, in pixels.
    fn scroll_offset(&self) -> f32;

    /// Scroll the rows to `offset` pixels from the top.
    fn set_scroll_offset(&mut self, offset: f32);
}

/// In-memory surface used by headless hosts and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySurface {
    attached: bool,
    rect: Option<Rect>,
    attach_count: usize,
    rows: Vec<SurfaceRow>,
    row_height: f32,
    scroll_offset: f32,
}

impl MemorySurface {
    /// Create a detached surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the surface went from detached to attached.
    #[must_use]
    pub const fn attach_count(&self) -> usize {
        self.attach_count
    }

    /// Rows rendered so far.
    #[must_use]
    pub fn rows(&self) -> &[SurfaceRow] {
        &self.rows
    }

    /// Height of each rendered row.
    #[must_use]
    pub const fn row_height(&self) -> f32 {
        self.row_height
    }
}

impl Surface for MemorySurface {
    fn attach(&mut self) {
        if !self.attached {
            self.attached = true;
            self.attach_count += 1;
        }
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn apply_rect(&mut self, rect: Rect) {
        self.rect = Some(rect);
    }

    fn clear_size(&mut self) {
        if let Some(rect) = self.rect.as_mut() {
            rect.width = 0.0;
            rect.height = 0.0;
        }
    }

    fn rect(&self) -> Option<Rect> {
        self.rect
    }

    fn render_rows(&mut self, rows: &[SurfaceRow], row_height: f32) {
        self.rows = rows.to_vec();
        self.row_height = row_height;
        self.scroll_offset = 0.0;
    }

    fn set_row_selected(&mut self, uuid: &str, selected: bool) {
        if let Some(row) = self.rows.iter_mut().find(|row| row.uuid == uuid) {
            row.selected = selected;
        }
    }

    fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offset = offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_surface_attach_detach() {
        let mut surface = MemorySurface::new();
        assert!(!surface.is_attached());

        surface.attach();
        surface.attach();
        assert!(surface.is_attached());
        assert_eq!(surface.attach_count(), 1);

        surface.detach();
        assert!(!surface.is_attached());
        surface.attach();
        assert_eq!(surface.attach_count(), 2);
    }

    #[test]
    fn test_memory_surface_rect() {
        let mut surface = MemorySurface::new();
        assert_eq!(surface.rect(), None);

        surface.apply_rect(Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(surface.rect(), Some(Rect::new(1.0, 2.0, 3.0, 4.0)));

        surface.clear_size();
        assert_eq!(surface.rect(), Some(Rect::new(1.0, 2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_memory_surface_rows() {
        let mut surface = MemorySurface::new();
        surface.set_scroll_offset(40.0);
        surface.render_rows(
            &[
                SurfaceRow {
                    uuid: "1".to_string(),
                    label: "America".to_string(),
                    selected: false,
                },
                SurfaceRow {
                    uuid: "2".to_string(),
                    label: "UK".to_string(),
                    selected: true,
                },
            ],
            32.0,
        );
        assert_eq!(surface.rows().len(), 2);
        assert_eq!(surface.row_height(), 32.0);
        assert_eq!(surface.scroll_offset(), 0.0);

        surface.set_row_selected("1", true);
        surface.set_row_selected("2", false);
        surface.set_row_selected("missing", true);
        let selected: Vec<bool> = surface.rows().iter().map(|r| r.selected).collect();
        assert_eq!(selected, vec![true, false]);
    }
}
