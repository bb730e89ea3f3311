//! The floating list of option rows.

use crate::option::{OptionData, OptionRow};
use selecta_core::{
    widget::{LayoutResult, TextStyle},
    Canvas, Color, Constraints, Event, Point, Rect, Size, Surface, SurfaceRow, Widget,
};

/// Message emitted when a row is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionPicked {
    /// Uuid of the clicked row's option
    pub uuid: String,
}

/// Row sizing used to compute the panel's natural size.
#[derive(Debug, Clone, PartialEq)]
pub struct RowMetrics {
    /// Height of one row
    pub row_height: f32,
    /// Horizontal padding on each side of a label
    pub padding: f32,
    /// Minimum panel width
    pub min_width: f32,
    /// Label style
    pub text_style: TextStyle,
}

impl Default for RowMetrics {
    fn default() -> Self {
        Self {
            row_height: 32.0,
            padding: 8.0,
            min_width: 0.0,
            text_style: TextStyle::default(),
        }
    }
}

/// A panel of option rows rendered into a [`Surface`].
///
/// The list is a projection of a slice of options: rows are rebuilt wholesale
/// by [`OptionList::update_option_data_list`] and the only state carried
/// across calls is the single highlighted uuid. Every row is mirrored into
/// the surface, which also owns the scroll offset, so a panel clipped by
/// placement still reaches every row.
#[derive(Debug)]
pub struct OptionList<S: Surface> {
    surface: S,
    rows: Vec<OptionRow>,
    metrics: RowMetrics,
    selected_uuid: Option<String>,
    background_color: Color,
    border_color: Color,
    selected_bg_color: Color,
}

impl<S: Surface> OptionList<S> {
    /// Build a list with one row per option, in order.
    pub fn new<'a, V: 'a>(
        surface: S,
        options: impl IntoIterator<Item = &'a OptionData<V>>,
        metrics: RowMetrics,
    ) -> Self {
        let mut list = Self {
            surface,
            rows: Vec::new(),
            metrics,
            selected_uuid: None,
            background_color: Color::WHITE,
            border_color: Color::new(0.8, 0.8, 0.8, 1.0),
            selected_bg_color: Color::new(0.9, 0.95, 1.0, 1.0),
        };
        list.update_option_data_list(options);
        list
    }

    /// Attach the panel to the document.
    pub fn show(&mut self) {
        self.surface.attach();
    }

    /// Detach the panel. Selection is left untouched.
    pub fn hide(&mut self) {
        self.surface.detach();
    }

    /// Whether the panel is attached.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.surface.is_attached()
    }

    /// Move the highlight to `uuid`.
    ///
    /// Unknown uuids are tolerated: the previous row is still unselected and
    /// the requested uuid is remembered as the highlighted one.
    pub fn set_selected_option(&mut self, uuid: Option<&str>) {
        if self.selected_uuid.as_deref() == uuid {
            return;
        }
        if let Some(previous) = self.selected_uuid.take() {
            if let Some(row) = self.row_mut(&previous) {
                row.un_select();
                self.surface.set_row_selected(&previous, false);
            }
        }
        if let Some(uuid) = uuid {
            if let Some(row) = self.row_mut(uuid) {
                row.select();
                self.surface.set_row_selected(uuid, true);
            }
            self.selected_uuid = Some(uuid.to_string());
        }
    }

    /// Discard every row and rebuild from `options`. The highlight is cleared
    /// and the rows scroll back to the top.
    pub fn update_option_data_list<'a, V: 'a>(
        &mut self,
        options: impl IntoIterator<Item = &'a OptionData<V>>,
    ) {
        self.rows = options.into_iter().map(OptionRow::new).collect();
        self.selected_uuid = None;

        let rendered: Vec<SurfaceRow> = self
            .rows
            .iter()
            .map(|row| SurfaceRow {
                uuid: row.uuid().to_string(),
                label: row.title().to_string(),
                selected: false,
            })
            .collect();
        self.surface.render_rows(&rendered, self.metrics.row_height);
        self.surface.set_scroll_offset(0.0);
    }

    /// Rows in display order.
    #[must_use]
    pub fn rows(&self) -> &[OptionRow] {
        &self.rows
    }

    /// Uuids of the rendered rows, in display order.
    #[must_use]
    pub fn visible_uuids(&self) -> Vec<&str> {
        self.rows.iter().map(OptionRow::uuid).collect()
    }

    /// Currently highlighted uuid.
    #[must_use]
    pub fn selected_uuid(&self) -> Option<&str> {
        self.selected_uuid.as_deref()
    }

    /// Size of the panel with every row visible and no clipping.
    #[must_use]
    pub fn natural_size(&self) -> Size {
        let widest = self
            .rows
            .iter()
            .map(|row| self.metrics.text_style.estimate_width(row.display_name()))
            .fold(0.0f32, f32::max);
        let width = 2.0f32
            .mul_add(self.metrics.padding, widest)
            .max(self.metrics.min_width);
        Size::new(width, self.content_height())
    }

    /// Drop the applied size so the next measurement starts from scratch.
    pub fn clear_size(&mut self) {
        self.surface.clear_size();
    }

    /// Position and size the panel, keeping the scroll offset in range.
    pub fn apply_rect(&mut self, rect: Rect) {
        self.surface.apply_rect(rect);
        self.scroll_to(self.scroll_offset());
    }

    /// Rectangle last applied to the panel.
    #[must_use]
    pub fn panel_rect(&self) -> Option<Rect> {
        self.surface.rect()
    }

    /// The panel surface.
    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    // === Scrolling ===

    /// How far the rows are scrolled, in pixels.
    #[must_use]
    pub fn scroll_offset(&self) -> f32 {
        self.surface.scroll_offset()
    }

    /// Largest offset that still fills the panel with rows.
    #[must_use]
    pub fn max_scroll_offset(&self) -> f32 {
        let visible = self.surface.rect().map_or(0.0, |rect| rect.height);
        (self.content_height() - visible).max(0.0)
    }

    /// Scroll to `offset`, clamped to `[0, max_scroll_offset]`.
    pub fn scroll_to(&mut self, offset: f32) {
        let offset = offset.clamp(0.0, self.max_scroll_offset());
        self.surface.set_scroll_offset(offset);
    }

    /// Scroll by `delta` pixels; positive scrolls down.
    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_to(self.scroll_offset() + delta);
    }

    /// Scroll just enough for the row rendering `uuid` to be fully visible.
    pub fn scroll_into_view(&mut self, uuid: &str) {
        let Some(index) = self.index_of(uuid) else {
            return;
        };
        let Some(panel) = self.surface.rect() else {
            return;
        };
        let height = self.metrics.row_height;
        let top = index as f32 * height;
        let offset = self.scroll_offset();
        if top < offset {
            self.scroll_to(top);
        } else if top + height > offset + panel.height {
            self.scroll_to(top + height - panel.height);
        }
    }

    // === Hit testing ===

    /// Whether `point` falls on the panel.
    #[must_use]
    pub fn contains_point(&self, point: &Point) -> bool {
        self.is_shown()
            && self
                .surface
                .rect()
                .is_some_and(|rect| rect.contains_point(point))
    }

    /// Uuid of the row under `point`, if any.
    #[must_use]
    pub fn row_at(&self, point: Point) -> Option<&str> {
        if !self.contains_point(&point) || self.metrics.row_height <= 0.0 {
            return None;
        }
        let rect = self.surface.rect()?;
        let offset = point.y - rect.y + self.scroll_offset();
        let index = (offset / self.metrics.row_height) as usize;
        self.rows.get(index).map(OptionRow::uuid)
    }

    /// On-screen rectangle of the row rendering `uuid`, after scrolling.
    ///
    /// The rectangle may lie partly or wholly outside a clipped panel.
    #[must_use]
    pub fn row_rect_of(&self, uuid: &str) -> Option<Rect> {
        let panel = self.surface.rect()?;
        let index = self.index_of(uuid)?;
        Some(self.row_rect(panel, index))
    }

    fn content_height(&self) -> f32 {
        self.rows.len() as f32 * self.metrics.row_height
    }

    fn index_of(&self, uuid: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.uuid() == uuid)
    }

    fn row_mut(&mut self, uuid: &str) -> Option<&mut OptionRow> {
        self.rows.iter_mut().find(|row| row.uuid() == uuid)
    }

    fn row_rect(&self, panel: Rect, index: usize) -> Rect {
        let height = self.metrics.row_height;
        let y = (index as f32).mul_add(height, panel.y) - self.scroll_offset();
        Rect::new(panel.x, y, panel.width, height)
    }
}

impl<S: Surface> Widget for OptionList<S> {
    type Message = OptionPicked;

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.natural_size())
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.apply_rect(bounds);
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if !self.is_shown() {
            return;
        }
        let Some(panel) = self.surface.rect() else {
            return;
        };

        canvas.fill_rect(panel, self.background_color);
        canvas.stroke_rect(panel, self.border_color, 1.0);

        for (i, row) in self.rows.iter().enumerate() {
            let row_rect = self.row_rect(panel, i);
            // Only rows overlapping the panel are drawn.
            if row_rect.bottom() <= panel.y {
                continue;
            }
            if row_rect.y >= panel.bottom() {
                break;
            }
            if row.is_selected() {
                canvas.fill_rect(row_rect, self.selected_bg_color);
            }
            let position = Point::new(
                row_rect.x + self.metrics.padding,
                row_rect.y + (self.metrics.row_height - self.metrics.text_style.size) / 2.0,
            );
            canvas.draw_text(row.display_name(), position, &self.metrics.text_style);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Self::Message> {
        match event {
            Event::MouseDown { position, .. } => self.row_at(*position).map(|uuid| OptionPicked {
                uuid: uuid.to_string(),
            }),
            Event::Scroll { position, delta_y } => {
                if self.contains_point(position) {
                    self.scroll_by(*delta_y);
                }
                None
            }
            _ => None,
        }
    }

    fn bounds(&self) -> Rect {
        self.surface.rect().unwrap_or_default()
    }

    fn test_id(&self) -> Option<&str> {
        Some("option-list")
    }
}
