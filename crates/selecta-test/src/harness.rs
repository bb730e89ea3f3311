//! Test harness for driving a select through realistic event sequences.

use selecta_core::{Event, HeadlessHost, Host, Key, Point, Rect, Size, Widget};
use selecta_widgets::{Select, SelectConfig, TextSurface, ValueChanged};
use std::collections::VecDeque;
use std::fmt::{Debug, Display};
use std::time::Duration;

/// Test harness wrapping a [`Select`] on a [`HeadlessHost`].
///
/// Every interaction goes through [`Widget::event`], and the harness lets
/// the document click listener arm after each event it sends, so a click
/// sequence behaves like a user clicking at human speed.
pub struct Harness<V> {
    select: Select<V>,
    event_queue: VecDeque<Event>,
    messages: Vec<ValueChanged<V>>,
    click_delay: Duration,
}

impl<V> Harness<V>
where
    V: Clone + PartialEq + Display + Debug,
{
    /// Create a harness with a 1280x720 viewport and the select laid out at
    /// the top-left corner.
    pub fn new(config: SelectConfig<V>) -> Self {
        Self::with_viewport(config, Size::new(1280.0, 720.0))
    }

    /// Create a harness with a given viewport size.
    pub fn with_viewport(config: SelectConfig<V>, viewport: Size) -> Self {
        let click_delay = Duration::from_millis(config.settings.click_listener_delay_ms);
        let mut select = Select::new(config, HeadlessHost::new(viewport));
        select.layout(Rect::new(0.0, 0.0, 200.0, 30.0));
        Self {
            select,
            event_queue: VecDeque::new(),
            messages: Vec::new(),
            click_delay,
        }
    }

    /// Move the select to new bounds.
    #[must_use]
    pub fn at(mut self, bounds: Rect) -> Self {
        self.select.layout(bounds);
        self
    }

    // === Event Simulation ===

    /// Click the expand button.
    pub fn click_expand(&mut self) -> &mut Self {
        let center = self.select.expand_button_rect().center();
        self.click_at(center)
    }

    /// Click the row rendering the option with `uuid`, scrolling the panel
    /// first if the row is clipped.
    ///
    /// Does nothing if the panel is closed or the row is not rendered.
    pub fn click_option(&mut self, uuid: &str) -> &mut Self {
        if let Some(delta) = self.scroll_needed(uuid) {
            self.scroll(delta);
        }
        if let Some(center) = self.row_center(uuid) {
            self.click_at(center);
        }
        self
    }

    /// Scroll the panel by `delta_y` pixels with the pointer over it.
    ///
    /// Does nothing if the panel is closed.
    pub fn scroll(&mut self, delta_y: f32) -> &mut Self {
        if let Some(panel) = self.select.panel_rect() {
            self.event_queue.push_back(Event::Scroll {
                position: panel.center(),
                delta_y,
            });
            self.process_events();
        }
        self
    }

    /// Click a point outside the control and the panel.
    pub fn click_outside(&mut self) -> &mut Self {
        let viewport = self.select.host().viewport();
        let corner = Point::new(viewport.width - 1.0, viewport.height - 1.0);
        self.click_at(corner)
    }

    /// Click at an arbitrary position.
    pub fn click_at(&mut self, position: Point) -> &mut Self {
        self.event_queue.push_back(Event::click(position));
        self.process_events();
        self
    }

    /// Focus the text surface.
    pub fn focus(&mut self) -> &mut Self {
        self.event_queue.push_back(Event::FocusIn);
        self.process_events();
        self
    }

    /// Blur the text surface.
    pub fn blur(&mut self) -> &mut Self {
        self.event_queue.push_back(Event::FocusOut);
        self.process_events();
        self
    }

    /// Type text one character at a time.
    pub fn type_text(&mut self, text: &str) -> &mut Self {
        for c in text.chars() {
            self.event_queue.push_back(Event::TextInput {
                text: c.to_string(),
            });
        }
        self.process_events();
        self
    }

    /// Press a key.
    pub fn press_key(&mut self, key: Key) -> &mut Self {
        self.event_queue.push_back(Event::KeyDown { key });
        self.process_events();
        self
    }

    /// Resize the viewport and deliver the resize event.
    pub fn resize(&mut self, width: f32, height: f32) -> &mut Self {
        self.select
            .host_mut()
            .set_viewport(Size::new(width, height));
        self.event_queue.push_back(Event::Resize { width, height });
        self.process_events();
        self
    }

    /// Advance the host clock.
    pub fn advance(&mut self, elapsed: Duration) -> &mut Self {
        self.select.host_mut().advance(elapsed);
        self
    }

    // === Queries ===

    /// The select under test.
    #[must_use]
    pub const fn select(&self) -> &Select<V> {
        &self.select
    }

    /// Mutable access to the select under test.
    pub fn select_mut(&mut self) -> &mut Select<V> {
        &mut self.select
    }

    /// Messages emitted so far.
    #[must_use]
    pub fn messages(&self) -> &[ValueChanged<V>] {
        &self.messages
    }

    /// Displayed text.
    #[must_use]
    pub fn text(&self) -> &str {
        self.select.text_surface().text()
    }

    // === Assertions ===

    /// Assert the current value.
    ///
    /// # Panics
    ///
    /// Panics if the value differs.
    pub fn assert_value(&self, expected: Option<&V>) -> &Self {
        assert_eq!(
            self.select.value(),
            expected,
            "Expected value {expected:?} but got {:?}",
            self.select.value()
        );
        self
    }

    /// Assert the displayed text.
    ///
    /// # Panics
    ///
    /// Panics if the text differs.
    pub fn assert_text(&self, expected: &str) -> &Self {
        let actual = self.text();
        assert_eq!(actual, expected, "Expected text '{expected}' but got '{actual}'");
        self
    }

    /// Assert the visible rows, in order.
    ///
    /// # Panics
    ///
    /// Panics if the rows differ.
    pub fn assert_visible(&self, expected: &[&str]) -> &Self {
        let actual = self.select.visible_option_uuids();
        assert_eq!(
            actual, expected,
            "Expected visible options {expected:?} but got {actual:?}"
        );
        self
    }

    /// Assert the panel is open.
    ///
    /// # Panics
    ///
    /// Panics if the panel is closed.
    pub fn assert_open(&self) -> &Self {
        assert!(self.select.is_open(), "Expected the select to be open");
        self
    }

    /// Assert the panel is closed and no listener is left behind.
    ///
    /// # Panics
    ///
    /// Panics if the panel is open or listeners remain registered.
    pub fn assert_closed(&self) -> &Self {
        assert!(!self.select.is_open(), "Expected the select to be closed");
        let listeners = self.select.host().active_listeners();
        assert_eq!(listeners, 0, "Expected no listeners but found {listeners}");
        self
    }

    /// Assert whether the unavailable value marker is shown.
    ///
    /// # Panics
    ///
    /// Panics if the marker state differs.
    pub fn assert_unavailable(&self, shown: bool) -> &Self {
        assert_eq!(
            self.select.is_unavailable_value_shown(),
            shown,
            "Expected unavailable marker shown={shown}"
        );
        self
    }

    // === Internal ===

    fn process_events(&mut self) {
        while let Some(event) = self.event_queue.pop_front() {
            if let Some(message) = self.select.event(&event) {
                self.messages.push(message);
            }
            self.select.host_mut().advance(self.click_delay);
        }
    }

    fn row_rect(&self, uuid: &str) -> Option<(Rect, Rect)> {
        let panel = self.select.panel_rect()?;
        let row = self.select.option_list()?.row_rect_of(uuid)?;
        Some((panel, row))
    }

    fn scroll_needed(&self, uuid: &str) -> Option<f32> {
        let (panel, row) = self.row_rect(uuid)?;
        if row.y < panel.y {
            Some(row.y - panel.y)
        } else if row.bottom() > panel.bottom() {
            Some(row.bottom() - panel.bottom())
        } else {
            None
        }
    }

    fn row_center(&self, uuid: &str) -> Option<Point> {
        let (panel, row) = self.row_rect(uuid)?;
        let center = row.center();
        panel.contains_point(&center).then_some(center)
    }
}
