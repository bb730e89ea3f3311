//! The select engine.
//!
//! A [`Select`] owns a text surface and, once first opened, an
//! [`OptionList`] rendered into a panel created by its [`Host`]. It is either
//! CLOSED or OPEN:
//!
//! - CLOSED → OPEN: the expand button is clicked, or the text surface gains
//!   focus while `open_on_input_focus` is set. Typing while closed opens too.
//! - OPEN → CLOSED: a click outside the control and the panel, a second click
//!   on the expand button, a row pick, or a window resize.
//!
//! The document click and window resize listeners live exactly as long as the
//! OPEN state.

use crate::config::{SelectConfig, SelectEvents, SelectSettings, UnavailableValueHandling};
use crate::error::SelectError;
use crate::loader::{channel, InitialOptions, LoadState, PendingLoad};
use crate::option::{search_by_display_name, OptionData};
use crate::option_list::{OptionList, OptionPicked, RowMetrics};
use crate::text_input::{TextChanged, TextInput, TextSurface};
use selecta_core::{
    determine_rect,
    widget::{LayoutResult, TextStyle},
    Canvas, Color, Constraints, Event, HeadlessHost, Host, ListenerId, ListenerKind, Point, Rect,
    Size, Widget,
};
use std::collections::HashSet;
use std::fmt::Display;
use std::time::Duration;

/// Caret shown while closed.
pub const CARET_CLOSED: &str = "▼";
/// Caret shown while open.
pub const CARET_OPEN: &str = "▲";

/// Message emitted when the user picks an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChanged<V> {
    /// The new value
    pub value: V,
    /// Uuid of the picked option
    pub option_uuid: String,
}

/// Dropdown select over options carrying values of type `V`.
pub struct Select<V, H: Host = HeadlessHost, T: TextSurface = TextInput> {
    host: H,
    text: T,
    option_list: Option<OptionList<H::Panel>>,
    settings: SelectSettings,
    events: SelectEvents<V>,
    is_open: bool,
    option_data_list: Vec<OptionData<V>>,
    selected_option_uuid: Option<String>,
    value: Option<V>,
    baseline: Option<V>,
    dirty: bool,
    unavailable_value_shown: bool,
    search_string: Option<String>,
    click_listener: Option<ListenerId>,
    resize_listener: Option<ListenerId>,
    pending: Option<PendingLoad<V>>,
    deferred_initial_value: Option<V>,
    load_state: LoadState,
    bounds: Rect,
    unavailable_color: Color,
}

impl<V, H> Select<V, H, TextInput>
where
    V: Clone + PartialEq + Display,
    H: Host,
{
    /// Build a select with the default [`TextInput`] surface.
    pub fn new(config: SelectConfig<V>, host: H) -> Self {
        let settings = &config.settings;
        let mut text = TextInput::new()
            .label_position(settings.label_position)
            .show_dirtiness_indicator(settings.show_dirtiness_indicator);
        if let Some(label) = &settings.label {
            text = text.label(label.clone());
        }
        Self::with_text_surface(config, host, text)
    }
}

impl<V, H, T> Select<V, H, T>
where
    V: Clone + PartialEq + Display,
    H: Host,
    T: TextSurface,
{
    /// Build a select around a caller-supplied text surface.
    ///
    /// All state is created empty first; the initial options are then
    /// applied, immediately or as soon as a deferred loader resolves.
    pub fn with_text_surface(config: SelectConfig<V>, host: H, text: T) -> Self {
        let SelectConfig {
            settings,
            initial_options,
            initial_value,
            events,
        } = config;

        let mut select = Self {
            host,
            text,
            option_list: None,
            settings,
            events,
            is_open: false,
            option_data_list: Vec::new(),
            selected_option_uuid: None,
            value: None,
            baseline: None,
            dirty: false,
            unavailable_value_shown: false,
            search_string: None,
            click_listener: None,
            resize_listener: None,
            pending: None,
            deferred_initial_value: None,
            load_state: LoadState::Ready,
            bounds: Rect::default(),
            unavailable_color: Color::rgb(0.86, 0.21, 0.27),
        };

        match initial_options {
            InitialOptions::Immediate(list) => select.apply_initial(initial_value, list),
            InitialOptions::Deferred(loader) => {
                let (completion, pending) = channel();
                select.pending = Some(pending);
                select.deferred_initial_value = initial_value;
                select.load_state = LoadState::Pending;
                loader(completion);
                // Loaders that resolve synchronously are applied right away.
                let _ = select.poll_load();
            }
        }
        select
    }

    // ---------------------------------------------------------------------
    // Observables
    // ---------------------------------------------------------------------

    /// Whether the panel is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Uuid of the option matching the value, if any.
    #[must_use]
    pub fn selected_option_uuid(&self) -> Option<&str> {
        self.selected_option_uuid.as_deref()
    }

    /// Current candidate options.
    #[must_use]
    pub fn option_data_list(&self) -> &[OptionData<V>] {
        &self.option_data_list
    }

    /// Whether the value has diverged from the value at the last reset.
    ///
    /// Sticky: returning to the baseline value keeps the select dirty until
    /// the next [`Select::reset_dirtiness`].
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether the unavailable value marker is shown.
    #[must_use]
    pub const fn is_unavailable_value_shown(&self) -> bool {
        self.unavailable_value_shown
    }

    /// Caret glyph for the expand button.
    #[must_use]
    pub const fn caret(&self) -> &'static str {
        if self.is_open {
            CARET_OPEN
        } else {
            CARET_CLOSED
        }
    }

    /// Search string being typed, if a search is in progress.
    #[must_use]
    pub fn search_string(&self) -> Option<&str> {
        self.search_string.as_deref()
    }

    /// Uuids of the rows currently shown in the panel.
    #[must_use]
    pub fn visible_option_uuids(&self) -> Vec<&str> {
        self.option_list
            .as_ref()
            .filter(|list| list.is_shown())
            .map(OptionList::visible_uuids)
            .unwrap_or_default()
    }

    /// Rectangle of the shown panel.
    #[must_use]
    pub fn panel_rect(&self) -> Option<Rect> {
        self.option_list
            .as_ref()
            .filter(|list| list.is_shown())
            .and_then(OptionList::panel_rect)
    }

    /// Rectangle of the expand button.
    #[must_use]
    pub fn expand_button_rect(&self) -> Rect {
        let input = self.text.input_rect();
        let side = input.height.min(input.width);
        Rect::new(input.right() - side, input.y, side, side)
    }

    /// Progress of the initial options.
    #[must_use]
    pub const fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Settings the select was built with.
    #[must_use]
    pub const fn settings(&self) -> &SelectSettings {
        &self.settings
    }

    /// The text surface.
    #[must_use]
    pub const fn text_surface(&self) -> &T {
        &self.text
    }

    /// The option list, once created by the first open.
    #[must_use]
    pub const fn option_list(&self) -> Option<&OptionList<H::Panel>> {
        self.option_list.as_ref()
    }

    /// The host.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // ---------------------------------------------------------------------
    // Open / close
    // ---------------------------------------------------------------------

    /// Open the panel. No-op if already open.
    pub fn open(&mut self) {
        if self.is_open {
            return;
        }
        self.is_open = true;

        if self.option_list.is_none() {
            let panel = self.host.create_panel();
            self.option_list = Some(OptionList::new(
                panel,
                &self.option_data_list,
                self.row_metrics(),
            ));
        }
        if let Some(list) = self.option_list.as_mut() {
            list.update_option_data_list(&self.option_data_list);
            list.set_selected_option(self.selected_option_uuid.as_deref());
        }
        self.update_panel_rect();
        if let (Some(list), Some(uuid)) = (
            self.option_list.as_mut(),
            self.selected_option_uuid.as_deref(),
        ) {
            list.scroll_into_view(uuid);
        }
        self.add_listeners();
        tracing::debug!(options = self.option_data_list.len(), "select opened");
    }

    /// Close the panel, cancelling any search. No-op if already closed.
    pub fn close(&mut self) {
        if !self.is_open {
            return;
        }
        self.end_search();
        self.is_open = false;
        self.remove_listeners();
        if let Some(list) = self.option_list.as_mut() {
            list.hide();
        }
        tracing::debug!("select closed");
    }

    /// Open if closed, close if open.
    pub fn toggle(&mut self) {
        if self.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    // ---------------------------------------------------------------------
    // Value
    // ---------------------------------------------------------------------

    /// Take the current value as the clean baseline.
    pub fn reset_dirtiness(&mut self) {
        self.baseline.clone_from(&self.value);
        self.dirty = false;
        self.text.reset_dirtiness();
    }

    /// Set the value.
    ///
    /// Links to the first option with an equal value. A value without such an
    /// option is kept anyway and handled per
    /// [`UnavailableValueHandling`].
    pub fn set_value(&mut self, value: V) {
        self.apply_value(Some(value));
    }

    /// Clear the value.
    pub fn clear_value(&mut self) {
        self.apply_value(None);
    }

    /// Set the value to the option with `uuid`. Unknown uuids are ignored.
    pub fn set_value_by_option_uuid(&mut self, uuid: &str) {
        let Some(option) = self.find_by_uuid(uuid).cloned() else {
            tracing::trace!(uuid, "no option with uuid");
            return;
        };
        self.link(option);
    }

    // ---------------------------------------------------------------------
    // Candidate options
    // ---------------------------------------------------------------------

    /// Replace every option. Later duplicates of a uuid are dropped.
    ///
    /// A rendered panel is not refreshed until the next open.
    pub fn set_options(&mut self, options: Vec<OptionData<V>>) {
        self.option_data_list = dedupe_by_uuid(options);
        self.reconcile_selection();
    }

    /// Append an option, or replace the option with the same uuid in place.
    pub fn add_option(&mut self, option: OptionData<V>) {
        match self
            .option_data_list
            .iter_mut()
            .find(|o| o.uuid == option.uuid)
        {
            Some(existing) => *existing = option,
            None => self.option_data_list.push(option),
        }
        self.reconcile_selection();
    }

    /// Remove the option with `uuid`. Unknown uuids are ignored.
    pub fn remove_option_by_uuid(&mut self, uuid: &str) {
        if let Some(index) = self.option_data_list.iter().position(|o| o.uuid == uuid) {
            self.option_data_list.remove(index);
            self.reconcile_selection();
        }
    }

    /// Remove the first option with an equal value. Unknown values are ignored.
    pub fn remove_option_by_value(&mut self, value: &V) {
        if let Some(index) = self.option_data_list.iter().position(|o| &o.value == value) {
            self.option_data_list.remove(index);
            self.reconcile_selection();
        }
    }

    // ---------------------------------------------------------------------
    // Loading
    // ---------------------------------------------------------------------

    /// Apply the deferred loader's result if it has resolved.
    ///
    /// Called at the start of every [`Widget::event`]; hosts that resolve
    /// loaders outside of input handling call it directly.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::LoadFailed`] when the loader failed. The error
    /// is also passed to `on_load_error`, and nothing but
    /// [`Select::load_state`] changes.
    pub fn poll_load(&mut self) -> Result<(), SelectError> {
        let Some(result) = self.pending.as_ref().and_then(PendingLoad::take) else {
            return Ok(());
        };
        self.pending = None;

        match result {
            Ok(loaded) => {
                let (loaded_value, list) = loaded.into_parts();
                let configured = self.deferred_initial_value.take();
                let initial_value = loaded_value.or(configured);
                self.apply_initial(initial_value, list);
                self.load_state = LoadState::Ready;
                tracing::debug!(options = self.option_data_list.len(), "options loaded");
                Ok(())
            }
            Err(message) => {
                tracing::warn!(%message, "failed to load options");
                self.load_state = LoadState::Failed(message.clone());
                let err = SelectError::LoadFailed(message);
                if let Some(handler) = self.events.on_load_error.as_mut() {
                    handler(&err);
                }
                Err(err)
            }
        }
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn row_metrics(&self) -> RowMetrics {
        RowMetrics {
            row_height: self.settings.row_height,
            min_width: self.settings.min_width,
            ..RowMetrics::default()
        }
    }

    fn find_by_uuid(&self, uuid: &str) -> Option<&OptionData<V>> {
        self.option_data_list.iter().find(|o| o.uuid == uuid)
    }

    fn find_by_value(&self, value: &V) -> Option<&OptionData<V>> {
        self.option_data_list.iter().find(|o| &o.value == value)
    }

    fn apply_initial(&mut self, initial_value: Option<V>, options: Vec<OptionData<V>>) {
        self.option_data_list = dedupe_by_uuid(options);
        self.apply_value(initial_value);
        self.reset_dirtiness();
    }

    fn apply_value(&mut self, value: Option<V>) {
        if let Some(option) = value.as_ref().and_then(|v| self.find_by_value(v)).cloned() {
            self.link(option);
            return;
        }

        let text = value.as_ref().map(ToString::to_string).unwrap_or_default();
        self.unavailable_value_shown = value.is_some()
            && self.settings.unavailable_value_handling == UnavailableValueHandling::ErrorMessage;
        self.value = value;
        self.mark_dirty();
        self.selected_option_uuid = None;
        self.text.set_text(&text);
        if let Some(list) = self.option_list.as_mut() {
            list.set_selected_option(None);
        }
    }

    fn link(&mut self, option: OptionData<V>) {
        self.text.set_text(&option.display_name);
        if let Some(list) = self.option_list.as_mut() {
            list.set_selected_option(Some(&option.uuid));
        }
        self.unavailable_value_shown = false;
        self.selected_option_uuid = Some(option.uuid);
        self.value = Some(option.value);
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        if self.value != self.baseline {
            self.dirty = true;
        }
    }

    /// Restore the invariant between value, selected uuid and candidates
    /// after the candidate list changed.
    fn reconcile_selection(&mut self) {
        let still_linked = self
            .selected_option_uuid
            .as_deref()
            .and_then(|uuid| self.find_by_uuid(uuid))
            .is_some_and(|o| Some(&o.value) == self.value.as_ref());

        if !still_linked {
            match self.value.as_ref().and_then(|v| self.find_by_value(v)).cloned() {
                Some(option) => {
                    self.selected_option_uuid = Some(option.uuid);
                    self.unavailable_value_shown = false;
                }
                None => {
                    self.selected_option_uuid = None;
                    self.unavailable_value_shown = self.value.is_some()
                        && self.settings.unavailable_value_handling
                            == UnavailableValueHandling::ErrorMessage;
                }
            }
        }
        // A replaced option may carry a new display name.
        if self.search_string.is_none() {
            self.render_current();
        }
    }

    fn render_current(&mut self) {
        let text = match self.selected_option_uuid.as_deref().and_then(|u| self.find_by_uuid(u)) {
            Some(option) => option.display_name.clone(),
            None => self.value.as_ref().map(ToString::to_string).unwrap_or_default(),
        };
        self.text.set_text(&text);
    }

    fn search(&mut self, search: String) {
        if !self.is_open {
            self.open();
        }
        tracing::debug!(%search, "searching options");
        self.search_string = Some(search);

        let matching = search_by_display_name(&self.option_data_list, self.search_string.as_deref());
        if let Some(list) = self.option_list.as_mut() {
            list.update_option_data_list(matching);
            list.set_selected_option(self.selected_option_uuid.as_deref());
        }
        self.update_panel_rect();
    }

    /// Cancel a search in progress, reverting the text to the current value.
    fn end_search(&mut self) {
        if self.search_string.take().is_some() {
            self.render_current();
        }
    }

    fn pick(&mut self, uuid: &str) -> Option<ValueChanged<V>> {
        let option = self.find_by_uuid(uuid).cloned()?;
        self.set_value_by_option_uuid(uuid);
        tracing::debug!(uuid, "option picked");
        if let Some(handler) = self.events.on_value_change.as_mut() {
            handler(&option.value);
        }
        self.close();
        Some(ValueChanged {
            value: option.value,
            option_uuid: option.uuid,
        })
    }

    fn update_panel_rect(&mut self) {
        let bounding = Rect::from_size(self.host.viewport()).inset(self.settings.viewport_margin);
        let anchor = self.bounds;
        if let Some(list) = self.option_list.as_mut() {
            list.show();
            list.clear_size();
            let rect = determine_rect(list.natural_size(), anchor, bounding);
            list.apply_rect(rect);
            tracing::trace!(?rect, "panel placed");
        }
    }

    fn add_listeners(&mut self) {
        self.remove_listeners();
        let delay = Duration::from_millis(self.settings.click_listener_delay_ms);
        self.click_listener = Some(self.host.subscribe(ListenerKind::DocumentClick, delay));
        self.resize_listener = Some(self.host.subscribe(ListenerKind::WindowResize, Duration::ZERO));
    }

    fn remove_listeners(&mut self) {
        if let Some(id) = self.click_listener.take() {
            self.host.unsubscribe(id);
        }
        if let Some(id) = self.resize_listener.take() {
            self.host.unsubscribe(id);
        }
    }

    fn is_armed(&self, listener: Option<ListenerId>) -> bool {
        listener.is_some_and(|id| self.host.is_armed(id))
    }

    fn on_mouse_down(&mut self, position: Point, event: &Event) -> Option<ValueChanged<V>> {
        let in_button = self.expand_button_rect().contains_point(&position);

        if !self.is_open {
            if in_button {
                self.open();
                return None;
            }
            let was_focused = self.text.is_focused();
            self.text.event(event);
            if !was_focused && self.text.is_focused() && self.settings.open_on_input_focus {
                self.open();
            }
            return None;
        }

        // The click that opened the panel must not close it again.
        if !self.is_armed(self.click_listener) {
            if !in_button {
                self.text.event(event);
            }
            return None;
        }

        if in_button {
            self.close();
            return None;
        }
        if self.text.input_rect().contains_point(&position) {
            self.text.event(event);
            return None;
        }
        if let Some(OptionPicked { uuid }) = self.option_list.as_mut().and_then(|l| l.event(event)) {
            return self.pick(&uuid);
        }
        if self
            .option_list
            .as_ref()
            .is_some_and(|l| l.contains_point(&position))
        {
            return None;
        }

        self.text.event(event);
        self.close();
        None
    }
}

impl<V, H, T> Widget for Select<V, H, T>
where
    V: Clone + PartialEq + Display,
    H: Host,
    T: TextSurface,
{
    type Message = ValueChanged<V>;

    fn measure(&self, constraints: Constraints) -> Size {
        self.text.measure(constraints)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        self.text.layout(bounds);
        if self.is_open {
            self.update_panel_rect();
        }
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        self.text.paint(canvas);

        if self.unavailable_value_shown {
            canvas.stroke_rect(self.text.input_rect(), self.unavailable_color, 2.0);
        }

        let button = self.expand_button_rect();
        let style = TextStyle::default();
        let caret_position = Point::new(
            button.x + (button.width - style.estimate_width(self.caret())) / 2.0,
            button.y + (button.height - style.size) / 2.0,
        );
        canvas.draw_text(self.caret(), caret_position, &style);

        if self.is_open {
            if let Some(list) = &self.option_list {
                list.paint(canvas);
            }
        }
    }

    fn event(&mut self, event: &Event) -> Option<Self::Message> {
        // Load errors already went to `on_load_error`.
        let _ = self.poll_load();

        match event {
            Event::MouseDown { position, .. } => self.on_mouse_down(*position, event),
            Event::FocusIn => {
                self.text.event(event);
                if self.settings.open_on_input_focus {
                    self.open();
                }
                None
            }
            Event::FocusOut => {
                self.text.event(event);
                None
            }
            Event::TextInput { .. } | Event::KeyDown { .. } => {
                if let Some(TextChanged { value }) = self.text.event(event) {
                    self.search(value);
                }
                None
            }
            Event::Scroll { .. } => {
                if self.is_open {
                    if let Some(list) = self.option_list.as_mut() {
                        list.event(event);
                    }
                }
                None
            }
            Event::Resize { .. } => {
                if self.is_armed(self.resize_listener) {
                    tracing::debug!("window resized, closing select");
                    self.close();
                }
                None
            }
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn test_id(&self) -> Option<&str> {
        Some("select")
    }
}

fn dedupe_by_uuid<V>(options: Vec<OptionData<V>>) -> Vec<OptionData<V>> {
    let mut seen = HashSet::new();
    options
        .into_iter()
        .filter(|o| {
            let fresh = seen.insert(o.uuid.clone());
            if !fresh {
                tracing::warn!(uuid = %o.uuid, "duplicate option uuid dropped");
            }
            fresh
        })
        .collect()
}
