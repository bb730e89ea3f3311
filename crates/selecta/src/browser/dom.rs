//! DOM-backed panel surface and host.

use super::events::{click_event, resize_event};
use super::style::{
    panel_base_style, rect_style, row_class, row_style, PANEL_CLASS, UUID_ATTRIBUTE,
};
use selecta_core::{Event, Host, ListenerId, ListenerKind, Rect, Size, Surface, SurfaceRow};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, MouseEvent, Window};

/// Route panics to the browser console.
pub fn install_panic_hook() {
    console_error_panic_hook::set_once();
}

/// A `div` attached to `document.body` and positioned with inline styles.
///
/// Each option is rendered as a child `div` carrying the option's uuid in a
/// `uuid` attribute, its display name as text and title, and the `selected`
/// class while highlighted. The panel scrolls natively; the engine reads the
/// scroll position back from the element.
#[derive(Debug)]
pub struct DomPanel {
    document: Document,
    element: Option<HtmlElement>,
    rows: Vec<(String, HtmlElement)>,
    attached: bool,
    rect: Option<Rect>,
}

impl DomPanel {
    fn new(document: Document) -> Self {
        let element = document
            .create_element("div")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        match &element {
            Some(el) => {
                el.set_class_name(PANEL_CLASS);
                for (property, value) in panel_base_style() {
                    let _ = el.style().set_property(property, value);
                }
            }
            None => tracing::warn!("could not create panel element"),
        }
        Self {
            document,
            element,
            rows: Vec::new(),
            attached: false,
            rect: None,
        }
    }

    fn row_element(&self, row: &SurfaceRow, row_height: f32) -> Option<HtmlElement> {
        let el = self
            .document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        let _ = el.set_attribute(UUID_ATTRIBUTE, &row.uuid);
        el.set_class_name(&row_class(row.selected));
        el.set_title(&row.label);
        el.set_text_content(Some(&row.label));
        let style = el.style();
        for (property, value) in row_style(row_height) {
            let _ = style.set_property(property, &value);
        }
        Some(el)
    }

    /// The panel element, if it could be created.
    pub fn element(&self) -> Option<&HtmlElement> {
        self.element.as_ref()
    }

    /// The row element rendering `uuid`.
    pub fn row_element_of(&self, uuid: &str) -> Option<&HtmlElement> {
        self.rows
            .iter()
            .find(|(id, _)| id == uuid)
            .map(|(_, el)| el)
    }
}

impl Surface for DomPanel {
    fn attach(&mut self) {
        if self.attached {
            return;
        }
        if let (Some(body), Some(el)) = (self.document.body(), &self.element) {
            if body.append_child(el).is_ok() {
                self.attached = true;
            }
        }
    }

    fn detach(&mut self) {
        if let Some(el) = &self.element {
            el.remove();
        }
        self.attached = false;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn apply_rect(&mut self, rect: Rect) {
        if let Some(el) = &self.element {
            let style = el.style();
            for (property, value) in rect_style(rect) {
                let _ = style.set_property(property, &value);
            }
        }
        self.rect = Some(rect);
    }

    fn clear_size(&mut self) {
        if let Some(el) = &self.element {
            let style = el.style();
            let _ = style.remove_property("width");
            let _ = style.remove_property("height");
        }
    }

    fn rect(&self) -> Option<Rect> {
        self.rect
    }

    fn render_rows(&mut self, rows: &[SurfaceRow], row_height: f32) {
        let Some(panel) = self.element.clone() else {
            return;
        };
        for (_, el) in self.rows.drain(..) {
            el.remove();
        }
        for row in rows {
            match self.row_element(row, row_height) {
                Some(el) => {
                    if panel.append_child(&el).is_ok() {
                        self.rows.push((row.uuid.clone(), el));
                    }
                }
                None => tracing::warn!(uuid = %row.uuid, "could not create row element"),
            }
        }
        panel.set_scroll_top(0);
    }

    fn set_row_selected(&mut self, uuid: &str, selected: bool) {
        if let Some((_, el)) = self.rows.iter().find(|(id, _)| id == uuid) {
            el.set_class_name(&row_class(selected));
        }
    }

    fn scroll_offset(&self) -> f32 {
        self.element
            .as_ref()
            .map_or(0.0, |el| el.scroll_top() as f32)
    }

    fn set_scroll_offset(&mut self, offset: f32) {
        if let Some(el) = &self.element {
            el.set_scroll_top(offset.round() as i32);
        }
    }
}

struct Registration {
    target: EventTarget,
    event_type: &'static str,
    listener: Closure<dyn FnMut(web_sys::Event)>,
    arm_timer: Option<(i32, Closure<dyn FnMut()>)>,
    armed: Rc<Cell<bool>>,
}

/// Host backed by the browser window.
///
/// Document clicks and window resizes seen by an armed listener are queued;
/// the embedding feeds [`BrowserHost::drain_events`] into
/// [`Widget::event`](selecta_core::Widget::event).
pub struct BrowserHost {
    window: Window,
    document: Document,
    next_id: u64,
    listeners: HashMap<ListenerId, Registration>,
    queue: Rc<RefCell<VecDeque<Event>>>,
}

impl BrowserHost {
    /// Create a host for the current window, if there is one.
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self {
            window,
            document,
            next_id: 0,
            listeners: HashMap::new(),
            queue: Rc::new(RefCell::new(VecDeque::new())),
        })
    }

    /// Take every queued event.
    pub fn drain_events(&self) -> Vec<Event> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// On-screen rectangle of an element, for laying out a select.
    pub fn element_rect(element: &Element) -> Rect {
        let r = element.get_bounding_client_rect();
        Rect::new(r.x() as f32, r.y() as f32, r.width() as f32, r.height() as f32)
    }

    fn listener(&self, kind: ListenerKind, armed: Rc<Cell<bool>>) -> Closure<dyn FnMut(web_sys::Event)> {
        let queue = Rc::clone(&self.queue);
        let window = self.window.clone();
        Closure::new(move |e: web_sys::Event| {
            if !armed.get() {
                return;
            }
            let event = match kind {
                ListenerKind::DocumentClick => match e.dyn_ref::<MouseEvent>() {
                    Some(m) => click_event(f64::from(m.client_x()), f64::from(m.client_y()), m.button()),
                    None => return,
                },
                ListenerKind::WindowResize => resize_event(
                    window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
                    window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
                ),
            };
            queue.borrow_mut().push_back(event);
        })
    }
}

impl Host for BrowserHost {
    type Panel = DomPanel;

    fn viewport(&self) -> Size {
        let width = self.window.inner_width().ok().and_then(|v| v.as_f64());
        let height = self.window.inner_height().ok().and_then(|v| v.as_f64());
        Size::new(width.unwrap_or(0.0) as f32, height.unwrap_or(0.0) as f32)
    }

    fn create_panel(&mut self) -> Self::Panel {
        DomPanel::new(self.document.clone())
    }

    fn subscribe(&mut self, kind: ListenerKind, delay: Duration) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;

        let (target, event_type): (EventTarget, &'static str) = match kind {
            ListenerKind::DocumentClick => (self.document.clone().into(), "click"),
            ListenerKind::WindowResize => (self.window.clone().into(), "resize"),
        };
        let armed = Rc::new(Cell::new(delay.is_zero()));
        let listener = self.listener(kind, Rc::clone(&armed));
        if let Err(err) =
            target.add_event_listener_with_callback(event_type, listener.as_ref().unchecked_ref())
        {
            tracing::warn!(?err, event_type, "failed to add listener");
        }

        let arm_timer = if delay.is_zero() {
            None
        } else {
            let flag = Rc::clone(&armed);
            let arm: Closure<dyn FnMut()> = Closure::new(move || flag.set(true));
            let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
            self.window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    arm.as_ref().unchecked_ref(),
                    millis,
                )
                .ok()
                .map(|handle| (handle, arm))
        };

        self.listeners.insert(
            id,
            Registration {
                target,
                event_type,
                listener,
                arm_timer,
                armed,
            },
        );
        tracing::trace!(?id, ?kind, ?delay, "listener subscribed");
        id
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        let Some(registration) = self.listeners.remove(&id) else {
            return;
        };
        let function: &js_sys::Function = registration.listener.as_ref().unchecked_ref();
        let _ = registration
            .target
            .remove_event_listener_with_callback(registration.event_type, function);
        if let Some((handle, _)) = registration.arm_timer {
            self.window.clear_timeout_with_handle(handle);
        }
        tracing::trace!(?id, "listener unsubscribed");
    }

    fn is_armed(&self, id: ListenerId) -> bool {
        self.listeners.get(&id).is_some_and(|r| r.armed.get())
    }
}
