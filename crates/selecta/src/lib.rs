//! Selecta: a viewport-aware dropdown select widget engine.
//!
//! The engine is headless: a [`Select`] runs against any [`Host`] and renders
//! its option panel into the host's [`Surface`]s. On `wasm32` the
//! [`browser`] module provides a DOM-backed host.
//!
//! ```
//! use selecta::prelude::*;
//!
//! let config = SelectConfig::new()
//!     .options(vec![
//!         OptionData::new("1", "America", "america"),
//!         OptionData::new("2", "UK", "uk"),
//!     ])
//!     .initial_value("america");
//! let mut select = Select::new(config, HeadlessHost::default());
//! select.layout(Rect::new(0.0, 0.0, 200.0, 30.0));
//!
//! select.set_value("uk");
//! assert_eq!(select.selected_option_uuid(), Some("2"));
//! ```

pub mod browser;

pub use selecta_core::{
    determine_rect, determine_rect_in, Event, HeadlessHost, Host, ListenerId, ListenerKind,
    Point, Rect, Size, Surface, SurfaceRow, VerticalDirection, Widget,
};
pub use selecta_widgets::{
    InitialOptions, LabelPosition, LoadCompletion, LoadState, Loaded, OptionData, Select,
    SelectConfig, SelectError, SelectSettings, UnavailableValueHandling, ValueChanged,
};

/// Everything needed to build and drive a select.
pub mod prelude {
    pub use selecta_core::{Event, HeadlessHost, Host, Point, Rect, Size, Widget};
    pub use selecta_widgets::{
        Loaded, OptionData, Select, SelectConfig, SelectSettings, TextSurface,
        UnavailableValueHandling,
    };
}
