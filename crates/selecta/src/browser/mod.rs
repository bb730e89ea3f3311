//! Browser bindings for the select engine.
//!
//! The DOM host and panel are only compiled for `wasm32`; the conversions
//! they rely on are plain Rust and available everywhere.

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod dom;

// Cross-platform modules
pub mod events;
pub mod style;

#[cfg(target_arch = "wasm32")]
pub use dom::{install_panic_hook, BrowserHost, DomPanel};
pub use events::{click_event, resize_event};
pub use style::{
    panel_base_style, rect_style, row_class, row_style, PANEL_CLASS, ROW_CLASS, SELECTED_CLASS,
    UUID_ATTRIBUTE,
};
