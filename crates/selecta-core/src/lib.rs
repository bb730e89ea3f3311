//! Core types and traits for the Selecta select widget.
//!
//! This crate provides the foundations the widgets are built on:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - The floating panel placement engine: [`placement`]
//! - The page environment: [`Host`], [`Surface`]
//! - Input events and the paint model: [`Event`], [`Widget`], [`Canvas`]

mod canvas;
mod color;
mod constraints;
mod event;
mod geometry;
pub mod host;
pub mod placement;
pub mod surface;
pub mod widget;

pub use canvas::{DrawCommand, RecordingCanvas};
pub use color::Color;
pub use constraints::Constraints;
pub use event::{Event, Key, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use host::{HeadlessHost, Host, ListenerId, ListenerKind};
pub use placement::{determine_rect, determine_rect_in, VerticalDirection};
pub use surface::{MemorySurface, Surface, SurfaceRow};
pub use widget::{Canvas, LayoutResult, TextStyle, Widget};
