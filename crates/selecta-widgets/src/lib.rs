//! Widgets for the Selecta select: options, the option list panel, the text
//! surface and the select engine that ties them together.

pub mod config;
pub mod error;
pub mod loader;
pub mod option;
pub mod option_list;
pub mod select;
pub mod text_input;

pub use config::{
    LoadErrorHandler, SelectConfig, SelectEvents, SelectSettings, UnavailableValueHandling,
    ValueChangeHandler,
};
pub use error::SelectError;
pub use loader::{InitialOptions, LoadCompletion, LoadState, Loaded, Loader};
pub use option::{search_by_display_name, OptionData, OptionRow};
pub use option_list::{OptionList, OptionPicked, RowMetrics};
pub use select::{Select, ValueChanged, CARET_CLOSED, CARET_OPEN};
pub use text_input::{LabelPosition, TextChanged, TextInput, TextSurface};
