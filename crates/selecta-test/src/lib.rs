//! Testing harness for Selecta select widgets.
//!
//! ```
//! use selecta_test::Harness;
//! use selecta_widgets::{OptionData, SelectConfig};
//!
//! let config = SelectConfig::new().options(vec![
//!     OptionData::new("1", "America", "america"),
//!     OptionData::new("2", "UK", "uk"),
//! ]);
//! let mut harness = Harness::new(config);
//! harness.click_expand().click_option("2");
//! harness.assert_value(Some(&"uk")).assert_closed();
//! ```

mod harness;

pub use harness::Harness;
