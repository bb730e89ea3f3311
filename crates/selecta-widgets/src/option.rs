//! Option data and the rows that render it.

use serde::{Deserialize, Serialize};

/// A selectable option.
///
/// Options are immutable once created; the engine replaces them wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionData<V> {
    /// Unique, stable identity
    pub uuid: String,
    /// Label shown in the option list and the text surface
    pub display_name: String,
    /// Value compared against the select's current value
    pub value: V,
}

impl<V> OptionData<V> {
    /// Create a new option.
    #[must_use]
    pub fn new(uuid: impl Into<String>, display_name: impl Into<String>, value: V) -> Self {
        Self {
            uuid: uuid.into(),
            display_name: display_name.into(),
            value,
        }
    }

    /// Case-insensitive substring match of the display name.
    ///
    /// An empty search matches everything.
    #[must_use]
    pub fn matches_search(&self, search: &str) -> bool {
        search.is_empty()
            || self
                .display_name
                .to_lowercase()
                .contains(&search.to_lowercase())
    }
}

/// Filter options by display name, keeping their order.
///
/// `None` or an empty search means no filtering.
pub fn search_by_display_name<'a, V>(
    options: &'a [OptionData<V>],
    search: Option<&str>,
) -> Vec<&'a OptionData<V>> {
    match search {
        Some(search) if !search.is_empty() => options
            .iter()
            .filter(|o| o.matches_search(search))
            .collect(),
        _ => options.iter().collect(),
    }
}

/// One rendered row of the option list.
///
/// Rows are looked up by the uuid of the option they render; the only state
/// they own is the visual "selected" marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    uuid: String,
    display_name: String,
    selected: bool,
}

impl OptionRow {
    /// Create an unselected row for an option.
    #[must_use]
    pub fn new<V>(data: &OptionData<V>) -> Self {
        Self {
            uuid: data.uuid.clone(),
            display_name: data.display_name.clone(),
            selected: false,
        }
    }

    /// Uuid of the rendered option.
    #[must_use]
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Text shown on the row.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Hover title; the full display name, in case the row is clipped.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.display_name
    }

    /// Mark the row as selected.
    pub fn select(&mut self) {
        self.selected = true;
    }

    /// Clear the selected marker.
    pub fn un_select(&mut self) {
        self.selected = false;
    }

    /// Whether the selected marker is set.
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countries() -> Vec<OptionData<&'static str>> {
        vec![
            OptionData::new("1", "America", "america"),
            OptionData::new("2", "UK", "uk"),
            OptionData::new("3", "Ukraine", "ukraine"),
        ]
    }

    // =========================================================================
    // OptionData Tests
    // =========================================================================

    #[test]
    fn test_option_data_new() {
        let opt = OptionData::new("1", "America", 7);
        assert_eq!(opt.uuid, "1");
        assert_eq!(opt.display_name, "America");
        assert_eq!(opt.value, 7);
    }

    #[test]
    fn test_matches_search_case_insensitive() {
        let opt = OptionData::new("2", "UK", "uk");
        assert!(opt.matches_search("uk"));
        assert!(opt.matches_search("U"));
        assert!(opt.matches_search(""));
        assert!(!opt.matches_search("usa"));
    }

    #[test]
    fn test_option_data_serde_camel_case() {
        let opt = OptionData::new("1", "America", "america".to_string());
        let json = serde_json::to_string(&opt).expect("serialize");
        assert!(json.contains("\"displayName\":\"America\""));
        let back: OptionData<String> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, opt);
    }

    // =========================================================================
    // Search Tests
    // =========================================================================

    #[test]
    fn test_search_keeps_order() {
        let options = countries();
        let found: Vec<&str> = search_by_display_name(&options, Some("uk"))
            .iter()
            .map(|o| o.uuid.as_str())
            .collect();
        assert_eq!(found, vec!["2", "3"]);
    }

    #[test]
    fn test_search_none_or_empty_returns_all() {
        let options = countries();
        assert_eq!(search_by_display_name(&options, None).len(), 3);
        assert_eq!(search_by_display_name(&options, Some("")).len(), 3);
    }

    #[test]
    fn test_search_no_match() {
        let options = countries();
        assert!(search_by_display_name(&options, Some("germany")).is_empty());
    }

    // =========================================================================
    // OptionRow Tests
    // =========================================================================

    #[test]
    fn test_option_row_select_toggle() {
        let mut row = OptionRow::new(&OptionData::new("1", "America", ()));
        assert_eq!(row.uuid(), "1");
        assert_eq!(row.title(), "America");
        assert!(!row.is_selected());

        row.select();
        assert!(row.is_selected());
        row.un_select();
        assert!(!row.is_selected());
    }
}
