//! Classes and inline styles written onto the panel and its rows.

use selecta_core::Rect;

/// Class set on every panel element.
pub const PANEL_CLASS: &str = "selecta-option-list";

/// Class set on every row element.
pub const ROW_CLASS: &str = "selecta-option";

/// Class added to the selected row.
pub const SELECTED_CLASS: &str = "selected";

/// Attribute carrying a row's option uuid.
pub const UUID_ATTRIBUTE: &str = "uuid";

/// Styles applied once when a panel element is created.
pub const fn panel_base_style() -> [(&'static str, &'static str); 2] {
    [("position", "fixed"), ("overflow-y", "auto")]
}

/// `left`/`top`/`width`/`height` declarations placing an element at `rect`.
pub fn rect_style(rect: Rect) -> [(&'static str, String); 4] {
    [
        ("left", px(rect.x)),
        ("top", px(rect.y)),
        ("width", px(rect.width)),
        ("height", px(rect.height)),
    ]
}

/// Class list of a row element.
pub fn row_class(selected: bool) -> String {
    if selected {
        format!("{ROW_CLASS} {SELECTED_CLASS}")
    } else {
        ROW_CLASS.to_string()
    }
}

/// Declarations giving a row element a fixed height, so rows line up with
/// the engine's hit-testing.
pub fn row_style(row_height: f32) -> [(&'static str, String); 4] {
    [
        ("box-sizing", "border-box".to_string()),
        ("height", px(row_height)),
        ("overflow", "hidden".to_string()),
        ("white-space", "nowrap".to_string()),
    ]
}

fn px(value: f32) -> String {
    format!("{value}px")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_style() {
        let style = rect_style(Rect::new(5.0, 30.5, 200.0, 64.0));
        assert_eq!(
            style,
            [
                ("left", "5px".to_string()),
                ("top", "30.5px".to_string()),
                ("width", "200px".to_string()),
                ("height", "64px".to_string()),
            ]
        );
    }

    #[test]
    fn test_row_class() {
        assert_eq!(row_class(false), "selecta-option");
        assert_eq!(row_class(true), "selecta-option selected");
    }

    #[test]
    fn test_row_style_height() {
        assert!(row_style(32.0).contains(&("height", "32px".to_string())));
    }

    #[test]
    fn test_panel_base_style_is_fixed() {
        assert!(panel_base_style().contains(&("position", "fixed")));
    }
}
