//! Integration tests for the select engine.
//!
//! These drive a [`Select`] through its public API only.

use selecta_core::{
    determine_rect, Event, HeadlessHost, Host, ListenerKind, Point, Rect, Size, Widget,
};
use selecta_widgets::{
    LoadState, Loaded, OptionData, Select, SelectConfig, SelectError, SelectSettings, TextSurface,
    UnavailableValueHandling,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn countries() -> Vec<OptionData<&'static str>> {
    vec![
        OptionData::new("1", "America", "america"),
        OptionData::new("2", "UK", "uk"),
    ]
}

fn country_select(settings: SelectSettings) -> Select<&'static str> {
    init_tracing();
    let config = SelectConfig::new()
        .settings(settings)
        .options(countries())
        .initial_value("america");
    let mut select = Select::new(config, HeadlessHost::new(Size::new(800.0, 600.0)));
    select.layout(Rect::new(0.0, 0.0, 200.0, 30.0));
    select
}

// =============================================================================
// Value Scenarios
// =============================================================================

#[test]
fn test_scenario_initial_value() {
    let select = country_select(SelectSettings::default());
    assert_eq!(select.value(), Some(&"america"));
    assert_eq!(select.selected_option_uuid(), Some("1"));
    assert_eq!(select.text_surface().text(), "America");
}

#[test]
fn test_scenario_set_matching_value() {
    let mut select = country_select(SelectSettings::default());
    select.set_value("uk");
    assert_eq!(select.value(), Some(&"uk"));
    assert_eq!(select.selected_option_uuid(), Some("2"));
    assert_eq!(select.text_surface().text(), "UK");
    assert!(!select.is_unavailable_value_shown());
}

#[test]
fn test_scenario_set_unavailable_value_under_each_policy() {
    for (handling, marker) in [
        (UnavailableValueHandling::ErrorMessage, true),
        (UnavailableValueHandling::Allow, false),
    ] {
        let settings = SelectSettings {
            unavailable_value_handling: handling,
            ..SelectSettings::default()
        };
        let mut select = country_select(settings);
        select.set_value("germany");

        assert_eq!(select.value(), Some(&"germany"));
        assert_eq!(select.selected_option_uuid(), None);
        assert_eq!(select.is_unavailable_value_shown(), marker, "{handling:?}");
    }
}

// =============================================================================
// Placement Scenarios
// =============================================================================

#[test]
fn test_scenario_panel_flips_up() {
    let rect = determine_rect(
        Size::new(100.0, 200.0),
        Rect::new(0.0, 500.0, 100.0, 30.0),
        Rect::new(0.0, 0.0, 800.0, 600.0),
    );
    assert_eq!(rect, Rect::new(0.0, 300.0, 100.0, 200.0));
}

#[test]
fn test_panel_stays_inside_padded_viewport() {
    let settings = SelectSettings {
        row_height: 100.0,
        ..SelectSettings::default()
    };
    let mut select = country_select(settings);
    select.set_options(
        (0..20)
            .map(|i| OptionData::new(format!("{i}"), format!("Country {i}"), "x"))
            .collect(),
    );
    select.layout(Rect::new(0.0, 250.0, 200.0, 30.0));
    select.open();

    let padded = Rect::new(5.0, 5.0, 790.0, 590.0);
    let panel = select.panel_rect().expect("panel shown");
    assert!(panel.y >= padded.y);
    assert!(panel.bottom() <= padded.bottom());
    assert!(panel.width >= 200.0);
}

// =============================================================================
// Search Scenarios
// =============================================================================

#[test]
fn test_scenario_search_and_clear() {
    let config = SelectConfig::new().options(countries());
    let mut select: Select<&str> = Select::new(config, HeadlessHost::default());
    select.layout(Rect::new(0.0, 0.0, 200.0, 30.0));
    select.event(&Event::FocusIn);

    select.event(&Event::TextInput {
        text: "uk".to_string(),
    });
    assert_eq!(select.visible_option_uuids(), vec!["2"]);

    select.event(&Event::KeyDown {
        key: selecta_core::Key::Backspace,
    });
    select.event(&Event::KeyDown {
        key: selecta_core::Key::Backspace,
    });
    assert_eq!(select.search_string(), Some(""));
    assert_eq!(select.visible_option_uuids(), vec!["1", "2"]);
}

// =============================================================================
// Lifecycle Scenarios
// =============================================================================

#[test]
fn test_every_close_path_releases_listeners() {
    let mut select = country_select(SelectSettings::default());
    let outside = Point::new(700.0, 500.0);

    // Click outside.
    select.open();
    select.host_mut().advance(Duration::from_millis(100));
    select.event(&Event::click(outside));
    assert_eq!(select.host().active_listeners(), 0);

    // Expand button.
    select.open();
    select.host_mut().advance(Duration::from_millis(100));
    select.event(&Event::click(select.expand_button_rect().center()));
    assert_eq!(select.host().active_listeners(), 0);

    // Row pick.
    select.open();
    select.host_mut().advance(Duration::from_millis(100));
    select.event(&Event::click(Point::new(10.0, 40.0)));
    assert_eq!(select.host().active_listeners(), 0);

    // Resize.
    select.open();
    select.event(&Event::Resize {
        width: 400.0,
        height: 400.0,
    });
    assert_eq!(select.host().active_listeners(), 0);
    assert!(!select.is_open());
}

#[test]
fn test_two_open_selects_hold_two_listener_pairs() {
    let mut first = country_select(SelectSettings::default());
    let mut second = country_select(SelectSettings::default());
    first.open();
    second.open();
    assert_eq!(first.host().listeners_of(ListenerKind::DocumentClick), 1);
    assert_eq!(second.host().listeners_of(ListenerKind::WindowResize), 1);
}

#[test]
fn test_settings_from_json_drive_select() {
    let settings =
        SelectSettings::from_json(r#"{"unavailableValueHandling":"ALLOW","openOnInputFocus":false}"#)
            .expect("valid settings");
    let mut select = country_select(settings);
    select.event(&Event::FocusIn);
    assert!(!select.is_open());
    select.set_value("germany");
    assert!(!select.is_unavailable_value_shown());
}

// =============================================================================
// Loading Scenarios
// =============================================================================

#[test]
fn test_load_failure_leaves_state_untouched() {
    init_tracing();
    let errors: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = Rc::clone(&errors);
    let slot = Rc::new(RefCell::new(None));
    let handle = Rc::clone(&slot);

    let config = SelectConfig::new()
        .loader(move |c| *handle.borrow_mut() = Some(c))
        .initial_value("america")
        .on_load_error(move |e| sink.borrow_mut().push(e.to_string()));
    let mut select: Select<&str> = Select::new(config, HeadlessHost::default());
    select.set_value("uk");

    if let Some(completion) = slot.borrow_mut().take() {
        completion.fail("503");
    }
    let err = select.poll_load().unwrap_err();

    assert!(matches!(err, SelectError::LoadFailed(ref m) if m == "503"));
    assert_eq!(select.load_state(), &LoadState::Failed("503".to_string()));
    assert_eq!(select.value(), Some(&"uk"));
    assert!(select.option_data_list().is_empty());
    assert_eq!(errors.borrow().len(), 1);

    // Resolved at most once.
    assert!(select.poll_load().is_ok());
    assert_eq!(errors.borrow().len(), 1);
}

#[test]
fn test_loaded_list_uses_configured_initial_value() {
    let config = SelectConfig::new()
        .loader(|c| c.complete(Loaded::List(countries())))
        .initial_value("uk");
    let select: Select<&str> = Select::new(config, HeadlessHost::default());
    assert_eq!(select.selected_option_uuid(), Some("2"));
    assert_eq!(select.text_surface().text(), "UK");
    assert!(!select.is_dirty());
}

#[test]
fn test_host_viewport_drives_bounding_rect() {
    let mut select = country_select(SelectSettings::default());
    select.host_mut().set_viewport(Size::new(300.0, 100.0));
    select.layout(Rect::new(0.0, 40.0, 200.0, 30.0));
    select.open();

    let panel = select.panel_rect().expect("panel shown");
    assert!(panel.bottom() <= select.host().viewport().height - 5.0);
}
