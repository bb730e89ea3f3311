//! Conversion of DOM event data into select events.

use selecta_core::{Event, MouseButton, Point};

/// A document click at client coordinates.
pub fn click_event(client_x: f64, client_y: f64, button: i16) -> Event {
    let button = match button {
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        _ => MouseButton::Left,
    };
    Event::MouseDown {
        position: Point::new(client_x as f32, client_y as f32),
        button,
    }
}

/// A window resize to the new inner size.
pub fn resize_event(inner_width: f64, inner_height: f64) -> Event {
    Event::Resize {
        width: inner_width as f32,
        height: inner_height as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_buttons() {
        assert_eq!(click_event(3.0, 4.0, 0), Event::click(Point::new(3.0, 4.0)));
        assert!(matches!(
            click_event(0.0, 0.0, 2),
            Event::MouseDown {
                button: MouseButton::Right,
                ..
            }
        ));
        assert!(matches!(
            click_event(0.0, 0.0, 1),
            Event::MouseDown {
                button: MouseButton::Middle,
                ..
            }
        ));
    }

    #[test]
    fn test_resize_event() {
        assert_eq!(
            resize_event(1024.0, 768.0),
            Event::Resize {
                width: 1024.0,
                height: 768.0
            }
        );
    }
}
