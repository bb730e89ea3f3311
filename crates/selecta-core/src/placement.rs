//! Viewport-aware placement of floating panels.
//!
//! Decides where a floating panel (such as the option list of a select) goes
//! relative to the control it is anchored to, and how large it may be, given
//! a bounding rectangle it must stay inside (usually the padded viewport).
//!
//! The panel opens downwards when it fits below the anchor, upwards when it
//! only fits above, and otherwise towards whichever side has more room (ties
//! go down). When the natural size fits, the panel is flush with the anchor;
//! otherwise it is widened up to the bounding width, shifted left to avoid a
//! right overrun, and clipped vertically to the available space.
//!
//! ```
//! use selecta_core::{placement::determine_rect, Rect, Size};
//!
//! let anchor = Rect::new(0.0, 500.0, 100.0, 30.0);
//! let bounding = Rect::new(0.0, 0.0, 800.0, 600.0);
//! let rect = determine_rect(Size::new(100.0, 200.0), anchor, bounding);
//! assert_eq!(rect, Rect::new(0.0, 300.0, 100.0, 200.0));
//! ```

use crate::geometry::{Rect, Size};
use serde::{Deserialize, Serialize};

/// Which side of the anchor a panel opens towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalDirection {
    /// Above the anchor
    Up,
    /// Below the anchor
    #[default]
    Down,
}

/// Vertical room on each side of an anchor, inside a bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvailableSpace {
    /// Room between the bounding top and the anchor top
    pub up: f32,
    /// Room between the anchor bottom and the bounding bottom
    pub down: f32,
}

impl AvailableSpace {
    /// Measure the room around `anchor` inside `bounding`.
    ///
    /// Negative room (anchor poking out of the bounding rectangle) counts as none.
    #[must_use]
    pub fn around(anchor: Rect, bounding: Rect) -> Self {
        Self {
            up: (anchor.y - bounding.y).max(0.0),
            down: (bounding.bottom() - anchor.bottom()).max(0.0),
        }
    }

    /// Room in the given direction.
    #[must_use]
    pub const fn in_direction(&self, direction: VerticalDirection) -> f32 {
        match direction {
            VerticalDirection::Up => self.up,
            VerticalDirection::Down => self.down,
        }
    }

    /// Pick the direction for a panel of the given height.
    #[must_use]
    pub fn choose(&self, panel_height: f32) -> VerticalDirection {
        if self.down >= panel_height {
            VerticalDirection::Down
        } else if self.up >= panel_height {
            VerticalDirection::Up
        } else if self.down >= self.up {
            VerticalDirection::Down
        } else {
            VerticalDirection::Up
        }
    }
}

/// The chosen direction and how much height it offers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionInfo {
    /// Chosen direction
    pub direction: VerticalDirection,
    /// Room available in that direction
    pub available_height: f32,
}

impl DirectionInfo {
    /// Decide the direction for `panel_size` around `anchor`.
    #[must_use]
    pub fn determine(panel_size: Size, anchor: Rect, bounding: Rect) -> Self {
        let space = AvailableSpace::around(anchor, bounding);
        let direction = space.choose(panel_size.height);
        Self {
            direction,
            available_height: space.in_direction(direction),
        }
    }
}

/// Compute the on-screen rectangle for a floating panel.
///
/// `panel_size` is the panel's natural (unconstrained) size, `anchor` the
/// rectangle of the control it hangs from, and `bounding` the region it must
/// stay inside. The result never leaves `bounding` vertically. Horizontally
/// the width is never made narrower than the anchor, even if that overflows.
#[must_use]
pub fn determine_rect(panel_size: Size, anchor: Rect, bounding: Rect) -> Rect {
    let info = DirectionInfo::determine(panel_size, anchor, bounding);

    let rect = if panel_size.width <= anchor.width && panel_size.height <= info.available_height
    {
        flush_rect(panel_size, anchor, info.direction)
    } else {
        clipped_rect(panel_size, anchor, bounding, info)
    };

    clamp_vertically(rect, bounding)
}

/// Like [`determine_rect`], with the bounding rectangle defaulting to the
/// whole viewport.
#[must_use]
pub fn determine_rect_in(
    panel_size: Size,
    anchor: Rect,
    bounding: Option<Rect>,
    viewport: Size,
) -> Rect {
    determine_rect(
        panel_size,
        anchor,
        bounding.unwrap_or_else(|| Rect::from_size(viewport)),
    )
}

/// Natural size fits: same x and width as the anchor.
fn flush_rect(panel_size: Size, anchor: Rect, direction: VerticalDirection) -> Rect {
    let y = match direction {
        VerticalDirection::Down => anchor.bottom(),
        VerticalDirection::Up => anchor.y - panel_size.height,
    };
    Rect::new(anchor.x, y, anchor.width, panel_size.height)
}

fn clipped_rect(panel_size: Size, anchor: Rect, bounding: Rect, info: DirectionInfo) -> Rect {
    let right_overrun = (anchor.x + panel_size.width - bounding.x - bounding.width).max(0.0);
    let x = bounding.x.max(anchor.x - right_overrun);
    let width = anchor.width.max(bounding.width.min(panel_size.width));
    let height = info.available_height.min(panel_size.height);
    let y = match info.direction {
        VerticalDirection::Down => anchor.bottom(),
        VerticalDirection::Up => anchor.y - height,
    };
    Rect::new(x, y, width, height)
}

// No-op whenever the anchor itself lies inside `bounding`.
fn clamp_vertically(rect: Rect, bounding: Rect) -> Rect {
    let height = rect.height.min(bounding.height.max(0.0));
    let y = rect.y.max(bounding.y).min(bounding.bottom() - height);
    Rect::new(rect.x, y, rect.width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

    // =========================================================================
    // Direction Tests
    // =========================================================================

    #[test]
    fn test_available_space() {
        let space = AvailableSpace::around(Rect::new(0.0, 500.0, 100.0, 30.0), VIEWPORT);
        assert_eq!(space.up, 500.0);
        assert_eq!(space.down, 70.0);
    }

    #[test]
    fn test_prefers_down_when_it_fits() {
        let space = AvailableSpace { up: 500.0, down: 200.0 };
        assert_eq!(space.choose(200.0), VerticalDirection::Down);
    }

    #[test]
    fn test_falls_back_to_up_when_only_up_fits() {
        let space = AvailableSpace { up: 500.0, down: 70.0 };
        assert_eq!(space.choose(200.0), VerticalDirection::Up);
    }

    #[test]
    fn test_neither_fits_picks_larger() {
        let space = AvailableSpace { up: 120.0, down: 80.0 };
        assert_eq!(space.choose(200.0), VerticalDirection::Up);
        let space = AvailableSpace { up: 80.0, down: 120.0 };
        assert_eq!(space.choose(200.0), VerticalDirection::Down);
    }

    #[test]
    fn test_tie_resolves_down() {
        let space = AvailableSpace { up: 100.0, down: 100.0 };
        assert_eq!(space.choose(200.0), VerticalDirection::Down);
    }

    // =========================================================================
    // Fast Path Tests
    // =========================================================================

    #[test]
    fn test_fast_path_below() {
        let anchor = Rect::new(40.0, 100.0, 150.0, 30.0);
        let rect = determine_rect(Size::new(120.0, 90.0), anchor, VIEWPORT);
        assert_eq!(rect, Rect::new(40.0, 130.0, 150.0, 90.0));
    }

    #[test]
    fn test_fast_path_above() {
        let anchor = Rect::new(0.0, 500.0, 100.0, 30.0);
        let rect = determine_rect(Size::new(100.0, 200.0), anchor, VIEWPORT);
        assert_eq!(rect, Rect::new(0.0, 300.0, 100.0, 200.0));
    }

    // =========================================================================
    // Clipped Path Tests
    // =========================================================================

    #[test]
    fn test_wider_panel_keeps_anchor_x_when_no_overrun() {
        let anchor = Rect::new(100.0, 100.0, 100.0, 30.0);
        let rect = determine_rect(Size::new(250.0, 90.0), anchor, VIEWPORT);
        assert_eq!(rect, Rect::new(100.0, 130.0, 250.0, 90.0));
    }

    #[test]
    fn test_right_overrun_shifts_left() {
        let anchor = Rect::new(700.0, 100.0, 80.0, 30.0);
        let rect = determine_rect(Size::new(200.0, 90.0), anchor, VIEWPORT);
        // 700 + 200 overruns 800 by 100
        assert_eq!(rect.x, 600.0);
        assert_eq!(rect.width, 200.0);
        assert_eq!(rect.right(), 800.0);
    }

    #[test]
    fn test_shift_never_passes_bounding_left_edge() {
        let bounding = Rect::new(5.0, 5.0, 300.0, 590.0);
        let anchor = Rect::new(50.0, 100.0, 80.0, 30.0);
        let rect = determine_rect(Size::new(1000.0, 90.0), anchor, bounding);
        assert_eq!(rect.x, 5.0);
        assert_eq!(rect.width, 300.0);
    }

    #[test]
    fn test_width_never_below_anchor_width() {
        let bounding = Rect::new(0.0, 0.0, 100.0, 600.0);
        let anchor = Rect::new(0.0, 100.0, 150.0, 30.0);
        let rect = determine_rect(Size::new(160.0, 90.0), anchor, bounding);
        assert_eq!(rect.width, 150.0);
    }

    #[test]
    fn test_tall_panel_clipped_down() {
        let anchor = Rect::new(0.0, 280.0, 100.0, 30.0);
        let rect = determine_rect(Size::new(100.0, 1000.0), anchor, VIEWPORT);
        // down = 290, up = 280
        assert_eq!(rect, Rect::new(0.0, 310.0, 100.0, 290.0));
    }

    #[test]
    fn test_tall_panel_clipped_up() {
        let anchor = Rect::new(0.0, 400.0, 100.0, 30.0);
        let rect = determine_rect(Size::new(100.0, 1000.0), anchor, VIEWPORT);
        assert_eq!(rect, Rect::new(0.0, 0.0, 100.0, 400.0));
    }

    #[test]
    fn test_determine_rect_in_defaults_to_viewport() {
        let anchor = Rect::new(0.0, 500.0, 100.0, 30.0);
        let panel = Size::new(100.0, 200.0);
        let viewport = Size::new(800.0, 600.0);
        assert_eq!(
            determine_rect_in(panel, anchor, None, viewport),
            determine_rect(panel, anchor, VIEWPORT)
        );
    }

    #[test]
    fn test_anchor_below_bounding_stays_inside() {
        let bounding = Rect::new(0.0, 0.0, 800.0, 300.0);
        let anchor = Rect::new(0.0, 500.0, 100.0, 30.0);
        let rect = determine_rect(Size::new(100.0, 200.0), anchor, bounding);
        assert!(rect.y >= 0.0);
        assert!(rect.bottom() <= 300.0);
    }

    // =========================================================================
    // Property Tests
    // =========================================================================

    proptest! {
        #[test]
        fn prop_vertical_extent_within_bounding(
            pw in 0.0f32..2000.0, ph in 0.0f32..2000.0,
            ax in -200.0f32..1200.0, ay in -200.0f32..1200.0,
            aw in 0.0f32..600.0, ah in 0.0f32..200.0,
            bx in -50.0f32..50.0, by in -50.0f32..50.0,
            bw in 0.0f32..1000.0, bh in 0.0f32..1000.0,
        ) {
            let bounding = Rect::new(bx, by, bw, bh);
            let rect = determine_rect(Size::new(pw, ph), Rect::new(ax, ay, aw, ah), bounding);
            prop_assert!(rect.height >= 0.0);
            prop_assert!(rect.y >= bounding.y - 1e-3);
            prop_assert!(rect.bottom() <= bounding.bottom() + 1e-3);
        }

        #[test]
        fn prop_width_at_least_anchor_width(
            pw in 0.0f32..2000.0, ph in 0.0f32..2000.0,
            ax in 0.0f32..700.0, ay in 0.0f32..570.0,
            aw in 0.0f32..100.0, ah in 0.0f32..30.0,
        ) {
            let rect = determine_rect(Size::new(pw, ph), Rect::new(ax, ay, aw, ah), VIEWPORT);
            prop_assert!(rect.width >= aw);
        }

        #[test]
        fn prop_fitting_panel_keeps_natural_height(
            ph in 0.0f32..200.0,
            ax in 0.0f32..700.0, ay in 0.0f32..570.0,
        ) {
            // One side of a 30px anchor in a 600px viewport always has 285px.
            let anchor = Rect::new(ax, ay, 100.0, 30.0);
            let rect = determine_rect(Size::new(100.0, ph), anchor, VIEWPORT);
            prop_assert_eq!(rect.height, ph);
            prop_assert_eq!(rect.x, anchor.x);
        }
    }
}
