// License: MIT

use pinmark_core::Point;

use crate::edge::{DockPosition, Edge, ScreenSize};
use crate::layout::{WIDGET_H, WIDGET_W};

/// Top-left corner for a `width`×`height` window opened from the dock: just
/// beyond the widget's visible half, centred on it along the border, and
/// kept half a widget away from every screen edge.
pub fn position_next_to_dock(
    position: DockPosition,
    screen: ScreenSize,
    width: i32,
    height: i32,
) -> Point {
    let half_w = WIDGET_W / 2;
    let half_h = WIDGET_H / 2;
    let centre = position.centre(screen);

    let (x, y) = match position.edge {
        Edge::Top => (centre.x - width / 2, half_h),
        Edge::Left => (half_w, centre.y - height / 2),
        Edge::Right => (screen.width - half_w - width, centre.y - height / 2),
        Edge::Bottom => (centre.x - width / 2, screen.height - half_h - height),
    };

    // max-then-min: oversized windows end up pinned to the far margin.
    Point::new(
        x.max(half_w).min(screen.width - width - half_w),
        y.max(half_h).min(screen.height - height - half_h),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const FHD: ScreenSize = ScreenSize::new(1920, 1080);

    #[test]
    fn below_a_top_dock() {
        let p = position_next_to_dock(DockPosition { edge: Edge::Top, offset: 960 }, FHD, 400, 300);
        assert_eq!(p, Point::new(760, 75));
    }

    #[test]
    fn beside_side_docks() {
        let left = position_next_to_dock(DockPosition { edge: Edge::Left, offset: 540 }, FHD, 400, 300);
        assert_eq!(left, Point::new(75, 390));

        let right = position_next_to_dock(DockPosition { edge: Edge::Right, offset: 540 }, FHD, 400, 300);
        assert_eq!(right, Point::new(1445, 390));
    }

    #[test]
    fn above_a_bottom_dock_near_a_corner_is_clamped() {
        let p = position_next_to_dock(DockPosition { edge: Edge::Bottom, offset: 100 }, FHD, 400, 300);
        assert_eq!(p, Point::new(75, 705));
    }
}
