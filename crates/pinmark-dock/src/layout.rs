// License: MIT
//
// Where each control sits inside the widget, for every display size.
// Built once per dock position so painting is pure lookup.

use pinmark_core::{Point, Rect};

use crate::edge::{DockPosition, Edge};

pub const WIDGET_W: i32 = 150;
pub const WIDGET_H: i32 = 150;

/// Press radius around the widget centre that starts a drag.
pub const STAR_RADIUS: i32 = 25;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Capture,
    History,
    More,
}

impl Control {
    pub const ALL: [Control; 3] = [Control::Capture, Control::History, Control::More];

    pub fn index(self) -> usize {
        match self {
            Control::Capture => 0,
            Control::History => 1,
            Control::More => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Control::Capture => "capture",
            Control::History => "history",
            Control::More => "more",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlSize {
    Large,
    Medium,
    Small,
}

impl ControlSize {
    pub const ALL: [ControlSize; 3] = [ControlSize::Large, ControlSize::Medium, ControlSize::Small];

    pub fn index(self) -> usize {
        match self {
            ControlSize::Large => 0,
            ControlSize::Medium => 1,
            ControlSize::Small => 2,
        }
    }

    /// Icon edge length in pixels.
    pub fn pixels(self) -> i32 {
        match self {
            ControlSize::Large => 40,
            ControlSize::Medium => 30,
            ControlSize::Small => 20,
        }
    }

    /// Distance from the widget centre to the icon centre.
    pub fn radius(self) -> i32 {
        match self {
            ControlSize::Large => 55,
            ControlSize::Medium => 55,
            ControlSize::Small => 45,
        }
    }

    /// `radius * √2 / 2`, rounded: both axis components of a 45° placement.
    pub fn diagonal(self) -> i32 {
        (self.radius() as f64 * std::f64::consts::SQRT_2 / 2.0).round() as i32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutTable {
    position: DockPosition,
    /// `[control][size]` top-left corner of the icon, widget-relative.
    offsets: [[Point; 3]; 3],
}

impl LayoutTable {
    pub fn compute(position: DockPosition) -> Self {
        // Inward normal of the docked edge, and the axis running along it.
        let (normal, along) = match position.edge {
            Edge::Top => ((0, 1), (1, 0)),
            Edge::Bottom => ((0, -1), (1, 0)),
            Edge::Left => ((1, 0), (0, 1)),
            Edge::Right => ((-1, 0), (0, 1)),
        };

        let mut offsets = [[Point::default(); 3]; 3];
        for size in ControlSize::ALL {
            let px = size.pixels();
            let base = Point::new(WIDGET_W / 2 - px / 2, WIDGET_H / 2 - px / 2);
            let r = size.radius();
            let d = size.diagonal();

            let side = |sign: i32| {
                base.offset(
                    normal.0 * d + sign * along.0 * d,
                    normal.1 * d + sign * along.1 * d,
                )
            };

            offsets[Control::Capture.index()][size.index()] = side(-1);
            offsets[Control::History.index()][size.index()] = base.offset(normal.0 * r, normal.1 * r);
            offsets[Control::More.index()][size.index()] = side(1);
        }

        Self { position, offsets }
    }

    pub fn position(&self) -> DockPosition {
        self.position
    }

    /// Rebuild only when the dock actually moved.
    pub fn is_current_for(&self, position: DockPosition) -> bool {
        self.position == position
    }

    pub fn offset(&self, control: Control, size: ControlSize) -> Point {
        self.offsets[control.index()][size.index()]
    }

    pub fn bounds(&self, control: Control, size: ControlSize) -> Rect {
        let o = self.offset(control, size);
        Rect::new(o.x, o.y, size.pixels(), size.pixels())
    }

    /// Control whose large-size box contains `p`, checked in control order.
    pub fn control_at(&self, p: Point) -> Option<Control> {
        Control::ALL
            .into_iter()
            .find(|c| self.bounds(*c, ControlSize::Large).contains(p))
    }
}

/// True when `p` (widget-relative) lies strictly inside the star's drag zone.
pub fn in_star_zone(p: Point) -> bool {
    let cx = WIDGET_W as f64 / 2.0;
    let cy = WIDGET_H as f64 / 2.0;
    let dx = cx - p.x as f64;
    let dy = cy - p.y as f64;
    dx * dx + dy * dy < (STAR_RADIUS * STAR_RADIUS) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(edge: Edge) -> LayoutTable {
        LayoutTable::compute(DockPosition { edge, offset: 500 })
    }

    #[test]
    fn diagonals_match_rounded_radius() {
        assert_eq!(ControlSize::Large.diagonal(), 39);
        assert_eq!(ControlSize::Medium.diagonal(), 39);
        assert_eq!(ControlSize::Small.diagonal(), 32);
    }

    #[test]
    fn top_edge_fans_controls_downward() {
        let t = table(Edge::Top);
        assert_eq!(t.offset(Control::Capture, ControlSize::Large), Point::new(16, 94));
        assert_eq!(t.offset(Control::History, ControlSize::Large), Point::new(55, 110));
        assert_eq!(t.offset(Control::More, ControlSize::Large), Point::new(94, 94));
        assert_eq!(t.offset(Control::History, ControlSize::Small), Point::new(65, 110));
        assert_eq!(t.offset(Control::Capture, ControlSize::Medium), Point::new(21, 99));
    }

    #[test]
    fn bottom_mirrors_top_vertically() {
        let t = table(Edge::Bottom);
        assert_eq!(t.offset(Control::Capture, ControlSize::Large), Point::new(16, 16));
        assert_eq!(t.offset(Control::History, ControlSize::Large), Point::new(55, 0));
        assert_eq!(t.offset(Control::More, ControlSize::Large), Point::new(94, 16));
    }

    #[test]
    fn side_edges_swap_axis_roles() {
        let left = table(Edge::Left);
        assert_eq!(left.offset(Control::Capture, ControlSize::Large), Point::new(94, 16));
        assert_eq!(left.offset(Control::History, ControlSize::Large), Point::new(110, 55));
        assert_eq!(left.offset(Control::More, ControlSize::Large), Point::new(94, 94));

        let right = table(Edge::Right);
        assert_eq!(right.offset(Control::Capture, ControlSize::Large), Point::new(16, 16));
        assert_eq!(right.offset(Control::History, ControlSize::Large), Point::new(0, 55));
        assert_eq!(right.offset(Control::More, ControlSize::Large), Point::new(16, 94));
    }

    #[test]
    fn hit_test_uses_large_boxes() {
        let t = table(Edge::Top);
        let o = t.offset(Control::More, ControlSize::Large);
        assert_eq!(t.control_at(o.offset(1, 1)), Some(Control::More));
        assert_eq!(t.control_at(o.offset(41, 1)), None);
    }

    #[test]
    fn star_zone_is_a_strict_circle() {
        assert!(in_star_zone(Point::new(75, 75)));
        assert!(in_star_zone(Point::new(75, 51)));
        assert!(!in_star_zone(Point::new(75, 50)));
        assert!(!in_star_zone(Point::new(95, 95)));
    }

    #[test]
    fn table_tracks_position_changes() {
        let p = DockPosition { edge: Edge::Left, offset: 300 };
        let t = LayoutTable::compute(p);
        assert!(t.is_current_for(p));
        assert!(!t.is_current_for(DockPosition { edge: Edge::Left, offset: 301 }));
    }
}
