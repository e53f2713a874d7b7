// License: MIT
//
// Screen edges, persisted dock position and the nearest-edge snap.

use std::str::FromStr;

use eventline::debug;
use serde::{Deserialize, Serialize};

use pinmark_core::{Point, PrefStore};

/// Minimum distance kept between a docked widget and a screen corner.
pub const DEAD_ZONE: i32 = 100;

pub const PREF_BORDER: &str = "dock.border";
pub const PREF_DISTANCE_FROM_CORNER: &str = "dock.distance.from.corner";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Left,
    Bottom,
    Right,
}

impl Edge {
    pub fn as_str(self) -> &'static str {
        match self {
            Edge::Top => "TOP",
            Edge::Left => "LEFT",
            Edge::Bottom => "BOTTOM",
            Edge::Right => "RIGHT",
        }
    }

    /// Top and bottom run horizontally; the offset is an x coordinate.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Edge::Top | Edge::Bottom)
    }
}

impl FromStr for Edge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TOP" => Ok(Edge::Top),
            "LEFT" => Ok(Edge::Left),
            "BOTTOM" => Ok(Edge::Bottom),
            "RIGHT" => Ok(Edge::Right),
            other => Err(format!("unknown border \"{other}\"")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

impl ScreenSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    fn extent_along(self, edge: Edge) -> i32 {
        if edge.is_horizontal() { self.width } else { self.height }
    }
}

/// `v` pulled into `[dead_zone, extent - dead_zone]`. On screens narrower
/// than two dead zones the upper bound wins instead of panicking.
pub fn clamp_offset(v: i32, extent: i32, dead_zone: i32) -> i32 {
    v.max(dead_zone).min(extent - dead_zone)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DockPosition {
    pub edge: Edge,
    /// Distance from the edge's start corner to the widget centre.
    pub offset: i32,
}

impl DockPosition {
    /// Top border, centred.
    pub fn default_for(screen: ScreenSize) -> Self {
        Self {
            edge: Edge::Top,
            offset: screen.width / 2,
        }
    }

    /// Widget centre in screen coordinates; sits exactly on the border.
    pub fn centre(self, screen: ScreenSize) -> Point {
        match self.edge {
            Edge::Top => Point::new(self.offset, 0),
            Edge::Bottom => Point::new(self.offset, screen.height),
            Edge::Left => Point::new(0, self.offset),
            Edge::Right => Point::new(screen.width, self.offset),
        }
    }

    /// Persisted position, offset clamped; anything missing or malformed
    /// yields the default.
    pub fn load(prefs: &dyn PrefStore, screen: ScreenSize) -> Self {
        let parsed = (|| -> Result<(Edge, i32), String> {
            let edge: Edge = prefs.get(PREF_BORDER).ok_or("no border")?.parse()?;
            let offset: i32 = prefs
                .get(PREF_DISTANCE_FROM_CORNER)
                .ok_or("no distance")?
                .trim()
                .parse()
                .map_err(|e| format!("bad distance: {e}"))?;
            Ok((edge, offset))
        })();

        match parsed {
            Ok((edge, offset)) => Self {
                edge,
                offset: clamp_offset(offset, screen.extent_along(edge), DEAD_ZONE),
            },
            Err(e) => {
                debug!("dock position not restored ({e}); using default");
                Self::default_for(screen)
            }
        }
    }

    pub fn store(self, prefs: &mut dyn PrefStore) {
        prefs.set(PREF_BORDER, self.edge.as_str());
        prefs.set(PREF_DISTANCE_FROM_CORNER, &self.offset.to_string());
    }
}

/// Picks the border nearest to `centre` and the clamped offset along it.
///
/// Ties between the vertical and horizontal pairs go to the horizontal pair
/// (top/bottom): the left/right pair only wins on a strictly smaller distance.
pub fn snap_to_nearest_edge(centre: Point, screen: ScreenSize, dead_zone: i32) -> DockPosition {
    let (distance_x, edge_x) = if centre.x < screen.width - centre.x {
        (centre.x, Edge::Left)
    } else {
        (screen.width - centre.x, Edge::Right)
    };

    let (distance_y, edge_y) = if centre.y < screen.height - centre.y {
        (centre.y, Edge::Top)
    } else {
        (screen.height - centre.y, Edge::Bottom)
    };

    if distance_x < distance_y {
        DockPosition {
            edge: edge_x,
            offset: clamp_offset(centre.y, screen.height, dead_zone),
        }
    } else {
        DockPosition {
            edge: edge_y,
            offset: clamp_offset(centre.x, screen.width, dead_zone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinmark_core::MemoryPrefs;

    const FHD: ScreenSize = ScreenSize::new(1920, 1080);

    #[test]
    fn snaps_to_right_and_clamps_out_of_corner() {
        let p = snap_to_nearest_edge(Point::new(1900, 50), FHD, DEAD_ZONE);
        assert_eq!(p, DockPosition { edge: Edge::Right, offset: 100 });
        assert_eq!(p.centre(FHD), Point::new(1920, 100));
    }

    #[test]
    fn exact_centre_tie_picks_horizontal_pair() {
        let screen = ScreenSize::new(1000, 1000);
        let p = snap_to_nearest_edge(Point::new(500, 500), screen, DEAD_ZONE);
        assert!(p.edge.is_horizontal());
        assert_eq!(p.offset, 500);
    }

    #[test]
    fn equal_axis_distance_off_centre_still_picks_horizontal_pair() {
        // 30 px from the left and 30 px from the top.
        let p = snap_to_nearest_edge(Point::new(30, 30), FHD, DEAD_ZONE);
        assert_eq!(p.edge, Edge::Top);
        assert_eq!(p.offset, 100);
    }

    #[test]
    fn snap_is_deterministic() {
        let first = snap_to_nearest_edge(Point::new(777, 1001), FHD, DEAD_ZONE);
        for _ in 0..10 {
            assert_eq!(snap_to_nearest_edge(Point::new(777, 1001), FHD, DEAD_ZONE), first);
        }
        assert_eq!(first, DockPosition { edge: Edge::Bottom, offset: 777 });
    }

    #[test]
    fn snaps_left_when_closest() {
        let p = snap_to_nearest_edge(Point::new(10, 540), FHD, DEAD_ZONE);
        assert_eq!(p, DockPosition { edge: Edge::Left, offset: 540 });
        assert_eq!(p.centre(FHD), Point::new(0, 540));
    }

    #[test]
    fn offset_always_within_dead_zone_bounds() {
        for x in (-200..2200).step_by(37) {
            for y in (-200..1300).step_by(41) {
                let p = snap_to_nearest_edge(Point::new(x, y), FHD, DEAD_ZONE);
                let extent = if p.edge.is_horizontal() { 1920 } else { 1080 };
                assert!(p.offset >= DEAD_ZONE && p.offset <= extent - DEAD_ZONE, "{x},{y} -> {p:?}");
            }
        }
    }

    #[test]
    fn no_prefs_means_top_centre() {
        let prefs = MemoryPrefs::new();
        assert_eq!(
            DockPosition::load(&prefs, FHD),
            DockPosition { edge: Edge::Top, offset: 960 }
        );
    }

    #[test]
    fn malformed_prefs_fall_back_to_default() {
        let mut prefs = MemoryPrefs::new();
        prefs.set(PREF_BORDER, "DIAGONAL");
        prefs.set(PREF_DISTANCE_FROM_CORNER, "300");
        assert_eq!(DockPosition::load(&prefs, FHD), DockPosition::default_for(FHD));

        prefs.set(PREF_BORDER, "LEFT");
        prefs.set(PREF_DISTANCE_FROM_CORNER, "three hundred");
        assert_eq!(DockPosition::load(&prefs, FHD), DockPosition::default_for(FHD));
    }

    #[test]
    fn stored_position_is_restored_and_clamped() {
        let mut prefs = MemoryPrefs::new();
        DockPosition { edge: Edge::Bottom, offset: 400 }.store(&mut prefs);
        assert_eq!(
            DockPosition::load(&prefs, FHD),
            DockPosition { edge: Edge::Bottom, offset: 400 }
        );

        prefs.set(PREF_BORDER, "RIGHT");
        prefs.set(PREF_DISTANCE_FROM_CORNER, "5000");
        assert_eq!(
            DockPosition::load(&prefs, FHD),
            DockPosition { edge: Edge::Right, offset: 980 }
        );
    }

    #[test]
    fn tiny_screen_clamp_does_not_panic() {
        assert_eq!(clamp_offset(50, 150, DEAD_ZONE), 50);
    }
}
