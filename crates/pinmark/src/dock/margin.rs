// License: MIT
//
// Layer-surface margins are double-buffered: the compositor moves the
// surface only at the next commit, and pointer coordinates stay relative to
// where it last put it. Surface-local input must therefore be mapped through
// the committed origin, never through the one the dock asked for.

use pinmark_core::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Margins {
    wanted: Point,
    committed: Point,
}

impl Margins {
    pub(crate) fn new(origin: Point) -> Self {
        Self {
            wanted: origin,
            committed: origin,
        }
    }

    pub(crate) fn request(&mut self, origin: Point) {
        self.wanted = origin;
    }

    /// Call right after `wl_surface.commit`.
    pub(crate) fn committed(&mut self) {
        self.committed = self.wanted;
    }

    pub(crate) fn to_screen(&self, surface_x: f64, surface_y: f64) -> Point {
        self.committed.offset(surface_x as i32, surface_y as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinmark_dock::{DockEvent, DockPosition, DockState, Edge, Effect, ScreenSize};

    /// Surface-local coordinates the compositor reports for a pointer at
    /// `screen` while the surface sits at `surface`.
    fn local(screen: Point, surface: Point) -> (f64, f64) {
        ((screen.x - surface.x) as f64, (screen.y - surface.y) as f64)
    }

    fn feed(state: DockState, margins: &mut Margins, event: DockEvent) -> DockState {
        let (next, effects) = state.step(event);
        for e in effects {
            if let Effect::MoveTo(origin) = e {
                margins.request(origin);
            }
        }
        next
    }

    #[test]
    fn drag_tracks_pointer_while_commits_lag() {
        let screen = ScreenSize::new(1920, 1080);
        let state = DockState::new(DockPosition { edge: Edge::Top, offset: 960 }, screen);
        let start = state.origin;
        let mut margins = Margins::new(start);

        let press = start.offset(75, 75);
        let (x, y) = local(press, start);
        let event = DockEvent::Press(margins.to_screen(x, y));
        let state = feed(state, &mut margins, event);

        // Three motions arrive before the buffer frees up; the compositor
        // still has the surface at `start`.
        let mut state = state;
        for step in 1..=3 {
            let pointer = press.offset(10 * step, 4 * step);
            let (x, y) = local(pointer, start);
            let event = DockEvent::Move(margins.to_screen(x, y));
            state = feed(state, &mut margins, event);
            assert_eq!(state.origin, pointer - Point::new(75, 75), "step {step}");
        }

        // Once committed, input is relative to the new spot.
        margins.committed();
        let moved = margins.wanted;
        let pointer = press.offset(50, 20);
        let (x, y) = local(pointer, moved);
        let event = DockEvent::Move(margins.to_screen(x, y));
        let state = feed(state, &mut margins, event);
        assert_eq!(state.origin, pointer - Point::new(75, 75));
    }

    #[test]
    fn uncommitted_request_does_not_shift_input() {
        let mut m = Margins::new(Point::new(100, 0));
        m.request(Point::new(400, 0));
        assert_eq!(m.to_screen(5.0, 5.0), Point::new(105, 5));
        m.committed();
        assert_eq!(m.to_screen(5.0, 5.0), Point::new(405, 5));
    }
}
