// License: MIT
//
// Pointer-driven dock state as a pure transition function. The front-end
// feeds events in arrival order and applies the returned effects.

use eventline::debug;

use pinmark_core::{Point, Rect};

use crate::edge::{snap_to_nearest_edge, DockPosition, ScreenSize, DEAD_ZONE};
use crate::layout::{in_star_zone, Control, LayoutTable, WIDGET_H, WIDGET_W};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Retracted,
    Deployed,
    /// `grab` is the press point relative to the widget origin.
    Dragging { grab: Point },
}

/// Pointer input, all points in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DockEvent {
    Enter,
    Exit,
    Press(Point),
    Move(Point),
    Release(Point),
    Click(Point),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Place the widget's top-left corner here.
    MoveTo(Point),
    SetDeployed(bool),
    Repaint,
    Persist(DockPosition),
    Activate(Control),
    /// Show or hide the whole widget. Only the controller emits this, around
    /// a capture, so the dock stays out of the screenshot.
    SetVisible(bool),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DockState {
    pub phase: Phase,
    pub position: DockPosition,
    pub layout: LayoutTable,
    /// Widget top-left corner in screen coordinates.
    pub origin: Point,
    pub highlighted: Option<Control>,
    pub screen: ScreenSize,
}

/// Top-left corner that puts the widget centre on the docked border.
pub fn docked_origin(position: DockPosition, screen: ScreenSize) -> Point {
    position.centre(screen).offset(-WIDGET_W / 2, -WIDGET_H / 2)
}

impl DockState {
    pub fn new(position: DockPosition, screen: ScreenSize) -> Self {
        Self {
            phase: Phase::Retracted,
            position,
            layout: LayoutTable::compute(position),
            origin: docked_origin(position, screen),
            highlighted: None,
            screen,
        }
    }

    /// Dragging keeps the deployed look, minus the controls.
    pub fn is_deployed(&self) -> bool {
        !matches!(self.phase, Phase::Retracted)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    pub fn widget_rect(&self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, WIDGET_W, WIDGET_H)
    }

    fn local(&self, p: Point) -> Point {
        p - self.origin
    }

    pub fn step(&self, event: DockEvent) -> (DockState, Vec<Effect>) {
        step(self, event)
    }
}

pub fn step(state: &DockState, event: DockEvent) -> (DockState, Vec<Effect>) {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match (state.phase, event) {
        (Phase::Retracted, DockEvent::Enter) => {
            next.phase = Phase::Deployed;
            effects.push(Effect::SetDeployed(true));
            effects.push(Effect::Repaint);
        }

        (Phase::Deployed, DockEvent::Exit) => {
            retract(&mut next, &mut effects);
        }

        (Phase::Retracted | Phase::Deployed, DockEvent::Press(p)) => {
            let local = state.local(p);
            if in_star_zone(local) {
                next.phase = Phase::Dragging { grab: local };
                next.highlighted = None;
                if state.phase == Phase::Retracted {
                    effects.push(Effect::SetDeployed(true));
                }
                effects.push(Effect::Repaint);
            }
        }

        (Phase::Dragging { grab }, DockEvent::Move(p)) => {
            let origin = p - grab;
            if origin != state.origin {
                next.origin = origin;
                effects.push(Effect::MoveTo(origin));
            }
        }

        (Phase::Dragging { grab }, DockEvent::Release(p)) => {
            let dropped_origin = p - grab;
            let centre = dropped_origin.offset(WIDGET_W / 2, WIDGET_H / 2);
            let position = snap_to_nearest_edge(centre, state.screen, DEAD_ZONE);
            debug!("dock snapped to {} at {}", position.edge.as_str(), position.offset);

            next.position = position;
            if !state.layout.is_current_for(position) {
                next.layout = LayoutTable::compute(position);
            }
            next.origin = docked_origin(position, state.screen);
            effects.push(Effect::MoveTo(next.origin));
            effects.push(Effect::Persist(position));

            if next.widget_rect().contains(p) {
                next.phase = Phase::Deployed;
                next.highlighted = next.layout.control_at(next.local(p));
                effects.push(Effect::SetDeployed(true));
            } else {
                next.phase = Phase::Retracted;
                next.highlighted = None;
                effects.push(Effect::SetDeployed(false));
            }
            effects.push(Effect::Repaint);
        }

        (Phase::Deployed, DockEvent::Move(p)) => {
            let hovered = state.layout.control_at(state.local(p));
            if hovered != state.highlighted {
                next.highlighted = hovered;
                effects.push(Effect::Repaint);
            }
        }

        // Any click folds the controls away, hit or miss.
        (Phase::Deployed, DockEvent::Click(p)) => {
            if let Some(control) = state.layout.control_at(state.local(p)) {
                effects.push(Effect::Activate(control));
            }
            retract(&mut next, &mut effects);
        }

        // Stray release with no drag in progress: nothing to finish.
        (_, DockEvent::Release(_)) => {}

        _ => {}
    }

    (next, effects)
}

fn retract(next: &mut DockState, effects: &mut Vec<Effect>) {
    next.phase = Phase::Retracted;
    next.highlighted = None;
    effects.push(Effect::SetDeployed(false));
    effects.push(Effect::Repaint);
}
