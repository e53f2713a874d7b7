// License: MIT
//
// Ties the pure state machine to its side effects: preferences, downstream
// views and click synthesis. The Wayland front-end owns one of these and
// only handles the window-level effects (move, deploy, show, repaint).

use eventline::{debug, info, warn};
use tiny_skia::Pixmap;

use pinmark_core::PrefStore;

use crate::assets::DockAssets;
use crate::click::ClickFilter;
use crate::context::{AppContext, ViewAnchor, ViewKind};
use crate::edge::{DockPosition, ScreenSize};
use crate::error::DockError;
use crate::machine::{DockEvent, DockState, Effect};
use crate::paint::{blank, paint};
use crate::placement::position_next_to_dock;

/// Window size views are placed for when they open beside the dock.
pub const VIEW_WIDTH: i32 = 800;
pub const VIEW_HEIGHT: i32 = 600;

pub struct Dock {
    state: DockState,
    assets: DockAssets,
    prefs: Box<dyn PrefStore>,
    context: AppContext,
    clicks: ClickFilter,
    /// Out of sight while a capture is running.
    hidden: bool,
}

impl Dock {
    pub fn new(
        assets: DockAssets,
        prefs: Box<dyn PrefStore>,
        context: AppContext,
        screen: ScreenSize,
    ) -> Self {
        let position = DockPosition::load(prefs.as_ref(), screen);
        info!("dock starts on {} at {}", position.edge.as_str(), position.offset);

        Self {
            state: DockState::new(position, screen),
            assets,
            prefs,
            context,
            clicks: ClickFilter::new(),
            hidden: false,
        }
    }

    pub fn state(&self) -> &DockState {
        &self.state
    }

    pub fn prefs(&self) -> &dyn PrefStore {
        self.prefs.as_ref()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Feeds one pointer event through the machine. Clicks are synthesised
    /// here from press/release pairs. Returned effects are the ones the
    /// window layer still has to apply.
    pub fn handle(&mut self, event: DockEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.hidden {
            return effects;
        }

        match event {
            DockEvent::Press(p) => {
                self.clicks.press(p);
                self.advance(event, &mut effects);
                if self.state.is_dragging() {
                    self.clicks.suppress();
                }
            }
            DockEvent::Release(p) => {
                self.advance(event, &mut effects);
                if let Some(at) = self.clicks.release(p) {
                    self.advance(DockEvent::Click(at), &mut effects);
                }
            }
            DockEvent::Exit => {
                self.clicks.cancel();
                self.advance(event, &mut effects);
            }
            _ => self.advance(event, &mut effects),
        }

        effects
    }

    /// The output changed size: re-read the saved position against the new
    /// extent and re-dock. The saved offset is unclamped, so shrinking and
    /// growing back restores the earlier spot.
    pub fn resize(&mut self, screen: ScreenSize) -> Vec<Effect> {
        if screen == self.state.screen {
            return Vec::new();
        }

        let position = DockPosition::load(self.prefs.as_ref(), screen);
        debug!("screen now {}x{}", screen.width, screen.height);

        self.state = DockState::new(position, screen);
        vec![
            Effect::MoveTo(self.state.origin),
            Effect::SetDeployed(false),
            Effect::Repaint,
        ]
    }

    /// Brings the dock back once the capture it made way for has finished.
    /// Call whenever a view may have closed.
    pub fn refresh_views(&mut self) -> Vec<Effect> {
        if !self.hidden || self.context.is_open(ViewKind::Capture) {
            return Vec::new();
        }
        info!("capture finished; showing dock");
        self.hidden = false;
        vec![Effect::SetVisible(true), Effect::Repaint]
    }

    pub fn render(&self) -> Result<Pixmap, DockError> {
        if self.hidden {
            return blank();
        }
        paint(&self.state, &self.assets)
    }

    /// Where views opened from the dock go, sized `VIEW_WIDTH`×`VIEW_HEIGHT`.
    pub fn view_anchor(&self) -> ViewAnchor {
        ViewAnchor {
            edge: self.state.position.edge,
            window: position_next_to_dock(
                self.state.position,
                self.state.screen,
                VIEW_WIDTH,
                VIEW_HEIGHT,
            ),
        }
    }

    fn advance(&mut self, event: DockEvent, out: &mut Vec<Effect>) {
        let (next, effects) = self.state.step(event);
        self.state = next;

        for effect in effects {
            out.push(effect);
            match effect {
                Effect::Persist(position) => self.persist(position),
                Effect::Activate(control) => self.activate(ViewKind::from(control), out),
                _ => {}
            }
        }
    }

    fn activate(&mut self, kind: ViewKind, out: &mut Vec<Effect>) {
        let capture = kind == ViewKind::Capture;
        if capture {
            self.hidden = true;
            out.push(Effect::SetVisible(false));
        }

        let anchor = self.view_anchor();
        if let Err(e) = self.context.open(kind, anchor) {
            warn!("failed to open {} view: {}", kind.name(), e);
            if capture {
                self.hidden = false;
                out.push(Effect::SetVisible(true));
            }
        }
    }

    fn persist(&mut self, position: DockPosition) {
        position.store(self.prefs.as_mut());
        if let Err(e) = self.prefs.save() {
            warn!("failed to save dock position: {}", e);
        }
    }
}
