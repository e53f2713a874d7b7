// License: MIT
//
// Application-wide collaborators of the dock: the downstream views opened
// from its controls, and the "target list changed" listeners.

use eventline::{debug, info};

use pinmark_core::Point;

use crate::edge::Edge;
use crate::error::DockError;
use crate::layout::Control;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Capture,
    History,
    More,
}

impl ViewKind {
    pub fn name(self) -> &'static str {
        match self {
            ViewKind::Capture => "capture",
            ViewKind::History => "history",
            ViewKind::More => "more",
        }
    }

    fn slot(self) -> usize {
        match self {
            ViewKind::Capture => 0,
            ViewKind::History => 1,
            ViewKind::More => 2,
        }
    }
}

impl From<Control> for ViewKind {
    fn from(c: Control) -> Self {
        match c {
            Control::Capture => ViewKind::Capture,
            Control::History => ViewKind::History,
            Control::More => ViewKind::More,
        }
    }
}

/// Where a view should appear: the border the dock sits on and the
/// top-left corner worked out for the view's window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewAnchor {
    pub edge: Edge,
    pub window: Point,
}

/// A window (or process) the dock can bring to the front.
pub trait View {
    /// False once the user closed it; the context then builds a new one.
    fn is_open(&mut self) -> bool;

    /// Show and focus, near `anchor` if the view places itself.
    fn present(&mut self, anchor: ViewAnchor) -> Result<(), DockError>;
}

pub trait ViewFactory {
    fn create(&mut self, kind: ViewKind) -> Result<Box<dyn View>, DockError>;
}

pub trait TargetListListener {
    fn on_target_list_changed(&mut self);
}

impl<F: FnMut()> TargetListListener for F {
    fn on_target_list_changed(&mut self) {
        self()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub struct AppContext {
    factory: Box<dyn ViewFactory>,
    views: [Option<Box<dyn View>>; 3],
    listeners: Vec<(ListenerId, Box<dyn TargetListListener>)>,
    next_listener: u64,
}

impl AppContext {
    pub fn new(factory: Box<dyn ViewFactory>) -> Self {
        Self {
            factory,
            views: [None, None, None],
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Presents the view of `kind`, creating it first when there is none
    /// or the previous one was closed.
    pub fn open(&mut self, kind: ViewKind, anchor: ViewAnchor) -> Result<(), DockError> {
        let slot = &mut self.views[kind.slot()];

        let reusable = match slot {
            Some(view) => view.is_open(),
            None => false,
        };

        if !reusable {
            info!("creating {} view", kind.name());
            *slot = Some(self.factory.create(kind)?);
        }

        match slot {
            Some(view) => view.present(anchor),
            None => Ok(()),
        }
    }

    /// A view that was never created counts as closed.
    pub fn is_open(&mut self, kind: ViewKind) -> bool {
        self.views[kind.slot()]
            .as_mut()
            .is_some_and(|view| view.is_open())
    }

    pub fn add_target_list_listener(
        &mut self,
        listener: impl TargetListListener + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not registered.
    pub fn remove_target_list_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        before != self.listeners.len()
    }

    pub fn notify_target_list_changed(&mut self) {
        debug!("target list changed; {} listener(s)", self.listeners.len());
        for (_, listener) in &mut self.listeners {
            listener.on_target_list_changed();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct FakeView {
        open: Rc<Cell<bool>>,
        presented: Rc<Cell<u32>>,
    }

    impl View for FakeView {
        fn is_open(&mut self) -> bool {
            self.open.get()
        }

        fn present(&mut self, _anchor: ViewAnchor) -> Result<(), DockError> {
            self.presented.set(self.presented.get() + 1);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Counting {
        created: Rc<RefCell<Vec<ViewKind>>>,
        open: Rc<Cell<bool>>,
        presented: Rc<Cell<u32>>,
        fail: bool,
    }

    impl ViewFactory for Counting {
        fn create(&mut self, kind: ViewKind) -> Result<Box<dyn View>, DockError> {
            if self.fail {
                return Err(DockError::View {
                    view: kind.name(),
                    reason: "nope".into(),
                });
            }
            self.created.borrow_mut().push(kind);
            Ok(Box::new(FakeView {
                open: self.open.clone(),
                presented: self.presented.clone(),
            }))
        }
    }

    fn context() -> (AppContext, Rc<RefCell<Vec<ViewKind>>>, Rc<Cell<bool>>, Rc<Cell<u32>>) {
        let factory = Counting::default();
        let created = factory.created.clone();
        let open = factory.open.clone();
        let presented = factory.presented.clone();
        open.set(true);
        (AppContext::new(Box::new(factory)), created, open, presented)
    }

    const ANCHOR: ViewAnchor = ViewAnchor {
        edge: Edge::Top,
        window: Point { x: 760, y: 75 },
    };

    #[test]
    fn views_are_created_lazily_once() {
        let (mut ctx, created, _, presented) = context();
        assert!(!ctx.is_open(ViewKind::History));

        ctx.open(ViewKind::History, ANCHOR).unwrap();
        ctx.open(ViewKind::History, ANCHOR).unwrap();
        assert_eq!(*created.borrow(), vec![ViewKind::History]);
        assert_eq!(presented.get(), 2);
        assert!(ctx.is_open(ViewKind::History));
        assert!(!ctx.is_open(ViewKind::More));
    }

    #[test]
    fn closed_view_is_recreated() {
        let (mut ctx, created, open, _) = context();
        ctx.open(ViewKind::More, ANCHOR).unwrap();
        open.set(false);
        assert!(!ctx.is_open(ViewKind::More));
        ctx.open(ViewKind::More, ANCHOR).unwrap();
        assert_eq!(*created.borrow(), vec![ViewKind::More, ViewKind::More]);
    }

    #[test]
    fn factory_failure_surfaces() {
        let factory = Counting { fail: true, ..Default::default() };
        let mut ctx = AppContext::new(Box::new(factory));
        assert!(matches!(
            ctx.open(ViewKind::Capture, ANCHOR),
            Err(DockError::View { view: "capture", .. })
        ));
        assert!(!ctx.is_open(ViewKind::Capture));
    }

    #[test]
    fn listeners_fire_until_removed() {
        let (mut ctx, ..) = context();
        let hits = Rc::new(Cell::new(0));

        let h = hits.clone();
        let a = ctx.add_target_list_listener(move || h.set(h.get() + 1));
        let h = hits.clone();
        let _b = ctx.add_target_list_listener(move || h.set(h.get() + 10));

        ctx.notify_target_list_changed();
        assert_eq!(hits.get(), 11);

        assert!(ctx.remove_target_list_listener(a));
        assert!(!ctx.remove_target_list_listener(a));

        ctx.notify_target_list_changed();
        assert_eq!(hits.get(), 21);
    }

    #[test]
    fn control_maps_to_view() {
        assert_eq!(ViewKind::from(Control::Capture), ViewKind::Capture);
        assert_eq!(ViewKind::from(Control::More), ViewKind::More);
    }
}
