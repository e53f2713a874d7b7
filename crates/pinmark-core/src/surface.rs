// License: MIT
//
// Editing surface: a captured image plus the overlays placed on it.
//
// A press on an existing handle drags that handle; a press anywhere else asks
// the active tool for a new overlay and drags its handle 0. On release an
// overlay with no size is dropped, so the committed list never holds one.

use std::path::Path;

use eventline::{debug, info};
use tiny_skia::{Paint, Pixmap, Rect as SkRect, Transform};

use crate::colour::Colour;
use crate::error::{CoreError, Result};
use crate::geometry::{dist2, Point, Rect};
use crate::overlay::{Overlay, OverlayKind};
use crate::tool::{ToolBox, ToolContext};

/// Grab radius around a handle.
pub const HANDLE_HIT: i32 = 8;
pub const HANDLE_SIZE: i32 = 8;

const HANDLE_OUTER: Colour = Colour(0xFF0A_84FF);
const HANDLE_INNER: Colour = Colour::WHITE;

#[derive(Debug)]
enum Editing {
    /// New overlay, not yet committed.
    Creating(Overlay),
    /// Dragging handle `handle` of committed overlay `index`.
    Handle { index: usize, handle: usize },
}

pub struct EditingSurface {
    background: Pixmap,
    overlays: Vec<Overlay>,
    editing: Option<Editing>,
    selected: Option<usize>,
    tools: ToolBox,
    next_order: u64,
    needs_repaint: bool,
}

impl EditingSurface {
    pub fn new(background: Pixmap, tools: ToolBox) -> Self {
        Self {
            background,
            overlays: Vec::new(),
            editing: None,
            selected: None,
            tools,
            next_order: 1,
            needs_repaint: true,
        }
    }

    pub fn from_png(path: &Path, tools: ToolBox) -> Result<Self> {
        let background = Pixmap::load_png(path).map_err(|e| CoreError::Png(e.to_string()))?;
        info!(
            "editing surface loaded {} ({}x{})",
            path.display(),
            background.width(),
            background.height()
        );
        Ok(Self::new(background, tools))
    }

    pub fn width(&self) -> u32 {
        self.background.width()
    }

    pub fn height(&self) -> u32 {
        self.background.height()
    }

    pub fn context(&self) -> ToolContext {
        ToolContext {
            bounds: Rect::new(0, 0, self.width() as i32, self.height() as i32),
        }
    }

    /// Committed overlays in creation order.
    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn tools(&self) -> &ToolBox {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolBox {
        &mut self.tools
    }

    pub fn selected(&self) -> Option<&Overlay> {
        self.selected.and_then(|i| self.overlays.get(i))
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Topmost overlay owning a handle within reach of `p`, with the handle index.
    pub fn handle_at(&self, p: Point) -> Option<(usize, usize)> {
        let reach = (HANDLE_HIT as i64) * (HANDLE_HIT as i64);
        let mut order: Vec<usize> = (0..self.overlays.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(self.overlays[i].order()));

        order.into_iter().find_map(|i| {
            self.overlays[i]
                .handles()
                .iter()
                .position(|h| dist2(*h, p) <= reach)
                .map(|h| (i, h))
        })
    }

    pub fn pointer_pressed(&mut self, p: Point) {
        if self.editing.is_some() {
            // Missed release; settle the previous gesture where it stands.
            let last = self.current_handle_position().unwrap_or(p);
            self.pointer_released(last);
        }

        if let Some((index, handle)) = self.handle_at(p) {
            debug!("grab handle {handle} of overlay {index}");
            self.selected = Some(index);
            self.editing = Some(Editing::Handle { index, handle });
        } else {
            let ctx = self.context();
            let tool = self.tools.active();
            let overlay = tool.create(p, tool.colour(), &ctx);
            debug!("{} tool: new overlay at {:?}", tool.name(), p);
            self.selected = None;
            self.editing = Some(Editing::Creating(overlay));
        }
        self.needs_repaint = true;
    }

    pub fn pointer_moved(&mut self, p: Point) {
        match &mut self.editing {
            Some(Editing::Creating(overlay)) => overlay.move_handle(0, p),
            Some(Editing::Handle { index, handle }) => {
                if let Some(o) = self.overlays.get_mut(*index) {
                    o.move_handle(*handle, p);
                }
            }
            None => return,
        }
        self.needs_repaint = true;
    }

    pub fn pointer_released(&mut self, p: Point) {
        let Some(editing) = self.editing.take() else {
            return;
        };

        match editing {
            Editing::Creating(mut overlay) => {
                overlay.move_handle(0, p);
                self.commit(overlay);
            }
            Editing::Handle { index, handle } => {
                if let Some(o) = self.overlays.get_mut(index) {
                    o.move_handle(handle, p);
                    if o.has_no_size() {
                        debug!("discarding {} collapsed by edit", o.kind().name());
                        self.remove(index);
                    }
                }
            }
        }
        self.needs_repaint = true;
    }

    /// Creates an overlay of `kind` spanning `from`..`to` without any
    /// handle hit-testing, as if dragged on an empty spot. Returns its index
    /// when committed.
    pub fn place(&mut self, kind: OverlayKind, from: Point, to: Point) -> Option<usize> {
        let ctx = self.context();
        let tool = self.tools.get(kind);
        let mut overlay = tool.create(from, tool.colour(), &ctx);
        overlay.move_handle(0, to);
        self.needs_repaint = true;
        self.commit(overlay)
    }

    pub fn delete_selected(&mut self) -> bool {
        let Some(index) = self.selected else {
            return false;
        };
        self.remove(index);
        self.needs_repaint = true;
        true
    }

    /// Recolours the selected overlay. The tool's remembered colour is left
    /// alone; call `tools_mut().remember_colour` to make it stick.
    pub fn recolour_selected(&mut self, colour: Colour) -> bool {
        let Some(o) = self.selected.and_then(|i| self.overlays.get_mut(i)) else {
            return false;
        };
        o.set_colour(colour);
        self.needs_repaint = true;
        true
    }

    pub fn type_char(&mut self, ch: char) -> bool {
        let typed = self
            .selected
            .and_then(|i| self.overlays.get_mut(i))
            .is_some_and(|o| o.push_char(ch));
        self.needs_repaint |= typed;
        typed
    }

    pub fn backspace(&mut self) -> bool {
        let erased = self
            .selected
            .and_then(|i| self.overlays.get_mut(i))
            .is_some_and(|o| o.pop_char());
        self.needs_repaint |= erased;
        erased
    }

    pub fn set_selected_text(&mut self, text: &str) -> bool {
        let set = self
            .selected
            .and_then(|i| self.overlays.get_mut(i))
            .is_some_and(|o| o.set_text(text));
        self.needs_repaint |= set;
        set
    }

    /// Background, overlays bottom to top, the in-progress overlay, then the
    /// selected overlay's handles.
    pub fn render(&mut self) -> Result<Pixmap> {
        let mut out = self.background.clone();

        for overlay in &mut self.overlays {
            overlay.render(&mut out)?;
        }
        if let Some(Editing::Creating(overlay)) = &mut self.editing {
            overlay.render(&mut out)?;
        }
        if let Some(o) = self.selected.and_then(|i| self.overlays.get(i)) {
            for h in o.handles() {
                draw_handle(&mut out, h);
            }
        }

        self.needs_repaint = false;
        Ok(out)
    }

    /// Flattened image without selection handles.
    pub fn export_png(&mut self, path: &Path) -> Result<()> {
        let selected = self.selected.take();
        let flattened = self.render();
        self.selected = selected;

        flattened?
            .save_png(path)
            .map_err(|e| CoreError::Png(e.to_string()))?;
        info!("exported {}", path.display());
        Ok(())
    }

    fn commit(&mut self, mut overlay: Overlay) -> Option<usize> {
        if overlay.has_no_size() {
            debug!("discarding empty {}", overlay.kind().name());
            return None;
        }
        overlay.set_order(self.next_order);
        self.next_order += 1;
        debug!("committed {}", overlay.name());
        self.overlays.push(overlay);
        self.selected = Some(self.overlays.len() - 1);
        self.selected
    }

    fn remove(&mut self, index: usize) {
        if index >= self.overlays.len() {
            return;
        }
        self.overlays.remove(index);
        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
    }

    fn current_handle_position(&self) -> Option<Point> {
        match &self.editing {
            Some(Editing::Creating(o)) => o.handles().first().copied(),
            Some(Editing::Handle { index, handle }) => self
                .overlays
                .get(*index)
                .and_then(|o| o.handles().get(*handle).copied()),
            None => None,
        }
    }
}

fn draw_handle(pixmap: &mut Pixmap, at: Point) {
    let half = HANDLE_SIZE / 2;
    let fill = |pixmap: &mut Pixmap, x: i32, y: i32, size: i32, colour: Colour| {
        if let Some(r) = SkRect::from_xywh(x as f32, y as f32, size as f32, size as f32) {
            let mut paint = Paint::default();
            paint.set_color(colour.to_skia());
            pixmap.fill_rect(r, &paint, Transform::identity(), None);
        }
    };
    fill(pixmap, at.x - half, at.y - half, HANDLE_SIZE, HANDLE_OUTER);
    fill(pixmap, at.x - 1, at.y - 1, 2, HANDLE_INNER);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> EditingSurface {
        EditingSurface::new(Pixmap::new(200, 120).unwrap(), ToolBox::new())
    }

    fn drag(s: &mut EditingSurface, from: Point, to: Point) {
        s.pointer_pressed(from);
        s.pointer_moved(Point::new((from.x + to.x) / 2, (from.y + to.y) / 2));
        s.pointer_moved(to);
        s.pointer_released(to);
    }

    #[test]
    fn drag_creates_overlay_with_active_tool() {
        let mut s = surface();
        s.tools_mut().set_active(OverlayKind::Frame);
        drag(&mut s, Point::new(10, 10), Point::new(50, 40));

        assert_eq!(s.overlays().len(), 1);
        let o = &s.overlays()[0];
        assert_eq!(o.kind(), OverlayKind::Frame);
        assert_eq!(o.handles(), vec![Point::new(50, 40), Point::new(10, 10)]);
        assert_eq!(s.selected().map(|o| o.order()), Some(1));
    }

    #[test]
    fn click_without_drag_is_discarded() {
        let mut s = surface();
        s.pointer_pressed(Point::new(30, 30));
        s.pointer_released(Point::new(30, 30));
        assert!(s.overlays().is_empty());
        assert!(!s.is_editing());
    }

    #[test]
    fn dragging_back_to_start_is_discarded() {
        let mut s = surface();
        s.pointer_pressed(Point::new(30, 30));
        s.pointer_moved(Point::new(60, 60));
        s.pointer_released(Point::new(30, 30));
        assert!(s.overlays().is_empty());
    }

    #[test]
    fn press_on_handle_edits_existing_overlay() {
        let mut s = surface();
        drag(&mut s, Point::new(10, 10), Point::new(100, 10));

        // Grab the tail (handle 1) within reach and move it.
        drag(&mut s, Point::new(12, 12), Point::new(10, 80));

        assert_eq!(s.overlays().len(), 1);
        assert_eq!(s.overlays()[0].handles(), vec![Point::new(100, 10), Point::new(10, 80)]);
    }

    #[test]
    fn collapsing_an_overlay_by_edit_removes_it() {
        let mut s = surface();
        drag(&mut s, Point::new(10, 10), Point::new(100, 10));
        drag(&mut s, Point::new(100, 10), Point::new(10, 10));
        assert!(s.overlays().is_empty());
        assert!(s.selected().is_none());
    }

    #[test]
    fn topmost_overlay_wins_handle_hit() {
        let mut s = surface();
        drag(&mut s, Point::new(10, 10), Point::new(100, 10));
        drag(&mut s, Point::new(100, 60), Point::new(101, 12));
        // Both overlays have a handle near (100, 11); the later one is on top.
        assert_eq!(s.handle_at(Point::new(100, 11)), Some((1, 0)));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut s = surface();
        s.pointer_released(Point::new(5, 5));
        s.pointer_moved(Point::new(9, 9));
        assert!(s.overlays().is_empty());
    }

    #[test]
    fn recolour_selected_leaves_tool_colour() {
        let mut s = surface();
        drag(&mut s, Point::new(10, 10), Point::new(100, 10));
        assert!(s.recolour_selected(Colour::BLACK));
        assert_eq!(s.overlays()[0].colour(), Colour::BLACK);
        assert_eq!(s.tools().active().colour(), crate::tool::DEFAULT_TOOL_COLOUR);
    }

    #[test]
    fn typing_goes_to_selected_text_box() {
        let mut s = surface();
        s.tools_mut().set_active(OverlayKind::Text);
        drag(&mut s, Point::new(10, 10), Point::new(120, 50));
        assert!(s.type_char('o'));
        assert!(s.type_char('k'));
        assert_eq!(s.selected().and_then(|o| o.text()), Some("ok"));
        assert!(s.backspace());
        assert_eq!(s.selected().and_then(|o| o.text()), Some("o"));
    }

    #[test]
    fn delete_selected_removes_overlay() {
        let mut s = surface();
        drag(&mut s, Point::new(10, 10), Point::new(100, 10));
        assert!(s.delete_selected());
        assert!(s.overlays().is_empty());
        assert!(!s.delete_selected());
    }

    #[test]
    fn render_clears_repaint_flag_and_draws_overlays() {
        let mut s = surface();
        drag(&mut s, Point::new(10, 20), Point::new(150, 20));
        assert!(s.needs_repaint());
        let out = s.render().unwrap();
        assert!(!s.needs_repaint());
        assert!(out.pixel(60, 20).unwrap().alpha() > 0);
        assert_eq!(out.pixel(60, 100).unwrap().alpha(), 0);
    }

    #[test]
    fn place_ignores_nearby_handles() {
        let mut s = surface();
        s.place(OverlayKind::Arrow, Point::new(10, 10), Point::new(60, 10));
        let second = s.place(OverlayKind::Arrow, Point::new(60, 10), Point::new(60, 80));
        assert_eq!(second, Some(1));
        assert_eq!(s.overlays().len(), 2);
        assert_eq!(s.overlays()[0].handles(), vec![Point::new(60, 10), Point::new(10, 10)]);
        assert!(s.overlays()[1].order() > s.overlays()[0].order());
    }

    #[test]
    fn place_discards_degenerate_span() {
        let mut s = surface();
        assert_eq!(s.place(OverlayKind::Frame, Point::new(5, 5), Point::new(5, 5)), None);
        assert!(s.overlays().is_empty());
    }

    #[test]
    fn export_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut s = surface();
        drag(&mut s, Point::new(10, 20), Point::new(150, 20));
        s.export_png(&path).unwrap();

        let back = Pixmap::load_png(&path).unwrap();
        assert_eq!((back.width(), back.height()), (200, 120));
        assert!(s.selected().is_some());
    }
}
