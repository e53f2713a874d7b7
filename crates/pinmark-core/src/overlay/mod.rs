// License: MIT
//
// Overlays: editable shapes placed on a captured image.
//
// Every kind follows the same handle convention: index 0 is the point most
// recently placed or being dragged, so the editing surface can treat all
// kinds alike. An overlay whose defining points coincide has no size and is
// never kept by the surface.

pub mod arrow;
mod cache;
pub mod frame;
pub mod text;

use serde::{Deserialize, Serialize};
use tiny_skia::Pixmap;

use crate::colour::Colour;
use crate::error::{CoreError, Result};
use crate::geometry::Point;

pub use arrow::{Arrow, ArrowGeometry};
pub use frame::Frame;
pub use text::TextBox;

use cache::RenderCache;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverlayKind {
    Arrow,
    Frame,
    Text,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 3] = [OverlayKind::Arrow, OverlayKind::Frame, OverlayKind::Text];

    pub fn name(self) -> &'static str {
        match self {
            OverlayKind::Arrow => "Arrow",
            OverlayKind::Frame => "Frame",
            OverlayKind::Text => "Text",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    Arrow(Arrow),
    Frame(Frame),
    Text(TextBox),
}

#[derive(Debug, Clone)]
pub struct Overlay {
    shape: Shape,
    colour: Colour,
    order: u64,
    cache: RenderCache,
}

impl Overlay {
    /// Both logical endpoints start collapsed on `point`.
    pub fn initialize(kind: OverlayKind, point: Point, colour: Colour) -> Self {
        let shape = match kind {
            OverlayKind::Arrow => Shape::Arrow(Arrow::initialize(point)),
            OverlayKind::Frame => Shape::Frame(Frame::initialize(point)),
            OverlayKind::Text => Shape::Text(TextBox::initialize(point, Colour::BLACK)),
        };
        Self::from_shape(shape, colour)
    }

    pub fn from_shape(shape: Shape, colour: Colour) -> Self {
        Self {
            shape,
            colour,
            order: 0,
            cache: RenderCache::new(),
        }
    }

    pub fn kind(&self) -> OverlayKind {
        match self.shape {
            Shape::Arrow(_) => OverlayKind::Arrow,
            Shape::Frame(_) => OverlayKind::Frame,
            Shape::Text(_) => OverlayKind::Text,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn name(&self) -> String {
        match &self.shape {
            Shape::Arrow(a) => format!("Arrow from {:?} to {:?}", a.start, a.end),
            Shape::Frame(f) => format!("Frame {:?}", f.rect()),
            Shape::Text(t) => format!("Text {:?}", t.text),
        }
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    /// Recolours this overlay only. Tools keep their own remembered colour;
    /// see [`crate::tool::ToolBox::remember_colour`].
    pub fn set_colour(&mut self, colour: Colour) {
        if self.colour != colour {
            self.colour = colour;
            self.cache.invalidate();
        }
    }

    /// Creation order; higher paints on top.
    pub fn order(&self) -> u64 {
        self.order
    }

    pub(crate) fn set_order(&mut self, order: u64) {
        self.order = order;
    }

    pub fn handles(&self) -> Vec<Point> {
        match &self.shape {
            Shape::Arrow(a) => a.handles(),
            Shape::Frame(f) => f.handles(),
            Shape::Text(t) => t.handles(),
        }
    }

    /// Last write wins per index. Indices past the kind's handles are ignored.
    pub fn move_handle(&mut self, index: usize, p: Point) {
        let moved = match &mut self.shape {
            Shape::Arrow(a) => a.move_handle(index, p),
            Shape::Frame(f) => f.move_handle(index, p),
            Shape::Text(t) => t.move_handle(index, p),
        };
        if moved {
            self.cache.invalidate();
        }
    }

    pub fn has_no_size(&self) -> bool {
        match &self.shape {
            Shape::Arrow(a) => a.has_no_size(),
            Shape::Frame(f) => f.has_no_size(),
            Shape::Text(t) => t.has_no_size(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.cache.is_dirty()
    }

    pub fn text(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text(t) => Some(&t.text),
            _ => None,
        }
    }

    /// Returns false for kinds without text.
    pub fn set_text(&mut self, text: &str) -> bool {
        let Shape::Text(t) = &mut self.shape else {
            return false;
        };
        t.text = text.to_string();
        self.cache.invalidate();
        true
    }

    pub fn push_char(&mut self, ch: char) -> bool {
        let Shape::Text(t) = &mut self.shape else {
            return false;
        };
        t.text.push(ch);
        self.cache.invalidate();
        true
    }

    pub fn pop_char(&mut self) -> bool {
        let Shape::Text(t) = &mut self.shape else {
            return false;
        };
        if t.text.pop().is_none() {
            return false;
        }
        self.cache.invalidate();
        true
    }

    pub fn set_text_colour(&mut self, colour: Colour) -> bool {
        let Shape::Text(t) = &mut self.shape else {
            return false;
        };
        t.text_colour = colour;
        self.cache.invalidate();
        true
    }

    /// Draws from the cached raster when clean, otherwise rasterizes first.
    pub fn render(&mut self, target: &mut Pixmap) -> Result<()> {
        if self.cache.is_dirty() {
            let raster = self.rasterize()?;
            self.cache.store(raster);
        }
        self.cache.blit(target);
        Ok(())
    }

    fn rasterize(&self) -> Result<Option<(Point, Pixmap)>> {
        if self.has_no_size() {
            return Ok(None);
        }

        let bounds = match &self.shape {
            Shape::Arrow(a) => a.bounds(),
            Shape::Frame(f) => f.bounds(),
            Shape::Text(t) => t.bounds(),
        };

        let (width, height) = (bounds.w.max(1) as u32, bounds.h.max(1) as u32);
        let mut pixmap = Pixmap::new(width, height).ok_or(CoreError::PixmapAlloc { width, height })?;

        let origin = bounds.origin();
        match &self.shape {
            Shape::Arrow(a) => a.paint(&mut pixmap, origin, self.colour),
            Shape::Frame(f) => f.paint(&mut pixmap, origin, self.colour),
            Shape::Text(t) => t.paint(&mut pixmap, origin, self.colour),
        }

        Ok(Some((origin, pixmap)))
    }
}
