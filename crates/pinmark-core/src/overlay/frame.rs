// License: MIT

use tiny_skia::{LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::colour::Colour;
use crate::geometry::{Point, Rect};

pub const FRAME_THICKNESS: f32 = 3.0;

/// Rectangle outline between two corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Corner following the pointer while drawing.
    pub corner: Point,
    pub anchor: Point,
}

impl Frame {
    pub fn initialize(point: Point) -> Self {
        Self {
            corner: point,
            anchor: point,
        }
    }

    pub fn handles(&self) -> Vec<Point> {
        vec![self.corner, self.anchor]
    }

    pub fn move_handle(&mut self, index: usize, p: Point) -> bool {
        match index {
            0 => self.corner = p,
            1 => self.anchor = p,
            _ => return false,
        }
        true
    }

    pub fn has_no_size(&self) -> bool {
        self.corner == self.anchor
    }

    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.corner, self.anchor)
    }

    pub fn bounds(&self) -> Rect {
        self.rect().inflate(FRAME_THICKNESS as i32 + 1)
    }

    pub fn paint(&self, pixmap: &mut Pixmap, origin: Point, colour: Colour) {
        if self.has_no_size() {
            return;
        }
        let transform = Transform::from_translate(-origin.x as f32, -origin.y as f32);
        let mut paint = Paint::default();
        paint.set_color(colour.to_skia());
        paint.anti_alias = true;

        let stroke = Stroke {
            width: FRAME_THICKNESS,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };

        if let Some(path) = outline_path(self.rect()) {
            pixmap.stroke_path(&path, &paint, &stroke, transform, None);
        }
    }
}

/// Closed outline; degenerate (zero width or height) rectangles still give a
/// line, unlike `PathBuilder::from_rect`.
pub(crate) fn outline_path(r: Rect) -> Option<tiny_skia::Path> {
    let (x0, y0) = (r.x as f32, r.y as f32);
    let (x1, y1) = ((r.x + r.w) as f32, (r.y + r.h) as f32);
    let mut pb = PathBuilder::new();
    pb.move_to(x0, y0);
    pb.line_to(x1, y0);
    pb.line_to(x1, y1);
    pb.line_to(x0, y1);
    pb.close();
    pb.finish()
}
