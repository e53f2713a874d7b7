// License: MIT
//
// Arrow: a round-capped shaft ending inside a pointed head.

use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::colour::Colour;
use crate::geometry::{Point, Rect};

/// Widest head, reached once the arrow is at least 24 px long.
pub const MAX_HEAD_WIDTH: i32 = 8;

/// Outline width of the head polygon. Zero is a hairline.
fn head_stroke_width(head_width: i32) -> f32 {
    (head_width / 2) as f32
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowGeometry {
    pub hyp: f64,
    pub head_width: i32,
    pub head_length: i32,
    pub shaft_length: f64,
    /// Head base corners, either side of the shaft.
    pub corner_a: (f64, f64),
    pub corner_b: (f64, f64),
    /// Centroid of (tip, corner_a, corner_b); the shaft stops here.
    pub centroid: (f64, f64),
    pub start: (f64, f64),
    pub tip: (f64, f64),
}

impl ArrowGeometry {
    /// `None` for a zero-length arrow.
    pub fn compute(start: Point, end: Point) -> Option<Self> {
        let dx = (end.x - start.x) as f64;
        let dy = (end.y - start.y) as f64;
        if dx == 0.0 && dy == 0.0 {
            return None;
        }

        let hyp = (dx * dx + dy * dy).sqrt();

        let head_width = MAX_HEAD_WIDTH.min((hyp / 3.0).floor() as i32);
        let head_length = 2 * head_width;
        // Always > hyp/3 because head_length <= 2*hyp/3; the clamp only
        // documents the floor.
        let shaft_length = (hyp - head_length as f64).max(0.0);

        let sin = dy / hyp;
        let cos = dx / hyp;
        let (x1, y1) = (start.x as f64, start.y as f64);
        let hw = head_width as f64;

        let corner = |side: f64| {
            (
                shaft_length * cos - side * sin + x1,
                shaft_length * sin + side * cos + y1,
            )
        };
        let corner_a = corner(hw);
        let corner_b = corner(-hw);

        let tip = (end.x as f64, end.y as f64);
        let centroid = (
            (tip.0 + corner_a.0 + corner_b.0) / 3.0,
            (tip.1 + corner_a.1 + corner_b.1) / 3.0,
        );

        Some(Self {
            hyp,
            head_width,
            head_length,
            shaft_length,
            corner_a,
            corner_b,
            centroid,
            start: (x1, y1),
            tip,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arrow {
    pub start: Point,
    pub end: Point,
}

impl Arrow {
    pub fn initialize(point: Point) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// `[end, start]`: the head is what the user drags first.
    pub fn handles(&self) -> Vec<Point> {
        vec![self.end, self.start]
    }

    pub fn move_handle(&mut self, index: usize, p: Point) -> bool {
        match index {
            0 => self.end = p,
            1 => self.start = p,
            _ => return false,
        }
        true
    }

    pub fn has_no_size(&self) -> bool {
        self.start == self.end
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_corners(self.start, self.end).inflate(MAX_HEAD_WIDTH + 2)
    }

    pub fn paint(&self, pixmap: &mut Pixmap, origin: Point, colour: Colour) {
        let Some(g) = ArrowGeometry::compute(self.start, self.end) else {
            return;
        };

        let transform = Transform::from_translate(-origin.x as f32, -origin.y as f32);

        let mut paint = Paint::default();
        paint.set_color(colour.to_skia());
        paint.anti_alias = true;

        let pt = |p: (f64, f64)| (p.0 as f32, p.1 as f32);

        if g.head_width == 0 {
            // Too short for a head: hairline shaft to the tip.
            let mut pb = PathBuilder::new();
            pb.move_to(pt(g.start).0, pt(g.start).1);
            pb.line_to(pt(g.tip).0, pt(g.tip).1);
            if let Some(path) = pb.finish() {
                let stroke = Stroke {
                    width: 1.0,
                    line_cap: LineCap::Round,
                    ..Stroke::default()
                };
                pixmap.stroke_path(&path, &paint, &stroke, transform, None);
            }
            return;
        }

        // Shaft
        let mut pb = PathBuilder::new();
        pb.move_to(pt(g.start).0, pt(g.start).1);
        pb.line_to(pt(g.centroid).0, pt(g.centroid).1);
        if let Some(path) = pb.finish() {
            let stroke = Stroke {
                width: g.head_width as f32,
                line_cap: LineCap::Round,
                line_join: LineJoin::Round,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, transform, None);
        }

        // Head: centroid, corner, tip, corner. Slimmer than a plain triangle.
        let mut pb = PathBuilder::new();
        pb.move_to(pt(g.centroid).0, pt(g.centroid).1);
        pb.line_to(pt(g.corner_a).0, pt(g.corner_a).1);
        pb.line_to(pt(g.tip).0, pt(g.tip).1);
        pb.line_to(pt(g.corner_b).0, pt(g.corner_b).1);
        pb.close();
        if let Some(path) = pb.finish() {
            pixmap.fill_path(&path, &paint, FillRule::EvenOdd, transform, None);
            let stroke = Stroke {
                width: head_stroke_width(g.head_width),
                line_cap: LineCap::Round,
                line_join: LineJoin::Round,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, transform, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(dx: i32, dy: i32) -> ArrowGeometry {
        ArrowGeometry::compute(Point::new(10, 10), Point::new(10 + dx, 10 + dy)).unwrap()
    }

    #[test]
    fn zero_length_has_no_geometry() {
        assert!(ArrowGeometry::compute(Point::new(4, 4), Point::new(4, 4)).is_none());
    }

    #[test]
    fn head_width_caps_at_eight() {
        let g = geometry(300, 400);
        assert_eq!(g.hyp, 500.0);
        assert_eq!(g.head_width, 8);
        assert_eq!(g.head_length, 16);
        assert_eq!(g.shaft_length, 484.0);
    }

    #[test]
    fn head_shrinks_on_short_arrows() {
        // hyp = 15 -> floor(15/3) = 5
        let g = geometry(9, 12);
        assert_eq!(g.head_width, 5);
        assert_eq!(g.head_length, 10);
        assert_eq!(g.shaft_length, 5.0);

        // hyp = 10 -> floor(10/3) = 3
        let g = geometry(6, 8);
        assert_eq!(g.head_width, 3);
        assert_eq!(g.shaft_length, 4.0);
    }

    #[test]
    fn very_short_arrows_keep_a_positive_shaft() {
        for len in 1..30 {
            let g = geometry(len, 0);
            assert!(g.shaft_length > 0.0, "len {len}");
            assert!(g.shaft_length >= g.hyp / 3.0, "len {len}");
        }
        // Below 3 px there is no head at all.
        assert_eq!(geometry(2, 0).head_width, 0);
        assert_eq!(geometry(3, 0).head_width, 1);
    }

    #[test]
    fn head_outline_thins_to_a_hairline() {
        assert_eq!(head_stroke_width(1), 0.0);
        assert_eq!(head_stroke_width(3), 1.0);
        assert_eq!(head_stroke_width(MAX_HEAD_WIDTH), 4.0);
    }

    #[test]
    fn one_px_head_still_paints_its_tip() {
        let mut pixmap = Pixmap::new(20, 10).unwrap();
        let arrow = Arrow { start: Point::new(2, 5), end: Point::new(6, 5) };
        arrow.paint(&mut pixmap, Point::new(0, 0), Colour::BLACK);
        assert!(pixmap.pixel(5, 5).unwrap().alpha() > 0);
    }

    #[test]
    fn head_corners_are_perpendicular_to_shaft() {
        // Horizontal arrow from (10,10) to (110,10): hw 8, shaft 84.
        let g = geometry(100, 0);
        assert_eq!(g.corner_a, (94.0, 18.0));
        assert_eq!(g.corner_b, (94.0, 2.0));
        assert!((g.centroid.0 - (110.0 + 94.0 + 94.0) / 3.0).abs() < 1e-9);
        assert!((g.centroid.1 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn handle_zero_is_the_head() {
        let mut a = Arrow::initialize(Point::new(1, 1));
        assert!(a.has_no_size());
        assert!(a.move_handle(0, Point::new(5, 9)));
        assert_eq!(a.handles(), vec![Point::new(5, 9), Point::new(1, 1)]);
        assert!(!a.move_handle(2, Point::new(0, 0)));
        assert!(!a.has_no_size());
    }
}
