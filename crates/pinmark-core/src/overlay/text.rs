// License: MIT
//
// Text box: a framed plate holding one or more lines of text.
// Glyphs are rasterized through resvg from a generated SVG snippet.

use std::sync::Arc;

use eventline::warn;
use once_cell::sync::OnceCell;
use resvg::usvg;
use tiny_skia::{Paint, Pixmap, Rect as SkRect, Stroke, Transform};

use crate::colour::Colour;
use crate::geometry::{Point, Rect};

use super::frame::outline_path;

pub const FONT_SIZE: f32 = 16.0;
pub const LINE_HEIGHT: f32 = 20.0;
pub const TEXT_PADDING: f32 = 4.0;

const PLATE_ALPHA: u8 = 0xD0;
const BORDER_WIDTH: f32 = 2.0;

static FONTS: OnceCell<Arc<usvg::fontdb::Database>> = OnceCell::new();

fn fonts() -> Arc<usvg::fontdb::Database> {
    FONTS
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            Arc::new(db)
        })
        .clone()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextBox {
    pub corner: Point,
    pub anchor: Point,
    pub text: String,
    pub text_colour: Colour,
}

impl TextBox {
    pub fn initialize(point: Point, text_colour: Colour) -> Self {
        Self {
            corner: point,
            anchor: point,
            text: String::new(),
            text_colour,
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
        self.rect().inflate(BORDER_WIDTH as i32 + 1)
    }

    pub fn paint(&self, pixmap: &mut Pixmap, origin: Point, colour: Colour) {
        let r = self.rect();
        if r.is_empty() {
            return;
        }

        let transform = Transform::from_translate(-origin.x as f32, -origin.y as f32);

        if let Some(plate) = SkRect::from_xywh(r.x as f32, r.y as f32, r.w as f32, r.h as f32) {
            let mut paint = Paint::default();
            paint.set_color(Colour::WHITE.with_alpha(PLATE_ALPHA).to_skia());
            pixmap.fill_rect(plate, &paint, transform, None);
        }

        if let Some(path) = outline_path(r) {
            let mut paint = Paint::default();
            paint.set_color(colour.to_skia());
            paint.anti_alias = true;
            let stroke = Stroke {
                width: BORDER_WIDTH,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, transform, None);
        }

        if self.text.is_empty() {
            return;
        }

        let svg = text_svg(&self.text, r.w, r.h, self.text_colour);
        let mut opt = usvg::Options::default();
        opt.fontdb = fonts();

        match usvg::Tree::from_data(svg.as_bytes(), &opt) {
            Ok(tree) => {
                let at = transform.pre_translate(r.x as f32, r.y as f32);
                resvg::render(&tree, at, &mut pixmap.as_mut());
            }
            Err(e) => warn!("text overlay: usvg parse: {e:?}"),
        }
    }
}

fn text_svg(text: &str, w: i32, h: i32, colour: Colour) -> String {
    let fill = format!("#{:06X}", colour.0 & 0x00FF_FFFF);
    let opacity = colour.a() as f32 / 255.0;

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
    );
    for (i, line) in text.lines().enumerate() {
        let y = TEXT_PADDING + FONT_SIZE + i as f32 * LINE_HEIGHT;
        svg.push_str(&format!(
            "<text x=\"{TEXT_PADDING}\" y=\"{y}\" font-family=\"sans-serif\" font-size=\"{FONT_SIZE}\" fill=\"{fill}\" fill-opacity=\"{opacity}\">{}</text>",
            escape_xml(line)
        ));
    }
    svg.push_str("</svg>");
    svg
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
