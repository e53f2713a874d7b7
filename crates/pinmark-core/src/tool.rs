// License: MIT
//
// Tools create overlays. One instance per kind lives for the whole process;
// the only state a tool keeps is the colour it offers for the next overlay.
//
// Recolouring an overlay does not feed back into its tool. A caller that
// wants the new colour to stick for future overlays must call
// `ToolBox::remember_colour` itself.

use eventline::debug;

use crate::colour::Colour;
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::overlay::{Overlay, OverlayKind};
use crate::prefs::PrefStore;

pub const TOOL_COLOUR_PREFIX: &str = "tool.color.";

pub const DEFAULT_TOOL_COLOUR: Colour = Colour::RED;
pub const DEFAULT_TEXT_COLOUR: Colour = Colour::BLACK;

/// What a tool may know about the surface it draws on.
#[derive(Clone, Copy, Debug)]
pub struct ToolContext {
    pub bounds: Rect,
}

pub trait Tool {
    fn kind(&self) -> OverlayKind;

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Colour offered for the next overlay.
    fn colour(&self) -> Colour;

    fn set_colour(&mut self, colour: Colour);

    fn create(&self, point: Point, colour: Colour, ctx: &ToolContext) -> Overlay;
}

#[derive(Debug)]
pub struct ArrowTool {
    colour: Colour,
}

impl Tool for ArrowTool {
    fn kind(&self) -> OverlayKind {
        OverlayKind::Arrow
    }

    fn colour(&self) -> Colour {
        self.colour
    }

    fn set_colour(&mut self, colour: Colour) {
        self.colour = colour;
    }

    fn create(&self, point: Point, colour: Colour, _ctx: &ToolContext) -> Overlay {
        Overlay::initialize(OverlayKind::Arrow, point, colour)
    }
}

#[derive(Debug)]
pub struct FrameTool {
    colour: Colour,
}

impl Tool for FrameTool {
    fn kind(&self) -> OverlayKind {
        OverlayKind::Frame
    }

    fn colour(&self) -> Colour {
        self.colour
    }

    fn set_colour(&mut self, colour: Colour) {
        self.colour = colour;
    }

    fn create(&self, point: Point, colour: Colour, _ctx: &ToolContext) -> Overlay {
        Overlay::initialize(OverlayKind::Frame, point, colour)
    }
}

/// Text boxes take the frame colour from the caller and the glyph colour
/// from the tool.
#[derive(Debug)]
pub struct TextTool {
    colour: Colour,
    text_colour: Colour,
}

impl TextTool {
    pub fn text_colour(&self) -> Colour {
        self.text_colour
    }

    pub fn set_text_colour(&mut self, colour: Colour) {
        self.text_colour = colour;
    }
}

impl Tool for TextTool {
    fn kind(&self) -> OverlayKind {
        OverlayKind::Text
    }

    fn colour(&self) -> Colour {
        self.colour
    }

    fn set_colour(&mut self, colour: Colour) {
        self.colour = colour;
    }

    fn create(&self, point: Point, colour: Colour, _ctx: &ToolContext) -> Overlay {
        let mut overlay = Overlay::initialize(OverlayKind::Text, point, colour);
        overlay.set_text_colour(self.text_colour);
        overlay
    }
}

/// Registry of the process-wide tools, one per overlay kind.
pub struct ToolBox {
    arrow: ArrowTool,
    frame: FrameTool,
    text: TextTool,
    active: OverlayKind,
}

impl Default for ToolBox {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolBox {
    pub fn new() -> Self {
        Self {
            arrow: ArrowTool { colour: DEFAULT_TOOL_COLOUR },
            frame: FrameTool { colour: DEFAULT_TOOL_COLOUR },
            text: TextTool {
                colour: DEFAULT_TOOL_COLOUR,
                text_colour: DEFAULT_TEXT_COLOUR,
            },
            active: OverlayKind::Arrow,
        }
    }

    pub fn get(&self, kind: OverlayKind) -> &dyn Tool {
        match kind {
            OverlayKind::Arrow => &self.arrow,
            OverlayKind::Frame => &self.frame,
            OverlayKind::Text => &self.text,
        }
    }

    pub fn get_mut(&mut self, kind: OverlayKind) -> &mut dyn Tool {
        match kind {
            OverlayKind::Arrow => &mut self.arrow,
            OverlayKind::Frame => &mut self.frame,
            OverlayKind::Text => &mut self.text,
        }
    }

    pub fn text_tool(&self) -> &TextTool {
        &self.text
    }

    pub fn text_tool_mut(&mut self) -> &mut TextTool {
        &mut self.text
    }

    pub fn active(&self) -> &dyn Tool {
        self.get(self.active)
    }

    pub fn active_kind(&self) -> OverlayKind {
        self.active
    }

    pub fn set_active(&mut self, kind: OverlayKind) {
        self.active = kind;
    }

    /// Makes `colour` the default for the next overlay of `kind`.
    pub fn remember_colour(&mut self, kind: OverlayKind, colour: Colour) {
        self.get_mut(kind).set_colour(colour);
    }

    /// Reads `tool.color.<Name>` keys; missing or malformed values keep the
    /// built-in default.
    pub fn load_colours(&mut self, prefs: &dyn PrefStore) {
        for kind in OverlayKind::ALL {
            let key = format!("{TOOL_COLOUR_PREFIX}{}", kind.name());
            match prefs.get(&key).map(|s| Colour::parse_hex(&s)) {
                Some(Ok(c)) => self.get_mut(kind).set_colour(c),
                Some(Err(e)) => debug!("ignoring {key}: {e}"),
                None => {}
            }
        }
    }

    /// Writes the remembered colours and flushes the store.
    pub fn save_colours(&self, prefs: &mut dyn PrefStore) -> Result<()> {
        for kind in OverlayKind::ALL {
            let key = format!("{TOOL_COLOUR_PREFIX}{}", kind.name());
            prefs.set(&key, &self.get(kind).colour().to_hex());
        }
        prefs.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPrefs;

    fn ctx() -> ToolContext {
        ToolContext { bounds: Rect::new(0, 0, 100, 100) }
    }

    #[test]
    fn create_uses_given_colour_and_point() {
        let tools = ToolBox::new();
        let o = tools.get(OverlayKind::Frame).create(Point::new(4, 5), Colour::BLACK, &ctx());
        assert_eq!(o.kind(), OverlayKind::Frame);
        assert_eq!(o.colour(), Colour::BLACK);
        assert_eq!(o.handles()[0], Point::new(4, 5));
    }

    #[test]
    fn text_tool_applies_sticky_text_colour() {
        let mut tools = ToolBox::new();
        tools.text_tool_mut().set_text_colour(Colour::rgb(0, 0, 255));
        let o = tools.get(OverlayKind::Text).create(Point::new(0, 0), Colour::RED, &ctx());
        match o.shape() {
            crate::overlay::Shape::Text(t) => assert_eq!(t.text_colour, Colour::rgb(0, 0, 255)),
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn recolouring_an_overlay_does_not_touch_the_tool() {
        let mut tools = ToolBox::new();
        let mut o = tools.active().create(Point::new(0, 0), tools.active().colour(), &ctx());
        o.set_colour(Colour::BLACK);
        assert_eq!(tools.active().colour(), DEFAULT_TOOL_COLOUR);

        tools.remember_colour(o.kind(), o.colour());
        assert_eq!(tools.active().colour(), Colour::BLACK);
    }

    #[test]
    fn colours_round_trip_through_prefs() {
        let mut prefs = MemoryPrefs::new();
        let mut tools = ToolBox::new();
        tools.remember_colour(OverlayKind::Frame, Colour::rgb(1, 2, 3));
        tools.save_colours(&mut prefs).unwrap();
        assert_eq!(prefs.get("tool.color.Frame").as_deref(), Some("#010203"));

        prefs.set("tool.color.Arrow", "garbage");
        let mut fresh = ToolBox::new();
        fresh.load_colours(&prefs);
        assert_eq!(fresh.get(OverlayKind::Frame).colour(), Colour::rgb(1, 2, 3));
        assert_eq!(fresh.get(OverlayKind::Arrow).colour(), DEFAULT_TOOL_COLOUR);
    }
}
