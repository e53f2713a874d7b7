// License: MIT
//
// Headless annotation: replays arrows, frames and text boxes onto an image
// through the same editing surface an interactive editor would use.

use std::path::PathBuf;

use eventline::{info, warn};

use pinmark_core::{palette, Colour, EditingSurface, OverlayKind, PrefStore, ToolBox};

use crate::cli::{Span, TextSpan};
use crate::config::PinmarkConfig;

#[derive(Debug, Default)]
pub struct AnnotateJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub arrows: Vec<Span>,
    pub frames: Vec<Span>,
    pub texts: Vec<TextSpan>,
    pub colour: Option<String>,
    pub text_colour: Option<String>,
    pub remember: bool,
}

pub fn run_annotate(
    job: AnnotateJob,
    config: &PinmarkConfig,
    prefs: &mut dyn PrefStore,
) -> Result<usize, String> {
    let mut tools = ToolBox::new();
    if let Some(c) = config.text_colour {
        tools.text_tool_mut().set_text_colour(c);
    }
    tools.load_colours(prefs);

    if let Some(c) = job.colour.as_deref() {
        let colour = parse_colour("--colour", c, prefs)?;
        for kind in OverlayKind::ALL {
            tools.remember_colour(kind, colour);
        }
    }
    if let Some(c) = job.text_colour.as_deref() {
        tools.text_tool_mut().set_text_colour(parse_colour("--text-colour", c, prefs)?);
    }

    let mut surface = EditingSurface::from_png(&job.input, tools)
        .map_err(|e| format!("failed to open {}: {e}", job.input.display()))?;

    let mut placed = 0;
    let mut place = |surface: &mut EditingSurface, kind: OverlayKind, span: &Span| {
        match surface.place(kind, span.from, span.to) {
            Some(_) => placed += 1,
            None => warn!("skipping empty {} at {:?}", kind.name(), span.from),
        }
    };

    for span in &job.arrows {
        place(&mut surface, OverlayKind::Arrow, span);
    }
    for span in &job.frames {
        place(&mut surface, OverlayKind::Frame, span);
    }
    for t in &job.texts {
        if surface.place(OverlayKind::Text, t.span.from, t.span.to).is_some() {
            surface.set_selected_text(&t.text);
            placed += 1;
        } else {
            warn!("skipping empty text box at {:?}", t.span.from);
        }
    }

    surface
        .export_png(&job.output)
        .map_err(|e| format!("failed to write {}: {e}", job.output.display()))?;
    info!("annotate: {} overlay(s) -> {}", placed, job.output.display());

    if job.remember {
        surface
            .tools()
            .save_colours(prefs)
            .map_err(|e| format!("failed to save tool colours: {e}"))?;
    }

    Ok(placed)
}

/// Hex colour, or a bare digit naming a slot of the stored palette.
fn parse_colour(flag: &str, s: &str, prefs: &dyn PrefStore) -> Result<Colour, String> {
    if let Ok(slot) = s.parse::<usize>() {
        let palette = palette::load(prefs);
        return palette
            .get(slot)
            .copied()
            .ok_or_else(|| format!("{flag}: palette slot {slot} out of range 0-{}", palette.len() - 1));
    }
    Colour::parse_hex(s).map_err(|e| format!("{flag}: {e}"))
}
