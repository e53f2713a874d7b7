// License: MIT

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};

use pinmark_core::Point;

#[derive(Debug, Parser)]
#[command(name = "pinmark", version, about = "Pinmark: a docked capture launcher and annotator.")]
pub struct Args {
    /// Log to stderr (in addition to the log file)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Override log file path (default: $XDG_STATE_HOME/pinmark/pinmark.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Override preferences file (default: $XDG_CONFIG_HOME/pinmark/prefs.json)
    #[arg(long)]
    pub prefs: Option<PathBuf>,

    /// Override config file (default: $XDG_CONFIG_HOME/pinmark/pinmark.rune)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Show the docking widget (default)
    Dock,

    /// Draw annotations onto a PNG and write the result
    Annotate {
        /// Source image
        input: PathBuf,

        /// Where to write the annotated PNG
        #[arg(long, short = 'o')]
        output: PathBuf,

        /// Arrow from the first point to the second (repeatable)
        #[arg(long, value_name = "X1,Y1,X2,Y2")]
        arrow: Vec<Span>,

        /// Rectangle frame between two corners (repeatable)
        #[arg(long, value_name = "X1,Y1,X2,Y2")]
        frame: Vec<Span>,

        /// Text box between two corners, then its content (repeatable)
        #[arg(long, value_name = "X1,Y1,X2,Y2:TEXT")]
        text: Vec<TextSpan>,

        /// Overlay colour for this run (#RRGGBB, #AARRGGBB or palette slot 0-8)
        #[arg(long)]
        colour: Option<String>,

        /// Text colour for text boxes, same forms as --colour
        #[arg(long)]
        text_colour: Option<String>,

        /// Keep --colour as the tools' default for later runs
        #[arg(long)]
        remember: bool,
    },
}

/// Two points, `x1,y1,x2,y2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub from: Point,
    pub to: Point,
}

impl FromStr for Span {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<i32>().map_err(|e| format!("\"{p}\": {e}")))
            .collect::<Result<Vec<_>, _>>()?;

        match parts.as_slice() {
            [x1, y1, x2, y2] => Ok(Span {
                from: Point::new(*x1, *y1),
                to: Point::new(*x2, *y2),
            }),
            _ => Err(format!("expected X1,Y1,X2,Y2, got \"{s}\"")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub span: Span,
    pub text: String,
}

impl FromStr for TextSpan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (span, text) = s
            .split_once(':')
            .ok_or_else(|| format!("expected X1,Y1,X2,Y2:TEXT, got \"{s}\""))?;
        Ok(TextSpan {
            span: span.parse()?,
            text: text.to_string(),
        })
    }
}
