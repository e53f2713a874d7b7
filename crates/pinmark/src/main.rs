// License: MIT

mod annotate;
mod cli;
mod config;
mod dock;
mod logging;
mod paths;
mod views;

use clap::Parser;

use eventline::{debug, error, info};

use pinmark_core::{JsonPrefs, PrefStore};
use pinmark_dock::{AppContext, Dock, DockAssets, EXIT_RESOURCE_LOAD};

use crate::annotate::{run_annotate, AnnotateJob};
use crate::cli::{Args, Cmd};
use crate::config::PinmarkConfig;
use crate::logging::init_logging;
use crate::paths::{default_config_path, default_log_path, default_prefs_path};
use crate::views::{CommandViews, ExitSignal};

fn main() {
    let args = Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| default_log_path("pinmark.log"));

    if let Err(e) = init_logging(&log_path, args.verbose) {
        // logging should never block normal usage
        eprintln!("pinmark: failed to init logging: {e}");
    }

    if let Err(e) = run(args) {
        error!("{e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    info!("starting pinmark");
    debug!("parsed args: {:?}", args.cmd);

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let config = config::load(&config_path)?;

    let prefs_path = args.prefs.clone().unwrap_or_else(default_prefs_path);
    let mut prefs = JsonPrefs::load(&prefs_path);
    debug!("preferences at {}", prefs.path().display());

    match args.cmd.unwrap_or(Cmd::Dock) {
        Cmd::Dock => run_dock(config, Box::new(prefs)),

        Cmd::Annotate {
            input,
            output,
            arrow,
            frame,
            text,
            colour,
            text_colour,
            remember,
        } => {
            let written = output.clone();
            let job = AnnotateJob {
                input,
                output,
                arrows: arrow,
                frames: frame,
                texts: text,
                colour,
                text_colour,
                remember,
            };
            let placed = run_annotate(job, &config, &mut prefs)?;
            debug!("{placed} overlay(s) placed");
            // user-facing output
            println!("{}", written.display());
            Ok(())
        }
    }
}

fn run_dock(config: PinmarkConfig, prefs: Box<dyn PrefStore>) -> Result<(), String> {
    // Every image must decode before anything is shown.
    let assets = match DockAssets::load() {
        Ok(a) => a,
        Err(e) => {
            error!("{e}");
            eprintln!("pinmark: {e}");
            std::process::exit(EXIT_RESOURCE_LOAD);
        }
    };

    let exits = ExitSignal::default();
    let context = AppContext::new(Box::new(CommandViews::new(config, exits.clone())));
    let widget = Dock::new(assets, prefs, context, dock::FALLBACK_SCREEN);

    dock::run_dock(widget, &exits)
}
