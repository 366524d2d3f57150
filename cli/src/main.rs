mod animation;
mod config;
mod prompt;
mod session;

use clap::Parser;
use config::{Config, ConfigError};
use glyphcast::{LoadError, RampPreset, TerminalSurface};
use prompt::Prompter;
use session::Session;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Render BMP and JPEG images as ASCII art in the terminal
#[derive(Parser, Debug)]
#[command(name = "glyphcast", version, about)]
struct Args {
    /// Images to load before the menu opens
    images: Vec<PathBuf>,

    /// Glyph ramp preset for new images (dense or sparse)
    #[arg(long)]
    ramp: Option<RampPreset>,

    /// Explicit glyph ramp, darkest first, overrides --ramp
    #[arg(long, value_name = "CHARS")]
    custom_ramp: Option<String>,

    /// Config file (default: <config dir>/glyphcast/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Do not draw the splash image on startup
    #[arg(long)]
    no_splash: bool,
}

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = Config::load(args.config.as_deref())?;
    let ramp = config.resolve_ramp(args.ramp, args.custom_ramp.as_deref())?;
    let splash = if args.no_splash {
        None
    } else {
        config.splash.clone()
    };
    log::debug!("starting with ramp {:?}", ramp.to_string());

    let stdin = io::stdin();
    let mut session = Session::new(
        Prompter::new(stdin.lock(), io::stdout()),
        TerminalSurface::stdout(),
        ramp,
    )
    .with_animation_defaults(config.animation)
    .with_splash(splash);

    for path in &args.images {
        let path = prompt::clean_path(&path.to_string_lossy());
        session.add_path(&path)?;
    }

    session.run()?;
    Ok(())
}
