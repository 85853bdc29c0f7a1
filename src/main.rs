mod actions;
mod app;
mod components;
mod config;
mod error;
mod event;
mod fs;
mod handler;
mod theme;
mod tui;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::app::App;
use crate::config::AppConfig;
use crate::event::{Event, EventHandler};
use crate::tui::{install_panic_hook, Tui};

/// Select paths from a directory tree.
#[derive(Parser, Debug)]
#[command(name = "pathpick", version, about)]
struct Cli {
    /// Root path to browse (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Suppress dot-prefixed entries at startup
    #[arg(short = 'H', long)]
    no_hidden: bool,

    /// Emit picked paths relative to the root
    #[arg(short, long)]
    relative: bool,

    /// Explicit config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Theme override: "dark", "light" or "custom"
    #[arg(long)]
    theme: Option<String>,
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();

    let root = cli.path.canonicalize().map_err(|_| {
        error::AppError::InvalidPath(format!("{} does not exist", cli.path.display()))
    })?;

    let mut overrides = AppConfig::default();
    if cli.no_hidden {
        overrides.general.show_hidden = Some(false);
    }
    if cli.relative {
        overrides.general.relative = Some(true);
    }
    if let Some(scheme) = &cli.theme {
        overrides.theme.scheme = Some(scheme.clone());
    }
    let config = AppConfig::load(cli.config.as_deref(), Some(&overrides));
    let relative = config.relative();

    install_panic_hook();

    let mut tui = Tui::new()?;
    let mut app = App::new(&root, config.show_hidden(), theme::resolve_theme(&config.theme));
    let mut events = EventHandler::new(Duration::from_millis(16));

    loop {
        // One event is fully applied before the next render reads the state:
        // re-flatten, wrap the cursor, fill requested sizes, then draw.
        app.refresh();
        tui.terminal_mut().draw(|frame| {
            ui::render(&mut app, frame);
        })?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key),
            Event::Tick => {}
            // Geometry is recomputed from the frame on the next draw.
            Event::Resize(_, _) => {}
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;

    for line in app.picked_paths(relative) {
        println!("{line}");
    }
    Ok(())
}
