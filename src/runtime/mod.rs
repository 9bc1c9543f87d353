use std::env;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::Cli;
use crate::audio::RodioEngine;
use crate::config;
use crate::controller::PlaybackController;
use crate::library::FsStorage;
use crate::mpris::ControlCmd;

mod commands;
mod event_loop;
mod headless;
mod logging;
mod mpris_sync;
mod settings;
mod startup;


/// Directory to catalog: CLI argument, then `[library] directory`, then the
/// working directory.
pub fn resolve_directory(cli_dir: Option<PathBuf>, settings: &config::Settings) -> PathBuf {
    cli_dir
        .or_else(|| settings.library.directory.clone())
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let (settings, settings_warning) = settings::load_settings();

    if cli.print_default_config {
        print!("{}", config::Settings::default().to_toml()?);
        return Ok(());
    }

    let target = logging::LogTarget::choose(cli.headless, settings.logging.file.as_deref());
    logging::init_logging(&settings.logging.level, &target)?;
    if let Some(msg) = settings_warning {
        warn!("{msg}");
    }

    let dir = resolve_directory(cli.directory.clone(), &settings);
    info!(dir = %dir.display(), "starting cardplay");

    let engine = RodioEngine::open_default().context("opening the audio output")?;
    let storage = FsStorage::new(settings.library.follow_links);
    let mut controller = PlaybackController::new(engine);

    let found = controller
        .begin(&storage, &dir)
        .with_context(|| format!("cataloging {}", dir.display()))?;
    info!(found, "catalog ready");

    let opts = startup::StartupOptions::resolve(&settings, cli.shuffle, cli.no_autoplay);
    startup::apply_playback_defaults(&mut controller, opts);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());
    mpris_sync::update_mpris(&mpris, &controller);

    if cli.headless {
        return headless::run(
            &mut controller,
            &mpris,
            &control_rx,
            Duration::from_millis(settings.playback.tick_ms),
            settings.ui.volume_step,
        );
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut controller, &mpris, &control_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    controller.stop();
    run_result
}
