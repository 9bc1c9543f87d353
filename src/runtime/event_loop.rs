use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use rand::Rng;
use tracing::debug;

use crate::audio::AudioEngine;
use crate::config;
use crate::controller::PlaybackController;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::commands::handle_control_cmd;
use crate::runtime::mpris_sync::update_mpris;
use crate::ui::{self, StatusView};

/// Map a key press to the transport command it issues.
pub fn key_to_command(key: KeyEvent) -> Option<ControlCmd> {
    let cmd = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => ControlCmd::Quit,
        KeyCode::Char(' ') | KeyCode::Char('p') => ControlCmd::PlayPause,
        KeyCode::Char('x') => ControlCmd::Stop,
        KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Right => ControlCmd::Next,
        KeyCode::Char('h') | KeyCode::Char('b') | KeyCode::Left => ControlCmd::Prev,
        KeyCode::Char('r') => ControlCmd::Randomize,
        KeyCode::Char('s') => ControlCmd::ToggleShuffle,
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => ControlCmd::VolumeUp,
        KeyCode::Char('-') | KeyCode::Down => ControlCmd::VolumeDown,
        _ => return None,
    };
    Some(cmd)
}

/// Main terminal event loop: ticks the controller, keeps MPRIS in sync,
/// draws, then handles remote commands and key presses. Returns `Ok(())`
/// when shutdown is requested.
pub fn run<E: AudioEngine, R: Rng>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut PlaybackController<E, R>,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> anyhow::Result<()> {
    let tick = Duration::from_millis(settings.playback.tick_ms);
    let volume_step = settings.ui.volume_step;

    loop {
        if let Err(e) = controller.tick() {
            debug!(error = %e, "auto-advance failed");
        }

        // Playback changes can come from media keys or auto-advance.
        update_mpris(mpris, controller);

        let view = StatusView::of(controller);
        terminal.draw(|f| ui::draw(f, &view, &settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, controller, volume_step) {
                return Ok(());
            }
        }

        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(cmd) = key_to_command(key) {
                    if handle_control_cmd(cmd, controller, volume_step) {
                        return Ok(());
                    }
                }
            }
        }
    }
}
