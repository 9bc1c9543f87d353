//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style, Stylize},
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::audio::{AudioEngine, PeakLevels};
use crate::config::UiSettings;
use crate::controller::{PlayState, PlaybackController};
use crate::library::FileType;

const CONTROLS: [(&str, &str); 7] = [
    ("space/p", "play/stop"),
    ("x", "stop"),
    ("h/l", "prev/next"),
    ("r", "random"),
    ("s", "shuffle"),
    ("+/-", "volume"),
    ("q", "quit"),
];

/// Render the controls help text.
fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{}] {}", k, v))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Render a peak level in `[0, 1]` as a bar of `width` cells.
fn meter_bar(level: f32, width: usize) -> String {
    let level = if level.is_nan() { 0.0 } else { level.clamp(0.0, 1.0) };
    let filled = (level * width as f32).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}

/// A snapshot of everything the screen shows, taken once per frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusView {
    pub playing: bool,
    /// The engine still reports output for the active channel.
    pub sounding: bool,
    pub shuffle: bool,
    pub index: Option<usize>,
    pub total: usize,
    pub name: Option<String>,
    pub file_type: FileType,
    pub position: Duration,
    pub duration: Duration,
    pub progress: f32,
    pub volume: f32,
    pub peak: PeakLevels,
    pub dir: String,
}

impl StatusView {
    pub fn of<E: AudioEngine, R>(controller: &PlaybackController<E, R>) -> Self {
        Self {
            playing: controller.state() == PlayState::Playing,
            sounding: controller.engine_active(),
            shuffle: controller.is_shuffle(),
            index: controller.current_index(),
            total: controller.catalog().len(),
            name: controller.current_entry().map(|e| e.name()),
            file_type: controller.currently_playing_type(),
            position: controller.position(),
            duration: controller.duration(),
            progress: controller.progress(),
            volume: controller.volume(),
            peak: controller.peak(),
            dir: controller.catalog().root().display().to_string(),
        }
    }

    /// The ` • `-joined status line.
    fn status_line(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        let state = match (self.playing, self.sounding) {
            (true, true) => "Playing",
            (true, false) => "Playing (finishing)",
            (false, _) => "Stopped",
        };
        parts.push(state.to_string());

        match (self.index, &self.name) {
            (Some(i), Some(name)) => parts.push(format!("File {}/{}: {}", i + 1, self.total, name)),
            _ => parts.push("No playable files".to_string()),
        }

        if self.playing {
            parts.push(format!("Type: {}", self.file_type));
        }

        if self.shuffle {
            parts.push("Shuffle: ON".to_string());
        } else {
            parts.push("Shuffle: OFF".to_string());
        }

        parts.push(format!("Vol: {:.0}%", self.volume * 100.0));
        parts.push(format!("Dir: {}", self.dir));

        parts.join(" • ")
    }

    fn time_label(&self) -> String {
        format!("{} / {}", format_mmss(self.position), format_mmss(self.duration))
    }
}

/// Render the entire UI into the provided `frame`.
pub fn draw(frame: &mut Frame, view: &StatusView, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" cardplay ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status_par = Paragraph::new(view.status_line())
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    let ratio = f64::from(view.progress).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .gauge_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .ratio(ratio)
        .label(view.time_label());
    frame.render_widget(gauge, chunks[2]);

    // Peak meter, two rows.
    let width = chunks[3].width.saturating_sub(8) as usize;
    let meter = Paragraph::new(format!(
        "L {}\nR {}",
        meter_bar(view.peak.left, width),
        meter_bar(view.peak.right, width)
    ))
    .dim()
    .block(Block::default().borders(Borders::ALL).title(" level "));
    frame.render_widget(meter, chunks[3]);

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[5]);
}
