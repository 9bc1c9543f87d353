use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Where log lines go. The terminal UI owns stdout/stderr, so it only logs
/// to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Silent,
}

impl LogTarget {
    pub fn choose(headless: bool, file: Option<&Path>) -> Self {
        match (headless, file) {
            (true, _) => LogTarget::Stderr,
            (false, Some(path)) => LogTarget::File(path.to_path_buf()),
            (false, None) => LogTarget::Silent,
        }
    }
}

/// Build the filter: `RUST_LOG` wins over the configured default directive.
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init_logging(default_level: &str, target: &LogTarget) -> anyhow::Result<()> {
    let (stderr_layer, file_layer) = match target {
        LogTarget::Stderr => (Some(fmt::layer().with_writer(std::io::stderr)), None),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            (
                None,
                Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file))),
            )
        }
        LogTarget::Silent => return Ok(()),
    };

    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("installing the tracing subscriber")?;
    Ok(())
}
