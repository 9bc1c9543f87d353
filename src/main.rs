use std::path::PathBuf;

use clap::Parser;

mod audio;
mod config;
mod controller;
mod error;
mod library;
mod mpris;
mod runtime;
mod ui;

/// Play a directory of audio files, card-player style.
#[derive(Parser, Debug)]
#[command(name = "cardplay", version, about)]
pub struct Cli {
    /// Directory holding the audio files (default: config, then cwd)
    #[arg(env = "CARDPLAY_DIR")]
    directory: Option<PathBuf>,

    /// Run without the terminal UI, logging to stderr
    #[arg(long)]
    headless: bool,

    /// Start with shuffle enabled
    #[arg(long)]
    shuffle: bool,

    /// Do not start playing after the scan
    #[arg(long)]
    no_autoplay: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    runtime::run(cli)
}
