use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Plain-text checklist task manager.
/// Tasks live as markdown task blocks inside ordinary note files.
#[derive(Parser)]
#[command(name = "td", version, about = "Plain-text task block manager")]
pub struct Cli {
    /// Path to the note file to operate on.
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
