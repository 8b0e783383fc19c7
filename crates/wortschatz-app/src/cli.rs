use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "wortschatz", version, about = "Personal German vocabulary trainer")]
pub struct Cli {
    /// Profile name under the config directory
    #[arg(long, default_value = "main")]
    pub profile: String,

    /// Where the word collection is stored
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Keep everything in memory, nothing is written to disk
    #[arg(long)]
    pub ephemeral: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive terminal session (default)
    Run,
    /// Print the collection, optionally filtered
    List { search: Option<String> },
    /// Print collection counters
    Stats,
    /// Pronounce a word or phrase
    Say { text: String },
}
