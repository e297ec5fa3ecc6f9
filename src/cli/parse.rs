//! CLI parse: clap types for livepreview. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Livepreview CLI - classify, check and synthesize preview documents
#[derive(Parser)]
#[command(name = "livepreview")]
#[command(about = "Generation-gated live preview engine for small web projects")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project root directory
    #[arg(long, default_value = ".")]
    pub project: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report whether the project runs in framework or plain mode
    Classify {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Run the static error detector on the script entry
    Check,
    /// Write the synthesized preview document
    Synth {
        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Project path to override with unsaved content, e.g. /App.js
        #[arg(long, requires = "content_file")]
        entry: Option<String>,
        /// File holding the override content
        #[arg(long, requires = "entry")]
        content_file: Option<PathBuf>,
    },
    /// Write the sandboxed iframe element that hosts the document
    Embed {
        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Refresh once and show the preview status
    Status {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Re-synthesize the document whenever the project changes
    Watch {
        /// Output file rewritten after every refresh
        #[arg(long)]
        out: PathBuf,
        /// Debounce window in milliseconds
        #[arg(long, default_value = "100")]
        debounce_ms: u64,
    },
}

impl Commands {
    /// Command name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Classify { .. } => "classify",
            Commands::Check => "check",
            Commands::Synth { .. } => "synth",
            Commands::Embed { .. } => "embed",
            Commands::Status { .. } => "status",
            Commands::Watch { .. } => "watch",
        }
    }
}
