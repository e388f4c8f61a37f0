//! # Command Line
//!
//! Argument definitions and the one-shot commands (`encode`, `decode`,
//! `file`). `main.rs` only parses, sets up logging and picks between these
//! and the interactive loop.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::info;

use crate::Direction;
use crate::core::config::{CliOverrides, ResolvedConfig};
use crate::core::{FileOptions, HistorySink, HistoryStore, MemoryHistory, Transcoder, convert_file};

#[derive(Parser, Debug)]
#[command(name = "dotdash", about = "Text ↔ Morse code converter")]
pub struct Args {
    /// History file to append conversions to
    #[arg(long, global = true)]
    pub history: Option<PathBuf>,

    /// Don't write conversions to the history file
    #[arg(long, global = true)]
    pub no_history: bool,

    /// Fail instead of discarding a corrupt history file
    #[arg(long, global = true)]
    pub strict_history: bool,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Plain error output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Run once instead of starting the interactive menu
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            history_path: self.history.clone(),
            no_history: self.no_history,
            strict_history: self.strict_history,
            verbose: self.verbose,
            no_color: self.no_color,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Text → Morse
    Encode {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Morse → text
    Decode {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        morse: Vec<String>,
    },
    /// Convert a .txt file, writing the result next to it
    File {
        path: PathBuf,
        /// What to produce
        #[arg(long, value_enum)]
        to: Direction,
        /// Encode even if the file already looks like Morse
        #[arg(long)]
        force: bool,
    },
}

/// History file when enabled, otherwise an in-memory sink that is dropped on exit.
pub fn build_history(config: &ResolvedConfig) -> Arc<dyn HistorySink> {
    if config.history_enabled {
        Arc::new(HistoryStore::with_strict(&config.history_path, config.strict_history))
    } else {
        info!("History disabled, keeping conversions in memory");
        Arc::new(MemoryHistory::new())
    }
}

/// Runs a one-shot command and returns what should be printed.
pub fn run_command(
    transcoder: &Transcoder,
    config: &ResolvedConfig,
    command: Command,
) -> Result<String, Box<dyn Error>> {
    match command {
        Command::Encode { text } => Ok(transcoder.encode(&text.join(" "))?),
        Command::Decode { morse } => Ok(transcoder.decode(&morse.join(" "))?),
        Command::File { path, to, force } => {
            let options = FileOptions {
                max_size: config.max_file_size,
                force,
            };
            let done = convert_file(transcoder, &path, to, &options)?;
            Ok(done.output_path.display().to_string())
        }
    }
}
