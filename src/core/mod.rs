//! # Core Application Logic
//!
//! This module contains dotdash's business logic.
//! It knows nothing about prompts, colors or the terminal.
//!
//! ```text
//!     ┌────────────┐   encode/decode   ┌──────────────┐   append   ┌──────────────┐
//!     │  REPL /    │ ────────────────▶ │  Transcoder  │ ─────────▶ │ HistorySink  │
//!     │  one-shot  │                   │              │            │ (JSON file / │
//!     └─────┬──────┘                   └──────┬───────┘            │  in-memory)  │
//!           │ convert_file                    │ lookups            └──────────────┘
//!           ▼                                 ▼
//!     ┌────────────┐                   ┌──────────────┐
//!     │    file    │                   │  CodeTable   │
//!     └────────────┘                   └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`table`]: the fixed character ↔ Morse mapping
//! - [`transcoder`]: encode/decode with validation
//! - [`history`]: the append-only JSON history
//! - [`file`]: whole-file conversion with input checks
//! - [`config`]: config file and override resolution

pub mod config;
pub mod file;
pub mod history;
pub mod table;
pub mod transcoder;

// Re-export commonly used types for convenience
pub use file::{FileConversion, FileError, FileOptions, convert_file};
pub use history::{HistoryEntry, HistoryError, HistorySink, HistoryStore, MemoryHistory};
pub use table::CodeTable;
pub use transcoder::{TranscodeError, Transcoder, is_morse};
