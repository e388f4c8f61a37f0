//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use crate::core::history::MemoryHistory;
use crate::core::transcoder::Transcoder;

/// Creates a transcoder backed by in-memory history, plus a handle to that history.
pub fn memory_transcoder() -> (Transcoder, Arc<MemoryHistory>) {
    let history = Arc::new(MemoryHistory::new());
    (Transcoder::new(history.clone()), history)
}
