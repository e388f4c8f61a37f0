//! # Transcoder
//!
//! Text → Morse and Morse → text over the `CodeTable`.
//!
//! Both directions are all-or-nothing: the first character (or token) the
//! table doesn't know aborts the call, and nothing is written to history.
//! A successful call records exactly one history entry before returning.
//!
//! ```text
//! "Hi you"  → upper-case → H I ␠ Y O U → ".... .. / -.-- --- ..-"
//! ".... .." → split(' ') → ["....", ".."] → "HI"
//! ```

use std::fmt;
use std::sync::Arc;

use log::{debug, info};

use super::history::{HistoryError, HistorySink};
use super::table::CodeTable;

/// Separator between patterns in an encoded string.
const TOKEN_SEPARATOR: char = ' ';

#[derive(Debug)]
pub enum TranscodeError {
    /// Text contains a character outside the table.
    UnsupportedCharacter(char),
    /// Morse contains a token that isn't a known pattern.
    InvalidToken(String),
    /// Conversion worked but couldn't be recorded.
    History(HistoryError),
}

impl fmt::Display for TranscodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscodeError::UnsupportedCharacter(c) => {
                write!(f, "unsupported character '{c}'")
            }
            TranscodeError::InvalidToken(token) => {
                write!(f, "'{token}' is not a valid Morse code")
            }
            TranscodeError::History(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for TranscodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TranscodeError::History(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HistoryError> for TranscodeError {
    fn from(e: HistoryError) -> Self {
        TranscodeError::History(e)
    }
}

/// True if `content` holds nothing but `.`, `-`, `/` and spaces.
///
/// Used to catch files that are already Morse before encoding them again.
/// The empty string counts as Morse.
pub fn is_morse(content: &str) -> bool {
    content.chars().all(|c| matches!(c, '.' | '-' | '/' | ' '))
}

pub struct Transcoder {
    table: CodeTable,
    history: Arc<dyn HistorySink>,
}

impl Transcoder {
    pub fn new(history: Arc<dyn HistorySink>) -> Self {
        Self {
            table: CodeTable::new(),
            history,
        }
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    /// Encodes `text`, case-insensitively. Patterns are joined by one space.
    pub fn encode(&self, text: &str) -> Result<String, TranscodeError> {
        let mut patterns = Vec::with_capacity(text.len());
        for c in text.chars() {
            patterns.push(self.encode_char(c)?);
        }
        let morse = patterns.join(" ");

        self.history.append(&text.to_uppercase(), &morse)?;
        info!("Encoded {} chars into {} bytes of Morse", text.chars().count(), morse.len());
        debug!("encode {text:?} -> {morse:?}");
        Ok(morse)
    }

    /// Decodes space-separated patterns. `/` becomes a space.
    pub fn decode(&self, morse: &str) -> Result<String, TranscodeError> {
        let text = tokens(morse)
            .map(|token| {
                self.table
                    .to_char(token)
                    .ok_or_else(|| TranscodeError::InvalidToken(token.to_string()))
            })
            .collect::<Result<String, _>>()?;

        self.history.append(morse, &text)?;
        info!("Decoded {} bytes of Morse into {} chars", morse.len(), text.chars().count());
        debug!("decode {morse:?} -> {text:?}");
        Ok(text)
    }

    fn encode_char(&self, c: char) -> Result<&'static str, TranscodeError> {
        let mut upper = c.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(u), None) => self
                .table
                .to_morse(u)
                .ok_or(TranscodeError::UnsupportedCharacter(c)),
            // ß → SS and friends have no single-pattern mapping
            _ => Err(TranscodeError::UnsupportedCharacter(c)),
        }
    }
}

/// Splits trimmed Morse on single spaces. Blank input has no tokens.
fn tokens(morse: &str) -> impl Iterator<Item = &str> {
    let trimmed = morse.trim();
    let mut split = trimmed.split(TOKEN_SEPARATOR);
    if trimmed.is_empty() {
        // "".split(' ') yields one empty token
        split.next();
    }
    split
}
