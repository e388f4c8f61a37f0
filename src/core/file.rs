//! # File Conversion
//!
//! Converts a whole `.txt` file and writes the result next to it:
//!
//! ```text
//! notes.txt ──encode──▶ notes_morse.txt
//! notes.txt ──decode──▶ notes_text.txt
//! ```
//!
//! Input is checked before anything is read: it must exist, end in `.txt`
//! and fit under the size limit (inclusive). Content is trimmed before
//! conversion. The output path is opened before transcoding so an
//! unwritable target is reported without leaving a history entry behind.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use super::transcoder::{TranscodeError, Transcoder, is_morse};
use crate::Direction;

/// Largest input accepted by default (1 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

#[derive(Debug)]
pub enum FileError {
    NotFound(PathBuf),
    InvalidExtension(PathBuf),
    TooLarge { size: u64, limit: u64 },
    /// Nothing left after trimming.
    Empty,
    /// Encoding was requested but the content already looks like Morse.
    AlreadyMorse,
    Io(io::Error),
    Transcode(TranscodeError),
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound(path) => write!(f, "file not found: {}", path.display()),
            FileError::InvalidExtension(path) => {
                write!(f, "only .txt files are supported: {}", path.display())
            }
            FileError::TooLarge { size, limit } => {
                write!(f, "file is too large ({size} bytes, limit is {limit} bytes)")
            }
            FileError::Empty => write!(f, "file is empty"),
            FileError::AlreadyMorse => write!(f, "file content already looks like Morse code"),
            FileError::Io(e) => write!(f, "file I/O error: {e}"),
            FileError::Transcode(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::Io(e) => Some(e),
            FileError::Transcode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TranscodeError> for FileError {
    fn from(e: TranscodeError) -> Self {
        FileError::Transcode(e)
    }
}

impl From<io::Error> for FileError {
    fn from(e: io::Error) -> Self {
        FileError::Io(e)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FileOptions {
    pub max_size: u64,
    /// Encode even when the content already looks like Morse.
    pub force: bool,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_FILE_SIZE,
            force: false,
        }
    }
}

/// Result of a successful file conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileConversion {
    pub output_path: PathBuf,
    pub output: String,
}

/// Sibling path for the converted file: `name.txt` → `name_morse.txt` / `name_text.txt`.
pub fn output_path(input: &Path, direction: Direction) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = match direction {
        Direction::Morse => "_morse.txt",
        Direction::Text => "_text.txt",
    };
    input.with_file_name(format!("{stem}{suffix}"))
}

fn validate(path: &Path, max_size: u64) -> Result<(), FileError> {
    let metadata = match fs::metadata(path) {
        Ok(m) if m.is_file() => m,
        Ok(_) => return Err(FileError::NotFound(path.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(FileError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(FileError::Io(e)),
    };

    let is_txt = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
    if !is_txt {
        return Err(FileError::InvalidExtension(path.to_path_buf()));
    }

    if metadata.len() > max_size {
        return Err(FileError::TooLarge {
            size: metadata.len(),
            limit: max_size,
        });
    }
    Ok(())
}

/// Opens the output for writing without truncating it, so a path that can't
/// be written fails before anything reaches history. Returns whether the
/// file was created by this call.
fn prepare_output(path: &Path) -> Result<bool, FileError> {
    let existed = path.exists();
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;
    Ok(!existed)
}

/// Converts `path` in the given direction and writes the sibling output file.
pub fn convert_file(
    transcoder: &Transcoder,
    path: &Path,
    direction: Direction,
    options: &FileOptions,
) -> Result<FileConversion, FileError> {
    validate(path, options.max_size)?;

    let raw = fs::read_to_string(path)?;
    let content = raw.trim();
    if content.is_empty() {
        return Err(FileError::Empty);
    }

    if direction == Direction::Morse && is_morse(content) && !options.force {
        return Err(FileError::AlreadyMorse);
    }

    let output_path = output_path(path, direction);
    let created = prepare_output(&output_path)?;

    let result = match direction {
        Direction::Morse => transcoder.encode(content),
        Direction::Text => transcoder.decode(content),
    };
    let output = match result {
        Ok(output) => output,
        Err(e) => {
            if created {
                let _ = fs::remove_file(&output_path);
            }
            return Err(e.into());
        }
    };

    fs::write(&output_path, &output)?;
    info!(
        "Converted {} to {} ({:?})",
        path.display(),
        output_path.display(),
        direction
    );

    Ok(FileConversion {
        output_path,
        output,
    })
}
