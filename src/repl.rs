//! # Interactive Loop
//!
//! The menu-driven front end. Reads a choice, asks for the input that
//! choice needs, prints the result or the error, and goes back to the menu.
//! Bad input never ends the loop; only `q` or end-of-input does.
//!
//! The loop is generic over `BufRead`/`Write` so tests can drive it with
//! byte buffers instead of a terminal.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crossterm::style::Stylize;
use log::{debug, info};

use crate::Direction;
use crate::core::config::ResolvedConfig;
use crate::core::file::{FileError, FileOptions, convert_file};
use crate::core::transcoder::Transcoder;

const MENU_PROMPT: &str = "\nChoose (1=Text->Morse, 2=Morse->Text, 3=File, q=Quit): ";

pub struct Repl<'a, R, W> {
    transcoder: &'a Transcoder,
    input: R,
    output: W,
    color: bool,
    max_file_size: u64,
}

impl<'a, R: BufRead, W: Write> Repl<'a, R, W> {
    pub fn new(transcoder: &'a Transcoder, input: R, output: W) -> Self {
        Self {
            transcoder,
            input,
            output,
            color: true,
            max_file_size: crate::core::file::DEFAULT_MAX_FILE_SIZE,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Runs until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let Some(choice) = self.prompt(MENU_PROMPT)? else {
                debug!("Input closed, leaving menu");
                break;
            };

            match choice.as_str() {
                "" => continue,
                "1" => self.encode_text()?,
                "2" => self.decode_morse()?,
                "3" => self.convert_file()?,
                c if c.eq_ignore_ascii_case("q") => {
                    writeln!(self.output, "Goodbye.")?;
                    break;
                }
                other => self.error(format!("invalid choice '{other}', please try again"))?,
            }
        }
        Ok(())
    }

    fn encode_text(&mut self) -> io::Result<()> {
        let Some(text) = self.prompt_non_empty("Enter text: ", "Please enter some text!")? else {
            return Ok(());
        };
        match self.transcoder.encode(&text) {
            Ok(morse) => writeln!(self.output, "➡ Morse: {morse}"),
            Err(e) => self.error(e),
        }
    }

    fn decode_morse(&mut self) -> io::Result<()> {
        let Some(morse) = self.prompt_non_empty(
            "Enter Morse (spaces between letters, '/' between words): ",
            "Please enter some Morse code!",
        )?
        else {
            return Ok(());
        };
        match self.transcoder.decode(&morse) {
            Ok(text) => writeln!(self.output, "➡ Text: {text}"),
            Err(e) => self.error(e),
        }
    }

    fn convert_file(&mut self) -> io::Result<()> {
        let Some(path) = self.prompt_non_empty("Path to .txt file: ", "Please enter a path!")? else {
            return Ok(());
        };
        let Some(direction) = self.prompt_direction()? else {
            return Ok(());
        };
        let path = PathBuf::from(path);
        let mut options = FileOptions {
            max_size: self.max_file_size,
            force: false,
        };

        let mut result = convert_file(self.transcoder, &path, direction, &options);
        if matches!(result, Err(FileError::AlreadyMorse)) {
            let answer = self.prompt("Content already looks like Morse. Encode anyway? (y/N): ")?;
            if !answer.is_some_and(|a| a.eq_ignore_ascii_case("y")) {
                info!("Skipped re-encoding {}", path.display());
                return writeln!(self.output, "Skipped.");
            }
            options.force = true;
            result = convert_file(self.transcoder, &path, direction, &options);
        }

        match result {
            Ok(done) => writeln!(self.output, "➡ Saved to {}", done.output_path.display()),
            Err(e) => self.error(e),
        }
    }

    fn prompt_direction(&mut self) -> io::Result<Option<Direction>> {
        loop {
            let Some(choice) = self.prompt("Direction (1=Text->Morse, 2=Morse->Text): ")? else {
                return Ok(None);
            };
            match choice.as_str() {
                "1" => return Ok(Some(Direction::Morse)),
                "2" => return Ok(Some(Direction::Text)),
                other => self.error(format!("invalid direction '{other}'"))?,
            }
        }
    }

    /// Re-asks until the answer is non-blank. None on end of input.
    fn prompt_non_empty(&mut self, prompt: &str, complaint: &str) -> io::Result<Option<String>> {
        loop {
            match self.prompt(prompt)? {
                Some(answer) if answer.is_empty() => self.error(complaint)?,
                other => return Ok(other),
            }
        }
    }

    /// Prints `prompt` and reads one trimmed line. None on end of input.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn error(&mut self, message: impl Display) -> io::Result<()> {
        let text = format!("⚠ Error: {message}");
        if self.color {
            writeln!(self.output, "{}", text.red())
        } else {
            writeln!(self.output, "{text}")
        }
    }
}

/// Runs the interactive loop on stdin/stdout.
pub fn run(transcoder: &Transcoder, config: &ResolvedConfig) -> io::Result<()> {
    info!("Starting interactive loop");
    let stdin = io::stdin();
    let stdout = io::stdout();
    println!("dotdash: text ↔ Morse code converter");
    Repl::new(transcoder, stdin.lock(), stdout.lock())
        .with_color(config.color)
        .with_max_file_size(config.max_file_size)
        .run()
}
