//! dotdash library exports for testing

use clap::ValueEnum;

pub mod cli;
pub mod core;
pub mod repl;

#[cfg(test)]
pub mod test_support;

/// Which way a conversion goes, named after what it produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    /// Text → Morse
    Morse,
    /// Morse → text
    Text,
}
