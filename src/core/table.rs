//! # Code Table
//!
//! The fixed character ↔ Morse mapping. Built once, never mutated.
//!
//! Only upper-case letters are stored; callers upper-case text before
//! looking it up. Space maps to the word separator `/`.

use std::collections::HashMap;

/// Word separator token.
pub const WORD_SEPARATOR: &str = "/";

/// Letters, digits, seven punctuation marks and space.
const ENTRIES: [(char, &str); 44] = [
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('?', "..--.."),
    ('/', "-..-."),
    ('-', "-....-"),
    ('(', "-.--."),
    (')', "-.--.-"),
    (' ', WORD_SEPARATOR),
];

#[derive(Debug)]
pub struct CodeTable {
    to_morse: HashMap<char, &'static str>,
    to_char: HashMap<&'static str, char>,
}

impl CodeTable {
    pub fn new() -> Self {
        let to_morse: HashMap<char, &'static str> = ENTRIES.iter().copied().collect();
        let to_char = ENTRIES.iter().map(|&(c, code)| (code, c)).collect();
        Self { to_morse, to_char }
    }

    /// Pattern for an already upper-cased character.
    pub fn to_morse(&self, c: char) -> Option<&'static str> {
        self.to_morse.get(&c).copied()
    }

    /// Character for a single token, `/` included.
    pub fn to_char(&self, pattern: &str) -> Option<char> {
        self.to_char.get(pattern).copied()
    }

    pub fn len(&self) -> usize {
        self.to_morse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_morse.is_empty()
    }

    /// All `(character, pattern)` pairs in table order.
    pub fn entries(&self) -> impl Iterator<Item = (char, &'static str)> {
        ENTRIES.iter().copied()
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::new()
    }
}
