//! Code table: letter → binary code word
//!
//! Reference alphabet is Morse with dot = 0 and dash = 1. Code words are
//! not prefix-free; phrases are disambiguated only by whole-lexicon matching.

use std::collections::BTreeMap;
use lazy_static::lazy_static;
use regex::Regex;
use crate::SEPARATOR;
use crate::types::ReasonCode;

/// Longest code word accepted from a custom table
pub const MAX_CODE_WORD_LEN: usize = 8;

/// Reference alphabet
const REFERENCE_TABLE: &[(char, &str)] = &[
    ('A', "01"),   ('B', "1000"), ('C', "1010"), ('D', "100"),  ('E', "0"),
    ('F', "0010"), ('G', "110"),  ('H', "0000"), ('I', "00"),   ('J', "0111"),
    ('K', "101"),  ('L', "0100"), ('M', "11"),   ('N', "10"),   ('O', "111"),
    ('P', "0110"), ('Q', "1101"), ('R', "010"),  ('S', "000"),  ('T', "1"),
    ('U', "001"),  ('V', "0001"), ('W', "011"),  ('X', "1001"), ('Y', "1011"),
    ('Z', "1100"),
];

lazy_static! {
    // "A 01", "B=1000", "c: 1010"
    static ref RE_TABLE_LINE: Regex = Regex::new(
        r"^\s*([A-Za-z0-9])\s*[:=\s]\s*([01]+)\s*$"
    ).unwrap();
}

/// Immutable letter → code word mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<char, Vec<u8>>,
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::reference()
    }
}

impl CodeTable {
    /// The 26-letter reference alphabet plus separator
    pub fn reference() -> Self {
        let mut codes: BTreeMap<char, Vec<u8>> = REFERENCE_TABLE
            .iter()
            .map(|(letter, code)| (*letter, code_word(code)))
            .collect();
        codes.insert(SEPARATOR, Vec::new());
        Self { codes }
    }

    /// Parse `LETTER CODEWORD` lines; `#` starts a comment
    pub fn parse(text: &str) -> Result<Self, ReasonCode> {
        let mut codes = BTreeMap::new();

        for line in text.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let caps = RE_TABLE_LINE
                .captures(line)
                .ok_or(ReasonCode::R302_CODE_TABLE_INVALID)?;
            let letter = caps[1]
                .chars()
                .next()
                .ok_or(ReasonCode::R302_CODE_TABLE_INVALID)?
                .to_ascii_uppercase();
            let code = &caps[2];
            if code.len() > MAX_CODE_WORD_LEN || codes.contains_key(&letter) {
                return Err(ReasonCode::R302_CODE_TABLE_INVALID);
            }
            codes.insert(letter, code_word(code));
        }

        if codes.is_empty() {
            return Err(ReasonCode::R302_CODE_TABLE_INVALID);
        }
        codes.insert(SEPARATOR, Vec::new());
        Ok(Self { codes })
    }

    /// Load a table file
    pub fn load(path: &str) -> Result<Self, ReasonCode> {
        let text = std::fs::read_to_string(path).map_err(|_| ReasonCode::R303_CONFIG_IO)?;
        Self::parse(&text)
    }

    /// Code word for a letter (case-insensitive)
    pub fn get(&self, letter: char) -> Option<&[u8]> {
        self.codes
            .get(&letter.to_ascii_uppercase())
            .map(|code| code.as_slice())
    }

    pub fn contains(&self, letter: char) -> bool {
        self.get(letter).is_some()
    }

    /// Reverse lookup, for diagnostics. Separator is never returned.
    pub fn letter_for(&self, code: &[u8]) -> Option<char> {
        self.codes
            .iter()
            .find(|(letter, word)| **letter != SEPARATOR && word.as_slice() == code)
            .map(|(letter, _)| *letter)
    }

    /// Letters excluding the separator
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.codes.keys().copied().filter(|c| *c != SEPARATOR)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn code_word(code: &str) -> Vec<u8> {
    code.bytes().map(|b| b - b'0').collect()
}
