//! Phrase encoder: text → concatenated code words

use tracing::warn;
use crate::SEPARATOR;
use crate::core::CodeTable;
use crate::types::{EncodePolicy, ReasonCode};

/// Encodes phrases under a code table
#[derive(Debug, Clone, Copy)]
pub struct PhraseEncoder<'a> {
    table: &'a CodeTable,
    policy: EncodePolicy,
}

impl<'a> PhraseEncoder<'a> {
    pub fn new(table: &'a CodeTable, policy: EncodePolicy) -> Self {
        Self { table, policy }
    }

    /// Concatenate the code words of every letter, separators dropped.
    ///
    /// Letters missing from the table are dropped under `Skip` and fail the
    /// phrase under `Reject`.
    pub fn encode(&self, phrase: &str) -> Result<Vec<u8>, ReasonCode> {
        let mut bits = Vec::with_capacity(phrase.len() * 3);

        for ch in phrase.chars().filter(|c| *c != SEPARATOR) {
            match self.table.get(ch) {
                Some(code) => bits.extend_from_slice(code),
                None => match self.policy {
                    EncodePolicy::Skip => {
                        warn!(phrase, letter = %ch, "letter missing from code table, skipped");
                    }
                    EncodePolicy::Reject => return Err(ReasonCode::R203_UNENCODABLE_PHRASE),
                },
            }
        }

        Ok(bits)
    }

    /// True when every letter of the phrase has a code word
    pub fn is_encodable(&self, phrase: &str) -> bool {
        phrase
            .chars()
            .filter(|c| *c != SEPARATOR)
            .all(|c| self.table.contains(c))
    }
}

/// Encode with the lenient policy
pub fn encode(phrase: &str, table: &CodeTable) -> Vec<u8> {
    // Skip never fails
    PhraseEncoder::new(table, EncodePolicy::Skip)
        .encode(phrase)
        .unwrap_or_default()
}
