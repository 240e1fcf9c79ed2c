//! Lexicon: base words expanded into ordered multi-word phrases
//!
//! Size for B base words and phrase length K:
//!   B + Σ_{l=2..K} P(B, l)
//! 19 words at K = 4 gives 99,199 phrases; each extra word of K multiplies
//! the top term by roughly B - K.

use std::collections::BTreeSet;
use sha2::{Digest, Sha256};
use tracing::info;
use crate::{MAX_LEXICON_SIZE, SEPARATOR};
use crate::core::{CodeTable, PhraseEncoder};
use crate::types::{EncodePolicy, LexiconConfig, ReasonCode};

/// A phrase with its pre-computed encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    pub phrase: String,
    pub bits: Vec<u8>,
}

/// Read-only, lexicographically ordered phrase set
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
    base_words: Vec<String>,
    max_phrase_len: usize,
    fingerprint: String,
}

impl Lexicon {
    /// Expand the configured vocabulary and encode every phrase
    pub fn build(
        config: &LexiconConfig,
        table: &CodeTable,
        policy: EncodePolicy,
    ) -> Result<Self, ReasonCode> {
        config.validate()?;
        let base_words = normalize_words(&config.base_words);

        if expected_size(base_words.len(), config.max_phrase_len) > MAX_LEXICON_SIZE {
            return Err(ReasonCode::R301_CONFIG_INVALID);
        }

        // Unknown letters in a base word would poison every phrase it joins
        let encoder = PhraseEncoder::new(table, policy);
        if policy == EncodePolicy::Reject
            && base_words.iter().any(|w| !encoder.is_encodable(w))
        {
            return Err(ReasonCode::R203_UNENCODABLE_PHRASE);
        }

        let phrases = build_phrases(&base_words, config.max_phrase_len);
        let mut lexicon = Self::from_sorted(phrases, table, policy)?;
        lexicon.base_words = base_words;
        lexicon.max_phrase_len = config.max_phrase_len;

        info!(
            phrases = lexicon.len(),
            base_words = lexicon.base_words.len(),
            max_phrase_len = lexicon.max_phrase_len,
            fingerprint = %lexicon.fingerprint,
            "lexicon built"
        );
        Ok(lexicon)
    }

    /// Lexicon over an explicit phrase list, without expansion
    pub fn from_phrases<I, S>(
        phrases: I,
        table: &CodeTable,
        policy: EncodePolicy,
    ) -> Result<Self, ReasonCode>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: BTreeSet<String> = phrases
            .into_iter()
            .map(|p| normalize_phrase(p.as_ref()))
            .filter(|p| !p.is_empty())
            .collect();
        let mut lexicon = Self::from_sorted(phrases, table, policy)?;
        lexicon.base_words = lexicon
            .entries
            .iter()
            .filter(|e| !e.phrase.contains(SEPARATOR))
            .map(|e| e.phrase.clone())
            .collect();
        lexicon.max_phrase_len = lexicon
            .entries
            .iter()
            .map(|e| e.phrase.split(SEPARATOR).count())
            .max()
            .unwrap_or(0);
        Ok(lexicon)
    }

    fn from_sorted(
        phrases: BTreeSet<String>,
        table: &CodeTable,
        policy: EncodePolicy,
    ) -> Result<Self, ReasonCode> {
        let encoder = PhraseEncoder::new(table, policy);
        let entries = phrases
            .into_iter()
            .map(|phrase| -> Result<LexiconEntry, ReasonCode> {
                let bits = encoder.encode(&phrase)?;
                Ok(LexiconEntry { phrase, bits })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let fingerprint = fingerprint(&entries);

        Ok(Self {
            entries,
            base_words: Vec::new(),
            max_phrase_len: 0,
            fingerprint,
        })
    }

    /// Entries in lexicographic phrase order
    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn phrases(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.phrase.as_str())
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.entries
            .binary_search_by(|e| e.phrase.as_str().cmp(phrase))
            .is_ok()
    }

    /// Encoding of a phrase in the lexicon
    pub fn bits_of(&self, phrase: &str) -> Option<&[u8]> {
        self.entries
            .binary_search_by(|e| e.phrase.as_str().cmp(phrase))
            .ok()
            .map(|i| self.entries[i].bits.as_slice())
    }

    pub fn base_words(&self) -> &[String] {
        &self.base_words
    }

    pub fn max_phrase_len(&self) -> usize {
        self.max_phrase_len
    }

    /// SHA-256 of the ordered phrase list, hex encoded
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Base words plus every ordered arrangement of 2..=max_phrase_len
/// distinct base words, joined by the separator.
///
/// The base words are always included, so `max_phrase_len < 2` yields
/// just the base set.
pub fn build_phrases(base_words: &[String], max_phrase_len: usize) -> BTreeSet<String> {
    let mut phrases: BTreeSet<String> = base_words.iter().cloned().collect();
    let mut used = vec![false; base_words.len()];
    let mut current: Vec<&str> = Vec::with_capacity(max_phrase_len);

    for len in 2..=max_phrase_len.min(base_words.len()) {
        permute(base_words, len, &mut used, &mut current, &mut phrases);
    }
    phrases
}

fn permute<'a>(
    words: &'a [String],
    len: usize,
    used: &mut [bool],
    current: &mut Vec<&'a str>,
    out: &mut BTreeSet<String>,
) {
    if current.len() == len {
        let mut buf = [0; 4];
        out.insert(current.join(&*SEPARATOR.encode_utf8(&mut buf)));
        return;
    }
    for i in 0..words.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        current.push(&words[i]);
        permute(words, len, used, current, out);
        current.pop();
        used[i] = false;
    }
}

/// `B + Σ_{l=2..K} P(B, l)`, saturating
pub fn expected_size(base_count: usize, max_phrase_len: usize) -> usize {
    let mut total = base_count;
    let mut permutations = base_count;
    for len in 2..=max_phrase_len {
        if len > base_count {
            break;
        }
        permutations = permutations.saturating_mul(base_count - len + 1);
        total = total.saturating_add(permutations);
    }
    total
}

/// Trim, uppercase, drop empties and duplicates; sorted
fn normalize_words(words: &[String]) -> Vec<String> {
    let set: BTreeSet<String> = words
        .iter()
        .map(|w| normalize_phrase(w))
        .filter(|w| !w.is_empty())
        .collect();
    set.into_iter().collect()
}

/// Uppercase and collapse whitespace to single separators
fn normalize_phrase(phrase: &str) -> String {
    let mut buf = [0; 4];
    phrase
        .split_whitespace()
        .map(|w| w.to_uppercase())
        .collect::<Vec<_>>()
        .join(&*SEPARATOR.encode_utf8(&mut buf))
}

fn fingerprint(entries: &[LexiconEntry]) -> String {
    let mut hasher = Sha256::new();
    for entry in entries {
        hasher.update(entry.phrase.as_bytes());
        hasher.update(b"\n");
    }
    let digest: [u8; 32] = hasher.finalize().into();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
