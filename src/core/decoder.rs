//! Decoder: debounced bits → best lexicon phrase
//!
//! Two phases, both full scans of the lexicon:
//! 1. Exact tier: smallest distance ≤ max_exact_distance wins outright.
//! 2. Beam: keep the beam_size closest phrases, return the closest.
//!
//! Ties resolve to the lexicographically smallest phrase in both phases.

use std::collections::BinaryHeap;
use tracing::debug;
use crate::core::{distance, Lexicon};
use crate::types::{Candidate, DecodeResult, DecoderConfig, ReasonCode};

/// Lexicon decoder
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Create decoder with the given policy
    pub fn new(config: DecoderConfig) -> Result<Self, ReasonCode> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a bit sequence to the best phrase
    pub fn decode(&self, bits: &[u8], lexicon: &Lexicon) -> Result<DecodeResult, ReasonCode> {
        validate_bits(bits)?;
        if bits.is_empty() {
            return Err(ReasonCode::R201_NO_SIGNAL);
        }
        if lexicon.is_empty() {
            return Err(ReasonCode::R202_NO_CANDIDATES);
        }

        if let Some((best, phrase_bits)) = self.exact_match(bits, lexicon) {
            debug!(
                phrase = %best.phrase,
                distance = best.distance,
                bits = bits.len(),
                "exact-tier match"
            );
            return Ok(DecodeResult::exact(best, bits.len(), phrase_bits));
        }

        let candidates = beam(bits, lexicon, self.config.beam_size);
        let phrase_bits = candidates
            .first()
            .and_then(|c| lexicon.bits_of(&c.phrase))
            .map(|b| b.len())
            .unwrap_or(0);
        let result = DecodeResult::beam(candidates, bits.len(), phrase_bits)
            .ok_or(ReasonCode::R202_NO_CANDIDATES)?;

        debug!(
            phrase = %result.phrase,
            distance = result.distance,
            beam = result.candidates.len(),
            max_exact_distance = self.config.max_exact_distance,
            "no exact-tier match, beam fallback"
        );
        Ok(result)
    }

    /// The `n` closest phrases, best first
    pub fn decode_top(
        &self,
        bits: &[u8],
        lexicon: &Lexicon,
        n: usize,
    ) -> Result<Vec<Candidate>, ReasonCode> {
        validate_bits(bits)?;
        if bits.is_empty() {
            return Err(ReasonCode::R201_NO_SIGNAL);
        }
        if lexicon.is_empty() {
            return Err(ReasonCode::R202_NO_CANDIDATES);
        }
        Ok(beam(bits, lexicon, n.min(lexicon.len())))
    }

    /// Minimum-distance phrase within the exact threshold, with its bit length
    fn exact_match(&self, bits: &[u8], lexicon: &Lexicon) -> Option<(Candidate, usize)> {
        let mut best: Option<(usize, usize)> = None;

        // Entries are sorted, so strict < keeps the first phrase at the minimum
        for (i, entry) in lexicon.entries().iter().enumerate() {
            let d = distance(bits, &entry.bits);
            if d <= self.config.max_exact_distance && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
                if d == 0 {
                    break;
                }
            }
        }

        best.map(|(i, d)| {
            let entry = &lexicon.entries()[i];
            (Candidate::new(entry.phrase.clone(), d), entry.bits.len())
        })
    }
}

/// The `size` smallest candidates by (distance, phrase), ascending.
/// Never returns more than the lexicon holds.
///
/// Bounded max-heap: the root is the worst retained candidate and is
/// evicted whenever a better one arrives.
pub fn beam(bits: &[u8], lexicon: &Lexicon, size: usize) -> Vec<Candidate> {
    let size = size.min(lexicon.len());
    if size == 0 {
        return Vec::new();
    }
    let mut heap: BinaryHeap<Candidate> = BinaryHeap::with_capacity(size.saturating_add(1));

    for entry in lexicon.entries() {
        let d = distance(bits, &entry.bits);
        if heap.len() == size {
            if let Some(worst) = heap.peek() {
                if (d, entry.phrase.as_str()) >= (worst.distance, worst.phrase.as_str()) {
                    continue;
                }
            }
            heap.pop();
        }
        heap.push(Candidate::new(entry.phrase.clone(), d));
    }

    heap.into_sorted_vec()
}

/// Reject anything outside {0,1}
pub fn validate_bits(bits: &[u8]) -> Result<(), ReasonCode> {
    if bits.iter().any(|b| *b > 1) {
        return Err(ReasonCode::R204_INVALID_BIT);
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
