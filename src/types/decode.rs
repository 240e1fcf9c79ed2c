//! Decoder result types

use std::cmp::Ordering;
use serde::{Deserialize, Serialize};
use crate::types::ReasonCode;

/// A lexicon phrase scored against the observed bits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub phrase: String,
    pub distance: usize,
}

impl Candidate {
    pub fn new(phrase: impl Into<String>, distance: usize) -> Self {
        Self {
            phrase: phrase.into(),
            distance,
        }
    }
}

/// Distance ascending, then phrase lexicographically
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| self.phrase.cmp(&other.phrase))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Which search phase produced the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchTier {
    /// Within max_exact_distance
    Exact,
    /// Best of the fallback beam
    Beam,
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MatchTier::Exact => "EXACT",
            MatchTier::Beam => "BEAM",
        };
        write!(f, "{}", name)
    }
}

/// Best phrase for a debounced bit sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeResult {
    pub phrase: String,
    pub distance: usize,
    /// 0.0-100.0, two decimals; informational only
    pub confidence: f64,
    pub tier: MatchTier,
    pub reason: ReasonCode,
    /// Length of the observed sequence
    pub bit_count: usize,
    /// Length of the phrase encoding
    pub phrase_bit_count: usize,
    /// Retained beam, best first (empty for the exact tier)
    pub candidates: Vec<Candidate>,
}

impl DecodeResult {
    pub fn exact(best: Candidate, bit_count: usize, phrase_bit_count: usize) -> Self {
        Self {
            confidence: confidence(best.distance, bit_count, phrase_bit_count),
            phrase: best.phrase,
            distance: best.distance,
            tier: MatchTier::Exact,
            reason: ReasonCode::R101_EXACT_MATCH,
            bit_count,
            phrase_bit_count,
            candidates: Vec::new(),
        }
    }

    pub fn beam(candidates: Vec<Candidate>, bit_count: usize, phrase_bit_count: usize) -> Option<Self> {
        let best = candidates.first()?.clone();
        Some(Self {
            confidence: confidence(best.distance, bit_count, phrase_bit_count),
            phrase: best.phrase,
            distance: best.distance,
            tier: MatchTier::Beam,
            reason: ReasonCode::R102_BEAM_FALLBACK,
            bit_count,
            phrase_bit_count,
            candidates,
        })
    }

    pub fn is_exact(&self) -> bool {
        self.tier == MatchTier::Exact
    }
}

/// `1 - d / max(len)` as a percentage rounded to 2 decimals
pub fn confidence(distance: usize, bit_count: usize, phrase_bit_count: usize) -> f64 {
    let longest = bit_count.max(phrase_bit_count);
    if longest == 0 {
        return 0.0;
    }
    let ratio = (1.0 - distance as f64 / longest as f64).max(0.0);
    (ratio * 10_000.0).round() / 100.0
}
