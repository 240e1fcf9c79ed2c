//! HandMorse: hand-signal to text decoding
//!
//! Raw open/closed/no-signal observations → SymbolDebouncer → bits →
//! Decoder (exact lexicon lookup, then beam fallback) → phrase

pub mod core;
pub mod types;

// =============================================================================
// DEBOUNCE THRESHOLDS - frame counts, not time
// =============================================================================

/// Minimum matching frames before a symbol is committed
pub const DEFAULT_STABLE_MIN_FRAMES: usize = 31;

/// Maximum consecutive no-signal frames bridged inside a run
pub const DEFAULT_GAP_TOLERANCE: usize = 20;

/// Nominal sensor sampling rate (frames per second), informational only
pub const DEFAULT_SAMPLE_RATE: f64 = 30.0;

// =============================================================================
// LEXICON
// =============================================================================

/// Separator between words of a phrase; encodes to the empty code word
pub const SEPARATOR: char = ' ';

/// Default maximum number of words per phrase
pub const DEFAULT_MAX_PHRASE_LEN: usize = 4;

/// Hard ceiling on words per phrase.
/// 19 base words at 6 would already be ~25M phrases.
pub const MAX_PHRASE_LEN_LIMIT: usize = 6;

/// Largest lexicon a build may produce (reference: 99,199 phrases)
pub const MAX_LEXICON_SIZE: usize = 2_000_000;

/// Reference base vocabulary
pub const BASE_WORDS: &[&str] = &[
    "HALLO", "HELLO", "WELT", "TEST", "HILFE", "MORSE", "CODE",
    "ICH", "MEIN", "NAME", "IST", "BRAUCHE", "ARSHIA", "ELHAM",
    "LOVE", "MOVE", "HELP", "SADRA", "KASRA",
];

// =============================================================================
// DECODER
// =============================================================================

/// Candidates retained by the fallback beam
pub const DEFAULT_BEAM_SIZE: usize = 10;

/// Largest distance accepted by the exact tier
pub const DEFAULT_MAX_EXACT_DISTANCE: usize = 2;

/// Upper bound on the configured beam
pub const MAX_BEAM_SIZE: usize = 10_000;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
