//! Reason codes for decode outcomes and failures

use serde::{Deserialize, Serialize};

/// Reason codes for every decode decision and every error condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R1xx: Decode outcomes
    // =========================================================================
    /// Phrase found within the exact-match distance
    R101_EXACT_MATCH,
    /// No exact match, best beam candidate returned
    R102_BEAM_FALLBACK,

    // =========================================================================
    // R2xx: Input conditions
    // =========================================================================
    /// Debounced sequence is empty
    R201_NO_SIGNAL,
    /// Lexicon holds no phrases
    R202_NO_CANDIDATES,
    /// Phrase contains a letter missing from the code table
    R203_UNENCODABLE_PHRASE,
    /// Bit outside {0,1}
    R204_INVALID_BIT,
    /// Sample outside {1,0,-1}
    R205_INVALID_SAMPLE,

    // =========================================================================
    // R3xx: Configuration
    // =========================================================================
    /// Configuration value out of range
    R301_CONFIG_INVALID,
    /// Code table text malformed
    R302_CODE_TABLE_INVALID,
    /// Configuration file unreadable
    R303_CONFIG_IO,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R101_EXACT_MATCH => "R101_EXACT_MATCH",
            Self::R102_BEAM_FALLBACK => "R102_BEAM_FALLBACK",
            Self::R201_NO_SIGNAL => "R201_NO_SIGNAL",
            Self::R202_NO_CANDIDATES => "R202_NO_CANDIDATES",
            Self::R203_UNENCODABLE_PHRASE => "R203_UNENCODABLE_PHRASE",
            Self::R204_INVALID_BIT => "R204_INVALID_BIT",
            Self::R205_INVALID_SAMPLE => "R205_INVALID_SAMPLE",
            Self::R301_CONFIG_INVALID => "R301_CONFIG_INVALID",
            Self::R302_CODE_TABLE_INVALID => "R302_CODE_TABLE_INVALID",
            Self::R303_CONFIG_IO => "R303_CONFIG_IO",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R101_EXACT_MATCH => "Lexicon match within exact distance",
            Self::R102_BEAM_FALLBACK => "Closest phrase from beam search",
            Self::R201_NO_SIGNAL => "No signal detected",
            Self::R202_NO_CANDIDATES => "Lexicon is empty",
            Self::R203_UNENCODABLE_PHRASE => "Phrase has letters outside the code table",
            Self::R204_INVALID_BIT => "Bits must be 0 or 1",
            Self::R205_INVALID_SAMPLE => "Samples must be 1, 0 or -1",
            Self::R301_CONFIG_INVALID => "Configuration value out of range",
            Self::R302_CODE_TABLE_INVALID => "Code table malformed",
            Self::R303_CONFIG_IO => "Configuration file unreadable",
        }
    }

    /// Is this a successful decode outcome?
    pub fn is_success(&self) -> bool {
        matches!(self, Self::R101_EXACT_MATCH | Self::R102_BEAM_FALLBACK)
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

impl std::error::Error for ReasonCode {}
