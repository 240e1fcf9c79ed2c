//! Pipeline configuration
//!
//! Every reference constant lives here as an explicit, immutable value.
//! A JSON file may override any subset; missing fields keep defaults.

use serde::{Deserialize, Serialize};
use crate::{
    BASE_WORDS, DEFAULT_BEAM_SIZE, DEFAULT_GAP_TOLERANCE, DEFAULT_MAX_EXACT_DISTANCE,
    DEFAULT_MAX_PHRASE_LEN, DEFAULT_SAMPLE_RATE, DEFAULT_STABLE_MIN_FRAMES,
    MAX_BEAM_SIZE, MAX_PHRASE_LEN_LIMIT,
};
use crate::types::ReasonCode;

/// Debouncer thresholds (frame counts)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Frames a run needs before its symbol is committed
    pub stable_min: usize,
    /// Consecutive no-signal frames bridged before the run closes
    pub gap_tolerance: usize,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            stable_min: DEFAULT_STABLE_MIN_FRAMES,
            gap_tolerance: DEFAULT_GAP_TOLERANCE,
        }
    }
}

impl DebounceConfig {
    pub fn validate(&self) -> Result<(), ReasonCode> {
        if self.stable_min == 0 {
            return Err(ReasonCode::R301_CONFIG_INVALID);
        }
        Ok(())
    }
}

/// How the encoder treats letters missing from the code table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodePolicy {
    /// Drop unknown letters silently
    #[default]
    Skip,
    /// Fail with R203_UNENCODABLE_PHRASE
    Reject,
}

/// Vocabulary and phrase expansion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    pub base_words: Vec<String>,
    /// Words per phrase; growth is combinatorial in this value
    pub max_phrase_len: usize,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            base_words: BASE_WORDS.iter().map(|w| w.to_string()).collect(),
            max_phrase_len: DEFAULT_MAX_PHRASE_LEN,
        }
    }
}

impl LexiconConfig {
    pub fn validate(&self) -> Result<(), ReasonCode> {
        if self.max_phrase_len == 0 || self.max_phrase_len > MAX_PHRASE_LEN_LIMIT {
            return Err(ReasonCode::R301_CONFIG_INVALID);
        }
        Ok(())
    }
}

/// Decoder policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Candidates kept by the fallback beam
    pub beam_size: usize,
    /// Largest distance accepted without falling back
    pub max_exact_distance: usize,
    pub encode_policy: EncodePolicy,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            beam_size: DEFAULT_BEAM_SIZE,
            max_exact_distance: DEFAULT_MAX_EXACT_DISTANCE,
            encode_policy: EncodePolicy::default(),
        }
    }
}

impl DecoderConfig {
    pub fn validate(&self) -> Result<(), ReasonCode> {
        if self.beam_size == 0 || self.beam_size > MAX_BEAM_SIZE {
            return Err(ReasonCode::R301_CONFIG_INVALID);
        }
        Ok(())
    }
}

/// Full pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Frames per second of the observation stream
    pub sample_rate: f64,
    pub debounce: DebounceConfig,
    pub lexicon: LexiconConfig,
    pub decoder: DecoderConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            debounce: DebounceConfig::default(),
            lexicon: LexiconConfig::default(),
            decoder: DecoderConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Check every section
    pub fn validate(&self) -> Result<(), ReasonCode> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ReasonCode::R301_CONFIG_INVALID);
        }
        self.debounce.validate()?;
        self.lexicon.validate()?;
        self.decoder.validate()
    }

    /// Parse from JSON text
    pub fn from_json(json: &str) -> Result<Self, ReasonCode> {
        let config: PipelineConfig =
            serde_json::from_str(json).map_err(|_| ReasonCode::R301_CONFIG_INVALID)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: &str) -> Result<Self, ReasonCode> {
        let json = std::fs::read_to_string(path).map_err(|_| ReasonCode::R303_CONFIG_IO)?;
        Self::from_json(&json)
    }
}
