//! Output structures for terminal display

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use colored::Colorize;
use crate::types::{DebounceOutput, DecodeResult, MatchTier};

/// Result of one pipeline run: samples → bits → phrase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Frames per second of the input
    pub sample_rate: f64,
    /// Length of the observation stream in seconds
    pub duration_secs: f64,
    /// Debounced sequence and run diagnostics
    pub debounce: DebounceOutput,
    /// Decoded phrase
    pub decode: DecodeResult,
}

impl PipelineOutput {
    /// Create new output
    pub fn new(sample_rate: f64, debounce: DebounceOutput, decode: DecodeResult) -> Self {
        let duration_secs = if sample_rate > 0.0 {
            debounce.frames_processed as f64 / sample_rate
        } else {
            0.0
        };
        Self {
            timestamp: Utc::now(),
            sample_rate,
            duration_secs,
            debounce,
            decode,
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        format!(
            "bits={} | {}",
            self.debounce.bit_string().dimmed(),
            decode_terminal_string(&self.decode)
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "frames={} | duration={:.1}s | bits={} | {}",
            self.debounce.frames_processed,
            self.duration_secs,
            self.debounce.bit_string(),
            decode_parseable_string(&self.decode)
        )
    }
}

/// Colored one-line summary of a decode result
pub fn decode_terminal_string(decode: &DecodeResult) -> String {
    let phrase = match decode.tier {
        MatchTier::Exact => decode.phrase.green().bold(),
        MatchTier::Beam => decode.phrase.yellow().bold(),
    };
    format!(
        "{} | distance={} | confidence={:.2}% | {}",
        phrase,
        decode.distance,
        decode.confidence,
        decode.reason.code().dimmed()
    )
}

/// Plain one-line summary of a decode result
pub fn decode_parseable_string(decode: &DecodeResult) -> String {
    format!(
        "phrase={} | distance={} | confidence={:.2} | tier={} | reason={}",
        decode.phrase,
        decode.distance,
        decode.confidence,
        decode.tier,
        decode.reason.code()
    )
}
