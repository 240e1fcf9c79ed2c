//! Debouncer diagnostics

use serde::{Deserialize, Serialize};

/// A run that reached stable_min and emitted its symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedRun {
    /// Emitted bit
    pub symbol: u8,
    /// Index of the first frame of the run
    pub start_frame: usize,
    /// Matching frames in the run
    pub frames: usize,
    /// Tolerated no-signal frames absorbed by the run
    pub gap_frames: usize,
}

impl CommittedRun {
    /// Wall-clock length of the run at the given frame rate
    pub fn duration_secs(&self, sample_rate: f64) -> f64 {
        if sample_rate <= 0.0 {
            return 0.0;
        }
        (self.frames + self.gap_frames) as f64 / sample_rate
    }
}

/// Output of a full debounce pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebounceOutput {
    /// Stable binary sequence
    pub bits: Vec<u8>,
    /// One entry per emitted bit
    pub runs: Vec<CommittedRun>,
    pub frames_processed: usize,
    /// Signal runs closed before reaching stable_min
    pub discarded_runs: usize,
}

impl DebounceOutput {
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bits as a compact "0101" string
    pub fn bit_string(&self) -> String {
        bits_to_string(&self.bits)
    }
}

/// Render bits as a "0101" string
pub fn bits_to_string(bits: &[u8]) -> String {
    bits.iter().map(|b| if *b == 0 { '0' } else { '1' }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_counts_gap_frames() {
        let run = CommittedRun { symbol: 1, start_frame: 0, frames: 50, gap_frames: 10 };
        assert_eq!(run.duration_secs(30.0), 2.0);
        assert_eq!(run.duration_secs(0.0), 0.0);
    }

    #[test]
    fn test_bit_string() {
        assert_eq!(bits_to_string(&[0, 1, 1, 0]), "0110");
        assert_eq!(DebounceOutput::default().bit_string(), "");
    }
}
