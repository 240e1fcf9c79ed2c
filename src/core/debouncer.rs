//! Symbol Debouncer: raw ternary frames → stable bits
//!
//! State transitions, one frame at a time:
//! - IDLE → TRACKING(s, 1, 0): any frame, including no-signal
//! - TRACKING(s, r, g), frame == s: r += 1, g = 0
//! - TRACKING(s, r, g), no-signal: g += 1; g > gap_tolerance closes the run → IDLE
//! - TRACKING(s, r, g), other symbol: close the run → TRACKING(v, 1, 0)
//! - end of stream: close the run
//!
//! Closing a run emits s only if r ≥ stable_min and s is a signal.

use tracing::debug;
use crate::types::{CommittedRun, DebounceConfig, DebounceOutput, ReasonCode, Sample};

/// Debouncer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// No current run
    Idle,
    /// Current run of `symbol`
    Tracking {
        symbol: Sample,
        /// Matching frames so far
        run_length: usize,
        /// Consecutive no-signal frames since the last match
        gap_length: usize,
    },
}

/// Debouncing state machine
#[derive(Debug, Clone)]
pub struct SymbolDebouncer {
    config: DebounceConfig,
    state: DebounceState,
    /// Frame index where the current run started
    run_start: usize,
    /// No-signal frames bridged by the current run
    run_gaps: usize,
    /// Frames consumed
    frame: usize,
    bits: Vec<u8>,
    runs: Vec<CommittedRun>,
    discarded_runs: usize,
}

impl Default for SymbolDebouncer {
    fn default() -> Self {
        Self::with_config(DebounceConfig::default())
    }
}

impl SymbolDebouncer {
    /// Create debouncer with validated thresholds
    pub fn new(config: DebounceConfig) -> Result<Self, ReasonCode> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    pub(crate) fn with_config(config: DebounceConfig) -> Self {
        Self {
            config,
            state: DebounceState::Idle,
            run_start: 0,
            run_gaps: 0,
            frame: 0,
            bits: Vec::new(),
            runs: Vec::new(),
            discarded_runs: 0,
        }
    }

    /// Feed one frame; returns the bit committed by this frame, if any
    pub fn push(&mut self, sample: Sample) -> Option<u8> {
        let index = self.frame;
        self.frame += 1;

        match self.state {
            DebounceState::Idle => {
                self.start_run(sample, index);
                None
            }

            DebounceState::Tracking { symbol, run_length, gap_length } if sample == symbol => {
                self.run_gaps += gap_length;
                self.state = DebounceState::Tracking {
                    symbol,
                    run_length: run_length + 1,
                    gap_length: 0,
                };
                None
            }

            DebounceState::Tracking { symbol, run_length, gap_length } if sample == Sample::NoSignal => {
                let gap_length = gap_length + 1;
                if gap_length > self.config.gap_tolerance {
                    // Dropout too long: close the run, do not track the gap
                    let emitted = self.close_run(symbol, run_length);
                    self.state = DebounceState::Idle;
                    emitted
                } else {
                    self.state = DebounceState::Tracking { symbol, run_length, gap_length };
                    None
                }
            }

            DebounceState::Tracking { symbol, run_length, .. } => {
                let emitted = self.close_run(symbol, run_length);
                self.start_run(sample, index);
                emitted
            }
        }
    }

    /// End of stream: close any open run
    pub fn finish(&mut self) -> Option<u8> {
        match self.state {
            DebounceState::Tracking { symbol, run_length, .. } => {
                self.state = DebounceState::Idle;
                self.close_run(symbol, run_length)
            }
            DebounceState::Idle => None,
        }
    }

    /// Debounce a complete stream from a clean state
    pub fn debounce(&mut self, samples: &[Sample]) -> DebounceOutput {
        self.reset();
        for sample in samples {
            self.push(*sample);
        }
        self.finish();

        DebounceOutput {
            bits: std::mem::take(&mut self.bits),
            runs: std::mem::take(&mut self.runs),
            frames_processed: self.frame,
            discarded_runs: self.discarded_runs,
        }
    }

    /// Forget all runs and frames
    pub fn reset(&mut self) {
        *self = Self::with_config(self.config);
    }

    fn start_run(&mut self, sample: Sample, index: usize) {
        self.state = DebounceState::Tracking {
            symbol: sample,
            run_length: 1,
            gap_length: 0,
        };
        self.run_start = index;
        self.run_gaps = 0;
    }

    fn close_run(&mut self, symbol: Sample, run_length: usize) -> Option<u8> {
        let bit = symbol.bit()?;

        if run_length < self.config.stable_min {
            self.discarded_runs += 1;
            return None;
        }

        let run = CommittedRun {
            symbol: bit,
            start_frame: self.run_start,
            frames: run_length,
            gap_frames: self.run_gaps,
        };
        debug!(
            bit,
            start_frame = run.start_frame,
            frames = run.frames,
            gap_frames = run.gap_frames,
            "run committed"
        );
        self.bits.push(bit);
        self.runs.push(run);
        Some(bit)
    }

    /// Get current state
    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Bits committed so far
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    pub fn frames_processed(&self) -> usize {
        self.frame
    }

    pub fn config(&self) -> &DebounceConfig {
        &self.config
    }
}

/// Debounce a stream with the given thresholds
pub fn debounce(samples: &[Sample], config: DebounceConfig) -> Result<DebounceOutput, ReasonCode> {
    Ok(SymbolDebouncer::new(config)?.debounce(samples))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sample::{Closed as C, NoSignal as G, Open as O};

    fn small() -> DebounceConfig {
        DebounceConfig { stable_min: 3, gap_tolerance: 2 }
    }

    fn run(sample: Sample, n: usize) -> Vec<Sample> {
        vec![sample; n]
    }

    fn frames(parts: &[Vec<Sample>]) -> Vec<Sample> {
        parts.concat()
    }

    #[test]
    fn test_initial_state_is_idle() {
        let debouncer = SymbolDebouncer::new(small()).unwrap();
        assert_eq!(debouncer.state(), DebounceState::Idle);
    }

    #[test]
    fn test_idle_tracks_any_frame() {
        let mut debouncer = SymbolDebouncer::new(small()).unwrap();
        debouncer.push(G);
        assert_eq!(
            debouncer.state(),
            DebounceState::Tracking { symbol: G, run_length: 1, gap_length: 0 }
        );
    }

    #[test]
    fn test_exact_stable_min_emits_once() {
        let input = frames(&[run(C, 1), run(O, 3), run(C, 1)]);
        let out = debounce(&input, small()).unwrap();
        assert_eq!(out.bits, vec![1]);
        assert_eq!(out.discarded_runs, 2);
    }

    #[test]
    fn test_flicker_suppressed() {
        let input = frames(&[run(O, 4), run(C, 1), run(O, 4)]);
        let out = debounce(&input, small()).unwrap();
        // The single Closed frame splits the run but is itself rejected
        assert_eq!(out.bits, vec![1, 1]);
    }

    #[test]
    fn test_gap_within_tolerance_bridged() {
        let input = frames(&[run(O, 2), run(G, 2), run(O, 1)]);
        let out = debounce(&input, small()).unwrap();
        assert_eq!(out.bits, vec![1]);
        assert_eq!(out.runs[0].frames, 3);
        assert_eq!(out.runs[0].gap_frames, 2);
    }

    #[test]
    fn test_gap_beyond_tolerance_closes_run() {
        let input = frames(&[run(O, 3), run(G, 3), run(O, 3)]);
        let out = debounce(&input, small()).unwrap();
        assert_eq!(out.bits, vec![1, 1]);
        assert_eq!(out.runs[1].start_frame, 6);
    }

    #[test]
    fn test_gap_close_returns_to_idle() {
        let mut debouncer = SymbolDebouncer::new(small()).unwrap();
        for s in run(C, 3) {
            assert_eq!(debouncer.push(s), None);
        }
        debouncer.push(G);
        debouncer.push(G);
        assert_eq!(debouncer.push(G), Some(0));
        assert_eq!(debouncer.state(), DebounceState::Idle);
    }

    #[test]
    fn test_gap_runs_never_emitted() {
        let input = frames(&[run(G, 10), run(C, 3), run(G, 10)]);
        let out = debounce(&input, small()).unwrap();
        assert_eq!(out.bits, vec![0]);
    }

    #[test]
    fn test_symbol_change_restarts_count() {
        // Two short runs must not add up to one stable run
        let input = frames(&[run(O, 2), run(C, 2), run(O, 2)]);
        let out = debounce(&input, small()).unwrap();
        assert!(out.bits.is_empty());
        assert_eq!(out.discarded_runs, 3);
    }

    #[test]
    fn test_short_stream_emits_nothing() {
        let out = debounce(&run(O, 2), small()).unwrap();
        assert!(out.is_empty());
        let out = debounce(&[], small()).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.frames_processed, 0);
    }

    #[test]
    fn test_end_of_stream_commits() {
        let mut debouncer = SymbolDebouncer::new(small()).unwrap();
        for s in run(O, 3) {
            debouncer.push(s);
        }
        assert_eq!(debouncer.finish(), Some(1));
        assert_eq!(debouncer.finish(), None);
    }

    #[test]
    fn test_debounce_resets_between_streams() {
        let mut debouncer = SymbolDebouncer::new(small()).unwrap();
        let first = debouncer.debounce(&run(O, 5));
        let second = debouncer.debounce(&run(C, 5));
        assert_eq!(first.bits, vec![1]);
        assert_eq!(second.bits, vec![0]);
        assert_eq!(second.frames_processed, 5);
    }

    #[test]
    fn test_zero_stable_min_rejected() {
        let config = DebounceConfig { stable_min: 0, gap_tolerance: 2 };
        assert_eq!(SymbolDebouncer::new(config).unwrap_err(), ReasonCode::R301_CONFIG_INVALID);
    }
}
