//! Integration tests for the symbol debouncer
//!
//! Tests reference thresholds (31 stable frames, 20 gap frames) on raw streams

use handmorse::core::{debounce, parse_samples, DebounceState, SymbolDebouncer};
use handmorse::types::{DebounceConfig, Sample};
use handmorse::types::Sample::{Closed as C, NoSignal as G, Open as O};
use pretty_assertions::assert_eq;

fn frames(parts: &[(Sample, usize)]) -> Vec<Sample> {
    parts.iter().flat_map(|&(s, n)| std::iter::repeat(s).take(n)).collect()
}

/// A run of exactly stable_min frames emits one bit
#[test]
fn test_exact_threshold_emits_once() {
    let input = frames(&[(C, 5), (O, 31), (C, 5)]);
    let out = debounce(&input, DebounceConfig::default()).unwrap();

    assert_eq!(out.bits, vec![1]);
    assert_eq!(out.runs.len(), 1);
    assert_eq!(out.runs[0].start_frame, 5);
    assert_eq!(out.runs[0].frames, 31);
    assert_eq!(out.discarded_runs, 2);
}

/// One frame short is rejected
#[test]
fn test_below_threshold_rejected() {
    let out = debounce(&frames(&[(O, 30)]), DebounceConfig::default()).unwrap();
    assert!(out.is_empty());
    assert_eq!(out.discarded_runs, 1);
}

/// A dropout of gap_tolerance frames is bridged
#[test]
fn test_gap_at_tolerance_bridged() {
    let input = frames(&[(O, 31), (G, 20), (O, 31)]);
    let out = debounce(&input, DebounceConfig::default()).unwrap();

    assert_eq!(out.bits, vec![1]);
    assert_eq!(out.runs[0].frames, 62);
    assert_eq!(out.runs[0].gap_frames, 20);
}

/// A dropout one frame longer splits the run
#[test]
fn test_gap_over_tolerance_splits() {
    let input = frames(&[(O, 31), (G, 21), (O, 31)]);
    let out = debounce(&input, DebounceConfig::default()).unwrap();

    assert_eq!(out.bits, vec![1, 1]);
    assert_eq!(out.runs[1].start_frame, 52);
}

/// Two short halves around a long dropout are both rejected
#[test]
fn test_split_halves_rejected() {
    let input = frames(&[(O, 20), (G, 21), (O, 20)]);
    let out = debounce(&input, DebounceConfig::default()).unwrap();
    assert!(out.bits.is_empty());
}

/// Short flicker of the other symbol never becomes a bit
#[test]
fn test_flicker_never_emitted() {
    let input = frames(&[(C, 40), (O, 3), (G, 25), (C, 40)]);
    let out = debounce(&input, DebounceConfig::default()).unwrap();
    assert_eq!(out.bits, vec![0, 0]);
}

/// Streams shorter than stable_min yield nothing
#[test]
fn test_short_stream_empty() {
    let out = debounce(&frames(&[(O, 10), (G, 5), (C, 10)]), DebounceConfig::default()).unwrap();
    assert!(out.is_empty());
    assert_eq!(out.frames_processed, 25);
}

/// Bits stream out as frames arrive
#[test]
fn test_incremental_push() {
    let mut debouncer = SymbolDebouncer::new(DebounceConfig::default()).unwrap();
    let mut emitted = Vec::new();

    for sample in frames(&[(O, 31), (C, 31), (G, 21)]) {
        emitted.extend(debouncer.push(sample));
    }
    // Open closed by the first Closed frame, Closed by the 21st no-signal frame
    assert_eq!(emitted, vec![1, 0]);
    assert_eq!(debouncer.state(), DebounceState::Idle);
    assert_eq!(debouncer.finish(), None);
    assert_eq!(debouncer.bits(), &[1, 0]);
}

/// Parsed text streams debounce the same as typed ones
#[test]
fn test_parsed_stream() {
    let mut text = String::new();
    for _ in 0..31 {
        text.push_str("0 ");
    }
    for _ in 0..10 {
        text.push_str("-1\n");
    }
    for _ in 0..31 {
        text.push_str("1,");
    }

    let samples = parse_samples(&text).unwrap();
    assert_eq!(samples.len(), 72);

    let out = debounce(&samples, DebounceConfig::default()).unwrap();
    assert_eq!(out.bits, vec![0, 1]);
}
