//! Observation stream parsing
//!
//! Accepts what the sensor side prints: `[1, 1, 0, -1, ...]`, plain
//! whitespace/comma separated values, or a JSON array.

use lazy_static::lazy_static;
use regex::Regex;
use crate::types::{ReasonCode, Sample};

lazy_static! {
    // Signed integer tokens
    static ref RE_TOKEN: Regex = Regex::new(r"-?\d+").unwrap();

    // Only digits, signs, separators and optional brackets
    static ref RE_SAMPLE_TEXT: Regex = Regex::new(r"^[\s\[\],;+\-\d]*$").unwrap();

    // Compact bit string: "0101 1100"
    static ref RE_BIT_STRING: Regex = Regex::new(r"^[01\s_]+$").unwrap();
}

/// Parse a ternary observation stream
pub fn parse_samples(text: &str) -> Result<Vec<Sample>, ReasonCode> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    if !RE_SAMPLE_TEXT.is_match(text) {
        return Err(ReasonCode::R205_INVALID_SAMPLE);
    }

    RE_TOKEN
        .find_iter(text)
        .map(|m| {
            let value: i64 = m.as_str().parse().map_err(|_| ReasonCode::R205_INVALID_SAMPLE)?;
            Sample::from_value(value)
        })
        .collect()
}

/// Parse a debounced bit sequence.
///
/// `"0000001000100111"` and `"[0, 0, 1]"` are both accepted.
pub fn parse_bits(text: &str) -> Result<Vec<u8>, ReasonCode> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    if RE_BIT_STRING.is_match(text) {
        return Ok(text
            .chars()
            .filter_map(|c| match c {
                '0' => Some(0),
                '1' => Some(1),
                _ => None,
            })
            .collect());
    }

    if !RE_SAMPLE_TEXT.is_match(text) {
        return Err(ReasonCode::R204_INVALID_BIT);
    }
    RE_TOKEN
        .find_iter(text)
        .map(|m| match m.as_str() {
            "0" => Ok(0),
            "1" => Ok(1),
            _ => Err(ReasonCode::R204_INVALID_BIT),
        })
        .collect()
}
