//! Ternary observation samples from the sensor collaborator

use serde::{Deserialize, Serialize};
use crate::types::ReasonCode;

/// One per-frame observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Sample {
    /// Signal high (hand open) = 1
    Open,
    /// Signal low (hand closed) = 0
    Closed,
    /// No reading this frame = -1
    NoSignal,
}

impl Sample {
    /// Wire value: 1, 0 or -1
    pub fn value(&self) -> i8 {
        match self {
            Sample::Open => 1,
            Sample::Closed => 0,
            Sample::NoSignal => -1,
        }
    }

    /// Bit emitted for this sample, None for a gap marker
    pub fn bit(&self) -> Option<u8> {
        match self {
            Sample::Open => Some(1),
            Sample::Closed => Some(0),
            Sample::NoSignal => None,
        }
    }

    pub fn is_signal(&self) -> bool {
        !matches!(self, Sample::NoSignal)
    }

    /// Parse a wire value
    pub fn from_value(value: i64) -> Result<Self, ReasonCode> {
        match value {
            1 => Ok(Sample::Open),
            0 => Ok(Sample::Closed),
            -1 => Ok(Sample::NoSignal),
            _ => Err(ReasonCode::R205_INVALID_SAMPLE),
        }
    }
}

impl TryFrom<i8> for Sample {
    type Error = ReasonCode;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Sample::from_value(value as i64)
    }
}

impl From<Sample> for i8 {
    fn from(sample: Sample) -> Self {
        sample.value()
    }
}

impl std::fmt::Display for Sample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}
