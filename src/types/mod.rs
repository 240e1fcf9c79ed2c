//! Core types for HandMorse

mod sample;
mod reason;
mod config;
mod decode;
mod run;
mod output;

pub use sample::Sample;
pub use reason::ReasonCode;
pub use config::{DebounceConfig, DecoderConfig, EncodePolicy, LexiconConfig, PipelineConfig};
pub use decode::{Candidate, DecodeResult, MatchTier, confidence};
pub use run::{CommittedRun, DebounceOutput, bits_to_string};
pub use output::{PipelineOutput, decode_terminal_string, decode_parseable_string};
