//! Core modules for HandMorse

pub mod code_table;
pub mod encoder;
pub mod distance;
pub mod lexicon;
pub mod decoder;
pub mod debouncer;
pub mod stream;
pub mod pipeline;
pub mod api;

pub use code_table::CodeTable;
pub use encoder::{PhraseEncoder, encode};
pub use distance::distance;
pub use lexicon::{Lexicon, LexiconEntry, build_phrases, expected_size};
pub use decoder::{Decoder, beam, validate_bits};
pub use debouncer::{SymbolDebouncer, DebounceState, debounce};
pub use stream::{parse_samples, parse_bits};
pub use pipeline::Pipeline;
pub use api::{create_router, run_server};
