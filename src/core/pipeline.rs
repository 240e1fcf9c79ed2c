//! Pipeline: samples → SymbolDebouncer → bits → Decoder → phrase
//!
//! Code table, lexicon and decoder are built once and never mutated, so a
//! single Pipeline can serve concurrent callers behind an Arc.

use crate::core::{CodeTable, Decoder, Lexicon, SymbolDebouncer};
use crate::types::{
    Candidate, DebounceOutput, DecodeResult, PipelineConfig, PipelineOutput, ReasonCode, Sample,
};

/// Immutable decoding pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    table: CodeTable,
    lexicon: Lexicon,
    decoder: Decoder,
}

impl Pipeline {
    /// Build with the reference code table
    pub fn new(config: PipelineConfig) -> Result<Self, ReasonCode> {
        Self::with_table(config, CodeTable::reference())
    }

    /// Build with a custom code table
    pub fn with_table(config: PipelineConfig, table: CodeTable) -> Result<Self, ReasonCode> {
        config.validate()?;
        let lexicon = Lexicon::build(&config.lexicon, &table, config.decoder.encode_policy)?;
        let decoder = Decoder::new(config.decoder)?;
        Ok(Self {
            config,
            table,
            lexicon,
            decoder,
        })
    }

    /// Debounce then decode a full observation stream
    pub fn run(&self, samples: &[Sample]) -> Result<PipelineOutput, ReasonCode> {
        let debounce = self.debounce(samples);
        let decode = self.decoder.decode(&debounce.bits, &self.lexicon)?;
        Ok(PipelineOutput::new(self.config.sample_rate, debounce, decode))
    }

    /// Debounce only
    pub fn debounce(&self, samples: &[Sample]) -> DebounceOutput {
        // Config was validated in new()
        let mut debouncer = SymbolDebouncer::with_config(self.config.debounce);
        debouncer.debounce(samples)
    }

    /// Decode an already debounced sequence
    pub fn decode_bits(&self, bits: &[u8]) -> Result<DecodeResult, ReasonCode> {
        self.decoder.decode(bits, &self.lexicon)
    }

    /// The `n` closest phrases for a sequence
    pub fn top_candidates(&self, bits: &[u8], n: usize) -> Result<Vec<Candidate>, ReasonCode> {
        self.decoder.decode_top(bits, &self.lexicon, n)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}
