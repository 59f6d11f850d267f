//! # Fast BPE Tokenizer
//!
//! Combines a learned [`MergeRule`] table with its derived [`ExpansionCache`]
//! (for decode) and [`EncodeTrie`] (for encode) into a single reversible
//! [`UnitTokenizer`].

use std::path::Path;

use crate::bpe::expansion::ExpansionCache;
use crate::bpe::trainer;
use crate::bpe::trie::EncodeTrie;
use crate::bpe::vocab::{self, MergeRule};
use crate::errors::{UTResult, UnitTokenizerError};
use crate::tokenizer::UnitTokenizer;
use crate::types::{Batch, Unit};

/// A byte-pair-encoding tokenizer over sequences of [`Unit`]s.
///
/// Must be fitted (via [`FastBpeTokenizer::fit`]) or loaded (via
/// [`FastBpeTokenizer::load`]) before `encode`/`decode` can be used.
#[derive(Debug, Default)]
pub struct FastBpeTokenizer {
    rules: Vec<MergeRule>,
    expansions: ExpansionCache,
    trie: EncodeTrie,
    fitted: bool,
}

impl FastBpeTokenizer {
    /// Create an unfitted tokenizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Train a new rule table over `batch`, targeting `target_vocab_size`
    /// total units (initial units plus learned merges).
    pub fn fit(
        batch: &[Vec<Unit>],
        target_vocab_size: usize,
    ) -> UTResult<Self> {
        let result = trainer::fit(batch, target_vocab_size)?;
        Ok(Self::from_parts(result.rules, result.expansions))
    }

    /// Read a training batch from `path` (one sequence per line, see
    /// [`crate::file_adapter`]) and train a new rule table over it, as
    /// [`FastBpeTokenizer::fit`].
    pub fn fit_from_file(
        path: &Path,
        target_vocab_size: usize,
    ) -> UTResult<Self> {
        let batch = crate::file_adapter::read_line_batch(path)?;
        Self::fit(&batch, target_vocab_size)
    }

    /// Persist the learned rule table to `path`.
    pub fn save(
        &self,
        path: &Path,
    ) -> UTResult<()> {
        if !self.fitted || self.rules.is_empty() {
            return Err(UnitTokenizerError::NotFitted);
        }
        vocab::save(&self.rules, path)
    }

    /// Load a rule table previously written by [`FastBpeTokenizer::save`],
    /// rebuilding its expansion cache and encode trie.
    pub fn load(path: &Path) -> UTResult<Self> {
        let rules = vocab::load(path)?;
        let mut expansions = ExpansionCache::default();
        for rule in &rules {
            expansions.ensure_base(rule.pair.0);
            expansions.ensure_base(rule.pair.1);
            expansions.record_merge(rule.token, rule.pair.0, rule.pair.1);
        }
        Ok(Self::from_parts(rules, expansions))
    }

    fn from_parts(
        rules: Vec<MergeRule>,
        expansions: ExpansionCache,
    ) -> Self {
        let mut trie = EncodeTrie::new();
        for rule in &rules {
            trie.insert(&expansions.expand(rule.token), rule.token);
        }
        Self { rules, expansions, trie, fitted: true }
    }

    /// The learned merge rules, in training order.
    pub fn rules(&self) -> &[MergeRule] {
        &self.rules
    }
}

impl UnitTokenizer for FastBpeTokenizer {
    fn encode(
        &self,
        batch: &[Vec<Unit>],
    ) -> UTResult<Batch> {
        if !self.fitted {
            return Err(UnitTokenizerError::NotFitted);
        }
        Ok(batch.iter().map(|seq| self.trie.encode_sequence(seq)).collect())
    }

    fn decode(
        &self,
        batch: &[Vec<Unit>],
    ) -> UTResult<Batch> {
        if !self.fitted {
            return Err(UnitTokenizerError::NotFitted);
        }
        Ok(batch.iter().map(|seq| self.expansions.decode_sequence(seq)).collect())
    }
}
