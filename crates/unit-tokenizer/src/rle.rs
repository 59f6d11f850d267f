//! # Run-Length Encoding Tokenizer

use crate::errors::UTResult;
use crate::tokenizer::UnitTokenizer;
use crate::types::{Batch, Sequence, Unit};

/// Options for [`RleTokenizer`].
#[derive(Debug, Clone, Copy)]
pub struct RleTokenizerOptions {
    /// The reserved prefix size / maximum representable run length.
    pub r: Unit,
}

impl Default for RleTokenizerOptions {
    fn default() -> Self {
        Self { r: 100 }
    }
}

impl RleTokenizerOptions {
    /// Sets the reserved prefix size.
    ///
    /// ## Arguments
    /// * `r` - the new reserved prefix size; must be `>= 2` for any run to be representable.
    ///
    /// ## Returns
    /// The updated `RleTokenizerOptions` instance.
    pub fn with_r(
        self,
        r: Unit,
    ) -> Self {
        Self { r }
    }
}

/// Run-Length Encoding tokenizer over sequences of units.
///
/// The first `r` integer values (`0..r`) are reserved to denote run length
/// (`0` is never emitted). Unit numbers are shifted by `r` to avoid
/// conflicting with the reserved range. Runs longer than `r - 1` are split
/// into chunks of at most `r - 1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RleTokenizer {
    options: RleTokenizerOptions,
}

impl RleTokenizer {
    /// Create a new `RleTokenizer` with the given options.
    pub fn new(options: RleTokenizerOptions) -> Self {
        Self { options }
    }

    fn max_run(&self) -> Unit {
        self.options.r.saturating_sub(1).max(1)
    }

    fn encode_sequence(
        &self,
        units: &[Unit],
    ) -> Sequence {
        let r = self.options.r;
        let max_run = self.max_run();
        let mut encoded = Sequence::new();
        let mut i = 0;
        while i < units.len() {
            let shifted = units[i] + r;
            let mut run_length: u64 = 1;
            while i + (run_length as usize) < units.len() && units[i + run_length as usize] == units[i] {
                run_length += 1;
            }
            let mut remaining = run_length;
            while remaining > 0 {
                let chunk = remaining.min(max_run as u64);
                encoded.push(chunk as Unit);
                encoded.push(shifted);
                remaining -= chunk;
            }
            i += run_length as usize;
        }
        encoded
    }

    fn decode_sequence(
        &self,
        units: &[Unit],
    ) -> Sequence {
        let r = self.options.r;
        let mut decoded = Sequence::new();
        let mut i = 0;
        while i + 1 < units.len() {
            let run_length = units[i];
            let unit = units[i + 1].saturating_sub(r);
            decoded.extend(std::iter::repeat_n(unit, run_length as usize));
            i += 2;
        }
        decoded
    }
}

impl UnitTokenizer for RleTokenizer {
    fn encode(
        &self,
        batch: &[Vec<u32>],
    ) -> UTResult<Batch> {
        Ok(batch.iter().map(|units| self.encode_sequence(units)).collect())
    }

    fn decode(
        &self,
        batch: &[Vec<u32>],
    ) -> UTResult<Batch> {
        Ok(batch.iter().map(|units| self.decode_sequence(units)).collect())
    }
}
