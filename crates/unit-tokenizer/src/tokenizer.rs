//! # `UnitTokenizer` Trait

use crate::errors::UTResult;
use crate::types::Batch;

/// Uniform contract shared by all unit tokenizers.
///
/// A "batch" is an ordered sequence of sequences of non-negative integers.
/// `encode` and `decode` are total over valid inputs and preserve batch
/// length and the order of inner sequences.
pub trait UnitTokenizer {
    /// Encode a batch of unit sequences.
    fn encode(
        &self,
        batch: &[Vec<u32>],
    ) -> UTResult<Batch>;

    /// Decode a batch of unit sequences produced by [`Self::encode`].
    ///
    /// `decode(encode(x)) == x` holds for any batch `x` over this tokenizer's
    /// vocabulary.
    fn decode(
        &self,
        batch: &[Vec<u32>],
    ) -> UTResult<Batch>;
}
