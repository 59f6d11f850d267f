//! # `PackBits` Tokenizer

use crate::errors::UTResult;
use crate::tokenizer::UnitTokenizer;
use crate::types::{Batch, Sequence, Unit};

/// Options for [`PackBitsTokenizer`].
#[derive(Debug, Clone, Copy)]
pub struct PackBitsTokenizerOptions {
    /// The reserved prefix size; `0` is reserved as the literal-block marker.
    pub r: Unit,
}

impl Default for PackBitsTokenizerOptions {
    fn default() -> Self {
        Self { r: 100 }
    }
}

impl PackBitsTokenizerOptions {
    /// Sets the reserved prefix size.
    pub fn with_r(
        self,
        r: Unit,
    ) -> Self {
        Self { r }
    }
}

/// `PackBits` tokenizer over sequences of units.
///
/// `0` is reserved as the literal-block marker; the remainder of `0..r` is
/// reserved for run lengths. Unit numbers are shifted by `r` to avoid
/// conflicting with the reserved range. Both run blocks and literal blocks
/// are chunked to a maximum length of `r - 1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackBitsTokenizer {
    options: PackBitsTokenizerOptions,
}

const LITERAL_MARKER: Unit = 0;

impl PackBitsTokenizer {
    /// Create a new `PackBitsTokenizer` with the given options.
    pub fn new(options: PackBitsTokenizerOptions) -> Self {
        Self { options }
    }

    fn max_block(&self) -> usize {
        (self.options.r.saturating_sub(1).max(1)) as usize
    }

    fn encode_sequence(
        &self,
        units: &[Unit],
    ) -> Sequence {
        let r = self.options.r;
        let max_block = self.max_block();
        let shifted: Vec<Unit> = units.iter().map(|&u| u + r).collect();
        let n = shifted.len();

        let mut encoded = Sequence::new();
        let mut i = 0;
        while i < n {
            let mut run_length = 1usize;
            while i + run_length < n && shifted[i + run_length] == shifted[i] {
                run_length += 1;
            }

            if run_length > 1 {
                let mut remaining = run_length;
                while remaining > 0 {
                    let chunk = remaining.min(max_block);
                    encoded.push(chunk as Unit);
                    encoded.push(shifted[i]);
                    remaining -= chunk;
                }
                i += run_length;
            } else {
                let start = i;
                while i < n && (i + 1 >= n || shifted[i] != shifted[i + 1]) {
                    i += 1;
                }
                let literal = &shifted[start..i];
                for chunk in literal.chunks(max_block) {
                    encoded.push(LITERAL_MARKER);
                    encoded.push(chunk.len() as Unit);
                    encoded.extend_from_slice(chunk);
                }
            }
        }
        encoded
    }

    fn decode_sequence(
        &self,
        units: &[Unit],
    ) -> Sequence {
        let r = self.options.r;
        let mut decoded = Sequence::new();
        let n = units.len();
        let mut i = 0;
        while i < n {
            if units[i] == LITERAL_MARKER {
                let literal_length = units[i + 1] as usize;
                decoded.extend_from_slice(&units[i + 2..i + 2 + literal_length]);
                i += 2 + literal_length;
            } else {
                let run_length = units[i] as usize;
                decoded.extend(std::iter::repeat_n(units[i + 1], run_length));
                i += 2;
            }
        }
        decoded.into_iter().map(|u| u.saturating_sub(r)).collect()
    }
}

impl UnitTokenizer for PackBitsTokenizer {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_basic() {
        let codec = PackBitsTokenizer::default();
        let encoded = codec
            .encode(&[vec![0, 0, 0, 0, 1, 1, 2, 2, 2, 2, 2, 2, 3, 4, 5, 6]])
            .unwrap();
        assert_eq!(
            encoded,
            vec![vec![4, 100, 2, 101, 6, 102, 0, 4, 103, 104, 105, 106]]
        );
    }

    #[test]
    fn test_roundtrip() {
        let codec = PackBitsTokenizer::default();
        let batch = vec![
            vec![0, 0, 0, 0, 1, 1, 2, 2, 2, 2, 2, 2, 3, 4, 5, 6],
            vec![],
            vec![9],
        ];
        let encoded = codec.encode(&batch).unwrap();
        let decoded = codec.decode(&encoded).unwrap();
        assert_eq!(decoded, batch);
    }

    #[test]
    fn test_long_run_and_literal_block_are_chunked() {
        let codec = PackBitsTokenizer::new(PackBitsTokenizerOptions::default().with_r(4));
        // max_block = 3. A run of 7 identical units chunks into 3 + 3 + 1.
        let batch = vec![vec![5; 7]];
        let encoded = codec.encode(&batch).unwrap();
        assert_eq!(encoded[0], vec![3, 9, 3, 9, 1, 9]);
        assert_eq!(codec.decode(&encoded).unwrap(), batch);

        // A literal (non-repeating) stretch longer than max_block chunks too.
        let batch = vec![vec![1, 2, 3, 4, 5]];
        let encoded = codec.encode(&batch).unwrap();
        assert_eq!(encoded[0], vec![0, 3, 5, 6, 7, 0, 2, 8, 9]);
        assert_eq!(codec.decode(&encoded).unwrap(), batch);
    }
}
