//! # Unit Tokenizer
//!
//! Reversible tokenizers over sequences of small non-negative integers
//! ("units"), rather than text. Three collaborating tokenizers are provided,
//! all sharing the [`UnitTokenizer`] trait and the `Vec<Vec<u32>>` batch
//! shape:
//!
//! - [`bpe::FastBpeTokenizer`] - a trainable byte-pair-encoding tokenizer
//!   that merges frequent adjacent pairs into new units.
//! - [`rle::RleTokenizer`] - a stateless run-length codec.
//! - [`packbits::PackBitsTokenizer`] - a stateless PackBits-style codec that
//!   distinguishes run blocks from literal blocks.
//!
//! Every tokenizer additionally implements [`file_adapter::FileAdapter`] for
//! line-oriented file I/O.

#![doc = document_features::document_features!()]

pub mod bpe;
pub mod errors;
pub mod file_adapter;
pub mod packbits;
pub mod rle;
pub mod tokenizer;
pub mod types;

pub use errors::{UTResult, UnitTokenizerError};
pub use file_adapter::FileAdapter;
pub use packbits::{PackBitsTokenizer, PackBitsTokenizerOptions};
pub use rle::{RleTokenizer, RleTokenizerOptions};
pub use tokenizer::UnitTokenizer;
