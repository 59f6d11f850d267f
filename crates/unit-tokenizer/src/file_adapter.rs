//! # File Adapter
//!
//! Whitespace-per-line integer file I/O, shared by every [`UnitTokenizer`].
//!
//! Format: one sequence per line, integers separated by single ASCII spaces,
//! trailing newline on the last line optional. Empty lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::errors::{UTResult, UnitTokenizerError};
use crate::tokenizer::UnitTokenizer;
use crate::types::{Batch, Sequence};

/// File-based convenience wrappers around [`UnitTokenizer::encode`]/[`UnitTokenizer::decode`].
pub trait FileAdapter: UnitTokenizer {
    /// Read a batch from `in_path`, encode it, and write the result to `out_path`.
    fn encode_from_file(
        &self,
        in_path: impl AsRef<Path>,
        out_path: impl AsRef<Path>,
    ) -> UTResult<()> {
        let batch = read_line_batch(in_path)?;
        let encoded = self.encode(&batch)?;
        write_line_batch(out_path, &encoded)
    }

    /// Read a batch from `in_path`, decode it, and write the result to `out_path`.
    fn decode_from_file(
        &self,
        in_path: impl AsRef<Path>,
        out_path: impl AsRef<Path>,
    ) -> UTResult<()> {
        let batch = read_line_batch(in_path)?;
        let decoded = self.decode(&batch)?;
        write_line_batch(out_path, &decoded)
    }
}

impl<T: UnitTokenizer + ?Sized> FileAdapter for T {}

pub(crate) fn read_line_batch(path: impl AsRef<Path>) -> UTResult<Batch> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut batch = Batch::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let sequence: Sequence = line
            .split_ascii_whitespace()
            .map(|tok| {
                tok.parse::<u32>().map_err(|e| UnitTokenizerError::MalformedFile {
                    path: path.to_path_buf(),
                    reason: format!("invalid integer {tok:?}: {e}"),
                })
            })
            .collect::<UTResult<_>>()?;
        batch.push(sequence);
    }
    Ok(batch)
}

fn write_line_batch(
    path: impl AsRef<Path>,
    batch: &[Sequence],
) -> UTResult<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    for sequence in batch {
        let line = sequence
            .iter()
            .map(|unit| unit.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}
