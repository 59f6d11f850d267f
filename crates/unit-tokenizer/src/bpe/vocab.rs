//! # Merge Rule Table Persistence
//!
//! The rule table produced by [`fit`](crate::bpe::trainer::fit) is saved and
//! loaded as a flat JSON array of `[left, right, new_unit]` triples, ordered
//! by the sequence in which merges were learned (later entries depend on
//! earlier ones).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{UTResult, UnitTokenizerError};
use crate::types::{Pair, Unit};

/// A single learned merge: `pair -> token`, in the order it was learned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRule {
    /// The adjacent pair that was merged.
    pub pair: Pair,
    /// The new unit produced by the merge.
    pub token: Unit,
}

#[derive(Serialize, Deserialize)]
struct VocabFile {
    merge_rules: Vec<(Unit, Unit, Unit)>,
}

/// Serialize `rules` to `path` as `{"merge_rules": [[a, b, c], ...]}`.
pub fn save(
    rules: &[MergeRule],
    path: &Path,
) -> UTResult<()> {
    let file = VocabFile {
        merge_rules: rules.iter().map(|r| (r.pair.0, r.pair.1, r.token)).collect(),
    };
    let json = serde_json::to_string_pretty(&file)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Deserialize a rule table previously written by [`save`].
pub fn load(path: &Path) -> UTResult<Vec<MergeRule>> {
    let contents = std::fs::read_to_string(path)?;
    let file: VocabFile = serde_json::from_str(&contents).map_err(|e| UnitTokenizerError::MalformedFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(file
        .merge_rules
        .into_iter()
        .map(|(a, b, token)| MergeRule { pair: (a, b), token })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir::TempDir::new("unit-tokenizer-vocab-test").unwrap();
        let path = dir.path().join("vocab.json");

        let rules = vec![
            MergeRule { pair: (0, 1), token: 6 },
            MergeRule { pair: (6, 2), token: 7 },
        ];
        save(&rules, &path).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded, rules);
    }

    #[test]
    fn test_load_malformed_file_reports_path() {
        let dir = tempdir::TempDir::new("unit-tokenizer-vocab-test").unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();

        let err = load(&path).unwrap_err();
        match err {
            UnitTokenizerError::MalformedFile { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected MalformedFile, got {other:?}"),
        }
    }
}
