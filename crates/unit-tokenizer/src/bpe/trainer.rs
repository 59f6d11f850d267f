//! # Fast BPE Trainer
//!
//! The training algorithm: repeatedly find the most-frequent adjacent pair
//! across a batch of sequences, merge it, and keep the linked lists and pair
//! index consistent incrementally rather than by rescanning the whole
//! corpus after every merge.

use crate::bpe::expansion::ExpansionCache;
use crate::bpe::linked_list::{NONE, NodeId, NodePool};
use crate::bpe::pair_index::PairIndex;
use crate::bpe::vocab::MergeRule;
use crate::errors::{UTResult, UnitTokenizerError};
use crate::types::{CommonHashSet, Pair, Unit};

/// The result of a completed `fit`: the ordered rule table and the
/// expansion cache derived while training (keyed by every initial unit plus
/// every merged unit produced).
#[derive(Debug)]
pub struct TrainResult {
    /// The ordered merge rules learned by this fit.
    pub rules: Vec<MergeRule>,
    /// The expansion cache, seeded with initial units and every merge.
    pub expansions: ExpansionCache,
}

/// Train an ordered BPE rule table over `batch`.
///
/// ## Arguments
/// * `batch` - training sequences; must contain at least one non-empty sequence.
/// * `target_vocab_size` - the desired vocabulary size; must exceed the
///   batch's initial vocabulary size.
///
/// ## Returns
/// A [`TrainResult`] containing the rule table (possibly shorter than
/// requested, if no more mergeable pairs remain) and its expansion cache.
pub fn fit(
    batch: &[Vec<Unit>],
    target_vocab_size: usize,
) -> UTResult<TrainResult> {
    let initial_vocab: CommonHashSet<Unit> = batch.iter().flatten().copied().collect();
    if initial_vocab.is_empty() {
        return Err(UnitTokenizerError::EmptyTrainingData);
    }

    let initial_vocab_size = initial_vocab.len();
    if target_vocab_size <= initial_vocab_size {
        return Err(UnitTokenizerError::TargetVocabTooSmall {
            target: target_vocab_size,
            initial: initial_vocab_size,
        });
    }

    let mut max_unit = *initial_vocab.iter().max().unwrap();
    let num_merges = target_vocab_size - initial_vocab_size;
    log::info!("Fitting BPE tokenizer with {num_merges} merges to compute");

    let mut expansions = ExpansionCache::seeded(initial_vocab.iter().copied());

    let total_nodes: usize = batch.iter().map(|s| s.len()).sum();
    let mut pool = NodePool::with_capacity(total_nodes);
    let heads = pool.build_sequences(batch.iter().map(|s| s.as_slice()));

    let mut index = PairIndex::default();
    for &head in &heads {
        let mut node = head;
        while pool.next(node) != NONE {
            let next = pool.next(node);
            let pair = (pool.unit(node), pool.unit(next));
            index.insert(pair, node);
            node = next;
        }
    }
    for &pair in index.positions.keys().copied().collect::<Vec<_>>().iter() {
        index.refresh(pair);
    }
    index.seed_heap();

    let mut rules = Vec::with_capacity(num_merges);
    let mut merges_done = 0usize;

    for _i in 0..num_merges {
        let Some(job) = index.pop_best() else {
            log::warn!("No more valid pairs to merge after {merges_done}/{num_merges} merges");
            break;
        };
        if job.count == 0 {
            log::warn!("No more valid pairs to merge after {merges_done}/{num_merges} merges");
            break;
        }

        let (a, b) = job.pair;
        max_unit += 1;
        let new_unit = max_unit;
        rules.push(MergeRule { pair: job.pair, token: new_unit });
        expansions.record_merge(new_unit, a, b);

        apply_merge(&mut pool, &mut index, job.pair, new_unit);

        merges_done += 1;
        #[cfg(feature = "verbose_training_logs")]
        log::debug!("merge {}/{num_merges}: {:?} -> {new_unit} (count {})", _i + 1, job.pair, job.count);
    }

    log::info!("Finished fitting BPE tokenizer: {merges_done} merges completed");
    Ok(TrainResult { rules, expansions })
}

/// Apply `pair -> new_unit` at every currently-valid recorded position,
/// updating the pair index's neighborhoods incrementally.
fn apply_merge(
    pool: &mut NodePool,
    index: &mut PairIndex,
    pair: Pair,
    new_unit: Unit,
) {
    let (a, b) = pair;
    let positions: Vec<NodeId> = index.positions.get(&pair).map(|s| s.iter().copied().collect()).unwrap_or_default();

    let mut dirty: CommonHashSet<Pair> = CommonHashSet::default();

    for node in positions {
        let next = pool.next(node);
        if !pool.active(node) || next == NONE || !pool.active(next) {
            continue;
        }
        if (pool.unit(node), pool.unit(next)) != pair {
            continue;
        }

        let removed = next;
        let after_removed = pool.next(removed);

        pool.set_unit(node, new_unit);
        pool.deactivate(removed);
        pool.set_next(node, after_removed);
        if after_removed != NONE {
            pool.set_prev(after_removed, node);
        }

        let prev = pool.prev(node);
        if prev != NONE {
            let old_pair = (pool.unit(prev), a);
            index.remove(old_pair, prev);
            dirty.insert(old_pair);

            let new_pair = (pool.unit(prev), new_unit);
            index.insert(new_pair, prev);
            dirty.insert(new_pair);
        }

        if after_removed != NONE {
            let new_pair = (new_unit, pool.unit(after_removed));
            index.insert(new_pair, node);
            dirty.insert(new_pair);

            let old_pair = (b, pool.unit(after_removed));
            index.remove(old_pair, removed);
            dirty.insert(old_pair);
        }
    }

    for p in dirty {
        index.refresh(p);
    }
    index.counts.insert(pair, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_matches_scenario_1() {
        let batch = vec![vec![0, 1, 0, 1, 2, 0, 1, 2, 3, 0, 1, 2, 3, 4, 0, 1, 2, 3, 4, 5]];
        let result = fit(&batch, 10).unwrap();
        let learned: Vec<(Pair, Unit)> = result.rules.iter().map(|r| (r.pair, r.token)).collect();
        assert_eq!(learned, vec![((0, 1), 6), ((6, 2), 7), ((7, 3), 8), ((8, 4), 9)]);
    }

    #[test]
    fn test_fit_empty_batch_errors() {
        let err = fit(&[], 10).unwrap_err();
        assert!(matches!(err, UnitTokenizerError::EmptyTrainingData));

        let err = fit(&[vec![], vec![]], 10).unwrap_err();
        assert!(matches!(err, UnitTokenizerError::EmptyTrainingData));
    }

    #[test]
    fn test_fit_target_too_small_errors() {
        let batch = vec![vec![0, 1, 2]];
        let err = fit(&batch, 3).unwrap_err();
        assert!(matches!(err, UnitTokenizerError::TargetVocabTooSmall { target: 3, initial: 3 }));
    }

    #[test]
    fn test_fit_stops_early_when_exhausted() {
        // Only one mergeable pair exists; asking for far more merges than
        // possible should stop early rather than error.
        let batch = vec![vec![0, 1]];
        let result = fit(&batch, 100).unwrap();
        assert_eq!(result.rules.len(), 1);
        assert_eq!(result.rules[0], MergeRule { pair: (0, 1), token: 2 });
    }

    #[test]
    fn test_fit_is_deterministic_across_runs() {
        let batch = vec![
            vec![0, 1, 0, 1, 2, 0, 1, 2, 3],
            vec![0, 1, 2, 3, 4, 0, 1, 2, 3, 4, 5],
        ];
        let r1 = fit(&batch, 10).unwrap();
        let r2 = fit(&batch, 10).unwrap();
        assert_eq!(r1.rules, r2.rules);
    }
}
