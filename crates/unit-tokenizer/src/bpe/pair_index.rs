//! # Pair Position Index
//!
//! Tracks, for every adjacent pair of live units across the training corpus,
//! the set of left-hand node ids where that pair currently occurs. Backed by
//! a lazy max-heap of merge candidates so the most frequent pair can be
//! selected without a full rescan after every merge.

use std::cmp::Ordering;

use dary_heap::OctonaryHeap;

use crate::bpe::linked_list::NodeId;
use crate::types::{CommonHashMap, CommonHashSet, Pair};

/// A candidate merge: a pair and the occurrence count it had when pushed.
///
/// Ties are broken by ascending `(a, b)` lexicographic order: among pairs
/// with equal counts, the lexicographically smaller pair is preferred. Since
/// [`OctonaryHeap`] is a max-heap, that preference is encoded by reversing
/// the pair comparison.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MergeJob {
    /// The number of live occurrences of this pair at the time it was pushed.
    pub count: u64,
    /// The pair to merge.
    pub pair: Pair,
}

impl MergeJob {
    fn heap_key(&self) -> (u64, std::cmp::Reverse<Pair>) {
        (self.count, std::cmp::Reverse(self.pair))
    }
}

impl PartialOrd for MergeJob {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MergeJob {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.heap_key().cmp(&other.heap_key())
    }
}

/// A map from [`Pair`] to the set of left-hand node ids where it currently occurs.
pub type PairPositions = CommonHashMap<Pair, CommonHashSet<NodeId>>;

/// A map from [`Pair`] to its materialized occurrence count.
pub type PairCounts = CommonHashMap<Pair, u64>;

/// The training-time pair index: positions, materialized counts, and the
/// lazy max-heap of merge candidates.
#[derive(Debug, Default)]
pub struct PairIndex {
    /// `pair -> set of left nodes where (node.unit, node.next.unit) == pair`.
    pub positions: PairPositions,
    /// `pair -> |positions[pair]|`.
    pub counts: PairCounts,
    /// Lazy max-heap of `(count, pair)` jobs; may contain stale entries.
    heap: OctonaryHeap<MergeJob>,
}

impl PairIndex {
    /// Record that `pair` currently occurs at left node `node`.
    pub fn insert(
        &mut self,
        pair: Pair,
        node: NodeId,
    ) {
        self.positions.entry(pair).or_default().insert(node);
    }

    /// Record that `pair` no longer occurs at left node `node`.
    pub fn remove(
        &mut self,
        pair: Pair,
        node: NodeId,
    ) {
        if let Some(set) = self.positions.get_mut(&pair) {
            set.remove(&node);
        }
    }

    /// Recompute `counts[pair]` from `positions[pair]` and push a fresh job
    /// for it onto the heap.
    pub fn refresh(
        &mut self,
        pair: Pair,
    ) {
        let count = self.positions.get(&pair).map(|s| s.len() as u64).unwrap_or(0);
        self.counts.insert(pair, count);
        if count > 0 {
            self.heap.push(MergeJob { count, pair });
        }
    }

    /// Seed the heap with every pair's initial count. Call once after the
    /// index has been built from a single pass over the corpus.
    pub fn seed_heap(&mut self) {
        let jobs: Vec<MergeJob> = self
            .counts
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(&pair, &count)| MergeJob { count, pair })
            .collect();
        self.heap.extend(jobs);
    }

    /// Pop the best live merge candidate, lazily discarding stale heap
    /// entries whose stored count no longer matches the materialized count.
    ///
    /// Returns `None` once the heap is exhausted of live candidates.
    pub fn pop_best(&mut self) -> Option<MergeJob> {
        while let Some(job) = self.heap.pop() {
            let current = self.counts.get(&job.pair).copied().unwrap_or(0);
            if current == job.count && current > 0 {
                return Some(job);
            }
            // Stale (count changed since this entry was pushed): drop it.
            // A live entry with the fresh count will already be on the heap
            // from whichever merge step last called `refresh` for this pair.
        }
        None
    }
}
