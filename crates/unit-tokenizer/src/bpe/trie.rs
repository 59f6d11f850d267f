//! # Encode Trie
//!
//! A prefix tree keyed by initial units, derived from the finished rule
//! table's expansion cache. Used for greedy longest-match encoding: a longer
//! trie match always corresponds to a later (higher-priority) merge rule,
//! since all of its shorter components have already been fused by
//! construction.

use crate::types::{CommonHashMap, Sequence, Unit};

#[derive(Debug, Default)]
struct TrieNode {
    children: CommonHashMap<Unit, usize>,
    token: Option<Unit>,
}

/// An arena-backed trie over expanded unit sequences.
#[derive(Debug, Default)]
pub struct EncodeTrie {
    nodes: Vec<TrieNode>,
}

impl EncodeTrie {
    /// Create an empty trie (just the root node).
    pub fn new() -> Self {
        Self { nodes: vec![TrieNode::default()] }
    }

    /// Insert `token`'s expansion into the trie, labeling the terminal node.
    pub fn insert(
        &mut self,
        expansion: &[Unit],
        token: Unit,
    ) {
        let mut node = 0usize;
        for &unit in expansion {
            node = match self.nodes[node].children.get(&unit) {
                Some(&next) => next,
                None => {
                    self.nodes.push(TrieNode::default());
                    let next = self.nodes.len() - 1;
                    self.nodes[node].children.insert(unit, next);
                    next
                }
            };
        }
        self.nodes[node].token = Some(token);
    }

    /// Greedy longest-match encode of a single sequence.
    pub fn encode_sequence(
        &self,
        units: &[Unit],
    ) -> Sequence {
        let mut out = Sequence::with_capacity(units.len());
        let mut i = 0;
        while i < units.len() {
            let mut node = 0usize;
            let mut best: Option<(Unit, usize)> = None;
            let mut j = i;
            while j < units.len() {
                match self.nodes[node].children.get(&units[j]) {
                    Some(&next) => {
                        node = next;
                        j += 1;
                        if let Some(token) = self.nodes[node].token {
                            best = Some((token, j));
                        }
                    }
                    None => break,
                }
            }
            match best {
                Some((token, end)) => {
                    out.push(token);
                    i = end;
                }
                None => {
                    out.push(units[i]);
                    i += 1;
                }
            }
        }
        out
    }
}
