//! # Expansion Cache
//!
//! Maps every unit (initial or merged) to its fully-expanded sequence of
//! initial units. Materialized once per `fit`/`load` so `decode` is O(1) per
//! unit rather than recursively re-expanding shared sub-sequences.

use std::sync::Arc;

use crate::types::{CommonHashMap, Unit};

/// `unit -> fully expanded sequence of initial units`.
#[derive(Debug, Default, Clone)]
pub struct ExpansionCache {
    expansions: CommonHashMap<Unit, Arc<[Unit]>>,
}

impl ExpansionCache {
    /// Seed the cache with every initial unit mapping to itself.
    pub fn seeded<I: IntoIterator<Item = Unit>>(initial_units: I) -> Self {
        let mut cache = Self::default();
        for u in initial_units {
            cache.expansions.insert(u, Arc::from(vec![u]));
        }
        cache
    }

    /// Record the expansion of a freshly merged unit as the concatenation of
    /// its parents' expansions.
    pub fn record_merge(
        &mut self,
        new_unit: Unit,
        a: Unit,
        b: Unit,
    ) {
        let mut expanded = Vec::with_capacity(self.expand(a).len() + self.expand(b).len());
        expanded.extend_from_slice(&self.expand(a));
        expanded.extend_from_slice(&self.expand(b));
        self.expansions.insert(new_unit, Arc::from(expanded));
    }

    /// Ensure `unit` has an expansion, defaulting it to `[unit]` if absent.
    /// Used while rebuilding a cache from a persisted rule table, where base
    /// units are only seen lazily as merge parents.
    pub fn ensure_base(
        &mut self,
        unit: Unit,
    ) {
        self.expansions.entry(unit).or_insert_with(|| Arc::from(vec![unit]));
    }

    /// Expand `unit`, defaulting to `[unit]` if unknown so decode is total.
    pub fn expand(
        &self,
        unit: Unit,
    ) -> Arc<[Unit]> {
        self.expansions.get(&unit).cloned().unwrap_or_else(|| Arc::from(vec![unit]))
    }

    /// Decode a full sequence by expanding every unit in order.
    pub fn decode_sequence(
        &self,
        units: &[Unit],
    ) -> Vec<Unit> {
        let mut out = Vec::with_capacity(units.len());
        for &u in units {
            out.extend_from_slice(&self.expand(u));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_and_merge() {
        let mut cache = ExpansionCache::seeded([0, 1, 2]);
        cache.record_merge(10, 0, 1);
        cache.record_merge(11, 10, 2);
        assert_eq!(&*cache.expand(0), &[0]);
        assert_eq!(&*cache.expand(10), &[0, 1]);
        assert_eq!(&*cache.expand(11), &[0, 1, 2]);
    }

    #[test]
    fn test_unknown_unit_decodes_to_itself() {
        let cache = ExpansionCache::default();
        assert_eq!(&*cache.expand(42), &[42]);
        assert_eq!(cache.decode_sequence(&[1, 2, 3]), vec![1, 2, 3]);
    }
}
