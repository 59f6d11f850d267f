//! # Common Types and Hash Aliases

/// A unit: a non-negative integer token.
pub type Unit = u32;

/// A pair of adjacent units.
pub type Pair = (Unit, Unit);

/// An ordered sequence of units.
pub type Sequence = Vec<Unit>;

/// An ordered sequence of sequences of units.
pub type Batch = Vec<Sequence>;

#[cfg(feature = "ahash")]
mod hash_types {
    /// Type alias for hash maps used throughout this crate.
    pub type CommonHashMap<K, V> = ahash::AHashMap<K, V>;

    /// Type alias for hash sets used throughout this crate.
    pub type CommonHashSet<V> = ahash::AHashSet<V>;
}
#[cfg(not(feature = "ahash"))]
mod hash_types {
    /// Type alias for hash maps used throughout this crate.
    pub type CommonHashMap<K, V> = std::collections::HashMap<K, V>;

    /// Type alias for hash sets used throughout this crate.
    pub type CommonHashSet<V> = std::collections::HashSet<V>;
}
pub use hash_types::*;

/// Check if a type is `Send`.
#[cfg(test)]
pub(crate) fn check_is_send<S: Send>(_: S) {}

/// Check if a type is `Sync`.
#[cfg(test)]
pub(crate) fn check_is_sync<S: Sync>(_: S) {}
