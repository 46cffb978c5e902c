//! Transposition Cache
//!
//! Maps combined occupancy (`positions[0] << 9 | positions[1]`) to the
//! sub-tree built for it. Different move orders that reach the same
//! occupancy share one entry, which is what keeps full enumeration down to
//! the few thousand distinct positions instead of every move permutation.
//!
//! Owned by the board that a setup call produces; nothing is global and
//! nothing is evicted.

use std::collections::BTreeMap;

use crate::builders::Built;

/// A cached interior node: games reachable below it and its transaction.
#[derive(Clone, Debug)]
pub(crate) struct CachedNode {
    /// Complete games reachable through this node.
    pub games: u64,
    /// The interior transaction.
    pub built: Built,
}

/// Occupancy-keyed cache of interior nodes.
#[derive(Clone, Debug, Default)]
pub(crate) struct TranspositionCache {
    entries: BTreeMap<u32, CachedNode>,
    hits: u64,
    misses: u64,
}

impl TranspositionCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `key`, counting the hit or miss.
    pub fn lookup(&mut self, key: u32) -> Option<CachedNode> {
        match self.entries.get(&key) {
            Some(node) => {
                self.hits += 1;
                Some(node.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store the node for `key`. Each key is built at most once, so an
    /// existing entry is kept.
    pub fn insert(&mut self, key: u32, node: CachedNode) {
        self.entries.entry(key).or_insert(node);
    }

    /// Distinct interior positions stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to build.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::keys::AccountId;
    use crate::ledger::account::Account;
    use crate::ledger::network::Network;
    use crate::ledger::operation::Operation;
    use crate::ledger::transaction::TransactionBuilder;

    fn node(games: u64, memo_source: u8) -> CachedNode {
        let network = Network::testnet();
        let tx = TransactionBuilder::new(&network, Account::new(AccountId::new([memo_source; 32]), 0), 100)
            .add_operation(Operation::account_merge(None, AccountId::new([0; 32])))
            .set_timeout(0, 0)
            .build()
            .unwrap();
        CachedNode { games, built: Built::new(tx) }
    }

    #[test]
    fn test_hit_and_miss_counters() {
        let mut cache = TranspositionCache::new();
        assert!(cache.lookup(42).is_none());
        cache.insert(42, node(3, 1));
        assert_eq!(cache.lookup(42).map(|n| n.games), Some(3));

        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_first_insert_wins() {
        let mut cache = TranspositionCache::new();
        let first = node(1, 1);
        let hash = first.built.hash;
        cache.insert(7, first);
        cache.insert(7, node(2, 2));

        let kept = cache.lookup(7).unwrap();
        assert_eq!(kept.games, 1);
        assert_eq!(kept.built.hash, hash);
        assert_eq!(cache.len(), 1);
        assert_eq!((cache.hits(), cache.misses()), (1, 0));
    }
}
