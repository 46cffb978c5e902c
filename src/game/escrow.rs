//! Escrow Ladder
//!
//! One escrow account per depth. Depth 0 is funded by the setup
//! transaction; each interior move creates the next rung and merges the
//! previous one into it, so the balance climbs the ladder as the game
//! proceeds.

use rand::{CryptoRng, RngCore};

use crate::core::keys::{AccountId, Keypair};

/// Number of rungs: one for setup plus one per round.
pub const LADDER_LEN: usize = 10;

/// Escrow keypairs indexed by depth. Generated once, never regenerated.
#[derive(Clone, Debug)]
pub struct EscrowLadder {
    rungs: Vec<Keypair>,
}

impl EscrowLadder {
    /// Fresh random ladder.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Ladder from a caller-supplied RNG.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self {
            rungs: (0..LADDER_LEN).map(|_| Keypair::generate(rng)).collect(),
        }
    }

    /// Escrow account at `depth`.
    ///
    /// # Panics
    /// Panics if `depth >= LADDER_LEN`; callers index by validated round.
    pub fn account(&self, depth: usize) -> AccountId {
        self.rungs[depth].account_id()
    }

    /// Keypair of the escrow account at `depth`.
    pub fn keys(&self, depth: usize) -> &Keypair {
        &self.rungs[depth]
    }

    /// All escrow accounts in depth order.
    pub fn accounts(&self) -> Vec<AccountId> {
        self.rungs.iter().map(Keypair::account_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_ladder_has_distinct_rungs() {
        let ladder = EscrowLadder::generate();
        let accounts = ladder.accounts();
        assert_eq!(accounts.len(), LADDER_LEN);
        let unique: BTreeSet<_> = accounts.iter().collect();
        assert_eq!(unique.len(), LADDER_LEN);
    }

    #[test]
    fn test_keys_match_accounts() {
        let ladder = EscrowLadder::generate_with(&mut StdRng::seed_from_u64(1));
        for depth in 0..LADDER_LEN {
            assert_eq!(ladder.keys(depth).account_id(), ladder.account(depth));
        }
    }

    #[test]
    fn test_seeded_ladder_reproducible() {
        let a = EscrowLadder::generate_with(&mut StdRng::seed_from_u64(5));
        let b = EscrowLadder::generate_with(&mut StdRng::seed_from_u64(5));
        assert_eq!(a.accounts(), b.accounts());
    }
}
