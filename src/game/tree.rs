//! Game Tree Enumerator
//!
//! Builds the transaction for every reachable `(board, move)` pair.
//!
//! A parent transaction pre-authorizes the hashes of its children, so it
//! can only be built after all of them: the recursion is a post-order walk
//! and hashes travel back up through return values. Depth is at most 9,
//! so plain recursion is fine.
//!
//! ## Classification
//!
//! Checked in this order for the board after the move:
//!
//! 1. **Win**: `round >= 5` and the mover holds a line → win builder
//! 2. **Tie**: `round == 9` → tie builder
//! 3. **Interior**: transposition cache, else recurse and build
//!
//! Win comes first, so a line completed on round 9 is a win, not a tie.

use tracing::trace;

use crate::builders::{build_intermediate, Built, TieBuilder, WinBuilder};
use crate::core::hash::TxHash;
use crate::game::board::{BoardState, FIRST_WINNING_ROUND, LAST_ROUND};
use crate::game::cache::{CachedNode, TranspositionCache};
use crate::game::table::GameTable;
use crate::ledger::LedgerError;

/// Complete tic-tac-toe games from the empty board with fixed marks.
pub const NUM_GAMES: u64 = 255_168;

/// How a transition was classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// Mover completed a line.
    Win,
    /// Final cell filled without a line.
    Tie,
    /// Game continues.
    Interior,
}

/// One edge of the game tree.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    /// Complete games reachable through this edge.
    pub games: u64,
    /// Transaction for the edge.
    pub built: Built,
    /// Which builder produced it.
    pub kind: TransitionKind,
}

/// Enumeration counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Distinct interior positions built.
    pub interior_positions: usize,
    /// Interior lookups answered from the cache.
    pub cache_hits: u64,
    /// Interior lookups that had to build a sub-tree.
    pub cache_misses: u64,
    /// Distinct win transactions.
    pub wins: usize,
    /// Distinct tie transactions.
    pub ties: usize,
}

/// Recursive enumerator over one game table.
///
/// Borrows the builders and cache so the same state can be reused by
/// later move selection. Rounds are trusted: callers pass `1..=9`.
pub(crate) struct GameTree<'a> {
    table: &'a GameTable,
    wins: &'a mut WinBuilder,
    ties: &'a mut TieBuilder,
    cache: &'a mut TranspositionCache,
}

impl<'a> GameTree<'a> {
    /// Enumerator over `table` using the given builders and cache.
    pub fn new(
        table: &'a GameTable,
        wins: &'a mut WinBuilder,
        ties: &'a mut TieBuilder,
        cache: &'a mut TranspositionCache,
    ) -> Self {
        Self { table, wins, ties, cache }
    }

    /// Every move available in `round`: total games below them and their
    /// hashes in ascending cell order.
    pub fn play(&mut self, board: BoardState, round: u8) -> Result<(u64, Vec<TxHash>), LedgerError> {
        let mut games = 0;
        let mut hashes = Vec::with_capacity(board.available().count_ones() as usize);

        for cell in board.available_cells() {
            let node = self.transition(board, round, cell)?;
            games += node.games;
            hashes.push(node.built.hash);
        }

        Ok((games, hashes))
    }

    /// The edge for playing `position` in `round` from `board`.
    ///
    /// `board` is taken by value; the caller's copy never changes.
    pub fn transition(&mut self, board: BoardState, round: u8, position: u8) -> Result<Node, LedgerError> {
        let next = board.with_move(round, position);

        if round >= FIRST_WINNING_ROUND && next.is_win_for(round) {
            let built = self.wins.build(self.table, round, position)?;
            return Ok(Node { games: 1, built, kind: TransitionKind::Win });
        }

        if round == LAST_ROUND {
            let built = self.ties.build(self.table, round, position)?;
            return Ok(Node { games: 1, built, kind: TransitionKind::Tie });
        }

        let key = next.occupancy_key();
        if let Some(cached) = self.cache.lookup(key) {
            return Ok(Node { games: cached.games, built: cached.built, kind: TransitionKind::Interior });
        }

        let (games, children) = self.play(next, round + 1)?;
        let built = build_intermediate(self.table, round, position, &children)?;
        trace!(round, position, games, children = children.len(), "built interior node");

        self.cache.insert(key, CachedNode { games, built: built.clone() });
        Ok(Node { games, built, kind: TransitionKind::Interior })
    }

    /// Counters so far.
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            interior_positions: self.cache.len(),
            cache_hits: self.cache.hits(),
            cache_misses: self.cache.misses(),
            wins: self.wins.len(),
            ties: self.ties.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::core::amount::Amount;
    use crate::core::keys::AccountId;
    use crate::game::escrow::EscrowLadder;
    use crate::ledger::account::Account;

    fn table() -> GameTable {
        let players = [
            Account::new(AccountId::new([1; 32]), 10),
            Account::new(AccountId::new([2; 32]), 20),
        ];
        GameTable::new(players, Amount::ZERO, EscrowLadder::generate(), GameConfig::default()).unwrap()
    }

    fn board(moves: &[u8]) -> BoardState {
        moves
            .iter()
            .enumerate()
            .fold(BoardState::new(), |b, (i, &cell)| b.with_move(i as u8 + 1, cell))
    }

    #[test]
    fn test_full_enumeration_counts_all_games() {
        let table = table();
        let (mut wins, mut ties, mut cache) = (WinBuilder::new(), TieBuilder::new(), TranspositionCache::new());
        let mut tree = GameTree::new(&table, &mut wins, &mut ties, &mut cache);

        let (games, openings) = tree.play(BoardState::new(), 1).unwrap();
        assert_eq!(games, NUM_GAMES);
        assert_eq!(openings.len(), 9);

        let stats = tree.stats();
        assert!(stats.cache_hits > 0);
        assert!(stats.interior_positions > 0);
        // Every miss builds exactly one interior position.
        assert_eq!(stats.cache_misses, stats.interior_positions as u64);
        // Ties happen only on round 9, at most one per cell.
        assert!(stats.ties <= 9);
    }

    #[test]
    fn test_win_precedes_tie_on_last_round() {
        // X (index 1) holds 0, 4 and takes 8 on round 9 for the diagonal.
        // O: 1, 2, 3, 5. X: 0, 4, 6, 7.
        let before = board(&[0, 1, 4, 2, 6, 3, 7, 5]);
        assert_eq!(before.next_round(), 9);

        let table = table();
        let (mut wins, mut ties, mut cache) = (WinBuilder::new(), TieBuilder::new(), TranspositionCache::new());
        let mut tree = GameTree::new(&table, &mut wins, &mut ties, &mut cache);

        let node = tree.transition(before, 9, 8).unwrap();
        assert_eq!(node.kind, TransitionKind::Win);
        assert_eq!(node.games, 1);
        assert!(wins.contains(9, 8));
        assert!(!ties.contains(9, 8));
    }

    #[test]
    fn test_tie_on_last_round() {
        // X: 0, 1, 5, 6 then 8 → no line. O: 2, 3, 4, 7.
        let before = board(&[0, 2, 1, 3, 5, 4, 6, 7]);
        let table = table();
        let (mut wins, mut ties, mut cache) = (WinBuilder::new(), TieBuilder::new(), TranspositionCache::new());
        let mut tree = GameTree::new(&table, &mut wins, &mut ties, &mut cache);

        let node = tree.transition(before, 9, 8).unwrap();
        assert_eq!(node.kind, TransitionKind::Tie);
        assert!(ties.contains(9, 8));
        assert!(wins.is_empty());
    }

    #[test]
    fn test_transpositions_share_subtree() {
        let table = table();
        let (mut wins, mut ties, mut cache) = (WinBuilder::new(), TieBuilder::new(), TranspositionCache::new());
        let mut tree = GameTree::new(&table, &mut wins, &mut ties, &mut cache);

        // X 0, O 1, X 2 versus X 2, O 1, X 0.
        let a = board(&[0, 1, 2]);
        let b = board(&[2, 1, 0]);
        assert_eq!(a, b);

        let via_a = tree.transition(a, 4, 4).unwrap();
        let via_b = tree.transition(b, 4, 4).unwrap();
        assert_eq!(via_a.built.hash, via_b.built.hash);
        assert_eq!(via_a.games, via_b.games);

        let (games_a, hashes_a) = tree.play(a, 4).unwrap();
        let (games_b, hashes_b) = tree.play(b, 4).unwrap();
        assert_eq!(games_a, games_b);
        assert_eq!(hashes_a, hashes_b);
    }

    #[test]
    fn test_interior_preauthorizes_children_in_cell_order() {
        let table = table();
        let (mut wins, mut ties, mut cache) = (WinBuilder::new(), TieBuilder::new(), TranspositionCache::new());
        let mut tree = GameTree::new(&table, &mut wins, &mut ties, &mut cache);

        let start = board(&[4, 0, 8]);
        let node = tree.transition(start, 4, 2).unwrap();
        assert_eq!(node.kind, TransitionKind::Interior);

        let after = start.with_move(4, 2);
        let expected: Vec<TxHash> = after
            .available_cells()
            .map(|cell| tree.transition(after, 5, cell).unwrap().built.hash)
            .collect();
        assert_eq!(node.built.transaction.pre_authorized_hashes(), expected);
    }

    #[test]
    fn test_rederivation_is_idempotent() {
        let table = table();
        let (mut wins, mut ties, mut cache) = (WinBuilder::new(), TieBuilder::new(), TranspositionCache::new());
        let mut tree = GameTree::new(&table, &mut wins, &mut ties, &mut cache);

        let start = board(&[4, 1]);
        let first = tree.transition(start, 3, 0).unwrap();
        let second = tree.transition(start, 3, 0).unwrap();
        assert_eq!(first.built.hash, second.built.hash);
        assert_eq!(first.games, second.games);
    }
}
