//! Game Session
//!
//! `Board` ties the live occupancy to everything built at setup: the
//! table, the terminal builders and the transposition cache. Setup builds
//! the whole tree once; each later move walks the same deterministic path
//! through that state to pick out the already-committed transaction.

use std::time::Instant;
use tracing::{debug, error, info, instrument};

use crate::builders::{build_setup, TieBuilder, WinBuilder};
use crate::config::GameConfig;
use crate::core::amount::Amount;
use crate::core::hash::short_hex;
use crate::error::{GameError, InvalidMove};
use crate::game::board::{BoardState, CELLS, LAST_ROUND};
use crate::game::cache::TranspositionCache;
use crate::game::escrow::EscrowLadder;
use crate::game::table::GameTable;
use crate::game::tree::{GameTree, TransitionKind, TreeStats, NUM_GAMES};
use crate::ledger::account::Account;
use crate::ledger::transaction::Transaction;

/// Transaction selected for a live move.
#[derive(Clone, Debug)]
pub struct Transition {
    /// Which builder produced it.
    pub kind: TransitionKind,
    /// Complete games still reachable through this move.
    pub games: u64,
    /// The transaction, signed by the escrow when it has to be.
    pub transaction: Transaction,
}

/// A game in progress.
#[derive(Clone, Debug)]
pub struct Board {
    state: BoardState,
    table: GameTable,
    wins: WinBuilder,
    ties: TieBuilder,
    cache: TranspositionCache,
    built: bool,
}

impl Board {
    /// Empty board with a fresh escrow ladder. Nothing is built yet, and
    /// moves are refused until the tree is.
    pub fn initialize(players: [Account; 2], bet: Amount, config: GameConfig) -> Result<Self, GameError> {
        Self::initialize_with_ladder(players, bet, config, EscrowLadder::generate())
    }

    /// Empty board over a caller-supplied escrow ladder.
    pub fn initialize_with_ladder(
        players: [Account; 2],
        bet: Amount,
        config: GameConfig,
        escrow: EscrowLadder,
    ) -> Result<Self, GameError> {
        Ok(Self {
            state: BoardState::new(),
            table: GameTable::new(players, bet, escrow, config)?,
            wins: WinBuilder::new(),
            ties: TieBuilder::new(),
            cache: TranspositionCache::new(),
            built: false,
        })
    }

    /// Initialize a game and build its whole transaction tree.
    ///
    /// Returns the board and the setup transaction, signed by `escrow[0]`.
    /// Players still sign it with their own keys before submitting.
    pub fn setup(players: [Account; 2], bet: Amount, config: GameConfig) -> Result<(Self, Transaction), GameError> {
        Self::setup_with_ladder(players, bet, config, EscrowLadder::generate())
    }

    /// [`Board::setup`] over a caller-supplied escrow ladder.
    pub fn setup_with_ladder(
        players: [Account; 2],
        bet: Amount,
        config: GameConfig,
        escrow: EscrowLadder,
    ) -> Result<(Self, Transaction), GameError> {
        let mut board = Self::initialize_with_ladder(players, bet, config, escrow)?;
        let tx = board.build_tree()?;
        Ok((board, tx))
    }

    /// Enumerate every game from the empty board and build the setup
    /// transaction over the opening moves.
    #[instrument(skip(self), fields(bet = %self.table.bet()))]
    fn build_tree(&mut self) -> Result<Transaction, GameError> {
        let started = Instant::now();
        info!("Enumerating game tree");

        let mut tree = GameTree::new(&self.table, &mut self.wins, &mut self.ties, &mut self.cache);
        let (games, openings) = tree.play(self.state, self.state.next_round())?;
        let stats = tree.stats();

        if games != NUM_GAMES {
            error!(games, expected = NUM_GAMES, "Game count mismatch");
            return Err(GameError::GameCountMismatch { expected: NUM_GAMES, got: games });
        }

        let mut tx = build_setup(&self.table, &openings)?;
        tx.sign(self.table.escrow().keys(0));
        self.built = true;

        info!(
            games,
            interior = stats.interior_positions,
            cache_hits = stats.cache_hits,
            cache_misses = stats.cache_misses,
            wins = stats.wins,
            ties = stats.ties,
            elapsed_ms = started.elapsed().as_millis() as u64,
            setup = %short_hex(&tx.hash()),
            "Game tree built"
        );

        Ok(tx)
    }

    /// Select the transaction for `position` in `round` and apply the move.
    ///
    /// Only a board whose tree was built by setup can select; otherwise
    /// [`GameError::TreeNotBuilt`]. The arguments are checked against the
    /// board first; on error nothing changes. The transaction is signed with `escrow[round]` only when
    /// that account is an operation source (interior moves, which configure
    /// the new escrow rung).
    pub fn play_move(&mut self, round: u8, position: u8) -> Result<Transition, GameError> {
        if !self.built {
            return Err(GameError::TreeNotBuilt);
        }
        self.check_move(round, position)?;

        let mut tree = GameTree::new(&self.table, &mut self.wins, &mut self.ties, &mut self.cache);
        let node = tree.transition(self.state, round, position)?;

        let mut transaction = (*node.built.transaction).clone();
        let escrow = self.table.escrow();
        if transaction.source_accounts().contains(&escrow.account(round as usize)) {
            transaction.sign(escrow.keys(round as usize));
        }

        self.state.apply(round, position);
        debug!(
            round,
            position,
            kind = ?node.kind,
            games = node.games,
            hash = %short_hex(&node.built.hash),
            "Move selected"
        );

        Ok(Transition { kind: node.kind, games: node.games, transaction })
    }

    fn check_move(&self, round: u8, position: u8) -> Result<(), InvalidMove> {
        if !(1..=LAST_ROUND).contains(&round) {
            return Err(InvalidMove::RoundOutOfRange(round));
        }
        if position >= CELLS {
            return Err(InvalidMove::PositionOutOfRange(position));
        }
        if self.state.is_finished() {
            return Err(InvalidMove::GameFinished);
        }
        let expected = self.state.next_round();
        if round != expected {
            return Err(InvalidMove::OutOfTurn { expected, got: round });
        }
        if !self.state.is_available(position) {
            return Err(InvalidMove::CellOccupied(position));
        }
        Ok(())
    }

    /// Live occupancy.
    pub fn state(&self) -> BoardState {
        self.state
    }

    /// Occupancy masks of both players.
    pub fn positions(&self) -> [u16; 2] {
        self.state.positions()
    }

    /// Mask of empty cells.
    pub fn available(&self) -> u16 {
        self.state.available()
    }

    /// Stake per player.
    pub fn bet(&self) -> Amount {
        self.table.bet()
    }

    /// Players, index 0 first.
    pub fn players(&self) -> &[Account; 2] {
        self.table.players()
    }

    /// Fixed game parameters.
    pub fn table(&self) -> &GameTable {
        &self.table
    }

    /// Tree counters.
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
