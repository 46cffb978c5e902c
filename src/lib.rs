//! # Escrow Tic-Tac-Toe
//!
//! Trustless tic-tac-toe over a ledger. Setup enumerates every possible game,
//! builds one transaction per move, and chains them through escrow accounts
//! that are locked, by hash, to exactly that set of transactions. After setup
//! neither player can deviate, and neither needs the other online to move.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   ESCROW TIC-TAC-TOE                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── amount.rs   - 7-decimal fixed-point amounts             │
//! │  ├── hash.rs     - SHA-256 transaction hashing               │
//! │  └── keys.rs     - Ed25519 keypairs and account ids          │
//! │                                                              │
//! │  ledger/         - Ledger transaction model                  │
//! │  ├── account.rs  - Identity + sequence number                │
//! │  ├── network.rs  - Network passphrase / id                   │
//! │  ├── operation.rs- Create, merge, payment, set-options       │
//! │  └── transaction.rs - Builder, content hash, signatures      │
//! │                                                              │
//! │  builders/       - One builder per kind of tree node         │
//! │  ├── setup.rs    - Root: fund escrow[0], lock openings       │
//! │  ├── intermediate.rs - Interior move: climb one rung         │
//! │  └── terminal.rs - Win / tie: settle and close               │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── board.rs    - Occupancy bitmasks, win detection         │
//! │  ├── escrow.rs   - Escrow ladder                             │
//! │  ├── table.rs    - Fixed per-game parameters                 │
//! │  ├── cache.rs    - Transposition cache                       │
//! │  ├── tree.rs     - Recursive enumerator                      │
//! │  └── session.rs  - Board: setup and move selection           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use escrow_tictactoe::{setup, make_move, Account, Amount, GameConfig, Keypair};
//!
//! let players = [
//!     Account::new(Keypair::random().account_id(), 100),
//!     Account::new(Keypair::random().account_id(), 200),
//! ];
//! let (mut board, setup_tx) = setup(players, Amount::ZERO, GameConfig::default())?;
//! let opening = make_move(&mut board, 1, 4)?;
//! assert!(setup_tx.authorizes(&opening.transaction.hash()));
//! # Ok::<(), escrow_tictactoe::GameError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod builders;
pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod ledger;

// Re-export commonly used types
pub use crate::config::GameConfig;
pub use crate::core::amount::Amount;
pub use crate::core::hash::TxHash;
pub use crate::core::keys::{AccountId, Keypair};
pub use error::{GameError, InvalidMove};
pub use game::{is_winning_board, Board, BoardState, Transition, TransitionKind, NUM_GAMES};
pub use ledger::{Account, Transaction};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the full transaction tree for a new game.
///
/// Returns the board and the setup transaction signed by the first escrow
/// account. Fails if enumeration does not produce exactly [`NUM_GAMES`].
pub fn setup(players: [Account; 2], bet: Amount, config: GameConfig) -> Result<(Board, Transaction), GameError> {
    Board::setup(players, bet, config)
}

/// Select the committed transaction for a move and apply it to `board`.
pub fn make_move(board: &mut Board, round: u8, position: u8) -> Result<Transition, GameError> {
    board.play_move(round, position)
}
