//! Game Logic Module
//!
//! Board state and the transaction tree built over it. 100% deterministic:
//! for a given table, every transaction is a pure function of occupancy.
//!
//! ## Module Structure
//!
//! - `board`: Occupancy bitmasks, win detection
//! - `escrow`: Escrow account ladder
//! - `table`: Players, stake, ladder and ledger parameters
//! - `cache`: Transposition cache keyed by occupancy
//! - `tree`: Recursive enumerator and classification
//! - `session`: `Board`, setup and live move selection

pub mod board;
pub(crate) mod cache;
pub mod escrow;
pub mod session;
pub mod table;
pub mod tree;

// Re-export key types
pub use board::{is_winning_board, BoardState, WINNING_LINES};
pub use escrow::{EscrowLadder, LADDER_LEN};
pub use session::{Board, Transition};
pub use table::GameTable;
pub use tree::{TransitionKind, TreeStats, NUM_GAMES};
