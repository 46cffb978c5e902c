//! Core deterministic primitives.
//!
//! Everything the ledger model hashes or signs is built from these types,
//! so their encodings must be identical on every platform.

pub mod amount;
pub mod hash;
pub mod keys;

// Re-export core types
pub use amount::{Amount, AmountError, STROOPS_PER_UNIT};
pub use hash::{TxHash, TxHasher, network_id};
pub use keys::{AccountId, Keypair};
