//! Ledger Transaction Model
//!
//! The slice of the ledger the escrow game builds against: accounts with
//! sequence numbers, four operation kinds, content-hashed transactions
//! and ed25519 signing.
//!
//! ## Module Structure
//!
//! - `account`: Account identity + sequence
//! - `network`: Network passphrase and id
//! - `operation`: Create/merge/payment/set-options operations
//! - `transaction`: Builder, content hash, signatures

pub mod account;
pub mod network;
pub mod operation;
pub mod transaction;

use thiserror::Error;

use crate::core::amount::Amount;

// Re-export key types
pub use account::Account;
pub use network::{Network, TESTNET_PASSPHRASE};
pub use operation::{Operation, OperationBody, Signer, SignerKey};
pub use transaction::{Memo, TimeBounds, Transaction, TransactionBody, TransactionBuilder};

/// Ledger model errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Transaction body could not be encoded.
    #[error("encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    /// Transaction has no operations.
    #[error("transaction has no operations")]
    NoOperations,

    /// Transaction exceeds the operation limit.
    #[error("transaction has {count} operations (max {max})")]
    TooManyOperations {
        /// Operations supplied.
        count: usize,
        /// Ledger limit.
        max: usize,
    },

    /// Timeout was never set.
    #[error("transaction timeout not set")]
    MissingTimeBounds,

    /// Sequence number would pass `i64::MAX`.
    #[error("sequence number overflow from {sequence}")]
    SequenceOverflow {
        /// Sequence the account started from.
        sequence: i64,
    },

    /// Amount arithmetic overflowed.
    #[error("amount overflow: {0}")]
    AmountOverflow(Amount),
}
