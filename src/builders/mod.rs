//! Transaction Builders
//!
//! One builder per kind of node in the game tree:
//!
//! - `setup`: root transaction funding the first escrow account
//! - `intermediate`: interior move, climbs one rung of the escrow ladder
//! - `terminal`: win and tie transactions that close the ladder
//!
//! Builders only read the `GameTable`; none of them touches board state.
//! They trust their `round` argument, so they are reached only through the
//! enumerator and the validated move selector.

mod intermediate;
mod setup;
mod terminal;

use std::sync::Arc;

use crate::core::hash::TxHash;
use crate::ledger::transaction::Transaction;

pub(crate) use intermediate::build_intermediate;
pub(crate) use setup::build_setup;
pub(crate) use terminal::{TieBuilder, WinBuilder};

/// A built transaction and its content hash.
///
/// Shared behind `Arc` because the same node is referenced from every
/// history that reaches it.
#[derive(Clone, Debug)]
pub(crate) struct Built {
    /// The transaction.
    pub transaction: Arc<Transaction>,
    /// Its content hash.
    pub hash: TxHash,
}

impl Built {
    /// Wrap a freshly built transaction.
    pub fn new(transaction: Transaction) -> Self {
        let hash = transaction.hash();
        Self { transaction: Arc::new(transaction), hash }
    }
}
