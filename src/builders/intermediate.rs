//! Intermediate Transaction Builder
//!
//! An interior move hands the escrow balance one rung up the ladder and
//! locks the new rung to the transactions of the next round:
//!
//! ```text
//! escrow[round-1] ──create──▶ escrow[round]
//! escrow[round-1] ──merge───▶ escrow[round]
//! escrow[round]   += PreAuthTx(child) for each child
//! escrow[round]   master weight = 0
//! ```
//!
//! After it executes, `escrow[round]` can only be moved by submitting one
//! of the child transactions; no live signature can touch it.

use crate::builders::Built;
use crate::core::hash::TxHash;
use crate::game::table::GameTable;
use crate::ledger::operation::Operation;
use crate::ledger::transaction::{Memo, TransactionBuilder};
use crate::ledger::LedgerError;

/// Build the transaction for an interior move at `round` (`1..=8`), given
/// the hashes of every transaction one round deeper.
pub(crate) fn build_intermediate(
    table: &GameTable,
    round: u8,
    position: u8,
    children: &[TxHash],
) -> Result<Built, LedgerError> {
    let depth = round as usize;
    let current = table.escrow().account(depth - 1);
    let next = table.escrow().account(depth);
    let config = table.config();

    let tx = TransactionBuilder::new(table.network(), table.mover_account(round)?, config.base_fee)
        .memo(Memo::Id(position as u64))
        .add_operation(Operation::create_account(Some(current), next, config.escrow_reserve))
        .add_operation(Operation::account_merge(Some(current), next))
        .add_operations(children.iter().map(|hash| Operation::pre_authorize(next, *hash)))
        .add_operation(Operation::set_master_weight(next, 0))
        .set_timeout(0, 0)
        .build()?;

    Ok(Built::new(tx))
}
