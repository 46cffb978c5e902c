//! Setup Transaction Builder
//!
//! Root of the game tree: player 0 funds `escrow[0]`, both players pay in
//! their stake, and `escrow[0]` is locked to the opening moves before its
//! master key is switched off.

use crate::core::hash::TxHash;
use crate::game::table::GameTable;
use crate::ledger::operation::Operation;
use crate::ledger::transaction::{Transaction, TransactionBuilder};
use crate::ledger::LedgerError;

/// Build the unsigned setup transaction from the hashes of every opening
/// move.
pub(crate) fn build_setup(table: &GameTable, openings: &[TxHash]) -> Result<Transaction, LedgerError> {
    let escrow = table.escrow().account(0);
    let config = table.config();

    let mut builder = TransactionBuilder::new(table.network(), table.players()[0], config.base_fee)
        .add_operation(Operation::create_account(None, escrow, config.escrow_funding));

    if !table.bet().is_zero() {
        for player in table.players() {
            builder = builder.add_operation(Operation::payment(Some(player.id), escrow, table.bet()));
        }
    }

    builder
        .add_operations(openings.iter().map(|hash| Operation::pre_authorize(escrow, *hash)))
        .add_operation(Operation::set_master_weight(escrow, 0))
        .set_timeout(0, 0)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::core::amount::Amount;
    use crate::core::keys::AccountId;
    use crate::game::escrow::EscrowLadder;
    use crate::ledger::account::Account;
    use crate::ledger::operation::OperationBody;

    fn table(bet: i64) -> GameTable {
        let players = [
            Account::new(AccountId::new([1; 32]), 10),
            Account::new(AccountId::new([2; 32]), 20),
        ];
        GameTable::new(players, Amount::from_stroops(bet), EscrowLadder::generate(), GameConfig::default()).unwrap()
    }

    #[test]
    fn test_setup_without_bet() {
        let table = table(0);
        let openings: Vec<TxHash> = (0..9).map(|i| [i; 32]).collect();
        let tx = build_setup(&table, &openings).unwrap();
        let ops = tx.operations();
        let escrow = table.escrow().account(0);

        assert_eq!(ops.len(), 1 + 9 + 1);
        assert_eq!(ops[0], Operation::create_account(None, escrow, table.config().escrow_funding));
        assert_eq!(tx.pre_authorized_hashes(), openings);
        assert_eq!(ops[10], Operation::set_master_weight(escrow, 0));

        assert_eq!(tx.body().source, table.player_id(0));
        assert_eq!(tx.body().sequence, 11);
    }

    #[test]
    fn test_setup_collects_bet_from_each_player() {
        let table = table(25);
        let tx = build_setup(&table, &[[7; 32]]).unwrap();
        let escrow = table.escrow().account(0);

        let payments: Vec<_> = tx
            .operations()
            .iter()
            .filter(|op| matches!(op.body, OperationBody::Payment { .. }))
            .collect();

        assert_eq!(payments.len(), 2);
        for (op, player) in payments.iter().zip(table.players()) {
            assert_eq!(op.source, Some(player.id));
            assert_eq!(
                op.body,
                OperationBody::Payment { destination: escrow, amount: Amount::from_stroops(25) }
            );
        }
    }
}
