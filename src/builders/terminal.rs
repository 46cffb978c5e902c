//! Terminal Transaction Builders
//!
//! Win and tie transactions close the escrow ladder and settle the stake.
//! Both are pure functions of `(round, position)` for a given table, and
//! the same terminal transition recurs under many histories, so each
//! builder memoizes on that pair.
//!
//! The escrow at `round - 1` is always merged into player 0, who funded it.
//! Settlement therefore only needs an explicit payment when someone other
//! than player 0 is owed the stake:
//!
//! | Outcome         | bet > 0                       | then                 |
//! |-----------------|-------------------------------|----------------------|
//! | player 0 wins   | -                             | merge into player 0  |
//! | player 1 wins   | pay `2 × bet` to player 1     | merge into player 0  |
//! | tie             | pay `bet` back to player 1    | merge into player 0  |

use std::collections::BTreeMap;

use crate::builders::Built;
use crate::core::amount::Amount;
use crate::game::board::mover;
use crate::game::table::GameTable;
use crate::ledger::operation::Operation;
use crate::ledger::transaction::{Memo, TransactionBuilder};
use crate::ledger::LedgerError;

/// Memoized win transactions.
#[derive(Clone, Debug, Default)]
pub(crate) struct WinBuilder {
    cache: BTreeMap<(u8, u8), Built>,
}

impl WinBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Win transaction for the mover of `round` playing `position`.
    pub fn build(&mut self, table: &GameTable, round: u8, position: u8) -> Result<Built, LedgerError> {
        memoized(&mut self.cache, round, position, || {
            let payout = win_payout(table.bet(), mover(round))?;
            close_escrow(table, round, position, payout)
        })
    }

    /// Has the win for `(round, position)` been built?
    #[cfg(test)]
    pub fn contains(&self, round: u8, position: u8) -> bool {
        self.cache.contains_key(&(round, position))
    }

    /// Number of distinct win transactions built.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Nothing built yet?
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Memoized tie transactions.
#[derive(Clone, Debug, Default)]
pub(crate) struct TieBuilder {
    cache: BTreeMap<(u8, u8), Built>,
}

impl TieBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tie transaction for the final move `position` at `round`.
    pub fn build(&mut self, table: &GameTable, round: u8, position: u8) -> Result<Built, LedgerError> {
        memoized(&mut self.cache, round, position, || {
            let refund = (!table.bet().is_zero()).then(|| (1, table.bet()));
            close_escrow(table, round, position, refund)
        })
    }

    /// Has the tie for `(round, position)` been built?
    #[cfg(test)]
    pub fn contains(&self, round: u8, position: u8) -> bool {
        self.cache.contains_key(&(round, position))
    }

    /// Number of distinct tie transactions built.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Nothing built yet?
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Payment owed before the merge when `winner` completes a line.
fn win_payout(bet: Amount, winner: usize) -> Result<Option<(usize, Amount)>, LedgerError> {
    if bet.is_zero() || winner == 0 {
        return Ok(None);
    }
    let pot = bet.checked_mul(2).ok_or(LedgerError::AmountOverflow(bet))?;
    Ok(Some((winner, pot)))
}

fn memoized<F>(
    cache: &mut BTreeMap<(u8, u8), Built>,
    round: u8,
    position: u8,
    build: F,
) -> Result<Built, LedgerError>
where
    F: FnOnce() -> Result<Built, LedgerError>,
{
    if let Some(built) = cache.get(&(round, position)) {
        return Ok(built.clone());
    }
    let built = build()?;
    cache.insert((round, position), built.clone());
    Ok(built)
}

/// Optional payment out of the escrow, then merge it into player 0.
fn close_escrow(
    table: &GameTable,
    round: u8,
    position: u8,
    payment: Option<(usize, Amount)>,
) -> Result<Built, LedgerError> {
    let escrow = table.escrow().account(round as usize - 1);
    let config = table.config();

    let mut builder = TransactionBuilder::new(table.network(), table.mover_account(round)?, config.base_fee)
        .memo(Memo::Id(position as u64));

    if let Some((player, amount)) = payment {
        builder = builder.add_operation(Operation::payment(Some(escrow), table.player_id(player), amount));
    }

    let tx = builder
        .add_operation(Operation::account_merge(Some(escrow), table.player_id(0)))
        .set_timeout(0, 0)
        .build()?;

    Ok(Built::new(tx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
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
    fn test_second_player_win_pays_double_bet_first() {
        let table = table(50);
        let built = WinBuilder::new().build(&table, 7, 6).unwrap();
        let ops = built.transaction.operations();
        let escrow = table.escrow().account(6);

        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0], Operation::payment(Some(escrow), table.player_id(1), Amount::from_stroops(100)));
        assert_eq!(ops[1], Operation::account_merge(Some(escrow), table.player_id(0)));
    }

    #[test]
    fn test_first_player_win_has_no_payment() {
        let table = table(50);
        let built = WinBuilder::new().build(&table, 6, 2).unwrap();
        let ops = built.transaction.operations();

        assert_eq!(ops.len(), 1);
        assert!(matches!(ops[0].body, OperationBody::AccountMerge { .. }));
        assert_eq!(ops[0].source, Some(table.escrow().account(5)));
    }

    #[test]
    fn test_win_without_bet_only_merges() {
        let table = table(0);
        let built = WinBuilder::new().build(&table, 7, 6).unwrap();
        assert_eq!(built.transaction.operations().len(), 1);
    }

    #[test]
    fn test_tie_refunds_bet() {
        let table = table(30);
        let built = TieBuilder::new().build(&table, 9, 4).unwrap();
        let ops = built.transaction.operations();
        let escrow = table.escrow().account(8);

        assert_eq!(ops[0], Operation::payment(Some(escrow), table.player_id(1), Amount::from_stroops(30)));
        assert_eq!(ops[1], Operation::account_merge(Some(escrow), table.player_id(0)));

        let no_bet = TieBuilder::new().build(&self::table(0), 9, 4).unwrap();
        assert_eq!(no_bet.transaction.operations().len(), 1);
    }

    #[test]
    fn test_undoublable_bet_is_an_error() {
        let huge = Amount::from_stroops(i64::MAX);
        assert!(matches!(win_payout(huge, 1), Err(LedgerError::AmountOverflow(bet)) if bet == huge));
        assert_eq!(win_payout(huge, 0).unwrap(), None);
        assert_eq!(win_payout(Amount::ZERO, 1).unwrap(), None);
        assert_eq!(
            win_payout(Amount::from_stroops(7), 1).unwrap(),
            Some((1, Amount::from_stroops(14)))
        );
    }

    #[test]
    fn test_memoization() {
        let table = table(0);
        let mut wins = WinBuilder::new();
        assert!(wins.is_empty());

        let first = wins.build(&table, 5, 8).unwrap();
        let second = wins.build(&table, 5, 8).unwrap();
        assert!(std::sync::Arc::ptr_eq(&first.transaction, &second.transaction));
        assert_eq!(wins.len(), 1);
        assert!(wins.contains(5, 8));
        assert!(!wins.contains(5, 7));

        wins.build(&table, 5, 7).unwrap();
        assert_eq!(wins.len(), 2);
    }

    #[test]
    fn test_terminal_source_and_memo() {
        let table = table(0);
        let built = TieBuilder::new().build(&table, 9, 3).unwrap();
        let body = built.transaction.body();
        assert_eq!(body.source, table.player_id(1));
        assert_eq!(body.sequence, 20 + 4 + 1);
        assert_eq!(body.memo, Memo::Id(3));
    }
}
