//! Game Table
//!
//! Everything about a game that stays fixed once it is initialized:
//! players, stake, escrow ladder and ledger parameters. Every transaction
//! in the tree is a pure function of the table and the move being made.

use crate::config::GameConfig;
use crate::core::amount::Amount;
use crate::core::keys::AccountId;
use crate::error::GameError;
use crate::game::board::mover;
use crate::game::escrow::EscrowLadder;
use crate::ledger::account::Account;
use crate::ledger::network::Network;
use crate::ledger::LedgerError;

/// Fixed parameters of one game.
#[derive(Clone, Debug)]
pub struct GameTable {
    players: [Account; 2],
    bet: Amount,
    escrow: EscrowLadder,
    network: Network,
    config: GameConfig,
}

impl GameTable {
    /// Build a table, rejecting a negative stake or one that cannot be
    /// doubled.
    pub fn new(
        players: [Account; 2],
        bet: Amount,
        escrow: EscrowLadder,
        config: GameConfig,
    ) -> Result<Self, GameError> {
        if bet.is_negative() || bet.checked_mul(2).is_none() {
            return Err(GameError::InvalidBet(bet));
        }
        Ok(Self {
            players,
            bet,
            escrow,
            network: config.network(),
            config,
        })
    }

    /// Players, index 0 first.
    pub fn players(&self) -> &[Account; 2] {
        &self.players
    }

    /// Identity of player `index`.
    pub fn player_id(&self, index: usize) -> AccountId {
        self.players[index].id
    }

    /// Stake per player (zero for none).
    pub fn bet(&self) -> Amount {
        self.bet
    }

    /// Escrow ladder.
    pub fn escrow(&self) -> &EscrowLadder {
        &self.escrow
    }

    /// Network transactions are bound to.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Ledger parameters.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Source account for the transaction of `round`.
    ///
    /// Each player moves every other round, so their sequence advances by
    /// one per round pair. All siblings at one round share a sequence
    /// value; only one of them is ever submitted.
    pub fn mover_account(&self, round: u8) -> Result<Account, LedgerError> {
        self.players[mover(round)].offset((round >> 1) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players() -> [Account; 2] {
        [
            Account::new(AccountId::new([1; 32]), 100),
            Account::new(AccountId::new([2; 32]), 200),
        ]
    }

    #[test]
    fn test_mover_account_sequences() {
        let table = GameTable::new(players(), Amount::ZERO, EscrowLadder::generate(), GameConfig::default()).unwrap();

        // Index 1 plays odd rounds at offsets 0, 1, 2, 3, 4.
        assert_eq!(table.mover_account(1).unwrap(), Account::new(AccountId::new([2; 32]), 200));
        assert_eq!(table.mover_account(3).unwrap().sequence, 201);
        assert_eq!(table.mover_account(9).unwrap().sequence, 204);

        // Index 0 plays even rounds at offsets 1, 2, 3, 4.
        assert_eq!(table.mover_account(2).unwrap(), Account::new(AccountId::new([1; 32]), 101));
        assert_eq!(table.mover_account(8).unwrap().sequence, 104);
    }

    #[test]
    fn test_mover_account_near_sequence_limit() {
        let players = [
            Account::new(AccountId::new([1; 32]), i64::MAX - 1),
            Account::new(AccountId::new([2; 32]), 5),
        ];
        let table = GameTable::new(players, Amount::ZERO, EscrowLadder::generate(), GameConfig::default()).unwrap();
        assert_eq!(table.mover_account(2).unwrap().sequence, i64::MAX);
        assert!(matches!(table.mover_account(4), Err(LedgerError::SequenceOverflow { .. })));
        assert_eq!(table.mover_account(9).unwrap().sequence, 9);
    }

    #[test]
    fn test_invalid_bets_rejected() {
        let negative = GameTable::new(players(), Amount::from_stroops(-1), EscrowLadder::generate(), GameConfig::default());
        assert!(matches!(negative, Err(GameError::InvalidBet(_))));

        let huge = GameTable::new(players(), Amount::from_stroops(i64::MAX), EscrowLadder::generate(), GameConfig::default());
        assert!(matches!(huge, Err(GameError::InvalidBet(_))));
    }
}
