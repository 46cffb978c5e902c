//! Ledger accounts and sequence numbers.

use serde::{Serialize, Deserialize};
use crate::core::keys::AccountId;
use crate::ledger::LedgerError;

/// Account identity plus its current sequence number.
///
/// A transaction built from an account carries `sequence + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account identity.
    pub id: AccountId,
    /// Last consumed sequence number.
    pub sequence: i64,
}

impl Account {
    /// Create an account view.
    pub const fn new(id: AccountId, sequence: i64) -> Self {
        Self { id, sequence }
    }

    /// Same identity, sequence advanced by `offset`.
    pub fn offset(&self, offset: i64) -> Result<Self, LedgerError> {
        let sequence = self
            .sequence
            .checked_add(offset)
            .ok_or(LedgerError::SequenceOverflow { sequence: self.sequence })?;
        Ok(Self { id: self.id, sequence })
    }

    /// Sequence number the next transaction from this account must carry.
    pub fn next_sequence(&self) -> Result<i64, LedgerError> {
        self.sequence
            .checked_add(1)
            .ok_or(LedgerError::SequenceOverflow { sequence: self.sequence })
    }
}
