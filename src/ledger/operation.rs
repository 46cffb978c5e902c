//! Ledger Operations
//!
//! The four operation kinds the escrow game needs. Each operation may name
//! its own source account; without one it acts on the transaction source.

use serde::{Serialize, Deserialize};
use crate::core::amount::Amount;
use crate::core::hash::TxHash;
use crate::core::keys::AccountId;

/// Key type of an additional account signer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignerKey {
    /// Exactly one future transaction, identified by its content hash.
    PreAuthTx(TxHash),
}

/// Signer entry added by `SetOptions`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    /// Signer key.
    pub key: SignerKey,
    /// Signing weight (0 removes the signer).
    pub weight: u8,
}

/// Operation payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationBody {
    /// Create and fund a new account.
    CreateAccount {
        /// New account.
        destination: AccountId,
        /// Initial native balance.
        starting_balance: Amount,
    },

    /// Native-asset payment.
    Payment {
        /// Receiving account.
        destination: AccountId,
        /// Amount sent.
        amount: Amount,
    },

    /// Transfer the whole balance and delete the source account.
    AccountMerge {
        /// Account receiving the balance.
        destination: AccountId,
    },

    /// Change signers and thresholds.
    SetOptions {
        /// New master key weight, if changed.
        master_weight: Option<u8>,
        /// Signer to add or update.
        signer: Option<Signer>,
    },
}

/// One operation inside a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Source account override.
    pub source: Option<AccountId>,
    /// Payload.
    pub body: OperationBody,
}

impl Operation {
    /// Create `destination` funded from `source`.
    pub fn create_account(source: Option<AccountId>, destination: AccountId, starting_balance: Amount) -> Self {
        Self {
            source,
            body: OperationBody::CreateAccount { destination, starting_balance },
        }
    }

    /// Pay `amount` from `source` to `destination`.
    pub fn payment(source: Option<AccountId>, destination: AccountId, amount: Amount) -> Self {
        Self {
            source,
            body: OperationBody::Payment { destination, amount },
        }
    }

    /// Merge `source` into `destination`.
    pub fn account_merge(source: Option<AccountId>, destination: AccountId) -> Self {
        Self {
            source,
            body: OperationBody::AccountMerge { destination },
        }
    }

    /// Add a pre-authorized transaction signer with weight 1.
    pub fn pre_authorize(source: AccountId, hash: TxHash) -> Self {
        Self {
            source: Some(source),
            body: OperationBody::SetOptions {
                master_weight: None,
                signer: Some(Signer { key: SignerKey::PreAuthTx(hash), weight: 1 }),
            },
        }
    }

    /// Set the master key weight of `source`.
    pub fn set_master_weight(source: AccountId, weight: u8) -> Self {
        Self {
            source: Some(source),
            body: OperationBody::SetOptions { master_weight: Some(weight), signer: None },
        }
    }

    /// Pre-authorized hash carried by this operation, if any.
    pub fn pre_authorized_hash(&self) -> Option<&TxHash> {
        match &self.body {
            OperationBody::SetOptions {
                signer: Some(Signer { key: SignerKey::PreAuthTx(hash), .. }),
                ..
            } => Some(hash),
            _ => None,
        }
    }

    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self.body {
            OperationBody::CreateAccount { .. } => "create_account",
            OperationBody::Payment { .. } => "payment",
            OperationBody::AccountMerge { .. } => "account_merge",
            OperationBody::SetOptions { .. } => "set_options",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pre_authorized_hash_extraction() {
        let escrow = AccountId::new([1; 32]);
        let op = Operation::pre_authorize(escrow, [9; 32]);
        assert_eq!(op.pre_authorized_hash(), Some(&[9; 32]));
        assert_eq!(op.source, Some(escrow));

        let master = Operation::set_master_weight(escrow, 0);
        assert_eq!(master.pre_authorized_hash(), None);
        assert_eq!(Operation::account_merge(None, escrow).pre_authorized_hash(), None);
    }

    #[test]
    fn test_kind_names() {
        let a = AccountId::new([1; 32]);
        assert_eq!(Operation::payment(None, a, Amount::ZERO).kind(), "payment");
        assert_eq!(Operation::account_merge(None, a).kind(), "account_merge");
        assert_eq!(Operation::create_account(None, a, Amount::ZERO).kind(), "create_account");
        assert_eq!(Operation::set_master_weight(a, 0).kind(), "set_options");
    }
}
