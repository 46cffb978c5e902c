//! Transactions
//!
//! Building, hashing and signing. The content hash covers the network id,
//! the envelope type and the bincode encoding of the body; signatures are
//! not part of it, so signing never changes a transaction's identity.

use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};

use crate::core::hash::{TxHash, TxHasher, ENVELOPE_TYPE_TX};
use crate::core::keys::{AccountId, Keypair};
use crate::ledger::account::Account;
use crate::ledger::network::Network;
use crate::ledger::operation::Operation;
use crate::ledger::LedgerError;

/// Maximum operations per transaction.
pub const MAX_OPERATIONS: usize = 100;

/// Transaction memo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Memo {
    /// No memo.
    None,
    /// 64-bit id memo.
    Id(u64),
}

/// Validity window. `max_time == 0` means no upper bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBounds {
    /// Earliest close time (unix seconds).
    pub min_time: u64,
    /// Latest close time (unix seconds), 0 for none.
    pub max_time: u64,
}

impl TimeBounds {
    /// Valid forever.
    pub const NO_TIMEOUT: TimeBounds = TimeBounds { min_time: 0, max_time: 0 };
}

/// The hashed part of a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionBody {
    /// Fee-paying, sequence-consuming account.
    pub source: AccountId,
    /// Total fee (base fee × operations).
    pub fee: u32,
    /// Sequence number this transaction consumes.
    pub sequence: i64,
    /// Validity window.
    pub time_bounds: TimeBounds,
    /// Memo.
    pub memo: Memo,
    /// Operations, applied in order.
    pub operations: Vec<Operation>,
}

/// Signature plus the hint identifying its key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoratedSignature {
    /// Last four bytes of the signer's public key.
    pub hint: [u8; 4],
    /// Raw ed25519 signature bytes.
    pub signature: Vec<u8>,
}

/// A built transaction with its cached content hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    body: TransactionBody,
    hash: TxHash,
    signatures: Vec<DecoratedSignature>,
}

impl Transaction {
    /// Transaction body.
    pub fn body(&self) -> &TransactionBody {
        &self.body
    }

    /// Operations in order.
    pub fn operations(&self) -> &[Operation] {
        &self.body.operations
    }

    /// Content hash (what a pre-authorized signer commits to).
    pub fn hash(&self) -> TxHash {
        self.hash
    }

    /// Attached signatures.
    pub fn signatures(&self) -> &[DecoratedSignature] {
        &self.signatures
    }

    /// Sign the content hash.
    pub fn sign(&mut self, keys: &Keypair) {
        let signature = keys.sign(&self.hash);
        self.signatures.push(DecoratedSignature {
            hint: keys.account_id().hint(),
            signature: signature.to_vec(),
        });
    }

    /// Does any attached signature verify against `account`?
    pub fn is_signed_by(&self, account: &AccountId) -> bool {
        let hint = account.hint();
        self.signatures
            .iter()
            .filter(|s| s.hint == hint)
            .any(|s| account.verify(&self.hash, &s.signature))
    }

    /// Explicit operation source accounts.
    pub fn source_accounts(&self) -> BTreeSet<AccountId> {
        self.body.operations.iter().filter_map(|op| op.source).collect()
    }

    /// Hashes this transaction registers as pre-authorized signers, in order.
    pub fn pre_authorized_hashes(&self) -> Vec<TxHash> {
        self.body
            .operations
            .iter()
            .filter_map(|op| op.pre_authorized_hash().copied())
            .collect()
    }

    /// Does this transaction pre-authorize `hash`?
    pub fn authorizes(&self, hash: &TxHash) -> bool {
        self.body.operations.iter().any(|op| op.pre_authorized_hash() == Some(hash))
    }

    /// Encode the signed envelope for submission.
    pub fn to_envelope_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        Ok(bincode::serialize(&(&self.body, &self.signatures))?)
    }
}

/// Compute the content hash of a body on a network.
pub fn content_hash(network: &Network, body: &TransactionBody) -> Result<TxHash, LedgerError> {
    let encoded = bincode::serialize(body)?;
    let mut hasher = TxHasher::for_network(&network.id());
    hasher.update_u32(ENVELOPE_TYPE_TX);
    hasher.update_bytes(&encoded);
    Ok(hasher.finalize())
}

/// Incremental transaction builder.
pub struct TransactionBuilder<'a> {
    network: &'a Network,
    source: Account,
    base_fee: u32,
    memo: Memo,
    time_bounds: Option<TimeBounds>,
    operations: Vec<Operation>,
}

impl<'a> TransactionBuilder<'a> {
    /// Start a transaction from `source`; it will carry `source.sequence + 1`.
    pub fn new(network: &'a Network, source: Account, base_fee: u32) -> Self {
        Self {
            network,
            source,
            base_fee,
            memo: Memo::None,
            time_bounds: None,
            operations: Vec::new(),
        }
    }

    /// Set the memo.
    pub fn memo(mut self, memo: Memo) -> Self {
        self.memo = memo;
        self
    }

    /// Append an operation.
    pub fn add_operation(mut self, op: Operation) -> Self {
        self.operations.push(op);
        self
    }

    /// Append several operations.
    pub fn add_operations<I: IntoIterator<Item = Operation>>(mut self, ops: I) -> Self {
        self.operations.extend(ops);
        self
    }

    /// Timeout in seconds from `now`; 0 means no timeout.
    pub fn set_timeout(mut self, now: u64, seconds: u64) -> Self {
        let max_time = if seconds == 0 { 0 } else { now + seconds };
        self.time_bounds = Some(TimeBounds { min_time: 0, max_time });
        self
    }

    /// Finish the transaction and compute its hash.
    pub fn build(self) -> Result<Transaction, LedgerError> {
        let count = self.operations.len();
        if count == 0 {
            return Err(LedgerError::NoOperations);
        }
        if count > MAX_OPERATIONS {
            return Err(LedgerError::TooManyOperations { count, max: MAX_OPERATIONS });
        }
        let time_bounds = self.time_bounds.ok_or(LedgerError::MissingTimeBounds)?;

        let body = TransactionBody {
            source: self.source.id,
            fee: self.base_fee.saturating_mul(count as u32),
            sequence: self.source.next_sequence()?,
            time_bounds,
            memo: self.memo,
            operations: self.operations,
        };
        let hash = content_hash(self.network, &body)?;

        Ok(Transaction { body, hash, signatures: Vec::new() })
    }
}
