//! Transaction Hashing
//!
//! Deterministic SHA-256 hashing for:
//! - Network identifiers (hash of the passphrase)
//! - Transaction content hashes (what pre-authorized signers commit to)

use sha2::{Sha256, Digest};

/// Hash output type (256 bits / 32 bytes).
pub type TxHash = [u8; 32];

/// Envelope type tag mixed into every transaction hash.
pub const ENVELOPE_TYPE_TX: u32 = 2;

/// Deterministic hasher for transaction payloads.
///
/// Wraps SHA-256 with helpers for the integer encodings the ledger uses.
/// Order of updates is critical for determinism.
pub struct TxHasher {
    hasher: Sha256,
}

impl TxHasher {
    /// Create a hasher seeded with a network id.
    pub fn for_network(network_id: &TxHash) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(network_id);
        Self { hasher }
    }

    /// Update with raw bytes.
    #[inline]
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Update with a u32 value (big-endian, as the ledger encodes it).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_be_bytes());
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> TxHash {
        self.hasher.finalize().into()
    }
}

/// Compute a plain SHA-256 of arbitrary data.
pub fn hash_bytes(data: &[u8]) -> TxHash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive the network id from a passphrase.
pub fn network_id(passphrase: &str) -> TxHash {
    hash_bytes(passphrase.as_bytes())
}

/// Short hex prefix of a hash, for log lines.
pub fn short_hex(hash: &TxHash) -> String {
    hex::encode(&hash[..4])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hasher_determinism() {
        let make_hash = || {
            let mut hasher = TxHasher::for_network(&[7; 32]);
            hasher.update_u32(ENVELOPE_TYPE_TX);
            hasher.update_bytes(b"payload");
            hasher.finalize()
        };

        assert_eq!(make_hash(), make_hash());
    }

    #[test]
    fn test_network_separation() {
        let hash = |network: &TxHash| {
            let mut h = TxHasher::for_network(network);
            h.update_bytes(b"same body");
            h.finalize()
        };

        assert_ne!(hash(&network_id("net A")), hash(&network_id("net B")));
    }

    #[test]
    fn test_u32_is_big_endian() {
        let mut a = TxHasher::for_network(&[0; 32]);
        a.update_u32(1);
        let mut b = TxHasher::for_network(&[0; 32]);
        b.update_bytes(&[0, 0, 0, 1]);
        assert_eq!(a.finalize(), b.finalize());
    }

    #[test]
    fn test_short_hex() {
        let hash = [0xab; 32];
        assert_eq!(short_hex(&hash), "abababab");
    }
}
