//! Network identity.

use crate::core::hash::{network_id, TxHash};

/// Public test network passphrase.
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Network a transaction is bound to. Its id is mixed into every hash,
/// so a transaction built for one network is invalid on another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Network {
    passphrase: String,
    id: TxHash,
}

impl Network {
    /// Network from a passphrase.
    pub fn new(passphrase: impl Into<String>) -> Self {
        let passphrase = passphrase.into();
        let id = network_id(&passphrase);
        Self { passphrase, id }
    }

    /// The public test network.
    pub fn testnet() -> Self {
        Self::new(TESTNET_PASSPHRASE)
    }

    /// Passphrase.
    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    /// SHA-256 of the passphrase.
    pub fn id(&self) -> TxHash {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_id_matches_passphrase_hash() {
        let net = Network::testnet();
        assert_eq!(net.passphrase(), TESTNET_PASSPHRASE);
        assert_eq!(net.id(), network_id(TESTNET_PASSPHRASE));
        assert_ne!(net.id(), Network::new("private").id());
    }
}
