//! Game configuration.

use std::path::Path;
use serde::{Serialize, Deserialize};

use crate::core::amount::Amount;
use crate::ledger::network::{Network, TESTNET_PASSPHRASE};

/// Ledger parameters every transaction of a game is built with.
///
/// Changing any field changes every hash in the tree, so both players must
/// agree on the config before setup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Network passphrase.
    pub network_passphrase: String,
    /// Fee per operation, in stroops.
    pub base_fee: u32,
    /// Balance the setup transaction gives the first escrow account
    /// (one reserve, 0.5 per pre-authorized signer, some spare).
    pub escrow_funding: Amount,
    /// Starting balance of each later escrow account.
    pub escrow_reserve: Amount,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            network_passphrase: TESTNET_PASSPHRASE.to_string(),
            base_fee: 1000,
            escrow_funding: Amount::from_units(6),
            escrow_reserve: Amount::from_units(1),
        }
    }
}

/// Errors loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid JSON for `GameConfig`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Environment variable holds an unusable value.
    #[error("invalid value for {name}: {value}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
    },
}

impl GameConfig {
    /// Defaults overridden by environment variables.
    ///
    /// Reads `TICTACTOE_NETWORK_PASSPHRASE`, `TICTACTOE_BASE_FEE`,
    /// `TICTACTOE_ESCROW_FUNDING` and `TICTACTOE_ESCROW_RESERVE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(passphrase) = std::env::var("TICTACTOE_NETWORK_PASSPHRASE") {
            config.network_passphrase = passphrase;
        }
        if let Some(fee) = env_parse("TICTACTOE_BASE_FEE")? {
            config.base_fee = fee;
        }
        if let Some(funding) = env_parse("TICTACTOE_ESCROW_FUNDING")? {
            config.escrow_funding = funding;
        }
        if let Some(reserve) = env_parse("TICTACTOE_ESCROW_RESERVE")? {
            config.escrow_reserve = reserve;
        }

        Ok(config)
    }

    /// Load from a JSON file; missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Network the game's transactions are bound to.
    pub fn network(&self) -> Network {
        Network::new(self.network_passphrase.as_str())
    }
}

fn env_parse<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { name, value }),
        Err(_) => Ok(None),
    }
}
