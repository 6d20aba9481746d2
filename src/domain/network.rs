//! Solana cluster configuration.
//!
//! Each cluster knows its default JSON-RPC endpoint and how the public
//! explorer addresses transactions on it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Cluster
// ============================================================================

/// Solana cluster variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cluster {
    /// The production cluster (`mainnet-beta`).
    Mainnet,
    /// The public development cluster with faucet funds.
    #[default]
    Devnet,
    /// The public test cluster.
    Testnet,
    /// A `solana-test-validator` on this machine.
    Localnet,
}

impl Cluster {
    /// All clusters in display order.
    pub const ALL: [Self; 4] = [Self::Mainnet, Self::Devnet, Self::Testnet, Self::Localnet];

    /// Returns the human-readable name of the cluster.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "Mainnet",
            Self::Devnet => "Devnet",
            Self::Testnet => "Testnet",
            Self::Localnet => "Localnet",
        }
    }

    /// Returns the default JSON-RPC endpoint for this cluster.
    #[must_use]
    pub const fn rpc_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://api.mainnet-beta.solana.com",
            Self::Devnet => "https://api.devnet.solana.com",
            Self::Testnet => "https://api.testnet.solana.com",
            Self::Localnet => "http://127.0.0.1:8899",
        }
    }

    /// Query suffix the explorer uses to select this cluster.
    ///
    /// Mainnet is the explorer's default and needs no suffix.
    #[must_use]
    pub const fn explorer_query(&self) -> &'static str {
        match self {
            Self::Mainnet => "",
            Self::Devnet => "?cluster=devnet",
            Self::Testnet => "?cluster=testnet",
            Self::Localnet => "?cluster=custom&customUrl=http%3A%2F%2F127.0.0.1%3A8899",
        }
    }

    /// Explorer link for a transaction signature on this cluster.
    #[must_use]
    pub fn explorer_tx_url(&self, signature: &str) -> String {
        format!(
            "https://explorer.solana.com/tx/{signature}{}",
            self.explorer_query()
        )
    }
}

impl std::fmt::Display for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Cluster {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "mainnet-beta" | "m" => Ok(Self::Mainnet),
            "devnet" | "d" => Ok(Self::Devnet),
            "testnet" | "t" => Ok(Self::Testnet),
            "localnet" | "localhost" | "l" => Ok(Self::Localnet),
            other => Err(format!(
                "unknown cluster '{other}' (expected mainnet, devnet, testnet or localnet)"
            )),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
