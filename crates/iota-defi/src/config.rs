//! Network configuration
//!
//! Node and explorer endpoints are carried as context for the agent host.
//! No query reads them.

use serde::{Deserialize, Serialize};

pub const DEFAULT_NODE_URL: &str = "https://api.testnet.iota.cafe";
pub const DEFAULT_EXPLORER_URL: &str = "https://explorer.rebased.iota.org/?network=testnet";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefiConfig {
    /// IOTA node API endpoint
    pub node_url: String,

    /// Block explorer base URL
    pub explorer_url: String,
}

impl Default for DefiConfig {
    fn default() -> Self {
        Self {
            node_url: DEFAULT_NODE_URL.into(),
            explorer_url: DEFAULT_EXPLORER_URL.into(),
        }
    }
}

impl DefiConfig {
    /// Read `IOTA_NODE_URL` and `IOTA_EXPLORER_URL`, falling back to testnet
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            node_url: non_empty("IOTA_NODE_URL").unwrap_or_else(|| DEFAULT_NODE_URL.into()),
            explorer_url: non_empty("IOTA_EXPLORER_URL")
                .unwrap_or_else(|| DEFAULT_EXPLORER_URL.into()),
        }
    }
}
