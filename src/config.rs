//! Network and environment configuration for the SwapDesk terminal

use crate::error::{eyre, Result};

/// The two networks the engine executes trades on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chain {
    Ethereum,
    BnbChain,
}

impl Chain {
    /// Chain ID (1 for Ethereum, 56 for BNB Smart Chain)
    pub fn chain_id(self) -> u64 {
        match self {
            Chain::Ethereum => 1,
            Chain::BnbChain => 56,
        }
    }

    /// Human-readable network name
    pub fn display_name(self) -> &'static str {
        match self {
            Chain::Ethereum => "Ethereum",
            Chain::BnbChain => "BNB Smart Chain",
        }
    }

    /// Native currency ticker
    pub fn native_symbol(self) -> &'static str {
        match self {
            Chain::Ethereum => "ETH",
            Chain::BnbChain => "BNB",
        }
    }

    /// Environment variable holding the network's RPC endpoint
    pub fn rpc_env_var(self) -> &'static str {
        match self {
            Chain::Ethereum => "ETH_RPC_URL",
            Chain::BnbChain => "BSC_RPC_URL",
        }
    }
}

/// Per-network configuration, selected once per trade and passed by value
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Chain ID
    pub chain_id: u64,
    /// Human-readable network name
    pub name: &'static str,
    /// RPC endpoint URL
    pub rpc_url: String,
    /// Native currency ticker (ETH, BNB)
    pub native_symbol: &'static str,
}

impl NetworkConfig {
    /// Create Ethereum mainnet configuration
    pub fn ethereum(rpc_url: impl Into<String>) -> Self {
        Self {
            chain_id: Chain::Ethereum.chain_id(),
            name: Chain::Ethereum.display_name(),
            rpc_url: rpc_url.into(),
            native_symbol: Chain::Ethereum.native_symbol(),
        }
    }

    /// Create BNB Smart Chain configuration
    pub fn bnb_chain(rpc_url: impl Into<String>) -> Self {
        Self {
            chain_id: Chain::BnbChain.chain_id(),
            name: Chain::BnbChain.display_name(),
            rpc_url: rpc_url.into(),
            native_symbol: Chain::BnbChain.native_symbol(),
        }
    }
}

/// Environment-supplied credentials and endpoints
///
/// The private key, engine API key and engine base URL are required up
/// front; missing one prevents any trade from executing. RPC URLs are
/// optional per network - an unconfigured network is refused when selected.
#[derive(Clone)]
pub struct AppConfig {
    /// Wallet private key (hex, 0x prefix optional)
    pub private_key: String,
    /// Bearer token for the engine API
    pub api_key: String,
    /// Engine API base URL
    pub api_url: String,
    /// Ethereum RPC endpoint
    pub eth_rpc_url: Option<String>,
    /// BNB Smart Chain RPC endpoint
    pub bsc_rpc_url: Option<String>,
}

impl AppConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            private_key: require_env("PRIVATE_KEY")?,
            api_key: require_env("SWAPDESK_API_KEY")?,
            api_url: require_env("SWAPDESK_API_URL")?,
            eth_rpc_url: std::env::var("ETH_RPC_URL").ok(),
            bsc_rpc_url: std::env::var("BSC_RPC_URL").ok(),
        })
    }

    /// Build the configuration for a chosen network
    ///
    /// Fails when no RPC endpoint is configured for that network, so the
    /// caller can re-prompt for a different one.
    pub fn network(&self, chain: Chain) -> Result<NetworkConfig> {
        let rpc_url = match chain {
            Chain::Ethereum => self.eth_rpc_url.as_ref(),
            Chain::BnbChain => self.bsc_rpc_url.as_ref(),
        };
        let rpc_url = rpc_url.ok_or_else(|| {
            eyre!(
                "No RPC endpoint configured for {} (set {})",
                chain.display_name(),
                chain.rpc_env_var()
            )
        })?;

        Ok(match chain {
            Chain::Ethereum => NetworkConfig::ethereum(rpc_url),
            Chain::BnbChain => NetworkConfig::bnb_chain(rpc_url),
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| eyre!("{} environment variable must be set", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            private_key: "0x00".to_string(),
            api_key: "token".to_string(),
            api_url: "https://engine.example".to_string(),
            eth_rpc_url: Some("https://eth.example/rpc".to_string()),
            bsc_rpc_url: None,
        }
    }

    #[test]
    fn test_network_selection() {
        let config = test_config();

        let eth = config.network(Chain::Ethereum).unwrap();
        assert_eq!(eth.chain_id, 1);
        assert_eq!(eth.native_symbol, "ETH");
        assert_eq!(eth.rpc_url, "https://eth.example/rpc");

        // BSC has no RPC configured - selecting it must fail, not panic
        let err = config.network(Chain::BnbChain).unwrap_err();
        assert!(err.to_string().contains("BSC_RPC_URL"));
    }

    #[test]
    fn test_chain_ids() {
        assert_eq!(Chain::Ethereum.chain_id(), 1);
        assert_eq!(Chain::BnbChain.chain_id(), 56);
    }
}
