//! Known networks and the parameters used to register a chain with a wallet.

use crate::config::NetworkConfig;

/// Static chain id → label table.
const NETWORKS: &[(u64, &str)] = &[
    (0x1, "Mainnet"),
    (0x3, "Ropsten"),
    (0x4, "Rinkeby"),
    (0x5, "Goerli"),
    (0x2a, "Kovan"),
    (0xaa36a7, "Sepolia"),
    (0x89, "Polygon Mainnet"),
    (0x13881, "Polygon Mumbai Testnet"),
    (0x13882, "Polygon Amoy Testnet"),
];

/// Label used for chain ids missing from the table.
pub const UNKNOWN_NETWORK: &str = "Unknown network";

/// Map a chain id to its display label.
pub fn network_label(chain_id: u64) -> &'static str {
    NETWORKS
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map(|(_, label)| *label)
        .unwrap_or(UNKNOWN_NETWORK)
}

/// Network family, used to pick the logo shown next to the network label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkFamily {
    Ethereum,
    Polygon,
    Other,
}

impl NetworkFamily {
    pub fn of(chain_id: u64) -> Self {
        match chain_id {
            0x89 | 0x13881 | 0x13882 => NetworkFamily::Polygon,
            0x1 | 0x3 | 0x4 | 0x5 | 0x2a | 0xaa36a7 => NetworkFamily::Ethereum,
            _ => NetworkFamily::Other,
        }
    }

    /// Short logo tag rendered by the terminal front end.
    pub fn logo(self) -> &'static str {
        match self {
            NetworkFamily::Ethereum => "[eth]",
            NetworkFamily::Polygon => "[polygon]",
            NetworkFamily::Other => "[?]",
        }
    }
}

/// Native currency of a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Everything a wallet needs to add a chain (EIP-3085 `AddEthereumChainParameter`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainParams {
    pub chain_id: u64,
    pub chain_name: String,
    pub rpc_urls: Vec<String>,
    pub native_currency: NativeCurrency,
    pub block_explorer_urls: Vec<String>,
}

impl ChainParams {
    /// Explorer link for a transaction, if the chain has an explorer.
    pub fn explorer_tx_url(&self, tx_hash: &str) -> Option<String> {
        self.block_explorer_urls
            .first()
            .map(|base| format!("{}/tx/{}", base.trim_end_matches('/'), tx_hash))
    }
}

impl From<&NetworkConfig> for ChainParams {
    fn from(config: &NetworkConfig) -> Self {
        Self {
            chain_id: config.chain_id,
            chain_name: config.chain_name.clone(),
            rpc_urls: config.rpc_urls.clone(),
            native_currency: NativeCurrency {
                name: config.native_currency.name.clone(),
                symbol: config.native_currency.symbol.clone(),
                decimals: config.native_currency.decimals,
            },
            block_explorer_urls: config.block_explorer_urls.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(network_label(0x13881), "Polygon Mumbai Testnet");
        assert_eq!(network_label(1), "Mainnet");
        assert_eq!(network_label(424242), UNKNOWN_NETWORK);
    }

    #[test]
    fn test_families() {
        assert_eq!(NetworkFamily::of(137), NetworkFamily::Polygon);
        assert_eq!(NetworkFamily::of(5), NetworkFamily::Ethereum);
        assert_eq!(NetworkFamily::of(31337), NetworkFamily::Other);
        assert_eq!(NetworkFamily::of(80001).logo(), "[polygon]");
    }

    #[test]
    fn test_explorer_link() {
        let params = ChainParams::from(&NetworkConfig::default());
        assert_eq!(
            params.explorer_tx_url("0xabc").as_deref(),
            Some("https://mumbai.polygonscan.com/tx/0xabc")
        );

        let bare = ChainParams {
            block_explorer_urls: Vec::new(),
            ..params
        };
        assert!(bare.explorer_tx_url("0xabc").is_none());
    }
}
