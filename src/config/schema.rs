//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the dapp.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the greeter dapp.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Target chain (id, RPC endpoint, explorer).
    pub network: NetworkConfig,

    /// Login adapter identity.
    pub login: LoginConfig,

    /// Greeter contract deployment settings.
    pub contract: ContractConfig,

    /// RPC timeouts and confirmation depth.
    pub rpc: RpcConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Chain the session is bound to.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct NetworkConfig {
    /// Chain ID (11155111 for Sepolia).
    pub chain_id: u64,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Block explorer base URL, without trailing slash.
    pub block_explorer_url: String,

    /// Human-readable network name.
    pub display_name: String,

    /// Native currency ticker.
    pub ticker: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            chain_id: 0xaa36a7,
            rpc_url: "https://rpc.ankr.com/eth_sepolia".to_string(),
            block_explorer_url: "https://sepolia.etherscan.io".to_string(),
            display_name: "Ethereum Sepolia".to_string(),
            ticker: "ETH".to_string(),
        }
    }
}

impl NetworkConfig {
    /// Explorer link for a contract or account address.
    pub fn address_url(&self, address: impl std::fmt::Display) -> String {
        format!("{}/address/{}", self.block_explorer_url.trim_end_matches('/'), address)
    }

    /// Explorer link for a transaction.
    pub fn tx_url(&self, tx_hash: impl std::fmt::Display) -> String {
        format!("{}/tx/{}", self.block_explorer_url.trim_end_matches('/'), tx_hash)
    }
}

/// Identity of the single login adapter registered at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginConfig {
    /// Client identifier presented to the login provider.
    pub client_id: String,

    /// Verifier name (e.g., "google-verifier").
    pub verifier: String,

    /// Domain the verifier is registered for.
    pub verifier_domain: String,

    /// Environment variable holding the wallet key for the local adapter.
    pub private_key_env: String,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            client_id: "greeter-dapp".to_string(),
            verifier: "local-key-verifier".to_string(),
            verifier_domain: "localhost".to_string(),
            private_key_env: "GREETER_WALLET_PRIVATE_KEY".to_string(),
        }
    }
}

/// Greeter contract settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Path to the hex-encoded creation bytecode.
    pub bytecode_path: String,

    /// Constructor argument used on every deployment.
    pub initial_message: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            bytecode_path: "contracts/Greeter.bin".to_string(),
            initial_message: "Hello World!".to_string(),
        }
    }
}

/// RPC timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// Per-request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Maximum time to wait for a transaction receipt, in seconds.
    pub confirmation_timeout_secs: u64,

    /// Number of block confirmations required before a tx counts as final.
    pub confirmation_blocks: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            rpc_timeout_secs: 10,
            confirmation_timeout_secs: 120,
            confirmation_blocks: 1,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
