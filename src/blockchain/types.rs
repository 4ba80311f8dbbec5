//! Chain-specific types and error definitions.

use alloy::primitives::{Address, TxHash, U256};
use serde::Serialize;
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:#x})", self.0, self.0)
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// No receipt arrived within the confirmation window.
    #[error("Transaction {tx_hash} not confirmed after {secs} seconds")]
    ConfirmationTimeout { tx_hash: TxHash, secs: u64 },

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(TxHash),

    /// A deployment receipt carried no contract address.
    #[error("Deployment {0} produced no contract address")]
    MissingContractAddress(TxHash),

    /// Invalid private key format or signing failure.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Contract bytecode could not be loaded or decoded.
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Outcome of a confirmed contract deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployReceipt {
    pub address: Address,
    pub tx_hash: TxHash,
}

/// Signer address, network identity and balance, queried together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSnapshot {
    pub address: Address,
    pub chain_id: ChainId,
    /// Balance in wei.
    pub balance: U256,
}

impl AccountSnapshot {
    /// Balance formatted in ether units.
    pub fn balance_ether(&self) -> String {
        alloy::primitives::utils::format_ether(self.balance)
    }
}
