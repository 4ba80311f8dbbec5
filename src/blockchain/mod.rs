//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Login adapter (private key from environment)
//!     → wallet.rs (key loading, message signing)
//!     → client.rs (WalletProvider: RPC connection with timeouts)
//!     → contract.rs (greeter bindings, deploy code)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod contract;
pub mod types;
pub mod wallet;

pub use client::{AlloyWalletProvider, WalletProvider};
pub use contract::{Greeter, GreeterArtifact};
pub use types::{AccountSnapshot, BlockchainError, BlockchainResult, ChainId, DeployReceipt};
pub use wallet::Wallet;
