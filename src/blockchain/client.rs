//! Connected wallet provider: RPC access plus signing for one account.
//!
//! # Responsibilities
//! - Connect to JSON-RPC endpoint with a signing wallet attached
//! - Query chain state (chain id, balance)
//! - Deploy and call the greeter contract, waiting for receipts
//! - Handle timeouts and network errors gracefully

use std::future::IntoFuture;
use std::time::Duration;

use alloy::network::{ReceiptResponse as _, TransactionBuilder};
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::signers::Signature;
use async_trait::async_trait;
use tokio::time::{interval, timeout};

use crate::blockchain::contract::{Greeter, GreeterArtifact};
use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId, DeployReceipt};
use crate::blockchain::wallet::Wallet;
use crate::config::{NetworkConfig, RpcConfig};

/// Authenticated transport to the chain, as handed out by a login adapter.
///
/// Everything touching keys, RPC or ABI encoding happens behind this trait.
#[async_trait]
pub trait WalletProvider: Send + Sync + std::fmt::Debug {
    /// Address of the connected signer.
    fn address(&self) -> Address;

    /// Chain ID reported by the node.
    async fn chain_id(&self) -> BlockchainResult<ChainId>;

    /// Balance of the connected signer in wei.
    async fn balance(&self) -> BlockchainResult<U256>;

    /// Personal-sign (EIP-191) a message with the connected key.
    async fn sign_message(&self, message: &[u8]) -> BlockchainResult<Signature>;

    /// Deploy a greeter instance and wait for its receipt.
    async fn deploy_greeter(
        &self,
        artifact: &GreeterArtifact,
        initial_message: &str,
    ) -> BlockchainResult<DeployReceipt>;

    /// Call `message()` on a deployed greeter.
    async fn read_message(&self, contract: Address) -> BlockchainResult<String>;

    /// Send `update(message)` to a deployed greeter and wait for its receipt.
    async fn update_message(&self, contract: Address, message: &str) -> BlockchainResult<TxHash>;
}

/// [`WalletProvider`] backed by an alloy HTTP provider with a local signer.
#[derive(Clone)]
pub struct AlloyWalletProvider {
    provider: DynProvider,
    wallet: Wallet,
    rpc_url: String,
    /// Request timeout duration.
    timeout_duration: Duration,
    confirmation_timeout: Duration,
    confirmation_blocks: u64,
    poll_interval: Duration,
}

const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

impl AlloyWalletProvider {
    /// Build a provider for `network` that signs with `wallet`.
    ///
    /// No request is made here; use [`verify_chain_id`](Self::verify_chain_id)
    /// to check the endpoint.
    pub fn connect(network: &NetworkConfig, rpc: &RpcConfig, wallet: Wallet) -> BlockchainResult<Self> {
        let url: url::Url = network.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", network.rpc_url, e))
        })?;

        let provider = ProviderBuilder::new()
            .wallet(wallet.signer().clone())
            .connect_http(url)
            .erased();

        Ok(Self::from_provider(provider, wallet, rpc, &network.rpc_url))
    }

    fn from_provider(provider: DynProvider, wallet: Wallet, rpc: &RpcConfig, rpc_url: &str) -> Self {
        Self {
            provider,
            wallet,
            rpc_url: rpc_url.to_string(),
            timeout_duration: Duration::from_secs(rpc.rpc_timeout_secs),
            confirmation_timeout: Duration::from_secs(rpc.confirmation_timeout_secs),
            confirmation_blocks: rpc.confirmation_blocks,
            poll_interval: RECEIPT_POLL_INTERVAL,
        }
    }

    /// Verify the connected chain ID matches the expected one.
    pub async fn verify_chain_id(&self, expected: u64) -> BlockchainResult<()> {
        let chain_id = self.chain_id().await?;
        if chain_id.0 != expected {
            return Err(BlockchainError::ChainMismatch {
                expected,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Run one RPC request under the request timeout.
    async fn rpc<T, E, F>(&self, method: &'static str, request: F) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match timeout(self.timeout_duration, request).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                tracing::warn!(method, error = %e, "RPC error");
                Err(BlockchainError::Rpc(format!("{}: {}", method, e)))
            }
            Err(_) => {
                tracing::warn!(method, "RPC timeout");
                Err(BlockchainError::Timeout(self.timeout_duration.as_secs()))
            }
        }
    }

    /// Poll for the receipt of a submitted transaction until it has enough
    /// confirmations. The block that includes it counts as the first.
    async fn confirm(&self, tx_hash: TxHash) -> BlockchainResult<TransactionReceipt> {
        tracing::debug!(tx_hash = %tx_hash, "Waiting for receipt");

        let wait = async {
            let mut ticker = interval(self.poll_interval);

            loop {
                ticker.tick().await;

                let receipt = match self
                    .rpc(
                        "eth_getTransactionReceipt",
                        self.provider.get_transaction_receipt(tx_hash),
                    )
                    .await?
                {
                    Some(receipt) => receipt,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Err(BlockchainError::Reverted(tx_hash));
                }

                let current_block = self
                    .rpc("eth_blockNumber", self.provider.get_block_number())
                    .await?;
                let tx_block = receipt.block_number.unwrap_or(current_block);
                let confirmations = current_block.saturating_sub(tx_block) + 1;

                if confirmations >= self.confirmation_blocks {
                    return Ok(receipt);
                }

                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations = confirmations,
                    required = self.confirmation_blocks,
                    "Waiting for confirmations"
                );
            }
        };

        match timeout(self.confirmation_timeout, wait).await {
            Ok(result) => result,
            Err(_) => Err(BlockchainError::ConfirmationTimeout {
                tx_hash,
                secs: self.confirmation_timeout.as_secs(),
            }),
        }
    }
}

/// The created contract of a confirmed deployment.
fn deployed_contract(receipt: &TransactionReceipt) -> BlockchainResult<DeployReceipt> {
    let tx_hash = receipt.transaction_hash;
    let address = receipt
        .contract_address
        .ok_or(BlockchainError::MissingContractAddress(tx_hash))?;
    Ok(DeployReceipt { address, tx_hash })
}

#[async_trait]
impl WalletProvider for AlloyWalletProvider {
    fn address(&self) -> Address {
        self.wallet.address()
    }

    async fn chain_id(&self) -> BlockchainResult<ChainId> {
        self.rpc("eth_chainId", self.provider.get_chain_id())
            .await
            .map(ChainId)
    }

    async fn balance(&self) -> BlockchainResult<U256> {
        self.rpc("eth_getBalance", self.provider.get_balance(self.wallet.address()))
            .await
    }

    async fn sign_message(&self, message: &[u8]) -> BlockchainResult<Signature> {
        self.wallet.sign_message(message).await
    }

    async fn deploy_greeter(
        &self,
        artifact: &GreeterArtifact,
        initial_message: &str,
    ) -> BlockchainResult<DeployReceipt> {
        let tx = TransactionRequest::default()
            .with_from(self.wallet.address())
            .with_deploy_code(artifact.deploy_code(initial_message));

        let pending = self
            .rpc("eth_sendTransaction", self.provider.send_transaction(tx))
            .await?;
        let receipt = self.confirm(*pending.tx_hash()).await?;

        deployed_contract(&receipt)
    }

    async fn read_message(&self, contract: Address) -> BlockchainResult<String> {
        let greeter = Greeter::new(contract, self.provider.clone());
        let call = greeter.message();
        self.rpc("eth_call", call.call()).await
    }

    async fn update_message(&self, contract: Address, message: &str) -> BlockchainResult<TxHash> {
        let greeter = Greeter::new(contract, self.provider.clone());
        let call = greeter.update(message.to_string());
        let pending = self.rpc("eth_sendTransaction", call.send()).await?;
        let receipt = self.confirm(*pending.tx_hash()).await?;
        Ok(receipt.transaction_hash)
    }
}

impl std::fmt::Debug for AlloyWalletProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlloyWalletProvider")
            .field("rpc_url", &self.rpc_url)
            .field("address", &self.wallet.address())
            .field("chain_id", &self.wallet.chain_id())
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
