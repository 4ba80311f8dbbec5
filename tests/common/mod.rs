//! Shared in-memory login adapter and chain for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{Address, TxHash, U256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::{Signature, Signer};
use async_trait::async_trait;

use greeter_dapp::auth::{AuthError, AuthResult, LoginAdapter, UserInfo};
use greeter_dapp::blockchain::{
    BlockchainError, BlockchainResult, ChainId, DeployReceipt, GreeterArtifact, WalletProvider,
};
use greeter_dapp::config::{AppConfig, NetworkConfig};
use greeter_dapp::Dapp;

// Anvil's first account
pub const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Chain that keeps greeter storage in a map.
#[derive(Debug)]
pub struct MockChain {
    signer: PrivateKeySigner,
    chain_id: u64,
    balance: U256,
    contracts: Mutex<HashMap<Address, String>>,
    next_id: AtomicU8,
    deploys: AtomicU32,
    fail_deploys: AtomicBool,
    latency: Duration,
    read_latency: Duration,
}

impl MockChain {
    pub fn new() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    /// Chain whose transactions take `latency` to confirm.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            signer: TEST_PRIVATE_KEY.parse().unwrap(),
            chain_id: NetworkConfig::default().chain_id,
            balance: U256::from(2_000_000_000_000_000_000u128),
            contracts: Mutex::new(HashMap::new()),
            next_id: AtomicU8::new(1),
            deploys: AtomicU32::new(0),
            fail_deploys: AtomicBool::new(false),
            latency,
            read_latency: Duration::ZERO,
        }
    }

    /// Make `message()` calls take `latency` to answer.
    pub fn with_read_latency(mut self, latency: Duration) -> Self {
        self.read_latency = latency;
        self
    }

    /// Make every deploy fail like an underfunded account would.
    pub fn fail_deploys(&self, fail: bool) {
        self.fail_deploys.store(fail, Ordering::SeqCst);
    }

    pub fn deploy_count(&self) -> u32 {
        self.deploys.load(Ordering::SeqCst)
    }

    pub fn stored_message(&self, contract: Address) -> Option<String> {
        self.contracts.lock().unwrap().get(&contract).cloned()
    }

    async fn confirm(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn next_hash(&self) -> (u8, TxHash) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        (id, TxHash::with_last_byte(id))
    }
}

#[async_trait]
impl WalletProvider for MockChain {
    fn address(&self) -> Address {
        self.signer.address()
    }

    async fn chain_id(&self) -> BlockchainResult<ChainId> {
        Ok(ChainId(self.chain_id))
    }

    async fn balance(&self) -> BlockchainResult<U256> {
        Ok(self.balance)
    }

    async fn sign_message(&self, message: &[u8]) -> BlockchainResult<Signature> {
        self.signer
            .sign_message(message)
            .await
            .map_err(|e| BlockchainError::Wallet(e.to_string()))
    }

    async fn deploy_greeter(
        &self,
        _artifact: &GreeterArtifact,
        initial_message: &str,
    ) -> BlockchainResult<DeployReceipt> {
        self.confirm().await;
        if self.fail_deploys.load(Ordering::SeqCst) {
            return Err(BlockchainError::Rpc(
                "insufficient funds for gas * price + value".to_string(),
            ));
        }
        let (id, tx_hash) = self.next_hash();
        let address = Address::with_last_byte(id);
        self.contracts
            .lock()
            .unwrap()
            .insert(address, initial_message.to_string());
        self.deploys.fetch_add(1, Ordering::SeqCst);
        Ok(DeployReceipt { address, tx_hash })
    }

    async fn read_message(&self, contract: Address) -> BlockchainResult<String> {
        if !self.read_latency.is_zero() {
            tokio::time::sleep(self.read_latency).await;
        }
        self.stored_message(contract)
            .ok_or_else(|| BlockchainError::Rpc("execution reverted".to_string()))
    }

    async fn update_message(&self, contract: Address, message: &str) -> BlockchainResult<TxHash> {
        self.confirm().await;
        let mut contracts = self.contracts.lock().unwrap();
        let stored = contracts
            .get_mut(&contract)
            .ok_or_else(|| BlockchainError::Rpc("execution reverted".to_string()))?;
        *stored = message.to_string();
        drop(contracts);
        Ok(self.next_hash().1)
    }
}

/// Adapter whose login always hands out the shared [`MockChain`].
pub struct MockAdapter {
    chain: Arc<MockChain>,
    fail_init: bool,
    logged_in: AtomicBool,
    pub inits: AtomicU32,
}

impl MockAdapter {
    pub fn new(chain: Arc<MockChain>) -> Self {
        Self {
            chain,
            fail_init: false,
            logged_in: AtomicBool::new(false),
            inits: AtomicU32::new(0),
        }
    }

    pub fn failing_init(chain: Arc<MockChain>) -> Self {
        Self {
            fail_init: true,
            ..Self::new(chain)
        }
    }
}

#[async_trait]
impl LoginAdapter for MockAdapter {
    fn name(&self) -> &str {
        "mock"
    }

    async fn init(&self, _network: &NetworkConfig) -> AuthResult<()> {
        self.inits.fetch_add(1, Ordering::SeqCst);
        if self.fail_init {
            return Err(AuthError::InvalidConfig("login provider unreachable".to_string()));
        }
        Ok(())
    }

    async fn connect(&self) -> AuthResult<Arc<dyn WalletProvider>> {
        self.logged_in.store(true, Ordering::SeqCst);
        Ok(self.chain.clone())
    }

    async fn user_info(&self) -> AuthResult<UserInfo> {
        if !self.logged_in.load(Ordering::SeqCst) {
            return Err(AuthError::NotLoggedIn);
        }
        Ok(UserInfo {
            verifier: "mock-verifier".to_string(),
            verifier_id: "tester@example.com".to_string(),
            type_of_login: "mock".to_string(),
            name: Some("Tester".to_string()),
            email: Some("tester@example.com".to_string()),
            wallet_address: self.chain.address(),
        })
    }

    async fn disconnect(&self) -> AuthResult<()> {
        self.logged_in.store(false, Ordering::SeqCst);
        Ok(())
    }
}

pub fn test_artifact() -> GreeterArtifact {
    GreeterArtifact::builtin().unwrap()
}

pub fn new_dapp() -> Dapp {
    Dapp::new(AppConfig::default(), test_artifact())
}

/// Dapp with an initialized session over `chain`.
pub async fn ready_dapp(chain: Arc<MockChain>) -> Dapp {
    let dapp = new_dapp();
    dapp.initialize(Arc::new(MockAdapter::new(chain))).await.unwrap();
    dapp
}

/// Dapp that is initialized and logged in over `chain`.
pub async fn connected_dapp(chain: Arc<MockChain>) -> Dapp {
    let dapp = ready_dapp(chain).await;
    dapp.login().await.unwrap();
    dapp
}
