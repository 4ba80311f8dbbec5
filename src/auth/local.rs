//! Login adapter backed by a private key from the environment.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::auth::adapter::{AuthError, AuthResult, LoginAdapter, UserInfo};
use crate::blockchain::{AlloyWalletProvider, BlockchainError, Wallet, WalletProvider};
use crate::config::{LoginConfig, NetworkConfig, RpcConfig};

/// Logs in by loading the wallet key named in [`LoginConfig::private_key_env`].
///
/// The verifier identity from the config is reported in [`UserInfo`] so the
/// rest of the app sees the same profile shape a social login would produce.
pub struct LocalKeyAdapter {
    login: LoginConfig,
    rpc: RpcConfig,
    network: RwLock<Option<NetworkConfig>>,
    user: RwLock<Option<UserInfo>>,
}

impl LocalKeyAdapter {
    pub fn new(login: LoginConfig, rpc: RpcConfig) -> Self {
        Self {
            login,
            rpc,
            network: RwLock::new(None),
            user: RwLock::new(None),
        }
    }
}

#[async_trait]
impl LoginAdapter for LocalKeyAdapter {
    fn name(&self) -> &str {
        "local-key"
    }

    async fn init(&self, network: &NetworkConfig) -> AuthResult<()> {
        network.rpc_url.parse::<url::Url>().map_err(|e| {
            AuthError::InvalidConfig(format!("rpc_url '{}': {}", network.rpc_url, e))
        })?;

        *self.network.write().await = Some(network.clone());
        tracing::debug!(
            verifier = %self.login.verifier,
            domain = %self.login.verifier_domain,
            chain_id = network.chain_id,
            "Local key adapter initialized"
        );
        Ok(())
    }

    async fn connect(&self) -> AuthResult<Arc<dyn WalletProvider>> {
        let network = self
            .network
            .read()
            .await
            .clone()
            .ok_or_else(|| AuthError::NotInitialized(self.name().to_string()))?;

        let wallet = Wallet::from_env(&self.login.private_key_env, network.chain_id)?;
        let address = wallet.address();
        let provider = AlloyWalletProvider::connect(&network, &self.rpc, wallet)?;

        match provider.verify_chain_id(network.chain_id).await {
            Ok(()) => {}
            Err(e @ BlockchainError::ChainMismatch { .. }) => return Err(e.into()),
            Err(e) => {
                // Don't fail login - balance/deploy will surface the RPC problem
                tracing::warn!(error = %e, "Connected but chain verification failed");
            }
        }

        *self.user.write().await = Some(UserInfo {
            verifier: self.login.verifier.clone(),
            verifier_id: address.to_string(),
            type_of_login: "private_key".to_string(),
            name: None,
            email: None,
            wallet_address: address,
        });

        Ok(Arc::new(provider))
    }

    async fn user_info(&self) -> AuthResult<UserInfo> {
        if self.network.read().await.is_none() {
            return Err(AuthError::NotInitialized(self.name().to_string()));
        }
        self.user.read().await.clone().ok_or(AuthError::NotLoggedIn)
    }

    async fn disconnect(&self) -> AuthResult<()> {
        self.user.write().await.take();
        Ok(())
    }
}
