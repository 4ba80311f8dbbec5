//! Login adapter seam.

use std::sync::Arc;

use alloy::primitives::Address;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::blockchain::{BlockchainError, WalletProvider};
use crate::config::NetworkConfig;

/// Errors raised by a login adapter.
#[derive(Debug, Error)]
pub enum AuthError {
    /// `connect` or `user_info` called before `init` finished.
    #[error("Login adapter {0} is not initialized")]
    NotInitialized(String),

    /// `user_info` called without a live login.
    #[error("No user is logged in")]
    NotLoggedIn,

    /// The adapter rejected its configuration.
    #[error("Invalid login configuration: {0}")]
    InvalidConfig(String),

    /// Building or checking the wallet transport failed.
    #[error(transparent)]
    Provider(#[from] BlockchainError),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Profile data of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub verifier: String,
    pub verifier_id: String,
    pub type_of_login: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub wallet_address: Address,
}

/// One login method, e.g. a social login verifier or a local key.
///
/// Lifecycle: `init` once, then any number of `connect`/`disconnect` cycles.
#[async_trait]
pub trait LoginAdapter: Send + Sync {
    /// Adapter name for logs.
    fn name(&self) -> &str;

    /// Finish asynchronous setup against the target network.
    async fn init(&self, network: &NetworkConfig) -> AuthResult<()>;

    /// Run the login flow and return the authenticated transport.
    async fn connect(&self) -> AuthResult<Arc<dyn WalletProvider>>;

    /// Profile of the currently logged-in user.
    async fn user_info(&self) -> AuthResult<UserInfo>;

    /// Tear down the login.
    async fn disconnect(&self) -> AuthResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_info_serializes_camel_case() {
        let info = UserInfo {
            verifier: "google-verifier".to_string(),
            verifier_id: "alice@example.com".to_string(),
            type_of_login: "google".to_string(),
            name: Some("Alice".to_string()),
            email: None,
            wallet_address: Address::ZERO,
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["verifierId"], "alice@example.com");
        assert_eq!(json["typeOfLogin"], "google");
        assert!(json["email"].is_null());
    }
}
