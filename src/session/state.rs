//! Session stages and the handles each stage owns.
//!
//! ```text
//! Uninitialized ──initialize──▶ SessionReady ──login──▶ Connected ──deploy──▶ Deployed
//!                                    ▲                      │                    │
//!                                    └──────── logout ──────┴────────────────────┘
//! ```
//!
//! Each variant carries exactly the handles that exist at that stage, so a
//! provider without a session or a contract without a provider cannot be
//! represented.

use std::sync::Arc;

use alloy::primitives::{Address, TxHash};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::LoginAdapter;
use crate::blockchain::{DeployReceipt, WalletProvider};
use crate::config::NetworkConfig;
use crate::session::error::{SessionError, SessionResult};

/// Initialized auth client with its one registered login adapter.
#[derive(Clone)]
pub struct Session {
    id: Uuid,
    adapter: Arc<dyn LoginAdapter>,
    network: NetworkConfig,
}

impl Session {
    pub fn new(adapter: Arc<dyn LoginAdapter>, network: NetworkConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            adapter,
            network,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn adapter(&self) -> &dyn LoginAdapter {
        self.adapter.as_ref()
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("adapter", &self.adapter.name())
            .field("chain_id", &self.network.chain_id)
            .finish()
    }
}

/// Authenticated chain transport produced by login.
#[derive(Debug, Clone)]
pub struct ConnectedProvider {
    inner: Arc<dyn WalletProvider>,
}

impl ConnectedProvider {
    pub fn new(inner: Arc<dyn WalletProvider>) -> Self {
        Self { inner }
    }

    pub fn address(&self) -> Address {
        self.inner.address()
    }

    pub fn wallet(&self) -> &dyn WalletProvider {
        self.inner.as_ref()
    }
}

/// Greeter instance at a specific on-chain address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployedContract {
    pub address: Address,
    pub tx_hash: TxHash,
    pub explorer_url: String,
}

impl DeployedContract {
    pub fn from_receipt(receipt: DeployReceipt, network: &NetworkConfig) -> Self {
        Self {
            address: receipt.address,
            tx_hash: receipt.tx_hash,
            explorer_url: network.address_url(receipt.address),
        }
    }
}

/// Discriminant of [`Stage`], for display and comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Uninitialized,
    SessionReady,
    Connected,
    Deployed,
}

impl StageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Uninitialized => "uninitialized",
            StageKind::SessionReady => "session ready",
            StageKind::Connected => "connected",
            StageKind::Deployed => "deployed",
        }
    }

    /// Numeric value for the stage gauge.
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current position in the login → deploy → read/write chain.
#[derive(Debug, Clone, Default)]
pub enum Stage {
    #[default]
    Uninitialized,
    SessionReady {
        session: Session,
    },
    Connected {
        session: Session,
        provider: ConnectedProvider,
    },
    Deployed {
        session: Session,
        provider: ConnectedProvider,
        contract: DeployedContract,
    },
}

impl Stage {
    pub fn kind(&self) -> StageKind {
        match self {
            Stage::Uninitialized => StageKind::Uninitialized,
            Stage::SessionReady { .. } => StageKind::SessionReady,
            Stage::Connected { .. } => StageKind::Connected,
            Stage::Deployed { .. } => StageKind::Deployed,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Stage::Uninitialized => None,
            Stage::SessionReady { session }
            | Stage::Connected { session, .. }
            | Stage::Deployed { session, .. } => Some(session),
        }
    }

    pub fn provider(&self) -> Option<&ConnectedProvider> {
        match self {
            Stage::Connected { provider, .. } | Stage::Deployed { provider, .. } => Some(provider),
            _ => None,
        }
    }

    pub fn contract(&self) -> Option<&DeployedContract> {
        match self {
            Stage::Deployed { contract, .. } => Some(contract),
            _ => None,
        }
    }

    /// Fail with the error naming the first missing handle below `needed`.
    pub fn require(&self, needed: StageKind) -> SessionResult<()> {
        let current = self.kind();
        if current >= needed {
            return Ok(());
        }
        Err(match current {
            StageKind::Uninitialized => SessionError::NotInitialized,
            StageKind::SessionReady => SessionError::NotConnected,
            StageKind::Connected | StageKind::Deployed => SessionError::NoContract,
        })
    }

    /// Session plus provider, for operations that need a live login.
    pub fn connected(&self) -> SessionResult<(Session, ConnectedProvider)> {
        self.require(StageKind::Connected)?;
        match (self.session(), self.provider()) {
            (Some(session), Some(provider)) => Ok((session.clone(), provider.clone())),
            _ => Err(SessionError::NotConnected),
        }
    }

    /// Provider plus contract, for contract I/O.
    pub fn deployed(&self) -> SessionResult<(ConnectedProvider, DeployedContract)> {
        self.require(StageKind::Deployed)?;
        match (self.provider(), self.contract()) {
            (Some(provider), Some(contract)) => Ok((provider.clone(), contract.clone())),
            _ => Err(SessionError::NoContract),
        }
    }
}
