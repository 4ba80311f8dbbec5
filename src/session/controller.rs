//! The dapp: session initializer, session controller, contract manager and
//! contract I/O over one guarded [`Stage`].

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use alloy::primitives::{Address, TxHash};
use alloy::signers::Signature;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::{LoginAdapter, UserInfo};
use crate::blockchain::{AccountSnapshot, GreeterArtifact};
use crate::config::AppConfig;
use crate::observability::metrics;
use crate::session::error::{Operation, SessionError, SessionResult};
use crate::session::guard::InFlight;
use crate::session::state::{ConnectedProvider, DeployedContract, Session, Stage, StageKind};

/// Strings mirrored to the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct View {
    /// Result of the last successful read.
    displayed_message: String,
    /// Text queued for the next write.
    pending_input: String,
}

/// Wallet session and greeter contract state for one user.
///
/// State-changing operations (`initialize`, `login`, `logout`,
/// `deploy_contract`, `write_contract`) are exclusive: while one runs, any
/// other fails with [`SessionError::Busy`]. Reads are never blocked.
pub struct Dapp {
    config: AppConfig,
    artifact: GreeterArtifact,
    stage: RwLock<Stage>,
    view: RwLock<View>,
    in_flight: InFlight,
}

impl Dapp {
    pub fn new(config: AppConfig, artifact: GreeterArtifact) -> Self {
        metrics::record_stage(StageKind::Uninitialized.ordinal());
        Self {
            config,
            artifact,
            stage: RwLock::new(Stage::Uninitialized),
            view: RwLock::new(View::default()),
            in_flight: InFlight::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub async fn stage(&self) -> StageKind {
        self.stage.read().await.kind()
    }

    pub async fn session_id(&self) -> Option<Uuid> {
        self.stage.read().await.session().map(Session::id)
    }

    pub async fn connected_address(&self) -> Option<Address> {
        self.stage.read().await.provider().map(ConnectedProvider::address)
    }

    pub async fn contract(&self) -> Option<DeployedContract> {
        self.stage.read().await.contract().cloned()
    }

    pub async fn displayed_message(&self) -> String {
        self.view.read().await.displayed_message.clone()
    }

    pub async fn pending_input(&self) -> String {
        self.view.read().await.pending_input.clone()
    }

    pub async fn set_pending_input(&self, text: impl Into<String>) {
        self.view.write().await.pending_input = text.into();
    }

    /// The operation currently holding the exclusive marker.
    pub fn in_flight(&self) -> Option<Operation> {
        self.in_flight.current()
    }

    /// Create the session and register `adapter` as its only login method.
    ///
    /// A failed adapter init is logged and leaves the dapp uninitialized.
    pub async fn initialize(&self, adapter: Arc<dyn LoginAdapter>) -> SessionResult<Uuid> {
        self.observed(Operation::Initialize, async {
            let _guard = self.in_flight.begin(Operation::Initialize)?;
            if self.stage.read().await.kind() != StageKind::Uninitialized {
                return Err(SessionError::AlreadyInitialized);
            }

            adapter.init(&self.config.network).await?;

            let session = Session::new(adapter, self.config.network.clone());
            let id = session.id();
            tracing::info!(
                session_id = %id,
                adapter = session.adapter().name(),
                verifier = %self.config.login.verifier,
                chain_id = self.config.network.chain_id,
                "Session initialized"
            );
            self.set_stage(Stage::SessionReady { session }).await;
            Ok(id)
        })
        .await
    }

    /// Run the adapter's login flow and keep the resulting provider.
    pub async fn login(&self) -> SessionResult<Address> {
        self.observed(Operation::Login, async {
            let _guard = self.in_flight.begin(Operation::Login)?;
            let session = {
                let stage = self.stage.read().await;
                stage.require(StageKind::SessionReady)?;
                if stage.provider().is_some() {
                    return Err(SessionError::AlreadyConnected);
                }
                stage.session().cloned().ok_or(SessionError::NotInitialized)?
            };

            let provider = ConnectedProvider::new(session.adapter().connect().await?);
            let address = provider.address();
            tracing::info!(address = %address, "Wallet connected");

            self.set_stage(Stage::Connected { session, provider }).await;
            Ok(address)
        })
        .await
    }

    /// Profile of the logged-in user, straight from the adapter.
    pub async fn get_user_info(&self) -> SessionResult<UserInfo> {
        self.observed(Operation::UserInfo, async {
            let session = {
                let stage = self.stage.read().await;
                stage.session().cloned().ok_or(SessionError::NotInitialized)?
            };
            Ok(session.adapter().user_info().await?)
        })
        .await
    }

    /// Disconnect the adapter and drop the provider and contract.
    ///
    /// The session survives, so `login` can be called again.
    pub async fn logout(&self) -> SessionResult<()> {
        self.observed(Operation::Logout, async {
            let _guard = self.in_flight.begin(Operation::Logout)?;
            let session = {
                let stage = self.stage.read().await;
                stage.session().cloned().ok_or(SessionError::NotInitialized)?
            };

            session.adapter().disconnect().await?;

            self.set_stage(Stage::SessionReady { session }).await;
            self.view.write().await.displayed_message.clear();
            tracing::info!("Logged out");
            Ok(())
        })
        .await
    }

    /// Deploy a new greeter seeded with the configured initial message.
    ///
    /// Every successful call creates a new instance and replaces the held one.
    /// On failure the previous stage is kept as is.
    pub async fn deploy_contract(&self) -> SessionResult<DeployedContract> {
        self.observed(Operation::Deploy, async {
            let _guard = self.in_flight.begin(Operation::Deploy)?;
            let (session, provider) = self.stage.read().await.connected()?;

            let initial_message = &self.config.contract.initial_message;
            tracing::info!(
                from = %provider.address(),
                initial_message = %initial_message,
                "Deploying greeter"
            );
            let receipt = provider
                .wallet()
                .deploy_greeter(&self.artifact, initial_message)
                .await?;

            let contract = DeployedContract::from_receipt(receipt, session.network());
            tracing::info!(
                address = %contract.address,
                tx_hash = %contract.tx_hash,
                explorer = %contract.explorer_url,
                "Greeter deployed"
            );

            self.set_stage(Stage::Deployed {
                session,
                provider,
                contract: contract.clone(),
            })
            .await;
            Ok(contract)
        })
        .await
    }

    /// Read the stored message and mirror it into the displayed message.
    pub async fn read_contract(&self) -> SessionResult<String> {
        self.observed(Operation::Read, async {
            let (provider, contract) = self.stage.read().await.deployed()?;

            let message = provider.wallet().read_message(contract.address).await?;
            tracing::debug!(contract = %contract.address, message = %message, "Greeter read");

            // Logout or a redeploy during the call leaves the view alone
            let stage = self.stage.read().await;
            if stage.contract().map(|c| c.address) == Some(contract.address) {
                self.view.write().await.displayed_message = message.clone();
            } else {
                tracing::debug!(contract = %contract.address, "Stale read not displayed");
            }
            Ok(message)
        })
        .await
    }

    /// Send the pending input to the contract, then clear it once confirmed
    /// unless it was edited in the meantime.
    pub async fn write_contract(&self) -> SessionResult<TxHash> {
        self.observed(Operation::Write, async {
            let _guard = self.in_flight.begin(Operation::Write)?;
            let (provider, contract) = self.stage.read().await.deployed()?;
            let message = self.view.read().await.pending_input.clone();

            let tx_hash = provider
                .wallet()
                .update_message(contract.address, &message)
                .await?;
            tracing::info!(
                contract = %contract.address,
                tx_hash = %tx_hash,
                explorer = %self.config.network.tx_url(tx_hash),
                "Greeter updated"
            );

            // Input typed while the transaction was pending is kept
            let mut view = self.view.write().await;
            if view.pending_input == message {
                view.pending_input.clear();
            }
            Ok(tx_hash)
        })
        .await
    }

    /// Set the pending input and write it.
    pub async fn write_message(&self, text: impl Into<String>) -> SessionResult<TxHash> {
        self.set_pending_input(text).await;
        self.write_contract().await
    }

    /// Signer address, chain identity and balance of the connected wallet.
    pub async fn check_balance(&self) -> SessionResult<AccountSnapshot> {
        self.observed(Operation::Balance, async {
            let (_, provider) = self.stage.read().await.connected()?;
            let wallet = provider.wallet();

            let (chain_id, balance) = tokio::try_join!(wallet.chain_id(), wallet.balance())?;
            Ok(AccountSnapshot {
                address: wallet.address(),
                chain_id,
                balance,
            })
        })
        .await
    }

    /// Personal-sign `message` with the connected wallet.
    pub async fn sign_message(&self, message: &str) -> SessionResult<Signature> {
        self.observed(Operation::Sign, async {
            let (_, provider) = self.stage.read().await.connected()?;
            Ok(provider.wallet().sign_message(message.as_bytes()).await?)
        })
        .await
    }

    async fn set_stage(&self, stage: Stage) {
        let kind = stage.kind();
        *self.stage.write().await = stage;
        metrics::record_stage(kind.ordinal());
    }

    /// Log and count the outcome of one operation.
    async fn observed<T, F>(&self, op: Operation, operation: F) -> SessionResult<T>
    where
        F: Future<Output = SessionResult<T>>,
    {
        let started = Instant::now();
        let result = operation.await;
        match &result {
            Ok(_) => tracing::debug!(operation = %op, "Operation completed"),
            Err(e) if e.is_precondition() => {
                tracing::warn!(operation = %op, error = %e, "Operation skipped")
            }
            Err(e) => tracing::error!(operation = %op, error = %e, "Operation failed"),
        }
        metrics::record_operation(op.as_str(), result.is_ok(), started);
        result
    }
}

impl std::fmt::Debug for Dapp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dapp")
            .field("chain_id", &self.config.network.chain_id)
            .field("in_flight", &self.in_flight.current())
            .finish()
    }
}
