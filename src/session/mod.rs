//! Wallet session and greeter contract state machine.
//!
//! # Data Flow
//! ```text
//! initialize(adapter)  → Session            (Session Initializer)
//! login / logout       → ConnectedProvider  (Session Controller)
//! deploy_contract      → DeployedContract   (Contract Manager)
//! read / write / balance                    (Contract I/O)
//! ```
//!
//! # Design Decisions
//! - Stages advance only on user action, never automatically
//! - Each stage carries the handles it owns (see state.rs)
//! - Overlapping state-changing operations are rejected, not queued
//! - Every failure is logged and returned; nothing is retried or rolled back

pub mod controller;
pub mod error;
pub mod guard;
pub mod state;

pub use controller::Dapp;
pub use error::{Operation, SessionError, SessionResult};
pub use state::{ConnectedProvider, DeployedContract, Session, Stage, StageKind};
