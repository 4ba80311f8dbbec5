//! Greeter dapp library: wallet login, contract deployment and greeter I/O.

pub mod auth;
pub mod blockchain;
pub mod config;
pub mod console;
pub mod observability;
pub mod session;

pub use config::AppConfig;
pub use session::{Dapp, SessionError, StageKind};
