//! Session errors and operation names.

use thiserror::Error;

use crate::auth::AuthError;
use crate::blockchain::BlockchainError;

/// User-triggered operations, used for logging, metrics and busy reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Initialize,
    Login,
    UserInfo,
    Logout,
    Deploy,
    Read,
    Write,
    Balance,
    Sign,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Initialize => "initialize",
            Operation::Login => "login",
            Operation::UserInfo => "user_info",
            Operation::Logout => "logout",
            Operation::Deploy => "deploy",
            Operation::Read => "read",
            Operation::Write => "write",
            Operation::Balance => "balance",
            Operation::Sign => "sign",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not initialized")]
    NotInitialized,

    #[error("Session already initialized")]
    AlreadyInitialized,

    #[error("Wallet not connected; log in first")]
    NotConnected,

    #[error("Wallet already connected")]
    AlreadyConnected,

    #[error("No contract deployed yet")]
    NoContract,

    /// Another state-changing operation has not finished.
    #[error("Cannot {requested} while {in_flight} is in progress")]
    Busy {
        requested: Operation,
        in_flight: Operation,
    },

    #[error("Login adapter error: {0}")]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),
}

impl SessionError {
    /// True when the operation was refused before doing any work.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, SessionError::Auth(_) | SessionError::Blockchain(_))
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
