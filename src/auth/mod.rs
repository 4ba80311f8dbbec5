//! Login subsystem.
//!
//! # Data Flow
//! ```text
//! LoginConfig (verifier identity)
//!     → adapter.rs (LoginAdapter: init → connect → user_info → disconnect)
//!     → local.rs (LocalKeyAdapter: key from environment, alloy transport)
//!     → Arc<dyn WalletProvider> handed to the session
//! ```
//!
//! # Design Decisions
//! - Exactly one adapter is registered per session
//! - The adapter owns its login state; the session only holds the provider

pub mod adapter;
pub mod local;

pub use adapter::{AuthError, AuthResult, LoginAdapter, UserInfo};
pub use local::LocalKeyAdapter;
