//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs and value ranges (chain id, timeouts)
//! - Check the login identity is complete
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid URL '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{field}: must be greater than zero")]
    Zero { field: &'static str },

    #[error("{field}: must not be empty")]
    Empty { field: &'static str },

    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(&mut errors, "network.rpc_url", &config.network.rpc_url);
    check_url(
        &mut errors,
        "network.block_explorer_url",
        &config.network.block_explorer_url,
    );
    if config.network.chain_id == 0 {
        errors.push(ValidationError::Zero { field: "network.chain_id" });
    }

    check_non_empty(&mut errors, "login.client_id", &config.login.client_id);
    check_non_empty(&mut errors, "login.verifier", &config.login.verifier);
    check_non_empty(&mut errors, "login.private_key_env", &config.login.private_key_env);

    check_non_empty(&mut errors, "contract.bytecode_path", &config.contract.bytecode_path);

    if config.rpc.rpc_timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "rpc.rpc_timeout_secs" });
    }
    if config.rpc.confirmation_timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "rpc.confirmation_timeout_secs" });
    }
    if config.rpc.confirmation_blocks == 0 {
        errors.push(ValidationError::Zero { field: "rpc.confirmation_blocks" });
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<url::Url>().is_err() {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
}

fn check_non_empty(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Empty { field });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.network.rpc_url = "not a url".to_string();
        config.network.chain_id = 0;
        config.login.verifier = "  ".to_string();
        config.rpc.rpc_timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::Zero { field: "network.chain_id" }));
        assert!(errors.contains(&ValidationError::Empty { field: "login.verifier" }));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = AppConfig::default();
        config.observability.metrics_address = "nowhere".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("nowhere"));
    }
}
