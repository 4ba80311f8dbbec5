//! Greeter contract bindings and deployment artifact.
//!
//! The contract stores one string: `constructor(string)` seeds it,
//! `message()` reads it and `update(string)` replaces it. The creation code
//! is assembled from `contracts/Greeter.easm` into `contracts/Greeter.bin`,
//! which is loaded at startup and also compiled into the binary as a fallback.

use std::path::Path;

use alloy::primitives::{hex, Bytes};
use alloy::sol;
use alloy::sol_types::SolConstructor;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

const BUILTIN_BYTECODE: &str = include_str!("../../contracts/Greeter.bin");

sol! {
    #[sol(rpc)]
    contract Greeter {
        constructor(string memory initMessage);

        function message() external view returns (string memory);

        function update(string memory newMessage) external;
    }
}

/// Creation bytecode of the greeter contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreeterArtifact {
    bytecode: Bytes,
}

impl GreeterArtifact {
    /// Decode hex bytecode (optional 0x prefix, surrounding whitespace ignored).
    pub fn from_hex(text: &str) -> BlockchainResult<Self> {
        let text = text.trim();
        let text = text.strip_prefix("0x").unwrap_or(text);
        let bytecode = hex::decode(text)
            .map_err(|e| BlockchainError::Artifact(format!("Invalid bytecode hex: {}", e)))?;
        if bytecode.is_empty() {
            return Err(BlockchainError::Artifact("Bytecode is empty".to_string()));
        }
        Ok(Self {
            bytecode: Bytes::from(bytecode),
        })
    }

    /// Load the artifact from a hex file on disk.
    pub fn load(path: &Path) -> BlockchainResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            BlockchainError::Artifact(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let artifact = Self::from_hex(&text)?;
        tracing::info!(
            path = %path.display(),
            size = artifact.bytecode.len(),
            "Greeter bytecode loaded"
        );
        Ok(artifact)
    }

    /// The creation code shipped with the binary.
    pub fn builtin() -> BlockchainResult<Self> {
        Self::from_hex(BUILTIN_BYTECODE)
    }

    pub fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }

    /// Creation code followed by the ABI-encoded constructor argument.
    pub fn deploy_code(&self, initial_message: &str) -> Bytes {
        let args = Greeter::constructorCall {
            initMessage: initial_message.to_string(),
        }
        .abi_encode();

        let mut code = Vec::with_capacity(self.bytecode.len() + args.len());
        code.extend_from_slice(&self.bytecode);
        code.extend_from_slice(&args);
        Bytes::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::SolCall;

    #[test]
    fn test_from_hex_accepts_prefix_and_newline() {
        let artifact = GreeterArtifact::from_hex("0x6080604052\n").unwrap();
        assert_eq!(artifact.bytecode().as_ref(), &[0x60, 0x80, 0x60, 0x40, 0x52]);
    }

    #[test]
    fn test_from_hex_rejects_garbage_and_empty() {
        assert!(GreeterArtifact::from_hex("0xzz").is_err());
        let err = GreeterArtifact::from_hex("0x").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_deploy_code_appends_constructor_args() {
        let artifact = GreeterArtifact::from_hex("6080604052").unwrap();
        let code = artifact.deploy_code("Hello World!");

        // offset word + length word + one padded data word
        assert_eq!(code.len(), 5 + 96);
        assert_eq!(&code[..5], artifact.bytecode().as_ref());
        assert_eq!(code[5 + 31], 0x20);
        assert_eq!(code[5 + 63], 12);
        assert_eq!(&code[5 + 64..5 + 76], b"Hello World!");
    }

    #[test]
    fn test_default_bytecode_path_loads() {
        let path = crate::AppConfig::default().contract.bytecode_path;
        let artifact = GreeterArtifact::load(Path::new(&path)).unwrap();
        assert_eq!(artifact, GreeterArtifact::builtin().unwrap());
    }

    #[test]
    fn test_builtin_bytecode_dispatches_greeter_selectors() {
        let artifact = GreeterArtifact::builtin().unwrap();
        let code = artifact.bytecode().as_ref();
        let contains = |needle: &[u8]| code.windows(needle.len()).any(|w| w == needle);

        assert!(contains(&Greeter::messageCall::SELECTOR));
        assert!(contains(&Greeter::updateCall::SELECTOR));
        // constructor copies its arguments from the end of the creation code
        assert_eq!(&code[..4], &[0x61, 0x00, code.len() as u8, 0x38]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = GreeterArtifact::load(Path::new("contracts/missing.bin")).unwrap_err();
        assert!(matches!(err, BlockchainError::Artifact(_)));
    }
}
