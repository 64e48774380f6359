//! Orchestrator error types.

use crate::host::HostElement;
use shebang_crypto::CryptoError;
use shebang_vault::VaultError;
use std::time::Duration;
use thiserror::Error;

/// Result type for orchestrator operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// Errors that end a decryption attempt.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{role} did not appear within {waited:?}")]
    ElementTimeout { role: HostElement, waited: Duration },

    #[error("{0} not found on page")]
    ElementMissing(HostElement),

    #[error("key selection {index} is out of range ({len} keys offered)")]
    InvalidSelection { index: usize, len: usize },

    #[error("host error: {0}")]
    Host(String),

    #[error("vault error: {0}")]
    Vault(#[from] VaultError),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AgentError {
    /// Message shown to the user when an attempt ends in this error.
    ///
    /// Crypto failures are split so the user can tell a wrong key or damaged
    /// script apart from a stored key that is not usable at all.
    pub fn user_message(&self) -> String {
        match self {
            AgentError::ElementTimeout { role, .. } => {
                format!("Page did not finish loading ({role} not found)")
            }
            AgentError::ElementMissing(role) => {
                format!("Decryption failed: {role} not found on page")
            }
            AgentError::Crypto(e) if e.is_structural() => {
                format!("Decryption failed: key or script data is malformed ({e})")
            }
            AgentError::Crypto(e) if e.is_key_problem() => {
                "Decryption failed: wrong key or corrupted data".to_string()
            }
            other => format!("Decryption failed: {other}"),
        }
    }
}
