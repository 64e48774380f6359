//! Error types for envelope decryption.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur while importing keys or opening envelopes.
///
/// The variants fall in two families that callers report differently:
/// structural problems with the inputs ([`CryptoError::is_structural`]) and
/// cryptographic rejections that mean the key is wrong or the data was
/// corrupted ([`CryptoError::is_key_problem`]).
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid PEM: {0}")]
    Pem(String),

    #[error("private key must be in PKCS8 format: {0}")]
    NotPkcs8(String),

    #[error("invalid wrapped key format: {0}")]
    Format(String),

    #[error("failed to unwrap key (wrong private key or corrupted data): {0}")]
    Unwrap(String),

    #[error("decryption failed (wrong key or corrupted data): {0}")]
    Decryption(String),

    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("decryption failed (payload truncated): need at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("decrypted content is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("encryption failed: {0}")]
    Encryption(String),
}

impl CryptoError {
    /// True when the failure points at the key material or at corrupted
    /// ciphertext rather than at malformed input.
    pub fn is_key_problem(&self) -> bool {
        matches!(
            self,
            CryptoError::Unwrap(_)
                | CryptoError::Decryption(_)
                | CryptoError::InvalidKeyLength { .. }
                | CryptoError::Truncated { .. }
                | CryptoError::Utf8(_)
        )
    }

    /// True for PEM, PKCS8 and wrapped-key shape errors.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            CryptoError::Pem(_) | CryptoError::NotPkcs8(_) | CryptoError::Format(_)
        )
    }
}
