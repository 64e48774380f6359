//! Hybrid envelope: RSA-OAEP/SHA-256 wrapped key + XChaCha20-Poly1305 payload.
//!
//! Opening an envelope is strictly two-step. The content key is unwrapped
//! with the recipient's private key first, and only then is the payload
//! authenticated and decrypted.

use crate::cipher::{decrypt_content, encrypt_content, SymmetricKey};
use crate::error::{CryptoError, CryptoResult};
use crate::key::ImportedPrivateKey;
use crate::wrapped::WrappedKey;
use rsa::{Oaep, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::debug;

/// A wrapped content key paired with the payload it protects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    /// RSA-OAEP/SHA-256 ciphertext of the 32-byte content key.
    pub wrapped_key: Vec<u8>,
    /// `nonce (24) || ciphertext || tag (16)`.
    pub payload: Vec<u8>,
}

impl EncryptedEnvelope {
    /// Builds an envelope from a wrapped key in any accepted representation.
    pub fn from_parts(wrapped_key: &WrappedKey, payload: Vec<u8>) -> CryptoResult<Self> {
        Ok(Self {
            wrapped_key: wrapped_key.to_bytes()?,
            payload,
        })
    }

    /// Unwraps the content key, then decrypts the payload.
    pub fn open(&self, key: &ImportedPrivateKey) -> CryptoResult<String> {
        let content_key = unwrap_key(&WrappedKey::Bytes(self.wrapped_key.clone()), key)?;
        decrypt_content(&self.payload, &content_key)
    }
}

/// Recovers the content key from a wrapped key.
///
/// Shape errors surface as [`CryptoError::Format`]; a wrong private key or
/// corrupted bytes surface as [`CryptoError::Unwrap`].
pub fn unwrap_key(wrapped: &WrappedKey, key: &ImportedPrivateKey) -> CryptoResult<SymmetricKey> {
    let buffer = wrapped.to_bytes()?;
    debug!("unwrapping content key, wrapped length {}", buffer.len());

    let raw = key.decrypt_oaep(&buffer)?;
    SymmetricKey::from_bytes(&raw)
}

/// Wraps a content key for the holder of `public_key`.
pub fn wrap_key(content_key: &SymmetricKey, public_key: &RsaPublicKey) -> CryptoResult<Vec<u8>> {
    let mut rng = rand::rngs::OsRng;
    public_key
        .encrypt(&mut rng, Oaep::new::<Sha256>(), content_key.as_bytes())
        .map_err(|e| CryptoError::Encryption(format!("key wrap failed: {e}")))
}

/// Encrypts `plaintext` under a fresh content key addressed to `public_key`.
pub fn seal(plaintext: &str, public_key: &RsaPublicKey) -> CryptoResult<EncryptedEnvelope> {
    let content_key = SymmetricKey::generate();
    let payload = encrypt_content(plaintext.as_bytes(), &content_key)?;
    let wrapped_key = wrap_key(&content_key, public_key)?;
    Ok(EncryptedEnvelope {
        wrapped_key,
        payload,
    })
}
