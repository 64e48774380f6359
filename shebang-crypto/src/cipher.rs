//! XChaCha20-Poly1305 content encryption.
//!
//! Payload layout: `nonce (24) || ciphertext || tag (16)`, no associated
//! data and no extra length framing.

use crate::error::{CryptoError, CryptoResult};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    Key, XChaCha20Poly1305, XNonce,
};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of the symmetric key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of the extended nonce in bytes.
pub const NONCE_SIZE: usize = 24;

/// Size of the Poly1305 tag in bytes.
pub const TAG_SIZE: usize = 16;

/// A 256-bit content key. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    bytes: [u8; KEY_SIZE],
}

impl SymmetricKey {
    /// Generates a random key from the OS RNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Creates a key from raw bytes, which must be exactly 32 long.
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() != KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; KEY_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SymmetricKey([REDACTED])")
    }
}

/// Generates a fresh content key.
pub fn generate_symmetric_key() -> SymmetricKey {
    SymmetricKey::generate()
}

/// Encrypts `plaintext` under a random nonce, returning the full payload.
pub fn encrypt_content(plaintext: &[u8], key: &SymmetricKey) -> CryptoResult<Vec<u8>> {
    let cipher = XChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));

    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt(XNonce::from_slice(&nonce), plaintext)
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    let mut payload = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    payload.extend_from_slice(&nonce);
    payload.extend_from_slice(&ciphertext);
    Ok(payload)
}

/// Authenticates and decrypts a payload, returning the raw plaintext bytes.
pub fn decrypt_content_bytes(payload: &[u8], key: &SymmetricKey) -> CryptoResult<Vec<u8>> {
    if payload.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CryptoError::Truncated {
            expected: NONCE_SIZE + TAG_SIZE,
            actual: payload.len(),
        });
    }

    let (nonce, ciphertext) = payload.split_at(NONCE_SIZE);
    let cipher = XChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));

    cipher
        .decrypt(XNonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::Decryption("authentication tag mismatch".to_string()))
}

/// Authenticates and decrypts a payload into a UTF-8 string.
pub fn decrypt_content(payload: &[u8], key: &SymmetricKey) -> CryptoResult<String> {
    let plaintext = decrypt_content_bytes(payload, key)?;
    Ok(String::from_utf8(plaintext)?)
}
