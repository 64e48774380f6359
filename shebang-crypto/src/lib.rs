//! Envelope decryption for shebang.run encrypted scripts.
//!
//! Content published by the service is protected with a hybrid scheme:
//! - RSA-OAEP with SHA-256 wraps a random 256-bit content key for the
//!   recipient's public key
//! - XChaCha20-Poly1305 encrypts the content under that key, with the
//!   24-byte nonce prepended and the 16-byte tag appended
//!
//! # Decryption
//!
//! 1. [`import_private_key`] turns a PKCS8 PEM into a decrypt-only handle.
//! 2. [`unwrap_key`] recovers the content key from the wrapped key, which may
//!    arrive in any [`WrappedKey`] representation.
//! 3. [`decrypt_content`] authenticates and decrypts the payload.
//!
//! The sealing half ([`seal`], [`wrap_key`], [`encrypt_content`]) mirrors what
//! the service does when a script is saved.

mod cipher;
pub mod envelope;
mod error;
mod key;
mod wrapped;

pub use cipher::{
    decrypt_content, decrypt_content_bytes, encrypt_content, generate_symmetric_key,
    SymmetricKey, KEY_SIZE, NONCE_SIZE, TAG_SIZE,
};
pub use envelope::{seal, unwrap_key, wrap_key, EncryptedEnvelope};
pub use error::{CryptoError, CryptoResult};
pub use key::{import_private_key, strip_pem, ImportedPrivateKey};
pub use wrapped::WrappedKey;

/// Re-exported so callers can hold the public half for sealing.
pub use rsa::RsaPublicKey;
