//! Local private-key vault for shebang.run.
//!
//! Holds named PEM private keys with a SHA-256 fingerprint each. The whole
//! key list is one JSON document stored under a single key in a
//! [`KeyStore`]: [`MemoryKeyStore`] in-process, or [`SqliteKeyStore`] on disk.
//!
//! Rules enforced by [`KeyVault`]:
//! - names are non-empty and unique (exact, case-sensitive match)
//! - content is non-empty and carries `BEGIN` / `PRIVATE KEY` markers
//! - records keep insertion order and are never edited in place
//! - a failed mutation leaves the stored list untouched

mod error;
mod record;
mod store;
mod vault;

pub use error::{ValidationError, VaultError, VaultResult};
pub use record::{fingerprint, has_pem_markers, KeyRecord, FINGERPRINT_LEN};
pub use store::{KeyStore, MemoryKeyStore, SqliteKeyStore};
pub use vault::{KeyVault, DEFAULT_STORAGE_KEY};
