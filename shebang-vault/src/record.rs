//! Stored key records and their fingerprints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Number of hex characters kept from the SHA-256 digest.
pub const FINGERPRINT_LEN: usize = 16;

/// A named private key as held in the vault.
///
/// Records are never edited in place. Replacing a key means removing it and
/// adding it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    pub name: String,
    /// PEM text exactly as submitted (after trimming).
    pub content: String,
    pub fingerprint: String,
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
}

impl KeyRecord {
    pub(crate) fn new(name: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            content: content.to_string(),
            fingerprint: fingerprint(content),
            created_at: Utc::now(),
        }
    }
}

/// First 16 hex characters of SHA-256 over the raw key text.
///
/// A human-checkable label, not a security boundary.
pub fn fingerprint(content: &str) -> String {
    let digest = hex::encode(Sha256::digest(content.as_bytes()));
    digest[..FINGERPRINT_LEN].to_string()
}

/// Structural sanity check: both a `BEGIN` and a `PRIVATE KEY` marker.
pub fn has_pem_markers(content: &str) -> bool {
    content.contains("BEGIN") && content.contains("PRIVATE KEY")
}
