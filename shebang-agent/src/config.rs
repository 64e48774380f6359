//! Orchestrator configuration.

use crate::error::{AgentError, AgentResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Where the decryption itself happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecryptMode {
    /// Paste the key into the page and let the page decrypt.
    #[default]
    Host,
    /// Read the envelope from the page, decrypt here, hand back plaintext.
    Local,
}

/// Timing and behaviour of the decryption orchestrator.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Upper bound on waiting for the editor to appear (milliseconds).
    pub element_timeout_ms: u64,

    /// Pause before checking the decrypt affordance, so the page's
    /// conditional rendering can settle (milliseconds).
    pub render_settle_ms: u64,

    /// Pause between injecting the key and invoking the action (milliseconds).
    pub input_settle_ms: u64,

    pub decrypt_mode: DecryptMode,

    /// Key the vault document is stored under.
    pub storage_key: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            element_timeout_ms: 10_000,
            render_settle_ms: 1_000,
            input_settle_ms: 100,
            decrypt_mode: DecryptMode::Host,
            storage_key: shebang_vault::DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl AgentConfig {
    /// Parses TOML; absent fields keep their defaults.
    pub fn from_toml_str(text: &str) -> AgentResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| AgentError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: &Path) -> AgentResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AgentError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> AgentResult<()> {
        if self.element_timeout_ms == 0 {
            return Err(AgentError::Config(
                "element_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.storage_key.trim().is_empty() {
            return Err(AgentError::Config("storage_key must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn element_timeout(&self) -> Duration {
        Duration::from_millis(self.element_timeout_ms)
    }

    pub fn render_settle(&self) -> Duration {
        Duration::from_millis(self.render_settle_ms)
    }

    pub fn input_settle(&self) -> Duration {
        Duration::from_millis(self.input_settle_ms)
    }
}
