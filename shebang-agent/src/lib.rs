//! Page agent for shebang.run encrypted scripts.
//!
//! Attaches to a script page, waits for it to load, decides whether the
//! script is encrypted and, if so, picks a key from the local vault and
//! decrypts it. The page itself is reached only through a [`HostBridge`].
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                DecryptionOrchestrator                │
//! │   Detecting → CheckingEncrypted → key policy         │
//! │   → Decrypting (host or local) → terminal outcome    │
//! └───────┬──────────────────┬───────────────────┬───────┘
//!         │                  │                   │
//!    ┌────▼─────┐      ┌─────▼─────┐      ┌──────▼───────┐
//!    │HostBridge│      │ KeyVault  │      │shebang-crypto│
//!    └──────────┘      └───────────┘      └──────────────┘
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod orchestrator;
pub mod state;

pub use config::{AgentConfig, DecryptMode};
pub use error::{AgentError, AgentResult};
pub use host::{ElementHandle, HostBridge, HostElement, HostEnvelope, KeyChoice};
pub use orchestrator::{
    DecryptionOrchestrator, OrchestratorHandle, CANCELLED_NOTICE, NO_KEYS_NOTICE,
};
pub use state::{OrchestratorState, Outcome};

/// Installs a stderr `tracing` subscriber filtered by `RUST_LOG`
/// (default `info`). Later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
