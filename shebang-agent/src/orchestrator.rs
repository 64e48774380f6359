//! Decryption orchestrator: drives one attempt on one attached page.
//!
//! The orchestrator ties together:
//! - the host page (element detection, key injection, notices)
//! - the key vault (which keys exist, which one to use)
//! - the envelope decryptor (local mode only)
//!
//! An attempt is strictly linear. Each step waits for its precondition and
//! there is never more than one attempt per orchestrator, since `run`
//! consumes it.

use crate::config::{AgentConfig, DecryptMode};
use crate::error::{AgentError, AgentResult};
use crate::host::{ElementHandle, HostBridge, HostElement, KeyChoice};
use crate::state::{OrchestratorState, Outcome};
use shebang_crypto::{decrypt_content, import_private_key, unwrap_key};
use shebang_vault::{KeyRecord, KeyStore, KeyVault};
use std::sync::Arc;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Shown when encrypted content is found but the vault is empty.
pub const NO_KEYS_NOTICE: &str = "No keys found. Add a key in the extension popup.";

/// Shown when the user dismisses the key selector.
pub const CANCELLED_NOTICE: &str = "Key selection cancelled";

/// Drives detection and decryption of an encrypted script on one page.
pub struct DecryptionOrchestrator {
    vault: Arc<KeyVault>,
    config: AgentConfig,
    state_tx: Arc<watch::Sender<OrchestratorState>>,
    /// Key picked for this attempt, reported in the outcome.
    attempted_key: Option<String>,
    path: Vec<OrchestratorState>,
}

impl DecryptionOrchestrator {
    pub fn new(vault: Arc<KeyVault>, config: AgentConfig) -> Self {
        let (state_tx, _) = watch::channel(OrchestratorState::Idle);
        Self {
            vault,
            config,
            state_tx: Arc::new(state_tx),
            attempted_key: None,
            path: Vec::new(),
        }
    }

    /// Opens the vault over `store`, reading the document named by
    /// `config.storage_key`.
    pub fn with_store(store: Arc<dyn KeyStore>, config: AgentConfig) -> Self {
        let vault = KeyVault::with_storage_key(store, config.storage_key.clone());
        Self::new(Arc::new(vault), config)
    }

    pub fn state(&self) -> OrchestratorState {
        *self.state_tx.borrow()
    }

    /// Receives every state transition.
    pub fn subscribe(&self) -> watch::Receiver<OrchestratorState> {
        self.state_tx.subscribe()
    }

    /// Runs one attempt to its terminal state.
    ///
    /// Every terminal state except `NotEncrypted` shows exactly one notice.
    /// Nothing was found to decrypt in that case, so it stays silent.
    pub async fn run(mut self, bridge: &dyn HostBridge) -> Outcome {
        match self.drive(bridge).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("[AGENT] Attempt failed during {}: {}", self.state(), e);
                self.finish(bridge, OrchestratorState::Error, e.user_message())
                    .await
            }
        }
    }

    /// Spawns the attempt and returns a handle for observing or tearing it
    /// down. Dropping the handle counts as teardown.
    pub fn attach(self, bridge: Arc<dyn HostBridge>) -> OrchestratorHandle {
        let state_tx = self.state_tx.clone();
        let state_rx = self.state_tx.subscribe();
        let (detach_tx, detach_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            tokio::select! {
                outcome = self.run(bridge.as_ref()) => outcome,
                _ = detach_rx => {
                    let prev = state_tx.send_replace(OrchestratorState::Detached);
                    info!("[AGENT] Detached from page during {}", prev);
                    Outcome::new(OrchestratorState::Detached)
                }
            }
        });

        OrchestratorHandle {
            state_rx,
            detach_tx: Some(detach_tx),
            task,
        }
    }

    async fn drive(&mut self, bridge: &dyn HostBridge) -> AgentResult<Outcome> {
        self.transition(OrchestratorState::Detecting);
        self.await_element(bridge, HostElement::Editor).await?;
        debug!("[AGENT] Editor present");

        self.transition(OrchestratorState::CheckingEncrypted);
        tokio::time::sleep(self.config.render_settle()).await;
        if !self.decrypt_affordance_visible(bridge).await? {
            info!("[AGENT] No visible decrypt affordance, script is not encrypted");
            self.transition(OrchestratorState::NotEncrypted);
            return Ok(self.outcome(None));
        }

        let mut keys = self.vault.list().await?;
        info!("[AGENT] Encrypted script detected, {} keys in vault", keys.len());

        let key = match keys.len() {
            0 => {
                return Ok(self
                    .finish(bridge, OrchestratorState::NoKeys, NO_KEYS_NOTICE.to_string())
                    .await);
            }
            1 => {
                self.transition(OrchestratorState::AutoDecrypt);
                keys.remove(0)
            }
            len => {
                self.transition(OrchestratorState::AwaitingSelection);
                let choices: Vec<KeyChoice> = keys
                    .iter()
                    .map(|k| KeyChoice {
                        name: k.name.clone(),
                        fingerprint: k.fingerprint.clone(),
                    })
                    .collect();

                match bridge.choose_key(&choices).await {
                    Some(index) if index < len => keys.swap_remove(index),
                    Some(index) => return Err(AgentError::InvalidSelection { index, len }),
                    None => {
                        info!("[AGENT] Key selection cancelled");
                        let notice = CANCELLED_NOTICE.to_string();
                        return Ok(self
                            .finish(bridge, OrchestratorState::Cancelled, notice)
                            .await);
                    }
                }
            }
        };

        self.attempted_key = Some(key.name.clone());
        self.transition(OrchestratorState::Decrypting);

        let notice = match self.config.decrypt_mode {
            DecryptMode::Host => self.decrypt_in_host(bridge, &key).await?,
            DecryptMode::Local => self.decrypt_locally(bridge, &key).await?,
        };
        Ok(self.finish(bridge, OrchestratorState::Done, notice).await)
    }

    /// Writes the key into the page and triggers the page's own decryption.
    async fn decrypt_in_host(
        &self,
        bridge: &dyn HostBridge,
        key: &KeyRecord,
    ) -> AgentResult<String> {
        let input = self.require(bridge, HostElement::KeyInput).await?;
        bridge.set_field_value(&input, &key.content).await?;

        tokio::time::sleep(self.config.input_settle()).await;

        let action = self.require(bridge, HostElement::DecryptAction).await?;
        bridge.invoke_action(&action).await?;

        info!(
            "[AGENT] Decrypt action invoked with key '{}' ({})",
            key.name, key.fingerprint
        );
        Ok(format!("Decrypting with key: {}", key.name))
    }

    /// Opens the page's envelope in-process and hands back the plaintext.
    async fn decrypt_locally(
        &self,
        bridge: &dyn HostBridge,
        key: &KeyRecord,
    ) -> AgentResult<String> {
        let envelope = bridge
            .read_envelope()
            .await?
            .ok_or_else(|| AgentError::Host("page exposes no encrypted script".to_string()))?;

        let pem = key.content.clone();
        let plaintext = tokio::task::spawn_blocking(move || -> AgentResult<String> {
            let private_key = import_private_key(&pem)?;
            let content_key = unwrap_key(&envelope.wrapped_key, &private_key)?;
            Ok(decrypt_content(&envelope.payload, &content_key)?)
        })
        .await
        .map_err(|e| AgentError::Host(format!("decryption task failed: {e}")))??;

        bridge.reveal_plaintext(&plaintext).await?;

        info!(
            "[AGENT] Decrypted {} bytes locally with key '{}' ({})",
            plaintext.len(),
            key.name,
            key.fingerprint
        );
        Ok(format!("Decrypted with key: {}", key.name))
    }

    async fn await_element(
        &self,
        bridge: &dyn HostBridge,
        role: HostElement,
    ) -> AgentResult<ElementHandle> {
        let waited = self.config.element_timeout();
        match tokio::time::timeout(waited, bridge.await_element(role)).await {
            Ok(result) => result,
            Err(_) => Err(AgentError::ElementTimeout { role, waited }),
        }
    }

    async fn require(
        &self,
        bridge: &dyn HostBridge,
        role: HostElement,
    ) -> AgentResult<ElementHandle> {
        bridge
            .query(role)
            .await?
            .ok_or(AgentError::ElementMissing(role))
    }

    async fn decrypt_affordance_visible(&self, bridge: &dyn HostBridge) -> AgentResult<bool> {
        let Some(affordance) = bridge.query(HostElement::DecryptAffordance).await? else {
            debug!("[AGENT] Decrypt affordance absent");
            return Ok(false);
        };
        let visible = bridge.is_visible(&affordance).await?;
        debug!("[AGENT] Decrypt affordance visible: {}", visible);
        Ok(visible)
    }

    async fn finish(
        &mut self,
        bridge: &dyn HostBridge,
        state: OrchestratorState,
        notice: String,
    ) -> Outcome {
        self.transition(state);
        bridge.notify_user(&notice).await;
        self.outcome(Some(notice))
    }

    fn outcome(&self, notice: Option<String>) -> Outcome {
        Outcome {
            state: self.state(),
            notice,
            key_name: self.attempted_key.clone(),
            path: self.path.clone(),
        }
    }

    fn transition(&mut self, next: OrchestratorState) {
        let prev = self.state_tx.send_replace(next);
        self.path.push(next);
        debug!("[AGENT] {} -> {}", prev, next);
    }
}

/// Handle to a spawned attempt.
pub struct OrchestratorHandle {
    state_rx: watch::Receiver<OrchestratorState>,
    detach_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<Outcome>,
}

impl OrchestratorHandle {
    pub fn state(&self) -> OrchestratorState {
        *self.state_rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<OrchestratorState> {
        self.state_rx.clone()
    }

    /// Tears the attempt down (e.g. the user navigated away). Any pending
    /// wait on the page is dropped, releasing its observer.
    pub fn detach(&mut self) {
        if let Some(tx) = self.detach_tx.take() {
            let _ = tx.send(());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the terminal outcome.
    pub async fn outcome(self) -> AgentResult<Outcome> {
        let Self { task, detach_tx, .. } = self;
        let result = task
            .await
            .map_err(|e| AgentError::Host(format!("orchestrator task failed: {e}")));
        drop(detach_tx);
        result
    }
}
