//! Orchestrator states and terminal outcomes.

use std::fmt;

/// Where a decryption attempt currently is.
///
/// ```text
/// Idle → Detecting → CheckingEncrypted → NotEncrypted
///                                      → NoKeys
///                                      → AutoDecrypt ──────────→ Decrypting → Done | Error
///                                      → AwaitingSelection ────→ Decrypting
///                                                          └──→ Cancelled
/// ```
///
/// Any state may also end in `Error` (timeouts, vault failures) or in
/// `Detached` when the host tears the page down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrchestratorState {
    Idle,
    Detecting,
    CheckingEncrypted,
    NotEncrypted,
    NoKeys,
    AutoDecrypt,
    AwaitingSelection,
    Decrypting,
    Done,
    Error,
    Cancelled,
    Detached,
}

impl OrchestratorState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrchestratorState::NotEncrypted
                | OrchestratorState::NoKeys
                | OrchestratorState::Done
                | OrchestratorState::Error
                | OrchestratorState::Cancelled
                | OrchestratorState::Detached
        )
    }
}

impl fmt::Display for OrchestratorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrchestratorState::Idle => "Idle",
            OrchestratorState::Detecting => "Detecting",
            OrchestratorState::CheckingEncrypted => "CheckingEncrypted",
            OrchestratorState::NotEncrypted => "NotEncrypted",
            OrchestratorState::NoKeys => "NoKeys",
            OrchestratorState::AutoDecrypt => "AutoDecrypt",
            OrchestratorState::AwaitingSelection => "AwaitingSelection",
            OrchestratorState::Decrypting => "Decrypting",
            OrchestratorState::Done => "Done",
            OrchestratorState::Error => "Error",
            OrchestratorState::Cancelled => "Cancelled",
            OrchestratorState::Detached => "Detached",
        };
        f.write_str(name)
    }
}

/// How an attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Always a terminal state.
    pub state: OrchestratorState,
    /// The one notice shown to the user, if the page was still there to
    /// show it and there was something to say.
    pub notice: Option<String>,
    /// Name of the key that was used or attempted.
    pub key_name: Option<String>,
    /// States passed through after `Idle`, ending with `state`. A detached
    /// attempt only reports `Detached`.
    pub path: Vec<OrchestratorState>,
}

impl Outcome {
    pub(crate) fn new(state: OrchestratorState) -> Self {
        Self {
            state,
            notice: None,
            key_name: None,
            path: vec![state],
        }
    }

    pub fn is_success(&self) -> bool {
        self.state == OrchestratorState::Done
    }
}
