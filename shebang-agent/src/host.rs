//! The host-surface seam.
//!
//! The orchestrator never touches markup. It asks a [`HostBridge`] for
//! elements by logical role and the bridge maps roles onto whatever the page
//! actually renders.

use crate::error::{AgentError, AgentResult};
use async_trait::async_trait;
use shebang_crypto::WrappedKey;
use std::fmt;

/// Logical element roles on the script editor page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostElement {
    /// The editor whose presence means the page has loaded.
    Editor,
    /// The "decrypt" affordance, only visible while the script is encrypted.
    DecryptAffordance,
    /// Text field the private key is pasted into.
    KeyInput,
    /// Trigger for the page's own decrypt routine.
    DecryptAction,
}

impl fmt::Display for HostElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostElement::Editor => write!(f, "code editor"),
            HostElement::DecryptAffordance => write!(f, "decrypt button"),
            HostElement::KeyInput => write!(f, "private key field"),
            HostElement::DecryptAction => write!(f, "decrypt action"),
        }
    }
}

/// Opaque reference to an element, minted by the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    role: HostElement,
    token: u64,
}

impl ElementHandle {
    pub fn new(role: HostElement, token: u64) -> Self {
        Self { role, token }
    }

    pub fn role(&self) -> HostElement {
        self.role
    }

    /// Bridge-defined identifier.
    pub fn token(&self) -> u64 {
        self.token
    }
}

/// What the selector shows for each key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChoice {
    pub name: String,
    pub fingerprint: String,
}

/// Encrypted script as exposed by the page, before normalisation.
#[derive(Debug, Clone, PartialEq)]
pub struct HostEnvelope {
    pub wrapped_key: WrappedKey,
    pub payload: Vec<u8>,
}

/// Everything the orchestrator needs from the page.
///
/// `await_element` may wait indefinitely; the orchestrator bounds it with a
/// timeout and drops the future on teardown, so implementations must release
/// any observation they set up when the future is dropped.
#[async_trait]
pub trait HostBridge: Send + Sync {
    /// Resolves once an element with this role exists.
    async fn await_element(&self, role: HostElement) -> AgentResult<ElementHandle>;

    /// Looks the element up right now.
    async fn query(&self, role: HostElement) -> AgentResult<Option<ElementHandle>>;

    /// Present and actually rendered, not hidden by a conditional-display rule.
    async fn is_visible(&self, element: &ElementHandle) -> AgentResult<bool>;

    /// Sets the field value and raises the page's input-changed notification.
    async fn set_field_value(&self, element: &ElementHandle, value: &str) -> AgentResult<()>;

    /// Simulates the user activation that triggers the element's action.
    async fn invoke_action(&self, element: &ElementHandle) -> AgentResult<()>;

    /// Shows a transient, auto-dismissing notice.
    async fn notify_user(&self, message: &str);

    /// Presents the key selector and waits for a choice. `None` on cancel.
    async fn choose_key(&self, choices: &[KeyChoice]) -> Option<usize>;

    /// The encrypted script, for decrypting in-process.
    async fn read_envelope(&self) -> AgentResult<Option<HostEnvelope>> {
        Err(AgentError::Host("host does not expose the envelope".to_string()))
    }

    /// Replaces the encrypted script with its plaintext.
    async fn reveal_plaintext(&self, _plaintext: &str) -> AgentResult<()> {
        Err(AgentError::Host("host cannot display plaintext".to_string()))
    }
}
