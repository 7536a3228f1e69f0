//! One-time codec license activation gate
//!
//! A calling SDK consults [`ActivationGate::check`] before enabling the
//! licensed H.264 path. The gate wraps two persisted flags — "activated" and
//! "activation disabled" — and drives a three-way user confirmation exactly
//! once per undecided check. Collaborators (settings storage, metrics,
//! prompt presentation) are injected at construction so embedders control
//! durability and UI.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::{info, warn};

/// URL of the H.264 binary license text, opened on "View License"
pub const LICENSE_URL: &str = "http://www.openh264.org/BINARY_LICENSE.txt";

/// Persisted activation flags
///
/// Durability and isolation are the implementor's concern; the gate only
/// requires that each flag read/write is individually atomic.
pub trait ActivationStore: Send + Sync {
    fn is_activated(&self) -> bool;
    fn set_activated(&self, activated: bool);
    fn is_activation_disabled(&self) -> bool;
    fn set_activation_disabled(&self, disabled: bool);
    /// Clears both flags. Development/testing only.
    fn reset_activation(&self);
}

/// Fire-and-forget activation metrics
///
/// Implementations must not fail in a way that is observable to the gate;
/// the signature gives them no channel to.
pub trait ActivationMetrics: Send + Sync {
    fn track_activation(&self);
}

/// User choice resolved from the activation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    /// Accept the license and activate the codec
    Activate,
    /// Open the license text for reading; decide later
    ViewLicense,
    /// Decline for now
    Cancel,
}

/// Content of the activation confirmation shown to the user
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub title: String,
    pub message: String,
    pub activate_label: String,
    pub view_license_label: String,
    pub cancel_label: String,
}

impl Default for PromptRequest {
    fn default() -> Self {
        Self {
            title: "Activate License".to_string(),
            message: "To enable video calls, activate a free video license (H.264 AVC). \
                      By selecting 'Activate', you accept the End User License Agreement \
                      and Notices."
                .to_string(),
            activate_label: "Activate".to_string(),
            view_license_label: "View License".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }
}

/// Prompt presentation collaborator (allows mocking in tests)
///
/// `present` must resolve to exactly one choice per invocation. The gate
/// serializes invocations itself; an implementation never sees two
/// outstanding prompts.
#[async_trait]
pub trait ActivationPrompt: Send + Sync {
    async fn present(&self, request: &PromptRequest) -> PromptChoice;
    /// Open an external URI, used as the "View License" side effect.
    fn open_url(&self, url: &str);
}

/// One-time consent gate for the licensed codec path
///
/// State machine over the two persisted flags:
/// - activated: terminal, every check succeeds without prompting;
/// - disabled: treated as "assume permitted", every check succeeds without
///   prompting;
/// - otherwise a three-way prompt runs and only "Activate" changes state, so
///   "View License" and "Cancel" re-prompt on the next check.
///
/// `check` never errors; every path terminates in a boolean.
pub struct ActivationGate {
    store: Arc<dyn ActivationStore>,
    metrics: Arc<dyn ActivationMetrics>,
    prompt: Arc<dyn ActivationPrompt>,
    request: PromptRequest,
    // Serializes prompt presentation; concurrent checks queue behind it.
    prompt_lock: tokio::sync::Mutex<()>,
}

impl ActivationGate {
    pub fn new(
        store: Arc<dyn ActivationStore>,
        metrics: Arc<dyn ActivationMetrics>,
        prompt: Arc<dyn ActivationPrompt>,
    ) -> Self {
        Self {
            store,
            metrics,
            prompt,
            request: PromptRequest::default(),
            prompt_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Replace the default prompt content
    pub fn with_prompt_request(mut self, request: PromptRequest) -> Self {
        self.request = request;
        self
    }

    /// Check whether the licensed codec path may be used
    ///
    /// Returns true immediately when already activated or when activation is
    /// disabled; otherwise presents the confirmation and returns the user's
    /// decision. A decline is a valid outcome, not an error.
    pub async fn check(&self) -> bool {
        if self.permitted() {
            return true;
        }

        let _guard = self.prompt_lock.lock().await;
        // A caller that queued behind an outstanding prompt must observe its
        // outcome instead of prompting again.
        if self.permitted() {
            return true;
        }

        match self.prompt.present(&self.request).await {
            PromptChoice::Activate => {
                info!("video license has been activated");
                self.store.set_activated(true);
                self.metrics.track_activation();
                true
            }
            PromptChoice::ViewLicense => {
                info!("video license opened for viewing");
                self.prompt.open_url(LICENSE_URL);
                false
            }
            PromptChoice::Cancel => {
                warn!("video license has not been activated");
                false
            }
        }
    }

    /// Suppress all future activation prompts
    ///
    /// Disabling is sticky: after this call every `check` succeeds without
    /// prompting, until an explicit [`reset`](Self::reset).
    pub fn disable(&self) {
        self.store.set_activation_disabled(true);
    }

    /// Whether activation prompts are currently suppressed
    pub fn is_disabled(&self) -> bool {
        self.store.is_activation_disabled()
    }

    /// Clear both activation flags
    ///
    /// Development/testing only; production paths never call this.
    pub fn reset(&self) {
        self.store.reset_activation();
    }

    fn permitted(&self) -> bool {
        self.store.is_activated() || self.store.is_activation_disabled()
    }
}

/// In-memory [`ActivationStore`] for tests and embedders without persistence
#[derive(Debug, Default)]
pub struct MemoryActivationStore {
    activated: AtomicBool,
    disabled: AtomicBool,
}

impl MemoryActivationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ActivationStore for MemoryActivationStore {
    fn is_activated(&self) -> bool {
        self.activated.load(Ordering::SeqCst)
    }

    fn set_activated(&self, activated: bool) {
        self.activated.store(activated, Ordering::SeqCst);
    }

    fn is_activation_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    fn set_activation_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    fn reset_activation(&self) {
        self.activated.store(false, Ordering::SeqCst);
        self.disabled.store(false, Ordering::SeqCst);
    }
}

/// [`ActivationMetrics`] that drops every signal
#[derive(Debug, Default)]
pub struct NoopMetrics;

impl ActivationMetrics for NoopMetrics {
    fn track_activation(&self) {}
}
