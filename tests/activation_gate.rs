use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rtc_auth::{
    ActivationGate, ActivationMetrics, ActivationPrompt, ActivationStore, LICENSE_URL,
    MemoryActivationStore, PromptChoice, PromptRequest,
};

#[derive(Default)]
struct CountingMetrics {
    tracked: AtomicUsize,
}

impl ActivationMetrics for CountingMetrics {
    fn track_activation(&self) {
        self.tracked.fetch_add(1, Ordering::SeqCst);
    }
}

/// Resolves every prompt with a fixed choice, recording presentations and
/// opened URLs.
struct ScriptedPrompt {
    choice: PromptChoice,
    presented: AtomicUsize,
    opened: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    fn new(choice: PromptChoice) -> Self {
        Self {
            choice,
            presented: AtomicUsize::new(0),
            opened: Mutex::new(Vec::new()),
        }
    }

    fn presentations(&self) -> usize {
        self.presented.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActivationPrompt for ScriptedPrompt {
    async fn present(&self, _request: &PromptRequest) -> PromptChoice {
        self.presented.fetch_add(1, Ordering::SeqCst);
        self.choice
    }

    fn open_url(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_string());
    }
}

struct Harness {
    gate: Arc<ActivationGate>,
    store: Arc<MemoryActivationStore>,
    metrics: Arc<CountingMetrics>,
    prompt: Arc<ScriptedPrompt>,
}

fn harness(choice: PromptChoice) -> Harness {
    let store = Arc::new(MemoryActivationStore::new());
    let metrics = Arc::new(CountingMetrics::default());
    let prompt = Arc::new(ScriptedPrompt::new(choice));
    let gate = Arc::new(ActivationGate::new(
        store.clone(),
        metrics.clone(),
        prompt.clone(),
    ));
    Harness {
        gate,
        store,
        metrics,
        prompt,
    }
}

#[tokio::test]
async fn activated_state_short_circuits_without_prompting() {
    for disabled in [false, true] {
        let h = harness(PromptChoice::Cancel);
        h.store.set_activated(true);
        h.store.set_activation_disabled(disabled);

        assert!(h.gate.check().await);
        assert_eq!(h.prompt.presentations(), 0);
    }
}

#[tokio::test]
async fn disabled_state_is_treated_as_permitted() {
    let h = harness(PromptChoice::Cancel);
    h.gate.disable();

    assert!(h.gate.check().await);
    assert_eq!(h.prompt.presentations(), 0);
    assert!(!h.store.is_activated());
}

#[tokio::test]
async fn accepting_the_prompt_activates_and_tracks_once() {
    let h = harness(PromptChoice::Activate);

    assert!(h.gate.check().await);
    assert!(h.store.is_activated());
    assert_eq!(h.prompt.presentations(), 1);
    assert_eq!(h.metrics.tracked.load(Ordering::SeqCst), 1);

    // Decision is remembered: no further prompt, no further signal.
    assert!(h.gate.check().await);
    assert_eq!(h.prompt.presentations(), 1);
    assert_eq!(h.metrics.tracked.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn cancelling_leaves_state_untouched_and_reprompts() {
    let h = harness(PromptChoice::Cancel);

    assert!(!h.gate.check().await);
    assert!(!h.store.is_activated());
    assert!(!h.store.is_activation_disabled());
    assert_eq!(h.metrics.tracked.load(Ordering::SeqCst), 0);

    assert!(!h.gate.check().await);
    assert_eq!(h.prompt.presentations(), 2);
}

#[tokio::test]
async fn viewing_the_license_opens_it_without_changing_state() {
    let h = harness(PromptChoice::ViewLicense);

    assert!(!h.gate.check().await);
    assert!(!h.store.is_activated());
    assert_eq!(h.metrics.tracked.load(Ordering::SeqCst), 0);
    assert_eq!(h.prompt.opened.lock().unwrap().as_slice(), [LICENSE_URL]);

    // Undecided: the next check prompts again.
    assert!(!h.gate.check().await);
    assert_eq!(h.prompt.presentations(), 2);
}

#[tokio::test]
async fn reset_reexercises_the_flow() {
    let h = harness(PromptChoice::Activate);

    assert!(h.gate.check().await);
    assert_eq!(h.prompt.presentations(), 1);

    h.gate.reset();
    assert!(!h.store.is_activated());

    assert!(h.gate.check().await);
    assert_eq!(h.prompt.presentations(), 2);
}

#[tokio::test]
async fn reset_also_clears_the_disable_flag() {
    let h = harness(PromptChoice::Cancel);
    h.gate.disable();
    assert!(h.gate.is_disabled());

    h.gate.reset();
    assert!(!h.gate.is_disabled());
    assert!(!h.gate.check().await);
    assert_eq!(h.prompt.presentations(), 1);
}

/// Blocks inside `present` until released, so a second check can queue
/// behind an outstanding prompt.
struct HeldPrompt {
    presented: AtomicUsize,
    release: tokio::sync::Notify,
}

#[async_trait]
impl ActivationPrompt for HeldPrompt {
    async fn present(&self, _request: &PromptRequest) -> PromptChoice {
        self.presented.fetch_add(1, Ordering::SeqCst);
        self.release.notified().await;
        PromptChoice::Activate
    }

    fn open_url(&self, _url: &str) {}
}

#[tokio::test]
async fn concurrent_checks_share_a_single_prompt() {
    let store = Arc::new(MemoryActivationStore::new());
    let prompt = Arc::new(HeldPrompt {
        presented: AtomicUsize::new(0),
        release: tokio::sync::Notify::new(),
    });
    let gate = Arc::new(ActivationGate::new(
        store,
        Arc::new(CountingMetrics::default()),
        prompt.clone(),
    ));

    let first = tokio::spawn({
        let gate = gate.clone();
        async move { gate.check().await }
    });
    // Wait for the first prompt to be outstanding.
    while prompt.presented.load(Ordering::SeqCst) == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    let second = tokio::spawn({
        let gate = gate.clone();
        async move { gate.check().await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;

    prompt.release.notify_one();

    assert!(first.await.unwrap());
    assert!(second.await.unwrap());
    // The queued check observed the first outcome instead of prompting again.
    assert_eq!(prompt.presented.load(Ordering::SeqCst), 1);
}
