use super::*;
use std::collections::HashMap;

use async_trait::async_trait;
use client_core::{ClientError, StatusCode};
use shared::{
    domain::{Platform, SeasonalHook, Tone},
    protocol::{CampaignResponse, PlatformCopy},
};
use tokio::sync::{mpsc, oneshot};

use crate::controller::{ViewPhase, FALLBACK_ERROR_MESSAGE};

type Outcome = Result<CampaignResponse, ClientError>;

/// Campaign API whose replies are released by the test, keyed by business name.
struct ScriptedApi {
    replies: Mutex<HashMap<String, oneshot::Receiver<Outcome>>>,
    started: mpsc::UnboundedSender<(String, &'static str)>,
}

impl ScriptedApi {
    async fn reply(&self, brief: &CampaignBrief, endpoint: &'static str) -> Outcome {
        let _ = self.started.send((brief.business_name.clone(), endpoint));
        let rx = self
            .replies
            .lock()
            .expect("replies lock")
            .remove(&brief.business_name)
            .expect("reply scripted for brief");
        rx.await.expect("reply sender kept alive")
    }
}

#[async_trait]
impl CampaignApi for ScriptedApi {
    async fn generate_full_campaign(&self, brief: &CampaignBrief) -> Outcome {
        self.reply(brief, "full").await
    }

    async fn generate_copy_only(&self, brief: &CampaignBrief) -> Outcome {
        self.reply(brief, "copy").await
    }

    async fn check_health(&self) -> bool {
        true
    }
}

struct Harness {
    controller: Arc<CampaignController>,
    senders: HashMap<String, oneshot::Sender<Outcome>>,
    started: mpsc::UnboundedReceiver<(String, &'static str)>,
}

fn harness(names: &[&str], mode: GenerationMode) -> Harness {
    let mut replies = HashMap::new();
    let mut senders = HashMap::new();
    for name in names {
        let (tx, rx) = oneshot::channel();
        replies.insert(name.to_string(), rx);
        senders.insert(name.to_string(), tx);
    }
    let (started_tx, started) = mpsc::unbounded_channel();
    let api = ScriptedApi {
        replies: Mutex::new(replies),
        started: started_tx,
    };
    Harness {
        controller: Arc::new(CampaignController::new(Arc::new(api)).with_mode(mode)),
        senders,
        started,
    }
}

impl Harness {
    fn release(&mut self, name: &str, outcome: Outcome) {
        let tx = self.senders.remove(name).expect("sender for brief");
        let _ = tx.send(outcome);
    }

    async fn wait_started(&mut self) -> (String, &'static str) {
        self.started.recv().await.expect("request started")
    }
}

fn brief(name: &str) -> CampaignBrief {
    CampaignBrief {
        business_name: name.to_string(),
        business_type: "Bakery".into(),
        target_audience: "Local families".into(),
        campaign_goal: "Increase footfall".into(),
        key_messages: "Fresh daily".into(),
        tone: Tone::WarmAndInviting,
        platforms: vec![Platform::Instagram, Platform::Facebook],
        include_hashtags: true,
        include_emoji: true,
        seasonal_hook: Some(SeasonalHook::Christmas),
    }
}

fn response(name: &str) -> CampaignResponse {
    CampaignResponse {
        success: true,
        business_name: name.to_string(),
        copies: vec![PlatformCopy {
            platform: "Instagram".into(),
            copy: "Christmas loaves are here, come and get them!".into(),
            character_count: 42,
        }],
        image_prompt: "a festive bakery window".into(),
        image_url: None,
        revised_image_prompt: None,
        message: None,
    }
}

fn rejected(message: &str) -> ClientError {
    ClientError::Status {
        endpoint: client_core::GENERATE_FULL_PATH,
        status: StatusCode::TOO_MANY_REQUESTS,
        message: message.to_string(),
    }
}

fn malformed() -> ClientError {
    let source = serde_json::from_str::<CampaignResponse>("{}").expect_err("must not parse");
    ClientError::Decode {
        endpoint: client_core::GENERATE_FULL_PATH,
        source,
    }
}

#[tokio::test]
async fn acme_submission_moves_idle_to_submitting_to_resolved() {
    let mut h = harness(&["Acme Bakery"], GenerationMode::Full);
    assert_eq!(h.controller.state().phase(), ViewPhase::Idle);

    let task = h.controller.spawn_submit(brief("Acme Bakery"));
    assert_eq!(h.wait_started().await, ("Acme Bakery".to_string(), "full"));
    let submitting = h.controller.state();
    assert_eq!(submitting.phase(), ViewPhase::Submitting);
    assert!(submitting.form_disabled());

    h.release("Acme Bakery", Ok(response("Acme Bakery")));
    task.await.expect("task");

    let state = h.controller.state();
    assert_eq!(state.phase(), ViewPhase::Resolved);
    assert_eq!(state.result, Some(response("Acme Bakery")));
    assert!(!state.is_loading);
}

#[tokio::test]
async fn rejection_sets_message_and_leaves_result_absent() {
    let mut h = harness(&["Acme Bakery"], GenerationMode::Full);
    h.release("Acme Bakery", Err(rejected("rate limited")));

    let state = h.controller.submit(brief("Acme Bakery")).await;

    assert_eq!(state.error.as_deref(), Some("rate limited"));
    assert_eq!(state.result, None);
    assert!(!state.is_loading);
    assert_eq!(state.phase(), ViewPhase::Failed);
}

#[tokio::test]
async fn failure_without_message_uses_fallback_and_keeps_prior_result() {
    let mut h = harness(&["First", "Second"], GenerationMode::Full);
    h.release("First", Ok(response("First")));
    h.controller.submit(brief("First")).await;

    h.release("Second", Err(malformed()));
    let state = h.controller.submit(brief("Second")).await;

    assert_eq!(state.error.as_deref(), Some(FALLBACK_ERROR_MESSAGE));
    assert_eq!(state.result, Some(response("First")));
}

#[tokio::test]
async fn copy_only_mode_routes_to_copy_endpoint() {
    let mut h = harness(&["Acme Bakery"], GenerationMode::CopyOnly);
    h.release("Acme Bakery", Ok(response("Acme Bakery")));

    let state = h.controller.submit(brief("Acme Bakery")).await;

    assert_eq!(h.wait_started().await.1, "copy");
    assert_eq!(state.phase(), ViewPhase::Resolved);
}

#[tokio::test]
async fn later_submission_wins_even_when_earlier_one_settles_last() {
    let mut h = harness(&["Old", "New"], GenerationMode::Full);

    let controller = Arc::clone(&h.controller);
    let old = tokio::spawn(async move { controller.submit(brief("Old")).await });
    assert_eq!(h.wait_started().await.0, "Old");

    let controller = Arc::clone(&h.controller);
    let new = tokio::spawn(async move { controller.submit(brief("New")).await });
    assert_eq!(h.wait_started().await.0, "New");

    h.release("New", Ok(response("New")));
    new.await.expect("new task");
    h.release("Old", Ok(response("Old")));
    old.await.expect("old task");

    let state = h.controller.state();
    assert_eq!(state.result, Some(response("New")));
    assert!(!state.is_loading);
}

#[tokio::test]
async fn earlier_submission_settling_first_does_not_end_loading() {
    let mut h = harness(&["Old", "New"], GenerationMode::Full);

    let controller = Arc::clone(&h.controller);
    let old = tokio::spawn(async move { controller.submit(brief("Old")).await });
    h.wait_started().await;
    let controller = Arc::clone(&h.controller);
    let new = tokio::spawn(async move { controller.submit(brief("New")).await });
    h.wait_started().await;

    h.release("Old", Err(rejected("old failure")));
    old.await.expect("old task");
    let state = h.controller.state();
    assert!(state.is_loading);
    assert_eq!(state.error, None);

    h.release("New", Ok(response("New")));
    new.await.expect("new task");
    assert_eq!(h.controller.state().phase(), ViewPhase::Resolved);
}

#[tokio::test]
async fn spawned_submission_aborts_the_one_it_supersedes() {
    let mut h = harness(&["Old", "New"], GenerationMode::Full);

    let old = h.controller.spawn_submit(brief("Old"));
    h.wait_started().await;
    let new = h.controller.spawn_submit(brief("New"));
    h.wait_started().await;

    let old_err = old.await.expect_err("superseded task is aborted");
    assert!(old_err.is_cancelled());

    h.release("New", Ok(response("New")));
    new.await.expect("new task");
    assert_eq!(h.controller.state().result, Some(response("New")));
}

#[tokio::test]
async fn settled_task_releases_its_abort_handle() {
    let mut h = harness(&["Acme Bakery"], GenerationMode::Full);

    let task = h.controller.spawn_submit(brief("Acme Bakery"));
    h.wait_started().await;
    assert!(h.controller.inflight.lock().expect("inflight lock").is_some());

    h.release("Acme Bakery", Ok(response("Acme Bakery")));
    task.await.expect("task");
    assert!(h.controller.inflight.lock().expect("inflight lock").is_none());
}

#[tokio::test]
async fn superseded_outcome_publishes_nothing_and_keeps_newer_handle() {
    let mut h = harness(&["Old", "New"], GenerationMode::Full);

    let controller = Arc::clone(&h.controller);
    let old = tokio::spawn(async move { controller.submit(brief("Old")).await });
    h.wait_started().await;
    let new = h.controller.spawn_submit(brief("New"));
    h.wait_started().await;

    let mut rx = h.controller.subscribe();
    rx.borrow_and_update();
    h.release("Old", Ok(response("Old")));
    old.await.expect("old task");

    assert!(!rx.has_changed().expect("controller alive"));
    let newer = h.controller.state().pending_token();
    let guard = h.controller.inflight.lock().expect("inflight lock");
    assert_eq!(guard.as_ref().map(|(token, _)| *token), newer);
    drop(guard);

    h.release("New", Ok(response("New")));
    new.await.expect("new task");
    assert_eq!(h.controller.state().result, Some(response("New")));
}

#[tokio::test]
async fn cancel_drops_the_pending_outcome() {
    let mut h = harness(&["Acme Bakery"], GenerationMode::Full);

    let task = h.controller.spawn_submit(brief("Acme Bakery"));
    h.wait_started().await;

    assert!(h.controller.cancel());
    let state = h.controller.state();
    assert!(!state.is_loading);
    assert_eq!(state.pending_token(), None);
    assert!(task.await.expect_err("aborted").is_cancelled());

    assert!(!h.controller.cancel());
}

#[tokio::test]
async fn cancel_without_spawned_task_still_ignores_late_outcome() {
    let mut h = harness(&["Acme Bakery"], GenerationMode::Full);

    let controller = Arc::clone(&h.controller);
    let task = tokio::spawn(async move { controller.submit(brief("Acme Bakery")).await });
    h.wait_started().await;

    assert!(h.controller.cancel());
    h.release("Acme Bakery", Ok(response("Acme Bakery")));
    let state = task.await.expect("task");

    assert_eq!(state.result, None);
    assert_eq!(state.phase(), ViewPhase::Idle);
}

#[tokio::test]
async fn reset_during_loading_keeps_loading_and_request_still_lands() {
    let mut h = harness(&["Acme Bakery"], GenerationMode::Full);

    let task = h.controller.spawn_submit(brief("Acme Bakery"));
    h.wait_started().await;
    h.controller.reset();
    assert!(h.controller.state().is_loading);

    h.release("Acme Bakery", Ok(response("Acme Bakery")));
    task.await.expect("task");
    assert_eq!(h.controller.state().result, Some(response("Acme Bakery")));
}

#[tokio::test]
async fn dismiss_and_reset_are_idempotent() {
    let mut h = harness(&["First", "Second"], GenerationMode::Full);
    h.release("First", Ok(response("First")));
    h.controller.submit(brief("First")).await;
    h.release("Second", Err(rejected("boom")));
    h.controller.submit(brief("Second")).await;

    h.controller.dismiss_error();
    let once = h.controller.state();
    h.controller.dismiss_error();
    assert_eq!(h.controller.state(), once);
    assert_eq!(once.result, Some(response("First")));

    h.controller.reset();
    h.controller.reset();
    let state = h.controller.state();
    assert_eq!(state.result, None);
    assert_eq!(state.error, None);
    assert_eq!(state.phase(), ViewPhase::Idle);
}

#[tokio::test]
async fn subscribers_see_each_state_change() {
    let mut h = harness(&["Acme Bakery"], GenerationMode::Full);
    let mut updates = h.controller.subscribe();

    let task = h.controller.spawn_submit(brief("Acme Bakery"));
    updates.changed().await.expect("submitting published");
    assert!(updates.borrow_and_update().is_loading);

    h.release("Acme Bakery", Ok(response("Acme Bakery")));
    task.await.expect("task");
    updates.changed().await.expect("resolved published");
    assert_eq!(
        updates.borrow_and_update().phase(),
        ViewPhase::Resolved
    );

    h.controller.dismiss_error();
    assert!(!updates.has_changed().expect("sender alive"));
}
