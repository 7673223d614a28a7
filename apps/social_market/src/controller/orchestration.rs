//! Drives campaign requests through the client and publishes view state.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};

use client_core::CampaignApi;
use shared::protocol::CampaignBrief;
use tokio::{
    sync::watch,
    task::{AbortHandle, JoinHandle},
};
use tracing::debug;

use super::{
    events::{GenerationMode, RequestToken, ViewEvent},
    reducer::{reduce, ViewState},
};

/// Holds the current [`ViewState`] and applies events to it.
///
/// Every state change is published on a watch channel; renderers subscribe
/// and redraw when it changes.
pub struct CampaignController {
    api: Arc<dyn CampaignApi>,
    mode: GenerationMode,
    next_token: AtomicU64,
    inflight: Mutex<Option<(RequestToken, AbortHandle)>>,
    state: watch::Sender<ViewState>,
}

impl CampaignController {
    pub fn new(api: Arc<dyn CampaignApi>) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            api,
            mode: GenerationMode::default(),
            next_token: AtomicU64::new(1),
            inflight: Mutex::new(None),
            state,
        }
    }

    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Submits a brief and waits for its outcome to be applied.
    pub async fn submit(&self, brief: CampaignBrief) -> ViewState {
        let token = self.begin();
        self.settle(token, brief).await;
        self.state()
    }

    /// Submits a brief on a background task. A submission still in flight
    /// from an earlier call is aborted.
    pub fn spawn_submit(self: &Arc<Self>, brief: CampaignBrief) -> JoinHandle<()> {
        let token = self.begin();
        let controller = Arc::clone(self);

        // Held across the spawn so the task cannot settle before it is registered.
        let mut inflight = self.inflight.lock().ok();
        let handle = tokio::spawn(async move {
            controller.settle(token, brief).await;
        });

        let previous = inflight
            .as_mut()
            .and_then(|guard| guard.replace((token, handle.abort_handle())));
        drop(inflight);
        if let Some((superseded, abort)) = previous {
            debug!(token = %superseded, "aborting superseded submission");
            abort.abort();
        }
        handle
    }

    pub fn dismiss_error(&self) {
        self.apply(ViewEvent::ErrorDismissed);
    }

    pub fn reset(&self) {
        self.apply(ViewEvent::Reset);
    }

    /// Abandons the pending submission, if any. Its outcome will be dropped
    /// even if the request completes.
    pub fn cancel(&self) -> bool {
        let pending = self.state.borrow().pending_token();
        let Some(token) = pending else {
            return false;
        };

        if let Ok(mut guard) = self.inflight.lock() {
            if let Some((inflight_token, abort)) = guard.take() {
                if inflight_token == token {
                    abort.abort();
                } else {
                    *guard = Some((inflight_token, abort));
                }
            }
        }

        debug!(%token, "cancelling submission");
        self.apply(ViewEvent::Cancelled { token });
        true
    }

    fn begin(&self) -> RequestToken {
        let token = RequestToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        debug!(%token, mode = ?self.mode, "submitting campaign brief");
        self.apply(ViewEvent::Submitted { token });
        token
    }

    async fn settle(&self, token: RequestToken, brief: CampaignBrief) {
        let outcome = match self.mode {
            GenerationMode::Full => self.api.generate_full_campaign(&brief).await,
            GenerationMode::CopyOnly => self.api.generate_copy_only(&brief).await,
        };

        self.release_inflight(token);
        if self.state.borrow().pending_token() != Some(token) {
            debug!(%token, "discarding outcome of superseded submission");
            return;
        }

        let event = match outcome {
            Ok(response) => ViewEvent::Succeeded { token, response },
            Err(err) => ViewEvent::Failed {
                token,
                message: err.user_message(),
            },
        };
        self.apply(event);
    }

    fn release_inflight(&self, token: RequestToken) {
        if let Ok(mut guard) = self.inflight.lock() {
            if guard.as_ref().is_some_and(|(inflight, _)| *inflight == token) {
                *guard = None;
            }
        }
    }

    fn apply(&self, event: ViewEvent) {
        let name = event.name();
        let changed = self.state.send_if_modified(|state| {
            let next = reduce(state, event);
            if next == *state {
                false
            } else {
                *state = next;
                true
            }
        });
        debug!(event = name, changed, "view event applied");
    }
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
