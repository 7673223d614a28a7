//! Pure state transitions for the campaign view.

use shared::protocol::CampaignResponse;

use super::events::{failure_message, RequestToken, ViewEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    /// Form shown, nothing pending.
    Idle,
    /// Request in flight; the form is disabled.
    Submitting,
    /// A campaign is available.
    Resolved,
    /// An error banner is shown above a usable form.
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub result: Option<CampaignResponse>,
    pub is_loading: bool,
    pub error: Option<String>,
    pending: Option<RequestToken>,
}

impl ViewState {
    pub fn phase(&self) -> ViewPhase {
        if self.is_loading {
            ViewPhase::Submitting
        } else if self.error.is_some() {
            ViewPhase::Failed
        } else if self.result.is_some() {
            ViewPhase::Resolved
        } else {
            ViewPhase::Idle
        }
    }

    /// The submission whose outcome will be honored, if any.
    pub fn pending_token(&self) -> Option<RequestToken> {
        self.pending
    }

    pub fn shows_results(&self) -> bool {
        self.result.is_some()
    }

    pub fn form_disabled(&self) -> bool {
        self.is_loading
    }

    fn awaits(&self, token: RequestToken) -> bool {
        self.pending == Some(token)
    }
}

/// Applies one event to a state, producing the next state.
///
/// Outcomes are honored only for the most recently submitted request; an
/// outcome for any other token leaves the state untouched. A new submission
/// clears the error but keeps the previous result on screen until it settles.
pub fn reduce(state: &ViewState, event: ViewEvent) -> ViewState {
    let mut next = state.clone();
    match event {
        ViewEvent::Submitted { token } => {
            next.error = None;
            next.is_loading = true;
            next.pending = Some(token);
        }
        ViewEvent::Succeeded { token, response } => {
            if state.awaits(token) {
                next.result = Some(response);
                next.is_loading = false;
                next.pending = None;
            }
        }
        ViewEvent::Failed { token, message } => {
            if state.awaits(token) {
                next.error = Some(failure_message(message));
                next.is_loading = false;
                next.pending = None;
            }
        }
        ViewEvent::ErrorDismissed => {
            next.error = None;
        }
        ViewEvent::Reset => {
            next.result = None;
            next.error = None;
        }
        ViewEvent::Cancelled { token } => {
            if state.awaits(token) {
                next.is_loading = false;
                next.pending = None;
            }
        }
    }
    next
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
