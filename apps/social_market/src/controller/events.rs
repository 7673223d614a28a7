//! Events that move the campaign view from one state to the next.

use std::fmt;

use shared::protocol::CampaignResponse;

pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Identifies one submission. Later submissions always carry larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    /// Copy plus a generated image.
    #[default]
    Full,
    CopyOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Submitted {
        token: RequestToken,
    },
    Succeeded {
        token: RequestToken,
        response: CampaignResponse,
    },
    Failed {
        token: RequestToken,
        message: Option<String>,
    },
    ErrorDismissed,
    Reset,
    Cancelled {
        token: RequestToken,
    },
}

impl ViewEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ViewEvent::Submitted { .. } => "submitted",
            ViewEvent::Succeeded { .. } => "succeeded",
            ViewEvent::Failed { .. } => "failed",
            ViewEvent::ErrorDismissed => "error_dismissed",
            ViewEvent::Reset => "reset",
            ViewEvent::Cancelled { .. } => "cancelled",
        }
    }
}

/// The text shown in the error banner for a failure.
pub fn failure_message(message: Option<String>) -> String {
    message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}
