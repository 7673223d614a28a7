use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown {kind} '{value}'")]
    Unknown { kind: &'static str, value: String },
    #[error("at least one platform is required")]
    NoPlatforms,
}

/// Failure envelope returned by the campaign API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub success: bool,
    pub error: String,
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ValidationIssue {
    msg: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WrappedDetail {
    Body(ApiErrorBody),
    Text(String),
    Validation(Vec<ValidationIssue>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorEnvelope {
    Bare(ApiErrorBody),
    Wrapped { detail: WrappedDetail },
}

impl ApiErrorBody {
    pub fn message(&self) -> Option<&str> {
        non_blank(self.detail.as_deref()).or_else(|| non_blank(Some(self.error.as_str())))
    }

    /// Pulls a human-readable message out of any error body shape the server
    /// emits: the bare envelope, the envelope nested under `detail`, a plain
    /// `detail` string, or a list of request validation issues.
    pub fn extract_message(raw: &str) -> Option<String> {
        let envelope: ErrorEnvelope = serde_json::from_str(raw).ok()?;
        match envelope {
            ErrorEnvelope::Wrapped { detail } => match detail {
                WrappedDetail::Body(body) => body.message().map(str::to_string),
                WrappedDetail::Text(text) => non_blank(Some(text.as_str())).map(str::to_string),
                WrappedDetail::Validation(issues) => issues
                    .into_iter()
                    .find_map(|issue| non_blank(Some(issue.msg.as_str())).map(str::to_string)),
            },
            ErrorEnvelope::Bare(body) => body.message().map(str::to_string),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
