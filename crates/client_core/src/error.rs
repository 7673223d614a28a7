use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong on one round trip to the campaign API.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not reach the campaign service ({endpoint}): {source}")]
    Network {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{message}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        message: String,
    },
    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    pub fn endpoint(&self) -> &'static str {
        match self {
            ClientError::Network { endpoint, .. }
            | ClientError::Status { endpoint, .. }
            | ClientError::Decode { endpoint, .. } => endpoint,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message fit for showing to the user, if this failure carries one.
    ///
    /// A body that could not be decoded has nothing useful to say, so callers
    /// substitute their own fallback.
    pub fn user_message(&self) -> Option<String> {
        match self {
            ClientError::Network { .. } => Some(self.to_string()),
            ClientError::Status { message, .. } => Some(message.clone()),
            ClientError::Decode { .. } => None,
        }
    }
}
