use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    error::ApiErrorBody,
    protocol::{
        CampaignBrief, CampaignResponse, HealthStatus, ImageRequest, ImageResponse,
        SeasonalSuggestions,
    },
};
use tracing::{debug, warn};

pub mod config;
pub mod error;

pub use config::ClientSettings;
pub use error::ClientError;
pub use reqwest::StatusCode;

pub const GENERATE_FULL_PATH: &str = "/api/v1/campaigns/generate-full";
pub const GENERATE_COPY_PATH: &str = "/api/v1/campaigns/generate-copy";
pub const HEALTH_PATH: &str = "/health";
pub const SEASONAL_SUGGESTIONS_PATH: &str = "/api/v1/seasonal/suggestions";
pub const GENERATE_IMAGE_PATH: &str = "/api/v1/images/generate";

/// The generation operations a campaign view drives.
#[async_trait]
pub trait CampaignApi: Send + Sync {
    async fn generate_full_campaign(
        &self,
        brief: &CampaignBrief,
    ) -> Result<CampaignResponse, ClientError>;
    async fn generate_copy_only(
        &self,
        brief: &CampaignBrief,
    ) -> Result<CampaignResponse, ClientError>;
    /// Liveness probe. Never fails: any problem reads as unhealthy.
    async fn check_health(&self) -> bool;
}

/// Stateless HTTP client for the campaign generation service.
///
/// Each call is exactly one round trip. Nothing is retried, cached or
/// deduplicated, and the transport's default timeouts apply.
#[derive(Debug, Clone)]
pub struct CampaignClient {
    http: Client,
    base_url: String,
}

impl CampaignClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(Client::new(), base_url)
    }

    pub fn with_http(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(settings.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn generate_full_campaign(
        &self,
        brief: &CampaignBrief,
    ) -> Result<CampaignResponse, ClientError> {
        self.post_json(GENERATE_FULL_PATH, brief).await
    }

    pub async fn generate_copy_only(
        &self,
        brief: &CampaignBrief,
    ) -> Result<CampaignResponse, ClientError> {
        self.post_json(GENERATE_COPY_PATH, brief).await
    }

    pub async fn check_health(&self) -> bool {
        match self.health().await {
            Ok(health) => health.is_healthy(),
            Err(err) => {
                debug!(error = %err, "health probe failed");
                false
            }
        }
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.dispatch(HEALTH_PATH, self.http.get(self.url(HEALTH_PATH)))
            .await
    }

    pub async fn seasonal_suggestions(&self) -> Result<SeasonalSuggestions, ClientError> {
        self.dispatch(
            SEASONAL_SUGGESTIONS_PATH,
            self.http.get(self.url(SEASONAL_SUGGESTIONS_PATH)),
        )
        .await
    }

    pub async fn generate_image(
        &self,
        request: &ImageRequest,
    ) -> Result<ImageResponse, ClientError> {
        self.post_json(GENERATE_IMAGE_PATH, request).await
    }

    async fn post_json<B, T>(&self, endpoint: &'static str, body: &B) -> Result<T, ClientError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .http
            .post(self.url(endpoint))
            .header(header::CONTENT_TYPE, "application/json")
            .json(body);
        self.dispatch(endpoint, request).await
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        debug!(endpoint, "campaign api request");
        let response = request.send().await.map_err(|source| {
            warn!(endpoint, error = %source, "campaign api unreachable");
            ClientError::Network { endpoint, source }
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|source| {
            warn!(endpoint, error = %source, "campaign api body read failed");
            ClientError::Network { endpoint, source }
        })?;

        if !status.is_success() {
            let message = std::str::from_utf8(&body)
                .ok()
                .and_then(ApiErrorBody::extract_message)
                .unwrap_or_else(|| format!("request failed with status code {}", status.as_u16()));
            warn!(endpoint, status = status.as_u16(), %message, "campaign api rejected request");
            return Err(ClientError::Status {
                endpoint,
                status,
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|source| {
            warn!(endpoint, error = %source, "campaign api returned malformed body");
            ClientError::Decode { endpoint, source }
        })
    }
}

#[async_trait]
impl CampaignApi for CampaignClient {
    async fn generate_full_campaign(
        &self,
        brief: &CampaignBrief,
    ) -> Result<CampaignResponse, ClientError> {
        CampaignClient::generate_full_campaign(self, brief).await
    }

    async fn generate_copy_only(
        &self,
        brief: &CampaignBrief,
    ) -> Result<CampaignResponse, ClientError> {
        CampaignClient::generate_copy_only(self, brief).await
    }

    async fn check_health(&self) -> bool {
        CampaignClient::check_health(self).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
