use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Platform, SeasonalHook, SuggestionPriority, Tone};

pub const HEALTHY_STATUS: &str = "healthy";
pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignBrief {
    pub business_name: String,
    pub business_type: String,
    pub target_audience: String,
    pub campaign_goal: String,
    pub key_messages: String,
    pub tone: Tone,
    pub platforms: Vec<Platform>,
    pub include_hashtags: bool,
    pub include_emoji: bool,
    pub seasonal_hook: Option<SeasonalHook>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformCopy {
    pub platform: String,
    pub copy: String,
    pub character_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignResponse {
    pub success: bool,
    pub business_name: String,
    pub copies: Vec<PlatformCopy>,
    pub image_prompt: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub revised_image_prompt: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl CampaignResponse {
    /// The prompt shown next to the generated image: the image model's
    /// revision when it returned one.
    pub fn display_prompt(&self) -> &str {
        self.revised_image_prompt
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(self.image_prompt.as_str())
    }

    pub fn copy_for(&self, platform: Platform) -> Option<&PlatformCopy> {
        self.copies
            .iter()
            .find(|c| c.platform.eq_ignore_ascii_case(platform.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == HEALTHY_STATUS
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalEvent {
    pub name: String,
    pub date: NaiveDate,
    pub days_until: i64,
    pub is_active: bool,
    pub marketing_window: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalSuggestion {
    pub hook: String,
    pub reason: String,
    pub priority: SuggestionPriority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalSuggestions {
    #[serde(default = "default_true")]
    pub success: bool,
    pub current_season: String,
    #[serde(default)]
    pub active_events: Vec<SeasonalEvent>,
    #[serde(default)]
    pub upcoming_events: Vec<SeasonalEvent>,
    #[serde(default)]
    pub suggestions: Vec<SeasonalSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
    #[serde(default = "default_image_size")]
    pub size: String,
}

impl ImageRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            size: default_image_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResponse {
    pub success: bool,
    pub image_url: String,
    #[serde(default)]
    pub revised_prompt: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_image_size() -> String {
    DEFAULT_IMAGE_SIZE.to_string()
}
