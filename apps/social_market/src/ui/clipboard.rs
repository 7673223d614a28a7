use anyhow::{anyhow, Context, Result};
use shared::{domain::Platform, protocol::CampaignResponse};

pub fn copy_text_for(result: &CampaignResponse, platform: Platform) -> Result<&str> {
    result
        .copy_for(platform)
        .map(|c| c.copy.as_str())
        .ok_or_else(|| anyhow!("no copy was generated for {platform}"))
}

/// Puts one platform's copy on the system clipboard.
pub fn copy_to_clipboard(result: &CampaignResponse, platform: Platform) -> Result<()> {
    let text = copy_text_for(result, platform)?;
    let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
    clipboard
        .set_text(text.to_string())
        .context("failed to write clipboard")?;
    tracing::debug!(%platform, chars = text.chars().count(), "copied platform copy to clipboard");
    Ok(())
}

#[cfg(test)]
mod tests {
    use shared::protocol::PlatformCopy;

    use super::*;

    #[test]
    fn picks_the_requested_platform_copy() {
        let result = CampaignResponse {
            success: true,
            business_name: "Acme".into(),
            copies: vec![
                PlatformCopy {
                    platform: "Instagram".into(),
                    copy: "insta".into(),
                    character_count: 5,
                },
                PlatformCopy {
                    platform: "LinkedIn".into(),
                    copy: "linked".into(),
                    character_count: 6,
                },
            ],
            image_prompt: String::new(),
            image_url: None,
            revised_image_prompt: None,
            message: None,
        };

        assert_eq!(copy_text_for(&result, Platform::LinkedIn).expect("copy"), "linked");
        let err = copy_text_for(&result, Platform::TikTok).expect_err("missing");
        assert_eq!(err.to_string(), "no copy was generated for TikTok");
    }
}
