use std::io::{self, Write};

use shared::{
    domain::{Platform, SeasonalHook, SuggestionPriority, Tone},
    protocol::{CampaignResponse, ImageResponse, SeasonalSuggestions},
};

use crate::controller::{ViewPhase, ViewState};

pub fn render_campaign<W: Write>(out: &mut W, result: &CampaignResponse) -> io::Result<()> {
    writeln!(out, "Campaign for {}", result.business_name)?;
    writeln!(out)?;

    if let Some(image_url) = &result.image_url {
        writeln!(out, "Generated Image")?;
        writeln!(out, "  {image_url}")?;
        writeln!(out, "  Prompt used: {}", result.display_prompt())?;
        writeln!(out)?;
    }

    writeln!(out, "Platform Copy")?;
    for copy in &result.copies {
        writeln!(out, "--- {} ({} characters)", copy.platform, copy.character_count)?;
        for line in copy.copy.lines() {
            writeln!(out, "  {line}")?;
        }
    }

    if let Some(message) = &result.message {
        writeln!(out)?;
        writeln!(out, "{message}")?;
    }
    Ok(())
}

pub fn render_error_banner<W: Write>(out: &mut W, error: &str) -> io::Result<()> {
    writeln!(out, "!! {error}")
}

/// Draws whatever the current view state calls for: a loading line, the error
/// banner, and the results when present.
pub fn render_view<W: Write>(out: &mut W, state: &ViewState) -> io::Result<()> {
    if state.phase() == ViewPhase::Submitting {
        writeln!(out, "Generating your campaign...")?;
    }
    if let Some(error) = &state.error {
        render_error_banner(out, error)?;
    }
    if let Some(result) = &state.result {
        render_campaign(out, result)?;
    }
    Ok(())
}

pub fn render_seasonal<W: Write>(out: &mut W, seasonal: &SeasonalSuggestions) -> io::Result<()> {
    writeln!(out, "Current season: {}", seasonal.current_season)?;

    if !seasonal.active_events.is_empty() {
        writeln!(out, "In marketing window now:")?;
        for event in &seasonal.active_events {
            writeln!(out, "  {} on {} ({} days away)", event.name, event.date, event.days_until)?;
        }
    }
    if !seasonal.upcoming_events.is_empty() {
        writeln!(out, "Coming up:")?;
        for event in &seasonal.upcoming_events {
            writeln!(out, "  {} on {} ({} days away)", event.name, event.date, event.days_until)?;
        }
    }

    writeln!(out, "Suggested hooks:")?;
    for suggestion in &seasonal.suggestions {
        let priority = match suggestion.priority {
            SuggestionPriority::High => "high",
            SuggestionPriority::Medium => "medium",
            SuggestionPriority::Low => "low",
        };
        writeln!(out, "  [{priority}] {} - {}", suggestion.hook, suggestion.reason)?;
    }
    Ok(())
}

pub fn render_image<W: Write>(out: &mut W, image: &ImageResponse, prompt: &str) -> io::Result<()> {
    writeln!(out, "{}", image.image_url)?;
    let used = image.revised_prompt.as_deref().unwrap_or(prompt);
    writeln!(out, "Prompt used: {used}")
}

pub fn render_catalog<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Platforms:")?;
    for platform in Platform::ALL {
        writeln!(out, "  {platform}")?;
    }
    writeln!(out, "Tones:")?;
    for tone in Tone::ALL {
        writeln!(out, "  {tone}")?;
    }
    writeln!(out, "Seasonal hooks:")?;
    for hook in SeasonalHook::ALL {
        writeln!(out, "  {hook}")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
