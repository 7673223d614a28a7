//! Collects a campaign brief from raw text input.

use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use shared::{
    domain::{parse_platforms, Platform, SeasonalHook, Tone},
    error::CatalogError,
    protocol::CampaignBrief,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Raw brief fields as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefForm {
    pub business_name: String,
    pub business_type: String,
    pub target_audience: String,
    pub campaign_goal: String,
    pub key_messages: String,
    pub tone: Option<String>,
    pub platforms: String,
    pub include_hashtags: bool,
    pub include_emoji: bool,
    pub seasonal_hook: Option<String>,
}

impl Default for BriefForm {
    fn default() -> Self {
        Self {
            business_name: String::new(),
            business_type: String::new(),
            target_audience: String::new(),
            campaign_goal: String::new(),
            key_messages: String::new(),
            tone: None,
            platforms: String::new(),
            include_hashtags: true,
            include_emoji: true,
            seasonal_hook: None,
        }
    }
}

impl BriefForm {
    pub fn into_brief(self) -> Result<CampaignBrief, FormError> {
        let tone = match self.tone.as_deref().map(str::trim) {
            None | Some("") => Tone::default(),
            Some(raw) => parse_choice(raw, Tone::ALL)?,
        };
        let seasonal_hook = parse_hook(self.seasonal_hook.as_deref())?;

        Ok(CampaignBrief {
            business_name: required("business name", self.business_name)?,
            business_type: required("business type", self.business_type)?,
            target_audience: required("target audience", self.target_audience)?,
            campaign_goal: required("campaign goal", self.campaign_goal)?,
            key_messages: required("key messages", self.key_messages)?,
            tone,
            platforms: parse_platforms(&self.platforms)?,
            include_hashtags: self.include_hashtags,
            include_emoji: self.include_emoji,
            seasonal_hook,
        })
    }
}

fn required(field: &'static str, value: String) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Accepts either a 1-based position in `options` or the option's label.
pub fn parse_choice<T>(raw: &str, options: &[T]) -> Result<T, CatalogError>
where
    T: FromStr<Err = CatalogError> + Copy,
{
    let raw = raw.trim();
    if let Ok(position) = raw.parse::<usize>() {
        if let Some(option) = position.checked_sub(1).and_then(|i| options.get(i)) {
            return Ok(*option);
        }
    }
    raw.parse()
}

fn parse_hook(raw: Option<&str>) -> Result<Option<SeasonalHook>, CatalogError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("none") => Ok(None),
        Some(v) => parse_choice(v, SeasonalHook::ALL).map(Some),
    }
}

/// Prompts for every brief field, re-asking a field until it parses.
/// Returns `None` when input ends.
pub fn prompt_brief<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<CampaignBrief>> {
    let mut form = BriefForm::default();

    macro_rules! ask_text {
        ($label:literal, $field:ident) => {
            loop {
                let Some(answer) = ask(input, output, $label)? else {
                    return Ok(None);
                };
                match required($label, answer) {
                    Ok(value) => {
                        form.$field = value;
                        break;
                    }
                    Err(err) => writeln!(output, "  {err}")?,
                }
            }
        };
    }

    ask_text!("Business name", business_name);
    ask_text!("Business type", business_type);
    ask_text!("Target audience", target_audience);
    ask_text!("Campaign goal", campaign_goal);
    ask_text!("Key messages", key_messages);

    write_options(output, Tone::ALL)?;
    loop {
        let Some(answer) = ask(input, output, "Tone [1]")? else {
            return Ok(None);
        };
        if answer.trim().is_empty() {
            break;
        }
        match parse_choice(&answer, Tone::ALL) {
            Ok(_) => {
                form.tone = Some(answer);
                break;
            }
            Err(err) => writeln!(output, "  {err}")?,
        }
    }

    write_options(output, Platform::ALL)?;
    loop {
        let Some(answer) = ask(input, output, "Platforms (comma separated)")? else {
            return Ok(None);
        };
        match parse_platforms(&answer) {
            Ok(_) => {
                form.platforms = answer;
                break;
            }
            Err(err) => writeln!(output, "  {err}")?,
        }
    }

    let Some(hashtags) = ask_yes_no(input, output, "Include hashtags", true)? else {
        return Ok(None);
    };
    form.include_hashtags = hashtags;
    let Some(emoji) = ask_yes_no(input, output, "Include emoji", true)? else {
        return Ok(None);
    };
    form.include_emoji = emoji;

    write_options(output, SeasonalHook::ALL)?;
    loop {
        let Some(answer) = ask(input, output, "Seasonal hook (blank for none)")? else {
            return Ok(None);
        };
        match parse_hook(Some(&answer)) {
            Ok(_) => {
                form.seasonal_hook = Some(answer);
                break;
            }
            Err(err) => writeln!(output, "  {err}")?,
        }
    }

    form.into_brief()
        .map(Some)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))
}

pub(crate) fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(output, "{label}: ")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn ask_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    default: bool,
) -> io::Result<Option<bool>> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    loop {
        let Some(answer) = ask(input, output, &format!("{label} {hint}"))? else {
            return Ok(None);
        };
        match answer.trim().to_ascii_lowercase().as_str() {
            "" => return Ok(Some(default)),
            "y" | "yes" => return Ok(Some(true)),
            "n" | "no" => return Ok(Some(false)),
            _ => writeln!(output, "  please answer y or n")?,
        }
    }
}

fn write_options<W: Write, T: std::fmt::Display>(output: &mut W, options: &[T]) -> io::Result<()> {
    for (i, option) in options.iter().enumerate() {
        writeln!(output, "  {}. {option}", i + 1)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
