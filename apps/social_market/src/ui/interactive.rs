//! Line-oriented session that walks a user through the campaign view.

use std::{
    io::{BufRead, Write},
    sync::Arc,
};

use anyhow::{anyhow, Result};
use shared::{domain::Platform, protocol::CampaignBrief};
use tokio::task::JoinHandle;
use tracing::info;

use super::{
    clipboard::copy_to_clipboard,
    form::{ask, prompt_brief},
    render::render_view,
};
use crate::controller::{CampaignController, ViewPhase, ViewState};

/// Exit status used when the user interrupts the session at a prompt.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

enum Choice {
    Copy(String),
    NewCampaign,
    Retry,
    Dismiss,
    EditBrief,
    Quit,
    Unknown,
}

fn parse_choice(answer: &str) -> Choice {
    let answer = answer.trim();
    let (head, rest) = answer
        .split_once(char::is_whitespace)
        .unwrap_or((answer, ""));
    if matches!(head.to_ascii_lowercase().as_str(), "c" | "copy") {
        return Choice::Copy(rest.trim().to_string());
    }

    match answer.to_ascii_lowercase().as_str() {
        "n" | "new" => Choice::NewCampaign,
        "r" | "retry" => Choice::Retry,
        "d" | "dismiss" => Choice::Dismiss,
        "e" | "edit" | "" => Choice::EditBrief,
        "q" | "quit" => Choice::Quit,
        _ => Choice::Unknown,
    }
}

pub async fn run_session<R: BufRead, W: Write>(
    controller: Arc<CampaignController>,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let mut last_brief: Option<CampaignBrief> = None;

    loop {
        let state = controller.state();
        render_view(output, &state)?;

        if state.shows_results() {
            let prompt = if state.error.is_some() {
                "[c]opy <platform>, [n]ew campaign, [d]ismiss, [q]uit"
            } else {
                "[c]opy <platform>, [n]ew campaign, [q]uit"
            };
            let Some(answer) = ask(input, output, prompt)? else {
                return Ok(());
            };
            match parse_choice(&answer) {
                Choice::Copy(mut label) => {
                    if label.is_empty() {
                        let Some(answer) = ask(input, output, "Platform to copy")? else {
                            return Ok(());
                        };
                        label = answer;
                    }
                    match copy_platform(&state, &label) {
                        Ok(platform) => writeln!(output, "  copied {platform} copy to the clipboard")?,
                        Err(err) => writeln!(output, "  {err:#}")?,
                    }
                }
                Choice::NewCampaign => controller.reset(),
                Choice::Dismiss => controller.dismiss_error(),
                Choice::Quit => return Ok(()),
                _ => writeln!(output, "  unrecognised choice")?,
            }
            continue;
        }

        if state.error.is_some() {
            let Some(answer) = ask(input, output, "[r]etry, [e]dit brief, [d]ismiss, [q]uit")? else {
                return Ok(());
            };
            match parse_choice(&answer) {
                Choice::Retry => {
                    if let Some(brief) = last_brief.clone() {
                        submit(&controller, brief, output).await?;
                        continue;
                    }
                    writeln!(output, "  nothing to retry yet")?;
                }
                Choice::Dismiss => controller.dismiss_error(),
                Choice::Quit => return Ok(()),
                Choice::EditBrief | Choice::NewCampaign | Choice::Copy(_) => {
                    let Some(brief) = prompt_brief(input, output)? else {
                        return Ok(());
                    };
                    last_brief = Some(brief.clone());
                    submit(&controller, brief, output).await?;
                }
                Choice::Unknown => writeln!(output, "  unrecognised choice")?,
            }
            continue;
        }

        let Some(brief) = prompt_brief(input, output)? else {
            return Ok(());
        };
        last_brief = Some(brief.clone());
        submit(&controller, brief, output).await?;
    }
}

fn copy_platform(state: &ViewState, label: &str) -> Result<Platform> {
    let platform: Platform = label.parse()?;
    let result = state
        .result
        .as_ref()
        .ok_or_else(|| anyhow!("no campaign to copy from"))?;
    copy_to_clipboard(result, platform)?;
    Ok(platform)
}

/// Runs one submission to completion. The interrupt watcher may cancel it.
async fn submit<W: Write>(
    controller: &Arc<CampaignController>,
    brief: CampaignBrief,
    output: &mut W,
) -> Result<()> {
    let task = controller.spawn_submit(brief);
    if controller.state().phase() == ViewPhase::Submitting {
        writeln!(output, "Generating your campaign... (Ctrl-C to cancel)")?;
        output.flush()?;
    }

    match task.await {
        Ok(()) => {}
        Err(err) if err.is_cancelled() => writeln!(output, "Cancelled.")?,
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// A pending submission was abandoned.
    Cancelled,
    /// Nothing was in flight; the session should end.
    Quit,
}

pub fn handle_interrupt(controller: &CampaignController) -> Interrupt {
    if controller.cancel() {
        Interrupt::Cancelled
    } else {
        Interrupt::Quit
    }
}

/// Owns Ctrl-C for the lifetime of an interactive session. A signal while a
/// submission is pending cancels it; one at a prompt ends the process.
pub fn spawn_interrupt_watcher(controller: Arc<CampaignController>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if handle_interrupt(&controller) == Interrupt::Quit {
                info!("interrupted at prompt, leaving session");
                std::process::exit(INTERRUPTED_EXIT_CODE);
            }
        }
    })
}

#[cfg(test)]
#[path = "tests/interactive_tests.rs"]
mod tests;
