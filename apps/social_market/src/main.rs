use std::{
    io::{self, Write},
    process::ExitCode,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{config::load_settings, CampaignClient};
use shared::{
    domain::Platform,
    protocol::{ImageRequest, DEFAULT_IMAGE_SIZE},
};
use tokio::{runtime::Handle, task};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod controller;
mod ui;

use controller::{CampaignController, GenerationMode};
use ui::{
    clipboard::copy_to_clipboard,
    form::BriefForm,
    interactive::{run_session, spawn_interrupt_watcher},
    render::{render_campaign, render_catalog, render_error_banner, render_image, render_seasonal},
};

#[derive(Parser, Debug)]
#[command(
    name = "social-market",
    about = "Generate social media campaigns for UK small businesses"
)]
struct Args {
    /// Campaign API base URL; overrides config files and environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a campaign from a brief given as flags.
    Generate(GenerateArgs),
    /// Fill in a brief step by step and review the results.
    Interactive {
        #[arg(long)]
        copy_only: bool,
    },
    /// Check whether the campaign API is up.
    Health,
    /// Show seasonal hooks worth using right now.
    Seasonal,
    /// Generate a standalone marketing image.
    Image {
        #[arg(long)]
        prompt: String,
        #[arg(long, default_value = DEFAULT_IMAGE_SIZE)]
        size: String,
    },
    /// List the supported platforms, tones and seasonal hooks.
    Catalog,
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    #[arg(long)]
    business_name: String,
    #[arg(long)]
    business_type: String,
    #[arg(long)]
    target_audience: String,
    #[arg(long)]
    campaign_goal: String,
    #[arg(long)]
    key_messages: String,
    #[arg(long)]
    tone: Option<String>,
    /// Comma separated, e.g. "Instagram,Facebook".
    #[arg(long)]
    platforms: String,
    #[arg(long)]
    no_hashtags: bool,
    #[arg(long)]
    no_emoji: bool,
    #[arg(long)]
    seasonal_hook: Option<String>,
    /// Skip image generation.
    #[arg(long)]
    copy_only: bool,
    /// Print the raw JSON response.
    #[arg(long)]
    json: bool,
    /// Copy this platform's text to the clipboard.
    #[arg(long)]
    clipboard: Option<String>,
}

impl GenerateArgs {
    fn form(&self) -> BriefForm {
        BriefForm {
            business_name: self.business_name.clone(),
            business_type: self.business_type.clone(),
            target_audience: self.target_audience.clone(),
            campaign_goal: self.campaign_goal.clone(),
            key_messages: self.key_messages.clone(),
            tone: self.tone.clone(),
            platforms: self.platforms.clone(),
            include_hashtags: !self.no_hashtags,
            include_emoji: !self.no_emoji,
            seasonal_hook: self.seasonal_hook.clone(),
        }
    }

    fn mode(&self) -> GenerationMode {
        if self.copy_only {
            GenerationMode::CopyOnly
        } else {
            GenerationMode::Full
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let args = Args::parse();

    let settings = load_settings()
        .context("failed to load client settings")?
        .with_api_url(args.api_url.as_deref())
        .context("invalid --api-url")?;
    info!(api_url = %settings.api_base_url, "resolved campaign api");
    let client = CampaignClient::from_settings(&settings);

    match args.command {
        Command::Generate(generate) => run_generate(client, generate).await,
        Command::Interactive { copy_only } => {
            let mode = if copy_only {
                GenerationMode::CopyOnly
            } else {
                GenerationMode::Full
            };
            let controller = Arc::new(CampaignController::new(Arc::new(client)).with_mode(mode));
            let _interrupts = spawn_interrupt_watcher(Arc::clone(&controller));
            let runtime = Handle::current();
            task::spawn_blocking(move || {
                let stdin = io::stdin();
                runtime.block_on(run_session(controller, &mut stdin.lock(), &mut io::stdout()))
            })
            .await
            .context("interactive session panicked")??;
            Ok(ExitCode::SUCCESS)
        }
        Command::Health => {
            if client.check_health().await {
                println!("healthy ({})", client.base_url());
                Ok(ExitCode::SUCCESS)
            } else {
                println!("unreachable or unhealthy ({})", client.base_url());
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Seasonal => {
            let seasonal = client
                .seasonal_suggestions()
                .await
                .context("failed to fetch seasonal suggestions")?;
            render_seasonal(&mut io::stdout(), &seasonal)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Image { prompt, size } => {
            let request = ImageRequest { prompt, size };
            let image = client
                .generate_image(&request)
                .await
                .context("failed to generate image")?;
            render_image(&mut io::stdout(), &image, &request.prompt)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Catalog => {
            render_catalog(&mut io::stdout())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_generate(client: CampaignClient, args: GenerateArgs) -> Result<ExitCode> {
    let brief = args.form().into_brief().context("invalid brief")?;
    let clipboard_platform = args
        .clipboard
        .as_deref()
        .map(str::parse::<Platform>)
        .transpose()
        .context("invalid --clipboard platform")?;

    let controller = CampaignController::new(Arc::new(client)).with_mode(args.mode());
    let state = controller.submit(brief).await;

    let mut stdout = io::stdout();
    if let Some(error) = &state.error {
        render_error_banner(&mut io::stderr(), error)?;
        return Ok(ExitCode::FAILURE);
    }
    let Some(result) = &state.result else {
        return Ok(ExitCode::FAILURE);
    };

    if args.json {
        serde_json::to_writer_pretty(&mut stdout, result)?;
        writeln!(stdout)?;
    } else {
        render_campaign(&mut stdout, result)?;
    }

    if let Some(platform) = clipboard_platform {
        copy_to_clipboard(result, platform)?;
        eprintln!("Copied {platform} copy to clipboard");
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
