//! CLI entry point for the snaplink tool.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use snaplink_core::{
    FileSettingsStore, MediaClient, Orchestrator, SubmitOutcome, TerminalView, Theme,
    ThemeController, system_prefers_dark,
};
use tracing::{debug, info};

mod cli;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Cli::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let store = FileSettingsStore::at_default_path()
        .context("cannot resolve the settings path; set XDG_CONFIG_HOME or HOME")?;
    debug!(path = %store.path().display(), "using settings file");

    let mut terminal = TerminalView::new(args.quiet || args.json);
    if args.json {
        terminal = terminal.with_result_output_suppressed();
    }
    let view = Arc::new(terminal);
    let mut theme_controller = ThemeController::new(store, Arc::clone(&view));
    let startup_theme = theme_controller.initialize(system_prefers_dark());
    debug!(theme = %startup_theme, "theme applied");

    if let Some(Command::Theme { value }) = args.command {
        return match value {
            Some(theme) => select_theme(&mut theme_controller, theme),
            None => {
                println!("{startup_theme}");
                Ok(ExitCode::SUCCESS)
            }
        };
    }

    let Some(platform) = args.platform else {
        bail!(
            "--platform is required to fetch download options.\n  \
             Example: snaplink --platform tiktok https://www.tiktok.com/@user/video/123"
        );
    };

    info!(platform = %platform, "snaplink starting");

    let client = Arc::new(MediaClient::with_base_url(&args.api_base));
    let orchestrator =
        Orchestrator::new(platform, client, Arc::clone(&view) as Arc<dyn snaplink_core::DownloadView>);

    // An absent URL argument flows through as an empty submission so the
    // validator produces the canonical "URL required." message.
    let url = args.url.unwrap_or_default();
    let outcome = orchestrator.submit(&url).await;

    let code = match outcome {
        SubmitOutcome::Completed(media) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&media)?);
            }
            ExitCode::SUCCESS
        }
        SubmitOutcome::Failed => ExitCode::FAILURE,
        // Validation rejections exit like clap usage errors.
        SubmitOutcome::Rejected => ExitCode::from(2),
        // Unreachable with a single submission, but not worth a panic.
        SubmitOutcome::Ignored => ExitCode::FAILURE,
    };
    Ok(code)
}

fn select_theme(
    controller: &mut ThemeController<FileSettingsStore, Arc<TerminalView>>,
    theme: Theme,
) -> Result<ExitCode> {
    controller
        .handle_select(theme)
        .context("failed to persist the theme preference")?;
    println!("{theme}");
    Ok(ExitCode::SUCCESS)
}
