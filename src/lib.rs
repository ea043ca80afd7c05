pub mod cli;
pub mod client;
pub mod commands;
pub mod error;
pub mod models;
pub mod shell;
pub mod view;

use clap::Parser;
use cli::{Cli, Command, Direction, OutputArg, SettingsAction};
use client::HttpApiClient;
use commands::{
    popup::{PopupController, VoteButton},
    settings::{load_effective_settings, load_settings_from_disk, parse_assignment, save_settings_to_disk},
    tab::{EnvTab, FixedTab, TabChain},
    votes::{format_vote_table, list_my_votes, remove_vote},
};
use error::PopupError;
use log::error;
use models::settings::{EffectiveSettings, OutputFormat};
use shell::{
    session::run_session,
    surface::{AnySurface, JsonSurface, TextSurface},
};
use std::process::ExitCode;

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let config_root = cli.config_root.clone().unwrap_or_else(default_config_root);

    let settings = match load_effective_settings(&config_root) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("credicheck: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(cli.log_level.as_deref(), &settings.log_level);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("credicheck: could not start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(dispatch(cli, &config_root, settings)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("credicheck: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli, config_root: &str, mut settings: EffectiveSettings) -> Result<(), PopupError> {
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }
    if let Some(output) = cli.output {
        settings.output_format = match output {
            OutputArg::Text => OutputFormat::Text,
            OutputArg::Json => OutputFormat::Json,
        };
    }

    match cli.command.unwrap_or(Command::Open { url: None }) {
        Command::Settings { action } => run_settings(config_root, action),
        Command::Open { url } => {
            let client = HttpApiClient::from_settings(&settings)?;
            let mut controller = PopupController::new(client, surface_for(settings.output_format));
            if let Err(e @ PopupError::TabResolutionFailed) = controller.open(&tab_sources(url)).await {
                return Err(e);
            }
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            run_session(&mut controller, stdin).await?;
            Ok(())
        }
        Command::Show { url } => {
            let client = HttpApiClient::from_settings(&settings)?;
            let mut controller = PopupController::new(client, surface_for(settings.output_format));
            controller.open(&tab_sources(url)).await
        }
        Command::Vote { url, direction } => {
            let client = HttpApiClient::from_settings(&settings)?;
            let mut controller = PopupController::new(client, surface_for(settings.output_format));
            controller.open(&FixedTab(url)).await?;
            let button = match direction {
                Direction::Up => VoteButton::Credible,
                Direction::Down => VoteButton::NotCredible,
            };
            controller.click(button).await.map(|_| ())
        }
        Command::Remove { url } => {
            let client = HttpApiClient::from_settings(&settings)?;
            remove_vote(&client, &url).await?;
            println!("Vote removed for {url}");
            Ok(())
        }
        Command::MyVotes => {
            let client = HttpApiClient::from_settings(&settings)?;
            let votes = list_my_votes(&client).await?;
            match settings.output_format {
                OutputFormat::Json => {
                    let raw = serde_json::to_string(&votes)
                        .map_err(|e| PopupError::Settings(format!("Failed to serialize votes: {e}")))?;
                    println!("{raw}");
                }
                OutputFormat::Text => println!("{}", format_vote_table(&votes).trim_end()),
            }
            Ok(())
        }
    }
}

fn run_settings(config_root: &str, action: SettingsAction) -> Result<(), PopupError> {
    let settings = match action {
        SettingsAction::Show => load_settings_from_disk(config_root),
        SettingsAction::Set { assignment } => {
            parse_assignment(&assignment).and_then(|patch| save_settings_to_disk(config_root, patch))
        }
    }
    .map_err(PopupError::Settings)?;

    let raw = serde_json::to_string_pretty(&settings)
        .map_err(|e| PopupError::Settings(format!("Failed to serialize settings: {e}")))?;
    println!("{raw}");
    Ok(())
}

fn tab_sources(url: Option<String>) -> TabChain {
    let chain = TabChain::new();
    let chain = match url {
        Some(url) => chain.with(FixedTab(url)),
        None => chain,
    };
    chain.with(EnvTab::default())
}

fn surface_for(format: OutputFormat) -> AnySurface<std::io::Stdout> {
    match format {
        OutputFormat::Text => AnySurface::Text(TextSurface::new(std::io::stdout())),
        OutputFormat::Json => AnySurface::Json(JsonSurface::new(std::io::stdout())),
    }
}

fn init_logging(cli_level: Option<&str>, settings_level: &str) {
    let mut builder = match cli_level {
        Some(level) => {
            let mut builder = env_logger::Builder::new();
            builder.parse_filters(level);
            builder
        }
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(settings_level)),
    };
    let _ = builder.try_init();
}

fn default_config_root() -> String {
    std::env::var("HOME").unwrap_or_else(|_| ".".to_string())
}
