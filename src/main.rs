use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::{Input, Password};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

use shlink_clip::cli::{Cli, Commands, ConfigCommand};
use shlink_clip::config::{Config, ConfigFile, ConfigKey, Overrides, mask_secret};
use shlink_clip::extract::extract;
use shlink_clip::host::{Host, SystemHost};
use shlink_clip::utils::paths::get_config_path;
use shlink_clip::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => get_config_path()?,
    };
    let overrides = cli.overrides();
    debug!(config = %config_path.display(), "Loaded command line");

    let command = cli.command.clone().unwrap_or(Commands::Shorten {
        text: None,
        print: false,
    });

    match command {
        Commands::Shorten { text, print } => {
            handle_shorten(config_path, overrides, text, print, cli.quiet).await
        }
        Commands::Extract { text } => Ok(handle_extract(text, cli.quiet)),
        Commands::Config { command } => {
            handle_config(command, &config_path, &overrides)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn handle_shorten(
    config_path: PathBuf,
    overrides: Overrides,
    text: Option<String>,
    print: bool,
    quiet: bool,
) -> Result<ExitCode> {
    let provider = ConfigFile::new(config_path, overrides);
    let mut workflow = Workflow::new(SystemHost::new(quiet), provider);

    let outcome = match text {
        Some(text) => workflow.run_with_text(&text).await,
        None => workflow.run().await,
    };

    if print && let Some(short) = outcome.short_url() {
        println!("{}", short.short_url);
    }

    Ok(outcome.exit_code())
}

fn handle_extract(text: Option<String>, quiet: bool) -> ExitCode {
    let mut host = SystemHost::new(quiet);
    let text = text.unwrap_or_else(|| host.read_clipboard());

    match extract(&text) {
        Some(url) => {
            println!("{url}");
            ExitCode::SUCCESS
        }
        None => {
            host.notify("No URL found");
            ExitCode::from(1)
        }
    }
}

fn handle_config(command: ConfigCommand, path: &Path, overrides: &Overrides) -> Result<()> {
    match command {
        ConfigCommand::Path => println!("{}", path.display()),
        ConfigCommand::Show => {
            let config = ConfigFile::new(path.to_path_buf(), overrides.clone()).load()?;
            println!("{}: {}", ConfigKey::InstanceUrl, display_or_unset(&config.instance_url));
            println!("{}: {}", ConfigKey::ApiKey, mask_secret(&config.api_key));
            println!("{}: {}", ConfigKey::TimeoutSecs, config.timeout_secs);
        }
        ConfigCommand::Set { key, value } => {
            let mut config = Config::load_from(path)?;
            config.set(key, &value)?;
            config.save_to(path)?;
            println!("✓ {key} saved to {}", path.display());
        }
        ConfigCommand::Init => {
            let mut config = Config::load_from(path)?;

            let instance_url: String = Input::new()
                .with_prompt("Shlink instance URL")
                .with_initial_text(config.instance_url.clone())
                .validate_with(|input: &String| -> Result<(), String> {
                    url::Url::parse(input.trim())
                        .map(|_| ())
                        .map_err(|e| format!("Not a valid URL: {e}"))
                })
                .interact_text()
                .context("Failed to read instance URL")?;
            config.set(ConfigKey::InstanceUrl, &instance_url)?;

            let api_key = Password::new()
                .with_prompt("API key (empty keeps the current one)")
                .allow_empty_password(true)
                .interact()
                .context("Failed to read API key")?;
            if !api_key.trim().is_empty() {
                config.set(ConfigKey::ApiKey, &api_key)?;
            }

            config.save_to(path)?;
            println!("✓ Settings saved to {}", path.display());
        }
    }

    Ok(())
}

fn display_or_unset(value: &str) -> &str {
    if value.is_empty() { "(not set)" } else { value }
}
