//! Warden daemon: entry point for running the bot.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use warden_bot::{Bot, BotConfig};
use warden_explorer::{ExplorerClient, ExplorerConfig};
use warden_store::JsonStore;
use warden_types::{UserId, WardenError};
use warden_utils::{init_logging, LogFormat};

#[derive(Parser)]
#[command(name = "warden", about = "Community moderation and wallet-lookup bot")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the JSON documents.
    #[arg(long, env = "WARDEN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// The operator allowed to manage the blacklist and issue keys.
    #[arg(long, env = "WARDEN_OWNER_ID")]
    owner_id: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "WARDEN_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long)]
    log_format: Option<String>,

    /// Explorer REST base URL.
    #[arg(long, env = "BLOCKCHAIN_API_BASE")]
    explorer_base: Option<String>,

    /// Explorer API token.
    #[arg(long, env = "BLOCKCHAIN_API_TOKEN", hide_env_values = true)]
    explorer_token: Option<String>,

    /// Bot login token.
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Connect to the gateway and serve events.
    Run,
    /// Print the effective configuration as TOML and exit.
    Config,
}

impl Cli {
    /// File settings (or defaults) with flags and env vars layered on top.
    fn bot_config(&self) -> anyhow::Result<BotConfig> {
        let base = match &self.config {
            Some(path) => BotConfig::from_toml_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => BotConfig::default(),
        };
        let config = BotConfig {
            data_dir: self.data_dir.clone().unwrap_or(base.data_dir.clone()),
            owner_id: self
                .owner_id
                .as_deref()
                .map(UserId::new)
                .unwrap_or(base.owner_id.clone()),
            log_level: self.log_level.clone().unwrap_or(base.log_level.clone()),
            log_format: self
                .log_format
                .as_deref()
                .map(LogFormat::parse)
                .unwrap_or(base.log_format),
            explorer_base: self
                .explorer_base
                .clone()
                .unwrap_or(base.explorer_base.clone()),
            explorer_token: self.explorer_token.clone().or(base.explorer_token.clone()),
            ..base
        };
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.bot_config()?;
    init_logging(config.log_format, &config.log_level);

    match cli.command {
        Command::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
        }
        Command::Run => {
            let token = cli
                .token
                .filter(|t| !t.trim().is_empty())
                .ok_or_else(|| WardenError::Config("DISCORD_TOKEN is not set".into()))?;

            tracing::info!(
                data_dir = %config.data_dir.display(),
                owner = %config.owner_id,
                "starting Warden"
            );

            let store = JsonStore::open(&config.data_dir)
                .map_err(|e| WardenError::Storage(e.to_string()))?;
            let explorer = ExplorerClient::new(ExplorerConfig {
                base_url: config.explorer_base.clone(),
                token: config.explorer_token.clone(),
            })?;
            tracing::info!(base = explorer.base_url(), "explorer configured");

            let bot = Arc::new(Bot::new(config, store, Arc::new(explorer)));
            warden_gateway::run(&token, bot)
                .await
                .map_err(|e| WardenError::Gateway(e.to_string()))?;

            tracing::info!("Warden exited cleanly");
        }
    }

    Ok(())
}
