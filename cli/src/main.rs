// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # podshare
//!
//! Command-line client for agents that share resources held in their pods.
//!
//! ## Commands
//!
//! - `podshare grant|revoke|rules` - Manage access to one resource
//! - `podshare share` - Grant access and notify the recipient
//! - `podshare inbox list|delete` - Read and consume sharing notifications
//! - `podshare discover|register` - Query and join the agent directory
//! - `podshare setup-pod` - Create the standard pod containers
//! - `podshare config show|validate` - Configuration management
//!
//! Results are printed to stdout as JSON; logs and status lines go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;

use podshare::commands::{
    self, ConfigCommand, DiscoverCommand, GrantCommand, InboxCommand, RegisterCommand,
    RevokeCommand, RulesCommand, SetupPodCommand, ShareCommand,
};
use podshare::session::PodSession;
use podshare_core::domain::config::PodshareConfig;

/// podshare - capability sharing between agent pods
#[derive(Parser)]
#[command(name = "podshare")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "PODSHARE_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); defaults to the config file's level
    #[arg(long, global = true, env = "PODSHARE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output format; defaults to the config file's format
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Grant an agent access to a resource
    Grant(GrantCommand),

    /// Remove every rule for an agent on a resource
    Revoke(RevokeCommand),

    /// Show the agent rules governing a resource
    Rules(RulesCommand),

    /// Grant access and send a sharing notification
    Share(ShareCommand),

    /// Sharing notifications
    Inbox {
        #[command(subcommand)]
        command: InboxCommand,
    },

    /// Query the agent directory
    Discover(DiscoverCommand),

    /// Register the configured agent in the directory
    Register(RegisterCommand),

    /// Create the standard containers in the agent's pod
    #[command(name = "setup-pod")]
    SetupPod(SetupPodCommand),

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging settings come from the config file unless overridden; a broken
    // config file is reported by the command itself.
    let logging = PodshareConfig::load_or_default(cli.config.clone())
        .map(|config| config.logging)
        .unwrap_or_default();
    let level = cli.log_level.clone().unwrap_or(logging.level);
    let format = cli.log_format.unwrap_or(if logging.format == "json" {
        LogFormat::Json
    } else {
        LogFormat::Text
    });
    init_logging(&level, format)?;

    match cli.command {
        Commands::Config { command } => commands::config::handle_command(command, cli.config),
        command => {
            let session = PodSession::open(cli.config)?;
            debug!(server = %session.config.server_url, "Session opened");
            run(command, &session).await
        }
    }
}

async fn run(command: Commands, session: &PodSession) -> Result<()> {
    match command {
        Commands::Grant(cmd) => commands::access::grant(cmd, session).await,
        Commands::Revoke(cmd) => commands::access::revoke(cmd, session).await,
        Commands::Rules(cmd) => commands::access::rules(cmd, session).await,
        Commands::Share(cmd) => commands::share::execute(cmd, session).await,
        Commands::Inbox { command } => commands::inbox::handle_command(command, session).await,
        Commands::Discover(cmd) => commands::directory::discover(cmd, session).await,
        Commands::Register(cmd) => commands::directory::register(cmd, session).await,
        Commands::SetupPod(cmd) => commands::pod::execute(cmd, session).await,
        Commands::Config { command } => commands::config::handle_command(command, None),
    }
}

/// Initialize tracing subscriber for logging. `RUST_LOG` wins over `level`.
fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.compact().init(),
    }

    Ok(())
}
