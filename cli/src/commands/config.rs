// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use podshare_core::domain::config::{PodshareConfig, CONFIG_PATH_ENV};

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets redacted
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

pub fn handle_command(command: ConfigCommand, config_override: Option<PathBuf>) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths),
        ConfigCommand::Validate { file } => validate(file.or(config_override)),
    }
}

fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    let config = PodshareConfig::load_or_default(config_override.clone())
        .context("Failed to load configuration")?;

    if show_paths {
        eprintln!("{}", "Configuration discovery paths:".bold());
        if let Some(path) = &config_override {
            eprintln!("  1. --config flag: {}", path.display());
        } else {
            eprintln!("  1. --config flag: {}", "(not set)".dimmed());
        }
        eprintln!(
            "  2. {}: {}",
            CONFIG_PATH_ENV,
            std::env::var(CONFIG_PATH_ENV)
                .unwrap_or_else(|_| "(not set)".to_string())
                .dimmed()
        );
        eprintln!("  3. ./podshare.yaml");
        eprintln!("  4. ~/.podshare/config.yaml");
        eprintln!("  5. /etc/podshare/config.yaml");
        match config_override.clone().or_else(PodshareConfig::discover_config) {
            Some(path) => eprintln!("  Using: {}", path.display()),
            None => eprintln!("  Using: {}", "(defaults)".dimmed()),
        }
        eprintln!();
    }

    print!("{}", config.redacted().to_yaml_string()?);
    Ok(())
}

fn validate(config_path: Option<PathBuf>) -> Result<()> {
    eprintln!("Validating configuration...");

    let config =
        PodshareConfig::load_or_default(config_path).context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    eprintln!("{}", "✓ Configuration is valid".green());
    if config.agent.is_none() {
        eprintln!(
            "{}",
            "⚠ No agent configured; only read-only commands are available".yellow()
        );
    }
    Ok(())
}
