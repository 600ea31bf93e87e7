//! lnxauth CLI - Google sign-in starter for Linux
//!
//! Provides commands for:
//! - Signing in with a Google account (browser-based PKCE flow)
//! - Signing out and clearing the stored session
//! - Showing the stored session

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{LoginCommand, LogoutCommand, StatusCommand};
use lnxauth_core::config::Config;
use output::Output;

#[derive(Debug, Parser)]
#[command(name = "lnxauth", version, about = "Google sign-in starter for Linux")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in with a Google account
    Login(LoginCommand),
    /// Sign out and clear the stored session
    Logout(LogoutCommand),
    /// Show the stored session
    Status(StatusCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load_or_default(&config_path);

    // Setup tracing; -v flags override the configured level
    let filter = match cli.verbose {
        0 => config.logging.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let out = Output::from_json_flag(cli.json);

    match cli.command {
        Commands::Login(cmd) => cmd.execute(&config, &out).await,
        Commands::Logout(cmd) => cmd.execute(&config, &out).await,
        Commands::Status(cmd) => cmd.execute(&config, &out).await,
    }
}
