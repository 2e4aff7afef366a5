// ABOUTME: Caddie CLI - interactive terminal front end for the agent caddie
// ABOUTME: Collects club distances, asks shot questions, prints recommendations, and records outcomes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Caddie CLI
//!
//! Usage:
//! ```bash
//! # Enter carry distances for each club
//! caddie-cli update --user-id player-1
//!
//! # Get a club for a shot, then record how it went
//! caddie-cli shot --user-id player-1
//!
//! # Print the question schema
//! caddie-cli questions
//! ```

mod commands;
mod helpers;

use agent_caddie::{
    config::CaddieConfig,
    errors::AppResult,
    logging::LoggingConfig,
    services::CaddieService,
};
use clap::{Parser, Subcommand};
use tracing::debug;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "caddie-cli",
    about = "Agent Caddie CLI",
    long_about = "Interactive caddie: record club distances, get club recommendations, and log shot outcomes."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Enter carry distances for the standard clubs
    Update {
        /// Player identifier
        #[arg(long)]
        user_id: String,
    },

    /// Get a recommendation for one shot and record the outcome
    Shot {
        /// Player identifier
        #[arg(long)]
        user_id: String,
    },

    /// Print the question schema as JSON
    Questions,
}

fn connect() -> Result<CaddieService> {
    let config = CaddieConfig::from_env()?;
    debug!("{}", config.summary());
    CaddieService::from_config(&config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::for_cli();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init()?;

    match cli.command {
        Command::Update { user_id } => commands::update::run(&connect()?, &user_id).await?,
        Command::Shot { user_id } => commands::shot::run(&connect()?, &user_id).await?,
        Command::Questions => commands::questions::run()?,
    }

    Ok(())
}
