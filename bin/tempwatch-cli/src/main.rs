// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tempwatch
//!
//! Checks a host temperature sensor against a threshold and mails an alert
//! when it is exceeded, at most once per cooldown window. Meant to be run
//! from cron.
//!
//! ## Usage
//! ```bash
//! # One check, alerting two recipients above 30 C
//! tempwatch check --maxtemp 30 --email ops@example.com --email oncall@example.com
//!
//! # Same, with settings from a file
//! tempwatch --config /etc/tempwatch.toml check --json
//!
//! # Show threshold, cooldown state, and recent runs
//! tempwatch status
//! ```

mod commands;

use clap::{Parser, Subcommand};
use commands::Overrides;

#[derive(Parser)]
#[command(
    name = "tempwatch",
    about = "Host temperature probe with rate-limited mail alerts",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (flags override its values).
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read the sensor once, notify if needed, and append a run record.
    Check {
        /// Print the outcome as JSON instead of the run record line.
        #[arg(long)]
        json: bool,
    },

    /// Show the configured threshold, cooldown state, and recent runs.
    Status {
        /// Number of run log lines to show (defaults to the configured tail).
        #[arg(short = 'n', long)]
        lines: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    let config = commands::load_config(cli.config.as_deref(), &cli.overrides)?;

    match cli.command {
        Commands::Check { json } => commands::check::execute(config, json).await,
        Commands::Status { lines } => commands::status::execute(config, lines).await,
    }
}
