// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pipa - WhatsApp ordering bot for a gas delivery business.
//!
//! This is the binary entry point: the webhook server, a local shell that
//! talks to the bot as a given phone, and the operator commands.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod console;
mod operator;
mod serve;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pipa_config::PipaConfig;

/// Pipa - WhatsApp ordering bot for a gas delivery business.
#[derive(Parser, Debug)]
#[command(name = "pipa", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the webhook server.
    Serve,
    /// Chat with the bot from the terminal as the given phone.
    Shell {
        #[arg(long)]
        phone: String,
    },
    /// Record a missed delivery for a customer.
    Strike { phone: String },
    /// Promote a customer to the premium category.
    Promote { phone: String },
    /// Ask a customer to confirm receipt of an order.
    ConfirmDelivery {
        phone: String,
        /// Order to confirm; defaults to the customer's last order.
        #[arg(long)]
        order: Option<i64>,
    },
    /// Tell a customer their cylinder reached the plant.
    NotifyPlant { phone: String },
    /// Tell a customer their cylinder is being refilled.
    NotifyRefill { phone: String },
    /// Print the orders waiting for delivery or pickup.
    Route,
}

fn load_config(path: Option<&PathBuf>) -> PipaConfig {
    let loaded = match path {
        Some(path) => pipa_config::load_and_validate_path(path),
        None => pipa_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            pipa_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pipa={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());
    init_tracing(&config.logging.level);

    let result = match cli.command {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Shell { phone } => shell::run_shell(config, phone).await,
        Commands::Strike { phone } => operator::strike(config, &phone).await,
        Commands::Promote { phone } => operator::promote(config, &phone).await,
        Commands::ConfirmDelivery { phone, order } => {
            operator::confirm_delivery(config, &phone, order).await
        }
        Commands::NotifyPlant { phone } => operator::notify_plant(config, &phone).await,
        Commands::NotifyRefill { phone } => operator::notify_refill(config, &phone).await,
        Commands::Route => operator::route(config).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_operator_commands() {
        let cli = Cli::parse_from(["pipa", "confirm-delivery", "5215550001", "--order", "7"]);
        match cli.command {
            Commands::ConfirmDelivery { phone, order } => {
                assert_eq!(phone, "5215550001");
                assert_eq!(order, Some(7));
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::parse_from(["pipa", "--config", "/tmp/pipa.toml", "shell", "--phone", "521"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/pipa.toml")));
        assert!(matches!(cli.command, Commands::Shell { ref phone } if phone == "521"));
    }
}
