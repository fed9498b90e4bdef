//! Wallet connection setup CLI.
//!
//! Assembles an immutable wallet-connection configuration — supported
//! networks, RPC provider fallback routing, offered wallet connectors —
//! and renders a connect/disconnect control bound to it.
//!
//! ```sh
//! walletconn init             # Generate default config.toml
//! walletconn check            # Validate config and print routing
//! walletconn run              # Drive the connect control
//! ```

mod button;
mod chain;
mod cmd;
mod config;
mod connector;
mod error;
mod session;
mod setup;
mod telemetry;

use clap::Parser;
use cmd::{Cli, Commands};

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { output, force } => cmd::init::run(&output, force),
        Commands::Check { config } => cmd::check::run(&config),
        Commands::Run { config } => cmd::run::run(&config).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
