//! `walletconn check` — validate configuration and print the routing.
//!
//! Exits non-zero on any configuration error, so deployments can gate on
//! it before shipping a config file.

use std::path::Path;

use dotenvy::dotenv;

use crate::config::load_config;
use crate::error::Error;
use crate::setup::ConnectionConfig;
use crate::telemetry;

/// Execute the `check` command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or fails
/// validation.
#[allow(clippy::print_stdout)]
pub fn run(config_path: &Path) -> Result<(), Error> {
    dotenv().ok();
    telemetry::init("warn");

    let config = load_config(config_path)?;
    let connection = ConnectionConfig::configure(&config)?;

    println!("app: {}", connection.app_name);
    println!("networks:");
    for network in &connection.networks {
        let flavor = if network.testnet { " (testnet)" } else { "" };
        println!(
            "  {:>8}  {} [{}]{}",
            network.chain_id, network.name, network.currency.symbol, flavor
        );
        // Hosts only; keyed endpoint paths embed credentials.
        for url in connection.routing.endpoints(network.chain_id).unwrap_or(&[]) {
            println!("            {}://{}", url.scheme(), url.host_str().unwrap_or("?"));
        }
    }
    println!("connectors:");
    for connector in connection.connectors.iter() {
        println!("  {}", connector.name);
    }
    Ok(())
}
