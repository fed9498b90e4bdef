//! Connection configuration assembly and validation.
//!
//! [`ConnectionConfig::configure`] turns the raw [`Config`] into the
//! immutable object the rendering layer holds for the whole session.
//! Everything that can be rejected is rejected here, before any control
//! is shown.

use std::collections::BTreeSet;

use crate::chain::{NetworkDescriptor, ProviderEntry, RoutingTable};
use crate::config::Config;
use crate::connector::ConnectorSet;
use crate::error::Error;

/// Immutable wallet-connection configuration.
///
/// Assembled once at startup and shared read-only (typically behind an
/// `Arc`) for the lifetime of the application session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Display name shown to wallets during pairing.
    pub app_name: String,
    /// Integration identifier for the pairing relay.
    pub project_id: String,
    /// Supported networks, in configuration order.
    pub networks: Vec<NetworkDescriptor>,
    /// Chain id → ordered endpoint candidates.
    pub routing: RoutingTable,
    /// Wallet connectors offered by the control.
    pub connectors: ConnectorSet,
}

impl ConnectionConfig {
    /// Validates `config` and assembles the immutable configuration.
    ///
    /// Deterministic: identical inputs produce identical routing tables
    /// and connector sets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the application name, integration
    /// identifier, network set, provider list, or wallet list fails
    /// validation, and [`Error::Provider`] when a network cannot resolve
    /// any endpoint.
    pub fn configure(config: &Config) -> Result<Self, Error> {
        if config.app_name.trim().is_empty() {
            return Err(Error::config("app_name must not be empty"));
        }
        if config.project_id.trim().is_empty() {
            return Err(Error::config(
                "project_id must be set; reference an environment variable \
                 (e.g. \"$WALLETCONNECT_PROJECT_ID\") instead of committing the value",
            ));
        }
        if config.networks.is_empty() {
            return Err(Error::config("at least one network must be configured"));
        }
        let mut seen = BTreeSet::new();
        for network in config.networks.iter() {
            if !seen.insert(network.chain_id) {
                return Err(Error::config(format!(
                    "duplicate chain id {} in network set",
                    network.chain_id
                )));
            }
        }
        if config.providers.is_empty() {
            return Err(Error::config(
                "at least one provider entry must be configured",
            ));
        }
        if !config.providers.last().is_some_and(ProviderEntry::is_public) {
            return Err(Error::config(
                "the last provider entry must be the public fallback",
            ));
        }
        if config.wallets.is_empty() {
            return Err(Error::config(
                "at least one wallet connector must be configured",
            ));
        }

        let routing = RoutingTable::build(&config.networks, &config.providers)?;
        let connectors = ConnectorSet::from_kinds(&config.wallets, &config.project_id);

        tracing::info!(
            app = %config.app_name,
            networks = config.networks.len(),
            connectors = connectors.len(),
            "connection configuration assembled"
        );

        Ok(Self {
            app_name: config.app_name.clone(),
            project_id: config.project_id.clone(),
            networks: config.networks.0.clone(),
            routing,
            connectors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{NetworksConfig, mainnet, polygon_mumbai};
    use crate::config::sample_config;

    #[test]
    fn valid_config_assembles() {
        let connection = ConnectionConfig::configure(&sample_config()).expect("assembles");
        assert_eq!(connection.routing.len(), connection.networks.len());
        assert_eq!(connection.connectors.len(), 3);
    }

    #[test]
    fn empty_network_set_is_fatal() {
        let mut config = sample_config();
        config.networks = NetworksConfig(Vec::new());
        let err = ConnectionConfig::configure(&config).expect_err("must fail");
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn duplicate_chain_ids_are_fatal() {
        let mut config = sample_config();
        config.networks = NetworksConfig(vec![mainnet(), mainnet()]);
        let err = ConnectionConfig::configure(&config).expect_err("must fail");
        assert!(err.to_string().contains("duplicate chain id 1"));
    }

    #[test]
    fn provider_list_must_end_public() {
        let mut config = sample_config();
        config.providers = vec![ProviderEntry::Infura {
            api_key: Some("deadbeef".to_owned()),
        }];
        let err = ConnectionConfig::configure(&config).expect_err("must fail");
        assert!(err.to_string().contains("public fallback"));
    }

    #[test]
    fn empty_wallet_list_is_fatal() {
        let mut config = sample_config();
        config.wallets = Vec::new();
        let err = ConnectionConfig::configure(&config).expect_err("must fail");
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn empty_project_id_is_fatal() {
        let mut config = sample_config();
        config.project_id = String::new();
        let err = ConnectionConfig::configure(&config).expect_err("must fail");
        assert!(err.to_string().contains("project_id"));
    }

    #[test]
    fn assembly_is_deterministic() {
        let config = sample_config();
        let first = ConnectionConfig::configure(&config).expect("assembles");
        let second = ConnectionConfig::configure(&config).expect("assembles");
        assert_eq!(first.routing, second.routing);
        assert_eq!(first, second);
    }

    #[test]
    fn missing_credential_still_routes_every_network() {
        let mut config = sample_config();
        config.networks = NetworksConfig(vec![mainnet(), polygon_mumbai()]);
        config.providers = vec![ProviderEntry::Infura { api_key: None }, ProviderEntry::Public];
        let connection = ConnectionConfig::configure(&config).expect("assembles");
        for network in &connection.networks {
            let endpoints = connection.routing.endpoints(network.chain_id).expect("routed");
            assert_eq!(endpoints, &[network.public_rpc.clone()]);
        }
    }
}
