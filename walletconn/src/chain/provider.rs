//! Provider strategies and endpoint routing.
//!
//! A provider strategy is an ordered list of [`ProviderEntry`] values tried
//! in order per network; the first entry that yields an endpoint wins, the
//! rest stay as fallbacks. Keyed entries that lack a credential or do not
//! serve a chain are skipped rather than failing the whole network, which
//! is why the configured list must end with [`ProviderEntry::Public`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use super::network::NetworkDescriptor;
use crate::error::Error;

/// One RPC provider strategy entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "service", rename_all = "kebab-case")]
pub enum ProviderEntry {
    /// Infura keyed endpoints.
    Infura {
        /// API key; `None` after load when the credential was missing.
        #[serde(default)]
        api_key: Option<String>,
    },
    /// Alchemy keyed endpoints.
    Alchemy {
        /// API key; `None` after load when the credential was missing.
        #[serde(default)]
        api_key: Option<String>,
    },
    /// The network's own public endpoint; needs no credential.
    Public,
}

impl ProviderEntry {
    /// `true` for the credential-free fallback entry.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }

    /// Service name as it appears in configuration.
    #[must_use]
    pub const fn service_name(&self) -> &'static str {
        match self {
            Self::Infura { .. } => "infura",
            Self::Alchemy { .. } => "alchemy",
            Self::Public => "public",
        }
    }

    /// Candidate endpoint for `network`, or `None` when this entry cannot
    /// serve it (missing credential, or chain unknown to a keyed service).
    fn endpoint(&self, network: &NetworkDescriptor) -> Option<Url> {
        match self {
            Self::Infura { api_key } => {
                let key = api_key.as_deref()?;
                let host = infura_host(network.chain_id)?;
                Url::parse(&format!("https://{host}.infura.io/v3/{key}")).ok()
            }
            Self::Alchemy { api_key } => {
                let key = api_key.as_deref()?;
                let host = alchemy_host(network.chain_id)?;
                Url::parse(&format!("https://{host}.g.alchemy.com/v2/{key}")).ok()
            }
            Self::Public => Some(network.public_rpc.clone()),
        }
    }
}

/// Infura subdomain for a chain id.
const fn infura_host(chain_id: u64) -> Option<&'static str> {
    match chain_id {
        1 => Some("mainnet"),
        137 => Some("polygon-mainnet"),
        80001 => Some("polygon-mumbai"),
        _ => None,
    }
}

/// Alchemy subdomain for a chain id.
const fn alchemy_host(chain_id: u64) -> Option<&'static str> {
    match chain_id {
        1 => Some("eth-mainnet"),
        137 => Some("polygon-mainnet"),
        80001 => Some("polygon-mumbai"),
        _ => None,
    }
}

/// Chain id → ordered candidate RPC endpoints, most preferred first.
///
/// Built once from the validated configuration and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTable(BTreeMap<u64, Vec<Url>>);

impl RoutingTable {
    /// Resolves every network against the ordered provider entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Provider`] if a network ends up with no endpoint
    /// at all. With a trailing public entry this cannot happen, since the
    /// public endpoint comes from the network descriptor itself.
    pub fn build(
        networks: &[NetworkDescriptor],
        providers: &[ProviderEntry],
    ) -> Result<Self, Error> {
        let mut table = BTreeMap::new();
        for network in networks {
            let mut endpoints = Vec::with_capacity(providers.len());
            for entry in providers {
                match entry.endpoint(network) {
                    Some(url) => endpoints.push(url),
                    None => tracing::debug!(
                        chain_id = network.chain_id,
                        service = entry.service_name(),
                        "provider entry skipped"
                    ),
                }
            }
            if endpoints.is_empty() {
                return Err(Error::provider(format!(
                    "no endpoint resolves for chain {} ({})",
                    network.chain_id, network.name
                )));
            }
            table.insert(network.chain_id, endpoints);
        }
        Ok(Self(table))
    }

    /// Ordered endpoints for `chain_id`, or `None` for unknown chains.
    #[must_use]
    pub fn endpoints(&self, chain_id: u64) -> Option<&[Url]> {
        self.0.get(&chain_id).map(Vec::as_slice)
    }

    /// Number of routed networks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no network is routed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(chain id, endpoints)` pairs in chain id order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &[Url])> {
        self.0.iter().map(|(id, urls)| (*id, urls.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::network::{mainnet, polygon_mumbai};

    #[test]
    fn keyed_entry_resolves_before_public_fallback() {
        let providers = vec![
            ProviderEntry::Infura {
                api_key: Some("deadbeef".to_owned()),
            },
            ProviderEntry::Public,
        ];
        let table = RoutingTable::build(&[mainnet()], &providers).expect("routes");

        let endpoints = table.endpoints(1).expect("chain 1 routed");
        assert_eq!(endpoints.len(), 2);
        assert_eq!(
            endpoints[0].as_str(),
            "https://mainnet.infura.io/v3/deadbeef"
        );
        assert_eq!(endpoints[1], mainnet().public_rpc);
    }

    #[test]
    fn missing_credential_falls_through_to_public() {
        // Keyed entry without a usable credential: both networks must still
        // resolve, via the public endpoint only.
        let networks = [mainnet(), polygon_mumbai()];
        let providers = vec![ProviderEntry::Infura { api_key: None }, ProviderEntry::Public];
        let table = RoutingTable::build(&networks, &providers).expect("routes");

        for network in &networks {
            let endpoints = table.endpoints(network.chain_id).expect("routed");
            assert_eq!(endpoints.len(), 1);
            assert_eq!(endpoints[0], network.public_rpc);
        }
    }

    #[test]
    fn keyed_service_skips_chains_it_does_not_serve() {
        let exotic = NetworkDescriptor {
            chain_id: 4242,
            name: "Exotic".to_owned(),
            currency: mainnet().currency,
            testnet: false,
            public_rpc: Url::parse("https://rpc.exotic.example").expect("static URL"),
        };
        let providers = vec![
            ProviderEntry::Alchemy {
                api_key: Some("deadbeef".to_owned()),
            },
            ProviderEntry::Public,
        ];
        let table = RoutingTable::build(&[exotic.clone()], &providers).expect("routes");

        let endpoints = table.endpoints(4242).expect("routed");
        assert_eq!(endpoints, &[exotic.public_rpc]);
    }

    #[test]
    fn network_without_any_endpoint_is_an_error() {
        // No public fallback and a keyed service that cannot serve the
        // chain: resolution fails for that network.
        let exotic = NetworkDescriptor {
            chain_id: 4242,
            name: "Exotic".to_owned(),
            currency: mainnet().currency,
            testnet: false,
            public_rpc: Url::parse("https://rpc.exotic.example").expect("static URL"),
        };
        let providers = vec![ProviderEntry::Infura {
            api_key: Some("deadbeef".to_owned()),
        }];
        let err = RoutingTable::build(&[exotic], &providers).expect_err("must fail");
        assert!(matches!(err, Error::Provider(_)));
    }
}
