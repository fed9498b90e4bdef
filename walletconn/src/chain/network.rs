//! Network descriptors and chain-id-keyed TOML (de)serialisation.

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use url::Url;

/// Native currency of a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    /// Currency name (e.g. "Ether").
    pub name: String,
    /// Ticker symbol (e.g. "ETH").
    pub symbol: String,
    /// Decimal places of the base unit (default: 18).
    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

const fn default_decimals() -> u8 {
    18
}

/// One supported blockchain network.
///
/// Fixed deployment data; never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkDescriptor {
    /// Numeric chain identifier (EIP-155).
    pub chain_id: u64,
    /// Human-readable network name.
    pub name: String,
    /// Native currency of the network.
    pub currency: NativeCurrency,
    /// Whether this is a test network.
    pub testnet: bool,
    /// Public RPC endpoint requiring no credential. This is the
    /// unconditional fallback for the routing table.
    pub public_rpc: Url,
}

/// TOML-level network definition; the chain id is the enclosing map key.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct NetworkEntry {
    name: String,
    currency: NativeCurrency,
    #[serde(default)]
    testnet: bool,
    public_rpc: Url,
}

impl From<&NetworkDescriptor> for NetworkEntry {
    fn from(network: &NetworkDescriptor) -> Self {
        Self {
            name: network.name.clone(),
            currency: network.currency.clone(),
            testnet: network.testnet,
            public_rpc: network.public_rpc.clone(),
        }
    }
}

/// Ordered collection of [`NetworkDescriptor`] entries.
///
/// Serialised as a TOML map keyed by decimal chain id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworksConfig(pub Vec<NetworkDescriptor>);

impl Deref for NetworksConfig {
    type Target = Vec<NetworkDescriptor>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Serialize for NetworksConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for network in &self.0 {
            map.serialize_entry(&network.chain_id.to_string(), &NetworkEntry::from(network))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for NetworksConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use std::fmt;

        use serde::de::{MapAccess, Visitor};

        struct NetworksVisitor;

        impl<'de> Visitor<'de> for NetworksVisitor {
            type Value = NetworksConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of decimal chain ids to network definitions")
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut networks = Vec::with_capacity(access.size_hint().unwrap_or(0));

                while let Some(key) = access.next_key::<String>()? {
                    let chain_id: u64 = key.parse().map_err(|_| {
                        serde::de::Error::custom(format!(
                            "invalid chain id key '{key}' (expected a decimal integer)"
                        ))
                    })?;
                    let entry: NetworkEntry = access.next_value()?;
                    networks.push(NetworkDescriptor {
                        chain_id,
                        name: entry.name,
                        currency: entry.currency,
                        testnet: entry.testnet,
                        public_rpc: entry.public_rpc,
                    });
                }

                Ok(NetworksConfig(networks))
            }
        }

        deserializer.deserialize_map(NetworksVisitor)
    }
}

/// Ethereum mainnet (chain id 1).
#[must_use]
pub fn mainnet() -> NetworkDescriptor {
    NetworkDescriptor {
        chain_id: 1,
        name: "Ethereum".to_owned(),
        currency: NativeCurrency {
            name: "Ether".to_owned(),
            symbol: "ETH".to_owned(),
            decimals: 18,
        },
        testnet: false,
        public_rpc: Url::parse("https://cloudflare-eth.com").expect("static URL"),
    }
}

/// Polygon PoS mainnet (chain id 137).
#[must_use]
pub fn polygon() -> NetworkDescriptor {
    NetworkDescriptor {
        chain_id: 137,
        name: "Polygon".to_owned(),
        currency: NativeCurrency {
            name: "MATIC".to_owned(),
            symbol: "MATIC".to_owned(),
            decimals: 18,
        },
        testnet: false,
        public_rpc: Url::parse("https://polygon-rpc.com").expect("static URL"),
    }
}

/// Polygon Mumbai test network (chain id 80001).
#[must_use]
pub fn polygon_mumbai() -> NetworkDescriptor {
    NetworkDescriptor {
        chain_id: 80001,
        name: "Polygon Mumbai".to_owned(),
        currency: NativeCurrency {
            name: "MATIC".to_owned(),
            symbol: "MATIC".to_owned(),
            decimals: 18,
        },
        testnet: true,
        public_rpc: Url::parse("https://rpc-mumbai.maticvigil.com").expect("static URL"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn networks_map_round_trips() {
        let networks = NetworksConfig(vec![mainnet(), polygon_mumbai()]);
        let toml = toml::to_string(&networks).expect("serialises");
        let parsed: NetworksConfig = toml::from_str(&toml).expect("parses");
        assert_eq!(parsed, networks);
    }

    #[test]
    fn testnet_flag_defaults_to_false() {
        let parsed: NetworksConfig = toml::from_str(
            r#"
            [1]
            name = "Ethereum"
            currency = { name = "Ether", symbol = "ETH" }
            public_rpc = "https://cloudflare-eth.com"
            "#,
        )
        .expect("parses");
        assert_eq!(parsed.len(), 1);
        assert!(!parsed[0].testnet);
        assert_eq!(parsed[0].currency.decimals, 18);
    }

    #[test]
    fn non_numeric_chain_id_key_is_rejected() {
        let result: Result<NetworksConfig, _> = toml::from_str(
            r#"
            [mainnet]
            name = "Ethereum"
            currency = { name = "Ether", symbol = "ETH" }
            public_rpc = "https://cloudflare-eth.com"
            "#,
        );
        let err = result.expect_err("non-numeric key must fail").to_string();
        assert!(err.contains("invalid chain id key"), "got: {err}");
    }
}
