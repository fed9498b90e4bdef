//! Configuration loading, environment resolution, and template generation.
//!
//! This module provides:
//!
//! - [`Config`] — Raw deployment configuration matching the TOML file.
//! - [`load_config`] — Reads, parses, and env-resolves a TOML file.
//! - [`generate_default_config`] — Produces a commented TOML template.
//!
//! # Configuration File Format
//!
//! ```toml
//! app_name = "streamsphere"
//! project_id = "$WALLETCONNECT_PROJECT_ID"
//! wallets = ["injected", "wallet-connect", "coinbase"]
//!
//! [networks.1]
//! name = "Ethereum"
//! currency = { name = "Ether", symbol = "ETH" }
//! public_rpc = "https://cloudflare-eth.com"
//!
//! [[providers]]
//! service = "infura"
//! api_key = "$INFURA_API_KEY"
//!
//! [[providers]]
//! service = "public"
//! ```
//!
//! Credentials and the integration identifier support `$VAR` / `${VAR}`
//! environment references so secret values stay out of the file itself.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chain::{NetworksConfig, ProviderEntry, mainnet, polygon, polygon_mumbai};
use crate::connector::{ConnectorKind, default_wallet_kinds};
use crate::error::Error;

/// Raw deployment configuration (matches the TOML file).
///
/// Validation happens in [`ConnectionConfig::configure`]; this type only
/// carries what was written down.
///
/// [`ConnectionConfig::configure`]: crate::setup::ConnectionConfig::configure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Display name shown to wallets during pairing.
    pub app_name: String,
    /// Integration identifier grouping this application's connection
    /// requests at the pairing relay. Supports `$VAR` / `${VAR}`.
    pub project_id: String,
    /// Wallet connectors offered by the control, in display order.
    #[serde(default = "default_wallet_kinds")]
    pub wallets: Vec<ConnectorKind>,
    /// Supported networks keyed by decimal chain id.
    #[serde(default = "default_networks")]
    pub networks: NetworksConfig,
    /// Ordered provider strategies; the last entry must be `public`.
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderEntry>,
}

/// Default network line-up when the `[networks]` section is omitted.
fn default_networks() -> NetworksConfig {
    NetworksConfig(vec![mainnet(), polygon(), polygon_mumbai()])
}

fn default_providers() -> Vec<ProviderEntry> {
    vec![ProviderEntry::Public]
}

/// Resolve an environment-variable reference (`$VAR` or `${VAR}`),
/// returning the literal string unchanged if it matches neither pattern.
fn resolve_ref(value: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<String, Error> {
    // ${VAR} syntax
    if let Some(name) = value.strip_prefix("${").and_then(|v| v.strip_suffix('}')) {
        return lookup(name).ok_or_else(|| {
            Error::config(format!(
                "env var '{name}' not found (referenced as '{value}')"
            ))
        });
    }
    // $VAR syntax
    if let Some(name) = value.strip_prefix('$') {
        if !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return lookup(name).ok_or_else(|| {
                Error::config(format!(
                    "env var '{name}' not found (referenced as '{value}')"
                ))
            });
        }
    }
    // Literal value
    Ok(value.to_owned())
}

/// Resolve env references in-place.
///
/// Keyed provider credentials soft-fail to `None` — the entry is skipped
/// at routing time and the public fallback covers the network. The
/// integration identifier hard-fails, since nothing can stand in for it.
fn resolve_references(
    config: &mut Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), Error> {
    config.project_id = resolve_ref(&config.project_id, &lookup)?;

    for entry in &mut config.providers {
        let service = entry.service_name();
        let (ProviderEntry::Infura { api_key } | ProviderEntry::Alchemy { api_key }) = entry
        else {
            continue;
        };
        let Some(raw) = api_key.take() else { continue };
        match resolve_ref(&raw, &lookup) {
            Ok(key) if !key.trim().is_empty() => *api_key = Some(key),
            Ok(_) => {
                tracing::warn!(service, "empty credential, keyed provider entry will be skipped");
            }
            Err(e) => {
                tracing::warn!(
                    service,
                    "credential unavailable ({e}), keyed provider entry will be skipped"
                );
            }
        }
    }

    Ok(())
}

/// Load configuration from a TOML file at the given path.
///
/// Environment references in credentials and the integration identifier
/// are resolved here, so the returned [`Config`] holds final values.
///
/// # Errors
///
/// Returns an error if the file cannot be resolved, read, or parsed, or
/// if the integration identifier references an unset environment variable.
pub fn load_config(path: &Path) -> Result<Config, Error> {
    let config_path = path
        .canonicalize()
        .map_err(|e| Error::config_with(format!("failed to resolve config path '{}'", path.display()), e))?;
    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        Error::config_with(
            format!("failed to read config file '{}'", config_path.display()),
            e,
        )
    })?;
    let mut config: Config = toml::from_str(&content).map_err(|e| {
        Error::config_with(
            format!("failed to parse TOML config '{}'", config_path.display()),
            e,
        )
    })?;
    resolve_references(&mut config, |name| std::env::var(name).ok())?;
    Ok(config)
}

/// Generate a default TOML configuration template.
#[must_use]
pub fn generate_default_config() -> String {
    r#"# Wallet connection configuration
# Values support environment variable references: "$VAR" or "${VAR}"
# (a .env file next to the binary works as well).

# Display name shown to wallets during pairing.
app_name = "streamsphere"

# Integration identifier for the wallet pairing relay.
# Keep the real value out of source control.
project_id = "$WALLETCONNECT_PROJECT_ID"

# Wallet connectors offered by the connect control, in display order.
wallets = ["injected", "wallet-connect", "coinbase"]

# ── Networks ────────────────────────────────────────────────────────
# Keyed by decimal chain id. Omitting the whole section gives the
# default line-up (Ethereum mainnet, Polygon, Polygon Mumbai).

[networks.1]
name = "Ethereum"
currency = { name = "Ether", symbol = "ETH", decimals = 18 }
public_rpc = "https://cloudflare-eth.com"

[networks.137]
name = "Polygon"
currency = { name = "MATIC", symbol = "MATIC", decimals = 18 }
public_rpc = "https://polygon-rpc.com"

[networks.80001]
name = "Polygon Mumbai"
currency = { name = "MATIC", symbol = "MATIC", decimals = 18 }
testnet = true
public_rpc = "https://rpc-mumbai.maticvigil.com"

# ── Provider strategies ─────────────────────────────────────────────
# Tried in order per network; the final entry must be the public
# fallback so resolution never fails on a missing credential.

[[providers]]
service = "infura"
api_key = "$INFURA_API_KEY"

[[providers]]
service = "public"
"#
    .to_owned()
}

/// Sample configuration for tests across the crate.
#[cfg(test)]
pub(crate) fn sample_config() -> Config {
    Config {
        app_name: "streamsphere".to_owned(),
        project_id: "test-project".to_owned(),
        wallets: default_wallet_kinds(),
        networks: default_networks(),
        providers: vec![
            ProviderEntry::Infura {
                api_key: Some("deadbeef".to_owned()),
            },
            ProviderEntry::Public,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn default_template_parses() {
        let mut config: Config =
            toml::from_str(&generate_default_config()).expect("template parses");
        assert_eq!(config.app_name, "streamsphere");
        assert_eq!(config.networks.len(), 3);
        assert_eq!(config.providers.len(), 2);
        assert!(config.providers[1].is_public());

        // Template references unset env vars: the credential degrades to
        // None, the integration identifier refuses to load.
        let err = resolve_references(&mut config, no_env).expect_err("project id must fail");
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn braced_and_bare_references_resolve() {
        let lookup = |name: &str| (name == "KEY").then(|| "secret".to_owned());
        assert_eq!(resolve_ref("$KEY", lookup).expect("resolves"), "secret");
        assert_eq!(resolve_ref("${KEY}", lookup).expect("resolves"), "secret");
    }

    #[test]
    fn literals_pass_through_unchanged() {
        assert_eq!(
            resolve_ref("plain-value", no_env).expect("literal ok"),
            "plain-value"
        );
        // A lone "$" or malformed reference stays literal too.
        assert_eq!(resolve_ref("$", no_env).expect("literal ok"), "$");
        assert_eq!(
            resolve_ref("cost is $5/mo", no_env).expect("literal ok"),
            "cost is $5/mo"
        );
    }

    #[test]
    fn missing_credential_degrades_to_none() {
        let mut config = sample_config();
        config.providers = vec![
            ProviderEntry::Infura {
                api_key: Some("$UNSET_INFURA_KEY".to_owned()),
            },
            ProviderEntry::Public,
        ];
        resolve_references(&mut config, no_env).expect("soft failure only");
        assert_eq!(
            config.providers[0],
            ProviderEntry::Infura { api_key: None }
        );
    }

    #[test]
    fn omitted_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            app_name = "streamsphere"
            project_id = "proj-123"
            "#,
        )
        .expect("parses");
        assert_eq!(config.networks.len(), 3);
        assert_eq!(config.providers, vec![ProviderEntry::Public]);
        assert_eq!(config.wallets, default_wallet_kinds());
    }
}
