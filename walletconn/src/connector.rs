//! Wallet connector descriptors.
//!
//! A connector describes one way a user's wallet can authorise a
//! connection (browser extension, mobile pairing over a relay, and so on).
//! The external wallet service consumes the [`ConnectorSet`] to drive its
//! discovery flow; this crate only declares what is on offer.

use serde::{Deserialize, Serialize};

/// Supported wallet connector families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectorKind {
    /// Browser-extension wallets exposing an injected provider.
    Injected,
    /// Mobile wallets pairing over the WalletConnect relay (QR code).
    WalletConnect,
    /// Coinbase Wallet (extension and mobile).
    Coinbase,
}

impl ConnectorKind {
    /// Name shown in the wallet discovery flow.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Injected => "Browser Wallet",
            Self::WalletConnect => "WalletConnect",
            Self::Coinbase => "Coinbase Wallet",
        }
    }
}

/// One offered wallet connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorDescriptor {
    /// Connector family.
    pub kind: ConnectorKind,
    /// Display name.
    pub name: &'static str,
    /// Integration identifier forwarded to the pairing relay. Only
    /// relay-based connectors carry it.
    pub project_id: Option<String>,
}

/// Ordered, de-duplicated set of connectors offered by the control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorSet(Vec<ConnectorDescriptor>);

impl ConnectorSet {
    /// Builds descriptors for `kinds` in order, dropping repeated kinds.
    #[must_use]
    pub fn from_kinds(kinds: &[ConnectorKind], project_id: &str) -> Self {
        let mut seen: Vec<ConnectorKind> = Vec::with_capacity(kinds.len());
        let mut connectors = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            if seen.contains(&kind) {
                tracing::debug!(connector = kind.display_name(), "duplicate connector dropped");
                continue;
            }
            seen.push(kind);
            let project_id = matches!(kind, ConnectorKind::WalletConnect)
                .then(|| project_id.to_owned());
            connectors.push(ConnectorDescriptor {
                kind,
                name: kind.display_name(),
                project_id,
            });
        }
        Self(connectors)
    }

    /// Number of offered connectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when nothing is offered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the connectors in display order.
    pub fn iter(&self) -> impl Iterator<Item = &ConnectorDescriptor> {
        self.0.iter()
    }
}

/// The stock wallet line-up: injected, WalletConnect, Coinbase.
#[must_use]
pub fn default_wallet_kinds() -> Vec<ConnectorKind> {
    vec![
        ConnectorKind::Injected,
        ConnectorKind::WalletConnect,
        ConnectorKind::Coinbase,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_relay_connectors_carry_the_project_id() {
        let set = ConnectorSet::from_kinds(&default_wallet_kinds(), "proj-123");
        assert_eq!(set.len(), 3);
        for connector in set.iter() {
            match connector.kind {
                ConnectorKind::WalletConnect => {
                    assert_eq!(connector.project_id.as_deref(), Some("proj-123"));
                }
                _ => assert!(connector.project_id.is_none()),
            }
        }
    }

    #[test]
    fn repeated_kinds_collapse() {
        let set = ConnectorSet::from_kinds(
            &[
                ConnectorKind::Injected,
                ConnectorKind::Injected,
                ConnectorKind::Coinbase,
            ],
            "proj-123",
        );
        assert_eq!(set.len(), 2);
    }
}
