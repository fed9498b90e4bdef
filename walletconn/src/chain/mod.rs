//! Blockchain network descriptors and RPC endpoint routing.
//!
//! - [`network`] — [`NetworkDescriptor`] with chain-id-keyed TOML
//!   (de)serialisation, plus the deployment presets.
//! - [`provider`] — [`ProviderEntry`] strategies and the [`RoutingTable`]
//!   mapping each chain id to its ordered endpoint candidates.

mod network;
mod provider;

pub use self::network::*;
pub use self::provider::*;
