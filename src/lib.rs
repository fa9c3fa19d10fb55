//! Token factory: permissionless creation of namespaced denoms of the form
//! `factory/{creator}/{subdenom}`, with admin-gated mint, burn, force transfer
//! and metadata updates.
//!
//! The [`keeper::Keeper`] holds the module logic over any
//! [`cosmwasm_std::Storage`] and a [`traits::Ledger`]. With the `multi-test`
//! feature, [`multi_test`] exposes it to `cw-multi-test` apps both as a
//! Stargate module and as contract bindings.

pub mod bindings;
pub mod config;
pub mod denom;
pub mod error;
pub mod fee;
pub mod gas;
pub mod genesis;
pub mod keeper;
pub mod state;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_helpers;

#[cfg(feature = "multi-test")]
pub mod multi_test;

pub use config::TokenFactoryConfig;
pub use error::{TokenFactoryError, TokenFactoryResult};
pub use keeper::Keeper;
pub use types::{Capability, DenomAuthorityMetadata, GenesisDenom, GenesisState, Metadata, Params};

// Re-exports for convenience
pub use osmosis_std;

#[cfg(feature = "multi-test")]
pub use cw_multi_test;
