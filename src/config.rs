//! Static module configuration.
//!
//! Unlike [`Params`](crate::types::Params), which live in storage and change
//! through governance, these values are fixed for the lifetime of a running
//! module. They can be loaded from a YAML file and overridden with
//! `TOKENFACTORY__<FIELD>` environment variables.

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::TokenFactoryResult;

pub const MODULE_DENOM_PREFIX: &str = "factory";
pub const MAX_SUBDENOM_LENGTH: usize = 44;
pub const MAX_HRP_LENGTH: usize = 16;
pub const MAX_CREATOR_LENGTH: usize = 59 + MAX_HRP_LENGTH;
pub const DEFAULT_COMMUNITY_POOL: &str = "community_pool";
pub const DEFAULT_AUTHORITY: &str = "gov";

const ENV_PREFIX: &str = "TOKENFACTORY";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct TokenFactoryConfig {
    pub denom_prefix: String,
    pub max_subdenom_length: usize,
    pub max_hrp_length: usize,
    pub max_creator_length: usize,
    /// Module account credited when community pool fee funding is enabled.
    pub community_pool: String,
    /// Address allowed to update params outside of genesis.
    pub authority: String,
}

impl Default for TokenFactoryConfig {
    fn default() -> Self {
        Self {
            denom_prefix: MODULE_DENOM_PREFIX.to_string(),
            max_subdenom_length: MAX_SUBDENOM_LENGTH,
            max_hrp_length: MAX_HRP_LENGTH,
            max_creator_length: MAX_CREATOR_LENGTH,
            community_pool: DEFAULT_COMMUNITY_POOL.to_string(),
            authority: DEFAULT_AUTHORITY.to_string(),
        }
    }
}

impl TokenFactoryConfig {
    /// Loads the config from an optional YAML file, then applies environment
    /// overrides. Missing keys fall back to [`TokenFactoryConfig::default`].
    pub fn load(path: Option<&Path>) -> TokenFactoryResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Yaml).required(true));
        }

        let cfg = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).prefix_separator("__").try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(cfg)
    }

    /// Parses a YAML document. Environment variables are not consulted.
    pub fn from_yaml(yaml: &str) -> TokenFactoryResult<Self> {
        let cfg = Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()?
            .try_deserialize()?;

        Ok(cfg)
    }
}
