use std::collections::BTreeSet;

use cosmwasm_std::{Api, StdResult, Storage};

use crate::config::TokenFactoryConfig;
use crate::denom::deconstruct_denom;
use crate::error::{TokenFactoryError, TokenFactoryResult};
use crate::keeper::Keeper;
use crate::state::{DENOM_AUTHORITIES, FACTORY_DENOMS};
use crate::types::{GenesisDenom, GenesisState};

impl GenesisState {
    /// Checks params and that every listed denom is a well formed, unique
    /// factory denom with either no admin or a valid admin address.
    pub fn validate(&self, api: &dyn Api, cfg: &TokenFactoryConfig) -> TokenFactoryResult<()> {
        self.params.validate()?;

        let mut seen = BTreeSet::new();
        for entry in &self.factory_denoms {
            if !seen.insert(entry.denom.as_str()) {
                return Err(TokenFactoryError::InvalidGenesis(format!("duplicate denom: {}", entry.denom)));
            }
            deconstruct_denom(cfg, &entry.denom)
                .map_err(|err| TokenFactoryError::InvalidGenesis(err.to_string()))?;

            let admin = &entry.authority_metadata.admin;
            if !admin.is_empty() {
                api.addr_validate(admin).map_err(|err| {
                    TokenFactoryError::InvalidGenesis(format!("invalid admin {admin} for {}: {err}", entry.denom))
                })?;
            }
        }

        Ok(())
    }
}

/// Loads a genesis state into a fresh store.
///
/// Denoms already known to the ledger keep their metadata; the others get the
/// same minimal metadata `create_denom` would have registered. A denom already
/// registered in the store is rejected before anything is written.
pub fn init_genesis(
    keeper: &Keeper,
    api: &dyn Api,
    storage: &mut dyn Storage,
    genesis: &GenesisState,
) -> TokenFactoryResult<()> {
    genesis.validate(api, keeper.config())?;
    if let Some(entry) = genesis
        .factory_denoms
        .iter()
        .find(|entry| DENOM_AUTHORITIES.has(storage, &entry.denom))
    {
        return Err(TokenFactoryError::InvalidGenesis(format!("denom already exists: {}", entry.denom)));
    }

    keeper.set_params(storage, &genesis.params)?;

    for entry in &genesis.factory_denoms {
        keeper.register_denom(storage, &entry.denom, &entry.authority_metadata)?;
    }

    tracing::info!(denoms = genesis.factory_denoms.len(), "initialized tokenfactory genesis");

    Ok(())
}

/// Exports params and every factory denom in creation order.
pub fn export_genesis(keeper: &Keeper, storage: &dyn Storage) -> TokenFactoryResult<GenesisState> {
    let denoms = FACTORY_DENOMS.iter(storage)?.collect::<StdResult<Vec<_>>>()?;

    let factory_denoms = denoms
        .into_iter()
        .map(|denom| {
            let authority_metadata = DENOM_AUTHORITIES.load(storage, &denom)?;
            Ok(GenesisDenom {
                denom,
                authority_metadata,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(GenesisState {
        params: keeper.params(storage)?,
        factory_denoms,
    })
}
