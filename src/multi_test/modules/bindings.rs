use anyhow::{bail, Result as AnyResult};
use cosmwasm_std::{to_json_binary, Addr, Api, Binary, BlockInfo, CustomMsg, CustomQuery, Empty, Querier, Storage};
use cw_multi_test::{AppResponse, CosmosRouter, Module};
use serde::de::DeserializeOwned;

use crate::bindings::{
    AdminResponse, DenomsByCreatorResponse, FullDenomResponse, MetadataResponse, ParamsResponse, TokenFactoryMsg, TokenFactoryQuery,
};
use crate::error::TokenFactoryError;
use crate::multi_test::modules::TokenFactory;

/// Custom module serving [`TokenFactoryMsg`] and [`TokenFactoryQuery`] from
/// contracts. Shares state and gas meter with the wrapped [`TokenFactory`].
#[derive(Clone, Default)]
pub struct TokenFactoryBindings {
    pub factory: TokenFactory,
}

impl TokenFactoryBindings {
    pub fn new(factory: TokenFactory) -> Self {
        Self { factory }
    }
}

impl Module for TokenFactoryBindings {
    type ExecT = TokenFactoryMsg;
    type QueryT = TokenFactoryQuery;
    type SudoT = Empty;

    fn execute<ExecC, QueryC>(
        &self,
        api: &dyn Api,
        storage: &mut dyn Storage,
        router: &dyn CosmosRouter<ExecC = ExecC, QueryC = QueryC>,
        block: &BlockInfo,
        sender: Addr,
        msg: Self::ExecT,
    ) -> AnyResult<AppResponse>
    where
        ExecC: CustomMsg + DeserializeOwned + 'static,
        QueryC: CustomQuery + DeserializeOwned + 'static,
    {
        let factory = &self.factory;
        let sender = sender.as_str();

        match msg {
            TokenFactoryMsg::CreateDenom { subdenom, metadata } => {
                let (denom, mut res) = factory.create_denom(api, storage, router, block, sender, &subdenom)?;
                if let Some(mut metadata) = metadata {
                    metadata.base = denom;
                    let metadata_res = factory.set_denom_metadata(api, storage, router, block, sender, metadata)?;
                    res.events.extend(metadata_res.events);
                }
                Ok(res)
            }
            TokenFactoryMsg::ChangeAdmin {
                denom,
                new_admin_address,
            } => factory.change_admin(api, storage, router, block, sender, &denom, &new_admin_address),
            TokenFactoryMsg::MintTokens {
                denom,
                amount,
                mint_to_address,
            } => factory.mint(api, storage, router, block, sender, &denom, amount, &mint_to_address),
            TokenFactoryMsg::BurnTokens {
                denom,
                amount,
                burn_from_address,
            } => factory.burn(api, storage, router, block, sender, &denom, amount, &burn_from_address),
            TokenFactoryMsg::ForceTransfer {
                denom,
                amount,
                from_address,
                to_address,
            } => factory.force_transfer(api, storage, router, block, sender, &denom, amount, &from_address, &to_address),
            TokenFactoryMsg::SetMetadata { denom, metadata } => {
                if metadata.base != denom {
                    return Err(TokenFactoryError::InvalidMetadata(format!(
                        "metadata base {} does not match denom {denom}",
                        metadata.base
                    ))
                    .into());
                }
                factory.set_denom_metadata(api, storage, router, block, sender, metadata)
            }
        }
    }

    fn query(
        &self,
        _api: &dyn Api,
        storage: &dyn Storage,
        querier: &dyn Querier,
        _block: &BlockInfo,
        request: Self::QueryT,
    ) -> AnyResult<Binary> {
        let factory = &self.factory;

        let res = match request {
            TokenFactoryQuery::FullDenom { creator_addr, subdenom } => {
                let denom = factory.read(storage, querier, |keeper, _| keeper.full_denom(&creator_addr, &subdenom))?;
                to_json_binary(&FullDenomResponse { denom })?
            }
            TokenFactoryQuery::Admin { denom } => {
                let authority = factory.read(storage, querier, |keeper, storage| keeper.authority_metadata(storage, &denom))?;
                to_json_binary(&AdminResponse { admin: authority.admin })?
            }
            TokenFactoryQuery::Metadata { denom } => {
                let metadata = factory.read(storage, querier, |keeper, storage| {
                    Ok(keeper.ledger().denom_metadata(storage, &denom)?)
                })?;
                to_json_binary(&MetadataResponse { metadata })?
            }
            TokenFactoryQuery::DenomsByCreator { creator } => {
                let denoms = factory.read(storage, querier, |keeper, storage| keeper.denoms_from_creator(storage, &creator))?;
                to_json_binary(&DenomsByCreatorResponse { denoms })?
            }
            TokenFactoryQuery::Params {} => {
                let params = factory.read(storage, querier, |keeper, storage| keeper.params(storage))?;
                to_json_binary(&ParamsResponse { params })?
            }
        };

        Ok(res)
    }

    fn sudo<ExecC, QueryC>(
        &self,
        _api: &dyn Api,
        _storage: &mut dyn Storage,
        _router: &dyn CosmosRouter<ExecC = ExecC, QueryC = QueryC>,
        _block: &BlockInfo,
        _msg: Self::SudoT,
    ) -> AnyResult<AppResponse>
    where
        ExecC: CustomMsg + DeserializeOwned + 'static,
        QueryC: CustomQuery + DeserializeOwned + 'static,
    {
        bail!("Token factory bindings have no sudo handlers")
    }
}
