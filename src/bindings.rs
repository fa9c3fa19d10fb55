//! Custom message and query bindings for contracts talking to the token
//! factory through `CosmosMsg::Custom` and `QueryRequest::Custom`.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{CosmosMsg, CustomMsg, CustomQuery, QuerierWrapper, QueryRequest, StdResult, Uint128};

use crate::types::{Metadata, Params};

#[cw_serde]
pub enum TokenFactoryMsg {
    /// Creates `factory/{contract}/{subdenom}` with the contract as admin.
    /// The creation fee is taken from the contract's balance.
    CreateDenom {
        subdenom: String,
        metadata: Option<Metadata>,
    },
    /// An empty `new_admin_address` revokes administration.
    ChangeAdmin {
        denom: String,
        new_admin_address: String,
    },
    MintTokens {
        denom: String,
        amount: Uint128,
        mint_to_address: String,
    },
    BurnTokens {
        denom: String,
        amount: Uint128,
        /// Empty burns from the contract itself.
        burn_from_address: String,
    },
    ForceTransfer {
        denom: String,
        amount: Uint128,
        from_address: String,
        to_address: String,
    },
    SetMetadata {
        denom: String,
        metadata: Metadata,
    },
}

impl CustomMsg for TokenFactoryMsg {}

impl From<TokenFactoryMsg> for CosmosMsg<TokenFactoryMsg> {
    fn from(msg: TokenFactoryMsg) -> Self {
        CosmosMsg::Custom(msg)
    }
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum TokenFactoryQuery {
    #[returns(FullDenomResponse)]
    FullDenom { creator_addr: String, subdenom: String },
    #[returns(AdminResponse)]
    Admin { denom: String },
    #[returns(MetadataResponse)]
    Metadata { denom: String },
    #[returns(DenomsByCreatorResponse)]
    DenomsByCreator { creator: String },
    #[returns(ParamsResponse)]
    Params {},
}

impl CustomQuery for TokenFactoryQuery {}

#[cw_serde]
pub struct FullDenomResponse {
    pub denom: String,
}

#[cw_serde]
pub struct AdminResponse {
    pub admin: String,
}

#[cw_serde]
pub struct MetadataResponse {
    pub metadata: Option<Metadata>,
}

#[cw_serde]
pub struct DenomsByCreatorResponse {
    pub denoms: Vec<String>,
}

#[cw_serde]
pub struct ParamsResponse {
    pub params: Params,
}

/// Typed helpers over [`TokenFactoryQuery`].
pub struct TokenFactoryQuerier<'a> {
    querier: &'a QuerierWrapper<'a, TokenFactoryQuery>,
}

impl<'a> TokenFactoryQuerier<'a> {
    pub fn new(querier: &'a QuerierWrapper<'a, TokenFactoryQuery>) -> Self {
        Self { querier }
    }

    pub fn full_denom(&self, creator_addr: impl Into<String>, subdenom: impl Into<String>) -> StdResult<FullDenomResponse> {
        self.query(TokenFactoryQuery::FullDenom {
            creator_addr: creator_addr.into(),
            subdenom: subdenom.into(),
        })
    }

    pub fn admin(&self, denom: impl Into<String>) -> StdResult<AdminResponse> {
        self.query(TokenFactoryQuery::Admin { denom: denom.into() })
    }

    pub fn metadata(&self, denom: impl Into<String>) -> StdResult<MetadataResponse> {
        self.query(TokenFactoryQuery::Metadata { denom: denom.into() })
    }

    pub fn denoms_by_creator(&self, creator: impl Into<String>) -> StdResult<DenomsByCreatorResponse> {
        self.query(TokenFactoryQuery::DenomsByCreator { creator: creator.into() })
    }

    pub fn params(&self) -> StdResult<ParamsResponse> {
        self.query(TokenFactoryQuery::Params {})
    }

    fn query<T: serde::de::DeserializeOwned>(&self, request: TokenFactoryQuery) -> StdResult<T> {
        self.querier.query(&QueryRequest::Custom(request))
    }
}
