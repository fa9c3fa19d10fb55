use std::str::FromStr;

use anyhow::{anyhow, bail, Result as AnyResult};
use cosmwasm_std::{
    to_json_binary, Addr, Api, Binary, BlockInfo, CustomMsg, CustomQuery, Empty, Event, Querier, Storage, Uint128,
};
use cw_multi_test::{AppResponse, CosmosRouter, Module, Stargate, StargateMsg, StargateQuery};
use osmosis_std::types::cosmos::bank::v1beta1::Metadata as ProtoMetadata;
use osmosis_std::types::cosmos::base::v1beta1::Coin as ProtoCoin;
use osmosis_std::types::osmosis::tokenfactory::v1beta1::{
    DenomAuthorityMetadata as ProtoAuthorityMetadata, MsgBurn, MsgBurnResponse, MsgChangeAdmin, MsgChangeAdminResponse,
    MsgCreateDenom, MsgCreateDenomResponse, MsgForceTransfer, MsgForceTransferResponse, MsgMint, MsgMintResponse,
    MsgSetDenomMetadata, MsgSetDenomMetadataResponse,
    Params as ProtoParams, QueryDenomAuthorityMetadataRequest, QueryDenomAuthorityMetadataResponse, QueryDenomsFromCreatorRequest,
    QueryDenomsFromCreatorResponse, QueryParamsRequest, QueryParamsResponse,
};
use prost::Message;
use serde::de::DeserializeOwned;

use crate::config::TokenFactoryConfig;
use crate::error::TokenFactoryResult;
use crate::gas::SharedGasMeter;
use crate::genesis;
use crate::keeper::Keeper;
use crate::multi_test::ledger::{QuerierLedger, RouterLedger};
use crate::multi_test::modules::{
    QUERY_DENOMS_FROM_CREATOR_PATH, QUERY_DENOM_AUTHORITY_METADATA_PATH, QUERY_PARAMS_PATH,
};
use crate::types::{DenomUnit, GenesisState, Metadata, Params};

/// Implements the [`cw_multi_test::Stargate`] trait on top of [`Keeper`],
/// mimicking the Osmosis token factory module.
///
/// All state lives in the app storage; the struct only carries the static
/// config and the gas meter shared with the test driving the app.
#[derive(Clone, Default)]
pub struct TokenFactory {
    pub config: TokenFactoryConfig,
    pub gas: SharedGasMeter,
}

impl TokenFactory {
    pub fn new(config: TokenFactoryConfig) -> Self {
        Self {
            config,
            gas: SharedGasMeter::default(),
        }
    }

    pub fn with_gas_meter(mut self, gas: SharedGasMeter) -> Self {
        self.gas = gas;
        self
    }

    fn community_pool(&self) -> Addr {
        Addr::unchecked(&self.config.community_pool)
    }

    /// Runs `f` against a keeper wired to the app bank through `router`.
    pub(crate) fn run<ExecC, QueryC, T>(
        &self,
        api: &dyn Api,
        storage: &mut dyn Storage,
        router: &dyn CosmosRouter<ExecC = ExecC, QueryC = QueryC>,
        block: &BlockInfo,
        f: impl FnOnce(&Keeper, &mut dyn Storage) -> TokenFactoryResult<T>,
    ) -> AnyResult<T>
    where
        ExecC: CustomMsg + DeserializeOwned + 'static,
        QueryC: CustomQuery + DeserializeOwned + 'static,
    {
        let ledger = RouterLedger::new(api, router, block, self.community_pool());
        let keeper = Keeper::new(&self.config, &ledger, &ledger);
        Ok(f(&keeper, storage)?)
    }

    /// Runs read-only `f` against a keeper backed by `querier`.
    pub(crate) fn read<T>(
        &self,
        storage: &dyn Storage,
        querier: &dyn Querier,
        f: impl FnOnce(&Keeper, &dyn Storage) -> TokenFactoryResult<T>,
    ) -> AnyResult<T> {
        let ledger = QuerierLedger::new(querier);
        let keeper = Keeper::new(&self.config, &ledger, &ledger);
        Ok(f(&keeper, storage)?)
    }

    pub fn create_denom<ExecC, QueryC>(
        &self,
        api: &dyn Api,
        storage: &mut dyn Storage,
        router: &dyn CosmosRouter<ExecC = ExecC, QueryC = QueryC>,
        block: &BlockInfo,
        creator: &str,
        subdenom: &str,
    ) -> AnyResult<(String, AppResponse)>
    where
        ExecC: CustomMsg + DeserializeOwned + 'static,
        QueryC: CustomQuery + DeserializeOwned + 'static,
    {
        let (denom, event) = self.run(api, storage, router, block, |keeper, storage| {
            self.gas.with(|meter| {
                meter.reset();
                keeper.create_denom(storage, meter, creator, subdenom)
            })?
        })?;

        let data = MsgCreateDenomResponse {
            new_token_denom: denom.clone(),
        };
        Ok((denom, response(event, data.into())))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn mint<ExecC, QueryC>(
        &self,
        api: &dyn Api,
        storage: &mut dyn Storage,
        router: &dyn CosmosRouter<ExecC = ExecC, QueryC = QueryC>,
        block: &BlockInfo,
        sender: &str,
        denom: &str,
        amount: Uint128,
        mint_to: &str,
    ) -> AnyResult<AppResponse>
    where
        ExecC: CustomMsg + DeserializeOwned + 'static,
        QueryC: CustomQuery + DeserializeOwned + 'static,
    {
        let mint_to = optional_addr(api, mint_to)?;
        let event = self.run(api, storage, router, block, |keeper, storage| {
            keeper.mint(storage, sender, denom, amount, mint_to.as_ref().map(Addr::as_str))
        })?;
        Ok(response(event, MsgMintResponse {}.into()))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn burn<ExecC, QueryC>(
        &self,
        api: &dyn Api,
        storage: &mut dyn Storage,
        router: &dyn CosmosRouter<ExecC = ExecC, QueryC = QueryC>,
        block: &BlockInfo,
        sender: &str,
        denom: &str,
        amount: Uint128,
        burn_from: &str,
    ) -> AnyResult<AppResponse>
    where
        ExecC: CustomMsg + DeserializeOwned + 'static,
        QueryC: CustomQuery + DeserializeOwned + 'static,
    {
        let burn_from = optional_addr(api, burn_from)?;
        let event = self.run(api, storage, router, block, |keeper, storage| {
            keeper.burn(storage, sender, denom, amount, burn_from.as_ref().map(Addr::as_str))
        })?;
        Ok(response(event, MsgBurnResponse {}.into()))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn change_admin<ExecC, QueryC>(
        &self,
        api: &dyn Api,
        storage: &mut dyn Storage,
        router: &dyn CosmosRouter<ExecC = ExecC, QueryC = QueryC>,
        block: &BlockInfo,
        sender: &str,
        denom: &str,
        new_admin: &str,
    ) -> AnyResult<AppResponse>
    where
        ExecC: CustomMsg + DeserializeOwned + 'static,
        QueryC: CustomQuery + DeserializeOwned + 'static,
    {
        let new_admin = optional_addr(api, new_admin)?.map(String::from).unwrap_or_default();
        let event = self.run(api, storage, router, block, |keeper, storage| {
            keeper.change_admin(storage, sender, denom, &new_admin)
        })?;
        Ok(response(event, MsgChangeAdminResponse {}.into()))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn force_transfer<ExecC, QueryC>(
        &self,
        api: &dyn Api,
        storage: &mut dyn Storage,
        router: &dyn CosmosRouter<ExecC = ExecC, QueryC = QueryC>,
        block: &BlockInfo,
        sender: &str,
        denom: &str,
        amount: Uint128,
        from: &str,
        to: &str,
    ) -> AnyResult<AppResponse>
    where
        ExecC: CustomMsg + DeserializeOwned + 'static,
        QueryC: CustomQuery + DeserializeOwned + 'static,
    {
        let from = api.addr_validate(from)?;
        let to = api.addr_validate(to)?;
        let event = self.run(api, storage, router, block, |keeper, storage| {
            keeper.force_transfer(storage, sender, denom, amount, from.as_str(), to.as_str())
        })?;
        Ok(response(event, MsgForceTransferResponse {}.into()))
    }

    pub fn set_denom_metadata<ExecC, QueryC>(
        &self,
        api: &dyn Api,
        storage: &mut dyn Storage,
        router: &dyn CosmosRouter<ExecC = ExecC, QueryC = QueryC>,
        block: &BlockInfo,
        sender: &str,
        metadata: Metadata,
    ) -> AnyResult<AppResponse>
    where
        ExecC: CustomMsg + DeserializeOwned + 'static,
        QueryC: CustomQuery + DeserializeOwned + 'static,
    {
        let event = self.run(api, storage, router, block, |keeper, storage| {
            keeper.set_denom_metadata(storage, sender, metadata)
        })?;
        Ok(response(event, MsgSetDenomMetadataResponse {}.into()))
    }

    /// Governance params update, signed by the configured authority.
    pub fn update_params<ExecC, QueryC>(
        &self,
        api: &dyn Api,
        storage: &mut dyn Storage,
        router: &dyn CosmosRouter<ExecC = ExecC, QueryC = QueryC>,
        block: &BlockInfo,
        sender: &str,
        params: &Params,
    ) -> AnyResult<AppResponse>
    where
        ExecC: CustomMsg + DeserializeOwned + 'static,
        QueryC: CustomQuery + DeserializeOwned + 'static,
    {
        let event = self.run(api, storage, router, block, |keeper, storage| {
            keeper.update_params(storage, sender, params)
        })?;
        let mut res = AppResponse::default();
        res.events.push(event);
        Ok(res)
    }

    pub fn init_genesis<ExecC, QueryC>(
        &self,
        api: &dyn Api,
        storage: &mut dyn Storage,
        router: &dyn CosmosRouter<ExecC = ExecC, QueryC = QueryC>,
        block: &BlockInfo,
        genesis: &GenesisState,
    ) -> AnyResult<()>
    where
        ExecC: CustomMsg + DeserializeOwned + 'static,
        QueryC: CustomQuery + DeserializeOwned + 'static,
    {
        self.run(api, storage, router, block, |keeper, storage| {
            genesis::init_genesis(keeper, api, storage, genesis)
        })
    }

    pub fn export_genesis(&self, storage: &dyn Storage, querier: &dyn Querier) -> AnyResult<GenesisState> {
        self.read(storage, querier, |keeper, storage| genesis::export_genesis(keeper, storage))
    }

    #[allow(clippy::too_many_arguments)]
    fn handle_any<ExecC, QueryC>(
        &self,
        api: &dyn Api,
        storage: &mut dyn Storage,
        router: &dyn CosmosRouter<ExecC = ExecC, QueryC = QueryC>,
        block: &BlockInfo,
        sender: Addr,
        type_url: String,
        value: Binary,
    ) -> AnyResult<AppResponse>
    where
        ExecC: CustomMsg + DeserializeOwned + 'static,
        QueryC: CustomQuery + DeserializeOwned + 'static,
    {
        match type_url.as_str() {
            MsgCreateDenom::TYPE_URL => {
                let msg: MsgCreateDenom = value.try_into()?;
                ensure_signer(&msg.sender, &sender)?;
                Ok(self.create_denom(api, storage, router, block, &msg.sender, &msg.subdenom)?.1)
            }
            MsgMint::TYPE_URL => {
                let msg: MsgMint = value.try_into()?;
                ensure_signer(&msg.sender, &sender)?;
                let (denom, amount) = parse_coin(msg.amount)?;
                self.mint(api, storage, router, block, &msg.sender, &denom, amount, &msg.mint_to_address)
            }
            MsgBurn::TYPE_URL => {
                let msg: MsgBurn = value.try_into()?;
                ensure_signer(&msg.sender, &sender)?;
                let (denom, amount) = parse_coin(msg.amount)?;
                self.burn(api, storage, router, block, &msg.sender, &denom, amount, &msg.burn_from_address)
            }
            MsgChangeAdmin::TYPE_URL => {
                let msg: MsgChangeAdmin = value.try_into()?;
                ensure_signer(&msg.sender, &sender)?;
                self.change_admin(api, storage, router, block, &msg.sender, &msg.denom, &msg.new_admin)
            }
            MsgForceTransfer::TYPE_URL => {
                let msg: MsgForceTransfer = value.try_into()?;
                ensure_signer(&msg.sender, &sender)?;
                let (denom, amount) = parse_coin(msg.amount)?;
                self.force_transfer(
                    api,
                    storage,
                    router,
                    block,
                    &msg.sender,
                    &denom,
                    amount,
                    &msg.transfer_from_address,
                    &msg.transfer_to_address,
                )
            }
            MsgSetDenomMetadata::TYPE_URL => {
                let msg: MsgSetDenomMetadata = value.try_into()?;
                ensure_signer(&msg.sender, &sender)?;
                let metadata = msg.metadata.ok_or_else(|| anyhow!("metadata is required"))?;
                self.set_denom_metadata(api, storage, router, block, &msg.sender, metadata_from_proto(metadata))
            }
            _ => bail!("Unknown message type {}", type_url),
        }
    }
}

impl Module for TokenFactory {
    type ExecT = StargateMsg;
    type QueryT = StargateQuery;
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
        let StargateMsg { type_url, value, .. } = msg;

        self.handle_any(api, storage, router, block, sender, type_url, value)
    }

    fn query(
        &self,
        _api: &dyn Api,
        storage: &dyn Storage,
        querier: &dyn Querier,
        _block: &BlockInfo,
        request: Self::QueryT,
    ) -> AnyResult<Binary> {
        let data = request.data.as_slice();

        match request.path.as_str() {
            QUERY_PARAMS_PATH => {
                QueryParamsRequest::decode(data)?;
                let params = self.read(storage, querier, |keeper, storage| keeper.params(storage))?;
                let res = QueryParamsResponse {
                    params: Some(ProtoParams {
                        denom_creation_fee: params
                            .denom_creation_fee
                            .into_iter()
                            .map(|coin| ProtoCoin {
                                denom: coin.denom,
                                amount: coin.amount.to_string(),
                            })
                            .collect(),
                        denom_creation_gas_consume: params.denom_creation_gas_consume,
                    }),
                };
                Ok(to_json_binary(&res)?)
            }
            QUERY_DENOM_AUTHORITY_METADATA_PATH => {
                let req = QueryDenomAuthorityMetadataRequest::decode(data)?;
                let authority = self.read(storage, querier, |keeper, storage| keeper.authority_metadata(storage, &req.denom))?;
                let res = QueryDenomAuthorityMetadataResponse {
                    authority_metadata: Some(ProtoAuthorityMetadata { admin: authority.admin }),
                };
                Ok(to_json_binary(&res)?)
            }
            QUERY_DENOMS_FROM_CREATOR_PATH => {
                let req = QueryDenomsFromCreatorRequest::decode(data)?;
                let denoms = self.read(storage, querier, |keeper, storage| keeper.denoms_from_creator(storage, &req.creator))?;
                Ok(to_json_binary(&QueryDenomsFromCreatorResponse { denoms })?)
            }
            path => Err(anyhow!("Unexpected stargate query: path={}, data={:?}", path, request.data)),
        }
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
        bail!("Token factory has no sudo handlers")
    }
}

impl Stargate for TokenFactory {}

fn response(event: Event, data: Binary) -> AppResponse {
    let mut res = AppResponse::default();
    res.events.push(event);
    res.data = Some(data);
    res
}

fn ensure_signer(msg_sender: &str, tx_sender: &Addr) -> AnyResult<()> {
    if msg_sender != tx_sender.as_str() {
        bail!("Invalid sender. Sender in msg must be same as sender of transaction.");
    }
    Ok(())
}

fn optional_addr(api: &dyn Api, addr: &str) -> AnyResult<Option<Addr>> {
    if addr.is_empty() {
        return Ok(None);
    }
    Ok(Some(api.addr_validate(addr)?))
}

fn metadata_from_proto(metadata: ProtoMetadata) -> Metadata {
    Metadata {
        description: metadata.description,
        denom_units: metadata
            .denom_units
            .into_iter()
            .map(|unit| DenomUnit {
                denom: unit.denom,
                exponent: unit.exponent,
                aliases: unit.aliases,
            })
            .collect(),
        base: metadata.base,
        display: metadata.display,
        name: metadata.name,
        symbol: metadata.symbol,
    }
}

fn parse_coin(coin: Option<ProtoCoin>) -> AnyResult<(String, Uint128)> {
    let coin = coin.ok_or_else(|| anyhow!("missing amount"))?;
    let amount = Uint128::from_str(&coin.amount)?;
    Ok((coin.denom, amount))
}
