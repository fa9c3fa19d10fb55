use anyhow::{bail, Result as AnyResult};
use cosmwasm_std::{
    from_json, AllBalanceResponse, Addr, Api, BalanceResponse, BankMsg, BankQuery, BlockInfo, Coin, CustomMsg, CustomQuery, Empty,
    Querier, QuerierWrapper, QueryRequest, Storage, SupplyResponse, Uint128,
};
use cw_multi_test::{BankSudo, CosmosRouter};
use cw_storage_plus::Map;
use serde::de::DeserializeOwned;

use crate::traits::{CommunityPoolKeeper, Ledger};
use crate::types::Metadata;

/// The multi-test bank keeps no denom metadata, so it lives here.
const DENOM_METADATA: Map<&str, Metadata> = Map::new("tokenfactory_bank/metadata");

fn load_metadata(storage: &dyn Storage, denom: &str) -> AnyResult<Option<Metadata>> {
    Ok(DENOM_METADATA.may_load(storage, denom)?)
}

/// [`Ledger`] backed by the multi-test bank module, reached through the app
/// router. Mints go through [`BankSudo::Mint`], burns and sends are executed
/// as bank messages on behalf of the account being debited.
pub struct RouterLedger<'a, ExecC, QueryC> {
    api: &'a dyn Api,
    router: &'a dyn CosmosRouter<ExecC = ExecC, QueryC = QueryC>,
    block: &'a BlockInfo,
    community_pool: Addr,
}

impl<'a, ExecC, QueryC> RouterLedger<'a, ExecC, QueryC>
where
    ExecC: CustomMsg + DeserializeOwned + 'static,
    QueryC: CustomQuery + DeserializeOwned + 'static,
{
    pub fn new(
        api: &'a dyn Api,
        router: &'a dyn CosmosRouter<ExecC = ExecC, QueryC = QueryC>,
        block: &'a BlockInfo,
        community_pool: Addr,
    ) -> Self {
        Self {
            api,
            router,
            block,
            community_pool,
        }
    }

    fn query_bank<T: DeserializeOwned>(&self, storage: &dyn Storage, query: BankQuery) -> AnyResult<T> {
        let raw = self.router.query(self.api, storage, self.block, QueryRequest::Bank(query))?;
        Ok(from_json(raw)?)
    }

    fn execute_bank(&self, storage: &mut dyn Storage, sender: &Addr, msg: BankMsg) -> AnyResult<()> {
        self.router.execute(self.api, storage, self.block, sender.clone(), msg.into())?;
        Ok(())
    }
}

impl<ExecC, QueryC> Ledger for RouterLedger<'_, ExecC, QueryC>
where
    ExecC: CustomMsg + DeserializeOwned + 'static,
    QueryC: CustomQuery + DeserializeOwned + 'static,
{
    fn balance(&self, storage: &dyn Storage, address: &Addr, denom: &str) -> AnyResult<Uint128> {
        let res: BalanceResponse = self.query_bank(
            storage,
            BankQuery::Balance {
                address: address.to_string(),
                denom: denom.to_string(),
            },
        )?;
        Ok(res.amount.amount)
    }

    fn all_balances(&self, storage: &dyn Storage, address: &Addr) -> AnyResult<Vec<Coin>> {
        let res: AllBalanceResponse = self.query_bank(
            storage,
            BankQuery::AllBalances {
                address: address.to_string(),
            },
        )?;
        Ok(res.amount)
    }

    fn supply_of(&self, storage: &dyn Storage, denom: &str) -> AnyResult<Uint128> {
        let res: SupplyResponse = self.query_bank(
            storage,
            BankQuery::Supply {
                denom: denom.to_string(),
            },
        )?;
        Ok(res.amount.amount)
    }

    fn mint_coins(&self, storage: &mut dyn Storage, to: &Addr, coins: Vec<Coin>) -> AnyResult<()> {
        let mint = BankSudo::Mint {
            to_address: to.to_string(),
            amount: coins,
        };
        self.router.sudo(self.api, storage, self.block, mint.into())?;
        Ok(())
    }

    fn burn_coins(&self, storage: &mut dyn Storage, from: &Addr, coins: Vec<Coin>) -> AnyResult<()> {
        self.execute_bank(storage, from, BankMsg::Burn { amount: coins })
    }

    fn send_coins(&self, storage: &mut dyn Storage, from: &Addr, to: &Addr, coins: Vec<Coin>) -> AnyResult<()> {
        self.execute_bank(
            storage,
            from,
            BankMsg::Send {
                to_address: to.to_string(),
                amount: coins,
            },
        )
    }

    fn denom_metadata(&self, storage: &dyn Storage, denom: &str) -> AnyResult<Option<Metadata>> {
        load_metadata(storage, denom)
    }

    fn set_denom_metadata(&self, storage: &mut dyn Storage, metadata: Metadata) -> AnyResult<()> {
        DENOM_METADATA.save(storage, &metadata.base, &metadata)?;
        Ok(())
    }
}

impl<ExecC, QueryC> CommunityPoolKeeper for RouterLedger<'_, ExecC, QueryC>
where
    ExecC: CustomMsg + DeserializeOwned + 'static,
    QueryC: CustomQuery + DeserializeOwned + 'static,
{
    fn fund_community_pool(&self, storage: &mut dyn Storage, from: &Addr, coins: Vec<Coin>) -> AnyResult<()> {
        self.send_coins(storage, from, &self.community_pool, coins)
    }
}

/// Read-only [`Ledger`] for module queries, which only get a querier.
pub struct QuerierLedger<'a> {
    querier: QuerierWrapper<'a, Empty>,
}

impl<'a> QuerierLedger<'a> {
    pub fn new(querier: &'a dyn Querier) -> Self {
        Self {
            querier: QuerierWrapper::new(querier),
        }
    }
}

impl Ledger for QuerierLedger<'_> {
    fn balance(&self, _storage: &dyn Storage, address: &Addr, denom: &str) -> AnyResult<Uint128> {
        Ok(self.querier.query_balance(address, denom)?.amount)
    }

    fn all_balances(&self, _storage: &dyn Storage, address: &Addr) -> AnyResult<Vec<Coin>> {
        Ok(self.querier.query_all_balances(address)?)
    }

    fn supply_of(&self, _storage: &dyn Storage, denom: &str) -> AnyResult<Uint128> {
        Ok(self.querier.query_supply(denom)?.amount)
    }

    fn mint_coins(&self, _storage: &mut dyn Storage, to: &Addr, _coins: Vec<Coin>) -> AnyResult<()> {
        bail!("cannot mint to {to} while serving a query")
    }

    fn burn_coins(&self, _storage: &mut dyn Storage, from: &Addr, _coins: Vec<Coin>) -> AnyResult<()> {
        bail!("cannot burn from {from} while serving a query")
    }

    fn send_coins(&self, _storage: &mut dyn Storage, from: &Addr, _to: &Addr, _coins: Vec<Coin>) -> AnyResult<()> {
        bail!("cannot send from {from} while serving a query")
    }

    fn denom_metadata(&self, storage: &dyn Storage, denom: &str) -> AnyResult<Option<Metadata>> {
        load_metadata(storage, denom)
    }

    fn set_denom_metadata(&self, _storage: &mut dyn Storage, metadata: Metadata) -> AnyResult<()> {
        bail!("cannot set metadata of {} while serving a query", metadata.base)
    }
}

impl CommunityPoolKeeper for QuerierLedger<'_> {
    fn fund_community_pool(&self, _storage: &mut dyn Storage, from: &Addr, _coins: Vec<Coin>) -> AnyResult<()> {
        bail!("cannot fund the community pool from {from} while serving a query")
    }
}
