use anyhow::{bail, Result as AnyResult};
use cosmwasm_std::{Addr, Coin, Order, StdResult, Storage, Uint128};
use cw_storage_plus::Map;

use crate::traits::{CommunityPoolKeeper, Ledger};
use crate::types::Metadata;

pub const CREATOR: &str = "creator";
pub const OTHER: &str = "other";

const BALANCES: Map<(&Addr, &str), Uint128> = Map::new("test_bank/balances");
const SUPPLY: Map<&str, Uint128> = Map::new("test_bank/supply");
const METADATA: Map<&str, Metadata> = Map::new("test_bank/metadata");
const COMMUNITY_POOL: Map<&str, Uint128> = Map::new("test_bank/community_pool");

/// Storage-backed bank used by the keeper unit tests.
#[derive(Default)]
pub struct MemoryLedger;

impl MemoryLedger {
    pub fn fund(&self, storage: &mut dyn Storage, address: &str, coins: &[Coin]) {
        self.mint_coins(storage, &Addr::unchecked(address), coins.to_vec()).unwrap();
    }

    pub fn community_pool_balance(&self, storage: &dyn Storage, denom: &str) -> Uint128 {
        COMMUNITY_POOL.may_load(storage, denom).unwrap().unwrap_or_default()
    }

    fn debit(&self, storage: &mut dyn Storage, from: &Addr, coin: &Coin) -> AnyResult<()> {
        let balance = self.balance(storage, from, &coin.denom)?;
        if balance < coin.amount {
            bail!("insufficient {} balance for {from}: {balance} < {}", coin.denom, coin.amount);
        }
        BALANCES.save(storage, (from, coin.denom.as_str()), &(balance - coin.amount))?;
        Ok(())
    }

    fn credit(&self, storage: &mut dyn Storage, to: &Addr, coin: &Coin) -> AnyResult<()> {
        BALANCES.update(storage, (to, coin.denom.as_str()), |balance| -> StdResult<_> {
            Ok(balance.unwrap_or_default() + coin.amount)
        })?;
        Ok(())
    }
}

impl Ledger for MemoryLedger {
    fn balance(&self, storage: &dyn Storage, address: &Addr, denom: &str) -> AnyResult<Uint128> {
        Ok(BALANCES.may_load(storage, (address, denom))?.unwrap_or_default())
    }

    fn all_balances(&self, storage: &dyn Storage, address: &Addr) -> AnyResult<Vec<Coin>> {
        let coins = BALANCES
            .prefix(address)
            .range(storage, None, None, Order::Ascending)
            .filter(|item| !matches!(item, Ok((_, amount)) if amount.is_zero()))
            .map(|item| item.map(|(denom, amount)| Coin { denom, amount }))
            .collect::<StdResult<Vec<_>>>()?;
        Ok(coins)
    }

    fn supply_of(&self, storage: &dyn Storage, denom: &str) -> AnyResult<Uint128> {
        Ok(SUPPLY.may_load(storage, denom)?.unwrap_or_default())
    }

    fn mint_coins(&self, storage: &mut dyn Storage, to: &Addr, coins: Vec<Coin>) -> AnyResult<()> {
        for coin in &coins {
            self.credit(storage, to, coin)?;
            SUPPLY.update(storage, &coin.denom, |supply| -> StdResult<_> {
                Ok(supply.unwrap_or_default() + coin.amount)
            })?;
        }
        Ok(())
    }

    fn burn_coins(&self, storage: &mut dyn Storage, from: &Addr, coins: Vec<Coin>) -> AnyResult<()> {
        for coin in &coins {
            self.debit(storage, from, coin)?;
            let supply = self.supply_of(storage, &coin.denom)?;
            SUPPLY.save(storage, &coin.denom, &supply.checked_sub(coin.amount)?)?;
        }
        Ok(())
    }

    fn send_coins(&self, storage: &mut dyn Storage, from: &Addr, to: &Addr, coins: Vec<Coin>) -> AnyResult<()> {
        for coin in &coins {
            self.debit(storage, from, coin)?;
            self.credit(storage, to, coin)?;
        }
        Ok(())
    }

    fn denom_metadata(&self, storage: &dyn Storage, denom: &str) -> AnyResult<Option<Metadata>> {
        Ok(METADATA.may_load(storage, denom)?)
    }

    fn set_denom_metadata(&self, storage: &mut dyn Storage, metadata: Metadata) -> AnyResult<()> {
        METADATA.save(storage, &metadata.base, &metadata)?;
        Ok(())
    }
}

impl CommunityPoolKeeper for MemoryLedger {
    fn fund_community_pool(&self, storage: &mut dyn Storage, from: &Addr, coins: Vec<Coin>) -> AnyResult<()> {
        for coin in &coins {
            self.debit(storage, from, coin)?;
            COMMUNITY_POOL.update(storage, &coin.denom, |pool| -> StdResult<_> {
                Ok(pool.unwrap_or_default() + coin.amount)
            })?;
        }
        Ok(())
    }
}
