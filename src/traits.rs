use anyhow::Result as AnyResult;
use cosmwasm_std::{Addr, Coin, Storage, Uint128};

use crate::types::Metadata;

/// The bank primitives the keeper relies on. Balances, supply and denom
/// metadata are owned by the implementor; the keeper never writes them
/// directly.
pub trait Ledger {
    fn balance(&self, storage: &dyn Storage, address: &Addr, denom: &str) -> AnyResult<Uint128>;

    fn all_balances(&self, storage: &dyn Storage, address: &Addr) -> AnyResult<Vec<Coin>>;

    fn supply_of(&self, storage: &dyn Storage, denom: &str) -> AnyResult<Uint128>;

    fn mint_coins(&self, storage: &mut dyn Storage, to: &Addr, coins: Vec<Coin>) -> AnyResult<()>;

    fn burn_coins(&self, storage: &mut dyn Storage, from: &Addr, coins: Vec<Coin>) -> AnyResult<()>;

    /// Moves coins without consulting `from`'s consent.
    fn send_coins(&self, storage: &mut dyn Storage, from: &Addr, to: &Addr, coins: Vec<Coin>) -> AnyResult<()>;

    fn denom_metadata(&self, storage: &dyn Storage, denom: &str) -> AnyResult<Option<Metadata>>;

    fn set_denom_metadata(&self, storage: &mut dyn Storage, metadata: Metadata) -> AnyResult<()>;
}

pub trait CommunityPoolKeeper {
    fn fund_community_pool(&self, storage: &mut dyn Storage, from: &Addr, coins: Vec<Coin>) -> AnyResult<()>;
}
