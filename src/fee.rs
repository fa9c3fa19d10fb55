//! Denom creation fee: affordability check and routing.

use cosmwasm_std::{Addr, Coin, Storage};

use crate::error::{TokenFactoryError, TokenFactoryResult};
use crate::traits::{CommunityPoolKeeper, Ledger};
use crate::types::{Capability, Params};

/// Where a charged creation fee ends up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeeRoute {
    /// Destroyed; total supply shrinks by the fee.
    Burn,
    /// Credited to the community pool.
    CommunityPool,
}

impl FeeRoute {
    pub fn from_params(params: &Params) -> Self {
        if params.is_enabled(Capability::CommunityPoolFeeFunding) {
            FeeRoute::CommunityPool
        } else {
            FeeRoute::Burn
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeeRoute::Burn => "burn",
            FeeRoute::CommunityPool => "community_pool",
        }
    }
}

/// Settles denom creation fees against a ledger.
pub struct FeeEngine<'a> {
    ledger: &'a dyn Ledger,
    community_pool: &'a dyn CommunityPoolKeeper,
}

impl<'a> FeeEngine<'a> {
    pub fn new(ledger: &'a dyn Ledger, community_pool: &'a dyn CommunityPoolKeeper) -> Self {
        Self { ledger, community_pool }
    }

    /// Fails with `InsufficientFunds` on the first fee coin `payer` cannot
    /// cover. Nothing is written.
    pub fn ensure_affordable(&self, storage: &dyn Storage, payer: &Addr, fee: &[Coin]) -> TokenFactoryResult<()> {
        for coin in fee {
            let available = self.ledger.balance(storage, payer, &coin.denom)?;
            if available < coin.amount {
                return Err(TokenFactoryError::InsufficientFunds {
                    address: payer.to_string(),
                    denom: coin.denom.clone(),
                    available,
                    required: coin.amount,
                });
            }
        }
        Ok(())
    }

    /// Charges the configured creation fee. Returns the route taken, or
    /// `None` when the fee is empty.
    pub fn charge(&self, storage: &mut dyn Storage, payer: &Addr, params: &Params) -> TokenFactoryResult<Option<FeeRoute>> {
        let fee = &params.denom_creation_fee;
        if fee.is_empty() {
            return Ok(None);
        }

        self.ensure_affordable(storage, payer, fee)?;

        let route = FeeRoute::from_params(params);
        match route {
            FeeRoute::CommunityPool => self.community_pool.fund_community_pool(storage, payer, fee.clone())?,
            FeeRoute::Burn => self.ledger.burn_coins(storage, payer, fee.clone())?,
        }

        tracing::debug!(payer = %payer, route = route.as_str(), fee = ?fee, "charged denom creation fee");

        Ok(Some(route))
    }
}
