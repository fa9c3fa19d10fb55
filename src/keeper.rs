use cosmwasm_std::{Addr, Coin, Empty, Event, Order, StdResult, Storage, Uint128};

use crate::config::TokenFactoryConfig;
use crate::denom::{build_denom, deconstruct_denom};
use crate::error::{TokenFactoryError, TokenFactoryResult};
use crate::fee::FeeEngine;
use crate::gas::GasMeter;
use crate::state::{CREATOR_DENOMS, DENOM_AUTHORITIES, FACTORY_DENOMS, PARAMS};
use crate::traits::{CommunityPoolKeeper, Ledger};
use crate::types::{Capability, DenomAuthorityMetadata, Metadata, Params};

pub const DENOM_CREATION_GAS_DESCRIPTOR: &str = "consume denom creation gas";

/// The token factory keeper.
///
/// Holds no state of its own: params, capabilities and authority records are
/// read from `storage` on every call, so keepers can be built per message
/// without ever observing stale configuration.
pub struct Keeper<'a> {
    cfg: &'a TokenFactoryConfig,
    ledger: &'a dyn Ledger,
    community_pool: &'a dyn CommunityPoolKeeper,
}

impl<'a> Keeper<'a> {
    pub fn new(cfg: &'a TokenFactoryConfig, ledger: &'a dyn Ledger, community_pool: &'a dyn CommunityPoolKeeper) -> Self {
        Self {
            cfg,
            ledger,
            community_pool,
        }
    }

    pub fn config(&self) -> &TokenFactoryConfig {
        self.cfg
    }

    pub(crate) fn ledger(&self) -> &dyn Ledger {
        self.ledger
    }

    /// Stored params, or the defaults when none have been set yet.
    pub fn params(&self, storage: &dyn Storage) -> TokenFactoryResult<Params> {
        Ok(PARAMS.may_load(storage)?.unwrap_or_default())
    }

    pub fn set_params(&self, storage: &mut dyn Storage, params: &Params) -> TokenFactoryResult<()> {
        params.validate()?;
        PARAMS.save(storage, params)?;
        Ok(())
    }

    /// Governance entry point for replacing params.
    pub fn update_params(&self, storage: &mut dyn Storage, sender: &str, params: &Params) -> TokenFactoryResult<Event> {
        if sender != self.cfg.authority {
            return Err(TokenFactoryError::UnauthorizedAuthority {
                authority: self.cfg.authority.clone(),
                sender: sender.to_string(),
            });
        }
        self.set_params(storage, params)?;

        tracing::info!(
            fee = ?params.denom_creation_fee,
            gas = params.denom_creation_gas_consume,
            capabilities = ?params.enabled_capabilities,
            "updated tokenfactory params"
        );

        Ok(Event::new("update_params").add_attribute("authority", sender))
    }

    fn ensure_capability(&self, storage: &dyn Storage, capability: Capability) -> TokenFactoryResult<()> {
        if !self.params(storage)?.is_enabled(capability) {
            return Err(TokenFactoryError::CapabilityNotEnabled {
                capability: capability.to_string(),
            });
        }
        Ok(())
    }

    pub fn full_denom(&self, creator: &str, subdenom: &str) -> TokenFactoryResult<String> {
        build_denom(self.cfg, creator, subdenom)
    }

    pub fn authority_metadata(&self, storage: &dyn Storage, denom: &str) -> TokenFactoryResult<DenomAuthorityMetadata> {
        DENOM_AUTHORITIES
            .may_load(storage, denom)?
            .ok_or_else(|| TokenFactoryError::InvalidDenom {
                denom: denom.to_string(),
                reason: "denom does not exist".to_string(),
            })
    }

    /// Denoms created by `creator`, ordered by denom.
    pub fn denoms_from_creator(&self, storage: &dyn Storage, creator: &str) -> TokenFactoryResult<Vec<String>> {
        let denoms = CREATOR_DENOMS
            .prefix(creator)
            .keys(storage, None, None, Order::Ascending)
            .collect::<StdResult<Vec<_>>>()?;
        Ok(denoms)
    }

    /// Resolves the admin of `denom` and checks it against `sender`. Every
    /// admin-gated operation goes through here first.
    pub fn ensure_admin(&self, storage: &dyn Storage, denom: &str, sender: &str) -> TokenFactoryResult<DenomAuthorityMetadata> {
        deconstruct_denom(self.cfg, denom)?;

        let authority = self.authority_metadata(storage, denom)?;
        if authority.admin.is_empty() || authority.admin != sender {
            return Err(TokenFactoryError::Unauthorized {
                denom: denom.to_string(),
                sender: sender.to_string(),
            });
        }
        Ok(authority)
    }

    /// Stores the authority record and its indexes for a validated denom,
    /// registering minimal bank metadata when the ledger has none.
    pub(crate) fn register_denom(
        &self,
        storage: &mut dyn Storage,
        denom: &str,
        authority: &DenomAuthorityMetadata,
    ) -> TokenFactoryResult<()> {
        let (creator, _) = deconstruct_denom(self.cfg, denom)?;

        if self.ledger.denom_metadata(storage, denom)?.is_none() {
            self.ledger.set_denom_metadata(storage, Metadata::minimal(denom))?;
        }

        DENOM_AUTHORITIES.save(storage, denom, authority)?;
        CREATOR_DENOMS.save(storage, (creator, denom), &Empty {})?;
        FACTORY_DENOMS.push_back(storage, &denom.to_string())?;
        Ok(())
    }

    /// Creates `factory/{creator}/{subdenom}` with `creator` as its admin.
    pub fn create_denom(
        &self,
        storage: &mut dyn Storage,
        gas: &mut dyn GasMeter,
        creator: &str,
        subdenom: &str,
    ) -> TokenFactoryResult<(String, Event)> {
        let denom = build_denom(self.cfg, creator, subdenom)?;

        if DENOM_AUTHORITIES.has(storage, &denom) || self.ledger.denom_metadata(storage, &denom)?.is_some() {
            return Err(TokenFactoryError::DenomAlreadyExists { denom });
        }

        let params = self.params(storage)?;
        let payer = Addr::unchecked(creator);
        let fees = FeeEngine::new(self.ledger, self.community_pool);

        // Everything that can fail without side effects runs before the
        // first write.
        fees.ensure_affordable(storage, &payer, &params.denom_creation_fee)?;
        gas.consume_gas(params.denom_creation_gas_consume, DENOM_CREATION_GAS_DESCRIPTOR)?;

        let route = fees.charge(storage, &payer, &params)?;
        self.register_denom(storage, &denom, &DenomAuthorityMetadata::new(creator))?;

        tracing::info!(
            creator,
            subdenom,
            denom = %denom,
            fee_route = route.map(|r| r.as_str()).unwrap_or("free"),
            "created denom"
        );

        let event = Event::new("create_denom")
            .add_attribute("creator", creator)
            .add_attribute("new_token_denom", denom.clone());

        Ok((denom, event))
    }

    /// Mints `amount` of `denom` to `mint_to`, or to the admin itself.
    pub fn mint(
        &self,
        storage: &mut dyn Storage,
        sender: &str,
        denom: &str,
        amount: Uint128,
        mint_to: Option<&str>,
    ) -> TokenFactoryResult<Event> {
        self.ensure_admin(storage, denom, sender)?;
        ensure_positive(amount)?;

        let recipient = mint_to.filter(|addr| !addr.is_empty()).unwrap_or(sender);
        self.ledger
            .mint_coins(storage, &Addr::unchecked(recipient), vec![Coin::new(amount.u128(), denom)])?;

        tracing::debug!(sender, recipient, denom, %amount, "minted factory tokens");

        Ok(Event::new("tf_mint")
            .add_attribute("sender", sender)
            .add_attribute("mint_to_address", recipient)
            .add_attribute("denom", denom)
            .add_attribute("amount", amount.to_string()))
    }

    /// Burns `amount` of `denom` from `burn_from`, or from the admin itself.
    pub fn burn(
        &self,
        storage: &mut dyn Storage,
        sender: &str,
        denom: &str,
        amount: Uint128,
        burn_from: Option<&str>,
    ) -> TokenFactoryResult<Event> {
        self.ensure_admin(storage, denom, sender)?;
        ensure_positive(amount)?;

        let target = burn_from.filter(|addr| !addr.is_empty()).unwrap_or(sender);
        if target != sender {
            self.ensure_capability(storage, Capability::BurnFrom)?;
        }

        let target_addr = Addr::unchecked(target);
        self.ensure_balance(storage, &target_addr, denom, amount)?;
        self.ledger
            .burn_coins(storage, &target_addr, vec![Coin::new(amount.u128(), denom)])?;

        tracing::debug!(sender, target, denom, %amount, "burned factory tokens");

        Ok(Event::new("tf_burn")
            .add_attribute("sender", sender)
            .add_attribute("burn_from_address", target)
            .add_attribute("denom", denom)
            .add_attribute("amount", amount.to_string()))
    }

    /// Hands administration of `denom` to `new_admin`. An empty `new_admin`
    /// revokes it for good.
    pub fn change_admin(&self, storage: &mut dyn Storage, sender: &str, denom: &str, new_admin: &str) -> TokenFactoryResult<Event> {
        self.ensure_admin(storage, denom, sender)?;

        DENOM_AUTHORITIES.save(storage, denom, &DenomAuthorityMetadata::new(new_admin))?;

        if new_admin.is_empty() {
            tracing::info!(sender, denom, "revoked denom admin");
        } else {
            tracing::info!(sender, denom, new_admin, "changed denom admin");
        }

        Ok(Event::new("change_admin")
            .add_attribute("denom", denom)
            .add_attribute("new_admin", new_admin))
    }

    /// Moves `amount` of `denom` from `from` to `to` on the admin's authority.
    pub fn force_transfer(
        &self,
        storage: &mut dyn Storage,
        sender: &str,
        denom: &str,
        amount: Uint128,
        from: &str,
        to: &str,
    ) -> TokenFactoryResult<Event> {
        self.ensure_admin(storage, denom, sender)?;
        self.ensure_capability(storage, Capability::ForceTransfer)?;
        ensure_positive(amount)?;

        let from_addr = Addr::unchecked(from);
        self.ensure_balance(storage, &from_addr, denom, amount)?;
        self.ledger.send_coins(
            storage,
            &from_addr,
            &Addr::unchecked(to),
            vec![Coin::new(amount.u128(), denom)],
        )?;

        tracing::debug!(sender, from, to, denom, %amount, "force transferred factory tokens");

        Ok(Event::new("force_transfer")
            .add_attribute("transfer_from_address", from)
            .add_attribute("transfer_to_address", to)
            .add_attribute("denom", denom)
            .add_attribute("amount", amount.to_string()))
    }

    /// Replaces the bank metadata of `metadata.base`.
    pub fn set_denom_metadata(&self, storage: &mut dyn Storage, sender: &str, metadata: Metadata) -> TokenFactoryResult<Event> {
        self.ensure_admin(storage, &metadata.base, sender)?;
        self.ensure_capability(storage, Capability::SetMetadata)?;
        metadata.validate()?;

        let denom = metadata.base.clone();
        self.ledger.set_denom_metadata(storage, metadata)?;

        tracing::debug!(sender, denom = %denom, "set denom metadata");

        Ok(Event::new("set_denom_metadata").add_attribute("denom", denom))
    }

    fn ensure_balance(&self, storage: &dyn Storage, address: &Addr, denom: &str, amount: Uint128) -> TokenFactoryResult<()> {
        let available = self.ledger.balance(storage, address, denom)?;
        if available < amount {
            return Err(TokenFactoryError::InsufficientFunds {
                address: address.to_string(),
                denom: denom.to_string(),
                available,
                required: amount,
            });
        }
        Ok(())
    }
}

fn ensure_positive(amount: Uint128) -> TokenFactoryResult<()> {
    if amount.is_zero() {
        return Err(TokenFactoryError::InvalidAmount);
    }
    Ok(())
}
