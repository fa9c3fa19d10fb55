use std::str::FromStr;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Coin, Uint128};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::denom::validate_bank_denom;
use crate::error::{TokenFactoryError, TokenFactoryResult};

pub const DEFAULT_COIN_DENOM: &str = "stake";
pub const DEFAULT_DENOM_CREATION_FEE: u128 = 10_000_000;
pub const DEFAULT_DENOM_CREATION_GAS_CONSUME: u64 = 2_000_000;

/// Optional module behaviours, toggled through [`Params::enabled_capabilities`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Capability {
    /// Route the denom creation fee to the community pool instead of burning it.
    CommunityPoolFeeFunding,
    /// Let the admin burn from accounts other than its own.
    BurnFrom,
    /// Let the admin move balances between arbitrary accounts.
    ForceTransfer,
    /// Let the admin overwrite bank metadata of its denom.
    SetMetadata,
}

#[cw_serde]
pub struct Params {
    pub denom_creation_fee: Vec<Coin>,
    pub denom_creation_gas_consume: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enabled_capabilities: Vec<String>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            denom_creation_fee: vec![Coin {
                denom: DEFAULT_COIN_DENOM.to_string(),
                amount: Uint128::new(DEFAULT_DENOM_CREATION_FEE),
            }],
            denom_creation_gas_consume: DEFAULT_DENOM_CREATION_GAS_CONSUME,
            enabled_capabilities: [Capability::BurnFrom, Capability::ForceTransfer, Capability::SetMetadata]
                .iter()
                .map(|cap| cap.to_string())
                .collect(),
        }
    }
}

impl Params {
    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.enabled_capabilities.iter().any(|name| name == capability.as_ref())
    }

    pub fn with_capabilities(mut self, capabilities: &[Capability]) -> Self {
        self.enabled_capabilities = capabilities.iter().map(|cap| cap.to_string()).collect();
        self
    }

    pub fn validate(&self) -> TokenFactoryResult<()> {
        let mut previous: Option<&str> = None;
        for coin in &self.denom_creation_fee {
            if coin.amount.is_zero() {
                return Err(TokenFactoryError::InvalidParams(format!("zero amount for fee denom {}", coin.denom)));
            }
            validate_bank_denom(&coin.denom)
                .map_err(|err| TokenFactoryError::InvalidParams(format!("fee denom: {err}")))?;
            if let Some(prev) = previous {
                if prev >= coin.denom.as_str() {
                    return Err(TokenFactoryError::InvalidParams(format!(
                        "fee denoms must be sorted and unique, {} follows {prev}",
                        coin.denom
                    )));
                }
            }
            previous = Some(coin.denom.as_str());
        }

        for name in &self.enabled_capabilities {
            if Capability::from_str(name).is_err() {
                let known: Vec<String> = Capability::iter().map(|cap| cap.to_string()).collect();
                return Err(TokenFactoryError::InvalidParams(format!(
                    "unknown capability `{name}`, expected one of {}",
                    known.join(", ")
                )));
            }
        }

        Ok(())
    }
}

#[cw_serde]
#[derive(Default)]
pub struct DenomAuthorityMetadata {
    /// Empty once administration has been revoked.
    pub admin: String,
}

impl DenomAuthorityMetadata {
    pub fn new(admin: impl Into<String>) -> Self {
        Self { admin: admin.into() }
    }
}

/// Mirrors `cosmos.bank.v1beta1.DenomUnit`.
#[cw_serde]
pub struct DenomUnit {
    pub denom: String,
    pub exponent: u32,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Mirrors `cosmos.bank.v1beta1.Metadata`.
#[cw_serde]
#[derive(Default)]
pub struct Metadata {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub denom_units: Vec<DenomUnit>,
    pub base: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

impl Metadata {
    /// The metadata registered for a freshly created denom.
    pub fn minimal(denom: &str) -> Self {
        Self {
            description: String::new(),
            denom_units: vec![DenomUnit {
                denom: denom.to_string(),
                exponent: 0,
                aliases: vec![],
            }],
            base: denom.to_string(),
            display: denom.to_string(),
            name: denom.to_string(),
            symbol: denom.to_string(),
        }
    }

    pub fn validate(&self) -> TokenFactoryResult<()> {
        validate_bank_denom(&self.base).map_err(|err| TokenFactoryError::InvalidMetadata(err.to_string()))?;

        let Some(first) = self.denom_units.first() else {
            return Ok(());
        };
        if first.denom != self.base || first.exponent != 0 {
            return Err(TokenFactoryError::InvalidMetadata(format!(
                "the first denom unit must be the base denom {} with exponent 0",
                self.base
            )));
        }
        for pair in self.denom_units.windows(2) {
            if pair[1].exponent <= pair[0].exponent {
                return Err(TokenFactoryError::InvalidMetadata(format!(
                    "denom units must be sorted by increasing exponent, {} does not exceed {}",
                    pair[1].exponent, pair[0].exponent
                )));
            }
        }
        if !self.display.is_empty() && !self.denom_units.iter().any(|unit| unit.denom == self.display) {
            return Err(TokenFactoryError::InvalidMetadata(format!(
                "display denom {} is not one of the denom units",
                self.display
            )));
        }

        Ok(())
    }
}

#[cw_serde]
pub struct GenesisDenom {
    pub denom: String,
    pub authority_metadata: DenomAuthorityMetadata,
}

#[cw_serde]
#[derive(Default)]
pub struct GenesisState {
    pub params: Params,
    pub factory_denoms: Vec<GenesisDenom>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::{coin, from_json, to_json_string};
    use test_case::test_case;

    #[test_case("community-pool-fee-funding", Some(Capability::CommunityPoolFeeFunding) ; "community pool")]
    #[test_case("force-transfer", Some(Capability::ForceTransfer) ; "force transfer")]
    #[test_case("burn-from", Some(Capability::BurnFrom) ; "burn from")]
    #[test_case("enable_force_transfer", None ; "unknown name")]
    fn capability_names(name: &str, expected: Option<Capability>) {
        assert_eq!(Capability::from_str(name).ok(), expected);
    }

    #[test_case(vec![coin(1, "stake")] ; "single coin")]
    #[test_case(vec![coin(1, "stake"), coin(2, "utwo")] ; "two sorted coins")]
    #[test_case(vec![] ; "free")]
    #[test_case(vec![coin(0, "stake")] => panics "zero amount" ; "zero amount")]
    #[test_case(vec![coin(2, "utwo"), coin(1, "stake")] => panics "sorted and unique" ; "unsorted")]
    #[test_case(vec![coin(1, "stake"), coin(1, "stake")] => panics "sorted and unique" ; "duplicate")]
    fn params_fee_validation(fee: Vec<Coin>) {
        let params = Params {
            denom_creation_fee: fee,
            ..Params::default()
        };
        params.validate().unwrap();
    }

    #[test]
    fn unknown_capability_rejected() {
        let params = Params {
            enabled_capabilities: vec!["teleport".to_string()],
            ..Params::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("unknown capability `teleport`"));
    }

    #[test]
    fn default_capabilities() {
        let params = Params::default();
        assert!(params.is_enabled(Capability::ForceTransfer));
        assert!(params.is_enabled(Capability::BurnFrom));
        assert!(!params.is_enabled(Capability::CommunityPoolFeeFunding));
    }

    #[test]
    fn genesis_json_shape() {
        let json = r#"{
            "params": {
                "denom_creation_fee": [{"denom": "stake", "amount": "10000000"}],
                "denom_creation_gas_consume": 5000000
            },
            "factory_denoms": [
                {"denom": "factory/creator/bitcoin", "authority_metadata": {"admin": "creator"}}
            ]
        }"#;

        let genesis: GenesisState = from_json(json.as_bytes()).unwrap();
        assert_eq!(genesis.params.denom_creation_gas_consume, 5_000_000);
        assert!(genesis.params.enabled_capabilities.is_empty());
        assert_eq!(genesis.factory_denoms[0].authority_metadata.admin, "creator");

        let encoded = to_json_string(&genesis).unwrap();
        assert!(!encoded.contains("enabled_capabilities"));
    }

    #[test]
    fn metadata_validation() {
        Metadata::minimal("factory/creator/bitcoin").validate().unwrap();

        let mut metadata = Metadata::minimal("factory/creator/bitcoin");
        metadata.denom_units.push(DenomUnit {
            denom: "bitcoin".to_string(),
            exponent: 8,
            aliases: vec![],
        });
        metadata.display = "bitcoin".to_string();
        metadata.validate().unwrap();

        metadata.display = "satoshi".to_string();
        assert!(matches!(metadata.validate(), Err(TokenFactoryError::InvalidMetadata(_))));
    }
}
