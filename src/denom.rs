//! Derivation and parsing of `{prefix}/{creator}/{subdenom}` denoms.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::TokenFactoryConfig;
use crate::error::{TokenFactoryError, TokenFactoryResult};

/// Grammar every bank denom has to satisfy.
pub const BANK_DENOM_REGEX: &str = r"^[a-zA-Z][a-zA-Z0-9/:._-]{2,127}$";

const SUBDENOM_PUNCTUATION: &[char] = &['/', ':', '.', '_', '-'];

static BANK_DENOM_RE: OnceLock<Regex> = OnceLock::new();

fn bank_denom_regex() -> TokenFactoryResult<&'static Regex> {
    if let Some(re) = BANK_DENOM_RE.get() {
        return Ok(re);
    }
    let re = Regex::new(BANK_DENOM_REGEX)?;
    Ok(BANK_DENOM_RE.get_or_init(|| re))
}

pub fn validate_bank_denom(denom: &str) -> TokenFactoryResult<()> {
    if !bank_denom_regex()?.is_match(denom) {
        return Err(TokenFactoryError::InvalidDenom {
            denom: denom.to_string(),
            reason: format!("must match regex format '{BANK_DENOM_REGEX}'"),
        });
    }
    Ok(())
}

fn validate_subdenom(cfg: &TokenFactoryConfig, subdenom: &str) -> TokenFactoryResult<()> {
    let invalid = |reason: String| TokenFactoryError::InvalidSubdenom {
        subdenom: subdenom.to_string(),
        reason,
    };

    if subdenom.is_empty() {
        return Err(invalid("subdenom cannot be empty".to_string()));
    }
    if subdenom.len() > cfg.max_subdenom_length {
        return Err(invalid(format!("length is too long, max length is {}", cfg.max_subdenom_length)));
    }
    if let Some(c) = subdenom.chars().find(|c| !c.is_ascii_alphanumeric() && !SUBDENOM_PUNCTUATION.contains(c)) {
        return Err(invalid(format!("character `{c}` is not allowed")));
    }
    Ok(())
}

fn validate_creator(cfg: &TokenFactoryConfig, creator: &str) -> TokenFactoryResult<()> {
    let invalid = |reason: String| TokenFactoryError::InvalidCreator {
        creator: creator.to_string(),
        reason,
    };

    if creator.is_empty() {
        return Err(invalid("creator cannot be empty".to_string()));
    }
    if creator.len() > cfg.max_creator_length {
        return Err(invalid(format!("length is too long, max length is {}", cfg.max_creator_length)));
    }
    if creator.contains('/') {
        return Err(invalid("creator address cannot contain '/'".to_string()));
    }
    Ok(())
}

/// Builds the canonical denom for `(creator, subdenom)`.
pub fn build_denom(cfg: &TokenFactoryConfig, creator: &str, subdenom: &str) -> TokenFactoryResult<String> {
    validate_subdenom(cfg, subdenom)?;
    validate_creator(cfg, creator)?;

    let denom = format!("{}/{}/{}", cfg.denom_prefix, creator, subdenom);
    validate_bank_denom(&denom).map_err(|err| TokenFactoryError::InvalidSubdenom {
        subdenom: subdenom.to_string(),
        reason: err.to_string(),
    })?;

    Ok(denom)
}

/// Splits a factory denom into `(creator, subdenom)`.
///
/// The subdenom keeps any further `/` separators.
pub fn deconstruct_denom<'d>(cfg: &TokenFactoryConfig, denom: &'d str) -> TokenFactoryResult<(&'d str, &'d str)> {
    validate_bank_denom(denom)?;

    let invalid = |reason: String| TokenFactoryError::InvalidDenom {
        denom: denom.to_string(),
        reason,
    };

    let mut parts = denom.splitn(3, '/');
    let (Some(prefix), Some(creator), Some(subdenom)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid("denom must have at least 3 parts separated by /".to_string()));
    };

    if prefix != cfg.denom_prefix {
        return Err(invalid(format!("prefix must be '{}', was {prefix}", cfg.denom_prefix)));
    }
    if creator.is_empty() {
        return Err(invalid("creator cannot be empty".to_string()));
    }
    if creator.len() > cfg.max_creator_length {
        return Err(invalid(format!("creator is too long, max length is {}", cfg.max_creator_length)));
    }
    if subdenom.len() > cfg.max_subdenom_length {
        return Err(invalid(format!("subdenom is too long, max length is {}", cfg.max_subdenom_length)));
    }

    Ok((creator, subdenom))
}
