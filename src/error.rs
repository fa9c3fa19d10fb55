use cosmwasm_std::{StdError, Uint128};

#[derive(thiserror::Error, Debug)]
pub enum TokenFactoryError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Regex(#[from] regex::Error),

    #[error("{0}")]
    Config(#[from] config::ConfigError),

    /// Failure reported by the ledger or community pool collaborator.
    #[error(transparent)]
    Ledger(#[from] anyhow::Error),

    #[error("invalid subdenom `{subdenom}`: {reason}")]
    InvalidSubdenom { subdenom: String, reason: String },

    #[error("invalid creator `{creator}`: {reason}")]
    InvalidCreator { creator: String, reason: String },

    #[error("invalid denom `{denom}`: {reason}")]
    InvalidDenom { denom: String, reason: String },

    #[error("denom `{denom}` already exists")]
    DenomAlreadyExists { denom: String },

    #[error("insufficient funds: {address} holds {available}{denom}, needs {required}{denom}")]
    InsufficientFunds {
        address: String,
        denom: String,
        available: Uint128,
        required: Uint128,
    },

    #[error("unauthorized: {sender} is not the admin of `{denom}`")]
    Unauthorized { denom: String, sender: String },

    #[error("unauthorized: only {authority} can update params, got {sender}")]
    UnauthorizedAuthority { authority: String, sender: String },

    #[error("amount must be positive")]
    InvalidAmount,

    #[error("capability `{capability}` is not enabled")]
    CapabilityNotEnabled { capability: String },

    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("invalid genesis: {0}")]
    InvalidGenesis(String),

    #[error("out of gas in location: {descriptor}; limit: {limit}, wanted: {wanted}")]
    OutOfGas {
        descriptor: String,
        limit: u64,
        wanted: u64,
    },
}

pub type TokenFactoryResult<T> = Result<T, TokenFactoryError>;
