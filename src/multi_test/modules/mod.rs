mod bindings;
mod token_factory;

pub use bindings::TokenFactoryBindings;
pub use token_factory::TokenFactory;

pub const TOKENFACTORY_QUERY_SERVICE: &str = "/osmosis.tokenfactory.v1beta1.Query/";
pub const QUERY_PARAMS_PATH: &str = constcat::concat!(TOKENFACTORY_QUERY_SERVICE, "Params");
pub const QUERY_DENOM_AUTHORITY_METADATA_PATH: &str = constcat::concat!(TOKENFACTORY_QUERY_SERVICE, "DenomAuthorityMetadata");
pub const QUERY_DENOMS_FROM_CREATOR_PATH: &str = constcat::concat!(TOKENFACTORY_QUERY_SERVICE, "DenomsFromCreator");
