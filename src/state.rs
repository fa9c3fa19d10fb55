use cosmwasm_std::Empty;
use cw_storage_plus::{Deque, Item, Map};

use crate::types::{DenomAuthorityMetadata, Params};

pub const PARAMS: Item<Params> = Item::new("tokenfactory/params");

/// denom -> authority metadata
pub const DENOM_AUTHORITIES: Map<&str, DenomAuthorityMetadata> = Map::new("tokenfactory/authority");

/// (creator, denom) -> ()
pub const CREATOR_DENOMS: Map<(&str, &str), Empty> = Map::new("tokenfactory/creator_denoms");

/// Denoms in creation order, used for genesis export.
pub const FACTORY_DENOMS: Deque<String> = Deque::new("tokenfactory/denoms");
