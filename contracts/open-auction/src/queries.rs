use cosmwasm_std::{to_json_binary, Binary, Deps, StdResult};

use crate::state::{AUCTION, CONFIG};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&CONFIG.load(deps.storage)?)
}

pub fn query_auction(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&AUCTION.load(deps.storage)?)
}

pub fn query_ownership(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&cw_ownable::get_ownership(deps.storage)?)
}
