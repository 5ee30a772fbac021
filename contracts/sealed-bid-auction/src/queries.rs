use cosmwasm_std::{to_json_binary, Binary, Deps, Order, StdResult, Uint128};
use cw_storage_plus::Bound;
use escrowed_auction::commitment::compute_commitment;
use escrowed_auction::sealed_auction::{BidResponse, BidsResponse};

use crate::state::{AUCTION, BIDS, CONFIG};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&CONFIG.load(deps.storage)?)
}

pub fn query_auction(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&AUCTION.load(deps.storage)?)
}

pub fn query_bid(deps: Deps, bidder: String) -> StdResult<Binary> {
    let bidder = deps.api.addr_validate(&bidder)?;
    to_json_binary(&BIDS.may_load(deps.storage, &bidder)?)
}

/// Ledger entries in ascending bidder order, starting after `start_after`.
pub fn query_bids(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_after = start_after.map(|addr| deps.api.addr_validate(&addr)).transpose()?;
    let start = start_after.as_ref().map(|addr| Bound::exclusive(addr));

    let bids = BIDS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            item.map(|(bidder, entry)| BidResponse {
                bidder,
                entry,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&BidsResponse {
        bids,
    })
}

pub fn query_commitment(deps: Deps, bidder: String, price: Uint128) -> StdResult<Binary> {
    let bidder = deps.api.addr_validate(&bidder)?;
    to_json_binary(&Binary::from(compute_commitment(price, &bidder).to_vec()))
}

pub fn query_ownership(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&cw_ownable::get_ownership(deps.storage)?)
}
