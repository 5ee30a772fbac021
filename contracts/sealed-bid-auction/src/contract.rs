use cosmwasm_std::{
    ensure, entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Uint128,
};
use cw2::set_contract_version;
use semver::Version;

use escrowed_auction::deadline::Phase;
use escrowed_auction::sealed_auction::{
    AuctionState, Config, ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg,
};

use crate::error::ContractError;
use crate::executions;
use crate::queries;
use crate::state::{AUCTION, CONFIG};

const CONTRACT_NAME: &str = "crates.io:sealed-bid-auction";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    cw_utils::nonpayable(&info)?;
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = msg.owner.unwrap_or_else(|| info.sender.to_string());
    let ownership = cw_ownable::initialize_owner(deps.storage, deps.api, Some(owner.as_str()))?;

    let config = Config {
        asset: msg.asset.check(deps.api)?,
        bid_currency: msg.bid_currency.check(deps.api)?,
    };
    CONFIG.save(deps.storage, &config)?;

    AUCTION.save(
        deps.storage,
        &AuctionState {
            phase: Phase::NotStarted,
            start_step: None,
            schedule: None,
            winning_bidder: None,
            highest_price: Uint128::zero(),
            second_price: Uint128::zero(),
        },
    )?;

    Ok(Response::default()
        .add_attribute("action", "instantiate")
        .add_attribute("asset_kind", config.asset.kind().to_string())
        .add_attribute("bid_currency", config.bid_currency.to_string())
        .add_attributes(ownership.into_attributes()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Start {
            bidding_duration,
            reveal_duration,
        } => executions::start(deps, env, info, bidding_duration, reveal_duration),
        ExecuteMsg::Commit {
            commitment,
        } => executions::commit(deps, env, info, commitment),
        ExecuteMsg::Reveal {
            price,
        } => executions::reveal(deps, env, info, price),
        ExecuteMsg::Settle {} => executions::settle(deps, env, info),
        ExecuteMsg::UpdateOwnership(action) => executions::update_ownership(deps, env, info, action),
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => queries::query_config(deps),
        QueryMsg::Auction {} => queries::query_auction(deps),
        QueryMsg::Bid {
            bidder,
        } => queries::query_bid(deps, bidder),
        QueryMsg::Bids {
            start_after,
            limit,
        } => queries::query_bids(deps, start_after, limit),
        QueryMsg::Commitment {
            bidder,
            price,
        } => queries::query_commitment(deps, bidder, price),
        QueryMsg::Ownership {} => queries::query_ownership(deps),
    }
}

#[entry_point]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    // only upgrades of this contract
    let stored = cw2::get_contract_version(deps.storage)?;
    ensure!(
        stored.contract == CONTRACT_NAME,
        ContractError::MigrationError {
            current_name: stored.contract,
            current_version: stored.version,
        }
    );
    let stored_version: Version = stored.version.parse()?;
    let new_version: Version = CONTRACT_VERSION.parse()?;
    ensure!(
        stored_version <= new_version,
        ContractError::MigrationError {
            current_name: stored.contract,
            current_version: stored.version,
        }
    );

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::default()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
