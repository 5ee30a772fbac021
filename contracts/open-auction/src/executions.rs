use cosmwasm_std::{ensure, DepsMut, Env, MessageInfo, Response, Uint128};
use cw_ownable::Action;
use escrowed_auction::deadline::{Phase, RollingWindow};
use escrowed_auction::PhaseError;

use crate::state::{AUCTION, CONFIG};
use crate::ContractError;

/// Takes the asset into custody and opens bidding for `admission_window`
/// blocks. Only the operator can start the auction.
pub(crate) fn start(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    admission_window: u64,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;
    ensure!(admission_window > 0, ContractError::InvalidDuration);

    let mut auction = AUCTION.load(deps.storage)?;
    auction.phase.ensure_not_started()?;

    let config = CONFIG.load(deps.storage)?;
    let messages = config.asset.lock(&info, &env.contract.address)?;

    let height = env.block.height;
    let window = RollingWindow::new(height, admission_window);
    auction.phase = Phase::Started;
    auction.start_step = Some(height);
    auction.window = Some(window);
    AUCTION.save(deps.storage, &auction)?;

    Ok(Response::default().add_messages(messages).add_attributes(vec![
        ("action", "start".to_string()),
        ("operator", info.sender.to_string()),
        ("asset_kind", config.asset.kind().to_string()),
        ("admission_window", admission_window.to_string()),
        ("closes_at", window.closes_at().to_string()),
        ("step", height.to_string()),
    ]))
}

/// Accepts a bid strictly above the current best while the rolling window is
/// open, restarting the window. The previous best bidder gets their funds back.
pub(crate) fn bid(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let mut auction = AUCTION.load(deps.storage)?;
    auction.phase.ensure_started()?;
    let mut window = auction.window.ok_or(PhaseError::NotStarted)?;

    let height = env.block.height;
    ensure!(
        window.admits_bid(height),
        ContractError::BiddingClosed {
            closed_at: window.closes_at(),
        }
    );
    ensure!(
        amount > auction.highest_price,
        ContractError::BidTooLow {
            amount,
            highest_price: auction.highest_price,
        }
    );

    let config = CONFIG.load(deps.storage)?;
    let lock_msg = config.bid_currency.lock(&info, &env.contract.address, amount)?;

    // the ledger is written before any transfer is dispatched
    let previous_price = auction.highest_price;
    let previous_bidder = auction.highest_bidder.replace(info.sender.clone());
    auction.highest_price = amount;
    window.extend(height);
    auction.window = Some(window);
    AUCTION.save(deps.storage, &auction)?;

    let mut messages = vec![];
    if let Some(previous_bidder) = &previous_bidder {
        messages.extend(config.bid_currency.release_msg(previous_bidder, previous_price)?);
    }
    messages.extend(lock_msg);

    Ok(Response::default().add_messages(messages).add_attributes(vec![
        ("action", "bid".to_string()),
        ("bidder", info.sender.to_string()),
        ("amount", amount.to_string()),
        (
            "outbid",
            previous_bidder.map(|addr| addr.to_string()).unwrap_or_else(|| "none".to_string()),
        ),
        ("closes_at", window.closes_at().to_string()),
        ("step", height.to_string()),
    ]))
}

/// Concludes the auction once the rolling window has elapsed. The best bidder
/// receives the asset and the operator the winning bid; without bids the asset
/// goes back to the operator.
pub(crate) fn settle(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;
    cw_utils::nonpayable(&info)?;

    let mut auction = AUCTION.load(deps.storage)?;
    auction.phase.ensure_started()?;
    let window = auction.window.ok_or(PhaseError::NotStarted)?;

    let height = env.block.height;
    ensure!(
        window.is_elapsed(height),
        ContractError::AuctionStillActive {
            closes_at: window.closes_at(),
        }
    );

    auction.phase = Phase::Concluded;
    AUCTION.save(deps.storage, &auction)?;

    let config = CONFIG.load(deps.storage)?;
    let (recipient, proceeds) = match &auction.highest_bidder {
        Some(winner) => (winner.clone(), auction.highest_price),
        None => (info.sender.clone(), Uint128::zero()),
    };

    let mut messages = vec![config.asset.release_msg(&env.contract.address, &recipient)?];
    messages.extend(config.bid_currency.release_msg(&info.sender, proceeds)?);

    Ok(Response::default().add_messages(messages).add_attributes(vec![
        ("action", "settle".to_string()),
        ("operator", info.sender.to_string()),
        (
            "winner",
            auction.highest_bidder.map(|addr| addr.to_string()).unwrap_or_else(|| "none".to_string()),
        ),
        ("amount", proceeds.to_string()),
        ("step", height.to_string()),
    ]))
}

/// Forwards an ownership action to cw-ownable. The operator is the only account
/// able to settle, so renouncing is refused between `Start` and `Settle`.
pub(crate) fn update_ownership(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    action: Action,
) -> Result<Response, ContractError> {
    if matches!(action, Action::RenounceOwnership) {
        let auction = AUCTION.load(deps.storage)?;
        ensure!(auction.phase != Phase::Started, ContractError::RenounceWhileRunning);
    }

    let ownership = cw_ownable::update_ownership(deps, &env.block, &info.sender, action)?;
    Ok(Response::default()
        .add_attribute("action", "update_ownership")
        .add_attributes(ownership.into_attributes()))
}
