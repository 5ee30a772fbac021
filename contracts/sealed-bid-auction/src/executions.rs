use cosmwasm_std::{ensure, Binary, DepsMut, Env, MessageInfo, Response, Uint128};
use cw_ownable::Action;
use escrowed_auction::commitment::{tie_break, verify_commitment, TieBreak, COMMITMENT_LENGTH};
use escrowed_auction::deadline::{Phase, TwoPhaseSchedule};
use escrowed_auction::sealed_auction::BidEntry;
use escrowed_auction::PhaseError;

use crate::state::{AUCTION, BIDS, CONFIG};
use crate::ContractError;

/// Takes the asset into custody and opens the commit phase.
pub(crate) fn start(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    bidding_duration: u64,
    reveal_duration: u64,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    let mut auction = AUCTION.load(deps.storage)?;
    auction.phase.ensure_not_started()?;

    let height = env.block.height;
    let schedule = TwoPhaseSchedule::new(height, bidding_duration, reveal_duration)
        .ok_or(ContractError::InvalidDuration)?;

    let config = CONFIG.load(deps.storage)?;
    let messages = config.asset.lock(&info, &env.contract.address)?;

    auction.phase = Phase::Started;
    auction.start_step = Some(height);
    auction.schedule = Some(schedule);
    AUCTION.save(deps.storage, &auction)?;

    Ok(Response::default().add_messages(messages).add_attributes(vec![
        ("action", "start".to_string()),
        ("operator", info.sender.to_string()),
        ("asset_kind", config.asset.kind().to_string()),
        ("bidding_end", schedule.bidding_end.to_string()),
        ("reveal_end", schedule.reveal_end.to_string()),
        ("step", height.to_string()),
    ]))
}

/// Records the sealed bid of the sender. Nothing is paid until the reveal.
pub(crate) fn commit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    commitment: Binary,
) -> Result<Response, ContractError> {
    cw_utils::nonpayable(&info)?;

    let auction = AUCTION.load(deps.storage)?;
    auction.phase.ensure_started()?;
    let schedule = auction.schedule.ok_or(PhaseError::NotStarted)?;

    let height = env.block.height;
    ensure!(
        schedule.admits_commit(height),
        ContractError::CommitPhaseClosed {
            bidding_end: schedule.bidding_end,
        }
    );
    ensure!(
        commitment.len() == COMMITMENT_LENGTH,
        ContractError::InvalidCommitment {
            length: commitment.len(),
        }
    );
    ensure!(!BIDS.has(deps.storage, &info.sender), ContractError::DuplicateCommitment);

    BIDS.save(
        deps.storage,
        &info.sender,
        &BidEntry {
            commitment,
            deposit: Uint128::zero(),
            revealed: false,
        },
    )?;

    Ok(Response::default().add_attributes(vec![
        ("action", "commit".to_string()),
        ("bidder", info.sender.to_string()),
        ("step", height.to_string()),
    ]))
}

/// Opens the sender's commitment and ranks the price against the revealed ones.
///
/// Only the running winner keeps funds in escrow. A revealer who takes the lead
/// locks `price` and the previous winner is refunded, any other revealer gets
/// their attached funds back in the same response.
pub(crate) fn reveal(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    price: Uint128,
) -> Result<Response, ContractError> {
    let mut auction = AUCTION.load(deps.storage)?;
    auction.phase.ensure_started()?;
    let schedule = auction.schedule.ok_or(PhaseError::NotStarted)?;

    let height = env.block.height;
    ensure!(
        schedule.admits_reveal(height),
        ContractError::RevealPhaseNotOpen {
            bidding_end: schedule.bidding_end,
            reveal_end: schedule.reveal_end,
        }
    );

    let mut entry =
        BIDS.may_load(deps.storage, &info.sender)?.ok_or(ContractError::NoCommitment)?;
    ensure!(!entry.revealed, ContractError::AlreadyRevealed);
    ensure!(
        verify_commitment(&entry.commitment, price, &info.sender),
        ContractError::CommitmentMismatch
    );

    let config = CONFIG.load(deps.storage)?;
    let received = config.bid_currency.receive(&info, price)?;

    let takes_lead = match &auction.winning_bidder {
        None => true,
        Some(_) if price > auction.highest_price => {
            auction.second_price = auction.highest_price;
            true
        },
        Some(winner) if price == auction.highest_price => {
            auction.second_price = price;
            let incumbent = BIDS.load(deps.storage, winner)?;
            tie_break(&incumbent.commitment, &entry.commitment) == TieBreak::Challenger
        },
        Some(_) => {
            auction.second_price = auction.second_price.max(price);
            false
        },
    };

    let mut messages = vec![];
    entry.revealed = true;
    if takes_lead {
        if let Some(previous) = auction.winning_bidder.replace(info.sender.clone()) {
            let mut outbid = BIDS.load(deps.storage, &previous)?;
            messages.extend(config.bid_currency.release_msg(&previous, outbid.deposit)?);
            outbid.deposit = Uint128::zero();
            BIDS.save(deps.storage, &previous, &outbid)?;
        }
        auction.highest_price = price;
        entry.deposit = price;
        messages.extend(config.bid_currency.pull_msg(&info.sender, &env.contract.address, price)?);
    } else {
        messages.extend(config.bid_currency.release_msg(&info.sender, received)?);
    }
    BIDS.save(deps.storage, &info.sender, &entry)?;
    AUCTION.save(deps.storage, &auction)?;

    Ok(Response::default().add_messages(messages).add_attributes(vec![
        ("action", "reveal".to_string()),
        ("bidder", info.sender.to_string()),
        ("price", price.to_string()),
        ("leading", takes_lead.to_string()),
        ("second_price", auction.second_price.to_string()),
        ("step", height.to_string()),
    ]))
}

/// Hands the asset to the winner at the second highest revealed price and
/// returns the rest of their deposit. Without a winner the asset goes back to
/// the operator.
pub(crate) fn settle(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;
    cw_utils::nonpayable(&info)?;

    let mut auction = AUCTION.load(deps.storage)?;
    auction.phase.ensure_started()?;
    let schedule = auction.schedule.ok_or(PhaseError::NotStarted)?;

    let height = env.block.height;
    ensure!(
        schedule.admits_settlement(height),
        ContractError::AuctionStillActive {
            reveal_end: schedule.reveal_end,
        }
    );

    auction.phase = Phase::Concluded;
    AUCTION.save(deps.storage, &auction)?;

    let config = CONFIG.load(deps.storage)?;
    let mut messages = vec![];
    let mut proceeds = Uint128::zero();
    match &auction.winning_bidder {
        Some(winner) => {
            let mut entry = BIDS.load(deps.storage, winner)?;
            proceeds = auction.second_price;
            let refund = entry.deposit.checked_sub(proceeds)?;
            entry.deposit = Uint128::zero();
            BIDS.save(deps.storage, winner, &entry)?;

            messages.push(config.asset.release_msg(&env.contract.address, winner)?);
            messages.extend(config.bid_currency.release_msg(&info.sender, proceeds)?);
            messages.extend(config.bid_currency.release_msg(winner, refund)?);
        },
        None => {
            messages.push(config.asset.release_msg(&env.contract.address, &info.sender)?);
        },
    }

    Ok(Response::default().add_messages(messages).add_attributes(vec![
        ("action", "settle".to_string()),
        ("operator", info.sender.to_string()),
        (
            "winner",
            auction.winning_bidder.map(|addr| addr.to_string()).unwrap_or_else(|| "none".to_string()),
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
