use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};
use cw_ownable::{cw_ownable_execute, cw_ownable_query};

use crate::asset::{AuctionAsset, AuctionAssetUnchecked, BidCurrency, BidCurrencyUnchecked};
use crate::deadline::{Phase, RollingWindow};

#[cw_serde]
pub struct InstantiateMsg {
    /// Operator of the auction, defaults to the instantiator
    pub owner: Option<String>,
    /// The asset put up for auction, taken into custody on `Start`
    pub asset: AuctionAssetUnchecked,
    /// Currency bids are paid in
    pub bid_currency: BidCurrencyUnchecked,
    /// The first bid has to be strictly greater than this. Defaults to zero
    pub reserve_price: Option<Uint128>,
}

#[cw_ownable_execute]
#[cw_serde]
pub enum ExecuteMsg {
    /// Takes the asset into custody and opens bidding. Operator only.
    Start {
        /// Number of blocks bidding stays open after the latest accepted bid
        admission_window: u64,
    },
    /// Places a bid strictly above the current best. A native currency bid must
    /// attach exactly `amount`; a cw20 bid needs an allowance for `amount`.
    Bid {
        amount: Uint128,
    },
    /// Hands the asset to the best bidder and the proceeds to the operator once
    /// the admission window has elapsed. Operator only.
    Settle {},
}

#[cw_ownable_query]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(AuctionResponse)]
    Auction {},
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
/// Immutable configuration of the auction
pub struct Config {
    pub asset: AuctionAsset,
    pub bid_currency: BidCurrency,
    pub reserve_price: Uint128,
}

#[cw_serde]
/// Mutable state of a continuous auction
pub struct AuctionState {
    pub phase: Phase,
    /// Height of the `Start` message
    pub start_step: Option<u64>,
    /// Best bid so far, or the reserve price while nobody has bid
    pub highest_price: Uint128,
    pub highest_bidder: Option<Addr>,
    /// Set on `Start`
    pub window: Option<RollingWindow>,
}

pub type AuctionResponse = AuctionState;
