use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};
use cw_ownable::{cw_ownable_execute, cw_ownable_query};

use crate::asset::{AuctionAsset, AuctionAssetUnchecked, BidCurrency, BidCurrencyUnchecked};
use crate::deadline::{Phase, TwoPhaseSchedule};

#[cw_serde]
pub struct InstantiateMsg {
    /// Operator of the auction, defaults to the instantiator
    pub owner: Option<String>,
    /// The asset put up for auction, taken into custody on `Start`
    pub asset: AuctionAssetUnchecked,
    /// Currency bids are paid in
    pub bid_currency: BidCurrencyUnchecked,
}

#[cw_ownable_execute]
#[cw_serde]
pub enum ExecuteMsg {
    /// Takes the asset into custody and opens the commit phase. Operator only.
    Start {
        /// Blocks during which commitments are accepted
        bidding_duration: u64,
        /// Blocks during which commitments can be revealed, following the bidding phase
        reveal_duration: u64,
    },
    /// Records a sealed bid. One commitment per bidder, no funds attached.
    Commit {
        /// `keccak256(price as 32 byte big-endian ‖ bidder address)`, see `QueryMsg::Commitment`
        commitment: Binary,
    },
    /// Opens a commitment. A native currency reveal must attach exactly `price`,
    /// which is returned unless the revealer becomes the winner. A cw20 reveal
    /// needs an allowance for `price`, pulled only if the revealer becomes the winner.
    Reveal {
        price: Uint128,
    },
    /// Hands the asset to the winner, who pays the second highest revealed price.
    /// Operator only.
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
    /// Ledger entry of a single bidder
    #[returns(Option<BidEntry>)]
    Bid {
        bidder: String,
    },
    /// Ledger entries ordered by bidder address
    #[returns(BidsResponse)]
    Bids {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    /// The commitment `bidder` has to submit for `price`
    #[returns(Binary)]
    Commitment {
        bidder: String,
        price: Uint128,
    },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
/// Immutable configuration of the auction
pub struct Config {
    pub asset: AuctionAsset,
    pub bid_currency: BidCurrency,
}

#[cw_serde]
/// Mutable state of a sealed-bid auction
pub struct AuctionState {
    pub phase: Phase,
    /// Height of the `Start` message
    pub start_step: Option<u64>,
    /// Set on `Start`
    pub schedule: Option<TwoPhaseSchedule>,
    pub winning_bidder: Option<Addr>,
    /// Revealed price of the winning bidder
    pub highest_price: Uint128,
    /// Highest revealed price excluding the winner's, paid at settlement
    pub second_price: Uint128,
}

pub type AuctionResponse = AuctionState;

#[cw_serde]
/// A bidder's entry in the ledger, created by the first commit
pub struct BidEntry {
    pub commitment: Binary,
    /// Funds held in escrow for this bidder; non zero only for the current winner
    pub deposit: Uint128,
    pub revealed: bool,
}

#[cw_serde]
pub struct BidResponse {
    pub bidder: Addr,
    pub entry: BidEntry,
}

#[cw_serde]
pub struct BidsResponse {
    pub bids: Vec<BidResponse>,
}
