use cosmwasm_std::{OverflowError, StdError, Uint128};
use cw_ownable::OwnershipError;
use cw_utils::PaymentError;
use escrowed_auction::{EscrowError, PhaseError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    Ownership(#[from] OwnershipError),

    #[error("{0}")]
    PaymentError(#[from] PaymentError),

    #[error("{0}")]
    Escrow(#[from] EscrowError),

    #[error("Overflow error: {0}")]
    OverflowError(#[from] OverflowError),

    #[error(transparent)]
    Phase(#[from] PhaseError),

    #[error("The operator can't be renounced while the auction is running")]
    RenounceWhileRunning,

    #[error("Admission window must be at least one block")]
    InvalidDuration,

    #[error("Bidding closed at block {closed_at}")]
    BiddingClosed {
        closed_at: u64,
    },

    #[error("Bid of {amount} must be greater than the current best price of {highest_price}")]
    BidTooLow {
        amount: Uint128,
        highest_price: Uint128,
    },

    #[error("The auction accepts bids until block {closes_at}")]
    AuctionStillActive {
        closes_at: u64,
    },

    #[error("Contract can't be migrated! {current_name:?} {current_version:?}")]
    MigrationError {
        current_name: String,
        current_version: String,
    },

    #[error("Invalid contract version: {0}")]
    InvalidVersion(String),
}

impl From<semver::Error> for ContractError {
    fn from(err: semver::Error) -> Self {
        Self::InvalidVersion(err.to_string())
    }
}
