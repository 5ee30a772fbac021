use cosmwasm_std::{OverflowError, StdError};
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

    #[error("Bidding and reveal durations must be at least one block and must not overflow")]
    InvalidDuration,

    #[error("Commitments were accepted until block {bidding_end}")]
    CommitPhaseClosed {
        bidding_end: u64,
    },

    #[error("Commitments can only be revealed from block {bidding_end} until block {reveal_end}")]
    RevealPhaseNotOpen {
        bidding_end: u64,
        reveal_end: u64,
    },

    #[error("The auction can be settled from block {reveal_end}")]
    AuctionStillActive {
        reveal_end: u64,
    },

    #[error("Commitment must be 32 bytes long, got {length}")]
    InvalidCommitment {
        length: usize,
    },

    #[error("Bidder has already committed")]
    DuplicateCommitment,

    #[error("No commitment found for bidder")]
    NoCommitment,

    #[error("Commitment has already been revealed")]
    AlreadyRevealed,

    #[error("Revealed price does not match the commitment")]
    CommitmentMismatch,

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
