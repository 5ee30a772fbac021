use cosmwasm_std::{StdError, Uint128};
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum EscrowError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("Expected {expected}{denom} to be attached, received {received}{denom}")]
    FundsMismatch {
        denom: String,
        expected: Uint128,
        received: Uint128,
    },

    #[error("Escrowed asset amount must be greater than zero")]
    ZeroAmount,

    #[error("Token id of the escrowed item can't be empty")]
    EmptyTokenId,
}

/// Phase guard failures shared by the auction contracts.
#[derive(Error, Debug, PartialEq)]
pub enum PhaseError {
    #[error("The auction has not been started")]
    NotStarted,

    #[error("The auction has already been started")]
    AlreadyStarted,

    #[error("The auction has already been concluded")]
    AlreadyConcluded,
}
