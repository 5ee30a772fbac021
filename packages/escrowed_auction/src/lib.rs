pub mod asset;
pub mod commitment;
pub mod cw1155;
pub mod deadline;
mod error;
pub mod open_auction;
pub mod sealed_auction;

pub use crate::error::{EscrowError, PhaseError};
