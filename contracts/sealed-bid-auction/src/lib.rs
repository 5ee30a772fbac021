pub mod contract;
mod error;
pub mod executions;
pub mod queries;
pub mod state;

pub use crate::error::ContractError;

#[cfg(test)]
mod tests;
