use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, Uint128};

/// The part of the cw1155 execute interface the escrow calls into. Only
/// `SendFrom` is needed, both for pulling an item into custody (the auction
/// contract must be an approved operator of the owner) and for releasing it.
#[cw_serde]
pub enum Cw1155ExecuteMsg {
    SendFrom {
        from: String,
        /// If `to` is not a contract, `msg` should be `None`
        to: String,
        token_id: String,
        value: Uint128,
        /// `None` means don't call the receiver interface
        msg: Option<Binary>,
    },
}
