use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};
use escrowed_auction::sealed_auction::{AuctionState, BidEntry, Config};

/// Stores the immutable config of the auction
pub const CONFIG: Item<Config> = Item::new("config");
/// Stores the phase, schedule and running winner of the auction
pub const AUCTION: Item<AuctionState> = Item::new("auction");
/// Bid ledger, one entry per committed bidder
pub const BIDS: Map<&Addr, BidEntry> = Map::new("bids");
