use cw_storage_plus::Item;
use escrowed_auction::open_auction::{AuctionState, Config};

/// Stores the immutable config of the auction
pub const CONFIG: Item<Config> = Item::new("config");
/// Stores the phase, best bid and rolling window of the auction
pub const AUCTION: Item<AuctionState> = Item::new("auction");
