mod add_auction;
mod add_bid_placeholder;
mod add_full_bid;
mod get_auction;
mod get_auctions;
mod get_bid_placeholder;
mod get_full_bid;
mod get_full_bids;
mod models;
mod update_auction;

pub use models::*;

/// Maps auction records onto the ledger of the enclosing transaction.
///
/// Auctions live under their id in the public state. Revealed bids live under the composite
/// key `("fullbid", auction id, request id)` and are mirrored into the auction record. Bid
/// placeholders live under `("bid", auction id, request id)` in the private collection of the
/// bidding organization.
#[derive(Debug, Default)]
pub struct Repository {}

impl Repository {
    pub fn new() -> Self {
        Self {}
    }
}
