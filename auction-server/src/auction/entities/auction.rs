use {
    super::FullBid,
    crate::kernel::entities::{
        AuctionId,
        OrgId,
        Price,
        Principal,
    },
    time::OffsetDateTime,
};
pub use outcry_api_types::auction::AuctionStatus;

#[derive(Clone, Debug, PartialEq)]
pub struct Auction {
    pub id:            AuctionId,
    pub item:          String,
    pub seller:        Principal,
    pub organizations: Vec<OrgId>,
    pub winner:        Principal,
    pub price:         Price,
    pub status:        AuctionStatus,
    pub time_limit:    OffsetDateTime,
    pub description:   String,
    pub picture_url:   String,
    /// Revealed bids in submission order.
    pub bids:          Vec<FullBid>,
}

impl Auction {
    pub fn is_seller(&self, principal: &str) -> bool {
        self.seller == principal
    }

    /// Bidding stays possible up to and including the time limit.
    pub fn has_expired(&self, now: OffsetDateTime) -> bool {
        self.time_limit < now
    }

    pub fn can_be_ended(&self, now: OffsetDateTime) -> bool {
        self.time_limit <= now
    }
}
