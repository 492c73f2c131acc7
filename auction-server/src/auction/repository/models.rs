use {
    crate::{
        auction::entities,
        kernel::{
            entities::{
                AuctionId,
                OrgId,
                Price,
                Principal,
            },
            ledger::create_composite_key,
        },
    },
    outcry_api_types::auction::AuctionStatus,
    serde::{
        Deserialize,
        Serialize,
    },
    time::OffsetDateTime,
};

pub const AUCTION_OBJECT_TYPE: &str = "auction";
pub const BID_OBJECT_TYPE: &str = "bid";
pub const FULL_BID_KEY_TYPE: &str = "fullbid";

pub fn bid_placeholder_key(auction_id: &str, request_id: &str) -> anyhow::Result<String> {
    create_composite_key(BID_OBJECT_TYPE, &[auction_id, request_id])
}

pub fn full_bid_key(auction_id: &str, request_id: &str) -> anyhow::Result<String> {
    create_composite_key(FULL_BID_KEY_TYPE, &[auction_id, request_id])
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FullBid {
    #[serde(rename = "objectType")]
    pub object_type: String,
    pub price:       Price,
    pub org:         OrgId,
    pub bidder:      Principal,
    pub valid:       bool,
    #[serde(with = "outcry_api_types::serde::trusted_timestamp")]
    pub timestamp:   OffsetDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Auction {
    #[serde(rename = "auctionID")]
    pub auction_id:    AuctionId,
    #[serde(rename = "objectType")]
    pub object_type:   String,
    pub item:          String,
    pub seller:        Principal,
    pub organizations: Vec<OrgId>,
    pub winner:        Principal,
    pub price:         Price,
    pub status:        AuctionStatus,
    #[serde(with = "outcry_api_types::serde::datetime")]
    pub timelimit:     OffsetDateTime,
    pub description:   String,
    #[serde(rename = "pictureUrl")]
    pub picture_url:   String,
    pub bids:          Vec<FullBid>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BidPlaceholder {
    pub price:  Price,
    pub org:    OrgId,
    pub bidder: Principal,
}

impl From<FullBid> for entities::FullBid {
    fn from(bid: FullBid) -> Self {
        Self {
            price:     bid.price,
            org:       bid.org,
            bidder:    bid.bidder,
            valid:     bid.valid,
            timestamp: bid.timestamp,
        }
    }
}

impl From<entities::FullBid> for FullBid {
    fn from(bid: entities::FullBid) -> Self {
        Self {
            object_type: BID_OBJECT_TYPE.to_string(),
            price:       bid.price,
            org:         bid.org,
            bidder:      bid.bidder,
            valid:       bid.valid,
            timestamp:   bid.timestamp,
        }
    }
}

impl From<Auction> for entities::Auction {
    fn from(auction: Auction) -> Self {
        Self {
            id:            auction.auction_id,
            item:          auction.item,
            seller:        auction.seller,
            organizations: auction.organizations,
            winner:        auction.winner,
            price:         auction.price,
            status:        auction.status,
            time_limit:    auction.timelimit,
            description:   auction.description,
            picture_url:   auction.picture_url,
            bids:          auction.bids.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<entities::Auction> for Auction {
    fn from(auction: entities::Auction) -> Self {
        Self {
            auction_id:    auction.id,
            object_type:   AUCTION_OBJECT_TYPE.to_string(),
            item:          auction.item,
            seller:        auction.seller,
            organizations: auction.organizations,
            winner:        auction.winner,
            price:         auction.price,
            status:        auction.status,
            timelimit:     auction.time_limit,
            description:   auction.description,
            picture_url:   auction.picture_url,
            bids:          auction.bids.into_iter().map(Into::into).collect(),
        }
    }
}

impl BidPlaceholder {
    pub fn into_entity(self, request_id: String) -> entities::BidPlaceholder {
        entities::BidPlaceholder {
            request_id,
            price: self.price,
            org: self.org,
            bidder: self.bidder,
        }
    }
}

impl From<entities::BidPlaceholder> for BidPlaceholder {
    fn from(bid: entities::BidPlaceholder) -> Self {
        Self {
            price:  bid.price,
            org:    bid.org,
            bidder: bid.bidder,
        }
    }
}
