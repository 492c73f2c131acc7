use {
    crate::{
        AuctionId,
        OrgId,
        Price,
        Principal,
        RequestId,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    time::OffsetDateTime,
    utoipa::{
        IntoParams,
        ToResponse,
        ToSchema,
    },
};

/// A revealed bid with its trusted timestamp.
#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, PartialEq, Debug)]
pub struct FullBid {
    #[serde(rename = "objectType")]
    #[schema(example = "bid")]
    pub object_type: String,
    #[schema(example = 300, value_type = i64)]
    pub price:       Price,
    #[schema(example = "Org2MSP", value_type = String)]
    pub org:         OrgId,
    #[schema(example = "x509::CN=bidder,OU=client::CN=ca.org2.example.com", value_type = String)]
    pub bidder:      Principal,
    /// False when the bid was superseded by an earlier valid bid of the same organization.
    pub valid:       bool,
    #[serde(with = "crate::serde::trusted_timestamp")]
    #[schema(example = "2025-06-25 19:59:59.315604090 +0000 UTC", value_type = String)]
    pub timestamp:   OffsetDateTime,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct PlaceBid {
    #[schema(example = 300, value_type = i64)]
    pub price: Price,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, PartialEq, Debug)]
pub struct PlaceBidResult {
    /// The only handle for revealing the bid later. Losing it forfeits the bid.
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub request_id: RequestId,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, PartialEq, Debug)]
pub struct BidDetails {
    #[schema(example = "auction1", value_type = String)]
    pub auction_id: AuctionId,
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub request_id: RequestId,
    #[schema(example = 300, value_type = i64)]
    pub price:      Price,
    #[schema(example = "Org2MSP", value_type = String)]
    pub org:        OrgId,
    #[schema(value_type = String)]
    pub bidder:     Principal,
    /// Present once the bid has been submitted for reveal.
    pub revealed:   Option<FullBid>,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, PartialEq, Debug)]
pub struct HighestBid {
    /// None when the auction has no valid revealed bid.
    pub bid: Option<FullBid>,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
pub struct BidPathParams {
    #[param(example = "auction1", value_type = String)]
    pub auction_id: AuctionId,
    #[param(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub request_id: RequestId,
}
