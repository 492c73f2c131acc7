use {
    crate::{
        bid::FullBid,
        full_path,
        AccessLevel,
        AuctionId,
        OrgId,
        Price,
        Principal,
        Routable,
        RouteProperties,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    strum::AsRefStr,
    time::OffsetDateTime,
    utoipa::{
        IntoParams,
        ToResponse,
        ToSchema,
    },
};

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum AuctionStatus {
    /// The auction accepts new bids and reveals.
    Open,
    /// The seller stopped the auction early, the winner is not resolved yet.
    Closed,
    /// The winner is resolved, nothing changes anymore.
    Ended,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, PartialEq, Debug)]
pub struct Auction {
    #[serde(rename = "auctionID")]
    #[schema(example = "auction1", value_type = String)]
    pub auction_id:    AuctionId,
    #[serde(rename = "objectType")]
    #[schema(example = "auction")]
    pub object_type:   String,
    #[schema(example = "Laptop")]
    pub item:          String,
    #[schema(example = "x509::CN=seller,OU=client::CN=ca.org1.example.com", value_type = String)]
    pub seller:        Principal,
    #[schema(example = json!(["Org1MSP"]), value_type = Vec<String>)]
    pub organizations: Vec<OrgId>,
    /// Empty until the auction has ended with at least one valid bid.
    #[schema(example = "", value_type = String)]
    pub winner:        Principal,
    #[schema(example = 0, value_type = i64)]
    pub price:         Price,
    pub status:        AuctionStatus,
    #[serde(with = "crate::serde::datetime")]
    #[schema(example = "2025-06-25T19:59:59.31560409Z", value_type = String)]
    pub timelimit:     OffsetDateTime,
    pub description:   String,
    #[serde(rename = "pictureUrl")]
    pub picture_url:   String,
    /// Revealed bids, in the order they were submitted.
    pub bids:          Vec<FullBid>,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, PartialEq, Debug)]
pub struct Auctions {
    pub items: Vec<Auction>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct CreateAuction {
    /// Unique identifier of the new auction.
    #[schema(example = "auction1", value_type = String)]
    pub auction_id:  AuctionId,
    #[schema(example = "Laptop")]
    pub item:        String,
    /// Absolute deadline in RFC3339 format, nanosecond precision accepted.
    #[schema(example = "2025-06-25T19:59:59.31560409Z")]
    pub time_limit:  String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[schema(example = "https://example.com/laptop.png")]
    pub picture_url: String,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
pub struct AuctionIdPathParam {
    #[param(example = "auction1", value_type = String)]
    pub auction_id: AuctionId,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
pub struct SellerIdPathParam {
    /// Common name of the seller certificate, or the whole identity when it is not an X.509 one.
    #[param(example = "seller", value_type = String)]
    pub seller_id: String,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "")]
    PostAuction,
    #[strum(serialize = "open")]
    GetOpenAuctions,
    #[strum(serialize = ":auction_id")]
    GetAuction,
    #[strum(serialize = ":auction_id/close")]
    PostCloseAuction,
    #[strum(serialize = ":auction_id/end")]
    PostEndAuction,
    #[strum(serialize = ":auction_id/highest_bid")]
    GetHighestBid,
    #[strum(serialize = ":auction_id/bids")]
    PostBid,
    #[strum(serialize = ":auction_id/bids/:request_id")]
    GetBid,
    #[strum(serialize = ":auction_id/bids/:request_id/submit")]
    PostSubmitBid,
}

impl Routable for Route {
    fn properties(&self) -> RouteProperties {
        let full_path = full_path(&crate::Route::Auction, self);
        match self {
            Route::PostAuction
            | Route::PostCloseAuction
            | Route::PostEndAuction
            | Route::PostBid
            | Route::PostSubmitBid => RouteProperties {
                access_level: AccessLevel::Member,
                method: http::Method::POST,
                full_path,
            },
            Route::GetBid => RouteProperties {
                access_level: AccessLevel::Member,
                method: http::Method::GET,
                full_path,
            },
            Route::GetOpenAuctions | Route::GetAuction | Route::GetHighestBid => RouteProperties {
                access_level: AccessLevel::Public,
                method: http::Method::GET,
                full_path,
            },
        }
    }
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum SellerRoute {
    #[strum(serialize = ":seller_id/auctions")]
    GetAuctionsBySeller,
}

impl Routable for SellerRoute {
    fn properties(&self) -> RouteProperties {
        let full_path = full_path(&crate::Route::Seller, self);
        match self {
            SellerRoute::GetAuctionsBySeller => RouteProperties {
                access_level: AccessLevel::Public,
                method: http::Method::GET,
                full_path,
            },
        }
    }
}
