use {
    super::{
        entities,
        repository,
        service::{
            bid::BidInput,
            close_auction::CloseAuctionInput,
            create_auction::CreateAuctionInput,
            end_auction::EndAuctionInput,
            get_all_auctions_by_seller::GetAllAuctionsBySellerInput,
            get_highest_bid::GetHighestBidInput,
            query_auction::QueryAuctionInput,
            query_bid::QueryBidInput,
            submit_bid::SubmitBidInput,
        },
    },
    crate::{
        api::{
            RestError,
            WrappedRouter,
        },
        kernel::identity::ClientIdentity,
        state::Store,
    },
    axum::{
        extract::{
            Path,
            State,
        },
        Json,
        Router,
    },
    outcry_api_types::{
        auction::{
            Auction,
            AuctionIdPathParam,
            Auctions,
            CreateAuction,
            Route,
            SellerIdPathParam,
            SellerRoute,
        },
        bid::{
            BidDetails,
            BidPathParams,
            FullBid,
            HighestBid,
            PlaceBid,
            PlaceBidResult,
        },
        ErrorBodyResponse,
    },
    std::sync::Arc,
};

/// Create a new auction.
///
/// The caller becomes the seller. Only the seller's organization can endorse later changes to it.
#[utoipa::path(post, path = "/v1/auctions", request_body = CreateAuction, responses(
    (status = 200, description = "The created auction", body = Auction),
    (status = 400, response = ErrorBodyResponse),
    (status = 403, description = "The caller identity is missing", body = ErrorBodyResponse),
    (status = 409, description = "An auction with this id already exists", body = ErrorBodyResponse),
),)]
pub async fn post_auction(
    identity: ClientIdentity,
    State(store): State<Arc<Store>>,
    Json(params): Json<CreateAuction>,
) -> Result<Json<Auction>, RestError> {
    let tx = store.begin_transaction();
    let auction = store
        .auction_service
        .create_auction(
            tx.context(&identity),
            CreateAuctionInput {
                auction_id:  params.auction_id,
                item:        params.item,
                time_limit:  params.time_limit,
                description: params.description,
                picture_url: params.picture_url,
            },
        )
        .await?;
    tx.commit().await?;
    Ok(Json(auction.into()))
}

/// Query an auction with its revealed bids.
#[utoipa::path(get, path = "/v1/auctions/{auction_id}", params(AuctionIdPathParam), responses(
    (status = 200, body = Auction),
    (status = 409, description = "Auction was not found", body = ErrorBodyResponse),
),)]
pub async fn get_auction(
    identity: ClientIdentity,
    State(store): State<Arc<Store>>,
    Path(params): Path<AuctionIdPathParam>,
) -> Result<Json<Auction>, RestError> {
    let tx = store.begin_transaction();
    let auction = store
        .auction_service
        .query_auction(
            tx.context(&identity),
            QueryAuctionInput {
                auction_id: params.auction_id,
            },
        )
        .await?;
    Ok(Json(auction.into()))
}

/// List every auction that is still open for bidding.
#[utoipa::path(get, path = "/v1/auctions/open", responses(
    (status = 200, body = Auctions),
    (status = 503, response = ErrorBodyResponse),
),)]
pub async fn get_open_auctions(
    identity: ClientIdentity,
    State(store): State<Arc<Store>>,
) -> Result<Json<Auctions>, RestError> {
    let tx = store.begin_transaction();
    let auctions = store
        .auction_service
        .get_all_open_auctions(tx.context(&identity))
        .await?;
    Ok(Json(Auctions {
        items: auctions.into_iter().map(Into::into).collect(),
    }))
}

/// List the auctions of a seller.
#[utoipa::path(get, path = "/v1/sellers/{seller_id}/auctions", params(SellerIdPathParam), responses(
    (status = 200, body = Auctions),
    (status = 503, response = ErrorBodyResponse),
),)]
pub async fn get_auctions_by_seller(
    identity: ClientIdentity,
    State(store): State<Arc<Store>>,
    Path(params): Path<SellerIdPathParam>,
) -> Result<Json<Auctions>, RestError> {
    let tx = store.begin_transaction();
    let auctions = store
        .auction_service
        .get_all_auctions_by_seller(
            tx.context(&identity),
            GetAllAuctionsBySellerInput {
                seller_id: params.seller_id,
            },
        )
        .await?;
    Ok(Json(Auctions {
        items: auctions.into_iter().map(Into::into).collect(),
    }))
}

/// Stop accepting bids on an open auction.
#[utoipa::path(post, path = "/v1/auctions/{auction_id}/close", params(AuctionIdPathParam), responses(
    (status = 200, description = "The closed auction", body = Auction),
    (status = 403, description = "The caller is not the seller", body = ErrorBodyResponse),
    (status = 409, description = "The auction is missing or not open", body = ErrorBodyResponse),
),)]
pub async fn post_close_auction(
    identity: ClientIdentity,
    State(store): State<Arc<Store>>,
    Path(params): Path<AuctionIdPathParam>,
) -> Result<Json<Auction>, RestError> {
    let tx = store.begin_transaction();
    let auction = store
        .auction_service
        .close_auction(
            tx.context(&identity),
            CloseAuctionInput {
                auction_id: params.auction_id,
            },
        )
        .await?;
    tx.commit().await?;
    Ok(Json(auction.into()))
}

/// Resolve the winner of an auction whose time limit has passed.
#[utoipa::path(post, path = "/v1/auctions/{auction_id}/end", params(AuctionIdPathParam), responses(
    (status = 200, description = "The ended auction with its winner", body = Auction),
    (status = 403, description = "The caller is not the seller", body = ErrorBodyResponse),
    (status = 409, description = "The auction is missing, already ended or its time limit has not passed yet", body = ErrorBodyResponse),
),)]
pub async fn post_end_auction(
    identity: ClientIdentity,
    State(store): State<Arc<Store>>,
    Path(params): Path<AuctionIdPathParam>,
) -> Result<Json<Auction>, RestError> {
    let tx = store.begin_transaction();
    let auction = store
        .auction_service
        .end_auction(
            tx.context(&identity),
            EndAuctionInput {
                auction_id: params.auction_id,
            },
        )
        .await?;
    tx.commit().await?;
    Ok(Json(auction.into()))
}

/// Query the revealed bid that currently wins the auction.
#[utoipa::path(get, path = "/v1/auctions/{auction_id}/highest_bid", params(AuctionIdPathParam), responses(
    (status = 200, body = HighestBid),
    (status = 409, description = "Auction was not found", body = ErrorBodyResponse),
),)]
pub async fn get_highest_bid(
    identity: ClientIdentity,
    State(store): State<Arc<Store>>,
    Path(params): Path<AuctionIdPathParam>,
) -> Result<Json<HighestBid>, RestError> {
    let tx = store.begin_transaction();
    let bid = store
        .auction_service
        .get_highest_bid(
            tx.context(&identity),
            GetHighestBidInput {
                auction_id: params.auction_id,
            },
        )
        .await?;
    Ok(Json(HighestBid {
        bid: bid.map(Into::into),
    }))
}

/// Place a sealed bid on an open auction.
///
/// The price stays private to the caller's organization until the bid is submitted.
#[utoipa::path(post, path = "/v1/auctions/{auction_id}/bids", params(AuctionIdPathParam), request_body = PlaceBid, responses(
    (status = 200, description = "Bid was placed successfully", body = PlaceBidResult),
    (status = 409, description = "The auction is missing, not open or past its time limit", body = ErrorBodyResponse),
),)]
pub async fn post_bid(
    identity: ClientIdentity,
    State(store): State<Arc<Store>>,
    Path(params): Path<AuctionIdPathParam>,
    Json(bid): Json<PlaceBid>,
) -> Result<Json<PlaceBidResult>, RestError> {
    let tx = store.begin_transaction();
    let request_id = store
        .auction_service
        .bid(
            tx.context(&identity),
            BidInput {
                auction_id: params.auction_id,
                price:      bid.price,
            },
        )
        .await?;
    tx.commit().await?;
    Ok(Json(PlaceBidResult { request_id }))
}

/// Query a sealed bid of the caller's organization.
#[utoipa::path(get, path = "/v1/auctions/{auction_id}/bids/{request_id}", params(BidPathParams), responses(
    (status = 200, body = BidDetails),
    (status = 403, description = "The bid belongs to another organization", body = ErrorBodyResponse),
    (status = 409, description = "Bid was not found", body = ErrorBodyResponse),
),)]
pub async fn get_bid(
    identity: ClientIdentity,
    State(store): State<Arc<Store>>,
    Path(params): Path<BidPathParams>,
) -> Result<Json<BidDetails>, RestError> {
    let tx = store.begin_transaction();
    let record = store
        .auction_service
        .query_bid(
            tx.context(&identity),
            QueryBidInput {
                auction_id: params.auction_id,
                request_id: params.request_id,
            },
        )
        .await?;
    Ok(Json(record.into()))
}

/// Reveal a sealed bid.
///
/// The bid is stamped with the trusted time of its request id and becomes visible to everyone.
#[utoipa::path(post, path = "/v1/auctions/{auction_id}/bids/{request_id}/submit", params(BidPathParams), responses(
    (status = 200, description = "The revealed bid", body = FullBid),
    (status = 400, response = ErrorBodyResponse),
    (status = 409, description = "The bid or auction does not allow the reveal", body = ErrorBodyResponse),
    (status = 503, description = "No trusted time source was reachable", body = ErrorBodyResponse),
),)]
pub async fn post_submit_bid(
    identity: ClientIdentity,
    State(store): State<Arc<Store>>,
    Path(params): Path<BidPathParams>,
) -> Result<Json<FullBid>, RestError> {
    let tx = store.begin_transaction();
    let bid = store
        .auction_service
        .submit_bid(
            tx.context(&identity),
            SubmitBidInput {
                auction_id: params.auction_id,
                request_id: params.request_id,
            },
        )
        .await?;
    tx.commit().await?;
    Ok(Json(bid.into()))
}

pub fn get_routes() -> Router<Arc<Store>> {
    WrappedRouter::new()
        .route(Route::PostAuction, post_auction)
        .route(Route::GetOpenAuctions, get_open_auctions)
        .route(Route::GetAuction, get_auction)
        .route(Route::PostCloseAuction, post_close_auction)
        .route(Route::PostEndAuction, post_end_auction)
        .route(Route::GetHighestBid, get_highest_bid)
        .route(Route::PostBid, post_bid)
        .route(Route::GetBid, get_bid)
        .route(Route::PostSubmitBid, post_submit_bid)
        .route(SellerRoute::GetAuctionsBySeller, get_auctions_by_seller)
        .router
}

impl From<entities::FullBid> for FullBid {
    fn from(bid: entities::FullBid) -> Self {
        Self {
            object_type: repository::BID_OBJECT_TYPE.to_string(),
            price:       bid.price,
            org:         bid.org,
            bidder:      bid.bidder,
            valid:       bid.valid,
            timestamp:   bid.timestamp,
        }
    }
}

impl From<entities::Auction> for Auction {
    fn from(auction: entities::Auction) -> Self {
        Self {
            auction_id:    auction.id,
            object_type:   repository::AUCTION_OBJECT_TYPE.to_string(),
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

impl From<entities::BidRecord> for BidDetails {
    fn from(record: entities::BidRecord) -> Self {
        Self {
            auction_id: record.auction_id,
            request_id: record.placeholder.request_id,
            price:      record.placeholder.price,
            org:        record.placeholder.org,
            bidder:     record.placeholder.bidder,
            revealed:   record.revealed.map(Into::into),
        }
    }
}
