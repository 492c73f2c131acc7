use {
    super::{
        query_auction::QueryAuctionInput,
        Service,
    },
    crate::{
        api::RestError,
        auction::entities,
        kernel::entities::TransactionContext,
    },
};

pub struct GetOpenAuctionInput {
    pub auction_id: String,
}

impl Service {
    /// Loads an auction that still accepts bids at the transaction timestamp.
    pub(super) async fn get_open_auction(
        &self,
        ctx: TransactionContext<'_>,
        input: GetOpenAuctionInput,
    ) -> Result<entities::Auction, RestError> {
        let auction = self
            .query_auction(
                ctx,
                QueryAuctionInput {
                    auction_id: input.auction_id,
                },
            )
            .await?;
        if auction.status != entities::AuctionStatus::Open {
            return Err(RestError::StateError(format!(
                "auction is not open for bidding: {}",
                auction.id
            )));
        }
        if auction.has_expired(ctx.ledger.tx_timestamp()) {
            return Err(RestError::TimingError(format!(
                "auction has already ended: {}",
                auction.id
            )));
        }
        Ok(auction)
    }
}
