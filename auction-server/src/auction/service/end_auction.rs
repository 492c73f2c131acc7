use {
    super::{
        caller_identity,
        ledger_unavailable,
        query_auction::QueryAuctionInput,
        Service,
    },
    crate::{
        api::RestError,
        auction::entities,
        kernel::entities::{
            AuctionId,
            TransactionContext,
        },
    },
};

pub struct EndAuctionInput {
    pub auction_id: AuctionId,
}

impl Service {
    /// Settles the auction once its time limit has passed. The winner is picked from the
    /// revealed bid records, not from the copies kept in the auction.
    #[tracing::instrument(skip_all, fields(auction_id = %input.auction_id), err(level = tracing::Level::TRACE))]
    pub async fn end_auction(
        &self,
        ctx: TransactionContext<'_>,
        input: EndAuctionInput,
    ) -> Result<entities::Auction, RestError> {
        let caller = caller_identity(&ctx)?;
        let mut auction = self
            .query_auction(
                ctx,
                QueryAuctionInput {
                    auction_id: input.auction_id,
                },
            )
            .await?;
        if !auction.is_seller(&caller) {
            return Err(RestError::AuthorizationError(format!(
                "auction can only be ended by seller: {}",
                auction.id
            )));
        }
        if !auction.can_be_ended(ctx.ledger.tx_timestamp()) {
            return Err(RestError::TimingError(format!(
                "cannot end auction before time limit has passed: {}",
                auction.id
            )));
        }
        if auction.status == entities::AuctionStatus::Ended {
            return Err(RestError::StateError(format!(
                "auction has already ended: {}",
                auction.id
            )));
        }

        let bids = self
            .repo
            .get_full_bids(ctx.ledger, &auction.id)
            .await
            .map_err(ledger_unavailable)?;
        let bids = entities::in_submission_order(bids, &auction.bids);
        let (winner, price) = match entities::select_winner(&bids) {
            Some(bid) => (bid.bidder.clone(), bid.price),
            None => ("".to_string(), 0),
        };
        auction.winner = winner;
        auction.price = price;
        auction.status = entities::AuctionStatus::Ended;
        self.repo
            .update_auction(ctx.ledger, &auction)
            .await
            .map_err(ledger_unavailable)?;

        tracing::info!(winner = auction.winner, price = auction.price, "Auction ended");
        Ok(auction)
    }
}
