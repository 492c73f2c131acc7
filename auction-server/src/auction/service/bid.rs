use {
    super::{
        caller_identity,
        caller_organization,
        get_open_auction::GetOpenAuctionInput,
        ledger_unavailable,
        Service,
    },
    crate::{
        api::RestError,
        auction::entities,
        kernel::entities::{
            AuctionId,
            Price,
            RequestId,
            TransactionContext,
        },
    },
};

pub struct BidInput {
    pub auction_id: AuctionId,
    pub price:      Price,
}

impl Service {
    /// Records a sealed bid in the private collection of the caller's organization.
    /// The id of the enclosing transaction becomes the request id of the bid.
    #[tracing::instrument(skip_all, fields(auction_id = %input.auction_id, request_id), err(level = tracing::Level::TRACE))]
    pub async fn bid(
        &self,
        ctx: TransactionContext<'_>,
        input: BidInput,
    ) -> Result<RequestId, RestError> {
        let bidder = caller_identity(&ctx)?;
        let org = caller_organization(&ctx)?;
        let auction = self
            .get_open_auction(
                ctx,
                GetOpenAuctionInput {
                    auction_id: input.auction_id,
                },
            )
            .await?;

        let request_id = ctx.ledger.tx_id();
        tracing::Span::current().record("request_id", request_id.as_str());
        self.repo
            .add_bid_placeholder(
                ctx.ledger,
                &auction.id,
                entities::BidPlaceholder {
                    request_id: request_id.clone(),
                    price: input.price,
                    org,
                    bidder,
                },
            )
            .await
            .map_err(ledger_unavailable)?;
        Ok(request_id)
    }
}
