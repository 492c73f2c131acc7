use {
    super::{
        caller_organization,
        ledger_unavailable,
        Service,
    },
    crate::{
        api::RestError,
        auction::entities,
        kernel::entities::{
            AuctionId,
            RequestId,
            TransactionContext,
        },
    },
};

pub struct QueryBidInput {
    pub auction_id: AuctionId,
    pub request_id: RequestId,
}

impl Service {
    /// Reads a sealed bid back. Only members of the organization that placed the bid can
    /// read it, and only through a peer of that organization. Placeholders live in the
    /// private collection of the placing organization, so reading from the caller's own
    /// collection is the ownership check.
    #[tracing::instrument(skip_all, fields(auction_id = %input.auction_id, request_id = %input.request_id), err(level = tracing::Level::TRACE))]
    pub async fn query_bid(
        &self,
        ctx: TransactionContext<'_>,
        input: QueryBidInput,
    ) -> Result<entities::BidRecord, RestError> {
        let org = caller_organization(&ctx)?;
        let peer_org = ctx.ledger.peer_organization();
        if org != peer_org {
            return Err(RestError::AuthorizationError(format!(
                "cannot read bids of organization {} from a peer of {}",
                org, peer_org
            )));
        }

        let placeholder = self
            .repo
            .get_bid_placeholder(ctx.ledger, &peer_org, &input.auction_id, &input.request_id)
            .await
            .map_err(ledger_unavailable)?
            .ok_or_else(|| RestError::StateError(format!("bid not found: {}", input.request_id)))?;

        let revealed = self
            .repo
            .get_full_bid(ctx.ledger, &input.auction_id, &input.request_id)
            .await
            .map_err(ledger_unavailable)?;
        Ok(entities::BidRecord {
            auction_id: input.auction_id,
            placeholder,
            revealed,
        })
    }
}
