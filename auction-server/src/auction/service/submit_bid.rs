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
            RequestId,
            TransactionContext,
        },
        time_oracle::service::get_trusted_time::GetTrustedTimeInput,
    },
    outcry_api_types::serde::trusted_timestamp,
};

pub struct SubmitBidInput {
    pub auction_id: AuctionId,
    pub request_id: RequestId,
}

impl Service {
    /// Reveals a sealed bid of the caller's organization, stamping it with the trusted time
    /// of its request id.
    #[tracing::instrument(skip_all, fields(auction_id = %input.auction_id, request_id = %input.request_id), err(level = tracing::Level::TRACE))]
    pub async fn submit_bid(
        &self,
        ctx: TransactionContext<'_>,
        input: SubmitBidInput,
    ) -> Result<entities::FullBid, RestError> {
        let bidder = caller_identity(&ctx)?;
        let org = caller_organization(&ctx)?;
        let mut auction = self
            .get_open_auction(
                ctx,
                GetOpenAuctionInput {
                    auction_id: input.auction_id,
                },
            )
            .await?;

        let placeholder = self
            .repo
            .get_bid_placeholder(ctx.ledger, &org, &auction.id, &input.request_id)
            .await
            .map_err(ledger_unavailable)?
            .ok_or_else(|| RestError::StateError(format!("bid not found: {}", input.request_id)))?;
        if placeholder.price <= 0 {
            return Err(RestError::ValidationError(format!(
                "bid price must be positive: {}",
                placeholder.price
            )));
        }
        if self
            .repo
            .get_full_bid(ctx.ledger, &auction.id, &input.request_id)
            .await
            .map_err(ledger_unavailable)?
            .is_some()
        {
            return Err(RestError::StateError(format!(
                "bid {} was already submitted to auction {}",
                input.request_id, auction.id
            )));
        }

        let trusted_time = self
            .time_oracle
            .get_trusted_time(
                ctx.ledger,
                GetTrustedTimeInput {
                    request_id: input.request_id.clone(),
                },
            )
            .await?;
        let timestamp = trusted_timestamp::parse(&trusted_time).map_err(|e| {
            tracing::error!(error = ?e, trusted_time, "Failed to parse trusted timestamp");
            RestError::TemporarilyUnavailable
        })?;
        let timestamp = self
            .reconciler
            .select(&input.request_id, &[timestamp])
            .ok_or_else(|| {
                RestError::OracleError(format!(
                    "no trusted timestamp selected for request {}",
                    input.request_id
                ))
            })?;

        let valid = !self.config.single_valid_bid_per_org
            || !auction.bids.iter().any(|bid| bid.valid && bid.org == org);
        let bid = entities::FullBid {
            price: placeholder.price,
            org,
            bidder,
            valid,
            timestamp,
        };
        self.repo
            .add_full_bid(ctx.ledger, &auction.id, &input.request_id, bid.clone())
            .await
            .map_err(ledger_unavailable)?;
        auction.bids.push(bid.clone());
        self.repo
            .update_auction(ctx.ledger, &auction)
            .await
            .map_err(ledger_unavailable)?;

        tracing::info!(price = bid.price, valid, "Bid revealed");
        Ok(bid)
    }
}
