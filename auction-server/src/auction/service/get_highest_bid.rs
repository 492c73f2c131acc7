use {
    super::{
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

pub struct GetHighestBidInput {
    pub auction_id: AuctionId,
}

impl Service {
    /// The bid that would win if the auction ended now.
    #[tracing::instrument(skip_all, fields(auction_id = %input.auction_id), err(level = tracing::Level::TRACE))]
    pub async fn get_highest_bid(
        &self,
        ctx: TransactionContext<'_>,
        input: GetHighestBidInput,
    ) -> Result<Option<entities::FullBid>, RestError> {
        let auction = self
            .query_auction(
                ctx,
                QueryAuctionInput {
                    auction_id: input.auction_id,
                },
            )
            .await?;
        let bids = self
            .repo
            .get_full_bids(ctx.ledger, &auction.id)
            .await
            .map_err(ledger_unavailable)?;
        let bids = entities::in_submission_order(bids, &auction.bids);
        Ok(entities::select_winner(&bids).cloned())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            auction::service::tests::{
                bidder,
                create_auction,
                place_and_submit_bid,
            },
            kernel::{
                in_memory_ledger::InMemoryLedger,
                test_utils::{
                    context,
                    new_ledger,
                    DEFAULT_TX_TIMESTAMP,
                },
            },
        },
        std::sync::Arc,
        time::Duration,
    };

    async fn highest(
        ledger: &Arc<InMemoryLedger>,
        auction_id: &str,
    ) -> Result<Option<entities::FullBid>, RestError> {
        let tx = ledger.begin("tx-highest", DEFAULT_TX_TIMESTAMP);
        let caller = bidder("observer", "Org9MSP");
        Service::new_with_clock(DEFAULT_TX_TIMESTAMP)
            .get_highest_bid(
                context(&tx, &caller),
                GetHighestBidInput {
                    auction_id: auction_id.to_string(),
                },
            )
            .await
    }

    #[tokio::test]
    async fn test_get_highest_bid() {
        let ledger = new_ledger();
        create_auction(&ledger, "auction1").await;
        assert_eq!(highest(&ledger, "auction1").await, Ok(None));

        let revealed_at = DEFAULT_TX_TIMESTAMP + Duration::minutes(1);
        place_and_submit_bid(&ledger, "auction1", &bidder("A", "Org2MSP"), 100, "tx-a", revealed_at)
            .await
            .unwrap();
        let b = place_and_submit_bid(&ledger, "auction1", &bidder("B", "Org3MSP"), 300, "tx-b", revealed_at)
            .await
            .unwrap();
        assert_eq!(highest(&ledger, "auction1").await, Ok(Some(b)));
    }

    #[tokio::test]
    async fn test_get_highest_bid_of_missing_auction() {
        let ledger = new_ledger();
        let result = highest(&ledger, "auction1").await;
        assert!(matches!(result, Err(RestError::StateError(_))));
    }
}
