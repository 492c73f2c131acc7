use {
    super::{
        ledger_unavailable,
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

pub struct QueryAuctionInput {
    pub auction_id: AuctionId,
}

impl Service {
    #[tracing::instrument(skip_all, fields(auction_id = %input.auction_id), err(level = tracing::Level::TRACE))]
    pub async fn query_auction(
        &self,
        ctx: TransactionContext<'_>,
        input: QueryAuctionInput,
    ) -> Result<entities::Auction, RestError> {
        self.repo
            .get_auction(ctx.ledger, &input.auction_id)
            .await
            .map_err(ledger_unavailable)?
            .ok_or_else(|| RestError::StateError(format!("auction {} not found", input.auction_id)))
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
            },
            kernel::test_utils::{
                context,
                new_ledger,
                DEFAULT_TX_TIMESTAMP,
            },
        },
    };

    #[tokio::test]
    async fn test_query_auction() {
        let ledger = new_ledger();
        let created = create_auction(&ledger, "auction1").await;

        let tx = ledger.begin("tx1", DEFAULT_TX_TIMESTAMP);
        let caller = bidder("anyone", "Org2MSP");
        let service = Service::new_with_clock(DEFAULT_TX_TIMESTAMP);
        let auction = service
            .query_auction(
                context(&tx, &caller),
                QueryAuctionInput {
                    auction_id: "auction1".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(auction, created);

        let missing = service
            .query_auction(
                context(&tx, &caller),
                QueryAuctionInput {
                    auction_id: "auction2".to_string(),
                },
            )
            .await;
        assert_eq!(
            missing,
            Err(RestError::StateError("auction auction2 not found".to_string()))
        );
    }
}
