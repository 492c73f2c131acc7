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

pub struct CloseAuctionInput {
    pub auction_id: AuctionId,
}

impl Service {
    /// Stops bidding on an open auction. Only the seller may close it.
    #[tracing::instrument(skip_all, fields(auction_id = %input.auction_id), err(level = tracing::Level::TRACE))]
    pub async fn close_auction(
        &self,
        ctx: TransactionContext<'_>,
        input: CloseAuctionInput,
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
                "auction can only be closed by seller: {}",
                auction.id
            )));
        }
        if auction.status != entities::AuctionStatus::Open {
            return Err(RestError::StateError(format!(
                "cannot close auction that is not open: {}",
                auction.id
            )));
        }

        auction.status = entities::AuctionStatus::Closed;
        self.repo
            .update_auction(ctx.ledger, &auction)
            .await
            .map_err(ledger_unavailable)?;
        tracing::info!("Auction closed");
        Ok(auction)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            auction::service::{
                end_auction::EndAuctionInput,
                tests::{
                    after_time_limit,
                    bidder,
                    create_auction,
                    seller,
                },
            },
            kernel::{
                identity::ClientIdentity,
                in_memory_ledger::InMemoryLedger,
                test_utils::{
                    context,
                    new_ledger,
                    DEFAULT_TX_TIMESTAMP,
                },
            },
        },
        std::sync::Arc,
    };

    async fn close(
        ledger: &Arc<InMemoryLedger>,
        caller: &ClientIdentity,
    ) -> Result<entities::Auction, RestError> {
        let tx = ledger.begin("tx-close", DEFAULT_TX_TIMESTAMP);
        let auction = Service::new_with_clock(DEFAULT_TX_TIMESTAMP)
            .close_auction(
                context(&tx, caller),
                CloseAuctionInput {
                    auction_id: "auction1".to_string(),
                },
            )
            .await?;
        tx.commit().await?;
        Ok(auction)
    }

    #[tokio::test]
    async fn test_close_auction() {
        let ledger = new_ledger();
        create_auction(&ledger, "auction1").await;
        let auction = close(&ledger, &seller()).await.unwrap();
        assert_eq!(auction.status, entities::AuctionStatus::Closed);
    }

    #[tokio::test]
    async fn test_close_auction_twice() {
        let ledger = new_ledger();
        create_auction(&ledger, "auction1").await;
        close(&ledger, &seller()).await.unwrap();
        assert_eq!(
            close(&ledger, &seller()).await,
            Err(RestError::StateError(
                "cannot close auction that is not open: auction1".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_close_ended_auction() {
        let ledger = new_ledger();
        create_auction(&ledger, "auction1").await;
        let seller = seller();
        let tx = ledger.begin("tx-end", after_time_limit());
        Service::new_with_clock(after_time_limit())
            .end_auction(
                context(&tx, &seller),
                EndAuctionInput {
                    auction_id: "auction1".to_string(),
                },
            )
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(
            close(&ledger, &seller).await,
            Err(RestError::StateError(
                "cannot close auction that is not open: auction1".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_close_auction_by_non_seller() {
        let ledger = new_ledger();
        create_auction(&ledger, "auction1").await;
        let result = close(&ledger, &bidder("alice", "Org1MSP")).await;
        assert!(matches!(result, Err(RestError::AuthorizationError(_))));
    }

    #[tokio::test]
    async fn test_close_missing_auction() {
        let ledger = new_ledger();
        let result = close(&ledger, &seller()).await;
        assert!(matches!(result, Err(RestError::StateError(_))));
    }
}
