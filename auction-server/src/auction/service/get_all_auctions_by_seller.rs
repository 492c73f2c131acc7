use {
    super::{
        ledger_unavailable,
        Service,
    },
    crate::{
        api::RestError,
        auction::entities,
        kernel::{
            entities::TransactionContext,
            identity::common_name,
        },
    },
};

pub struct GetAllAuctionsBySellerInput {
    /// Common name of the seller certificate, or the whole principal for other identities.
    pub seller_id: String,
}

impl Service {
    #[tracing::instrument(skip_all, fields(seller_id = %input.seller_id), err(level = tracing::Level::TRACE))]
    pub async fn get_all_auctions_by_seller(
        &self,
        ctx: TransactionContext<'_>,
        input: GetAllAuctionsBySellerInput,
    ) -> Result<Vec<entities::Auction>, RestError> {
        let auctions = self
            .repo
            .get_auctions(ctx.ledger)
            .await
            .map_err(ledger_unavailable)?;
        Ok(auctions
            .into_iter()
            .filter(|auction| common_name(&auction.seller) == input.seller_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            auction::service::{
                create_auction::CreateAuctionInput,
                tests::{
                    bidder,
                    create_auction,
                    seller,
                },
            },
            kernel::test_utils::{
                context,
                new_ledger,
                DEFAULT_TX_TIMESTAMP,
            },
        },
    };

    #[tokio::test]
    async fn test_get_all_auctions_by_seller() {
        let ledger = new_ledger();
        create_auction(&ledger, "auction1").await;
        create_auction(&ledger, "auction2").await;

        let service = Service::new_with_clock(DEFAULT_TX_TIMESTAMP);
        let other = bidder("other", "Org2MSP");
        let tx = ledger.begin("tx-other", DEFAULT_TX_TIMESTAMP);
        service
            .create_auction(
                context(&tx, &other),
                CreateAuctionInput {
                    auction_id:  "auction3".to_string(),
                    item:        "Phone".to_string(),
                    time_limit:  "2024-05-01T13:00:00Z".to_string(),
                    description: "".to_string(),
                    picture_url: "".to_string(),
                },
            )
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let tx = ledger.begin("tx-query", DEFAULT_TX_TIMESTAMP);
        let caller = seller();
        let by_seller = |seller_id: &str| GetAllAuctionsBySellerInput {
            seller_id: seller_id.to_string(),
        };
        let auctions = service
            .get_all_auctions_by_seller(context(&tx, &caller), by_seller("seller"))
            .await
            .unwrap();
        assert_eq!(
            auctions.iter().map(|auction| auction.id.as_str()).collect::<Vec<_>>(),
            vec!["auction1", "auction2"]
        );

        let auctions = service
            .get_all_auctions_by_seller(context(&tx, &caller), by_seller("other"))
            .await
            .unwrap();
        assert_eq!(auctions.len(), 1);
        assert!(service
            .get_all_auctions_by_seller(context(&tx, &caller), by_seller("nobody"))
            .await
            .unwrap()
            .is_empty());
    }
}
