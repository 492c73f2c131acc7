use {
    super::{
        ledger_unavailable,
        Service,
    },
    crate::{
        api::RestError,
        auction::entities,
        kernel::entities::TransactionContext,
    },
};

impl Service {
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE))]
    pub async fn get_all_open_auctions(
        &self,
        ctx: TransactionContext<'_>,
    ) -> Result<Vec<entities::Auction>, RestError> {
        let auctions = self
            .repo
            .get_auctions(ctx.ledger)
            .await
            .map_err(ledger_unavailable)?;
        Ok(auctions
            .into_iter()
            .filter(|auction| auction.status == entities::AuctionStatus::Open)
            .collect())
    }
}
