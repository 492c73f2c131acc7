use {
    super::{
        models,
        Repository,
    },
    crate::{
        auction::entities,
        kernel::ledger::Ledger,
    },
};

impl Repository {
    // NOTE: Do not call this function directly. Instead call `create_auction` from `Service`.
    pub async fn add_auction(
        &self,
        ledger: &dyn Ledger,
        auction: entities::Auction,
    ) -> anyhow::Result<entities::Auction> {
        let record: models::Auction = auction.clone().into();
        ledger
            .put_state(&auction.id, serde_json::to_vec(&record)?)
            .await?;
        Ok(auction)
    }
}
