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
    pub async fn update_auction(
        &self,
        ledger: &dyn Ledger,
        auction: &entities::Auction,
    ) -> anyhow::Result<()> {
        let record: models::Auction = auction.clone().into();
        ledger
            .put_state(&auction.id, serde_json::to_vec(&record)?)
            .await
    }
}
