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
    pub async fn add_full_bid(
        &self,
        ledger: &dyn Ledger,
        auction_id: &str,
        request_id: &str,
        bid: entities::FullBid,
    ) -> anyhow::Result<()> {
        let key = models::full_bid_key(auction_id, request_id)?;
        let record: models::FullBid = bid.into();
        ledger.put_state(&key, serde_json::to_vec(&record)?).await
    }
}
