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
    pub async fn get_full_bid(
        &self,
        ledger: &dyn Ledger,
        auction_id: &str,
        request_id: &str,
    ) -> anyhow::Result<Option<entities::FullBid>> {
        let key = models::full_bid_key(auction_id, request_id)?;
        match ledger.get_state(&key).await? {
            Some(bytes) => {
                let bid: models::FullBid = serde_json::from_slice(&bytes)?;
                Ok(Some(bid.into()))
            }
            None => Ok(None),
        }
    }
}
