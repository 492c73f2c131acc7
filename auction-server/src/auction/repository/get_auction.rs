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
    pub async fn get_auction(
        &self,
        ledger: &dyn Ledger,
        auction_id: &str,
    ) -> anyhow::Result<Option<entities::Auction>> {
        match ledger.get_state(auction_id).await? {
            Some(bytes) => {
                let auction: models::Auction = serde_json::from_slice(&bytes)?;
                Ok(Some(auction.into()))
            }
            None => Ok(None),
        }
    }
}
