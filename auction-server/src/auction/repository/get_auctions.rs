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
    /// Every auction in the public state, in key order. Records of other kinds are skipped.
    pub async fn get_auctions(&self, ledger: &dyn Ledger) -> anyhow::Result<Vec<entities::Auction>> {
        Ok(ledger
            .get_state_by_range("", "")
            .await?
            .into_iter()
            .filter_map(|(key, bytes)| {
                match serde_json::from_slice::<models::Auction>(&bytes) {
                    Ok(auction) if auction.object_type == models::AUCTION_OBJECT_TYPE => {
                        Some(auction.into())
                    }
                    _ => {
                        tracing::debug!(key, "Skipping record that is not an auction");
                        None
                    }
                }
            })
            .collect())
    }
}
