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
    /// Revealed bids of an auction in key order.
    pub async fn get_full_bids(
        &self,
        ledger: &dyn Ledger,
        auction_id: &str,
    ) -> anyhow::Result<Vec<entities::FullBid>> {
        ledger
            .get_state_by_partial_composite_key(
                models::FULL_BID_KEY_TYPE,
                &[auction_id.to_string()],
            )
            .await?
            .into_iter()
            .map(|(_, bytes)| {
                let bid: models::FullBid = serde_json::from_slice(&bytes)?;
                Ok(bid.into())
            })
            .collect()
    }
}
