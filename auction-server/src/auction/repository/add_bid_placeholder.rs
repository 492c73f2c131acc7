use {
    super::{
        models,
        Repository,
    },
    crate::{
        auction::entities,
        kernel::ledger::{
            implicit_collection_name,
            Ledger,
        },
    },
};

impl Repository {
    /// Stores the placeholder in the private collection of the bidding organization.
    pub async fn add_bid_placeholder(
        &self,
        ledger: &dyn Ledger,
        auction_id: &str,
        placeholder: entities::BidPlaceholder,
    ) -> anyhow::Result<()> {
        let key = models::bid_placeholder_key(auction_id, &placeholder.request_id)?;
        let collection = implicit_collection_name(&placeholder.org);
        let record: models::BidPlaceholder = placeholder.into();
        ledger
            .put_private_data(&collection, &key, serde_json::to_vec(&record)?)
            .await
    }
}
