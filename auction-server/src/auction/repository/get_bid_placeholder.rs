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
    pub async fn get_bid_placeholder(
        &self,
        ledger: &dyn Ledger,
        org: &str,
        auction_id: &str,
        request_id: &str,
    ) -> anyhow::Result<Option<entities::BidPlaceholder>> {
        let key = models::bid_placeholder_key(auction_id, request_id)?;
        let collection = implicit_collection_name(org);
        match ledger.get_private_data(&collection, &key).await? {
            Some(bytes) => {
                let placeholder: models::BidPlaceholder = serde_json::from_slice(&bytes)?;
                Ok(Some(placeholder.into_entity(request_id.to_string())))
            }
            None => Ok(None),
        }
    }
}
