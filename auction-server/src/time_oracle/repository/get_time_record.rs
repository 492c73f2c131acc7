use {
    super::{
        models,
        Repository,
    },
    crate::{
        kernel::ledger::Ledger,
        time_oracle::entities,
    },
};

impl Repository {
    pub async fn get_time_record(
        &self,
        ledger: &dyn Ledger,
        request_id: &str,
    ) -> anyhow::Result<Option<entities::TimeRecord>> {
        let key = models::time_record_key(request_id)?;
        match ledger.get_state(&key).await? {
            Some(bytes) => {
                let record: models::TimeRecord = serde_json::from_slice(&bytes)?;
                Ok(Some(record.into()))
            }
            None => Ok(None),
        }
    }
}
