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
    pub async fn add_time_record(
        &self,
        ledger: &dyn Ledger,
        record: entities::TimeRecord,
    ) -> anyhow::Result<()> {
        let key = models::time_record_key(&record.request_id)?;
        let record: models::TimeRecord = record.into();
        ledger.put_state(&key, serde_json::to_vec(&record)?).await
    }
}
