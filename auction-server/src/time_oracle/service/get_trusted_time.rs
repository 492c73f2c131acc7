use {
    super::Service,
    crate::{
        api::RestError,
        kernel::{
            entities::RequestId,
            ledger::Ledger,
        },
        time_oracle::entities,
    },
    outcry_api_types::serde::trusted_timestamp,
};

pub struct GetTrustedTimeInput {
    pub request_id: RequestId,
}

impl Service {
    /// Returns the trusted timestamp of a request, resolving it from the time sources
    /// the first time the request id is seen.
    #[tracing::instrument(skip_all, fields(request_id = %input.request_id), err(level = tracing::Level::TRACE))]
    pub async fn get_trusted_time(
        &self,
        ledger: &dyn Ledger,
        input: GetTrustedTimeInput,
    ) -> Result<String, RestError> {
        let cached = self
            .repo
            .get_time_record(ledger, &input.request_id)
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "Failed to read time record");
                RestError::TemporarilyUnavailable
            })?;
        if let Some(record) = cached {
            return Ok(record.timestamp);
        }

        let candidates = self.query_time_sources().await;
        let selected = self
            .reconciler
            .select(&input.request_id, &candidates)
            .ok_or_else(|| {
                RestError::OracleError(format!(
                    "no trusted time source reachable for request {}",
                    input.request_id
                ))
            })?;
        let timestamp = trusted_timestamp::format(selected).map_err(|e| {
            tracing::error!(error = ?e, timestamp = ?selected, "Failed to format trusted timestamp");
            RestError::TemporarilyUnavailable
        })?;

        self.repo
            .add_time_record(
                ledger,
                entities::TimeRecord {
                    request_id: input.request_id,
                    timestamp:  timestamp.clone(),
                },
            )
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "Failed to store time record");
                RestError::TemporarilyUnavailable
            })?;
        Ok(timestamp)
    }
}
