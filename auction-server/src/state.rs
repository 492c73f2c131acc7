use {
    crate::{
        auction,
        kernel::in_memory_ledger::{
            InMemoryLedger,
            LedgerTransaction,
        },
        time_oracle,
    },
    axum_prometheus::metrics_exporter_prometheus::PrometheusHandle,
    std::sync::Arc,
    time::OffsetDateTime,
    uuid::Uuid,
};

pub struct Store {
    pub ledger:              Arc<InMemoryLedger>,
    pub auction_service:     auction::service::Service,
    pub time_oracle_service: time_oracle::service::Service,
    pub metrics_recorder:    PrometheusHandle,
}

impl Store {
    /// Starts the ledger transaction of a single request. The transaction id doubles as the
    /// request id of a bid placed in it.
    pub fn begin_transaction(&self) -> LedgerTransaction {
        let tx_id = Uuid::new_v4().to_string();
        tracing::debug!(tx_id, "Starting transaction");
        self.ledger.begin(tx_id, OffsetDateTime::now_utc())
    }
}
