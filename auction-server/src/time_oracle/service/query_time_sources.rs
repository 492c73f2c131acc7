use {
    super::Service,
    crate::oracle_metrics::{
        TIME_SOURCE_QUERY_DURATION_METRIC,
        TIME_SOURCE_QUERY_TOTAL,
    },
    anyhow::anyhow,
    axum_prometheus::metrics,
    futures::future::join_all,
    std::time::Instant,
    time::OffsetDateTime,
};

impl Service {
    /// Queries every source concurrently and waits for all of them.
    /// Successful results keep the order of the configured sources.
    #[tracing::instrument(skip_all, fields(sources = self.sources.len()))]
    pub(super) async fn query_time_sources(&self) -> Vec<OffsetDateTime> {
        let query_timeout = self.config.query_timeout;
        let tasks = self.sources.iter().cloned().map(|source| {
            tokio::spawn(async move {
                let name = source.name();
                let started_at = Instant::now();
                let result = match tokio::time::timeout(query_timeout, source.query()).await {
                    Ok(result) => result,
                    Err(_) => Err(anyhow!("no response within {:?}", query_timeout)),
                };
                let labels = [
                    ("source", name.clone()),
                    (
                        "result",
                        if result.is_ok() { "success" } else { "error" }.to_string(),
                    ),
                ];
                metrics::counter!(TIME_SOURCE_QUERY_TOTAL, &labels).increment(1);
                metrics::histogram!(TIME_SOURCE_QUERY_DURATION_METRIC, &labels)
                    .record(started_at.elapsed().as_secs_f64());
                (name, result)
            })
        });

        let mut timestamps = vec![];
        let mut succeeded = vec![];
        let mut failed = vec![];
        for joined in join_all(tasks).await {
            match joined {
                Ok((name, Ok(timestamp))) => {
                    timestamps.push(timestamp);
                    succeeded.push(name);
                }
                Ok((name, Err(e))) => {
                    tracing::warn!(source = name, error = ?e, "Failed to query time source");
                    failed.push(name);
                }
                Err(e) => {
                    tracing::error!(error = ?e, "Time source query task did not complete");
                }
            }
        }
        tracing::info!(succeeded = ?succeeded, failed = ?failed, "Queried time sources");
        timestamps
    }
}
