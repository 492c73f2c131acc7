//! Metrics Server
//!
//! This server serves the time source query metrics over /metrics in OpenMetrics format.
use {
    crate::{
        config::RunOptions,
        oracle_metrics::{
            TIME_SOURCE_QUERY_DURATION_BUCKETS,
            TIME_SOURCE_QUERY_DURATION_METRIC,
        },
        server::{
            EXIT_CHECK_INTERVAL,
            SHOULD_EXIT,
        },
        state::Store,
    },
    anyhow::Result,
    axum::{
        routing::get,
        Router,
    },
    axum_prometheus::{
        metrics_exporter_prometheus::{
            Matcher,
            PrometheusBuilder,
            PrometheusHandle,
        },
        PrometheusMetricLayerBuilder,
    },
    std::sync::{
        atomic::Ordering,
        Arc,
    },
};

/// Installs the global recorder the `metrics` macros report to.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle> {
    Ok(PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(TIME_SOURCE_QUERY_DURATION_METRIC.to_string()),
            TIME_SOURCE_QUERY_DURATION_BUCKETS,
        )?
        .install_recorder()?)
}

pub async fn start_metrics(run_options: RunOptions, store: Arc<Store>) -> Result<()> {
    tracing::info!(address = %run_options.server.metrics_addr, "Starting Metrics Server...");

    let (_, metric_handle) = PrometheusMetricLayerBuilder::new()
        .with_metrics_from_fn(|| store.metrics_recorder.clone())
        .build_pair();
    let app = Router::new();
    let app = app.route("/metrics", get(|| async move { metric_handle.render() }));

    let listener = tokio::net::TcpListener::bind(&run_options.server.metrics_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            while !SHOULD_EXIT.load(Ordering::Acquire) {
                tokio::time::sleep(EXIT_CHECK_INTERVAL).await;
            }
            tracing::info!("Shutting down metrics server...");
        })
        .await?;
    Ok(())
}
