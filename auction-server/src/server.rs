use {
    crate::{
        api,
        auction,
        config::{
            Config,
            RunOptions,
        },
        kernel::in_memory_ledger::InMemoryLedger,
        metrics_api::{
            setup_metrics_recorder,
            start_metrics,
        },
        state::Store,
        time_oracle::{
            self,
            reconciler::{
                HashSeededReconciler,
                Reconciler,
            },
        },
    },
    anyhow::anyhow,
    futures::future::try_join,
    std::{
        sync::{
            atomic::{
                AtomicBool,
                Ordering,
            },
            Arc,
        },
        time::Duration,
    },
};

pub async fn start_server(run_options: RunOptions) -> anyhow::Result<()> {
    tokio::spawn(async move {
        tracing::info!("Registered shutdown signal handler...");
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?e, "Failed to listen for the shutdown signal");
        }
        tracing::info!("Shut down signal received, waiting for tasks...");
        SHOULD_EXIT.store(true, Ordering::Release);
    });

    let config = Config::load(&run_options.config.config).map_err(|err| {
        anyhow!(
            "Failed to load config from file({path}): {:?}",
            err,
            path = run_options.config.config
        )
    })?;

    let sources = config.time_oracle.sources()?;
    tracing::info!(
        servers = ?config.time_oracle.servers,
        timeout = ?config.time_oracle.timeout,
        "Configured time sources"
    );
    let reconciler: Arc<dyn Reconciler> = Arc::new(HashSeededReconciler);
    let time_oracle_service = time_oracle::service::Service::new(
        time_oracle::service::Config {
            query_timeout: config.time_oracle.timeout,
        },
        sources,
        reconciler.clone(),
    );
    let auction_service = auction::service::Service::new(
        auction::service::Config {
            single_valid_bid_per_org: config.auction.single_valid_bid_per_org,
        },
        time_oracle_service.clone(),
        reconciler,
    );

    let store = Arc::new(Store {
        ledger: Arc::new(InMemoryLedger::new(run_options.server.peer_org.clone())),
        auction_service,
        time_oracle_service,
        metrics_recorder: setup_metrics_recorder()?,
    });
    tracing::info!(peer_org = run_options.server.peer_org, "Ledger ready");

    try_join(
        api::start_api(run_options.clone(), store.clone()),
        start_metrics(run_options, store),
    )
    .await?;
    Ok(())
}

// Set once on ctrl-c. The API and metrics servers poll it to shut down gracefully.
pub(crate) static SHOULD_EXIT: AtomicBool = AtomicBool::new(false);
pub const EXIT_CHECK_INTERVAL: Duration = Duration::from_secs(1);
