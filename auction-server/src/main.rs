use {
    anyhow::Result,
    clap::Parser,
    server::start_server,
    std::io::IsTerminal,
    tracing_subscriber::filter::LevelFilter,
};

mod api;
mod auction;
mod config;
mod kernel;
mod metrics_api;
mod oracle_metrics;
mod server;
mod state;
mod time_oracle;

#[tokio::main]
async fn main() -> Result<()> {
    let fmt_builder = tracing_subscriber::fmt()
        .with_file(false)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stderr().is_terminal());

    // Compact output on a terminal, JSON for log collectors.
    if std::io::stderr().is_terminal() {
        tracing::subscriber::set_global_default(fmt_builder.compact().finish())?;
    } else {
        tracing::subscriber::set_global_default(fmt_builder.json().finish())?;
    }

    match config::Options::parse() {
        config::Options::Run(opts) => start_server(opts).await,
    }
}
