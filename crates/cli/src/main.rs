//! # blmonitor
//!
//! Watches a set of addresses against DNS blocklists and records every
//! listing change per customer.

mod bootstrap;
mod di;

use blmonitor_application::ports::BlocklistRepository;
use blmonitor_domain::CliOverrides;
use blmonitor_infrastructure::database::PgIpEventSource;
use blmonitor_infrastructure::dns::DnsblProbe;
use blmonitor_jobs::{JobRunner, ListScanJob, NewIpListenerJob};
use clap::Parser;
use di::{Repositories, UseCases};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "blmonitor")]
#[command(version)]
#[command(about = "DNS blocklist monitor for customer address space")]
struct Cli {
    /// Path to configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Database connection URL
    #[arg(long)]
    db: Option<String>,

    /// DNS resolver as host:port
    #[arg(long)]
    dns: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(
        cli.config.as_deref(),
        CliOverrides {
            database_url: cli.db,
            dns_server: cli.dns,
            log_level: cli.log_level,
        },
    )?;

    bootstrap::init_logging(&config);

    info!(
        config_file = cli.config.as_deref().unwrap_or("default"),
        notify_channel = %config.monitor.notify_channel,
        query_timeout_ms = config.dns.query_timeout,
        "Configuration loaded"
    );

    let pool = bootstrap::init_database(&config.database).await?;
    let resolver = bootstrap::resolve_dns_server(&config.dns).await?;

    let repos = Repositories::new(pool.clone());

    let lists = repos.blocklist.get_all().await?;
    if lists.is_empty() {
        anyhow::bail!("no lists configured");
    }
    info!(count = lists.len(), "Loaded blocklists");

    let shutdown = CancellationToken::new();
    bootstrap::spawn_signal_handler(shutdown.clone());

    let probe = Arc::new(
        DnsblProbe::new(resolver, Duration::from_millis(config.dns.query_timeout))
            .with_cancellation(shutdown.clone()),
    );
    let use_cases = UseCases::new(&repos, probe);

    let source = PgIpEventSource::connect(&pool, &config.monitor.notify_channel).await?;

    let mut runner = JobRunner::new(shutdown.clone());
    for list in &lists {
        runner = runner.with_list_scanner(ListScanJob::new(
            list.id.clone(),
            repos.blocklist.clone(),
            repos.scan_state.clone(),
            repos.ips.clone(),
            use_cases.verify_blocklist.clone(),
            use_cases.check_listing.clone(),
        ));
    }
    runner = runner.with_listener(NewIpListenerJob::new(
        Box::new(source),
        repos.blocklist.clone(),
        repos.results.clone(),
        use_cases.check_listing.clone(),
    ));

    info!("blmonitor running, press Ctrl+C to stop");

    let outcome = runner.run().await;
    pool.close().await;

    match outcome {
        Ok(()) => {
            info!("Shutdown complete");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Stopping after unrecoverable failure");
            Err(e.into())
        }
    }
}
