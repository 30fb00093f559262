//! poolscan daemon: opens the pool store and serves read-only queries.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use config::DaemonConfig;
use poolscan_query::ChainWalker;
use poolscan_rpc::{RpcDispatcher, RpcServer};
use poolscan_store::PoolStore;
use poolscan_store_lmdb::integrity::{check_data_dir, check_integrity};
use poolscan_store_lmdb::LmdbPoolStore;
use poolscan_utils::{init_logging, LogFormat};

#[derive(Parser)]
#[command(name = "poolscan-daemon", about = "Read-only query node for the pool chain")]
struct Cli {
    /// Directory of the LMDB pool store.
    #[arg(long, env = "POOLSCAN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// RPC server port.
    #[arg(long, env = "POOLSCAN_RPC_PORT")]
    rpc_port: Option<u16>,

    /// Address the RPC server binds to.
    #[arg(long, env = "POOLSCAN_BIND")]
    bind: Option<std::net::IpAddr>,

    /// Largest page a list command may return.
    #[arg(long, env = "POOLSCAN_MAX_PAGE_SIZE")]
    max_page_size: Option<usize>,

    /// Log format: "human" or "json".
    #[arg(long, env = "POOLSCAN_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "POOLSCAN_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Serve RPC commands until interrupted.
    Serve,
    /// Open the store, report its state and verify the chain links.
    Check,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<(DaemonConfig, Command)> {
        let mut config = match &self.config {
            Some(path) => DaemonConfig::from_toml_file(path)?,
            None => DaemonConfig::default(),
        };
        if let Some(data_dir) = self.data_dir {
            config.data_dir = data_dir;
        }
        if let Some(port) = self.rpc_port {
            config.rpc_port = port;
        }
        if let Some(bind) = self.bind {
            config.bind_address = bind;
        }
        if let Some(max) = self.max_page_size {
            config.max_page_size = max;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        config.validate()?;
        Ok((config, self.command))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, command) = Cli::parse().into_config()?;
    init_logging(config.log_format, &config.log_level);

    if let Err(e) = check_data_dir(&config.data_dir) {
        tracing::warn!("{e}");
    }
    let store = Arc::new(LmdbPoolStore::open(&config.data_dir, config.map_size));

    match command {
        Command::Serve => serve(config, store).await,
        Command::Check => check(store),
    }
}

async fn serve(config: DaemonConfig, store: Arc<LmdbPoolStore>) -> anyhow::Result<()> {
    let dispatcher = match RpcDispatcher::init(store.clone()) {
        Ok(dispatcher) => dispatcher.with_max_page_size(config.max_page_size),
        Err(e) => {
            tracing::error!(
                data_dir = %config.data_dir.display(),
                "Storage is not open: {}",
                store.last_error_message()
            );
            return Err(e).context("no RPC commands registered");
        }
    };
    tracing::info!(
        data_dir = %config.data_dir.display(),
        pools = store.pool_count()?,
        head = %store.head_hash()?,
        "Storage is open"
    );

    let server = RpcServer::new(config.rpc_addr(), Arc::new(dispatcher));
    server.start(shutdown_signal()).await?;

    tracing::info!("poolscan daemon exited cleanly");
    Ok(())
}

fn check(store: Arc<LmdbPoolStore>) -> anyhow::Result<()> {
    let Some(env) = store.environment() else {
        anyhow::bail!("Storage is not open: {}", store.last_error_message());
    };
    let report = check_integrity(env)?;
    for error in &report.errors {
        tracing::error!("{error}");
    }
    tracing::info!(
        schema_version = env.schema_version()?,
        databases = report.databases_checked,
        entries = report.total_entries,
        healthy = report.is_healthy(),
        "integrity check"
    );

    let pools = store.pool_count()?;
    let head = store.head_hash()?;
    let mut reachable = 0u64;
    for pool in ChainWalker::new(&*store, head) {
        pool?;
        reachable += 1;
    }
    tracing::info!(%head, pools, reachable, "chain check");
    if reachable < pools {
        tracing::warn!(
            unreachable = pools - reachable,
            "some pools are not reachable from the head"
        );
    }
    if !report.is_healthy() {
        anyhow::bail!("integrity check found {} problem(s)", report.errors.len());
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping RPC server");
}
