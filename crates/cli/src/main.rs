use anyhow::anyhow;
use clap::Parser;
use dnsbridge_application::{AsyncBridge, Dispatcher, ScriptValue, WorkQueue, WorkerPool};
use dnsbridge_domain::config::QueueDiscipline;
use dnsbridge_domain::CliOverrides;
use dnsbridge_infrastructure::{CallbackRegistry, DatagramHandler, FileReader, PromiseCallbacks};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

mod bootstrap;
mod server;

#[derive(Parser)]
#[command(name = "dnsbridge")]
#[command(version)]
#[command(about = "DNS wire codec over UDP with a single-threaded callback dispatcher")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Order in which queued callbacks run (lifo, fifo)
    #[arg(long)]
    queue_discipline: Option<QueueDiscipline>,

    /// Read a file through the async bridge at startup (repeatable)
    #[arg(long = "read", value_name = "FILE")]
    reads: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        log_level: cli.log_level.clone(),
        queue_discipline: cli.queue_discipline,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting dnsbridge v{}", env!("CARGO_PKG_VERSION"));

    let shutdown = CancellationToken::new();

    let queue = Arc::new(WorkQueue::new(config.dispatch.queue_discipline));
    let workers = WorkerPool::from_config(&config.workers)?;
    info!(
        bounded = workers.is_bounded(),
        max_threads = config.workers.max_threads,
        "Worker pool ready"
    );
    let bridge = AsyncBridge::new(Arc::clone(&queue), workers);

    let dispatch_thread = Dispatcher::spawn(
        Arc::clone(&queue),
        &config.dispatch,
        CallbackRegistry::new,
        shutdown.clone(),
    )?;

    if !cli.reads.is_empty() {
        schedule_reads(&queue, FileReader::new(bridge.clone()), cli.reads);
    }

    let ctrl_c_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown requested"),
            Err(e) => error!(error = %e, "Failed to listen for Ctrl-C"),
        }
        ctrl_c_token.cancel();
    });

    let dns_addr = format!("{}:{}", config.server.bind_address, config.server.dns_port);
    let handler = Arc::new(DatagramHandler::new());
    let served = server::start_dns_server(
        dns_addr,
        handler,
        config.server.max_datagram_size,
        shutdown.clone(),
    )
    .await;
    shutdown.cancel();

    let dispatched = tokio::task::spawn_blocking(move || dispatch_thread.join())
        .await?
        .map_err(|_| anyhow!("Dispatch thread panicked"))?;

    served?;
    info!(dispatched, "Server shutdown complete");
    Ok(())
}

/// Registration needs the script handle, so it is queued onto the dispatch
/// thread rather than done here.
fn schedule_reads(
    queue: &WorkQueue<CallbackRegistry>,
    reader: FileReader<CallbackRegistry>,
    paths: Vec<PathBuf>,
) {
    queue.enqueue(move |handle| {
        for path in paths {
            let shown = path.display().to_string();
            let failed = shown.clone();

            let callbacks = PromiseCallbacks::new(
                move |value| match value {
                    ScriptValue::Buffer(bytes) => {
                        info!(path = %shown, bytes = bytes.len(), "File read")
                    }
                    other => info!(path = %shown, value = ?other, "File read"),
                },
                move |error| warn!(path = %failed, error = ?error, "File read failed"),
            );

            if let Err(e) = reader.read(handle, callbacks, path) {
                error!(error = %e, "Failed to register file read");
            }
        }
    });
}
