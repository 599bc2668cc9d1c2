use crate::arguments::BridgeArgs;
use bridge_broadcast_broadcaster::ChannelBroadcaster;
use bridge_core_blockchain::BridgeContext;
use bridge_core_config::BridgeConfig;
use bridge_core_node::ProcessorSupervisor;
use bridge_core_queue::QueueConnector;
use bridge_types_events::{BridgeTx, Message, ProcessorEvent};
use clap::Parser;
use eyre::WrapErr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

mod arguments;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

fn main() -> eyre::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let fmt_layer = fmt::Layer::default().with_thread_ids(true).with_file(false).with_line_number(true).with_filter(env_filter);
    tracing_subscriber::registry().with(fmt_layer).init();

    let args = BridgeArgs::parse();

    let rt = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    rt.block_on(run(args))
}

async fn run(args: BridgeArgs) -> eyre::Result<()> {
    info!("Loading config from {}", args.config);
    let config = BridgeConfig::load_from_file(&args.config).await?;
    let selection = args.selection(&config.processors.selection);

    let queue = Arc::new(QueueConnector::new(config.queue.capacity));
    let broadcaster = Arc::new(ChannelBroadcaster::new(config.queue.capacity));
    tokio::spawn(log_transactions(broadcaster.subscribe()));

    let ctx = BridgeContext::from_config(&config, queue, broadcaster).wrap_err("invalid rpc url")?;
    info!(chain_id = config.chain.chain_id, rpc = %ctx.rpc.url(), "Starting bridge");

    let mut supervisor = ProcessorSupervisor::new(ctx, &selection)?;
    let mut events = supervisor.subscribe();
    supervisor.start().await?;

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown requested");
        }
        failure = wait_for_failure(&mut events) => match failure {
            Some(event) => error!(%event, "Processor failed, shutting down"),
            None => warn!("Processor event channel closed"),
        },
    }

    supervisor.stop().await?;
    if tokio::time::timeout(SHUTDOWN_TIMEOUT, supervisor.join_workers()).await.is_err() {
        warn!("Timed out waiting for processors to exit");
    }
    info!("Bridge stopped");
    Ok(())
}

async fn wait_for_failure(events: &mut Receiver<Message<ProcessorEvent>>) -> Option<ProcessorEvent> {
    loop {
        match events.recv().await {
            Ok(event) if event.is_failure() => return Some(event.into_inner()),
            Ok(event) => info!(event = %event.inner(), "Processor event"),
            Err(RecvError::Lagged(lag)) => warn!(lag, "Processor events lagged"),
            Err(RecvError::Closed) => return None,
        }
    }
}

async fn log_transactions(mut txs: Receiver<Message<BridgeTx>>) {
    loop {
        match txs.recv().await {
            Ok(tx) => info!(kind = %tx.kind, event = ?tx.event, "Transaction submitted"),
            Err(RecvError::Lagged(lag)) => warn!(lag, "Transaction log lagged"),
            Err(RecvError::Closed) => break,
        }
    }
}
