use crate::Processor;
use async_trait::async_trait;
use bridge_core_blockchain::BridgeContext;
use bridge_types_events::{BridgeTx, ChainEvent, Delivery, EventId, QueueTask};
use eyre::{Result, WrapErr, eyre};
use indexmap::IndexSet;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{Mutex, broadcast, watch};
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Processor specific part of an [`EventProcessor`]
#[async_trait]
pub trait TaskHandler: Send + Sync + 'static {
    /// Queue tasks consumed by this handler
    fn tasks(&self) -> &'static [&'static str];

    /// Turn a root chain event into a consensus chain transaction. `Ok(None)` skips the event.
    async fn handle(&self, task: &str, event: &ChainEvent, ctx: &BridgeContext) -> Result<Option<BridgeTx>>;

    /// Period of the recurring check, `None` disables it
    fn poll_interval(&self, _ctx: &BridgeContext) -> Option<Duration> {
        None
    }

    async fn on_tick(&self, _ctx: &BridgeContext) -> Result<Option<BridgeTx>> {
        Ok(None)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunState {
    Idle,
    Running,
    Exited,
}

// Marks the run loop as exited on every path out of `start`, unwinding included
struct ExitGuard<'a>(&'a watch::Sender<RunState>);

impl Drop for ExitGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(RunState::Exited);
    }
}

// Processed events, the oldest is evicted once `capacity` is exceeded
struct RecentEvents {
    ids: IndexSet<EventId>,
    capacity: usize,
}

impl RecentEvents {
    fn new(capacity: usize) -> Self {
        Self { ids: IndexSet::new(), capacity }
    }

    fn contains(&self, id: &EventId) -> bool {
        self.ids.contains(id)
    }

    fn insert(&mut self, id: EventId) {
        if self.ids.insert(id) && self.ids.len() > self.capacity {
            self.ids.shift_remove_index(0);
        }
    }

    fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Queue driven processor: consumes the tasks its handler registered, broadcasts the resulting
/// transactions and runs the handler's recurring check.
pub struct EventProcessor<H> {
    name: &'static str,
    handler: H,
    ctx: BridgeContext,
    cancel: CancellationToken,
    run_state: watch::Sender<RunState>,
    // subscribed when tasks are registered so nothing routed before `start` is lost
    inbox: Mutex<Option<broadcast::Receiver<Delivery>>>,
    processed: Mutex<RecentEvents>,
}

impl<H: TaskHandler> EventProcessor<H> {
    pub fn new(name: &'static str, handler: H, ctx: BridgeContext) -> Self {
        let processed = Mutex::new(RecentEvents::new(ctx.dedupe_capacity));
        Self {
            name,
            handler,
            ctx,
            cancel: CancellationToken::new(),
            run_state: watch::channel(RunState::Idle).0,
            inbox: Mutex::new(None),
            processed,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub async fn is_processed(&self, id: &EventId) -> bool {
        self.processed.lock().await.contains(id)
    }

    /// Number of events currently remembered for deduplication
    pub async fn processed_len(&self) -> usize {
        self.processed.lock().await.len()
    }

    async fn process(&self, task: QueueTask) -> Result<()> {
        let event: ChainEvent = self.ctx.codec.decode(&task.payload).wrap_err_with(|| format!("decoding {} payload", task.name))?;
        let id = event.id();

        if self.is_processed(&id).await {
            debug!(processor = self.name, task = %task.name, %id, "Event already processed, skipping");
            return Ok(());
        }

        match self.handler.handle(&task.name, &event, &self.ctx).await? {
            Some(tx) => {
                let receipt = self.ctx.broadcaster.broadcast(tx.with_event(id)).await?;
                info!(processor = self.name, task = %task.name, %id, kind = %receipt.kind, sequence = receipt.sequence, "Bridged event");
            }
            None => debug!(processor = self.name, task = %task.name, %id, "Handler skipped event"),
        }

        self.processed.lock().await.insert(id);
        Ok(())
    }

    async fn tick(&self) -> Result<()> {
        if let Some(tx) = self.handler.on_tick(&self.ctx).await? {
            let receipt = self.ctx.broadcaster.broadcast(tx).await?;
            info!(processor = self.name, kind = %receipt.kind, sequence = receipt.sequence, "Broadcasted scheduled transaction");
        }
        Ok(())
    }

    async fn run(&self) -> Result<()> {
        let inbox = self.inbox.lock().await.take();
        let mut deliveries = inbox.unwrap_or_else(|| self.ctx.queue.subscribe());
        let mut ticker = self.handler.poll_interval(&self.ctx).filter(|period| !period.is_zero()).map(|period| {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });

        info!(processor = self.name, "Processor started");

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    debug!(processor = self.name, "Stop requested");
                    break;
                }
                delivery = deliveries.recv() => match delivery {
                    Ok(delivery) => {
                        if delivery.processor != self.name {
                            continue;
                        }
                        let task = delivery.task.name.clone();
                        if let Err(e) = self.process(delivery.task).await {
                            error!(processor = self.name, task = %task, "Failed to process task: {:#}", e);
                        }
                    }
                    Err(RecvError::Lagged(lag)) => {
                        warn!(processor = self.name, lag, "Task channel lagged");
                    }
                    Err(RecvError::Closed) => {
                        error!(processor = self.name, "Task channel closed");
                        return Err(eyre!("TASK_CHANNEL_CLOSED"));
                    }
                },
                _ = next_tick(&mut ticker) => {
                    if let Err(e) = self.tick().await {
                        error!(processor = self.name, "Scheduled check failed: {:#}", e);
                    }
                }
            }
        }

        Ok(())
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => futures::future::pending::<()>().await,
    }
}

#[async_trait]
impl<H: TaskHandler> Processor for EventProcessor<H> {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn register_tasks(&self) -> Result<()> {
        {
            let mut inbox = self.inbox.lock().await;
            if inbox.is_none() {
                *inbox = Some(self.ctx.queue.subscribe());
            }
        }
        for task in self.handler.tasks() {
            self.ctx.queue.register(self.name, task).await.wrap_err_with(|| format!("registering task {task}"))?;
        }
        Ok(())
    }

    async fn start(&self) -> Result<()> {
        if self.run_state.send_replace(RunState::Running) == RunState::Running {
            return Err(eyre!("{} is already running", self.name));
        }
        let _guard = ExitGuard(&self.run_state);

        // checked only once marked running, so a concurrent stop always waits for this exit
        if self.cancel.is_cancelled() {
            debug!(processor = self.name, "Processor already stopped");
            return Ok(());
        }
        self.run().await
    }

    async fn stop(&self) -> Result<()> {
        self.cancel.cancel();
        let mut run_state = self.run_state.subscribe();
        run_state.wait_for(|state| *state != RunState::Running).await.map_err(|_| eyre!("RUN_STATE_CLOSED"))?;
        info!(processor = self.name, "Processor stopped");
        Ok(())
    }
}
