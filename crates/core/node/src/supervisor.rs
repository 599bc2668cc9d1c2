use crate::SupervisorError;
use crate::catalog::{ProcessorCatalog, ProcessorDescriptor};
use crate::lifecycle::{Lifecycle, SupervisorState};
use crate::selection::{ProcessorKind, select};
use bridge_core_blockchain::{BridgeContext, ContractCaller};
use bridge_core_components::Processor;
use bridge_core_config::ProcessorSelection;
use bridge_types_events::{Message, ProcessorEvent};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::{JoinError, JoinHandle};
use tracing::{Instrument, error, info, info_span};

const SUPERVISOR_NAME: &str = "processor-supervisor";
const EVENTS_CAPACITY: usize = 64;

/// Owns the selected processors and drives them through start and stop.
///
/// Workers run as independent tokio tasks. Each one is watched by a monitor task that reports its
/// outcome on the event channel, so a failing processor never takes down its siblings.
pub struct ProcessorSupervisor {
    lifecycle: Lifecycle,
    processors: Vec<ProcessorDescriptor>,
    events: broadcast::Sender<Message<ProcessorEvent>>,
    workers: Vec<JoinHandle<()>>,
}

impl ProcessorSupervisor {
    /// Build the catalog on `ctx` and keep the processors picked by `selection`
    pub fn new(ctx: BridgeContext, selection: &ProcessorSelection) -> Result<Self, SupervisorError> {
        let contracts = ContractCaller::new(&ctx.contracts)?;
        let catalog = ProcessorCatalog::build(&ctx, &contracts);
        Self::from_descriptors(catalog.select(&select(selection)))
    }

    pub fn from_descriptors(processors: Vec<ProcessorDescriptor>) -> Result<Self, SupervisorError> {
        if processors.is_empty() {
            return Err(SupervisorError::NoProcessorsSelected);
        }
        let mut seen = HashSet::new();
        for descriptor in &processors {
            if !seen.insert(descriptor.kind()) {
                return Err(SupervisorError::DuplicateProcessor(descriptor.kind()));
            }
        }

        let names: Vec<&str> = processors.iter().map(ProcessorDescriptor::name).collect();
        info!(processors = ?names, "Processors selected");

        let (events, _) = broadcast::channel(EVENTS_CAPACITY);
        Ok(Self { lifecycle: Lifecycle::new(SUPERVISOR_NAME), processors, events, workers: Vec::new() })
    }

    pub fn state(&self) -> SupervisorState {
        self.lifecycle.state()
    }

    pub fn active(&self) -> Vec<ProcessorKind> {
        self.processors.iter().map(ProcessorDescriptor::kind).collect()
    }

    pub fn processors(&self) -> &[ProcessorDescriptor] {
        &self.processors
    }

    /// Worker lifecycle events. Only events sent after subscribing are received.
    pub fn subscribe(&self) -> broadcast::Receiver<Message<ProcessorEvent>> {
        self.events.subscribe()
    }

    /// Register every processor's tasks in order, then spawn the run loops without waiting on them.
    ///
    /// A registration failure aborts before any worker runs and leaves the supervisor stopped.
    pub async fn start(&mut self) -> Result<(), SupervisorError> {
        self.lifecycle.start()?;

        for descriptor in &self.processors {
            let processor = descriptor.processor();
            if let Err(error) = processor.register_tasks().await {
                self.lifecycle.abort();
                return Err(SupervisorError::RegisterTasks { processor: processor.name(), error });
            }
            info!(processor = processor.name(), "Tasks registered");
        }

        for descriptor in &self.processors {
            let handle = spawn_worker(descriptor.processor().clone(), self.events.clone());
            self.workers.push(handle);
        }

        info!(workers = self.workers.len(), "All processors started");
        Ok(())
    }

    /// Ask every processor to stop, in selection order. Errors are logged and the sequence continues.
    pub async fn stop(&mut self) -> Result<(), SupervisorError> {
        self.lifecycle.stop()?;

        for descriptor in &self.processors {
            let processor = descriptor.processor();
            match processor.stop().await {
                Ok(()) => info!(processor = processor.name(), "Processor stopped"),
                Err(e) => error!(processor = processor.name(), "Failed to stop processor: {:#}", e),
            }
        }
        Ok(())
    }

    /// Wait for every spawned worker and its monitor to finish
    pub async fn join_workers(&mut self) {
        for handle in self.workers.drain(..) {
            if let Err(e) = handle.await {
                error!("Worker monitor failed: {}", e);
            }
        }
    }
}

fn spawn_worker(processor: Arc<dyn Processor>, events: broadcast::Sender<Message<ProcessorEvent>>) -> JoinHandle<()> {
    let name = processor.name();
    let run = tokio::spawn(async move { processor.start().await }.instrument(info_span!("processor", name)));
    publish(&events, ProcessorEvent::Started { processor: name.to_string() });

    tokio::spawn(async move {
        let event = match run.await {
            Ok(Ok(())) => {
                info!(processor = name, "Processor exited");
                ProcessorEvent::Exited { processor: name.to_string() }
            }
            Ok(Err(e)) => {
                error!(processor = name, "Processor failed: {:#}", e);
                ProcessorEvent::Failed { processor: name.to_string(), error: format!("{e:#}") }
            }
            Err(join_error) => {
                let error = describe_join_error(join_error);
                error!(processor = name, %error, "Processor worker aborted");
                ProcessorEvent::Failed { processor: name.to_string(), error }
            }
        };
        publish(&events, event);
    })
}

fn publish(events: &broadcast::Sender<Message<ProcessorEvent>>, event: ProcessorEvent) {
    // nobody listening is fine
    let _ = events.send(Message::new_with_source(event, SUPERVISOR_NAME.to_string()));
}

fn describe_join_error(join_error: JoinError) -> String {
    if join_error.is_cancelled() {
        return "worker cancelled".to_string();
    }
    match join_error.try_into_panic() {
        Ok(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic payload".to_string());
            format!("panicked: {message}")
        }
        Err(join_error) => join_error.to_string(),
    }
}
