use crate::{ProcessorDescriptor, ProcessorKind, ProcessorSupervisor, SupervisorError, SupervisorState};
use async_trait::async_trait;
use bridge_broadcast_broadcaster::ChannelBroadcaster;
use bridge_core_blockchain::{BridgeContext, ChainParameters, RpcClient};
use bridge_core_components::Processor;
use bridge_core_config::{ContractsConfig, ProcessorSelection};
use bridge_core_queue::{QueueConnector, TaskQueue};
use bridge_types_events::{Message, ProcessorEvent};
use eyre::{Result, eyre};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

type Journal = Arc<Mutex<Vec<String>>>;

#[derive(Clone, Copy, PartialEq)]
enum Behaviour {
    RunUntilStopped,
    FailOnStart,
    PanicOnStart,
    FailRegistration,
    FailStop,
}

struct RecordingProcessor {
    name: &'static str,
    behaviour: Behaviour,
    journal: Journal,
    cancel: CancellationToken,
}

impl RecordingProcessor {
    fn record(&self, call: &str) {
        self.journal.lock().unwrap().push(format!("{call}:{}", self.name));
    }
}

#[async_trait]
impl Processor for RecordingProcessor {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn register_tasks(&self) -> Result<()> {
        self.record("register");
        if self.behaviour == Behaviour::FailRegistration {
            return Err(eyre!("queue unavailable"));
        }
        Ok(())
    }

    async fn start(&self) -> Result<()> {
        self.record("start");
        match self.behaviour {
            Behaviour::FailOnStart => Err(eyre!("run loop broke")),
            Behaviour::PanicOnStart => panic!("{} exploded", self.name),
            _ => {
                self.cancel.cancelled().await;
                Ok(())
            }
        }
    }

    async fn stop(&self) -> Result<()> {
        self.record("stop");
        self.cancel.cancel();
        if self.behaviour == Behaviour::FailStop {
            return Err(eyre!("stop refused"));
        }
        Ok(())
    }
}

fn recording(kind: ProcessorKind, behaviour: Behaviour, journal: &Journal) -> ProcessorDescriptor {
    let processor = RecordingProcessor { name: kind.as_str(), behaviour, journal: journal.clone(), cancel: CancellationToken::new() };
    ProcessorDescriptor::new(kind, Arc::new(processor))
}

fn entries(journal: &Journal, call: &str) -> Vec<String> {
    journal.lock().unwrap().iter().filter(|entry| entry.starts_with(call)).cloned().collect()
}

async fn wait_for_entries(journal: &Journal, call: &str, count: usize) {
    timeout(Duration::from_secs(1), async {
        while entries(journal, call).len() < count {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();
}

async fn next_event(events: &mut broadcast::Receiver<Message<ProcessorEvent>>) -> ProcessorEvent {
    timeout(Duration::from_secs(1), events.recv()).await.unwrap().unwrap().into_inner()
}

fn contracts() -> ContractsConfig {
    ContractsConfig {
        root_chain: "0x0000000000000000000000000000000000000001".to_string(),
        staking_info: "0x0000000000000000000000000000000000000002".to_string(),
        state_sender: "0x0000000000000000000000000000000000000003".to_string(),
    }
}

fn context(queue: Arc<QueueConnector>, contracts: ContractsConfig) -> BridgeContext {
    BridgeContext::new(
        ChainParameters::new(137),
        RpcClient::new("http://localhost:8545").unwrap(),
        queue,
        Arc::new(ChannelBroadcaster::new(16)),
        contracts,
    )
    .with_span_poll_interval(Duration::from_secs(3600))
}

#[tokio::test]
async fn test_start_registers_in_order_without_waiting_for_workers() {
    let journal = Journal::default();
    let mut supervisor = ProcessorSupervisor::from_descriptors(vec![
        recording(ProcessorKind::Staking, Behaviour::RunUntilStopped, &journal),
        recording(ProcessorKind::Fee, Behaviour::RunUntilStopped, &journal),
    ])
    .unwrap();
    assert_eq!(supervisor.state(), SupervisorState::Idle);

    timeout(Duration::from_secs(1), supervisor.start()).await.unwrap().unwrap();
    assert_eq!(supervisor.state(), SupervisorState::Started);
    assert_eq!(entries(&journal, "register"), vec!["register:staking", "register:fee"]);

    wait_for_entries(&journal, "start", 2).await;
    let log = journal.lock().unwrap().clone();
    let last_register = log.iter().rposition(|entry| entry.starts_with("register")).unwrap();
    let first_start = log.iter().position(|entry| entry.starts_with("start")).unwrap();
    assert!(last_register < first_start);

    supervisor.stop().await.unwrap();
    assert_eq!(entries(&journal, "stop"), vec!["stop:staking", "stop:fee"]);
    assert_eq!(supervisor.state(), SupervisorState::Stopped);

    timeout(Duration::from_secs(1), supervisor.join_workers()).await.unwrap();
    assert_eq!(entries(&journal, "register").len(), 2);
    assert_eq!(entries(&journal, "start").len(), 2);
}

#[tokio::test]
async fn test_lifecycle_is_enforced() {
    let journal = Journal::default();
    let mut supervisor =
        ProcessorSupervisor::from_descriptors(vec![recording(ProcessorKind::Clerk, Behaviour::RunUntilStopped, &journal)]).unwrap();

    assert!(matches!(supervisor.stop().await, Err(SupervisorError::InvalidTransition { .. })));
    assert!(entries(&journal, "stop").is_empty());

    supervisor.start().await.unwrap();
    assert!(matches!(supervisor.start().await, Err(SupervisorError::InvalidTransition { .. })));
    assert_eq!(entries(&journal, "register").len(), 1);

    supervisor.stop().await.unwrap();
    assert!(supervisor.stop().await.is_err());
    assert!(supervisor.start().await.is_err());
    assert_eq!(entries(&journal, "stop").len(), 1);
    supervisor.join_workers().await;
}

#[tokio::test]
async fn test_empty_and_duplicate_descriptors_rejected() {
    assert!(matches!(ProcessorSupervisor::from_descriptors(vec![]), Err(SupervisorError::NoProcessorsSelected)));

    let journal = Journal::default();
    let result = ProcessorSupervisor::from_descriptors(vec![
        recording(ProcessorKind::Fee, Behaviour::RunUntilStopped, &journal),
        recording(ProcessorKind::Fee, Behaviour::RunUntilStopped, &journal),
    ]);
    assert!(matches!(result, Err(SupervisorError::DuplicateProcessor(ProcessorKind::Fee))));
}

#[tokio::test]
async fn test_failing_workers_are_reported_and_siblings_keep_running() {
    let journal = Journal::default();
    let mut supervisor = ProcessorSupervisor::from_descriptors(vec![
        recording(ProcessorKind::Staking, Behaviour::PanicOnStart, &journal),
        recording(ProcessorKind::Clerk, Behaviour::FailOnStart, &journal),
        recording(ProcessorKind::Fee, Behaviour::RunUntilStopped, &journal),
    ])
    .unwrap();
    let mut events = supervisor.subscribe();
    supervisor.start().await.unwrap();

    let mut failures = Vec::new();
    let mut started = 0;
    while failures.len() < 2 {
        match next_event(&mut events).await {
            ProcessorEvent::Started { .. } => started += 1,
            ProcessorEvent::Failed { processor, error } => failures.push((processor, error)),
            ProcessorEvent::Exited { processor } => panic!("{processor} exited unexpectedly"),
        }
    }
    failures.sort();
    assert_eq!(failures[0].0, "clerk");
    assert!(failures[0].1.contains("run loop broke"));
    assert_eq!(failures[1].0, "staking");
    assert!(failures[1].1.contains("staking exploded"));

    // fee keeps running until asked to stop
    assert!(!entries(&journal, "stop").iter().any(|entry| entry == "stop:fee"));
    supervisor.stop().await.unwrap();
    loop {
        match next_event(&mut events).await {
            ProcessorEvent::Started { .. } => started += 1,
            ProcessorEvent::Exited { processor } => {
                assert_eq!(processor, "fee");
                break;
            }
            event => panic!("unexpected event {event}"),
        }
    }
    assert_eq!(started, 3);
    supervisor.join_workers().await;
}

#[tokio::test]
async fn test_registration_failure_aborts_start() {
    let journal = Journal::default();
    let mut supervisor = ProcessorSupervisor::from_descriptors(vec![
        recording(ProcessorKind::Staking, Behaviour::RunUntilStopped, &journal),
        recording(ProcessorKind::Clerk, Behaviour::FailRegistration, &journal),
        recording(ProcessorKind::Fee, Behaviour::RunUntilStopped, &journal),
    ])
    .unwrap();

    let err = supervisor.start().await.unwrap_err();
    assert!(matches!(err, SupervisorError::RegisterTasks { processor: "clerk", .. }));
    assert!(err.to_string().contains("queue unavailable"));
    assert_eq!(entries(&journal, "register"), vec!["register:staking", "register:clerk"]);

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(entries(&journal, "start").is_empty());
    assert_eq!(supervisor.state(), SupervisorState::Stopped);
}

#[tokio::test]
async fn test_stop_error_does_not_interrupt_sequence() {
    let journal = Journal::default();
    let mut supervisor = ProcessorSupervisor::from_descriptors(vec![
        recording(ProcessorKind::Staking, Behaviour::FailStop, &journal),
        recording(ProcessorKind::Span, Behaviour::RunUntilStopped, &journal),
    ])
    .unwrap();

    supervisor.start().await.unwrap();
    supervisor.stop().await.unwrap();
    assert_eq!(entries(&journal, "stop"), vec!["stop:staking", "stop:span"]);
    timeout(Duration::from_secs(1), supervisor.join_workers()).await.unwrap();
}

#[tokio::test]
async fn test_each_single_name_selects_one_processor() {
    for kind in ProcessorKind::canonical() {
        let ctx = context(Arc::new(QueueConnector::new(16)), contracts());
        let supervisor = ProcessorSupervisor::new(ctx, &ProcessorSelection::only([kind.as_str()])).unwrap();
        assert_eq!(supervisor.active(), vec![kind]);
        assert_eq!(supervisor.processors()[0].name(), kind.as_str());
    }
}

#[tokio::test]
async fn test_nothing_selected() {
    let ctx = context(Arc::new(QueueConnector::new(16)), contracts());
    let err = ProcessorSupervisor::new(ctx.clone(), &ProcessorSelection::default()).err().unwrap();
    assert!(matches!(err, SupervisorError::NoProcessorsSelected));
    assert_eq!(err.to_string(), "no processors selected, use --all or --only <processors>");

    assert!(matches!(
        ProcessorSupervisor::new(ctx, &ProcessorSelection::only(["unknown-name"])),
        Err(SupervisorError::NoProcessorsSelected)
    ));
}

#[tokio::test]
async fn test_invalid_contract_is_fatal() {
    let mut contracts = contracts();
    contracts.state_sender = "not-an-address".to_string();
    let ctx = context(Arc::new(QueueConnector::new(16)), contracts);

    let result = ProcessorSupervisor::new(ctx, &ProcessorSelection::all());
    assert!(matches!(result, Err(SupervisorError::ContractCaller(_))));
}

#[tokio::test]
async fn test_staking_and_fee_only() {
    let queue = Arc::new(QueueConnector::new(16));
    let ctx = context(queue.clone(), contracts());
    let mut supervisor = ProcessorSupervisor::new(ctx, &ProcessorSelection::only(["staking", "fee"])).unwrap();
    assert_eq!(supervisor.active(), vec![ProcessorKind::Staking, ProcessorKind::Fee]);

    let mut events = supervisor.subscribe();
    supervisor.start().await.unwrap();
    assert!(!queue.registered("staking").await.is_empty());
    assert_eq!(queue.registered("fee").await, vec!["topup_fee".to_string()]);
    assert!(queue.registered("clerk").await.is_empty());

    let mut started = Vec::new();
    while started.len() < 2 {
        if let ProcessorEvent::Started { processor } = next_event(&mut events).await {
            started.push(processor);
        }
    }
    assert_eq!(started, vec!["staking", "fee"]);

    supervisor.stop().await.unwrap();
    timeout(Duration::from_secs(1), supervisor.join_workers()).await.unwrap();
}

#[tokio::test]
async fn test_all_with_disabled_processors() {
    let ctx = context(Arc::new(QueueConnector::new(16)), contracts());
    let selection = ProcessorSelection { all: true, only: vec!["nonsense".to_string()] };
    let mut supervisor = ProcessorSupervisor::new(ctx, &selection).unwrap();
    assert_eq!(supervisor.active(), ProcessorKind::canonical());

    supervisor.start().await.unwrap();
    supervisor.stop().await.unwrap();
    timeout(Duration::from_secs(1), supervisor.join_workers()).await.unwrap();
    assert_eq!(supervisor.state(), SupervisorState::Stopped);
}
