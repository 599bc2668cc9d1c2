use crate::ProcessorKind;
use bridge_core_blockchain::{BridgeContext, ContractCaller};
use bridge_core_components::{DisabledProcessor, Processor};
use bridge_processors::{
    ClerkHandler, ClerkProcessor, FeeHandler, FeeProcessor, SpanHandler, SpanProcessor, StakingHandler, StakingProcessor,
};
use std::fmt;
use std::sync::Arc;
use strum::IntoEnumIterator;

/// A catalog entry, fixed once built
#[derive(Clone)]
pub struct ProcessorDescriptor {
    kind: ProcessorKind,
    processor: Arc<dyn Processor>,
}

impl ProcessorDescriptor {
    pub fn new(kind: ProcessorKind, processor: Arc<dyn Processor>) -> Self {
        Self { kind, processor }
    }

    pub fn kind(&self) -> ProcessorKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.processor.name()
    }

    pub fn processor(&self) -> &Arc<dyn Processor> {
        &self.processor
    }
}

impl fmt::Debug for ProcessorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorDescriptor").field("kind", &self.kind).field("name", &self.name()).finish()
    }
}

/// Every known processor bound to the shared context, in canonical order
pub struct ProcessorCatalog {
    entries: Vec<ProcessorDescriptor>,
}

impl ProcessorCatalog {
    pub fn build(ctx: &BridgeContext, contracts: &ContractCaller) -> Self {
        let entries = ProcessorKind::iter().map(|kind| ProcessorDescriptor::new(kind, build_processor(kind, ctx, contracts))).collect();
        Self { entries }
    }

    pub fn get(&self, kind: ProcessorKind) -> Option<&ProcessorDescriptor> {
        self.entries.iter().find(|entry| entry.kind == kind)
    }

    /// Entries for `kinds`, in the order given
    pub fn select(&self, kinds: &[ProcessorKind]) -> Vec<ProcessorDescriptor> {
        kinds.iter().filter_map(|kind| self.get(*kind)).cloned().collect()
    }
}

fn build_processor(kind: ProcessorKind, ctx: &BridgeContext, contracts: &ContractCaller) -> Arc<dyn Processor> {
    let name = kind.as_str();
    match kind {
        ProcessorKind::Checkpoint | ProcessorKind::Slashing => Arc::new(DisabledProcessor::new(name)),
        ProcessorKind::Staking => Arc::new(StakingProcessor::new(name, StakingHandler::new(contracts.staking_info), ctx.clone())),
        ProcessorKind::Clerk => Arc::new(ClerkProcessor::new(name, ClerkHandler::new(contracts.state_sender), ctx.clone())),
        ProcessorKind::Fee => Arc::new(FeeProcessor::new(name, FeeHandler::new(contracts.staking_info), ctx.clone())),
        ProcessorKind::Span => Arc::new(SpanProcessor::new(name, SpanHandler::new(), ctx.clone())),
    }
}
