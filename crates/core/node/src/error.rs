use crate::{ProcessorKind, SupervisorState};
use bridge_core_blockchain::ContractCallerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("no processors selected, use --all or --only <processors>")]
    NoProcessorsSelected,
    #[error("processor {0} selected more than once")]
    DuplicateProcessor(ProcessorKind),
    #[error("contract caller: {0}")]
    ContractCaller(#[from] ContractCallerError),
    #[error("{name} cannot move from {from} to {to}")]
    InvalidTransition { name: &'static str, from: SupervisorState, to: SupervisorState },
    #[error("processor {processor} failed to register tasks: {error:#}")]
    RegisterTasks { processor: &'static str, error: eyre::Report },
}
