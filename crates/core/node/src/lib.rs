//! Processor supervisor: selects processors from the catalog and drives their lifecycle

pub use catalog::{ProcessorCatalog, ProcessorDescriptor};
pub use error::SupervisorError;
pub use lifecycle::{Lifecycle, SupervisorState};
pub use selection::{ProcessorKind, select};
pub use supervisor::ProcessorSupervisor;

mod catalog;
mod error;
mod lifecycle;
mod selection;
mod supervisor;

#[cfg(test)]
mod supervisor_test;
