mod disabled;
mod event_processor;

pub use disabled::DisabledProcessor;
pub use event_processor::{EventProcessor, TaskHandler};

use async_trait::async_trait;
use eyre::Result;

/// A processor is a long-running worker that bridges root chain events into consensus chain transactions
#[async_trait]
pub trait Processor: Send + Sync + 'static {
    /// Name of the processor for logging and task routing
    fn name(&self) -> &'static str;

    /// Register the processor's tasks with the queue. Must be idempotent and must complete
    /// before the processor consumes anything.
    async fn register_tasks(&self) -> Result<()>;

    /// Run the processor until it is asked to stop
    async fn start(&self) -> Result<()>;

    /// Request termination and wait until the run loop has exited
    async fn stop(&self) -> Result<()>;
}
