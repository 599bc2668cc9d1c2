pub use connector::QueueConnector;

mod connector;

use async_trait::async_trait;
use bridge_types_events::{Delivery, QueueTask};
use thiserror::Error;
use tokio::sync::broadcast;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("task {task} is already registered by {owner}")]
    AlreadyRegistered { task: String, owner: String },
    #[error("no processor registered task {0}")]
    Unregistered(String),
    #[error("no consumer is listening for task {0}")]
    NoConsumers(String),
}

/// Task registration and delivery backend shared by all processors
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// Register `task` as handled by `processor`. Registering the same pair again is a no-op.
    async fn register(&self, processor: &str, task: &str) -> Result<(), QueueError>;

    /// Route a task to the processor that registered it
    async fn publish(&self, task: QueueTask) -> Result<(), QueueError>;

    /// Stream of deliveries for every processor, consumers filter on `Delivery::processor`
    fn subscribe(&self) -> broadcast::Receiver<Delivery>;

    /// Tasks registered by `processor`, sorted by name
    async fn registered(&self, processor: &str) -> Vec<String>;
}
