use crate::{QueueError, TaskQueue};
use async_trait::async_trait;
use bridge_types_events::{Delivery, QueueTask};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, info};

/// In-process queue backed by a broadcast channel
#[derive(Clone)]
pub struct QueueConnector {
    // task name -> owning processor
    routes: Arc<RwLock<HashMap<String, String>>>,
    deliveries: broadcast::Sender<Delivery>,
}

impl QueueConnector {
    pub fn new(capacity: usize) -> Self {
        Self { routes: Arc::new(RwLock::new(HashMap::new())), deliveries: broadcast::channel(capacity).0 }
    }
}

impl Default for QueueConnector {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[async_trait]
impl TaskQueue for QueueConnector {
    async fn register(&self, processor: &str, task: &str) -> Result<(), QueueError> {
        let mut routes = self.routes.write().await;
        match routes.get(task) {
            Some(owner) if owner == processor => {
                debug!(processor, task, "Task already registered");
                Ok(())
            }
            Some(owner) => Err(QueueError::AlreadyRegistered { task: task.to_string(), owner: owner.clone() }),
            None => {
                routes.insert(task.to_string(), processor.to_string());
                info!(processor, task, "Registered task");
                Ok(())
            }
        }
    }

    async fn publish(&self, task: QueueTask) -> Result<(), QueueError> {
        let processor = self.routes.read().await.get(&task.name).cloned().ok_or_else(|| QueueError::Unregistered(task.name.clone()))?;
        let name = task.name.clone();
        self.deliveries.send(Delivery { processor, task }).map(|_| ()).map_err(|_| QueueError::NoConsumers(name))
    }

    fn subscribe(&self) -> broadcast::Receiver<Delivery> {
        self.deliveries.subscribe()
    }

    async fn registered(&self, processor: &str) -> Vec<String> {
        let routes = self.routes.read().await;
        let mut tasks: Vec<String> = routes.iter().filter(|(_, owner)| owner.as_str() == processor).map(|(task, _)| task.clone()).collect();
        tasks.sort();
        tasks
    }
}
