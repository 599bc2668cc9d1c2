use serde::{Deserialize, Serialize};

/// A named unit of work published to the task queue
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueTask {
    pub name: String,
    pub payload: Vec<u8>,
}

impl QueueTask {
    pub fn new(name: impl Into<String>, payload: Vec<u8>) -> Self {
        Self { name: name.into(), payload }
    }
}

/// A task routed to the processor that registered it
#[derive(Clone, Debug)]
pub struct Delivery {
    pub processor: String,
    pub task: QueueTask,
}
