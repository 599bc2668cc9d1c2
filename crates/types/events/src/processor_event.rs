use std::fmt;

/// Worker lifecycle notifications published by the supervisor
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessorEvent {
    Started { processor: String },
    Exited { processor: String },
    Failed { processor: String, error: String },
}

impl ProcessorEvent {
    pub fn processor(&self) -> &str {
        match self {
            ProcessorEvent::Started { processor } | ProcessorEvent::Exited { processor } | ProcessorEvent::Failed { processor, .. } => {
                processor
            }
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ProcessorEvent::Failed { .. })
    }
}

impl fmt::Display for ProcessorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessorEvent::Started { processor } => write!(f, "{processor} started"),
            ProcessorEvent::Exited { processor } => write!(f, "{processor} exited"),
            ProcessorEvent::Failed { processor, error } => write!(f, "{processor} failed: {error}"),
        }
    }
}
