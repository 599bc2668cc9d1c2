pub use chain_event::{ChainEvent, EventId};
pub use message::Message;
pub use processor_event::ProcessorEvent;
pub use queue_task::{Delivery, QueueTask};
pub use tx::{BridgeTx, TxKind, TxReceipt};

mod chain_event;
mod message;
mod processor_event;
mod queue_task;
mod tx;
