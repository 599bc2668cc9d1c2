use crate::EventId;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Consensus chain message types produced by the processors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
    ValidatorJoin,
    StakeUpdate,
    SignerUpdate,
    ValidatorExit,
    StateSync,
    Topup,
    ProposeSpan,
}

/// Transaction ready to be submitted to the consensus chain
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BridgeTx {
    pub kind: TxKind,
    /// Root chain log that triggered the transaction, if any
    pub event: Option<EventId>,
    pub body: serde_json::Value,
}

impl BridgeTx {
    pub fn new(kind: TxKind, body: serde_json::Value) -> Self {
        Self { kind, event: None, body }
    }

    pub fn with_event(mut self, event: EventId) -> Self {
        self.event = Some(event);
        self
    }
}

/// Submission outcome reported by a broadcaster
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxReceipt {
    pub sequence: u64,
    pub kind: TxKind,
}
