use alloy_primitives::{Address, BlockNumber, TxHash};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique position of a log on the root chain
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId {
    pub tx_hash: TxHash,
    pub log_index: u64,
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tx_hash, self.log_index)
    }
}

/// A decoded root chain log as delivered by the queue.
///
/// `data` holds the event specific fields; processors pick what they need from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainEvent {
    pub contract: Address,
    pub tx_hash: TxHash,
    pub log_index: u64,
    pub block_number: BlockNumber,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl ChainEvent {
    pub fn id(&self) -> EventId {
        EventId { tx_hash: self.tx_hash, log_index: self.log_index }
    }

    /// Look up a field of the event payload
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.data.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;
    use serde_json::json;

    #[test]
    fn test_event_id_display() {
        let event = ChainEvent {
            contract: Address::ZERO,
            tx_hash: B256::repeat_byte(0xab),
            log_index: 7,
            block_number: 100,
            data: json!({}),
        };
        let id = event.id();
        assert_eq!(id.log_index, 7);
        assert!(id.to_string().ends_with(":7"));
        assert!(id.to_string().starts_with("0xabab"));
    }

    #[test]
    fn test_missing_data_defaults_to_null() {
        let raw = r#"{
            "contract": "0x0000000000000000000000000000000000000001",
            "tx_hash": "0x0000000000000000000000000000000000000000000000000000000000000002",
            "log_index": 0,
            "block_number": 12
        }"#;
        let event: ChainEvent = serde_json::from_str(raw).unwrap();
        assert!(event.data.is_null());
        assert!(event.field("user").is_none());
    }
}
