use crate::util::{ensure_contract, require_field};
use alloy_primitives::Address;
use async_trait::async_trait;
use bridge_core_blockchain::BridgeContext;
use bridge_core_components::TaskHandler;
use bridge_types_events::{BridgeTx, ChainEvent, TxKind};
use eyre::{Result, eyre};
use serde_json::json;

/// Relays state sync records emitted by the state sender contract
pub struct ClerkHandler {
    state_sender: Address,
}

impl ClerkHandler {
    pub fn new(state_sender: Address) -> Self {
        Self { state_sender }
    }
}

#[async_trait]
impl TaskHandler for ClerkHandler {
    fn tasks(&self) -> &'static [&'static str] {
        &["state_synced"]
    }

    async fn handle(&self, task: &str, event: &ChainEvent, _ctx: &BridgeContext) -> Result<Option<BridgeTx>> {
        if task != "state_synced" {
            return Err(eyre!("unknown clerk task {task}"));
        }
        ensure_contract(event, self.state_sender)?;

        let id = require_field(event, "id")?;
        let receiver = require_field(event, "contract_address")?;
        let data = event.field("data").cloned().unwrap_or_default();

        Ok(Some(BridgeTx::new(
            TxKind::StateSync,
            json!({
                "id": id,
                "contract_address": receiver,
                "data": data,
                "block_number": event.block_number,
            }),
        )))
    }
}
