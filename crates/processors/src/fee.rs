use crate::util::{ensure_contract, require_field};
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use bridge_core_blockchain::BridgeContext;
use bridge_core_components::TaskHandler;
use bridge_types_events::{BridgeTx, ChainEvent, TxKind};
use eyre::{Result, eyre};
use serde_json::{Value, json};

/// Credits fee top-ups made on the staking info contract
pub struct FeeHandler {
    staking_info: Address,
}

impl FeeHandler {
    pub fn new(staking_info: Address) -> Self {
        Self { staking_info }
    }
}

fn parse_fee(value: &Value) -> Result<U256> {
    let fee = match value {
        Value::String(s) => s.parse::<U256>().map_err(|e| eyre!("invalid fee {s}: {e}"))?,
        Value::Number(n) => U256::from(n.as_u64().ok_or_else(|| eyre!("invalid fee {n}"))?),
        other => return Err(eyre!("invalid fee {other}")),
    };
    if fee.is_zero() {
        return Err(eyre!("top-up fee must be positive"));
    }
    Ok(fee)
}

#[async_trait]
impl TaskHandler for FeeHandler {
    fn tasks(&self) -> &'static [&'static str] {
        &["topup_fee"]
    }

    async fn handle(&self, task: &str, event: &ChainEvent, _ctx: &BridgeContext) -> Result<Option<BridgeTx>> {
        if task != "topup_fee" {
            return Err(eyre!("unknown fee task {task}"));
        }
        ensure_contract(event, self.staking_info)?;

        let user = require_field(event, "user")?;
        let fee = parse_fee(require_field(event, "fee")?)?;

        Ok(Some(BridgeTx::new(
            TxKind::Topup,
            json!({
                "user": user,
                "fee": fee.to_string(),
                "tx_hash": event.tx_hash,
                "log_index": event.log_index,
                "block_number": event.block_number,
            }),
        )))
    }
}
