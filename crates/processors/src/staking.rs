use crate::util::{ensure_contract, require_field};
use alloy_primitives::Address;
use async_trait::async_trait;
use bridge_core_blockchain::BridgeContext;
use bridge_core_components::TaskHandler;
use bridge_types_events::{BridgeTx, ChainEvent, TxKind};
use eyre::{Result, eyre};
use serde_json::json;

/// Validator set changes reported by the staking info contract
pub struct StakingHandler {
    staking_info: Address,
}

impl StakingHandler {
    pub const TASKS: &'static [&'static str] = &["validator_join", "stake_update", "signer_change", "unstake_init"];

    pub fn new(staking_info: Address) -> Self {
        Self { staking_info }
    }

    fn tx_kind(task: &str) -> Option<TxKind> {
        match task {
            "validator_join" => Some(TxKind::ValidatorJoin),
            "stake_update" => Some(TxKind::StakeUpdate),
            "signer_change" => Some(TxKind::SignerUpdate),
            "unstake_init" => Some(TxKind::ValidatorExit),
            _ => None,
        }
    }
}

#[async_trait]
impl TaskHandler for StakingHandler {
    fn tasks(&self) -> &'static [&'static str] {
        Self::TASKS
    }

    async fn handle(&self, task: &str, event: &ChainEvent, _ctx: &BridgeContext) -> Result<Option<BridgeTx>> {
        let kind = Self::tx_kind(task).ok_or_else(|| eyre!("unknown staking task {task}"))?;
        ensure_contract(event, self.staking_info)?;
        let validator_id = require_field(event, "validator_id")?;

        Ok(Some(BridgeTx::new(
            kind,
            json!({
                "validator_id": validator_id,
                "block_number": event.block_number,
                "event": event.data,
            }),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{context, event};
    use bridge_core_blockchain::ChainParameters;

    const STAKING_INFO: Address = Address::repeat_byte(0x22);

    #[tokio::test]
    async fn test_tasks_map_to_tx_kinds() {
        let handler = StakingHandler::new(STAKING_INFO);
        let ctx = context(ChainParameters::new(137));
        let ev = event(STAKING_INFO, json!({"validator_id": 5, "signer": "0xabc"}));

        let expected = [
            ("validator_join", TxKind::ValidatorJoin),
            ("stake_update", TxKind::StakeUpdate),
            ("signer_change", TxKind::SignerUpdate),
            ("unstake_init", TxKind::ValidatorExit),
        ];
        for (task, kind) in expected {
            let tx = handler.handle(task, &ev, &ctx).await.unwrap().unwrap();
            assert_eq!(tx.kind, kind);
            assert_eq!(tx.body["validator_id"], json!(5));
            assert_eq!(tx.body["block_number"], json!(1_000));
        }
        assert_eq!(handler.tasks().len(), expected.len());
    }

    #[tokio::test]
    async fn test_rejects_foreign_contract() {
        let handler = StakingHandler::new(STAKING_INFO);
        let ctx = context(ChainParameters::new(137));
        let ev = event(Address::repeat_byte(0x99), json!({"validator_id": 5}));
        assert!(handler.handle("validator_join", &ev, &ctx).await.is_err());
    }

    #[tokio::test]
    async fn test_requires_validator_id() {
        let handler = StakingHandler::new(STAKING_INFO);
        let ctx = context(ChainParameters::new(137));
        let ev = event(STAKING_INFO, json!({"signer": "0xabc"}));
        let err = handler.handle("stake_update", &ev, &ctx).await.unwrap_err();
        assert!(err.to_string().contains("validator_id"));
    }
}
