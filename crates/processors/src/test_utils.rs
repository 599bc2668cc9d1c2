use alloy_primitives::{Address, B256};
use bridge_broadcast_broadcaster::ChannelBroadcaster;
use bridge_core_blockchain::{BridgeContext, ChainParameters, RpcClient};
use bridge_core_config::ContractsConfig;
use bridge_core_queue::QueueConnector;
use bridge_types_events::ChainEvent;
use std::sync::Arc;

pub(crate) fn context(params: ChainParameters) -> BridgeContext {
    BridgeContext::new(
        params,
        RpcClient::new("http://localhost:8545").unwrap(),
        Arc::new(QueueConnector::new(16)),
        Arc::new(ChannelBroadcaster::new(16)),
        ContractsConfig::default(),
    )
}

pub(crate) fn event(contract: Address, data: serde_json::Value) -> ChainEvent {
    ChainEvent { contract, tx_hash: B256::repeat_byte(0x42), log_index: 3, block_number: 1_000, data }
}
