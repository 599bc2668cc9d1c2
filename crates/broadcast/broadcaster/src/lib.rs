pub use channel_broadcaster::ChannelBroadcaster;

mod channel_broadcaster;

use async_trait::async_trait;
use bridge_types_events::{BridgeTx, TxReceipt};
use eyre::Result;

/// Submits bridge transactions to the consensus chain
#[async_trait]
pub trait TxBroadcaster: Send + Sync {
    async fn broadcast(&self, tx: BridgeTx) -> Result<TxReceipt>;
}
