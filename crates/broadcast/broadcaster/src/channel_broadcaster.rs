use crate::TxBroadcaster;
use async_trait::async_trait;
use bridge_types_events::{BridgeTx, Message, TxReceipt};
use eyre::{Result, eyre};
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};
use tracing::debug;

/// Broadcaster that hands transactions to an in-process channel.
///
/// Every accepted transaction gets a monotonically increasing sequence number, which stands in
/// for the account sequence of the signing key. Sequence order always matches channel order.
#[derive(Clone)]
pub struct ChannelBroadcaster {
    tx_channel: broadcast::Sender<Message<BridgeTx>>,
    // next sequence, held while sending
    sequence: Arc<Mutex<u64>>,
}

impl ChannelBroadcaster {
    pub fn new(capacity: usize) -> Self {
        Self { tx_channel: broadcast::channel(capacity).0, sequence: Arc::new(Mutex::new(0)) }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Message<BridgeTx>> {
        self.tx_channel.subscribe()
    }

    /// Number of transactions accepted so far
    pub async fn submitted(&self) -> u64 {
        *self.sequence.lock().await
    }
}

impl Default for ChannelBroadcaster {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[async_trait]
impl TxBroadcaster for ChannelBroadcaster {
    async fn broadcast(&self, tx: BridgeTx) -> Result<TxReceipt> {
        let kind = tx.kind;
        let mut next = self.sequence.lock().await;
        self.tx_channel.send(Message::new_with_source(tx, kind.to_string())).map_err(|_| eyre!("NO_TX_CONSUMERS"))?;
        let sequence = *next;
        *next += 1;
        drop(next);
        debug!(%kind, sequence, "Transaction broadcasted");
        Ok(TxReceipt { sequence, kind })
    }
}
