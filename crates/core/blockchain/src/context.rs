use crate::{ChainParameters, JsonCodec, RpcClient};
use bridge_broadcast_broadcaster::TxBroadcaster;
use bridge_core_config::{BridgeConfig, ContractsConfig};
use bridge_core_queue::TaskQueue;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Read-mostly resources shared by every processor
#[derive(Clone)]
pub struct BridgeContext {
    pub chain_parameters: Arc<RwLock<ChainParameters>>,
    pub codec: JsonCodec,
    pub rpc: RpcClient,
    pub queue: Arc<dyn TaskQueue>,
    pub broadcaster: Arc<dyn TxBroadcaster>,
    /// Contract addresses as configured, validated when the supervisor is built
    pub contracts: ContractsConfig,
    pub span_poll_interval: Duration,
    /// Recently bridged events each processor keeps for deduplication
    pub dedupe_capacity: usize,
}

impl BridgeContext {
    pub fn new(
        chain_parameters: ChainParameters,
        rpc: RpcClient,
        queue: Arc<dyn TaskQueue>,
        broadcaster: Arc<dyn TxBroadcaster>,
        contracts: ContractsConfig,
    ) -> Self {
        Self {
            chain_parameters: Arc::new(RwLock::new(chain_parameters)),
            codec: JsonCodec,
            rpc,
            queue,
            broadcaster,
            contracts,
            span_poll_interval: Duration::from_secs(60),
            dedupe_capacity: 10_000,
        }
    }

    pub fn from_config(
        config: &BridgeConfig,
        queue: Arc<dyn TaskQueue>,
        broadcaster: Arc<dyn TxBroadcaster>,
    ) -> Result<Self, url::ParseError> {
        let rpc = RpcClient::new(&config.chain.rpc_url)?;
        Ok(Self::new(ChainParameters::from(&config.chain), rpc, queue, broadcaster, config.contracts.clone())
            .with_span_poll_interval(Duration::from_secs(config.processors.span_poll_interval_secs))
            .with_dedupe_capacity(config.processors.dedupe_capacity))
    }

    pub fn with_span_poll_interval(mut self, span_poll_interval: Duration) -> Self {
        self.span_poll_interval = span_poll_interval;
        self
    }

    pub fn with_dedupe_capacity(mut self, dedupe_capacity: usize) -> Self {
        self.dedupe_capacity = dedupe_capacity;
        self
    }

    /// Snapshot of the current chain parameters
    pub async fn chain_parameters(&self) -> ChainParameters {
        self.chain_parameters.read().await.clone()
    }
}
