use crate::config_loader::load_from_file;
use eyre::Result;
use serde::Deserialize;
use std::path::Path;

/// Consensus chain and root chain connection settings
#[derive(Clone, Debug, Deserialize)]
pub struct ChainConfig {
    pub chain_id: u64,
    /// Root chain JSON-RPC endpoint
    pub rpc_url: String,
    /// Length of a producer span in consensus chain blocks
    #[serde(default = "default_span_duration")]
    pub span_duration: u64,
}

fn default_span_duration() -> u64 {
    6400
}

/// Root chain contract addresses, hex encoded
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ContractsConfig {
    pub root_chain: String,
    pub staking_info: String,
    pub state_sender: String,
}

/// Which processors the supervisor should run
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ProcessorSelection {
    /// Run the whole catalog, `only` is ignored when set
    #[serde(default)]
    pub all: bool,
    /// Processor names in the order they should be started
    #[serde(default)]
    pub only: Vec<String>,
}

impl ProcessorSelection {
    pub fn all() -> Self {
        Self { all: true, only: Vec::new() }
    }

    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { all: false, only: names.into_iter().map(Into::into).collect() }
    }

    pub fn is_empty(&self) -> bool {
        !self.all && self.only.is_empty()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProcessorsConfig {
    #[serde(flatten)]
    pub selection: ProcessorSelection,
    /// How often the span processor checks whether a new span is due
    #[serde(default = "default_span_poll_interval_secs")]
    pub span_poll_interval_secs: u64,
    /// Number of recently bridged events each processor remembers for deduplication
    #[serde(default = "default_dedupe_capacity")]
    pub dedupe_capacity: usize,
}

impl Default for ProcessorsConfig {
    fn default() -> Self {
        Self {
            selection: ProcessorSelection::default(),
            span_poll_interval_secs: default_span_poll_interval_secs(),
            dedupe_capacity: default_dedupe_capacity(),
        }
    }
}

fn default_span_poll_interval_secs() -> u64 {
    60
}

fn default_dedupe_capacity() -> usize {
    10_000
}

#[derive(Clone, Debug, Deserialize)]
pub struct QueueConfig {
    /// Capacity of the task and transaction broadcast channels
    pub capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        QueueConfig { capacity: 1000 }
    }
}

/// Main bridge configuration
#[derive(Clone, Debug, Deserialize)]
pub struct BridgeConfig {
    pub chain: ChainConfig,

    pub contracts: ContractsConfig,

    #[serde(default)]
    pub processors: ProcessorsConfig,

    #[serde(default)]
    pub queue: QueueConfig,
}

impl BridgeConfig {
    pub async fn load_from_file(file_name: impl AsRef<Path>) -> Result<BridgeConfig> {
        let config = load_from_file(file_name).await?;
        Ok(config)
    }
}
