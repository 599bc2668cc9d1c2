pub use bridge_config::{BridgeConfig, ChainConfig, ContractsConfig, ProcessorSelection, ProcessorsConfig, QueueConfig};
pub use config_loader::{LoadConfigError, load_from_file, parse_str};

mod bridge_config;
mod config_loader;
