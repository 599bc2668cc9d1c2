use bridge_core_config::ProcessorSelection;
use clap::Parser;

/// Bridge daemon running the root chain event processors
#[derive(Parser, Debug)]
#[command(name = "bridge", version, about)]
pub struct BridgeArgs {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Start every processor in the catalog
    #[arg(long)]
    pub all: bool,

    /// Comma separated processors to start, e.g. staking,fee
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

impl BridgeArgs {
    /// Command line selection wins over the file when any flag is given
    pub fn selection(&self, file: &ProcessorSelection) -> ProcessorSelection {
        if self.all || !self.only.is_empty() {
            ProcessorSelection { all: self.all, only: self.only.clone() }
        } else {
            file.clone()
        }
    }
}
