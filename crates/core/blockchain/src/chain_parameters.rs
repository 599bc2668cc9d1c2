use alloy_primitives::{BlockNumber, ChainId};
use bridge_core_config::ChainConfig;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainParameters {
    pub chain_id: ChainId,
    /// Consensus chain blocks per producer span
    pub span_duration: u64,
    /// Latest known consensus chain block. Nothing in this workspace advances it, the host that
    /// tracks the consensus chain head writes it through `BridgeContext::chain_parameters`.
    pub head_block: BlockNumber,
}

impl ChainParameters {
    pub fn new(chain_id: ChainId) -> Self {
        Self { chain_id, span_duration: 6400, head_block: 0 }
    }

    pub fn with_span_duration(mut self, span_duration: u64) -> Self {
        self.span_duration = span_duration;
        self
    }

    pub fn with_head_block(mut self, head_block: BlockNumber) -> Self {
        self.head_block = head_block;
        self
    }

    /// Span the given consensus chain block belongs to
    pub fn span_id(&self, block: BlockNumber) -> u64 {
        if self.span_duration == 0 {
            return 0;
        }
        block / self.span_duration
    }
}

impl From<&ChainConfig> for ChainParameters {
    fn from(config: &ChainConfig) -> Self {
        Self { chain_id: config.chain_id, span_duration: config.span_duration, head_block: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_id() {
        let params = ChainParameters::new(137).with_span_duration(100);
        assert_eq!(params.span_id(0), 0);
        assert_eq!(params.span_id(99), 0);
        assert_eq!(params.span_id(100), 1);
        assert_eq!(ChainParameters::new(137).with_span_duration(0).span_id(500), 0);
    }
}
