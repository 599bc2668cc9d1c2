use alloy_primitives::Address;
use bridge_core_config::ContractsConfig;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ContractCallerError {
    #[error("invalid {contract} address {value:?}: {reason}")]
    InvalidAddress { contract: &'static str, value: String, reason: String },
    #[error("{0} address is not set")]
    ZeroAddress(&'static str),
}

/// Root chain contracts the processors read events from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractCaller {
    pub root_chain: Address,
    pub staking_info: Address,
    pub state_sender: Address,
}

impl ContractCaller {
    pub fn new(config: &ContractsConfig) -> Result<Self, ContractCallerError> {
        let caller = Self {
            root_chain: parse_address("root_chain", &config.root_chain)?,
            staking_info: parse_address("staking_info", &config.staking_info)?,
            state_sender: parse_address("state_sender", &config.state_sender)?,
        };
        debug!(root_chain = %caller.root_chain, staking_info = %caller.staking_info, state_sender = %caller.state_sender, "Contracts resolved");
        Ok(caller)
    }
}

fn parse_address(contract: &'static str, value: &str) -> Result<Address, ContractCallerError> {
    let address = value
        .trim()
        .parse::<Address>()
        .map_err(|e| ContractCallerError::InvalidAddress { contract, value: value.to_string(), reason: e.to_string() })?;
    if address.is_zero() {
        return Err(ContractCallerError::ZeroAddress(contract));
    }
    Ok(address)
}
