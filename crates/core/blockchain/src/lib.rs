pub use chain_parameters::ChainParameters;
pub use codec::{CodecError, JsonCodec};
pub use context::BridgeContext;
pub use contract_caller::{ContractCaller, ContractCallerError};
pub use rpc::RpcClient;

mod chain_parameters;
mod codec;
mod context;
mod contract_caller;
mod rpc;
