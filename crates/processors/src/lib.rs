//! Catalog processors bridging root chain events into consensus chain transactions

pub use clerk::ClerkHandler;
pub use fee::FeeHandler;
pub use span::SpanHandler;
pub use staking::StakingHandler;

use bridge_core_components::EventProcessor;

mod clerk;
mod fee;
mod span;
mod staking;
mod util;

#[cfg(test)]
mod test_utils;

pub type ClerkProcessor = EventProcessor<ClerkHandler>;
pub type FeeProcessor = EventProcessor<FeeHandler>;
pub type SpanProcessor = EventProcessor<SpanHandler>;
pub type StakingProcessor = EventProcessor<StakingHandler>;
