use async_trait::async_trait;
use bridge_core_blockchain::BridgeContext;
use bridge_core_components::TaskHandler;
use bridge_types_events::{BridgeTx, ChainEvent, TxKind};
use eyre::{Result, eyre};
use serde_json::json;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Proposes the next producer span once the current one is under way.
///
/// There are no queue tasks, the work is driven entirely by the recurring check.
#[derive(Default)]
pub struct SpanHandler {
    last_proposed: Mutex<Option<u64>>,
}

impl SpanHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn last_proposed(&self) -> Option<u64> {
        *self.last_proposed.lock().await
    }
}

#[async_trait]
impl TaskHandler for SpanHandler {
    fn tasks(&self) -> &'static [&'static str] {
        &[]
    }

    async fn handle(&self, task: &str, _event: &ChainEvent, _ctx: &BridgeContext) -> Result<Option<BridgeTx>> {
        Err(eyre!("span processor does not consume task {task}"))
    }

    fn poll_interval(&self, ctx: &BridgeContext) -> Option<Duration> {
        Some(ctx.span_poll_interval)
    }

    async fn on_tick(&self, ctx: &BridgeContext) -> Result<Option<BridgeTx>> {
        let params = ctx.chain_parameters().await;
        if params.span_duration == 0 {
            warn!("Span duration is zero, not proposing spans");
            return Ok(None);
        }

        let next_span = params.span_id(params.head_block) + 1;
        let mut last_proposed = self.last_proposed.lock().await;
        if last_proposed.is_some_and(|last| last >= next_span) {
            debug!(span_id = next_span, "Span already proposed");
            return Ok(None);
        }

        let start_block = next_span * params.span_duration;
        let end_block = start_block + params.span_duration - 1;
        *last_proposed = Some(next_span);

        Ok(Some(BridgeTx::new(
            TxKind::ProposeSpan,
            json!({
                "span_id": next_span,
                "start_block": start_block,
                "end_block": end_block,
                "chain_id": params.chain_id,
            }),
        )))
    }
}
