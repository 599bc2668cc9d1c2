use crate::Processor;
use async_trait::async_trait;
use eyre::Result;
use tracing::debug;

/// Stand-in for catalog entries without an implementation. Every operation succeeds and does nothing.
#[derive(Clone, Copy, Debug)]
pub struct DisabledProcessor {
    name: &'static str,
}

impl DisabledProcessor {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl Processor for DisabledProcessor {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn register_tasks(&self) -> Result<()> {
        // No-op for disabled processors
        Ok(())
    }

    async fn start(&self) -> Result<()> {
        debug!(processor = self.name, "Processor is disabled, nothing to run");
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        Ok(())
    }
}
