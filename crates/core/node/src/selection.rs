use bridge_core_config::ProcessorSelection;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::warn;

/// Fixed processor catalog. Declaration order is the canonical start order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ProcessorKind {
    Checkpoint,
    Staking,
    Clerk,
    Fee,
    Span,
    Slashing,
}

impl ProcessorKind {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Kinds that are only present as disabled placeholders
    pub fn is_disabled(self) -> bool {
        matches!(self, ProcessorKind::Checkpoint | ProcessorKind::Slashing)
    }

    pub fn canonical() -> Vec<ProcessorKind> {
        ProcessorKind::iter().collect()
    }
}

/// Resolve the configured selection to catalog kinds.
///
/// `all` wins over `only`. Otherwise names are matched exactly, in the given order; unknown names
/// are dropped and a repeated name keeps its first position.
pub fn select(selection: &ProcessorSelection) -> Vec<ProcessorKind> {
    if selection.all {
        return ProcessorKind::canonical();
    }

    let mut kinds = Vec::with_capacity(selection.only.len());
    for name in &selection.only {
        match ProcessorKind::from_str(name) {
            Ok(kind) if kinds.contains(&kind) => warn!(processor = %kind, "Processor selected more than once, keeping the first"),
            Ok(kind) => kinds.push(kind),
            Err(_) => warn!(name = %name, "Unknown processor name, ignoring"),
        }
    }
    kinds
}
