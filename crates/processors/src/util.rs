use alloy_primitives::Address;
use bridge_types_events::ChainEvent;
use eyre::{Result, eyre};
use serde_json::Value;

pub(crate) fn ensure_contract(event: &ChainEvent, expected: Address) -> Result<()> {
    if event.contract != expected {
        return Err(eyre!("event {} emitted by {} instead of {}", event.id(), event.contract, expected));
    }
    Ok(())
}

pub(crate) fn require_field<'a>(event: &'a ChainEvent, name: &str) -> Result<&'a Value> {
    match event.field(name) {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(eyre!("event {} is missing {}", event.id(), name)),
    }
}
