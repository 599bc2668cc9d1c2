use crate::SupervisorError;
use strum_macros::Display;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SupervisorState {
    Idle,
    Started,
    Stopped,
}

/// Linear Idle -> Started -> Stopped lifecycle, there is no way back
#[derive(Debug)]
pub struct Lifecycle {
    name: &'static str,
    state: SupervisorState,
}

impl Lifecycle {
    pub fn new(name: &'static str) -> Self {
        Self { name, state: SupervisorState::Idle }
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    pub fn start(&mut self) -> Result<(), SupervisorError> {
        self.transition(SupervisorState::Idle, SupervisorState::Started)
    }

    pub fn stop(&mut self) -> Result<(), SupervisorError> {
        self.transition(SupervisorState::Started, SupervisorState::Stopped)
    }

    /// Give up on a start that could not complete
    pub fn abort(&mut self) {
        debug!(name = self.name, from = %self.state, "Lifecycle aborted");
        self.state = SupervisorState::Stopped;
    }

    fn transition(&mut self, from: SupervisorState, to: SupervisorState) -> Result<(), SupervisorError> {
        if self.state != from {
            return Err(SupervisorError::InvalidTransition { name: self.name, from: self.state, to });
        }
        debug!(name = self.name, %from, %to, "Lifecycle transition");
        self.state = to;
        Ok(())
    }
}
