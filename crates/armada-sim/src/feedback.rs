//! Outbound presentation feedback collected during a step.

use armada_core::events::{EffectRequest, SimEvent};

/// Effect requests, events and the impact pulse raised by the systems.
/// Nothing in here is read back by the simulation.
#[derive(Debug, Default)]
pub struct Feedback {
    pub effects: Vec<EffectRequest>,
    pub events: Vec<SimEvent>,
    /// Camera-shake style scalar.
    pub impact: u32,
}

impl Feedback {
    pub fn effect(&mut self, request: EffectRequest) {
        self.effects.push(request);
    }

    pub fn event(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    /// Set the impact pulse. The latest pulse replaces whatever remains.
    pub fn pulse(&mut self, level: u32) {
        self.impact = level;
    }

    /// Drop the requests and events of the previous step.
    pub fn clear_requests(&mut self) {
        self.effects.clear();
        self.events.clear();
    }

    /// End-of-tick decay of the impact pulse.
    pub fn decay(&mut self) {
        self.impact = self.impact.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.clear_requests();
        self.impact = 0;
    }
}
