//! Per-query record of collaborator degradations.

use medcot_core::models::DegradationEvent;

/// Degradations hit while serving one query, in the order they occurred.
#[derive(Debug, Clone, Default)]
pub struct DegradationTracker {
    events: Vec<DegradationEvent>,
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a `degradation_triggered` event and keep the record.
    pub fn record(&mut self, event: DegradationEvent) {
        crate::tracing_setup::events::degradation_triggered(
            &event.component,
            &event.failure,
            &event.fallback_used,
        );
        self.events.push(event);
    }

    pub fn events(&self) -> &[DegradationEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Hand the records over to the query outcome.
    pub fn into_events(self) -> Vec<DegradationEvent> {
        self.events
    }
}
