//! Presentation sinks.

use super::event::BoardEvent;

/// Receiver of board events.
///
/// Implementations must not block the rules for long; animation queues and
/// network fan-out belong behind this boundary.
pub trait PresentationSink {
    fn on_event(&mut self, event: &BoardEvent);

    fn on_events(&mut self, events: &[BoardEvent]) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// Sink that records every event in order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<BoardEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[BoardEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl PresentationSink for EventLog {
    fn on_event(&mut self, event: &BoardEvent) {
        self.events.push(*event);
    }
}

/// Sink that drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn on_event(&mut self, _event: &BoardEvent) {}
}
