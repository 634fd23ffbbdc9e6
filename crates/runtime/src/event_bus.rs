use foundation::time::Time;
use serde::Serialize;

/// One entry of the navigation trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Monotonic sequence number, starting at 0.
    pub seq: u64,
    /// Host time of the event, when the caller knows it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at: Option<Time>,
    pub kind: &'static str,
    pub message: String,
}

/// In-memory trace of what the dashboard did, in order.
#[derive(Debug, Default)]
pub struct EventBus {
    next_seq: u64,
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, kind: &'static str, message: impl Into<String>) {
        self.push(None, kind, message.into());
    }

    pub fn emit_at(&mut self, at: Time, kind: &'static str, message: impl Into<String>) {
        self.push(Some(at), kind, message.into());
    }

    fn push(&mut self, at: Option<Time>, kind: &'static str, message: String) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Event {
            seq,
            at,
            kind,
            message,
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Takes the buffered events; sequence numbers keep counting.
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use foundation::time::Time;

    #[test]
    fn records_events_in_order() {
        let mut bus = EventBus::new();
        bus.emit("navigate", "world -> region Europa");
        bus.emit_at(Time(16.0), "panel", "open deu-finance");
        let events = bus.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].seq, 0);
        assert_eq!(events[1].seq, 1);
        assert_eq!(events[1].at, Some(Time(16.0)));
    }

    #[test]
    fn drain_clears_events_but_keeps_sequence() {
        let mut bus = EventBus::new();
        bus.emit("k", "m");
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.events().is_empty());
        bus.emit("k", "n");
        assert_eq!(bus.events()[0].seq, 1);
    }
}
