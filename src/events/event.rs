//! A single time-stamped directed interaction.
//!
//! [`Event`] is an immutable value: construction never validates and never
//! has side effects. Weight and ordering checks happen when an event enters
//! an [`EventLog`](super::log::EventLog).
use crate::events::time::EventTime;

/// Integer actor identifier. Mapping names to ids is the caller's concern.
pub type ActorId = u64;

/// Ordered actor pair `(sender, receiver)`.
pub type Dyad = (ActorId, ActorId);

/// Event type assigned by [`Event::new`].
pub const DEFAULT_EVENT_TYPE: &str = "event";

/// Event — one relational event `sender → receiver` at `time`.
///
/// Fields
/// ------
/// - `sender`, `receiver`: [`ActorId`]
///   Directed endpoints. Self-loops are representable; whether they belong
///   to a risk set is decided by the sampler.
/// - `time`: `T`
///   Any [`EventTime`] timestamp.
/// - `event_type`: `String`
///   Free-form type tag.
/// - `weight`: `f64`
///   Contribution of the event to every aggregate; expected finite and ≥ 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<T> {
    sender: ActorId,
    receiver: ActorId,
    time: T,
    event_type: String,
    weight: f64,
}

impl<T: EventTime> Event<T> {
    /// Unit-weight event of the default type.
    pub fn new(sender: ActorId, receiver: ActorId, time: T) -> Self {
        Event { sender, receiver, time, event_type: DEFAULT_EVENT_TYPE.to_string(), weight: 1.0 }
    }

    /// Replace the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Replace the type tag.
    pub fn with_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    pub fn sender(&self) -> ActorId {
        self.sender
    }

    pub fn receiver(&self) -> ActorId {
        self.receiver
    }

    pub fn time(&self) -> T {
        self.time
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// `(sender, receiver)`.
    pub fn dyad(&self) -> Dyad {
        (self.sender, self.receiver)
    }

    pub fn is_self_loop(&self) -> bool {
        self.sender == self.receiver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Builders override defaults without touching the other fields.
    //
    // Given
    // -----
    // - `Event::new(1, 2, 5.0)` with weight 2.5 and type "email".
    //
    // Expect
    // ------
    // - Endpoints and time preserved, weight and type replaced.
    fn builders_replace_weight_and_type() {
        let e = Event::new(1, 2, 5.0).with_weight(2.5).with_type("email");

        assert_eq!(e.dyad(), (1, 2));
        assert_eq!(e.time(), 5.0);
        assert_eq!(e.weight(), 2.5);
        assert_eq!(e.event_type(), "email");
        assert!(!e.is_self_loop());
    }

    #[test]
    // Purpose
    // -------
    // Defaults are unit weight and the default type tag.
    //
    // Given
    // -----
    // - A self-loop event built with `Event::new`.
    //
    // Expect
    // ------
    // - Weight 1.0, type `DEFAULT_EVENT_TYPE`, self-loop detected.
    fn new_uses_defaults() {
        let e = Event::new(4, 4, 0_i64);

        assert_eq!(e.weight(), 1.0);
        assert_eq!(e.event_type(), DEFAULT_EVENT_TYPE);
        assert!(e.is_self_loop());
    }
}
