//! Event sink port — publish panel events to interested subscribers.

use homedeck_domain::event::Event;

/// Publishes panel events to all current subscribers.
///
/// Publishing is infallible: with zero subscribers the event is simply
/// dropped.
pub trait EventSink {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: Event);
}

impl<T: EventSink + Send + Sync> EventSink for std::sync::Arc<T> {
    fn publish(&self, event: Event) {
        (**self).publish(event);
    }
}
