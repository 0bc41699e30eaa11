//! In-process event bus backed by a tokio broadcast channel.

use tokio::sync::broadcast;

use homedeck_domain::event::Event;

use crate::ports::EventSink;

/// In-process event bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the event is simply dropped).
pub struct InProcessEventBus {
    sender: broadcast::Sender<Event>,
}

impl InProcessEventBus {
    /// Create a new event bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events on this bus.
    ///
    /// Returns a receiver that will get all events published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }
}

impl EventSink for InProcessEventBus {
    fn publish(&self, event: Event) {
        // broadcast::send fails only when there are zero receivers,
        // which is fine — we simply ignore the error.
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homedeck_domain::device::{DeviceId, Snapshot};
    use homedeck_domain::scheduler::Phase;

    fn light_event(on: bool) -> Event {
        Event::StateChanged {
            device: DeviceId::Light,
            snapshot: Snapshot::Light { on },
        }
    }

    #[tokio::test]
    async fn should_deliver_event_to_subscriber() {
        let bus = InProcessEventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(light_event(true));

        let received = rx.recv().await.unwrap();
        assert_eq!(received, light_event(true));
    }

    #[tokio::test]
    async fn should_deliver_event_to_multiple_subscribers() {
        let bus = InProcessEventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let event = Event::PhaseChanged {
            phase: Phase::Updating,
        };
        bus.publish(event);

        assert_eq!(rx1.recv().await.unwrap(), event);
        assert_eq!(rx2.recv().await.unwrap(), event);
    }

    #[test]
    fn should_not_panic_when_no_subscribers() {
        let bus = InProcessEventBus::new(16);
        bus.publish(light_event(false));
    }

    #[tokio::test]
    async fn should_not_deliver_events_published_before_subscription() {
        let bus = InProcessEventBus::new(16);
        bus.publish(light_event(true));

        let mut rx = bus.subscribe();
        bus.publish(light_event(false));

        assert_eq!(rx.recv().await.unwrap(), light_event(false));
    }
}
