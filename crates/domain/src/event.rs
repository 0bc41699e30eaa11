//! Event — an immutable record of something that happened on the panel.
//!
//! Events are produced after every device mutation and on every scheduler
//! phase transition. Observers (the presentation layer, loggers, tests)
//! receive full snapshots and never need to poll.

use serde::{Deserialize, Serialize};

use crate::device::{DeviceId, Snapshot};
use crate::scheduler::Phase;

/// A state-change or phase-change record carried on the event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A device mutated; `snapshot` is its full state after the change.
    StateChanged {
        device: DeviceId,
        snapshot: Snapshot,
    },
    /// The update scheduler entered a new phase.
    PhaseChanged { phase: Phase },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_tag_state_changed_events() {
        let event = Event::StateChanged {
            device: DeviceId::Light,
            snapshot: Snapshot::Light { on: true },
        };
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["type"], "state_changed");
        assert_eq!(json["device"], "light");
        assert_eq!(json["snapshot"]["on"], true);
    }

    #[test]
    fn should_serialize_phase_changed_with_signal_name() {
        let event = Event::PhaseChanged {
            phase: Phase::Updating,
        };
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["type"], "phase_changed");
        assert_eq!(json["phase"], "updating");
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let event = Event::StateChanged {
            device: DeviceId::AirConditioner,
            snapshot: Snapshot::AirConditioner {
                on: true,
                target_c: 25,
                current_c: 22,
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
