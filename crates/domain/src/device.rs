//! Device — the shared capability set of all controllable appliances.
//!
//! The appliance roster is fixed at startup (one light, one fan, one air
//! conditioner), so identifiers are a closed enum rather than generated ids.
//! Every appliance can report whether it is on, be forced off, render a
//! one-line status for logging, and produce a full [`Snapshot`] of its state.

use serde::{Deserialize, Serialize};

/// Identifier for one of the three appliances on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceId {
    Light,
    Fan,
    AirConditioner,
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Fan => f.write_str("fan"),
            Self::AirConditioner => f.write_str("air_conditioner"),
        }
    }
}

/// Full state of a device, emitted to observers after every mutation so the
/// presentation layer can re-render without polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "device", rename_all = "snake_case")]
pub enum Snapshot {
    Light { on: bool },
    Fan { speed: u8 },
    AirConditioner { on: bool, target_c: i32, current_c: i32 },
}

/// Shared capabilities of every appliance.
///
/// Each implementor keeps its own state shape; there is no shared mutable
/// base. Mutating methods report whether state actually changed so callers
/// can skip redundant notifications.
pub trait Device {
    /// The fixed identifier of this appliance.
    fn id(&self) -> DeviceId;

    /// Whether the appliance is currently running.
    fn is_on(&self) -> bool;

    /// Unconditionally power down (used during the annual system update).
    ///
    /// Idempotent: returns `false` when the appliance was already off.
    fn turn_off(&mut self) -> bool;

    /// One-line human-readable status for logging.
    fn status(&self) -> String;

    /// Full current state.
    fn snapshot(&self) -> Snapshot;
}
