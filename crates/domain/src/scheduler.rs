//! Update scheduler — fires the annual system update exactly once per year.
//!
//! The trigger instant is fixed: January 1st, 01:00:00 local time. A poll
//! loop feeds wall-clock readings into [`UpdateScheduler::check_now`]; the
//! scheduler itself never reads the clock, so tests can replay arbitrary
//! instants.
//!
//! Phase machine:
//!
//! ```text
//! Idle --(trigger matched)--> Updating --(2s)--> CooldownDisplay --(5s)--> Idle
//! ```
//!
//! Because the poll cadence (1s) equals the width of the trigger window
//! (one second), the same matching instant can be observed by more than one
//! poll. The `last_triggered_year` guard makes the trigger fire at most once
//! per calendar year regardless.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Dwell time in the `Updating` phase ("update installation") in milliseconds.
pub const UPDATING_DELAY_MS: i64 = 2_000;
/// Dwell time in the `CooldownDisplay` phase (completion banner) in milliseconds.
pub const COOLDOWN_DELAY_MS: i64 = 5_000;

/// Phase of the annual update sequence, as exposed to collaborators.
///
/// The serialized names are the status signals the presentation layer
/// renders: `updating` while installing, `complete` during the cooldown
/// banner, `online` in normal operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    #[serde(rename = "online")]
    Idle,
    #[serde(rename = "updating")]
    Updating,
    #[serde(rename = "complete")]
    CooldownDisplay,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => f.write_str("online"),
            Self::Updating => f.write_str("updating"),
            Self::CooldownDisplay => f.write_str("complete"),
        }
    }
}

/// Annual system-update state machine.
#[derive(Debug, Default)]
pub struct UpdateScheduler {
    phase: Phase,
    last_triggered_year: Option<i32>,
    phase_entered_at: Option<Timestamp>,
}

impl UpdateScheduler {
    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Evaluate one wall-clock reading.
    ///
    /// Returns the phase that was just entered, or `None` when nothing
    /// changed. On the `Idle -> Updating` transition the caller must force
    /// every registered device off.
    ///
    /// `now` readings are expected to be monotonically non-decreasing; the
    /// dwell transitions compare elapsed time against the phase entry
    /// instant.
    pub fn check_now(&mut self, now: Timestamp) -> Option<Phase> {
        match self.phase {
            Phase::Idle => {
                if Self::is_trigger_instant(now)
                    && self.last_triggered_year != Some(now.year())
                {
                    self.last_triggered_year = Some(now.year());
                    self.enter(Phase::Updating, now)
                } else {
                    None
                }
            }
            Phase::Updating => {
                if Self::elapsed_ms(self.phase_entered_at, now) >= UPDATING_DELAY_MS {
                    self.enter(Phase::CooldownDisplay, now)
                } else {
                    None
                }
            }
            Phase::CooldownDisplay => {
                if Self::elapsed_ms(self.phase_entered_at, now) >= COOLDOWN_DELAY_MS {
                    self.enter(Phase::Idle, now)
                } else {
                    None
                }
            }
        }
    }

    /// One-line human-readable status for logging.
    #[must_use]
    pub fn status(&self) -> String {
        match self.phase {
            Phase::Idle => "System Status: ONLINE | All devices operational".to_string(),
            Phase::Updating => {
                "System Status: UPDATING | Annual maintenance in progress...".to_string()
            }
            Phase::CooldownDisplay => {
                "System Status: UPDATE COMPLETE | All devices turned OFF".to_string()
            }
        }
    }

    fn enter(&mut self, phase: Phase, now: Timestamp) -> Option<Phase> {
        self.phase = phase;
        self.phase_entered_at = Some(now);
        Some(phase)
    }

    // Exact-second match, faithful to the reference behavior: if the poll
    // loop ever skips the matching second the update misses that year.
    fn is_trigger_instant(now: NaiveDateTime) -> bool {
        now.month() == 1
            && now.day() == 1
            && now.hour() == 1
            && now.minute() == 0
            && now.second() == 0
    }

    fn elapsed_ms(entered_at: Option<Timestamp>, now: Timestamp) -> i64 {
        entered_at.map_or(0, |entered| {
            now.signed_duration_since(entered).num_milliseconds()
        })
    }
}
