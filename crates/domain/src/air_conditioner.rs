//! Air conditioner — power switch plus automatic temperature convergence.
//!
//! While powered on, a periodic tick nudges the current temperature one
//! degree toward the target. The tick is a no-op while the unit is off, so a
//! tick already in flight when power is cut can never mutate a powered-down
//! unit.

use crate::device::{Device, DeviceId, Snapshot};
use crate::error::ValidationError;

/// Lowest accepted target temperature (°C).
pub const MIN_TEMP: i32 = 16;
/// Highest accepted target temperature (°C).
pub const MAX_TEMP: i32 = 30;
/// Target and current temperature at startup (°C).
pub const DEFAULT_TEMP: i32 = 21;

/// Direction of a convergence step.
///
/// The labels are domain flavor ("heating" toward a warmer target), not
/// thermodynamic truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    Heating,
    Cooling,
}

/// An air-conditioning unit with a target temperature and a slowly
/// converging current temperature.
#[derive(Debug)]
pub struct AirConditioner {
    on: bool,
    target_c: i32,
    current_c: i32,
}

impl Default for AirConditioner {
    fn default() -> Self {
        Self {
            on: false,
            target_c: DEFAULT_TEMP,
            current_c: DEFAULT_TEMP,
        }
    }
}

impl AirConditioner {
    /// Set the target temperature. Never touches the current temperature.
    ///
    /// Returns whether the target actually changed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TemperatureOutOfRange`] outside
    /// [`MIN_TEMP`]..=[`MAX_TEMP`]; state is left untouched.
    pub fn set_target(&mut self, temperature: i32) -> Result<bool, ValidationError> {
        if !(MIN_TEMP..=MAX_TEMP).contains(&temperature) {
            return Err(ValidationError::TemperatureOutOfRange { temperature });
        }
        if temperature == self.target_c {
            return Ok(false);
        }
        self.target_c = temperature;
        Ok(true)
    }

    /// Flip the power state. Always changes state.
    ///
    /// The caller owns the convergence driver: it must start ticking on the
    /// transition to on and stop ticking on the transition to off.
    pub fn toggle_power(&mut self) -> bool {
        self.on = !self.on;
        true
    }

    /// Advance one convergence step: move the current temperature one degree
    /// toward the target.
    ///
    /// Returns `None` while the unit is off or already at target.
    pub fn advance(&mut self) -> Option<Convergence> {
        if !self.on {
            return None;
        }
        match self.current_c.cmp(&self.target_c) {
            std::cmp::Ordering::Less => {
                self.current_c += 1;
                Some(Convergence::Heating)
            }
            std::cmp::Ordering::Greater => {
                self.current_c -= 1;
                Some(Convergence::Cooling)
            }
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The configured target temperature (°C).
    #[must_use]
    pub fn target_c(&self) -> i32 {
        self.target_c
    }

    /// The simulated current temperature (°C).
    #[must_use]
    pub fn current_c(&self) -> i32 {
        self.current_c
    }
}

impl Device for AirConditioner {
    fn id(&self) -> DeviceId {
        DeviceId::AirConditioner
    }

    fn is_on(&self) -> bool {
        self.on
    }

    fn turn_off(&mut self) -> bool {
        if self.on {
            self.on = false;
            true
        } else {
            false
        }
    }

    fn status(&self) -> String {
        format!(
            "AC: {} | Current: {}°C | Target: {}°C",
            if self.on { "AUTO" } else { "OFF" },
            self.current_c,
            self.target_c
        )
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::AirConditioner {
            on: self.on,
            target_c: self.target_c,
            current_c: self.current_c,
        }
    }
}
