//! Fan — a three-level appliance: off, low, high.

use crate::device::{Device, DeviceId, Snapshot};
use crate::error::ValidationError;

/// Discrete fan speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FanSpeed {
    #[default]
    Off,
    Low,
    High,
}

impl FanSpeed {
    /// Parse a numeric level. Only 0, 1 and 2 are valid.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::FanSpeedOutOfRange`] for any other level.
    pub fn from_level(level: u8) -> Result<Self, ValidationError> {
        match level {
            0 => Ok(Self::Off),
            1 => Ok(Self::Low),
            2 => Ok(Self::High),
            _ => Err(ValidationError::FanSpeedOutOfRange { level }),
        }
    }

    /// The numeric level (0..=2).
    #[must_use]
    pub fn level(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Low => 1,
            Self::High => 2,
        }
    }
}

impl std::fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => f.write_str("OFF"),
            Self::Low => f.write_str("LOW"),
            Self::High => f.write_str("HIGH"),
        }
    }
}

/// A fan with three speed settings. Any speed may be selected directly from
/// any other; the fan counts as "on" whenever the speed is non-zero.
#[derive(Debug, Default)]
pub struct Fan {
    speed: FanSpeed,
}

impl Fan {
    /// Select a speed by numeric level.
    ///
    /// Returns whether the speed actually changed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::FanSpeedOutOfRange`] for levels outside
    /// 0..=2; the current speed is left untouched.
    pub fn set_speed(&mut self, level: u8) -> Result<bool, ValidationError> {
        let speed = FanSpeed::from_level(level)?;
        if speed == self.speed {
            return Ok(false);
        }
        self.speed = speed;
        Ok(true)
    }

    /// The current speed.
    #[must_use]
    pub fn speed(&self) -> FanSpeed {
        self.speed
    }
}

impl Device for Fan {
    fn id(&self) -> DeviceId {
        DeviceId::Fan
    }

    fn is_on(&self) -> bool {
        self.speed != FanSpeed::Off
    }

    fn turn_off(&mut self) -> bool {
        if self.speed == FanSpeed::Off {
            return false;
        }
        self.speed = FanSpeed::Off;
        true
    }

    fn status(&self) -> String {
        format!("Fan: {} (Speed {})", self.speed, self.speed.level())
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::Fan {
            speed: self.speed.level(),
        }
    }
}
