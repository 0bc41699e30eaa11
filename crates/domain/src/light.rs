//! Light — a plain on/off appliance.

use crate::device::{Device, DeviceId, Snapshot};

/// A light that can be toggled on and off.
#[derive(Debug, Default)]
pub struct Light {
    on: bool,
}

impl Light {
    /// Flip the light. Always changes state.
    pub fn toggle(&mut self) -> bool {
        self.on = !self.on;
        true
    }
}

impl Device for Light {
    fn id(&self) -> DeviceId {
        DeviceId::Light
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
        format!("Light: {}", if self.on { "ON" } else { "OFF" })
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::Light { on: self.on }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_off() {
        let light = Light::default();
        assert!(!light.is_on());
        assert_eq!(light.status(), "Light: OFF");
    }

    #[test]
    fn should_toggle_from_off_to_on() {
        let mut light = Light::default();
        assert!(light.toggle());
        assert!(light.is_on());
        assert_eq!(light.status(), "Light: ON");
    }

    #[test]
    fn should_toggle_back_to_off() {
        let mut light = Light::default();
        light.toggle();
        light.toggle();
        assert!(!light.is_on());
        assert_eq!(light.status(), "Light: OFF");
    }

    #[test]
    fn should_force_off_when_on() {
        let mut light = Light::default();
        light.toggle();
        assert!(light.turn_off());
        assert!(!light.is_on());
    }

    #[test]
    fn should_report_no_change_when_forcing_off_twice() {
        let mut light = Light::default();
        light.toggle();
        assert!(light.turn_off());
        assert!(!light.turn_off());
        assert!(!light.is_on());
    }

    #[test]
    fn should_snapshot_current_state() {
        let mut light = Light::default();
        assert_eq!(light.snapshot(), Snapshot::Light { on: false });
        light.toggle();
        assert_eq!(light.snapshot(), Snapshot::Light { on: true });
    }
}
