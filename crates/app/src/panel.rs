//! Panel — the single owner of all device and scheduler state.
//!
//! Every mutation arrives as a [`Command`] and is handled to completion
//! before the next one is looked at, so user intents, simulation ticks and
//! scheduler polls never interleave. Out-of-range commands are rejected
//! without state change and logged at `warn` — observable behavior is
//! silent rejection, uniformly for every device.

use tracing::{debug, info, warn};

use homedeck_domain::air_conditioner::{AirConditioner, Convergence};
use homedeck_domain::device::Device;
use homedeck_domain::event::Event;
use homedeck_domain::fan::Fan;
use homedeck_domain::light::Light;
use homedeck_domain::scheduler::{Phase, UpdateScheduler};
use homedeck_domain::time::Timestamp;

use crate::ports::EventSink;

/// A mutation request for the panel: user intents plus the two timer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Flip the light.
    ToggleLight,
    /// Select a fan speed (0..=2).
    SetFanSpeed(u8),
    /// Set the air-conditioner target temperature (16..=30 °C).
    SetAcTarget(i32),
    /// Flip the air-conditioner power state.
    ToggleAcPower,
    /// One convergence step of the simulation clock.
    Tick,
    /// One scheduler poll with the wall-clock reading taken by the poller.
    Poll(Timestamp),
    /// Log a one-line status for every device and the scheduler.
    Report,
}

/// Follow-up the runtime must perform after handling a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverAction {
    /// The air conditioner was powered on: start a fresh convergence driver.
    StartTicking,
    /// The air conditioner was powered off: cancel the convergence driver.
    StopTicking,
}

/// The appliance panel: three devices, the update scheduler, and the sink
/// that observers subscribe to.
pub struct Panel<S> {
    light: Light,
    fan: Fan,
    ac: AirConditioner,
    scheduler: UpdateScheduler,
    sink: S,
}

impl<S: EventSink> Panel<S> {
    /// Create a panel with all devices in their startup state
    /// (light off, fan at speed 0, air conditioner off at 21 °C).
    pub fn new(sink: S) -> Self {
        Self {
            light: Light::default(),
            fan: Fan::default(),
            ac: AirConditioner::default(),
            scheduler: UpdateScheduler::default(),
            sink,
        }
    }

    /// Handle one command to completion.
    ///
    /// Returns the driver follow-up when the air-conditioner power state
    /// changed; the runtime starts or cancels the tick driver before
    /// dispatching the next command.
    pub fn handle(&mut self, command: Command) -> Option<DriverAction> {
        match command {
            Command::ToggleLight => {
                self.light.toggle();
                info!("{}", self.light.status());
                self.publish_state(Self::state_event(&self.light));
                None
            }
            Command::SetFanSpeed(level) => {
                match self.fan.set_speed(level) {
                    Ok(true) => {
                        info!("Fan speed set to: {}", self.fan.speed());
                        self.publish_state(Self::state_event(&self.fan));
                    }
                    Ok(false) => {}
                    Err(err) => warn!(%err, "fan command rejected"),
                }
                None
            }
            Command::SetAcTarget(temperature) => {
                match self.ac.set_target(temperature) {
                    Ok(true) => {
                        info!("AC target temperature set to: {temperature}°C");
                        self.publish_state(Self::state_event(&self.ac));
                    }
                    Ok(false) => {}
                    Err(err) => warn!(%err, "air-conditioner command rejected"),
                }
                None
            }
            Command::ToggleAcPower => {
                self.ac.toggle_power();
                info!("AC turned {}", if self.ac.is_on() { "ON" } else { "OFF" });
                self.publish_state(Self::state_event(&self.ac));
                if self.ac.is_on() {
                    Some(DriverAction::StartTicking)
                } else {
                    Some(DriverAction::StopTicking)
                }
            }
            Command::Tick => {
                if let Some(direction) = self.ac.advance() {
                    match direction {
                        Convergence::Heating => debug!("AC heating: {}°C", self.ac.current_c()),
                        Convergence::Cooling => debug!("AC cooling: {}°C", self.ac.current_c()),
                    }
                    self.publish_state(Self::state_event(&self.ac));
                }
                None
            }
            Command::Poll(now) => self.poll(now),
            Command::Report => {
                info!("{}", self.light.status());
                info!("{}", self.fan.status());
                info!("{}", self.ac.status());
                info!("{}", self.scheduler.status());
                None
            }
        }
    }

    fn poll(&mut self, now: Timestamp) -> Option<DriverAction> {
        let phase = self.scheduler.check_now(now)?;

        let mut action = None;
        if phase == Phase::Updating {
            info!("--- ANNUAL SYSTEM UPDATE INITIATED ---");
            action = self.force_all_off();
            info!("All devices turned OFF for system update");
        }

        info!("{}", self.scheduler.status());
        self.sink.publish(Event::PhaseChanged { phase });
        action
    }

    // Broadcast of independent turn_off calls, not a transaction. Each
    // device that actually changed emits its own snapshot.
    fn force_all_off(&mut self) -> Option<DriverAction> {
        let ac_was_on = self.ac.is_on();

        let mut events = Vec::new();
        let devices: [&mut dyn Device; 3] = [&mut self.light, &mut self.fan, &mut self.ac];
        for device in devices {
            if device.turn_off() {
                events.push(Self::state_event(&*device));
            }
        }
        for event in events {
            self.publish_state(event);
        }

        ac_was_on.then_some(DriverAction::StopTicking)
    }

    fn state_event(device: &dyn Device) -> Event {
        Event::StateChanged {
            device: device.id(),
            snapshot: device.snapshot(),
        }
    }

    fn publish_state(&self, event: Event) {
        self.sink.publish(event);
    }
}
