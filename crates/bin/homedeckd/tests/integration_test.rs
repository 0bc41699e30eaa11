//! End-to-end tests for the full panel stack.
//!
//! Each test wires the real event bus and the real runtime (command loop,
//! tick driver, scheduler poll loop) and observes the bus like a
//! presentation adapter would. Time is tokio test-time, never the wall
//! clock; the scheduler sees a scripted clock that advances one second per
//! poll.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;

use homedeck_app::event_bus::InProcessEventBus;
use homedeck_app::panel::Command;
use homedeck_app::ports::WallClock;
use homedeck_app::runtime;
use homedeck_domain::device::{DeviceId, Snapshot};
use homedeck_domain::event::Event;
use homedeck_domain::scheduler::Phase;
use homedeck_domain::time::Timestamp;

/// A clock that hands out `start`, `start + 1s`, `start + 2s`, … one reading
/// per call, mirroring the 1 s poll cadence.
struct ScriptedClock {
    start: Timestamp,
    calls: AtomicI64,
}

impl ScriptedClock {
    fn starting_at(start: Timestamp) -> Self {
        Self {
            start,
            calls: AtomicI64::new(0),
        }
    }

    /// Two seconds before the annual trigger instant.
    fn before_trigger() -> Self {
        Self::starting_at(
            NaiveDate::from_ymd_opt(2026, 1, 1)
                .unwrap()
                .and_hms_opt(0, 59, 58)
                .unwrap(),
        )
    }

    /// The middle of the year: no poll will ever match the trigger.
    fn off_season() -> Self {
        Self::starting_at(
            NaiveDate::from_ymd_opt(2026, 6, 15)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }
}

impl WallClock for ScriptedClock {
    fn now(&self) -> Timestamp {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.start + chrono::TimeDelta::seconds(call)
    }
}

struct Stack {
    bus: Arc<InProcessEventBus>,
    rx: tokio::sync::broadcast::Receiver<Event>,
    handle: runtime::PanelHandle,
    shutdown: CancellationToken,
    tasks: Vec<tokio::task::JoinHandle<()>>,
}

fn start(clock: ScriptedClock) -> Stack {
    let bus = Arc::new(InProcessEventBus::new(256));
    let rx = bus.subscribe();
    let shutdown = CancellationToken::new();
    let (handle, tasks) = runtime::spawn(Arc::clone(&bus), clock, shutdown.clone());
    Stack {
        bus,
        rx,
        handle,
        shutdown,
        tasks,
    }
}

impl Stack {
    async fn stop_and_collect(mut self) -> Vec<Event> {
        self.shutdown.cancel();
        for task in self.tasks {
            task.await.unwrap();
        }
        drop(self.bus);

        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}

#[tokio::test(start_paused = true)]
async fn should_publish_snapshots_for_user_commands() {
    let stack = start(ScriptedClock::off_season());

    assert!(stack.handle.send(Command::ToggleLight).await);
    assert!(stack.handle.send(Command::SetFanSpeed(2)).await);
    assert!(stack.handle.send(Command::SetAcTarget(25)).await);
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let events = stack.stop_and_collect().await;
    let snapshots: Vec<Snapshot> = events
        .into_iter()
        .filter_map(|event| match event {
            Event::StateChanged { snapshot, .. } => Some(snapshot),
            Event::PhaseChanged { .. } => None,
        })
        .collect();

    assert_eq!(
        snapshots,
        vec![
            Snapshot::Light { on: true },
            Snapshot::Fan { speed: 2 },
            Snapshot::AirConditioner {
                on: false,
                target_c: 25,
                current_c: 21,
            },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn should_converge_ac_to_target_through_real_tick_driver() {
    let stack = start(ScriptedClock::off_season());

    assert!(stack.handle.send(Command::SetAcTarget(25)).await);
    assert!(stack.handle.send(Command::ToggleAcPower).await);

    // Four tick periods: 21 -> 22 -> 23 -> 24 -> 25.
    tokio::time::sleep(runtime::TICK_INTERVAL * 4 + std::time::Duration::from_millis(100)).await;

    let events = stack.stop_and_collect().await;
    let last_ac = events
        .into_iter()
        .filter_map(|event| match event {
            Event::StateChanged {
                device: DeviceId::AirConditioner,
                snapshot,
            } => Some(snapshot),
            _ => None,
        })
        .next_back();

    assert_eq!(
        last_ac,
        Some(Snapshot::AirConditioner {
            on: true,
            target_c: 25,
            current_c: 25,
        })
    );
}

#[tokio::test(start_paused = true)]
async fn should_run_annual_update_sequence_end_to_end() {
    let stack = start(ScriptedClock::before_trigger());

    assert!(stack.handle.send(Command::ToggleLight).await);
    assert!(stack.handle.send(Command::SetFanSpeed(2)).await);

    // Enough polls to reach the trigger, the 2 s updating dwell and the
    // 5 s cooldown dwell.
    tokio::time::sleep(runtime::POLL_INTERVAL * 12).await;

    let events = stack.stop_and_collect().await;

    let phases: Vec<Phase> = events
        .iter()
        .filter_map(|event| match event {
            Event::PhaseChanged { phase } => Some(*phase),
            Event::StateChanged { .. } => None,
        })
        .collect();
    assert_eq!(
        phases,
        vec![Phase::Updating, Phase::CooldownDisplay, Phase::Idle]
    );

    // The update forced both running devices off, after their user-driven
    // turn-on snapshots.
    let light_states: Vec<Snapshot> = events
        .iter()
        .filter_map(|event| match event {
            Event::StateChanged {
                device: DeviceId::Light,
                snapshot,
            } => Some(*snapshot),
            _ => None,
        })
        .collect();
    assert_eq!(
        light_states,
        vec![Snapshot::Light { on: true }, Snapshot::Light { on: false }]
    );

    let fan_states: Vec<Snapshot> = events
        .iter()
        .filter_map(|event| match event {
            Event::StateChanged {
                device: DeviceId::Fan,
                snapshot,
            } => Some(*snapshot),
            _ => None,
        })
        .collect();
    assert_eq!(
        fan_states,
        vec![Snapshot::Fan { speed: 2 }, Snapshot::Fan { speed: 0 }]
    );
}

#[tokio::test(start_paused = true)]
async fn should_not_fire_update_twice_within_a_year() {
    // The scripted clock walks straight through the trigger second and the
    // rest of the sequence; afterwards every reading is still January 1st
    // of the same year, so nothing may refire.
    let stack = start(ScriptedClock::before_trigger());

    tokio::time::sleep(runtime::POLL_INTERVAL * 30).await;

    let events = stack.stop_and_collect().await;
    let update_count = events
        .iter()
        .filter(|event| matches!(event, Event::PhaseChanged { phase: Phase::Updating }))
        .count();
    assert_eq!(update_count, 1);
}

#[tokio::test(start_paused = true)]
async fn should_cancel_all_timers_on_shutdown() {
    let stack = start(ScriptedClock::off_season());
    assert!(stack.handle.send(Command::ToggleAcPower).await);
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let handle = stack.handle.clone();
    let events = stack.stop_and_collect().await;
    assert!(!events.is_empty());

    // The command loop is gone: sends fail instead of hanging.
    assert!(!handle.send(Command::Report).await);
}
