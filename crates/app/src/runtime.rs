//! Runtime — tasks and timers around the panel command loop.
//!
//! One task owns the [`Panel`] and drains an mpsc command channel; that is
//! the only place device or scheduler state mutates. Two periodic producers
//! feed it: the air-conditioner convergence driver (2 s, alive only while
//! the unit is powered on) and the scheduler poll loop (1 s, always on).
//!
//! Cancellation discipline: powering the air conditioner off cancels the
//! driver token *inside* the command handler, before the next command is
//! dispatched. A tick that was already queued behind the power-off command
//! is handled afterwards but cannot mutate anything — the device ignores
//! ticks while off. Shutdown cancels the runtime token, which stops the
//! poller and the panel task; the panel task cancels any live driver on the
//! way out.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::panel::{Command, DriverAction, Panel};
use crate::ports::{EventSink, WallClock};

/// Cadence of the air-conditioner convergence tick.
pub const TICK_INTERVAL: std::time::Duration = std::time::Duration::from_millis(2_000);
/// Cadence of the scheduler wall-clock poll.
pub const POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(1_000);

/// Depth of the command channel; commands are cheap and drained quickly.
const COMMAND_BUFFER: usize = 32;

/// Clone-able handle for submitting commands to the panel task.
#[derive(Clone)]
pub struct PanelHandle {
    tx: mpsc::Sender<Command>,
}

impl PanelHandle {
    /// Submit a command, waiting for channel capacity if needed.
    ///
    /// Returns `false` when the panel task has already shut down.
    pub async fn send(&self, command: Command) -> bool {
        self.tx.send(command).await.is_ok()
    }
}

/// Spawn the panel task and the scheduler poll loop.
///
/// All spawned tasks stop when `shutdown` is cancelled; await the returned
/// handles to complete cleanup before process exit.
pub fn spawn<S, C>(
    sink: S,
    clock: C,
    shutdown: CancellationToken,
) -> (PanelHandle, Vec<JoinHandle<()>>)
where
    S: EventSink + Send + 'static,
    C: WallClock + Send + 'static,
{
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    let handle = PanelHandle { tx: tx.clone() };

    let panel_task = tokio::spawn(panel_loop(Panel::new(sink), rx, tx, shutdown.clone()));
    let poll_task = tokio::spawn(poll_loop(clock, handle.clone(), shutdown));

    (handle, vec![panel_task, poll_task])
}

async fn panel_loop<S: EventSink>(
    mut panel: Panel<S>,
    mut rx: mpsc::Receiver<Command>,
    tx: mpsc::Sender<Command>,
    shutdown: CancellationToken,
) {
    let mut driver: Option<TickDriver> = None;

    loop {
        let command = tokio::select! {
            () = shutdown.cancelled() => break,
            command = rx.recv() => match command {
                Some(command) => command,
                None => break,
            },
        };

        match panel.handle(command) {
            Some(DriverAction::StartTicking) => {
                // A fresh driver per power cycle; any previous one is
                // cancelled first so two drivers never tick concurrently.
                if let Some(old) = driver.take() {
                    old.stop();
                }
                driver = Some(TickDriver::spawn(tx.clone()));
            }
            Some(DriverAction::StopTicking) => {
                if let Some(old) = driver.take() {
                    old.stop();
                }
            }
            None => {}
        }
    }

    if let Some(old) = driver.take() {
        old.stop();
    }
    info!("panel loop stopped");
}

async fn poll_loop<C: WallClock>(clock: C, handle: PanelHandle, shutdown: CancellationToken) {
    let mut interval = tokio::time::interval(POLL_INTERVAL);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            () = shutdown.cancelled() => break,
            _ = interval.tick() => {
                if !handle.send(Command::Poll(clock.now())).await {
                    break;
                }
            }
        }
    }
    info!("scheduler poll loop stopped");
}

/// The periodic convergence driver for the air conditioner.
struct TickDriver {
    token: CancellationToken,
}

impl TickDriver {
    fn spawn(tx: mpsc::Sender<Command>) -> Self {
        let token = CancellationToken::new();
        let task_token = token.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // The first tick of a tokio interval completes immediately;
            // consume it so the first convergence step lands a full period
            // after power-on, like the reference timer.
            interval.tick().await;

            loop {
                tokio::select! {
                    () = task_token.cancelled() => break,
                    _ = interval.tick() => {
                        if tx.send(Command::Tick).await.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self { token }
    }

    /// Cancel the driver. Takes effect before the next tick fires.
    fn stop(self) {
        self.token.cancel();
    }
}
