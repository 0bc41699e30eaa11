//! # homedeck-adapter-console
//!
//! Console presentation adapter. The panel core neither renders nor reads
//! input; this adapter subscribes to the event bus and logs every snapshot,
//! and turns stdin lines into panel commands.
//!
//! ## Line protocol
//!
//! | input        | command                      |
//! |--------------|------------------------------|
//! | `light`      | toggle the light             |
//! | `fan <0-2>`  | select fan speed             |
//! | `ac <16-30>` | set the AC target (°C)       |
//! | `ac power`   | toggle AC power              |
//! | `status`     | log every device status line |
//! | `quit`       | shut the panel down          |
//!
//! ## Dependency rule
//!
//! Depends on `homedeck-app` (handle, ports) and `homedeck-domain` only.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use homedeck_app::panel::Command;
use homedeck_app::runtime::PanelHandle;
use homedeck_domain::device::Snapshot;
use homedeck_domain::event::Event;

/// Outcome of parsing one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Forward a command to the panel.
    Panel(Command),
    /// Shut the whole panel down.
    Quit,
}

/// Parse one line of the console protocol.
///
/// Returns `None` for blank or unrecognized input. Range checking is left
/// to the devices themselves; `fan 9` parses and is rejected downstream.
#[must_use]
pub fn parse_line(line: &str) -> Option<Input> {
    let mut words = line.split_whitespace();
    match (words.next()?, words.next()) {
        ("light", None) => Some(Input::Panel(Command::ToggleLight)),
        ("fan", Some(level)) => level
            .parse()
            .ok()
            .map(|level| Input::Panel(Command::SetFanSpeed(level))),
        ("ac", Some("power")) => Some(Input::Panel(Command::ToggleAcPower)),
        ("ac", Some(temperature)) => temperature
            .parse()
            .ok()
            .map(|t| Input::Panel(Command::SetAcTarget(t))),
        ("status", None) => Some(Input::Panel(Command::Report)),
        ("quit" | "exit", None) => Some(Input::Quit),
        _ => None,
    }
}

/// Render every bus event as a structured log line until shutdown.
pub async fn run_renderer(mut events: broadcast::Receiver<Event>, shutdown: CancellationToken) {
    loop {
        let event = tokio::select! {
            () = shutdown.cancelled() => break,
            event = events.recv() => match event {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    // Snapshots are full state, so dropped events are
                    // recovered by the next one.
                    warn!(missed, "renderer lagged behind the event bus");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        };
        render(&event);
    }
    info!("console renderer stopped");
}

/// Read stdin lines and forward parsed commands until `quit` or shutdown.
///
/// Cancels `shutdown` itself when the operator asks to quit or stdin
/// closes, so the composition root can simply wait on the token.
pub async fn run_input(handle: PanelHandle, shutdown: CancellationToken) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            () = shutdown.cancelled() => return,
            line = lines.next_line() => match line {
                Ok(Some(line)) => line,
                Ok(None) | Err(_) => break,
            },
        };

        match parse_line(&line) {
            Some(Input::Panel(command)) => {
                if !handle.send(command).await {
                    break;
                }
            }
            Some(Input::Quit) => break,
            None => {
                if !line.trim().is_empty() {
                    info!("unknown input; try: light | fan <0-2> | ac <16-30> | ac power | status | quit");
                }
            }
        }
    }
    shutdown.cancel();
}

fn render(event: &Event) {
    match event {
        Event::StateChanged { snapshot, .. } => match snapshot {
            Snapshot::Light { on } => info!(on, "light"),
            Snapshot::Fan { speed } => info!(speed, "fan"),
            Snapshot::AirConditioner {
                on,
                target_c,
                current_c,
            } => info!(on, target_c, current_c, "air conditioner"),
        },
        Event::PhaseChanged { phase } => info!(%phase, "system phase"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_light_toggle() {
        assert_eq!(parse_line("light"), Some(Input::Panel(Command::ToggleLight)));
    }

    #[test]
    fn should_parse_fan_speed() {
        assert_eq!(
            parse_line("fan 2"),
            Some(Input::Panel(Command::SetFanSpeed(2)))
        );
    }

    #[test]
    fn should_parse_ac_target() {
        assert_eq!(
            parse_line("ac 25"),
            Some(Input::Panel(Command::SetAcTarget(25)))
        );
    }

    #[test]
    fn should_parse_ac_power_toggle() {
        assert_eq!(
            parse_line("ac power"),
            Some(Input::Panel(Command::ToggleAcPower))
        );
    }

    #[test]
    fn should_parse_status_and_quit() {
        assert_eq!(parse_line("status"), Some(Input::Panel(Command::Report)));
        assert_eq!(parse_line("quit"), Some(Input::Quit));
        assert_eq!(parse_line("exit"), Some(Input::Quit));
    }

    #[test]
    fn should_tolerate_extra_whitespace() {
        assert_eq!(
            parse_line("  fan   1  "),
            Some(Input::Panel(Command::SetFanSpeed(1)))
        );
    }

    #[test]
    fn should_reject_unknown_input() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("toaster"), None);
        assert_eq!(parse_line("fan"), None);
        assert_eq!(parse_line("fan two"), None);
        assert_eq!(parse_line("light on"), None);
    }

    #[test]
    fn should_leave_range_checks_to_the_devices() {
        // Parses fine; the fan itself rejects level 9.
        assert_eq!(
            parse_line("fan 9"),
            Some(Input::Panel(Command::SetFanSpeed(9)))
        );
    }
}
