//! # homedeck-app
//!
//! Application layer — the panel command loop and **port definitions**.
//!
//! ## Responsibilities
//! - Define **port traits** that adapters and the composition root use:
//!   - [`ports::EventSink`] — publish panel events to subscribers
//!   - [`ports::WallClock`] — supply wall-clock readings to the poll loop
//! - Own the [`panel::Panel`] — the single owner of all device and
//!   scheduler state. Every mutation (user command, simulation tick,
//!   scheduler poll) is a [`panel::Command`] processed to completion on one
//!   task, so no two mutations ever interleave.
//! - Drive the two periodic timers: the 2 s air-conditioner convergence
//!   tick (started on power-on, cancelled on power-off) and the 1 s
//!   scheduler poll.
//! - Provide **in-process infrastructure** (broadcast event bus).
//!
//! ## Dependency rule
//! Depends on `homedeck-domain` only (plus `tokio` for channels and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod event_bus;
pub mod panel;
pub mod ports;
pub mod runtime;
