//! # homedeck-domain
//!
//! Pure domain model for the homedeck appliance control panel.
//!
//! ## Responsibilities
//! - Define the three **appliances** as small state machines:
//!   [`Light`](light::Light) (on/off), [`Fan`](fan::Fan) (three speed
//!   levels), [`AirConditioner`](air_conditioner::AirConditioner)
//!   (power + temperature convergence)
//! - Define the shared [`Device`](device::Device) capability trait and the
//!   [`Snapshot`](device::Snapshot) emitted after every mutation
//! - Define the [`UpdateScheduler`](scheduler::UpdateScheduler) — the annual
//!   system-update phase machine
//! - Define [`Event`](event::Event)s (state-change and phase-change records)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! Time is injected: the scheduler receives wall-clock readings per call and
//! never reads the system clock itself.

pub mod air_conditioner;
pub mod device;
pub mod error;
pub mod event;
pub mod fan;
pub mod light;
pub mod scheduler;
pub mod time;
