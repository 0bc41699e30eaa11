//! Port definitions — traits at the boundary of the application core.
//!
//! Ports are defined here (in `app`) so that both the command loop and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod clock;
pub mod event_sink;

pub use clock::{SystemClock, WallClock};
pub use event_sink::EventSink;
