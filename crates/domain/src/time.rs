//! Time and timestamp helpers.
//!
//! The annual update trigger is defined against *local* wall-clock time
//! (Jan 1, 01:00:00), so domain timestamps are naive local readings rather
//! than UTC instants.

use chrono::NaiveDateTime;

/// Local wall-clock reading used by the update scheduler.
pub type Timestamp = NaiveDateTime;

/// Return the current local wall-clock time.
#[must_use]
pub fn now() -> Timestamp {
    chrono::Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_local_time() {
        let before = chrono::Local::now().naive_local();
        let ts = now();
        let after = chrono::Local::now().naive_local();
        assert!(ts >= before);
        assert!(ts <= after);
    }
}
