use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Local, Utc};
use mockable::Clock;

/// Deterministic clock that advances by a fixed step on every read.
///
/// Useful wherever the real wall clock would make results depend on timing,
/// e.g. checking that `updated_at` strictly increases between two mutations.
#[derive(Debug)]
pub struct StepClock {
    next: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl StepClock {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next: Mutex::new(start),
            step,
        }
    }

    /// The value the next read will return, without advancing.
    pub fn peek(&self) -> DateTime<Utc> {
        *self.next.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().unwrap_or_else(PoisonError::into_inner);
        let now = *next;
        *next = now + self.step;
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_step_clock_advances() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let clock = StepClock::new(start, Duration::seconds(1));
        assert_eq!(clock.utc(), start);
        assert_eq!(clock.peek(), start + Duration::seconds(1));
        assert!(clock.utc() > start);
    }
}
