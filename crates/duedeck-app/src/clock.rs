//! Source of "today" and "now".

use time::{Date, OffsetDateTime};

/// Supplies the current calendar day and instant.
pub trait Clock {
    /// Current calendar day in the user's time zone.
    fn today(&self) -> Date;

    /// Current instant in milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Wall clock. Falls back to UTC when the local offset cannot be determined.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_local()
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
            .date()
    }

    fn now_millis(&self) -> i64 {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
        i64::try_from(nanos / 1_000_000).unwrap_or(i64::MAX)
    }
}

/// Clock frozen at a given day and instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    today: Date,
    now_millis: i64,
}

impl FixedClock {
    /// Clock that always reports `today` and `now_millis`.
    #[must_use]
    pub const fn new(today: Date, now_millis: i64) -> Self {
        Self { today, now_millis }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.today
    }

    fn now_millis(&self) -> i64 {
        self.now_millis
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> Date {
        (**self).today()
    }

    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}
