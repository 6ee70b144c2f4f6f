use crate::day::Day;
use time::{error::IndeterminateOffset, Date, Month, OffsetDateTime, UtcOffset};

/// Source of "today" for the unlock rule
pub(crate) trait Clock {
    fn today(&self) -> Date;
}

/// The local wall clock.  The UTC offset is determined once at startup, as
/// querying it later from a multithreaded process is unreliable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SystemClock(UtcOffset);

impl SystemClock {
    pub(crate) fn new(offset: UtcOffset) -> SystemClock {
        SystemClock(offset)
    }
}

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(self.0).date()
    }
}

/// A clock stuck on a single date
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FixedClock(pub(crate) Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}

/// The clock for a run of the program: either a date given on the command
/// line or the local wall clock
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum RunClock {
    Fixed(FixedClock),
    System(SystemClock),
}

impl RunClock {
    /// `local_offset` is only called when no date is given, so that a pinned
    /// date works on hosts whose time zone cannot be determined.
    pub(crate) fn new<F>(
        date: Option<Date>,
        local_offset: F,
    ) -> Result<RunClock, IndeterminateOffset>
    where
        F: FnOnce() -> Result<UtcOffset, IndeterminateOffset>,
    {
        match date {
            Some(date) => Ok(RunClock::Fixed(FixedClock(date))),
            None => local_offset().map(|offset| RunClock::System(SystemClock::new(offset))),
        }
    }
}

impl Clock for RunClock {
    fn today(&self) -> Date {
        match self {
            RunClock::Fixed(clock) => clock.today(),
            RunClock::System(clock) => clock.today(),
        }
    }
}

/// Returns whether `day`'s door may be opened on `today`: the date must be in
/// December, on or after the door's day.  The year is deliberately not
/// consulted.
pub(crate) fn is_unlockable(day: Day, today: Date) -> bool {
    today.month() == Month::December && day.get() <= today.day()
}
