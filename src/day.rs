use std::fmt;
use thiserror::Error;

/// Number of doors on the calendar
pub(crate) const DAY_QTY: usize = 24;

/// One of the numbered doors of the calendar, 1 through 24.  Door `n` belongs
/// to the `n`th of December.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Day(u8);

impl Day {
    pub(crate) const FIRST: Day = Day(1);

    pub(crate) const LAST: Day = Day(24);

    pub(crate) const fn new(n: u8) -> Option<Day> {
        if matches!(n, 1..=24) {
            Some(Day(n))
        } else {
            None
        }
    }

    pub(crate) const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position of the door, for indexing per-day arrays
    pub(crate) fn index0(self) -> usize {
        usize::from(self.0 - 1)
    }

    pub(crate) fn all() -> impl Iterator<Item = Day> {
        (1..=24).map(Day)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Day {
    type Error = DayRangeError;

    fn try_from(n: u8) -> Result<Day, DayRangeError> {
        Day::new(n).ok_or(DayRangeError(n))
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("{0} is not a day of the calendar; expected 1 through 24")]
pub(crate) struct DayRangeError(pub(crate) u8);
