use crate::clock::{is_unlockable, Clock};
use crate::day::{Day, DAY_QTY};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};
use time::Date;
use tracing::debug;

/// How long a rejected door shakes for
pub(crate) const SHAKE_DURATION: Duration = Duration::from_millis(500);

/// State of a door, derived from the controller's state and today's date
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum DayState {
    Locked,
    Unlocked,
    Opened,
}

/// What became of a click on a door
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum ClickOutcome {
    /// The door had been opened before and was shown again
    Reopened,
    /// The door was opened for the first time
    Opened,
    /// The door is still locked and shakes instead
    Rejected,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Shake {
    day: Day,
    started: Instant,
}

impl Shake {
    fn is_over(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= SHAKE_DURATION
    }

    /// Horizontal displacement at `now`: left, right, left, then back to
    /// rest, in eighths of the shake
    fn offset(&self, now: Instant) -> i16 {
        let elapsed = now.saturating_duration_since(self.started).as_millis();
        match elapsed * 8 / SHAKE_DURATION.as_millis() {
            1 | 2 | 5 | 6 => -1,
            3 | 4 => 1,
            _ => 0,
        }
    }
}

/// Per-door flags handed to the grid for rendering
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DayFlags {
    pub(crate) state: DayState,
    pub(crate) shake_offset: Option<i16>,
}

impl DayFlags {
    pub(crate) fn is_open(&self) -> bool {
        self.state == DayState::Opened
    }

    pub(crate) fn is_locked(&self) -> bool {
        self.state == DayState::Locked
    }

    pub(crate) fn is_shaking(&self) -> bool {
        self.shake_offset.is_some()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DayFlagTable([DayFlags; DAY_QTY]);

impl DayFlagTable {
    pub(crate) fn get(&self, day: Day) -> DayFlags {
        self.0[day.index0()]
    }
}

/// Owner of all of the calendar's mutable state and of the rule deciding
/// which doors may be opened
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CalendarController<C> {
    clock: C,
    open_days: BTreeSet<Day>,
    selected_day: Option<Day>,
    shake: Option<Shake>,
    test_mode: bool,
}

impl<C: Clock> CalendarController<C> {
    pub(crate) fn new(clock: C) -> CalendarController<C> {
        CalendarController {
            clock,
            open_days: BTreeSet::new(),
            selected_day: None,
            shake: None,
            test_mode: false,
        }
    }

    pub(crate) fn today(&self) -> Date {
        self.clock.today()
    }

    pub(crate) fn handle_day_click(&mut self, day: Day, now: Instant) -> ClickOutcome {
        if self.open_days.contains(&day) {
            debug!(%day, "reopening door");
            self.selected_day = Some(day);
            return ClickOutcome::Reopened;
        }
        if !self.test_mode {
            let today = self.today();
            if !is_unlockable(day, today) {
                debug!(%day, %today, "door is still locked");
                self.shake = Some(Shake { day, started: now });
                return ClickOutcome::Rejected;
            }
        }
        debug!(%day, test_mode = self.test_mode, "opening door");
        self.open_days.insert(day);
        self.selected_day = Some(day);
        ClickOutcome::Opened
    }

    /// Ends the shake once it has run its course.  Returns `true` if anything
    /// changed.
    pub(crate) fn tick(&mut self, now: Instant) -> bool {
        if self.shake.is_some_and(|s| s.is_over(now)) {
            self.shake = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn is_animating(&self) -> bool {
        self.shake.is_some()
    }

    pub(crate) fn shaking_day(&self) -> Option<Day> {
        self.shake.map(|s| s.day)
    }

    pub(crate) fn selected_day(&self) -> Option<Day> {
        self.selected_day
    }

    pub(crate) fn is_open(&self, day: Day) -> bool {
        self.open_days.contains(&day)
    }

    pub(crate) fn open_days(&self) -> impl Iterator<Item = Day> + '_ {
        self.open_days.iter().copied()
    }

    pub(crate) fn close_dialog(&mut self) {
        if let Some(day) = self.selected_day.take() {
            debug!(%day, "closing door");
        }
    }

    pub(crate) fn test_mode(&self) -> bool {
        self.test_mode
    }

    pub(crate) fn set_test_mode(&mut self, enabled: bool) {
        debug!(enabled, "setting test mode");
        self.test_mode = enabled;
    }

    pub(crate) fn toggle_test_mode(&mut self) {
        self.set_test_mode(!self.test_mode);
    }

    pub(crate) fn day_state(&self, day: Day) -> DayState {
        self.day_state_on(day, self.today())
    }

    fn day_state_on(&self, day: Day, today: Date) -> DayState {
        if self.is_open(day) {
            DayState::Opened
        } else if self.test_mode || is_unlockable(day, today) {
            DayState::Unlocked
        } else {
            DayState::Locked
        }
    }

    pub(crate) fn day_flags(&self, now: Instant) -> DayFlagTable {
        let today = self.today();
        let mut flags = [DayFlags {
            state: DayState::Locked,
            shake_offset: None,
        }; DAY_QTY];
        for day in Day::all() {
            flags[day.index0()] = DayFlags {
                state: self.day_state_on(day, today),
                shake_offset: self
                    .shake
                    .filter(|s| s.day == day)
                    .map(|s| s.offset(now)),
            };
        }
        DayFlagTable(flags)
    }
}
