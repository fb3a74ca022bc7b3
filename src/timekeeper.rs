//! Time source for the application
//!
//! Everything that depends on "now" (future-timestamp checks, budget
//! windows, event reminders) asks the `Timekeeper`, so tests can pin the
//! clock with a `FixedClock`.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

use crate::models::Event;
use crate::store::DomainStore;

/// Source of the current local date and time
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// The local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to
///
/// Clones share the same time, so a test can keep one handle and advance
/// the clock the model is using.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Rc<Cell<NaiveDateTime>>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

pub struct Timekeeper {
    clock: Box<dyn Clock>,
}

impl Timekeeper {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
        }
    }

    /// Timekeeper backed by the local wall clock
    pub fn system() -> Self {
        Self::new(SystemClock)
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }

    pub fn is_future(&self, timestamp: NaiveDateTime) -> bool {
        timestamp > self.now()
    }

    /// Events due at or before now, in store order
    pub fn transpired_events<'a>(&self, store: &'a DomainStore) -> Vec<&'a Event> {
        let now = self.now();
        store.filtered_events(|e| e.is_due(now))
    }

    /// Events due within the next `days` days, soonest first
    pub fn upcoming_events<'a>(&self, store: &'a DomainStore, days: u32) -> Vec<&'a Event> {
        let now = self.now();
        let horizon = now
            .checked_add_signed(Duration::days(i64::from(days)))
            .unwrap_or(NaiveDateTime::MAX);
        let mut events = store.filtered_events(|e| !e.is_due(now) && e.timestamp <= horizon);
        events.sort_by_key(|e| e.timestamp);
        events
    }
}

impl Default for Timekeeper {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for Timekeeper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timekeeper")
            .field("now", &self.now())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn event(desc: &str, when: NaiveDateTime, now: NaiveDateTime) -> Event {
        Event::new(desc, Money::from_cents(1000), Category::Utilities, when, now).unwrap()
    }

    #[test]
    fn test_fixed_clock_shared_between_clones() {
        let clock = FixedClock::new(at(1, 9));
        let timekeeper = Timekeeper::new(clock.clone());
        assert_eq!(timekeeper.now(), at(1, 9));

        clock.advance(Duration::hours(3));
        assert_eq!(timekeeper.now(), at(1, 12));
        assert!(timekeeper.is_future(at(1, 13)));
        assert!(!timekeeper.is_future(at(1, 12)));
    }

    #[test]
    fn test_transpired_and_upcoming_events() {
        let clock = FixedClock::new(at(1, 9));
        let timekeeper = Timekeeper::new(clock.clone());
        let mut store = DomainStore::new();
        store.add_event(event("Rent", at(3, 9), at(1, 9))).unwrap();
        store.add_event(event("Water", at(2, 9), at(1, 9))).unwrap();
        store.add_event(event("Insurance", at(20, 9), at(1, 9))).unwrap();

        assert!(timekeeper.transpired_events(&store).is_empty());
        let upcoming = timekeeper.upcoming_events(&store, 7);
        let names: Vec<_> = upcoming.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(names, vec!["Water", "Rent"]);

        clock.set(at(3, 9));
        let due: Vec<_> = timekeeper
            .transpired_events(&store)
            .into_iter()
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(due, vec!["Rent", "Water"]);
    }

    #[test]
    fn test_upcoming_horizon_saturates() {
        let timekeeper = Timekeeper::new(FixedClock::new(at(1, 9)));
        let mut store = DomainStore::new();
        let far = NaiveDate::from_ymd_opt(2200, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        store.add_event(event("Bond", far, at(1, 9))).unwrap();

        assert_eq!(timekeeper.upcoming_events(&store, u32::MAX).len(), 1);
    }
}
