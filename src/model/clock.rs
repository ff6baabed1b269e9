// File: ./src/model/clock.rs
use chrono::{Local, NaiveDate, NaiveDateTime};

/// Source of "now" for every date-relative decision (today, besok, reminders).
///
/// Handlers never call `Local::now()` directly so a conversation can be replayed
/// against a fixed instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(NaiveDateTime),
}

impl Clock {
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::System => Local::now().naive_local(),
            Clock::Fixed(dt) => *dt,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }
}
