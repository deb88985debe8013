use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
};

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

/// Weekly time slot used to key the activity histograms.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TimeSlot {
    pub weekday: Weekday,

    /// Hour of the day, `0..24`.
    pub hour: u32,
}

impl TimeSlot {
    pub const fn new(weekday: Weekday, hour: u32) -> Self {
        Self { weekday, hour }
    }

    /// Zero-based weekday index starting from Monday.
    pub fn weekday_index(self) -> u32 {
        self.weekday.num_days_from_monday()
    }
}

impl From<NaiveDateTime> for TimeSlot {
    fn from(timestamp: NaiveDateTime) -> Self {
        Self::new(timestamp.weekday(), timestamp.hour())
    }
}

impl Ord for TimeSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.weekday_index(), self.hour).cmp(&(other.weekday_index(), other.hour))
    }
}

impl PartialOrd for TimeSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:02}:00", self.weekday, self.hour)
    }
}
