use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of 30-minute slots in a teaching day (7:00 to 18:00)
pub const SLOTS_PER_DAY: usize = 22;

/// First teaching hour of the day
pub const DAY_START_HOUR: usize = 7;

/// Teaching days of the week. No Sunday classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl Weekday {
    pub const ALL: [Weekday; 6] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    pub fn index(self) -> usize {
        match self {
            Weekday::Mon => 0,
            Weekday::Tue => 1,
            Weekday::Wed => 2,
            Weekday::Thu => 3,
            Weekday::Fri => 4,
            Weekday::Sat => 5,
        }
    }

    pub fn from_index(index: usize) -> Option<Weekday> {
        Weekday::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
        }
    }

    pub fn from_label(label: &str) -> Option<Weekday> {
        Weekday::ALL.iter().copied().find(|d| d.label() == label.trim())
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Canonical day pairing for two-meeting subjects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPair {
    MonWed,
    TueThu,
    FriSat,
}

impl DayPair {
    pub const ALL: [DayPair; 3] = [DayPair::MonWed, DayPair::TueThu, DayPair::FriSat];

    /// Day the lecture (or first half-meeting) falls on
    pub fn first(self) -> Weekday {
        match self {
            DayPair::MonWed => Weekday::Mon,
            DayPair::TueThu => Weekday::Tue,
            DayPair::FriSat => Weekday::Fri,
        }
    }

    /// Day the lab (or second half-meeting) falls on
    pub fn second(self) -> Weekday {
        match self {
            DayPair::MonWed => Weekday::Wed,
            DayPair::TueThu => Weekday::Thu,
            DayPair::FriSat => Weekday::Sat,
        }
    }

    /// A pair is usable only when the teacher is available on both days
    pub fn is_available_to(self, days: &[Weekday]) -> bool {
        days.contains(&self.first()) && days.contains(&self.second())
    }
}

/// Label for a 30-minute slot, e.g. slot 0 -> "07:00-07:30"
pub fn slot_label(slot: usize) -> String {
    let start = (DAY_START_HOUR * 60 + slot * 30) as u32;
    let end = start + 30;
    format!(
        "{:02}:{:02}-{:02}:{:02}",
        start / 60,
        start % 60,
        end / 60,
        end % 60
    )
}

/// Recover the slot index from a label produced by [`slot_label`]
pub fn slot_index(label: &str) -> Option<usize> {
    let start = label.split('-').next()?;
    let (hours, minutes) = start.split_once(':')?;
    let hours: usize = hours.parse().ok()?;
    let minutes: usize = minutes.parse().ok()?;
    let offset = (hours * 60 + minutes).checked_sub(DAY_START_HOUR * 60)?;
    if offset % 30 != 0 {
        return None;
    }
    let slot = offset / 30;
    (slot < SLOTS_PER_DAY).then_some(slot)
}

/// Latest admissible start index for an event of the given duration
pub fn latest_start(duration_slots: usize) -> usize {
    SLOTS_PER_DAY.saturating_sub(duration_slots)
}
