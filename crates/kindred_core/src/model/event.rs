//! Events (birth, death, marriage, ...) and their partial dates.

use super::Handle;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Birth,
    Death,
    Marriage,
    Divorce,
    Other,
}

/// Calendar date where every component may be unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Date {
    pub year: Option<i32>,
    pub month: Option<u8>,
    pub day: Option<u8>,
}

impl Date {
    pub fn year(year: i32) -> Self {
        Self {
            year: Some(year),
            month: None,
            day: None,
        }
    }

    pub fn ymd(year: i32, month: u8, day: u8) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: Some(day),
        }
    }

    /// A date is usable for filtering only when the year is known.
    pub fn is_usable(&self) -> bool {
        self.year.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub handle: Handle,
    pub id: String,
    pub kind: EventKind,
    #[serde(default)]
    pub date: Option<Date>,
    #[serde(default)]
    pub place: Option<String>,
}

impl Event {
    pub fn new(id: impl Into<String>, kind: EventKind) -> Self {
        Self {
            handle: Uuid::new_v4(),
            id: id.into(),
            kind,
            date: None,
            place: None,
        }
    }

    pub fn with_date(mut self, date: Date) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = Some(place.into());
        self
    }

    pub fn has_usable_date(&self) -> bool {
        self.date.is_some_and(|date| date.is_usable())
    }

    pub fn has_place(&self) -> bool {
        self.place
            .as_deref()
            .is_some_and(|place| !place.trim().is_empty())
    }

    /// Missing a usable date or a place.
    pub fn is_incomplete(&self) -> bool {
        !self.has_usable_date() || !self.has_place()
    }
}

#[cfg(test)]
mod tests {
    use super::{Date, Event, EventKind};

    #[test]
    fn date_without_year_is_not_usable() {
        let date = Date {
            year: None,
            month: Some(4),
            day: Some(12),
        };
        assert!(!date.is_usable());
        assert!(Date::year(1850).is_usable());
    }

    #[test]
    fn event_with_place_only_is_incomplete() {
        let event = Event::new("E0001", EventKind::Birth).with_place("Oslo");
        assert!(event.is_incomplete());
        assert!(!event.has_usable_date());

        let event = event.with_date(Date::ymd(1850, 4, 12));
        assert!(!event.is_incomplete());
    }

    #[test]
    fn blank_place_counts_as_missing() {
        let event = Event::new("E0002", EventKind::Death)
            .with_date(Date::year(1901))
            .with_place("   ");
        assert!(event.is_incomplete());
    }
}
