use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;

use super::grid::WEEKDAY_ABBREVIATIONS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceUnit {
    Day,
    Week,
    Month,
    Year,
}

impl RecurrenceUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Day => Self::Week,
            Self::Week => Self::Month,
            Self::Month => Self::Year,
            Self::Year => Self::Day,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Day => Self::Year,
            Self::Week => Self::Day,
            Self::Month => Self::Week,
            Self::Year => Self::Month,
        }
    }
}

impl fmt::Display for RecurrenceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of weekdays indexed 0 (Sunday) through 6 (Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub fn single(weekday: Weekday) -> Self {
        let mut set = Self::default();
        set.insert(weekday.num_days_from_sunday() as u8);
        set
    }

    pub fn contains(&self, index: u8) -> bool {
        index < 7 && self.0 & (1 << index) != 0
    }

    pub fn insert(&mut self, index: u8) {
        if index < 7 {
            self.0 |= 1 << index;
        }
    }

    pub fn toggle(&mut self, index: u8) {
        if index < 7 {
            self.0 ^= 1 << index;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Indices in ascending weekday order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..7).filter(move |i| self.contains(*i))
    }
}

impl FromIterator<u8> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::default();
        for index in iter {
            set.insert(index);
        }
        set
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndPolicy {
    Never,
    OnDate(NaiveDate),
    AfterCount(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceConfig {
    pub interval: u32,
    pub unit: RecurrenceUnit,
    /// Only meaningful when `unit` is `Week`.
    pub weekdays: WeekdaySet,
    pub end: EndPolicy,
}

impl RecurrenceConfig {
    /// Human-readable sentence such as "Every 2 weeks on Mon, Wed, never ends".
    pub fn describe(&self) -> String {
        let mut out = format!("Every {} {}", self.interval, self.unit);
        if self.interval > 1 {
            out.push('s');
        }

        if self.unit == RecurrenceUnit::Week && !self.weekdays.is_empty() {
            let days: Vec<&str> = self
                .weekdays
                .iter()
                .map(|i| WEEKDAY_ABBREVIATIONS[i as usize])
                .collect();
            out.push_str(" on ");
            out.push_str(&days.join(", "));
        }

        match self.end {
            EndPolicy::Never => out.push_str(", never ends"),
            EndPolicy::OnDate(date) => {
                out.push_str(" until ");
                out.push_str(&format_date(&date));
            }
            EndPolicy::AfterCount(n) => out.push_str(&format!(" for {} occurrences", n)),
        }

        out
    }
}

/// "15 Mar 2024"
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    #[error("Repeat interval must be a positive number")]
    ZeroInterval,

    #[error("Occurrences must be a positive number")]
    ZeroOccurrences,

    #[error("Pick an end date")]
    MissingEndDate,

    #[error("End date {} is before the start date {}", format_date(.end), format_date(.start))]
    EndDateBeforeStart { end: NaiveDate, start: NaiveDate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCondition {
    Never,
    On,
    After,
}

impl EndCondition {
    pub fn next(&self) -> Self {
        match self {
            Self::Never => Self::On,
            Self::On => Self::After,
            Self::After => Self::Never,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Never => Self::After,
            Self::On => Self::Never,
            Self::After => Self::On,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Never => "Never",
            Self::On => "On",
            Self::After => "After",
        }
    }
}

/// Editable form of a [`RecurrenceConfig`]. Numeric fields stay as typed text
/// until [`RecurrenceDraft::validate`] is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceDraft {
    pub interval: String,
    pub unit: RecurrenceUnit,
    pub weekdays: WeekdaySet,
    pub end_condition: EndCondition,
    pub end_date: Option<NaiveDate>,
    pub occurrences: String,
}

impl RecurrenceDraft {
    pub fn new(start: NaiveDate) -> Self {
        Self {
            interval: "1".to_string(),
            unit: RecurrenceUnit::Week,
            weekdays: WeekdaySet::single(start.weekday()),
            end_condition: EndCondition::Never,
            end_date: None,
            occurrences: "10".to_string(),
        }
    }

    /// Switch unit, re-seeding the weekday set from `start` when a weekly
    /// rule would otherwise have no days.
    pub fn set_unit(&mut self, unit: RecurrenceUnit, start: NaiveDate) {
        self.unit = unit;
        if unit == RecurrenceUnit::Week && self.weekdays.is_empty() {
            self.weekdays = WeekdaySet::single(start.weekday());
        }
    }

    pub fn toggle_weekday(&mut self, index: u8, start: NaiveDate) {
        self.weekdays.toggle(index);
        if self.unit == RecurrenceUnit::Week && self.weekdays.is_empty() {
            self.weekdays = WeekdaySet::single(start.weekday());
        }
    }

    pub fn validate(&self, start: NaiveDate) -> Result<RecurrenceConfig, RecurrenceError> {
        let interval = parse_positive(&self.interval).ok_or(RecurrenceError::ZeroInterval)?;

        let end = match self.end_condition {
            EndCondition::Never => EndPolicy::Never,
            EndCondition::On => {
                let end = self.end_date.ok_or(RecurrenceError::MissingEndDate)?;
                if end < start {
                    return Err(RecurrenceError::EndDateBeforeStart { end, start });
                }
                EndPolicy::OnDate(end)
            }
            EndCondition::After => EndPolicy::AfterCount(
                parse_positive(&self.occurrences).ok_or(RecurrenceError::ZeroOccurrences)?,
            ),
        };

        Ok(RecurrenceConfig {
            interval,
            unit: self.unit,
            weekdays: if self.unit == RecurrenceUnit::Week {
                self.weekdays
            } else {
                WeekdaySet::default()
            },
            end,
        })
    }
}

fn parse_positive(s: &str) -> Option<u32> {
    s.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekly_on_monday_never_ends() {
        let config = RecurrenceConfig {
            interval: 1,
            unit: RecurrenceUnit::Week,
            weekdays: [1].into_iter().collect(),
            end: EndPolicy::Never,
        };
        assert_eq!(config.describe(), "Every 1 week on Mon, never ends");
    }

    #[test]
    fn every_two_months_for_five() {
        let config = RecurrenceConfig {
            interval: 2,
            unit: RecurrenceUnit::Month,
            weekdays: WeekdaySet::default(),
            end: EndPolicy::AfterCount(5),
        };
        assert_eq!(config.describe(), "Every 2 months for 5 occurrences");
    }

    #[test]
    fn weekdays_sorted_and_until_date() {
        let config = RecurrenceConfig {
            interval: 3,
            unit: RecurrenceUnit::Week,
            weekdays: [5, 0, 3].into_iter().collect(),
            end: EndPolicy::OnDate(date(2025, 4, 5)),
        };
        assert_eq!(
            config.describe(),
            "Every 3 weeks on Sun, Wed, Fri until 5 Apr 2025"
        );
    }

    #[test]
    fn weekdays_ignored_for_other_units() {
        let config = RecurrenceConfig {
            interval: 1,
            unit: RecurrenceUnit::Day,
            weekdays: [2].into_iter().collect(),
            end: EndPolicy::Never,
        };
        assert_eq!(config.describe(), "Every 1 day, never ends");
    }

    #[test]
    fn draft_defaults_to_start_weekday() {
        // Friday
        let start = date(2024, 3, 15);
        let draft = RecurrenceDraft::new(start);
        assert_eq!(draft.weekdays.iter().collect::<Vec<_>>(), vec![5]);
        let config = draft.validate(start).unwrap();
        assert_eq!(config.describe(), "Every 1 week on Fri, never ends");
    }

    #[test]
    fn emptying_weekdays_reseeds_from_start() {
        let start = date(2024, 3, 15);
        let mut draft = RecurrenceDraft::new(start);
        draft.toggle_weekday(5, start);
        assert!(draft.weekdays.contains(5));

        draft.toggle_weekday(1, start);
        draft.toggle_weekday(5, start);
        assert_eq!(draft.weekdays.iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn end_date_before_start_is_rejected() {
        let start = date(2024, 3, 15);
        let mut draft = RecurrenceDraft::new(start);
        draft.end_condition = EndCondition::On;
        assert_eq!(draft.validate(start), Err(RecurrenceError::MissingEndDate));

        draft.end_date = Some(date(2024, 3, 14));
        assert!(matches!(
            draft.validate(start),
            Err(RecurrenceError::EndDateBeforeStart { .. })
        ));

        draft.end_date = Some(start);
        assert_eq!(
            draft.validate(start).unwrap().end,
            EndPolicy::OnDate(start)
        );
    }

    #[test]
    fn numeric_fields_must_be_positive() {
        let start = date(2024, 3, 15);
        let mut draft = RecurrenceDraft::new(start);
        draft.interval = "0".to_string();
        assert_eq!(draft.validate(start), Err(RecurrenceError::ZeroInterval));

        draft.interval = "2".to_string();
        draft.end_condition = EndCondition::After;
        draft.occurrences = String::new();
        assert_eq!(draft.validate(start), Err(RecurrenceError::ZeroOccurrences));

        draft.occurrences = "4".to_string();
        assert_eq!(draft.validate(start).unwrap().end, EndPolicy::AfterCount(4));
    }

    #[test]
    fn error_message_mentions_both_dates() {
        let err = RecurrenceError::EndDateBeforeStart {
            end: date(2024, 3, 1),
            start: date(2024, 3, 15),
        };
        assert_eq!(
            err.to_string(),
            "End date 1 Mar 2024 is before the start date 15 Mar 2024"
        );
    }
}
