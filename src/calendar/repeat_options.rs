use chrono::{Datelike, NaiveDate};

use super::grid::{ordinal_weekday_occurrence, weekday_name};
use super::reminder::DEFAULT_REPEAT;

pub const CUSTOM_OPTION: &str = "Custom...";

/// Entries of the repeat dropdown: presets derived from the start date, the
/// custom descriptions saved so far, and a trailing "Custom..." entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatOptions {
    presets: Vec<String>,
    custom: Vec<String>,
    selected: usize,
}

impl RepeatOptions {
    pub fn new(start: NaiveDate) -> Self {
        Self {
            presets: presets_for(start),
            custom: Vec::new(),
            selected: 0,
        }
    }

    /// Rebuild the date-derived presets, keeping custom entries and the
    /// selected value when it is still offered.
    pub fn set_start(&mut self, start: NaiveDate) {
        let current = self.selected().to_string();
        self.presets = presets_for(start);
        if !self.select_value(&current) {
            self.selected = 0;
        }
    }

    pub fn len(&self) -> usize {
        self.presets.len() + self.custom.len() + 1
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        let custom_start = self.presets.len();
        let custom_end = custom_start + self.custom.len();
        match index {
            i if i < custom_start => Some(self.presets[i].as_str()),
            i if i < custom_end => Some(self.custom[i - custom_start].as_str()),
            i if i == custom_end => Some(CUSTOM_OPTION),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> &str {
        self.get(self.selected).unwrap_or(DEFAULT_REPEAT)
    }

    pub fn is_custom_selected(&self) -> bool {
        self.selected == self.len() - 1
    }

    /// Move the selection by `delta`, wrapping around. Returns the new value.
    pub fn cycle(&mut self, delta: isize) -> &str {
        let len = self.len() as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
        self.selected()
    }

    /// Select `value` if it is offered. Returns whether it was found.
    pub fn select_value(&mut self, value: &str) -> bool {
        let found = self.iter().position(|o| o == value);
        match found {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    /// Offer a saved custom description just before "Custom..." and select it.
    pub fn add_custom(&mut self, description: String) {
        if !self.select_value(&description) {
            self.custom.push(description);
            self.selected = self.presets.len() + self.custom.len() - 1;
        }
    }
}

fn presets_for(start: NaiveDate) -> Vec<String> {
    let mut presets = vec![
        DEFAULT_REPEAT.to_string(),
        "Daily".to_string(),
        format!("Weekly on {}", weekday_name(start.weekday())),
        format!("Monthly on {}", start.day()),
    ];
    if let Some(ordinal) = ordinal_weekday_occurrence(start.day(), start.month(), start.year()) {
        presets.push(format!("Monthly on the {}", ordinal));
    }
    presets.push(format!("Annually on {}", start.format("%-d %b")));
    presets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn presets_follow_start_date() {
        let options = RepeatOptions::new(date(2024, 3, 15));
        let all: Vec<_> = options.iter().collect();
        assert_eq!(
            all,
            vec![
                "Doesn't repeat",
                "Daily",
                "Weekly on Friday",
                "Monthly on 15",
                "Monthly on the 3rd Friday",
                "Annually on 15 Mar",
                "Custom...",
            ]
        );
        assert_eq!(options.selected(), DEFAULT_REPEAT);
    }

    #[test]
    fn custom_descriptions_sit_before_custom_entry() {
        let mut options = RepeatOptions::new(date(2024, 3, 15));
        options.add_custom("Every 2 days, never ends".to_string());
        options.add_custom("Every 1 week on Mon, never ends".to_string());
        options.add_custom("Every 2 days, never ends".to_string());

        let all: Vec<_> = options.iter().collect();
        assert_eq!(all.len(), 9);
        assert_eq!(all[6], "Every 2 days, never ends");
        assert_eq!(all[7], "Every 1 week on Mon, never ends");
        assert_eq!(all[8], CUSTOM_OPTION);
        assert_eq!(options.selected(), "Every 2 days, never ends");
    }

    #[test]
    fn cycle_wraps_and_flags_custom() {
        let mut options = RepeatOptions::new(date(2024, 3, 15));
        assert_eq!(options.cycle(-1), CUSTOM_OPTION);
        assert!(options.is_custom_selected());
        assert_eq!(options.cycle(1), DEFAULT_REPEAT);
        assert_eq!(options.cycle(2), "Weekly on Friday");
    }

    #[test]
    fn changing_start_keeps_custom_and_matching_selection() {
        let mut options = RepeatOptions::new(date(2024, 3, 15));
        options.add_custom("Every 3 days, never ends".to_string());
        options.set_start(date(2024, 3, 18));
        assert_eq!(options.selected(), "Every 3 days, never ends");
        assert!(options.iter().any(|o| o == "Weekly on Monday"));

        options.select_value("Weekly on Monday");
        options.set_start(date(2024, 3, 19));
        assert_eq!(options.selected(), DEFAULT_REPEAT);
    }

    #[test]
    fn select_value_reports_whether_offered() {
        let mut options = RepeatOptions::new(date(2024, 3, 15));
        assert!(options.select_value("Daily"));
        assert_eq!(options.selected_index(), 1);
        assert!(!options.select_value("Weekly on Monday"));
        assert_eq!(options.selected(), "Daily");
    }
}
