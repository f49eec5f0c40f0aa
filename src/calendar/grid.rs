use chrono::{Datelike, Days, NaiveDate, Weekday};

/// One square of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
}

pub const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
pub const WEEKDAY_LETTERS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

/// Build the cells for `month` (0-based, January = 0) of `year`.
///
/// The first row is padded on the left with dates from the week containing
/// the 1st so the grid always starts in the Sunday column. No padding is added
/// after the last day. A `month` past 11 rolls over into the following years.
pub fn generate_month_grid(month: u32, year: i32, today: NaiveDate) -> Vec<DateCell> {
    let year = year + (month / 12) as i32;
    let month = month % 12 + 1;

    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let offset = first.weekday().num_days_from_sunday();
    let last_day = days_in_month(year, month);

    let mut cells = Vec::with_capacity((offset + last_day) as usize);

    for i in 0..offset {
        // Same weekday-setter semantics as the picker always had: the i-th
        // weekday of the week that contains the 1st.
        if let Some(date) = first.checked_sub_days(Days::new(u64::from(offset - i))) {
            cells.push(DateCell {
                date,
                in_month: false,
                is_today: false,
            });
        }
    }

    cells.extend(
        first
            .iter_days()
            .take(last_day as usize)
            .map(|date| DateCell {
                date,
                in_month: true,
                is_today: date == today,
            }),
    );

    cells
}

/// Which occurrence of its weekday `day` is within the month, e.g. "3rd Friday".
///
/// `month` is 1-based. Returns `None` for a date that does not exist.
pub fn ordinal_weekday_occurrence(day: u32, month: u32, year: i32) -> Option<String> {
    let target = NaiveDate::from_ymd_opt(year, month, day)?;
    let weekday = target.weekday();

    let count = (1..=day)
        .filter_map(|d| NaiveDate::from_ymd_opt(year, month, d))
        .filter(|d| d.weekday() == weekday)
        .count();

    Some(format!("{}{} {}", count, ordinal_suffix(count), weekday_name(weekday)))
}

// Buckets on the last digit only. Occurrence counts never exceed 5, so the
// 11th-13th case is unreachable here.
fn ordinal_suffix(n: usize) -> &'static str {
    const SUFFIXES: [&str; 4] = ["th", "st", "nd", "rd"];
    let last = n % 10;
    SUFFIXES[if last <= 3 { last } else { 0 }]
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (next, NaiveDate::from_ymd_opt(year, month, 1)) {
        (Some(next), Some(first)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

/// Shift `date` by whole months, clamping the day to the target month's length.
pub fn add_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + delta;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grid_starts_on_sunday_and_covers_month() {
        let today = date(2000, 1, 1);
        for year in [2023, 2024, 2025] {
            for month in 0..12 {
                let cells = generate_month_grid(month, year, today);
                assert_eq!(cells[0].date.weekday(), Weekday::Sun, "{year}-{month}");
                let in_month = cells.iter().filter(|c| c.in_month).count() as u32;
                assert_eq!(in_month, days_in_month(year, month + 1));
                assert!((28..=42).contains(&cells.len()));
            }
        }
    }

    #[test]
    fn march_2024_has_five_leading_cells() {
        // 1 March 2024 is a Friday.
        let cells = generate_month_grid(2, 2024, date(2000, 1, 1));
        let leading: Vec<_> = cells.iter().take_while(|c| !c.in_month).collect();
        assert_eq!(leading.len(), 5);
        assert_eq!(leading[0].date, date(2024, 2, 25));
        assert_eq!(leading[4].date, date(2024, 2, 29));
        assert_eq!(cells.last().unwrap().date, date(2024, 3, 31));
        assert_eq!(cells.len(), 36);
    }

    #[test]
    fn leading_cells_cross_year_boundary() {
        // 1 January 2025 is a Wednesday.
        let cells = generate_month_grid(0, 2025, date(2000, 1, 1));
        assert_eq!(cells[0].date, date(2024, 12, 29));
        assert!(!cells[0].in_month);
        assert!(!cells[0].is_today);
    }

    #[test]
    fn february_starting_sunday_has_no_padding() {
        let cells = generate_month_grid(1, 2015, date(2000, 1, 1));
        assert_eq!(cells.len(), 28);
        assert!(cells.iter().all(|c| c.in_month));
    }

    #[test]
    fn exactly_one_today_in_current_month() {
        let today = date(2024, 3, 15);
        let cells = generate_month_grid(2, 2024, today);
        let todays: Vec<_> = cells.iter().filter(|c| c.is_today).collect();
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].date, today);

        let other = generate_month_grid(3, 2024, today);
        assert!(other.iter().all(|c| !c.is_today));
    }

    #[test]
    fn month_overflow_rolls_into_next_year() {
        let cells = generate_month_grid(12, 2024, date(2000, 1, 1));
        let first = cells.iter().find(|c| c.in_month).unwrap();
        assert_eq!(first.date, date(2025, 1, 1));
    }

    #[test]
    fn ordinal_occurrences() {
        assert_eq!(ordinal_weekday_occurrence(15, 3, 2024).as_deref(), Some("3rd Friday"));
        assert_eq!(ordinal_weekday_occurrence(1, 3, 2024).as_deref(), Some("1st Friday"));
        assert_eq!(ordinal_weekday_occurrence(14, 3, 2024).as_deref(), Some("2nd Thursday"));
        assert_eq!(ordinal_weekday_occurrence(29, 3, 2024).as_deref(), Some("5th Friday"));
        assert_eq!(ordinal_weekday_occurrence(26, 3, 2024).as_deref(), Some("4th Tuesday"));
        assert_eq!(ordinal_weekday_occurrence(31, 2, 2024), None);
    }

    #[test]
    fn suffix_uses_last_digit() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(11), "st");
    }

    #[test]
    fn add_months_clamps_day() {
        assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(add_months(date(2024, 1, 15), -1), date(2023, 12, 15));
        assert_eq!(add_months(date(2024, 12, 1), 1), date(2025, 1, 1));
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(month_name(3), "March");
    }
}
