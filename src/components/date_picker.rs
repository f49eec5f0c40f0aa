use chrono::{Datelike, Days, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::calendar::grid::{add_months, month_name, WEEKDAY_LETTERS};
use crate::calendar::{generate_month_grid, DateCell};
use crate::theme;

/// Which value a date picker writes back to when it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTarget {
    StartDate,
    EndDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePickerState {
    pub target: DateTarget,
    /// Highlighted date; the grid shows this date's month.
    pub cursor: NaiveDate,
}

impl DatePickerState {
    pub fn new(target: DateTarget, initial: NaiveDate) -> Self {
        Self {
            target,
            cursor: initial,
        }
    }

    pub fn move_days(&mut self, delta: i64) {
        let moved = if delta >= 0 {
            self.cursor.checked_add_days(Days::new(delta.unsigned_abs()))
        } else {
            self.cursor.checked_sub_days(Days::new(delta.unsigned_abs()))
        };
        self.cursor = moved.unwrap_or(self.cursor);
    }

    pub fn move_months(&mut self, delta: i32) {
        self.cursor = add_months(self.cursor, delta);
    }

    pub fn go_to(&mut self, date: NaiveDate) {
        self.cursor = date;
    }

    pub fn cells(&self, today: NaiveDate) -> Vec<DateCell> {
        generate_month_grid(self.cursor.month0(), self.cursor.year(), today)
    }
}

pub struct DatePicker;

impl DatePicker {
    pub fn render(frame: &mut Frame, area: Rect, state: &DatePickerState, today: NaiveDate) {
        let popup = super::popup_area(area, 30, 13);
        frame.render_widget(Clear, popup);

        let title = match state.target {
            DateTarget::StartDate => " Remind on ",
            DateTarget::EndDate => " Ends on ",
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::current().header)
            .title_bottom(Line::from(Span::styled(
                " Enter:Pick t:Today [/]:Month ",
                theme::current().dim,
            )))
            .borders(Borders::ALL)
            .border_style(theme::current().focus);

        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let heading = format!(
            "{} {}",
            month_name(state.cursor.month()),
            state.cursor.year()
        );

        // Header row
        let header_cells: Vec<Span> = WEEKDAY_LETTERS
            .iter()
            .map(|d| Span::styled(format!("{:^4}", d), theme::current().dim))
            .collect();

        let cells = state.cells(today);
        let weeks: Vec<Line> = cells
            .chunks(7)
            .map(|week| {
                Line::from(
                    week.iter()
                        .map(|cell| render_cell(cell, state.cursor))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let mut constraints = vec![Constraint::Length(1), Constraint::Length(1)];
        constraints.extend(weeks.iter().map(|_| Constraint::Length(1)));
        constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(constraints).split(inner);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(heading, theme::current().header)))
                .alignment(ratatui::layout::Alignment::Center),
            rows[0],
        );
        frame.render_widget(Paragraph::new(Line::from(header_cells)), rows[1]);
        for (i, week) in weeks.into_iter().enumerate() {
            frame.render_widget(Paragraph::new(week), rows[i + 2]);
        }
    }
}

fn render_cell(cell: &DateCell, cursor: NaiveDate) -> Span<'static> {
    let style = if cell.date == cursor {
        theme::current().selected.add_modifier(Modifier::BOLD)
    } else if cell.is_today {
        theme::current().today
    } else if !cell.in_month {
        theme::current().outside_month
    } else {
        Style::default()
    };
    Span::styled(format!(" {:>2} ", cell.date.day()), style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn moving_across_month_changes_grid() {
        let mut state = DatePickerState::new(DateTarget::StartDate, date(2024, 3, 31));
        state.move_days(1);
        assert_eq!(state.cursor, date(2024, 4, 1));
        let first = state.cells(date(2000, 1, 1)).into_iter().find(|c| c.in_month).unwrap();
        assert_eq!(first.date, date(2024, 4, 1));

        state.move_days(-7);
        assert_eq!(state.cursor, date(2024, 3, 25));
    }

    #[test]
    fn month_steps_clamp_day() {
        let mut state = DatePickerState::new(DateTarget::EndDate, date(2024, 1, 31));
        state.move_months(1);
        assert_eq!(state.cursor, date(2024, 2, 29));
        state.move_months(-2);
        assert_eq!(state.cursor, date(2023, 12, 29));
    }
}
