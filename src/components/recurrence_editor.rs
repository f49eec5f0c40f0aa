use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::calendar::grid::WEEKDAY_LETTERS;
use crate::calendar::recurrence::{format_date, EndCondition, RecurrenceUnit};
use crate::calendar::{RecurrenceConfig, RecurrenceDraft, RecurrenceError};
use crate::theme;

/// Longest value accepted by the numeric fields.
const MAX_DIGITS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Interval,
    Unit,
    Weekdays,
    End,
    EndDate,
    Occurrences,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceEditorState {
    pub draft: RecurrenceDraft,
    /// Start date of the reminder being edited.
    pub start: NaiveDate,
    pub active_field: EditorField,
    pub weekday_cursor: u8,
    pub error: Option<RecurrenceError>,
    /// The next digit replaces the field instead of extending it.
    replace_on_input: bool,
}

impl RecurrenceEditorState {
    pub fn new(start: NaiveDate) -> Self {
        Self {
            draft: RecurrenceDraft::new(start),
            start,
            active_field: EditorField::Interval,
            weekday_cursor: start.weekday().num_days_from_sunday() as u8,
            error: None,
            replace_on_input: true,
        }
    }

    /// Fields that are currently shown, in tab order.
    pub fn visible_fields(&self) -> Vec<EditorField> {
        let mut fields = vec![EditorField::Interval, EditorField::Unit];
        if self.draft.unit == RecurrenceUnit::Week {
            fields.push(EditorField::Weekdays);
        }
        fields.push(EditorField::End);
        match self.draft.end_condition {
            EndCondition::On => fields.push(EditorField::EndDate),
            EndCondition::After => fields.push(EditorField::Occurrences),
            EndCondition::Never => {}
        }
        fields
    }

    pub fn next_field(&mut self) {
        self.step_field(1);
    }

    pub fn prev_field(&mut self) {
        self.step_field(-1);
    }

    fn step_field(&mut self, delta: isize) {
        let fields = self.visible_fields();
        let pos = fields
            .iter()
            .position(|f| *f == self.active_field)
            .unwrap_or(0) as isize;
        let next = (pos + delta).rem_euclid(fields.len() as isize) as usize;
        self.active_field = fields[next];
        self.replace_on_input = true;
    }

    pub fn input_char(&mut self, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        let value = match self.active_field {
            EditorField::Interval => &mut self.draft.interval,
            EditorField::Occurrences => &mut self.draft.occurrences,
            _ => return,
        };
        if self.replace_on_input {
            value.clear();
            self.replace_on_input = false;
        }
        if value.len() < MAX_DIGITS {
            value.push(c);
        }
        self.error = None;
    }

    pub fn backspace(&mut self) {
        match self.active_field {
            EditorField::Interval => {
                self.draft.interval.pop();
            }
            EditorField::Occurrences => {
                self.draft.occurrences.pop();
            }
            _ => return,
        }
        self.replace_on_input = false;
        self.error = None;
    }

    /// Left/right on the active field. Returns true when the end condition
    /// just switched to "on", which should prompt for a date.
    pub fn cycle(&mut self, forward: bool) -> bool {
        self.error = None;
        match self.active_field {
            EditorField::Unit => {
                let unit = if forward {
                    self.draft.unit.next()
                } else {
                    self.draft.unit.prev()
                };
                self.draft.set_unit(unit, self.start);
                false
            }
            EditorField::Weekdays => {
                self.weekday_cursor = if forward {
                    (self.weekday_cursor + 1) % 7
                } else {
                    (self.weekday_cursor + 6) % 7
                };
                false
            }
            EditorField::End => {
                self.draft.end_condition = if forward {
                    self.draft.end_condition.next()
                } else {
                    self.draft.end_condition.prev()
                };
                self.draft.end_condition == EndCondition::On
            }
            _ => false,
        }
    }

    pub fn toggle_weekday(&mut self) {
        if self.active_field == EditorField::Weekdays {
            self.draft.toggle_weekday(self.weekday_cursor, self.start);
        }
    }

    pub fn set_end_date(&mut self, date: NaiveDate) {
        self.draft.end_date = Some(date);
        self.error = None;
    }

    /// Validate the draft, remembering the error for inline display.
    pub fn validate(&mut self) -> Result<RecurrenceConfig, RecurrenceError> {
        let result = self.draft.validate(self.start);
        self.error = result.as_ref().err().cloned();
        result
    }
}

pub struct RecurrenceEditor;

impl RecurrenceEditor {
    pub fn render(frame: &mut Frame, area: Rect, state: &RecurrenceEditorState) {
        let popup = super::popup_area(area, 46, 13);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Custom recurrence ")
            .title_style(theme::current().header)
            .borders(Borders::ALL)
            .border_style(theme::current().focus);

        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let rows = Layout::vertical([
            Constraint::Length(1), // repeat every
            Constraint::Length(1), // weekdays
            Constraint::Length(1), // spacer
            Constraint::Length(1), // end condition
            Constraint::Length(1), // end detail
            Constraint::Length(1), // spacer
            Constraint::Length(2), // error
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        let draft = &state.draft;
        let active = |f: EditorField| state.active_field == f;

        let plural = if draft.interval.trim().parse::<u32>().unwrap_or(1) > 1 { "s" } else { "" };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Repeat every ", theme::current().dim),
                field_span(&draft.interval, active(EditorField::Interval)),
                Span::raw(" "),
                field_span(
                    &format!("< {}{} >", draft.unit, plural),
                    active(EditorField::Unit),
                ),
            ])),
            rows[0],
        );

        if draft.unit == RecurrenceUnit::Week {
            let mut spans = vec![Span::styled("Repeat on    ", theme::current().dim)];
            for (i, letter) in WEEKDAY_LETTERS.iter().enumerate() {
                let i = i as u8;
                let mut style = if draft.weekdays.contains(i) {
                    theme::current().selected
                } else {
                    Style::default()
                };
                if active(EditorField::Weekdays) && state.weekday_cursor == i {
                    style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
                }
                spans.push(Span::styled(format!(" {} ", letter), style));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), rows[1]);
        }

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Ends         ", theme::current().dim),
                field_span(
                    &format!("< {} >", draft.end_condition.label()),
                    active(EditorField::End),
                ),
            ])),
            rows[3],
        );

        let detail = match draft.end_condition {
            EndCondition::Never => None,
            EndCondition::On => Some(field_span(
                &draft
                    .end_date
                    .as_ref()
                    .map(format_date)
                    .unwrap_or_else(|| "pick a date".to_string()),
                active(EditorField::EndDate),
            )),
            EndCondition::After => Some(field_span(
                &format!("{} occurrences", draft.occurrences),
                active(EditorField::Occurrences),
            )),
        };
        if let Some(detail) = detail {
            frame.render_widget(
                Paragraph::new(Line::from(vec![Span::raw("             "), detail])),
                rows[4],
            );
        }

        if let Some(err) = &state.error {
            frame.render_widget(
                Paragraph::new(err.to_string())
                    .style(theme::current().error)
                    .wrap(Wrap { trim: true }),
                rows[6],
            );
        }

        let help = Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Next ", theme::current().dim),
            Span::styled("\u{2190}\u{2192}", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Change ", theme::current().dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Done ", theme::current().dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme::current().dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[7]);
    }
}

fn field_span(value: &str, active: bool) -> Span<'static> {
    if active {
        Span::styled(format!("{}_", value), theme::current().focus)
    } else {
        Span::raw(value.to_string())
    }
}
