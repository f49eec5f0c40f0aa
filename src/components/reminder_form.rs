use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::Focus;
use crate::calendar::recurrence::format_date;
use crate::calendar::reminder::ReminderDraft;
use crate::calendar::RepeatOptions;
use crate::theme;

pub struct ReminderForm;

impl ReminderForm {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        draft: &ReminderDraft,
        options: &RepeatOptions,
        focus: Focus,
    ) {
        let focused = focus != Focus::List;
        let block = Block::default()
            .title(" Reminder ")
            .title_style(theme::current().header)
            .borders(Borders::ALL)
            .border_style(if focused {
                theme::current().focus
            } else {
                theme::current().border
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1), // date
            Constraint::Length(1), // repeat
            Constraint::Length(1), // spacer
            Constraint::Min(2),    // note
            Constraint::Length(1), // submit
        ])
        .split(inner);

        render_field(
            frame,
            rows[0],
            "For:",
            &format_date(&draft.start_date),
            focus == Focus::Date,
        );

        let repeat = if focus == Focus::Repeat {
            format!(
                "< {} >  ({}/{})",
                draft.repeat,
                options.selected_index() + 1,
                options.len()
            )
        } else {
            draft.repeat.clone()
        };
        render_field(frame, rows[1], "Repeat:", &repeat, focus == Focus::Repeat);

        let note_style = if focus == Focus::Note {
            theme::current().focus
        } else {
            Style::default()
        };
        let note = if draft.note.is_empty() && focus != Focus::Note {
            Paragraph::new("What to remind").style(theme::current().dim)
        } else {
            let cursor = if focus == Focus::Note { "_" } else { "" };
            Paragraph::new(format!("{}{}", draft.note, cursor))
                .style(note_style)
                .wrap(Wrap { trim: false })
        };
        frame.render_widget(note, rows[3]);

        let button_style = if focus == Focus::Submit {
            theme::current().selected.add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(" [ Add reminder ] ", button_style)))
                .alignment(ratatui::layout::Alignment::Center),
            rows[4],
        );
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let style = if active {
        theme::current().focus
    } else {
        Style::default()
    };

    let spans = vec![
        Span::styled(format!("{:<8}", label), theme::current().dim),
        Span::styled(value.to_string(), style),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
