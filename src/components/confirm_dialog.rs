use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::calendar::recurrence::format_date;
use crate::calendar::Reminder;
use crate::theme;

pub struct ConfirmDialog;

impl ConfirmDialog {
    pub fn render(frame: &mut Frame, area: Rect, reminder: &Reminder) {
        let popup = super::popup_area(area, 44, 8);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Confirm removal ")
            .title_style(theme::current().error.add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(theme::current().error);

        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let lines = vec![
            Line::from(format!(
                "Remove the reminder for {}?",
                format_date(&reminder.start_date)
            )),
            Line::from(Span::styled(reminder.note.clone(), theme::current().dim)),
            Line::from(""),
            Line::from(vec![
                Span::styled("y", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(":Confirm  ", theme::current().dim),
                Span::styled("n/Esc", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(":Cancel", theme::current().dim),
            ]),
        ];

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
