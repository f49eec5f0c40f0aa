use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Form",
        &[
            ("Tab/S-Tab", "Next / previous field"),
            ("Enter", "Pick date, choose repeat, add"),
            ("\u{2190}/\u{2192}", "Change repeat option"),
        ],
    ),
    (
        "Reminders",
        &[
            ("j/k", "Select reminder"),
            ("d/Del", "Remove selected reminder"),
        ],
    ),
    (
        "Date picker",
        &[
            ("hjkl", "Move by day / week"),
            ("[/]", "Previous / next month"),
            ("t", "Jump to today"),
        ],
    ),
];

pub struct Help;

impl Help {
    pub fn render(frame: &mut Frame, area: Rect) {
        let popup = super::popup_area(area, 50, 20);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Keybindings ")
            .title_style(theme::current().header)
            .borders(Borders::ALL)
            .border_style(theme::current().focus);

        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let key_style = theme::current().focus.add_modifier(Modifier::BOLD);
        let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

        let mut lines = Vec::new();
        for (title, keys) in SECTIONS {
            lines.push(Line::from(Span::styled(*title, section_style)));
            for (key, desc) in keys.iter() {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:<11}", key), key_style),
                    Span::raw(*desc),
                ]));
            }
            lines.push(Line::from(""));
        }
        lines.push(Line::from(vec![
            Span::styled("  Esc        ", key_style),
            Span::raw("Close popup / quit"),
        ]));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
