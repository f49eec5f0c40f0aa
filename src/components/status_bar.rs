use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::Focus;
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, focus: Focus, message: Option<&str>) {
        let w = area.width as usize;

        let focus_str = match focus {
            Focus::Date => "[Date]",
            Focus::Repeat => "[Repeat]",
            Focus::Note => "[Note]",
            Focus::Submit => "[Add]",
            Focus::List => "[Reminders]",
        };

        let right = match message {
            Some(msg) => format!(" {} ", msg),
            None => {
                let hints = match focus {
                    Focus::List if w >= 60 => " jk:Select d:Remove Tab:Form F1:Help Esc:Quit",
                    Focus::Repeat if w >= 60 => " \u{2190}\u{2192}:Change Enter:Custom Tab:Next F1:Help",
                    _ if w >= 50 => " Tab:Next Enter:Select F1:Help Esc:Quit",
                    _ => " F1:Help Esc:Quit",
                };
                hints.to_string()
            }
        };

        let left = format!(" {} ", focus_str);
        let padding = " ".repeat(w.saturating_sub(left.len() + right.chars().count()));

        let line = Line::from(vec![
            Span::styled(left, theme::current().status),
            Span::styled(padding, theme::current().status),
            Span::styled(right, theme::current().status),
        ]);

        let bar = Paragraph::new(line).style(theme::current().status);
        frame.render_widget(bar, area);
    }
}
