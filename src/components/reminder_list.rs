use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::calendar::recurrence::format_date;
use crate::calendar::Reminder;
use crate::theme;

pub struct ReminderList;

impl ReminderList {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        reminders: &[Reminder],
        selected_index: usize,
        focused: bool,
    ) {
        let w = area.width as usize;

        let title = if w >= 30 {
            format!(" Upcoming reminders ({}) ", reminders.len())
        } else {
            " Reminders ".to_string()
        };

        let border_style = if focused {
            theme::current().focus
        } else {
            theme::current().border
        };

        let block = Block::default()
            .title(title)
            .title_style(theme::current().header)
            .borders(Borders::ALL)
            .border_style(border_style);

        if reminders.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new("No reminders scheduled").style(theme::current().dim);
            frame.render_widget(msg, inner);
            return;
        }

        let inner_w = area.width.saturating_sub(2) as usize;

        let items: Vec<ListItem> = reminders
            .iter()
            .enumerate()
            .map(|(i, reminder)| {
                let is_selected = i == selected_index && focused;
                let date_style = if is_selected {
                    theme::current().selected
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };

                let mut lines = vec![
                    Line::from(Span::styled(
                        format!(" {} ", format_date(&reminder.start_date)),
                        date_style,
                    )),
                    Line::from(Span::styled(
                        truncate(&format!("  Repeat: {}", reminder.repeat), inner_w),
                        theme::current().dim,
                    )),
                ];
                if !reminder.note.is_empty() {
                    lines.push(Line::from(truncate(
                        &format!("  {}", reminder.note),
                        inner_w,
                    )));
                }
                lines.push(Line::from(""));
                ListItem::new(lines)
            })
            .collect();

        let mut state = ListState::default().with_selected(Some(selected_index));
        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut state);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }
}
