pub mod confirm_dialog;
pub mod date_picker;
pub mod help;
pub mod recurrence_editor;
pub mod reminder_form;
pub mod reminder_list;
pub mod status_bar;

pub use confirm_dialog::ConfirmDialog;
pub use date_picker::DatePicker;
pub use help::Help;
pub use recurrence_editor::RecurrenceEditor;
pub use reminder_form::ReminderForm;
pub use reminder_list::ReminderList;
pub use status_bar::StatusBar;

use ratatui::layout::Rect;

/// Center a popup of at most `width` x `height` inside `area`.
pub fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let w = area.width.min(width);
    let h = area.height.min(height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
