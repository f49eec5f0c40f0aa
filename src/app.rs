use std::cell::Cell;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::calendar::reminder::ReminderDraft;
use crate::calendar::{Action, Reminder, ReminderStore, RepeatOptions, StoreChange, DEFAULT_REPEAT};
use crate::components::date_picker::{DatePickerState, DateTarget};
use crate::components::recurrence_editor::RecurrenceEditorState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Date,
    Repeat,
    Note,
    Submit,
    List,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::Date => Focus::Repeat,
            Focus::Repeat => Focus::Note,
            Focus::Note => Focus::Submit,
            Focus::Submit => Focus::List,
            Focus::List => Focus::Date,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Focus::Date => Focus::List,
            Focus::Repeat => Focus::Date,
            Focus::Note => Focus::Repeat,
            Focus::Submit => Focus::Note,
            Focus::List => Focus::Submit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    DatePicker(DatePickerState),
    CustomRecurrence(RecurrenceEditorState),
    ConfirmRemoval { index: usize },
    Help,
}

/// Open popups, bottom first. Only the top one receives input.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn push(&mut self, modal: Modal) {
        tracing::debug!(depth = self.stack.len() + 1, ?modal, "open modal");
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        let modal = self.stack.pop();
        tracing::debug!(depth = self.stack.len(), "close modal");
        modal
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Modal> {
        self.stack.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modal> {
        self.stack.iter()
    }
}

pub struct App {
    pub running: bool,
    pub today: NaiveDate,
    pub focus: Focus,
    pub list_index: usize,
    pub repeat_options: RepeatOptions,
    pub modals: ModalStack,
    pub status_message: Option<String>,
    dirty: Rc<Cell<bool>>,
    store: ReminderStore,
}

impl App {
    pub fn new(mut store: ReminderStore, today: NaiveDate) -> Self {
        let dirty = Rc::new(Cell::new(true));
        let flag = dirty.clone();
        store.subscribe(move |change| {
            match change {
                StoreChange::Committed { index } => tracing::debug!(index, "reminder committed"),
                StoreChange::Removed { index } => tracing::debug!(index, "reminder removed"),
                StoreChange::Draft => {}
            }
            flag.set(true);
        });

        let repeat_options = RepeatOptions::new(store.draft().start_date);

        Self {
            running: true,
            today,
            focus: Focus::Date,
            list_index: 0,
            repeat_options,
            modals: ModalStack::default(),
            status_message: None,
            dirty,
            store,
        }
    }

    pub fn reminders(&self) -> &[Reminder] {
        self.store.reminders()
    }

    pub fn draft(&self) -> &ReminderDraft {
        self.store.draft()
    }

    /// Whether anything changed since the last call.
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    pub fn mark_dirty(&self) {
        self.dirty.set(true);
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn refresh_today(&mut self, today: NaiveDate) {
        if today != self.today {
            self.today = today;
            self.store.set_today(today);
            self.mark_dirty();
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn show_help(&mut self) {
        self.modals.push(Modal::Help);
    }

    // ── Form ──

    pub fn open_start_date_picker(&mut self) {
        let initial = self.draft().start_date;
        self.modals.push(Modal::DatePicker(DatePickerState::new(
            DateTarget::StartDate,
            initial,
        )));
    }

    pub fn input_note_char(&mut self, c: char) {
        let mut note = self.draft().note.clone();
        note.push(c);
        self.store.dispatch(Action::SetNote(note));
    }

    pub fn note_backspace(&mut self) {
        let mut note = self.draft().note.clone();
        if note.pop().is_some() {
            self.store.dispatch(Action::SetNote(note));
        }
    }

    /// Step through the repeat dropdown. Landing on "Custom..." opens the
    /// custom recurrence editor.
    pub fn cycle_repeat(&mut self, delta: isize) {
        let value = self.repeat_options.cycle(delta).to_string();
        if self.repeat_options.is_custom_selected() {
            self.open_custom_recurrence();
        } else {
            self.store.dispatch(Action::SetRecurrence(value));
        }
    }

    pub fn open_custom_recurrence(&mut self) {
        let start = self.draft().start_date;
        self.modals
            .push(Modal::CustomRecurrence(RecurrenceEditorState::new(start)));
    }

    pub fn submit(&mut self) {
        self.store.dispatch(Action::Commit);
        let draft = self.store.draft();
        self.repeat_options.set_start(draft.start_date);
        self.repeat_options.select_value(DEFAULT_REPEAT);
        self.list_index = self.reminders().len().saturating_sub(1);
        self.focus = Focus::Date;
        self.status_message = Some("Reminder added".to_string());
    }

    fn set_start_date(&mut self, date: NaiveDate) {
        self.store.dispatch(Action::SetStartDate(date));
        self.repeat_options.set_start(date);
        let selected = self.repeat_options.selected();
        if selected != self.draft().repeat {
            let selected = selected.to_string();
            self.store.dispatch(Action::SetRecurrence(selected));
        }
    }

    // ── Reminder list ──

    pub fn select_next(&mut self) {
        let len = self.reminders().len();
        if len > 0 {
            self.list_index = (self.list_index + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.list_index = self.list_index.saturating_sub(1);
    }

    /// Ask for confirmation before removing the selected reminder.
    pub fn request_remove(&mut self) {
        if self.list_index < self.reminders().len() {
            self.modals.push(Modal::ConfirmRemoval {
                index: self.list_index,
            });
        }
    }

    pub fn confirm_removal(&mut self) {
        if let Some(Modal::ConfirmRemoval { index }) = self.modals.top().cloned() {
            self.modals.pop();
            self.store.dispatch(Action::Remove(index));
            let len = self.reminders().len();
            self.list_index = self.list_index.min(len.saturating_sub(1));
            self.status_message = Some("Reminder removed".to_string());
        }
    }

    /// Close the top popup without applying it.
    pub fn dismiss_modal(&mut self) {
        match self.modals.top() {
            Some(Modal::DatePicker(_)) => self.close_date_picker(None),
            Some(Modal::CustomRecurrence(_)) => self.cancel_custom_recurrence(),
            Some(Modal::ConfirmRemoval { .. }) | Some(Modal::Help) => {
                self.modals.pop();
                self.mark_dirty();
            }
            None => {}
        }
    }

    // ── Date picker ──

    pub fn date_picker_mut(&mut self) -> Option<&mut DatePickerState> {
        match self.modals.top_mut() {
            Some(Modal::DatePicker(state)) => Some(state),
            _ => None,
        }
    }

    pub fn pick_date(&mut self) {
        let picked = self.date_picker_mut().map(|p| p.cursor);
        if picked.is_some() {
            self.close_date_picker(picked);
        }
    }

    /// Pop the date picker and hand its result to whoever opened it.
    pub fn close_date_picker(&mut self, picked: Option<NaiveDate>) {
        let Some(Modal::DatePicker(state)) = self.modals.top().cloned() else {
            return;
        };
        self.modals.pop();
        self.mark_dirty();

        let Some(date) = picked else {
            return;
        };
        match state.target {
            DateTarget::StartDate => self.set_start_date(date),
            DateTarget::EndDate => {
                if let Some(editor) = self.recurrence_editor_mut() {
                    editor.set_end_date(date);
                }
            }
        }
    }

    // ── Custom recurrence ──

    pub fn recurrence_editor_mut(&mut self) -> Option<&mut RecurrenceEditorState> {
        match self.modals.top_mut() {
            Some(Modal::CustomRecurrence(state)) => Some(state),
            _ => None,
        }
    }

    /// Left/right inside the editor; choosing "On" as the end opens a
    /// nested date picker.
    pub fn editor_cycle(&mut self, forward: bool) {
        let Some(editor) = self.recurrence_editor_mut() else {
            return;
        };
        if editor.cycle(forward) {
            self.open_end_date_picker();
        }
    }

    pub fn open_end_date_picker(&mut self) {
        let Some(editor) = self.recurrence_editor_mut() else {
            return;
        };
        let initial = editor.draft.end_date.unwrap_or(editor.start);
        self.modals.push(Modal::DatePicker(DatePickerState::new(
            DateTarget::EndDate,
            initial,
        )));
    }

    pub fn cancel_custom_recurrence(&mut self) {
        if self.recurrence_editor_mut().is_none() {
            return;
        }
        self.modals.pop();
        self.repeat_options.select_value(DEFAULT_REPEAT);
        self.store
            .dispatch(Action::SetRecurrence(DEFAULT_REPEAT.to_string()));
    }

    /// Validate and apply the custom rule. On error the editor stays open
    /// with the message shown inline.
    pub fn save_custom_recurrence(&mut self) {
        let Some(editor) = self.recurrence_editor_mut() else {
            return;
        };
        match editor.validate() {
            Ok(config) => {
                let description = config.describe();
                tracing::info!(%description, "custom recurrence saved");
                self.modals.pop();
                self.repeat_options.add_custom(description.clone());
                self.store.dispatch(Action::SetRecurrence(description));
            }
            Err(e) => {
                tracing::debug!(error = %e, "custom recurrence rejected");
                self.mark_dirty();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::storage::MemoryStorage;
    use crate::calendar::recurrence::EndCondition;
    use crate::components::recurrence_editor::EditorField;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn app() -> App {
        let today = date(2024, 3, 15);
        let store = ReminderStore::load(Box::new(MemoryStorage::default()), today);
        App::new(store, today)
    }

    fn add(app: &mut App, note: &str) {
        for c in note.chars() {
            app.input_note_char(c);
        }
        app.submit();
    }

    #[test]
    fn picking_a_start_date_updates_draft_and_options() {
        let mut app = app();
        app.open_start_date_picker();
        app.date_picker_mut().unwrap().move_days(3);
        app.pick_date();

        assert!(app.modals.is_empty());
        assert_eq!(app.draft().start_date, date(2024, 3, 18));
        assert!(app.repeat_options.iter().any(|o| o == "Weekly on Monday"));
    }

    #[test]
    fn dismissed_picker_changes_nothing() {
        let mut app = app();
        app.open_start_date_picker();
        app.date_picker_mut().unwrap().move_months(2);
        app.dismiss_modal();
        assert!(app.modals.is_empty());
        assert_eq!(app.draft().start_date, date(2024, 3, 15));
    }

    #[test]
    fn start_change_drops_stale_weekly_choice() {
        let mut app = app();
        app.cycle_repeat(2);
        assert_eq!(app.draft().repeat, "Weekly on Friday");

        app.set_start_date(date(2024, 3, 18));
        assert_eq!(app.draft().repeat, DEFAULT_REPEAT);
    }

    #[test]
    fn custom_entry_opens_editor_and_cancel_resets() {
        let mut app = app();
        app.cycle_repeat(1);
        assert_eq!(app.draft().repeat, "Daily");

        app.cycle_repeat(-2);
        assert!(matches!(app.modals.top(), Some(Modal::CustomRecurrence(_))));

        app.dismiss_modal();
        assert!(app.modals.is_empty());
        assert_eq!(app.draft().repeat, DEFAULT_REPEAT);
        assert_eq!(app.repeat_options.selected(), DEFAULT_REPEAT);
    }

    #[test]
    fn saved_custom_rule_becomes_an_option() {
        let mut app = app();
        app.open_custom_recurrence();
        app.save_custom_recurrence();

        let description = "Every 1 week on Fri, never ends";
        assert!(app.modals.is_empty());
        assert_eq!(app.draft().repeat, description);
        assert_eq!(app.repeat_options.selected(), description);
        let options: Vec<_> = app.repeat_options.iter().collect();
        assert_eq!(options[options.len() - 2], description);
        assert_eq!(options[options.len() - 1], "Custom...");
    }

    #[test]
    fn end_date_flows_through_nested_picker() {
        let mut app = app();
        app.open_custom_recurrence();
        app.recurrence_editor_mut().unwrap().active_field = EditorField::End;
        app.editor_cycle(true);

        assert!(matches!(app.modals.top(), Some(Modal::DatePicker(_))));
        assert_eq!(app.modals.iter().count(), 2);

        app.date_picker_mut().unwrap().move_days(10);
        app.pick_date();

        let editor = app.recurrence_editor_mut().unwrap();
        assert_eq!(editor.draft.end_condition, EndCondition::On);
        assert_eq!(editor.draft.end_date, Some(date(2024, 3, 25)));

        app.save_custom_recurrence();
        assert_eq!(
            app.draft().repeat,
            "Every 1 week on Fri until 25 Mar 2024"
        );
    }

    #[test]
    fn invalid_end_date_blocks_save() {
        let mut app = app();
        app.open_custom_recurrence();
        app.recurrence_editor_mut().unwrap().active_field = EditorField::End;
        app.editor_cycle(true);
        app.date_picker_mut().unwrap().move_days(-1);
        app.pick_date();

        app.save_custom_recurrence();
        let editor = app.recurrence_editor_mut().unwrap();
        assert!(editor.error.is_some());
        assert_eq!(app.draft().repeat, DEFAULT_REPEAT);

        app.open_end_date_picker();
        app.dismiss_modal();
        let editor = app.recurrence_editor_mut().unwrap();
        assert_eq!(editor.draft.end_date, Some(date(2024, 3, 14)));
    }

    #[test]
    fn missing_end_date_blocks_save() {
        let mut app = app();
        app.open_custom_recurrence();
        app.recurrence_editor_mut().unwrap().active_field = EditorField::End;
        app.editor_cycle(true);
        app.dismiss_modal();

        app.save_custom_recurrence();
        assert!(matches!(app.modals.top(), Some(Modal::CustomRecurrence(_))));
    }

    #[test]
    fn submit_appends_and_resets_form() {
        let mut app = app();
        app.cycle_repeat(1);
        add(&mut app, "first");
        add(&mut app, "second");

        let notes: Vec<_> = app.reminders().iter().map(|r| r.note.as_str()).collect();
        assert_eq!(notes, vec!["first", "second"]);
        assert_eq!(app.reminders()[0].repeat, "Daily");
        assert_eq!(app.draft().note, "");
        assert_eq!(app.draft().repeat, DEFAULT_REPEAT);
        assert_eq!(app.repeat_options.selected(), DEFAULT_REPEAT);
        assert_eq!(app.list_index, 1);
    }

    #[test]
    fn removal_waits_for_confirmation() {
        let mut app = app();
        add(&mut app, "a");
        add(&mut app, "b");
        add(&mut app, "c");
        app.list_index = 1;

        app.request_remove();
        assert_eq!(app.reminders().len(), 3);
        app.dismiss_modal();
        assert_eq!(app.reminders().len(), 3);

        app.request_remove();
        app.confirm_removal();
        let notes: Vec<_> = app.reminders().iter().map(|r| r.note.as_str()).collect();
        assert_eq!(notes, vec!["a", "c"]);
        assert!(app.modals.is_empty());
    }

    #[test]
    fn removing_last_clamps_selection() {
        let mut app = app();
        add(&mut app, "a");
        add(&mut app, "b");
        app.list_index = 1;
        app.request_remove();
        app.confirm_removal();
        assert_eq!(app.list_index, 0);

        app.request_remove();
        app.confirm_removal();
        assert!(app.reminders().is_empty());
        app.request_remove();
        assert!(app.modals.is_empty());
    }

    #[test]
    fn store_changes_mark_frame_dirty() {
        let mut app = app();
        assert!(app.take_dirty());
        assert!(!app.take_dirty());
        app.input_note_char('x');
        assert!(app.take_dirty());
        app.note_backspace();
        assert!(app.take_dirty());
        app.note_backspace();
        assert!(!app.take_dirty());
    }
}
