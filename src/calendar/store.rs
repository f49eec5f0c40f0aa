use chrono::NaiveDate;

use super::reminder::{Reminder, ReminderDraft, DEFAULT_REPEAT};
use super::storage::Storage;

/// Storage key holding the whole reminder list.
pub const REMINDERS_KEY: &str = "reminders";

/// Operations accepted by [`ReminderStore::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetStartDate(NaiveDate),
    SetRecurrence(String),
    SetNote(String),
    Commit,
    Remove(usize),
}

/// What changed after an action was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Draft,
    Committed { index: usize },
    Removed { index: usize },
}

type Subscriber = Box<dyn FnMut(&StoreChange)>;

/// Owns the reminder being edited and the saved list. The list is written
/// back to storage in full after every mutation.
pub struct ReminderStore {
    storage: Box<dyn Storage>,
    reminders: Vec<Reminder>,
    draft: ReminderDraft,
    today: NaiveDate,
    subscribers: Vec<Subscriber>,
}

impl ReminderStore {
    pub fn load(storage: Box<dyn Storage>, today: NaiveDate) -> Self {
        let reminders = match storage.load(REMINDERS_KEY) {
            Ok(Some(content)) => match serde_json::from_str::<Vec<Reminder>>(&content) {
                Ok(list) => list,
                Err(e) => {
                    tracing::warn!(error = %e, "saved reminders unreadable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read saved reminders, starting empty");
                Vec::new()
            }
        };
        tracing::info!(count = reminders.len(), "loaded reminders");

        Self {
            storage,
            reminders,
            draft: ReminderDraft::new(today),
            today,
            subscribers: Vec::new(),
        }
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn draft(&self) -> &ReminderDraft {
        &self.draft
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&StoreChange) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Move the default start date forward, e.g. after midnight.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(?action, "dispatch");
        let change = match action {
            Action::SetStartDate(date) => {
                self.draft.start_date = date;
                Some(StoreChange::Draft)
            }
            Action::SetRecurrence(repeat) => {
                self.draft.repeat = repeat;
                Some(StoreChange::Draft)
            }
            Action::SetNote(note) => {
                self.draft.note = note;
                Some(StoreChange::Draft)
            }
            Action::Commit => Some(self.commit()),
            Action::Remove(index) => self.remove(index),
        };

        if let Some(change) = change {
            for sub in &mut self.subscribers {
                sub(&change);
            }
        }
    }

    fn commit(&mut self) -> StoreChange {
        self.reminders.push(self.draft.to_reminder());
        let index = self.reminders.len() - 1;
        tracing::info!(index, date = %self.draft.start_date, "reminder added");
        self.persist();

        self.draft.start_date = self.today;
        self.draft.note.clear();
        self.draft.repeat = DEFAULT_REPEAT.to_string();

        StoreChange::Committed { index }
    }

    fn remove(&mut self, index: usize) -> Option<StoreChange> {
        if index >= self.reminders.len() {
            tracing::warn!(index, len = self.reminders.len(), "remove index out of range");
            return None;
        }
        self.reminders.remove(index);
        tracing::info!(index, "reminder removed");
        self.persist();
        Some(StoreChange::Removed { index })
    }

    // Write failures are logged only; the in-memory list stays authoritative.
    fn persist(&mut self) {
        let result = serde_json::to_string(&self.reminders)
            .map_err(Into::into)
            .and_then(|json| self.storage.save(REMINDERS_KEY, &json));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to persist reminders");
        }
    }
}
