use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_REPEAT: &str = "Doesn't repeat";

/// A saved reminder. Field names match the persisted JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    pub repeat: String,
    #[serde(rename = "description")]
    pub note: String,
}

/// The reminder currently being filled in on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderDraft {
    pub start_date: NaiveDate,
    pub repeat: String,
    pub note: String,
}

impl ReminderDraft {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            start_date: today,
            repeat: DEFAULT_REPEAT.to_string(),
            note: String::new(),
        }
    }

    pub fn to_reminder(&self) -> Reminder {
        Reminder {
            start_date: self.start_date,
            repeat: self.repeat.clone(),
            note: self.note.clone(),
        }
    }
}
