pub mod grid;
pub mod recurrence;
pub mod reminder;
pub mod repeat_options;
pub mod storage;
pub mod store;

pub use grid::{generate_month_grid, DateCell};
pub use recurrence::{RecurrenceConfig, RecurrenceDraft, RecurrenceError};
pub use reminder::{Reminder, DEFAULT_REPEAT};
pub use repeat_options::RepeatOptions;
pub use storage::FileStorage;
pub use store::{Action, ReminderStore, StoreChange};
