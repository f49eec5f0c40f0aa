mod app;
mod calendar;
mod components;
mod config;
mod event;
mod theme;
mod tui;

use std::path::Path;
use std::time::Duration;

use app::{App, Focus, Modal};
use calendar::{FileStorage, ReminderStore};
use chrono::Local;
use color_eyre::Result;
use config::Config;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::AppEvent;
use ratatui::layout::{Constraint, Layout, Rect};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;

    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let data_dir = config.data_dir()?;
    let _log_guard = init_logging(&config, &data_dir);
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "using default config");
    }
    theme::init(config.theme.to_theme());

    let today = Local::now().date_naive();
    let storage = FileStorage::new(&data_dir);
    tracing::info!(data_dir = %storage.dir().display(), "starting");
    let store = ReminderStore::load(Box::new(storage), today);
    let mut app = App::new(store, today);

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    result
}

/// Log to a file in the data directory; the terminal belongs to the UI.
fn init_logging(config: &Config, data_dir: &Path) -> Option<WorkerGuard> {
    std::fs::create_dir_all(data_dir).ok()?;
    let appender = tracing_appender::rolling::never(data_dir, "reminder-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let fallback = config.log_filter.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;
    Some(guard)
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        app.refresh_today(Local::now().date_naive());

        if app.take_dirty() {
            terminal.draw(|frame| render(frame, app))?;
        }

        match event::next_event(Duration::from_millis(250))? {
            Some(AppEvent::Key(key)) => {
                handle_key(app, key);
                app.mark_dirty();
            }
            Some(AppEvent::Resize) => app.mark_dirty(),
            None => {}
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // Clear status message on any key
    app.status_message = None;

    if app.modals.is_empty() {
        handle_form_input(app, key.code);
        return;
    }

    match app.modals.top() {
        Some(Modal::DatePicker(_)) => handle_date_picker_input(app, key.code),
        Some(Modal::CustomRecurrence(_)) => handle_editor_input(app, key.code),
        Some(Modal::ConfirmRemoval { .. }) => handle_confirm_input(app, key.code),
        Some(Modal::Help) => {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                app.dismiss_modal();
            }
        }
        None => {}
    }
}

fn handle_form_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.quit(),
        KeyCode::F(1) => app.show_help(),
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        _ => match app.focus {
            Focus::Date => match code {
                KeyCode::Enter | KeyCode::Char(' ') => app.open_start_date_picker(),
                KeyCode::Char('?') => app.show_help(),
                _ => {}
            },
            Focus::Repeat => match code {
                KeyCode::Left | KeyCode::Char('h') => app.cycle_repeat(-1),
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => app.cycle_repeat(1),
                KeyCode::Enter => app.open_custom_recurrence(),
                KeyCode::Char('?') => app.show_help(),
                _ => {}
            },
            Focus::Note => match code {
                KeyCode::Char(c) => app.input_note_char(c),
                KeyCode::Backspace => app.note_backspace(),
                KeyCode::Enter => app.focus_next(),
                _ => {}
            },
            Focus::Submit => match code {
                KeyCode::Enter | KeyCode::Char(' ') => app.submit(),
                KeyCode::Char('?') => app.show_help(),
                _ => {}
            },
            Focus::List => match code {
                KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
                KeyCode::Delete | KeyCode::Char('d') => app.request_remove(),
                KeyCode::Char('?') => app.show_help(),
                _ => {}
            },
        },
    }
}

fn handle_date_picker_input(app: &mut App, code: KeyCode) {
    let today = app.today;
    match code {
        KeyCode::Esc => app.dismiss_modal(),
        KeyCode::Enter | KeyCode::Char(' ') => app.pick_date(),
        _ => {
            let Some(picker) = app.date_picker_mut() else {
                return;
            };
            match code {
                KeyCode::Left | KeyCode::Char('h') => picker.move_days(-1),
                KeyCode::Right | KeyCode::Char('l') => picker.move_days(1),
                KeyCode::Up | KeyCode::Char('k') => picker.move_days(-7),
                KeyCode::Down | KeyCode::Char('j') => picker.move_days(7),
                KeyCode::PageUp | KeyCode::Char('[') => picker.move_months(-1),
                KeyCode::PageDown | KeyCode::Char(']') => picker.move_months(1),
                KeyCode::Char('t') => picker.go_to(today),
                _ => {}
            }
        }
    }
}

fn handle_editor_input(app: &mut App, code: KeyCode) {
    use components::recurrence_editor::EditorField;

    match code {
        KeyCode::Esc => app.dismiss_modal(),
        KeyCode::Left => app.editor_cycle(false),
        KeyCode::Right => app.editor_cycle(true),
        KeyCode::Enter => {
            let on_end_date = app
                .recurrence_editor_mut()
                .is_some_and(|e| e.active_field == EditorField::EndDate);
            if on_end_date {
                app.open_end_date_picker();
            } else {
                app.save_custom_recurrence();
            }
        }
        _ => {
            let Some(editor) = app.recurrence_editor_mut() else {
                return;
            };
            match code {
                KeyCode::Tab | KeyCode::Down => editor.next_field(),
                KeyCode::BackTab | KeyCode::Up => editor.prev_field(),
                KeyCode::Char(' ') => editor.toggle_weekday(),
                KeyCode::Backspace => editor.backspace(),
                KeyCode::Char(c) => editor.input_char(c),
                _ => {}
            }
        }
    }
}

fn handle_confirm_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('y') | KeyCode::Enter => app.confirm_removal(),
        KeyCode::Char('n') | KeyCode::Esc => app.dismiss_modal(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    // Main layout: content + status bar
    let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

    render_main(frame, layout[0], app);

    // Popups, bottom of the stack first so nested ones draw on top
    for modal in app.modals.iter() {
        match modal {
            Modal::DatePicker(state) => {
                components::DatePicker::render(frame, area, state, app.today)
            }
            Modal::CustomRecurrence(state) => {
                components::RecurrenceEditor::render(frame, area, state)
            }
            Modal::ConfirmRemoval { index } => {
                if let Some(reminder) = app.reminders().get(*index) {
                    components::ConfirmDialog::render(frame, area, reminder);
                }
            }
            Modal::Help => components::Help::render(frame, area),
        }
    }

    components::StatusBar::render(
        frame,
        layout[1],
        app.focus,
        app.status_message.as_deref(),
    );
}

fn render_main(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let (form_area, list_area) = if area.width >= 90 {
        let content =
            Layout::horizontal([Constraint::Length(48), Constraint::Min(30)]).split(area);
        (content[0], content[1])
    } else {
        let content = Layout::vertical([Constraint::Length(9), Constraint::Min(3)]).split(area);
        (content[0], content[1])
    };

    components::ReminderForm::render(
        frame,
        form_area,
        app.draft(),
        &app.repeat_options,
        app.focus,
    );
    components::ReminderList::render(
        frame,
        list_area,
        app.reminders(),
        app.list_index,
        app.focus == Focus::List,
    );
}
