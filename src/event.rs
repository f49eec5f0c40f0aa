use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Input the main loop reacts to.
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
}

pub fn next_event(timeout: Duration) -> color_eyre::Result<Option<AppEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(match event::read()? {
        // Some terminals also report releases; only presses count.
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Resize(_, _) => Some(AppEvent::Resize),
        _ => None,
    })
}
