use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::{App, Page};
use crate::audio::AudioResource;
use crate::config;
use crate::player::{Intent, PlaybackState, PlayerController};
use crate::ui;

/// How long to wait for a key before redrawing and draining resource events.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// What a key press asks the runtime to do.
#[derive(Debug)]
pub enum KeyAction {
    Quit,
    /// Intents to dispatch in order; empty when the key only changed `App`.
    Dispatch(Vec<Intent>),
}

/// Main terminal event loop: drains resource events, draws, and handles
/// input. Returns `Ok(())` when the user quits.
pub fn run<R: AudioResource>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlayerController<R>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        controller.sync();

        terminal.draw(|f| {
            ui::draw(
                f,
                app,
                controller.state(),
                &settings.ui,
                &settings.controls,
            )
        })?;

        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match handle_key_event(key, settings, app, controller.state()) {
                    KeyAction::Quit => break,
                    KeyAction::Dispatch(intents) => {
                        for intent in intents {
                            controller.dispatch(intent);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

fn none() -> KeyAction {
    KeyAction::Dispatch(Vec::new())
}

fn one(intent: Intent) -> KeyAction {
    KeyAction::Dispatch(vec![intent])
}

/// Map a key press to navigation changes on `app` and playback intents.
pub fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    playback: &PlaybackState,
) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }

    if app.editing {
        match key.code {
            KeyCode::Esc => app.cancel_edit(),
            KeyCode::Enter => app.finish_edit(),
            KeyCode::Backspace => app.pop_query_char(),
            KeyCode::Char(c) if !c.is_control() => app.push_query_char(c),
            _ => {}
        }
        return none();
    }

    let seek_step = f64::from(settings.controls.seek_step_percent);
    let volume_step = f64::from(settings.controls.volume_step);

    match key.code {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Char('1') => app.set_page(Page::Home),
        KeyCode::Char('2') => app.set_page(Page::Search),
        KeyCode::Char('3') => app.set_page(Page::Library),
        KeyCode::Tab => app.next_page(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('/') => app.begin_edit(),
        KeyCode::Char('f') => app.cycle_library_filter(),
        KeyCode::Char('o') => app.toggle_library_sort(),
        KeyCode::Char('v') => app.toggle_view_mode(),
        KeyCode::Enter => {
            let intents = app.activate();
            debug!(count = intents.len(), page = app.page.title(), "activate row");
            return KeyAction::Dispatch(intents);
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => return one(Intent::TogglePlay),
        KeyCode::Char('l') => return one(Intent::Next),
        KeyCode::Char('h') => return one(Intent::Previous),
        KeyCode::Char('L') => {
            return one(Intent::SetProgress(playback.progress_percent + seek_step));
        }
        KeyCode::Char('H') => {
            return one(Intent::SetProgress(playback.progress_percent - seek_step));
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            return one(Intent::SetVolume(playback.volume_percent + volume_step));
        }
        KeyCode::Char('-') => {
            return one(Intent::SetVolume(playback.volume_percent - volume_step));
        }
        KeyCode::Char('s') => return one(Intent::ToggleShuffle),
        KeyCode::Char('r') => return one(Intent::ToggleRepeat),
        _ => {}
    }

    none()
}
