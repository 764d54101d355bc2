use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::catalog::Catalog;
use crate::logging;
use crate::player::PlayerController;

mod event_loop;
mod settings;
mod startup;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, problem) = settings::load_settings();
    let log_file = logging::init(&settings.logging);
    if let Some(problem) = problem {
        warn!("{problem}, using defaults");
    }
    info!(log_file = ?log_file, "starting tunedeck");

    let catalog = Catalog::load(&settings.library);
    let state = startup::initial_state(&catalog, &settings);
    let mut app = App::new(catalog);
    let mut controller = PlayerController::new(state, AudioPlayer::new(settings.audio.clone()));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut controller);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    controller.resource().shutdown();
    info!("shut down");

    run_result
}
