pub mod app;
mod ui;

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::application::todo_store::TodoStore;
use crate::domain::repository::TodoRepository;

use self::app::App;

/// Takes over the terminal until the user quits. `notice` is shown in the
/// footer when nothing more urgent is.
pub fn run<R: TodoRepository>(store: TodoStore<R>, notice: Option<String>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, App::new(store, Local::now().date_naive()).with_notice(notice));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

fn run_app<R: TodoRepository>(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut app: App<R>) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, &app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
        if last_tick.elapsed() >= tick_rate {
            app.today = Local::now().date_naive();
            last_tick = Instant::now();
        }
    }
    tracing::info!(count = app.store.len(), "exiting");
    Ok(())
}
