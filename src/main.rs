// startdeck: a start page in the terminal.
// Sets up the terminal, builds the app around the persistent store, and
// restores the terminal on the way out.

mod app;
mod error;
mod refresh;
mod settings;
mod sources;
mod store;
mod ui;
mod widgets;

use std::io;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use crate::app::App;
use crate::store::Store;

#[tokio::main]
async fn main() -> io::Result<()> {
    let store = Store::open();
    let mut app = match App::new(store) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("startdeck: {err}");
            std::process::exit(1);
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal).await;

    // Restore the terminal even when the loop errored.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("startdeck: {err}");
        std::process::exit(1);
    }
    Ok(())
}
