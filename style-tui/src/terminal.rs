//! Raw-mode terminal session for the shopping screens
//!
//! The screens draw on the alternate screen with the cursor hidden; every
//! exit path, panics included, puts the shell back the way it was.

use std::io::{self, Stdout};

use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::Result;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Leave raw mode and the alternate screen, showing the cursor again
fn leave_screen() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)
}

/// Switch stdout to raw mode on the alternate screen
///
/// Raw mode is undone if the alternate screen can't be entered.
pub fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, cursor::Hide) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;
    Ok(terminal)
}

/// End the session; the terminal is unusable for drawing afterwards
pub fn restore_terminal(_terminal: Tui) -> Result<()> {
    leave_screen()?;
    Ok(())
}

/// Restore the shell before the panic message prints
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |info| {
        let _ = leave_screen();
        previous(info);
    }));
}
