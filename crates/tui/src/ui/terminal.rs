use std::io::{Stdout, stdout};

use crossterm::{
    cursor::{Hide, Show},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::error::Result;

pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

pub fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, Hide)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Puts the terminal back even if one of the steps fails; the first error wins.
pub fn restore_terminal(terminal: &mut AppTerminal) -> Result<()> {
    let raw = disable_raw_mode();
    let screen = crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen, Show);
    raw?;
    screen?;
    Ok(())
}
