use std::{
    io::{self, stdout, Stdout},
    panic,
};

use crossterm as ct;
use ct::{
    cursor::{Hide, Show},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

/// The terminal type the maze is drawn on
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Switch to the alternate screen in raw mode
pub fn init() -> io::Result<Tui> {
    init_panic_hook();
    ct::execute!(stdout(), EnterAlternateScreen, Hide)?;
    enable_raw_mode()?;
    Terminal::new(CrosstermBackend::new(stdout()))
}

/// Restore the terminal to its original state
pub fn restore() -> io::Result<()> {
    ct::execute!(stdout(), LeaveAlternateScreen, Show)?;
    disable_raw_mode()?;
    Ok(())
}

/// Restore the terminal before the default panic message is printed
fn init_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}
