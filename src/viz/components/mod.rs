pub mod grid;
pub mod help;
pub mod log;

use crossterm::event::Event;
pub use grid::MazeGrid;
pub use log::Logs;
use ratatui::widgets::WidgetRef;

pub trait Component: WidgetRef {
    fn handle_ui_event(&mut self, event: &Event) -> bool;
}
