use std::{io, process, time::Duration};

use crossterm::event::{self, Event, KeyCode};
use log::warn;
use ratatui::{prelude::*, widgets::*};

use self::{
    components::{help::render_help, Component, Logs, MazeGrid},
    tui::Tui,
    util::{event_keycode, is_quit},
};
use crate::{gym::Maze, render::Render};

mod components;
mod tui;
mod util;

/// Everything drawn in one frame
struct Screen {
    grid: MazeGrid,
    logs: Logs,
    show_help: bool,
}

impl Widget for &Screen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (width, height) = self.grid.size();
        let [maze_area, log_area] =
            Layout::horizontal([Constraint::Length(width + 3), Constraint::Fill(1)]).areas(area);
        let [maze_area, _] =
            Layout::vertical([Constraint::Length(height + 2), Constraint::Fill(1)]).areas(maze_area);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Maze")
            .title_bottom(" h: help ");
        let inner = block.inner(maze_area);
        block.render(maze_area, buf);
        self.grid.render_ref(
            Rect {
                x: inner.x + 1,
                width: inner.width.saturating_sub(1),
                ..inner
            },
            buf,
        );

        self.logs.render_ref(log_area, buf);

        if self.show_help {
            render_help(area, buf);
        }
    }
}

/// A [`Render`] that draws the maze and the agent in the terminal, next to the log
///
/// The terminal stays in the alternate screen until the view is dropped.
/// Pressing `q` or `Ctrl-C` at any time restores the terminal and exits the process.
pub struct MazeView {
    terminal: Tui,
    screen: Screen,
}

impl MazeView {
    pub fn new(maze: &Maze) -> io::Result<Self> {
        Ok(Self {
            terminal: tui::init()?,
            screen: Screen {
                grid: MazeGrid::new(maze),
                logs: Logs::new(),
                show_help: false,
            },
        })
    }

    /// Handle pending key presses without blocking
    ///
    /// **Returns** `true` if the user asked to quit
    fn handle_events(&mut self, timeout: Duration) -> io::Result<bool> {
        while event::poll(timeout)? {
            let event = event::read()?;
            if is_quit(&event) {
                return Ok(true);
            }
            self.handle_event(&event);
        }
        Ok(false)
    }

    fn handle_event(&mut self, event: &Event) {
        if event_keycode(event) == Some(KeyCode::Char('h')) {
            self.screen.show_help = !self.screen.show_help;
        } else {
            self.screen.logs.handle_ui_event(event);
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        let screen = &self.screen;
        self.terminal
            .draw(|frame| frame.render_widget(screen, frame.size()))?;
        Ok(())
    }

    /// Keep showing the last frame until the user quits
    pub fn wait_for_quit(&mut self) -> io::Result<()> {
        loop {
            self.draw()?;
            if self.handle_events(Duration::from_millis(16))? {
                return Ok(());
            }
        }
    }
}

fn exit() -> ! {
    if let Err(e) = tui::restore() {
        eprintln!("Failed to restore terminal: {e}");
    }
    process::exit(0)
}

impl Render for MazeView {
    fn render(&mut self, state: usize) {
        self.screen.grid.agent = state;
        match self.handle_events(Duration::ZERO) {
            Ok(true) => exit(),
            Ok(false) => {}
            Err(e) => warn!("Failed to read terminal events: {e}"),
        }
        if let Err(e) = self.draw() {
            warn!("Failed to draw maze: {e}");
        }
    }
}

impl Drop for MazeView {
    fn drop(&mut self) {
        let _ = tui::restore();
    }
}
