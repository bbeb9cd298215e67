use ratatui::{prelude::*, widgets::WidgetRef};

use crate::gym::{Maze, Square};

const CELL_WIDTH: u16 = 6;
const CELL_HEIGHT: u16 = 3;

/// The maze drawn as colored cells, with the agent as a red token
pub struct MazeGrid {
    rows: usize,
    cols: usize,
    squares: Vec<Square>,
    pub agent: usize,
}

impl MazeGrid {
    pub fn new(maze: &Maze) -> Self {
        Self {
            rows: maze.rows(),
            cols: maze.cols(),
            squares: (0..maze.num_states()).map(|s| maze.square(s)).collect(),
            agent: maze.start(),
        }
    }

    /// Terminal cells needed to show the whole grid
    pub fn size(&self) -> (u16, u16) {
        (
            self.cols as u16 * CELL_WIDTH,
            self.rows as u16 * CELL_HEIGHT,
        )
    }

    fn color(square: Square) -> Color {
        match square {
            Square::Start => Color::Blue,
            Square::Goal => Color::Green,
            Square::Trap => Color::Black,
            Square::Bonus => Color::Yellow,
            Square::Open => Color::White,
        }
    }
}

impl WidgetRef for MazeGrid {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        for (state, &square) in self.squares.iter().enumerate() {
            let (row, col) = (state / self.cols, state % self.cols);
            let cell = Rect::new(
                area.x + col as u16 * CELL_WIDTH,
                area.y + row as u16 * CELL_HEIGHT,
                CELL_WIDTH,
                CELL_HEIGHT,
            )
            .intersection(area);
            if cell.is_empty() {
                continue;
            }

            // one column and one row of padding keep neighbouring cells apart
            let inner = Rect::new(
                cell.x,
                cell.y,
                cell.width.saturating_sub(1),
                cell.height.saturating_sub(1),
            );
            buf.set_style(inner, Style::default().bg(Self::color(square)));

            if state == self.agent && inner.height > 0 {
                let x = inner.x + inner.width / 2;
                let y = inner.y + inner.height / 2;
                buf.set_string(
                    x,
                    y,
                    "●",
                    Style::default().fg(Color::Red).bg(Self::color(square)),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_agent_on_its_cell() {
        let maze = Maze::default();
        let mut grid = MazeGrid::new(&maze);
        grid.agent = 7;

        let (width, height) = grid.size();
        assert_eq!((width, height), (36, 18), "Grid size correct");

        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        grid.render_ref(area, &mut buf);

        // state 7 is row 1, col 1
        assert_eq!(buf.get(8, 4).symbol(), "●", "Agent drawn at the cell center");
        assert_eq!(buf.get(8, 4).bg, Color::Black, "Agent stands on a trap");
        assert_eq!(buf.get(0, 0).bg, Color::Blue, "Start cell");
        assert_eq!(buf.get(30, 15).bg, Color::Green, "Goal cell");
        assert_eq!(buf.get(5, 0).bg, Color::Reset, "Padding column");
    }
}
