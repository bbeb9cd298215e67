pub mod maze;

pub use maze::{Action, Maze, MazeConfig, Square};
