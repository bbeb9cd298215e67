//! Error types for maze construction

use thiserror::Error;

/// Configuration errors, reported when a [`Maze`](crate::gym::Maze) is built
///
/// Training and evaluation never fail once the maze exists, so this is the only error type in the crate.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid maze dimensions {rows}x{cols}: both must be non-zero")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("maze has a single cell: start and terminal states would coincide")]
    DegenerateMaze,

    #[error("reward table has {got} entries, expected {expected} (rows * cols)")]
    RewardTableSize { expected: usize, got: usize },

    #[error("reward {value} for state {state} is not finite")]
    NonFiniteReward { state: usize, value: f32 },
}

pub type Result<T> = std::result::Result<T, Error>;
