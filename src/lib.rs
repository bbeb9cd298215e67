/// Learning algorithms
pub mod algo;

/// Data structures
pub mod ds;

/// Environment
pub mod env;

/// Errors reported when building a maze
pub mod error;

/// Exploration policies
pub mod exploration;

/// Mazes to learn in
pub mod gym;

/// Transitions
pub mod memory;

/// Hooks for showing the agent's progress
pub mod render;

/// Terminal visualization
#[cfg(feature = "viz")]
pub mod viz;

mod util;

pub use error::{Error, Result};
