pub mod tabular;

pub use tabular::q_table::{QTableAgent, QTableAgentConfig};
