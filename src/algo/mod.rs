/// Tabular methods
pub mod tabular;

pub use tabular::td_zero::{EpisodeSummary, TdZeroAgent, TdZeroAgentConfig};
