use thiserror::Error;

/// Errors produced while configuring or training an agent
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A hyperparameter was outside of its valid interval
    #[error("Invalid value for `{name}`: {value}. Must be in the interval {range}.")]
    InvalidHyperparameter {
        name: &'static str,
        value: f32,
        range: String,
    },

    /// A state index did not address an entry of the value table
    #[error("State index {index} is out of range for a value table with {len} states")]
    StateOutOfRange { index: usize, len: usize },

    /// A value table must hold at least one state
    #[error("The state space is empty")]
    EmptyStateSpace,

    /// The environment offered no action to choose from
    #[error("The environment offered no actions")]
    NoActions,

    /// A gridworld map could not be parsed
    #[error("Invalid map: {0}")]
    InvalidMap(String),
}

pub type Result<T> = std::result::Result<T, Error>;
