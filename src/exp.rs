use crate::env::Environment;

/// Represents a single experience or transition in the environment
///
/// Experiences are consumed by the update as soon as they are observed and never stored.
pub struct Exp<E: Environment> {
    /// The state of the environment before taking the action
    pub state: E::State,
    /// The action taken in the given state
    pub action: E::Action,
    /// The reward received after taking the action
    pub reward: f32,
    /// The state of the environment after the action is taken
    pub next_state: E::State,
    /// Whether the episode ended with this transition
    pub done: bool,
}
