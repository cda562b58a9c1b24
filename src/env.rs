use std::{
    collections::{hash_map::Entry, HashMap},
    ops::Index,
};

use rand::{seq::IteratorRandom, Rng};

/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// This base trait represents the common case of a discrete-time MDP with one agent.
/// Environments are injected into agents and training loops rather than owned by them,
/// and draw any randomness from the source handed to [`step`](Environment::step).
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// A representation of an action that an agent can take to affect the environment
    type Action;

    /// Update the environment in response to an action taken by an agent
    ///
    /// **Returns** `(next_state, reward, done)`, where `done` signals the end of the episode,
    /// either because a terminal state was reached or because the environment truncated it
    fn step<R: Rng + ?Sized>(&mut self, action: Self::Action, rng: &mut R) -> (Self::State, f32, bool);

    /// Reset the environment to an initial state
    ///
    /// **Returns** the state
    fn reset(&mut self) -> Self::State;
}

/// An environment with a finite set of actions
pub trait DiscreteActionSpace: Environment {
    /// Get the available actions
    ///
    /// The returned vec should never be empty, instead specify an action that represents doing nothing if necessary.
    fn actions(&self) -> Vec<Self::Action>;

    /// Draw an action uniformly from [`actions`](DiscreteActionSpace::actions)
    ///
    /// **Returns** `None` if no action is available
    fn random_action<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Self::Action> {
        self.actions().into_iter().choose(rng)
    }
}

/// An environment whose states are the indices `0..num_states()`
pub trait DiscreteStateSpace: Environment<State = usize> {
    /// The number of states in the environment
    fn num_states(&self) -> usize;
}

/// Per-episode metrics collected by an environment
///
/// Every key starts at zero and is reset to zero when the report is [taken](Report::take).
#[derive(Debug, Clone)]
pub struct Report {
    keys: Vec<&'static str>,
    map: HashMap<&'static str, f64>,
}

impl Report {
    pub fn new(keys: Vec<&'static str>) -> Self {
        let map = keys.iter().map(|&k| (k, 0.0)).collect();
        Self { keys, map }
    }

    /// The metric names in the order they were registered
    pub fn keys(&self) -> &[&'static str] {
        &self.keys
    }

    pub fn entry(&mut self, key: &'static str) -> Entry<'_, &'static str, f64> {
        self.map.entry(key)
    }

    pub fn get(&self, key: &str) -> Option<&f64> {
        self.map.get(key)
    }

    /// The current metric values in the order of [`keys`](Report::keys)
    pub fn values(&self) -> Vec<f64> {
        self.keys.iter().map(|k| self.map[k]).collect()
    }

    /// Take the collected metrics, resetting every value to zero
    pub fn take(&mut self) -> HashMap<&'static str, f64> {
        let fresh = self.keys.iter().map(|&k| (k, 0.0)).collect();
        std::mem::replace(&mut self.map, fresh)
    }
}

impl Index<&str> for Report {
    type Output = f64;

    fn index(&self, key: &str) -> &Self::Output {
        &self.map[key]
    }
}
