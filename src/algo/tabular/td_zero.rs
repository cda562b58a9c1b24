use std::{marker::PhantomData, ops::Bound};

use log::{info, trace};
use rand::Rng;

use crate::{
    ds::ValueTable,
    ensure_interval,
    env::{DiscreteActionSpace, DiscreteStateSpace},
    error::{Error, Result},
    exp::Exp,
    policy::{Policy, UniformRandom},
};

/// Configuration for the [`TdZeroAgent`]
#[derive(Debug, Clone, PartialEq)]
pub struct TdZeroAgentConfig {
    /// The learning rate - must be in the interval `(0, 1]`
    pub alpha: f32,
    /// The discount factor - must be in the interval `[0, 1]`
    pub gamma: f32,
}

impl Default for TdZeroAgentConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
        }
    }
}

/// Statistics of a single episode run by [`TdZeroAgent::go`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpisodeSummary {
    /// Number of transitions in the episode
    pub steps: u32,
    /// Undiscounted sum of rewards
    pub reward: f32,
    /// The state the episode ended in
    pub final_state: usize,
    /// Mean magnitude of the TD errors of the episode's updates
    pub mean_abs_td_error: f32,
}

/// A tabular TD(0) agent evaluating a fixed policy
///
/// The agent estimates the state value function of its policy (by default the [`UniformRandom`] policy)
/// by applying the one-step temporal difference update after every transition:
///
/// V(s) ← V(s) + α (r + γ V(s') - V(s))
///
/// It never improves its policy. Values of terminal states stay at zero as long as the environment
/// ends the episode on entering them, since no transition ever originates from a terminal state.
///
/// ### Generics
/// - `E` - The [`Environment`](crate::env::Environment) in which the agent will learn
///     - The state space must be discrete and indexed by `usize` because a value is recorded for each state
/// - `P` - The [`Policy`] being evaluated
pub struct TdZeroAgent<E, P = UniformRandom>
where
    E: DiscreteStateSpace + DiscreteActionSpace,
    E::Action: Clone,
    P: Policy<E::Action>,
{
    values: ValueTable,
    policy: P,
    alpha: f32,   // learning rate
    gamma: f32,   // discount factor
    episode: u32, // completed episodes
    phantom: PhantomData<E>,
}

impl<E> TdZeroAgent<E>
where
    E: DiscreteStateSpace + DiscreteActionSpace,
    E::Action: Clone,
{
    /// Initialize a new `TdZeroAgent` evaluating the uniform random policy over `num_states` states
    ///
    /// **Errors** if `alpha` is not in `(0, 1]`, `gamma` is not in `[0, 1]`, or `num_states` is 0
    pub fn new(config: TdZeroAgentConfig, num_states: usize) -> Result<Self> {
        Self::with_policy(config, num_states, UniformRandom)
    }

    /// Initialize a new `TdZeroAgent` with a value table sized to the environment's state space
    pub fn from_env(config: TdZeroAgentConfig, env: &E) -> Result<Self> {
        Self::new(config, env.num_states())
    }
}

impl<E, P> TdZeroAgent<E, P>
where
    E: DiscreteStateSpace + DiscreteActionSpace,
    E::Action: Clone,
    P: Policy<E::Action>,
{
    /// Initialize a new `TdZeroAgent` evaluating `policy`
    pub fn with_policy(config: TdZeroAgentConfig, num_states: usize, policy: P) -> Result<Self> {
        ensure_interval!(config.alpha, (Bound::Excluded(0.0), Bound::Included(1.0)))?;
        ensure_interval!(config.gamma, 0.0..=1.0)?;
        let values = ValueTable::new(num_states)?;

        info!(
            "TD(0) agent over {} states with alpha = {}, gamma = {}",
            num_states, config.alpha, config.gamma
        );

        Ok(Self {
            values,
            policy,
            alpha: config.alpha,
            gamma: config.gamma,
            episode: 0,
            phantom: PhantomData,
        })
    }

    /// The current state value estimates
    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    /// The number of completed episodes
    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// Choose an action according to the evaluated policy
    pub fn select_action<R: Rng + ?Sized>(&self, env: &E, rng: &mut R) -> Result<E::Action> {
        self.policy
            .choose(env.actions(), rng)
            .ok_or(Error::NoActions)
    }

    /// Apply the TD(0) update for a transition `state -> next_state` paying `reward`
    ///
    /// **Returns** the TD error `reward + gamma * V(next_state) - V(state)` measured before the update
    ///
    /// **Errors** if either state is outside of the value table, leaving the table untouched
    pub fn update(&mut self, state: usize, reward: f32, next_state: usize) -> Result<f32> {
        let value = self.values.get(state)?;
        let next_value = self.values.get(next_state)?;
        let td_error = reward + self.gamma * next_value - value;
        self.values.set(state, value + self.alpha * td_error)?;
        Ok(td_error)
    }

    /// Learn from a given experience and update the table
    pub fn learn(&mut self, experience: &Exp<E>) -> Result<f32> {
        self.update(experience.state, experience.reward, experience.next_state)
    }

    /// Run the agent in the given environment for one episode, updating after every transition
    pub fn go<R: Rng + ?Sized>(&mut self, env: &mut E, rng: &mut R) -> Result<EpisodeSummary> {
        let mut summary = EpisodeSummary::default();
        let mut abs_td_error = 0.0;
        let mut state = env.reset();

        loop {
            let action = self.select_action(env, rng)?;
            let (next_state, reward, done) = env.step(action.clone(), rng);
            let experience = Exp {
                state,
                action,
                reward,
                next_state,
                done,
            };
            let td_error = self.learn(&experience)?;

            trace!(
                "{} -> {} (reward = {}, td error = {})",
                experience.state,
                experience.next_state,
                experience.reward,
                td_error
            );

            summary.steps += 1;
            summary.reward += experience.reward;
            abs_td_error += td_error.abs();
            state = experience.next_state;

            if experience.done {
                break;
            }
        }

        summary.final_state = state;
        summary.mean_abs_td_error = abs_td_error / summary.steps as f32;
        self.episode += 1;

        Ok(summary)
    }
}
