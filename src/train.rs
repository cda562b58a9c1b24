use std::ops::ControlFlow;

use log::{debug, info};
use rand::Rng;

use crate::{
    algo::{EpisodeSummary, TdZeroAgent},
    env::{DiscreteActionSpace, DiscreteStateSpace},
    error::Result,
    policy::Policy,
};

/// Configuration for [`train`]
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    /// The fixed number of episodes to run
    pub episodes: u32,
    /// Log a progress line every `log_every` episodes, 0 disables progress lines
    pub log_every: u32,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            episodes: 100_000,
            log_every: 10_000,
        }
    }
}

/// Totals over a training run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainSummary {
    /// Number of episodes run
    pub episodes: u32,
    /// Number of transitions over all episodes
    pub steps: u64,
    /// Undiscounted sum of rewards over all episodes
    pub reward: f64,
}

/// Run `config.episodes` episodes of `agent` in `env`, one transition at a time
///
/// There is no convergence check. After every episode `on_episode` is called with the episode index,
/// its summary and the agent; returning [`ControlFlow::Break`] stops the run early.
pub fn train<E, P, R, F>(
    agent: &mut TdZeroAgent<E, P>,
    env: &mut E,
    rng: &mut R,
    config: &TrainConfig,
    mut on_episode: F,
) -> Result<TrainSummary>
where
    E: DiscreteStateSpace + DiscreteActionSpace,
    E::Action: Clone,
    P: Policy<E::Action>,
    R: Rng + ?Sized,
    F: FnMut(u32, &EpisodeSummary, &TdZeroAgent<E, P>) -> ControlFlow<()>,
{
    let mut summary = TrainSummary::default();
    let mut window_reward = 0.0;
    let mut window_steps = 0;

    info!("Training for {} episodes", config.episodes);

    for i in 0..config.episodes {
        let episode = agent.go(env, rng)?;

        debug!(
            "Episode {}: {} steps, reward {}, final state {}",
            i, episode.steps, episode.reward, episode.final_state
        );

        summary.episodes += 1;
        summary.steps += u64::from(episode.steps);
        summary.reward += f64::from(episode.reward);
        window_reward += f64::from(episode.reward);
        window_steps += episode.steps;

        if config.log_every > 0 && (i + 1) % config.log_every == 0 {
            let n = f64::from(config.log_every);
            info!(
                "Episode {}/{}: mean reward {:.4}, mean steps {:.2}",
                i + 1,
                config.episodes,
                window_reward / n,
                f64::from(window_steps) / n
            );
            window_reward = 0.0;
            window_steps = 0;
        }

        if on_episode(i, &episode, &*agent).is_break() {
            info!("Training stopped after {} episodes", summary.episodes);
            return Ok(summary);
        }
    }

    info!(
        "Training finished: {} episodes, {} steps, total reward {}",
        summary.episodes, summary.steps, summary.reward
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{algo::TdZeroAgentConfig, env::tests::MockEnv};

    #[test]
    fn train_runs_fixed_budget() {
        let mut env = MockEnv::new(4, 1.0);
        let mut agent = TdZeroAgent::from_env(TdZeroAgentConfig::default(), &env).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let config = TrainConfig {
            episodes: 50,
            log_every: 10,
        };

        let mut seen = 0;
        let summary = train(&mut agent, &mut env, &mut rng, &config, |i, episode, _| {
            assert_eq!(i, seen, "Episodes are reported in order");
            assert_eq!(episode.steps, 3);
            seen += 1;
            ControlFlow::Continue(())
        })
        .unwrap();

        assert_eq!(summary.episodes, 50, "No early stopping");
        assert_eq!(summary.steps, 150);
        assert_eq!(summary.reward, 50.0);
        assert_eq!(agent.episode(), 50);
        assert_eq!(agent.values()[3], 0.0, "Terminal value is never updated");
        assert!(agent.values()[2] > 0.0, "Predecessor of the goal learned");
    }

    #[test]
    fn train_stops_on_break() {
        let mut env = MockEnv::new(2, 1.0);
        let mut agent = TdZeroAgent::from_env(TdZeroAgentConfig::default(), &env).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let summary = train(&mut agent, &mut env, &mut rng, &TrainConfig::default(), |i, _, _| {
            if i == 4 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();

        assert_eq!(summary.episodes, 5, "Callback can stop the run");
        assert_eq!(agent.episode(), 5);
    }
}
