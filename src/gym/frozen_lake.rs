use rand::Rng;
use strum::VariantArray;

use crate::{
    env::{DiscreteActionSpace, DiscreteStateSpace, Environment, Report},
    error::{Error, Result},
};

/// The 4x4 map from Python [gymnasium](https://gymnasium.farama.org/)
pub const MAP_4X4: [&str; 4] = ["SFFF", "FHFH", "FFFH", "HFFG"];

/// The 8x8 map from Python [gymnasium](https://gymnasium.farama.org/)
pub const MAP_8X8: [&str; 8] = [
    "SFFFFFFF", "FFFFFFFF", "FFFHFFFF", "FFFFFHFF", "FFFHFFFF", "FHHFFFHF", "FHFFHFHF", "FFFHFFFG",
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Square {
    Frozen,
    Hole,
    Start,
    Goal,
}

impl Square {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'F' => Some(Self::Frozen),
            'H' => Some(Self::Hole),
            'S' => Some(Self::Start),
            'G' => Some(Self::Goal),
            _ => None,
        }
    }

    /// Holes and goals end the episode
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Hole | Self::Goal)
    }
}

/// Actions for the [`FrozenLake`] environment, in the order of their numeric ids
#[derive(VariantArray, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FLAction {
    Left = 0,
    Down = 1,
    Right = 2,
    Up = 3,
}

/// A very simple RL environment taken from Python [gymnasium](https://gymnasium.farama.org/)
///
/// The agent walks a grid of frozen squares from the start towards the goal, avoiding holes.
/// States are the row-major cell indices. Reaching the goal pays 1, every other transition pays 0,
/// and both holes and the goal end the episode. Walking into a wall leaves the agent in place.
///
/// On slippery ice the intended move is taken with probability 1/3, otherwise the agent slides in one
/// of the two perpendicular directions. Episodes are truncated after `max_steps` steps.
///
/// Intended for use with a [TdZeroAgent](crate::algo::TdZeroAgent)
#[derive(Debug, Clone)]
pub struct FrozenLake {
    map: Vec<Square>,
    ncol: usize,
    start: usize,
    pos: usize,
    slippery: bool,
    max_steps: u32,
    steps: u32,
    pub report: Report,
}

impl FrozenLake {
    /// The slippery 4x4 lake, truncated after 100 steps
    pub fn new() -> Self {
        Self::from_map(&MAP_4X4)
            .expect("built-in map is valid")
            .with_slippery(true)
    }

    /// The slippery 8x8 lake, truncated after 200 steps
    pub fn new_8x8() -> Self {
        Self::from_map(&MAP_8X8)
            .expect("built-in map is valid")
            .with_slippery(true)
            .with_max_steps(200)
    }

    /// Parse a lake from rows of `S` (start), `F` (frozen), `H` (hole) and `G` (goal) characters
    ///
    /// The lake is not slippery and is truncated after 100 steps.
    ///
    /// **Errors** if the rows are empty or ragged, contain other characters, or do not have exactly one
    /// start and at least one goal
    pub fn from_map<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let ncol = rows
            .first()
            .map(|r| r.as_ref().chars().count())
            .filter(|&n| n > 0)
            .ok_or_else(|| Error::InvalidMap(String::from("map is empty")))?;

        let mut map = Vec::with_capacity(rows.len() * ncol);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != ncol {
                return Err(Error::InvalidMap(format!(
                    "row {i} has {} squares, expected {ncol}",
                    row.chars().count()
                )));
            }
            for c in row.chars() {
                let square = Square::from_char(c)
                    .ok_or_else(|| Error::InvalidMap(format!("unknown square `{c}` in row {i}")))?;
                map.push(square);
            }
        }

        let mut starts = map
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s == Square::Start)
            .map(|(i, _)| i);
        let (Some(start), None) = (starts.next(), starts.next()) else {
            return Err(Error::InvalidMap(String::from(
                "map must have exactly one start",
            )));
        };
        if !map.contains(&Square::Goal) {
            return Err(Error::InvalidMap(String::from(
                "map must have at least one goal",
            )));
        }

        Ok(Self {
            map,
            ncol,
            start,
            pos: start,
            slippery: false,
            max_steps: 100,
            steps: 0,
            report: Report::new(vec!["reward", "steps"]),
        })
    }

    pub fn with_slippery(mut self, slippery: bool) -> Self {
        self.slippery = slippery;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// `(rows, columns)` of the grid
    pub fn shape(&self) -> (usize, usize) {
        (self.map.len() / self.ncol, self.ncol)
    }

    pub fn square(&self, state: usize) -> Option<Square> {
        self.map.get(state).copied()
    }

    pub fn is_terminal(&self, state: usize) -> bool {
        self.square(state).is_some_and(Square::is_terminal)
    }

    /// All hole and goal states
    pub fn terminal_states(&self) -> Vec<usize> {
        (0..self.map.len()).filter(|&s| self.is_terminal(s)).collect()
    }

    /// The current position of the agent
    pub fn position(&self) -> usize {
        self.pos
    }

    fn move_from(&self, pos: usize, action: FLAction) -> usize {
        let (nrow, ncol) = self.shape();
        let (row, col) = (pos / ncol, pos % ncol);
        let (row, col) = match action {
            FLAction::Left => (row, col.saturating_sub(1)),
            FLAction::Down => ((row + 1).min(nrow - 1), col),
            FLAction::Right => (row, (col + 1).min(ncol - 1)),
            FLAction::Up => (row.saturating_sub(1), col),
        };
        row * ncol + col
    }
}

impl Default for FrozenLake {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for FrozenLake {
    type State = usize;
    type Action = FLAction;

    fn step<R: Rng + ?Sized>(&mut self, action: Self::Action, rng: &mut R) -> (usize, f32, bool) {
        self.steps += 1;
        self.report.entry("steps").and_modify(|x| *x += 1.0);

        let action = if self.slippery {
            // one of action - 1, action, action + 1 (mod 4)
            FLAction::VARIANTS[(action as usize + 3 + rng.gen_range(0..3)) % 4]
        } else {
            action
        };

        self.pos = self.move_from(self.pos, action);

        let square = self.map[self.pos];
        let reward = if square == Square::Goal { 1.0 } else { 0.0 };
        let done = square.is_terminal() || self.steps >= self.max_steps;

        self.report.entry("reward").and_modify(|x| *x += reward as f64);

        (self.pos, reward, done)
    }

    fn reset(&mut self) -> Self::State {
        self.pos = self.start;
        self.steps = 0;
        self.pos
    }
}

impl DiscreteActionSpace for FrozenLake {
    fn actions(&self) -> Vec<Self::Action> {
        FLAction::VARIANTS.to_vec()
    }
}

impl DiscreteStateSpace for FrozenLake {
    fn num_states(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn frozen_lake_layout() {
        let env = FrozenLake::new();
        assert_eq!(env.shape(), (4, 4));
        assert_eq!(env.num_states(), 16);
        assert_eq!(env.terminal_states(), vec![5, 7, 11, 12, 15], "Holes and goal are terminal");
        assert_eq!(env.square(0), Some(Square::Start));
        assert_eq!(env.square(16), None);
        assert!(!env.is_terminal(16), "Out of range states are not terminal");
        assert_eq!(env.actions().len(), 4, "All actions are always available");

        let env = FrozenLake::new_8x8();
        assert_eq!(env.shape(), (8, 8));
        assert!(env.is_terminal(63), "Goal is terminal");
    }

    #[test]
    fn frozen_lake_actions() {
        let mut env = FrozenLake::from_map(&["SFF", "FFF", "FFG"]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(env.reset(), 0);
        assert_eq!(env.step(FLAction::Left, &mut rng), (0, 0.0, false), "Left wall blocks");
        assert_eq!(env.step(FLAction::Up, &mut rng), (0, 0.0, false), "Top wall blocks");
        assert_eq!(env.step(FLAction::Right, &mut rng), (1, 0.0, false), "Right action works");
        assert_eq!(env.step(FLAction::Down, &mut rng), (4, 0.0, false), "Down action works");
        assert_eq!(env.step(FLAction::Right, &mut rng), (5, 0.0, false));
        assert_eq!(env.step(FLAction::Right, &mut rng), (5, 0.0, false), "Right wall blocks");
        assert_eq!(env.step(FLAction::Down, &mut rng), (8, 1.0, true), "Goal pays and ends");

        let report = env.report.take();
        assert_eq!(*report.get("steps").unwrap(), 7.0, "Report steps correct");
        assert_eq!(*report.get("reward").unwrap(), 1.0, "Report reward correct");
    }

    #[test]
    fn frozen_lake_hole_ends_episode() {
        let mut env = FrozenLake::from_map(&["SH", "FG"]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        env.reset();
        assert_eq!(env.step(FLAction::Right, &mut rng), (1, 0.0, true), "Hole ends without reward");
        assert_eq!(env.reset(), 0, "Reset returns to start");
        assert_eq!(env.position(), 0);
    }

    #[test]
    fn frozen_lake_step_cap() {
        let mut env = FrozenLake::from_map(&["SFG"]).unwrap().with_max_steps(3);
        let mut rng = StdRng::seed_from_u64(0);

        env.reset();
        assert_eq!(env.step(FLAction::Left, &mut rng), (0, 0.0, false));
        assert_eq!(env.step(FLAction::Left, &mut rng), (0, 0.0, false));
        assert_eq!(
            env.step(FLAction::Left, &mut rng),
            (0, 0.0, true),
            "Episode is truncated in a non-terminal state"
        );

        env.reset();
        assert_eq!(env.step(FLAction::Left, &mut rng), (0, 0.0, false), "Reset clears the step count");
    }

    /// Step left into the wall from the start until the episode ends
    fn steps_until_truncated(env: FrozenLake) -> u32 {
        let mut env = env.with_slippery(false);
        let mut rng = StdRng::seed_from_u64(0);
        env.reset();

        let mut steps = 0;
        loop {
            steps += 1;
            let (next, reward, done) = env.step(FLAction::Left, &mut rng);
            assert_eq!((next, reward), (0, 0.0), "Agent stays at the start");
            if done {
                return steps;
            }
        }
    }

    #[test]
    fn frozen_lake_built_in_defaults() {
        let env = FrozenLake::new();
        assert!(env.slippery, "4x4 lake is slippery");
        assert_eq!(steps_until_truncated(env), 100, "4x4 lake is truncated after 100 steps");

        let env = FrozenLake::new_8x8();
        assert!(env.slippery, "8x8 lake is slippery");
        assert_eq!(steps_until_truncated(env), 200, "8x8 lake is truncated after 200 steps");

        let env = FrozenLake::from_map(&["SG"]).unwrap();
        assert!(!env.slippery, "Custom maps are not slippery");
        assert_eq!(steps_until_truncated(env), 100);
    }

    #[test]
    fn frozen_lake_slippery() {
        const TRIALS: usize = 3000;

        let mut env = FrozenLake::new();
        let mut rng = StdRng::seed_from_u64(3);
        let mut counts = [0usize; 16];

        for _ in 0..TRIALS {
            env.reset();
            env.pos = 6;
            let (next, _, _) = env.step(FLAction::Down, &mut rng);
            counts[next] += 1;
        }

        // Down from 6 slides left into 5, right into 7, or goes down to 10
        assert_eq!(counts[5] + counts[7] + counts[10], TRIALS, "Only the three slide targets occur");
        for s in [5, 7, 10] {
            let freq = counts[s] as f64 / TRIALS as f64;
            assert!((freq - 1.0 / 3.0).abs() < 0.05, "Slide to {s} has frequency {freq}");
        }
    }

    #[test]
    fn frozen_lake_invalid_maps() {
        let empty: [&str; 0] = [];
        assert!(matches!(FrozenLake::from_map(&empty), Err(Error::InvalidMap(_))));
        assert!(matches!(FrozenLake::from_map(&[""]), Err(Error::InvalidMap(_))));
        assert!(matches!(FrozenLake::from_map(&["SF", "G"]), Err(Error::InvalidMap(_))), "Ragged rows");
        assert!(matches!(FrozenLake::from_map(&["SX", "FG"]), Err(Error::InvalidMap(_))), "Unknown square");
        assert!(matches!(FrozenLake::from_map(&["FF", "FG"]), Err(Error::InvalidMap(_))), "No start");
        assert!(matches!(FrozenLake::from_map(&["SS", "FG"]), Err(Error::InvalidMap(_))), "Two starts");
        assert!(matches!(FrozenLake::from_map(&["SF", "FH"]), Err(Error::InvalidMap(_))), "No goal");

        let owned = vec![String::from("SFG")];
        assert!(FrozenLake::from_map(&owned).is_ok(), "Owned rows parse");
    }
}
