//! Frozen lake grid world.
mod config;
use anyhow::{bail, Result};
pub use config::FrozenlakeConfig;
use log::debug;
use ndarray::{ArrayD, IxDyn};
use rand::distributions::{Distribution, WeightedIndex};
use rollout_core::{
    Action, BoxSpace, Discrete, Environ, EnvironState, Episode, Observation, Reward, Space,
};

const MAP: [&str; 4] = ["SFFF", "FHFH", "FFFH", "HFFG"];

/// A cell of the lake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    /// Where the agent starts.
    Start,
    /// Frozen surface, safe to walk on.
    Frozen,
    /// Falling in ends the episode without reward.
    Hole,
    /// Reaching it ends the episode with reward 1.
    Goal,
}

impl Tile {
    fn from_char(c: char) -> Self {
        match c {
            'S' => Tile::Start,
            'H' => Tile::Hole,
            'G' => Tile::Goal,
            _ => Tile::Frozen,
        }
    }
}

/// A 4x4 frozen lake.
///
/// ```text
/// SFFF
/// FHFH
/// FFFH
/// HFFG
/// ```
///
/// Actions are `0: left`, `1: down`, `2: right` and `3: up`. The observation
/// is the position `[row, col]`, and the reward is 1 on the goal and 0
/// elsewhere. An episode ends in a hole, on the goal, or after
/// [`FrozenlakeConfig::max_epoch`] moves.
///
/// On a smooth floor, moves go where they are meant to. On a rough floor,
/// the agent moves forward, turns left or turns right with probabilities
/// proportional to [`FrozenlakeConfig::slip_weights`]. The floor can be
/// switched with [`Frozenlake::change_to_rough`] and
/// [`Frozenlake::change_to_smooth`] at any time.
///
/// The return of an episode is its number of wins scaled by
/// `gamma^(len - 1)`, which favors short paths to the goal.
pub struct Frozenlake {
    state: EnvironState<Discrete, BoxSpace>,
    tiles: Vec<Vec<Tile>>,
    position: (usize, usize),
    slip: WeightedIndex<f32>,
    rough: bool,
    max_epoch: usize,
}

impl Frozenlake {
    /// Switches to a rough floor.
    pub fn change_to_rough(&mut self) {
        debug!("{}: the floor is rough", self.state.name());
        self.rough = true;
    }

    /// Switches to a smooth floor.
    pub fn change_to_smooth(&mut self) {
        debug!("{}: the floor is smooth", self.state.name());
        self.rough = false;
    }

    /// `true` if the floor is rough.
    pub fn is_rough(&self) -> bool {
        self.rough
    }

    /// Current position `(row, col)`.
    pub fn position(&self) -> (usize, usize) {
        self.position
    }

    /// Tile at the current position.
    pub fn tile(&self) -> Tile {
        self.tiles[self.position.0][self.position.1]
    }

    fn n_rows(&self) -> usize {
        self.tiles.len()
    }

    fn n_cols(&self) -> usize {
        self.tiles[0].len()
    }

    /// The direction actually taken for the intended one.
    fn direction(&mut self, intended: usize) -> usize {
        if !self.rough {
            return intended;
        }
        // Directions run counterclockwise: left, down, right, up
        match self.slip.sample(self.state.rng_mut()) {
            0 => intended,
            1 => (intended + 1) % 4,
            _ => (intended + 3) % 4,
        }
    }

    fn obs(&self) -> Observation {
        Observation::from_slice(&[self.position.0 as f32, self.position.1 as f32])
    }
}

impl Environ for Frozenlake {
    type Config = FrozenlakeConfig;
    type ActSpace = Discrete;
    type ObsSpace = BoxSpace;

    fn build(config: &Self::Config) -> Result<Self> {
        let slip = match WeightedIndex::new(config.slip_weights.iter().copied()) {
            Ok(slip) => slip,
            Err(e) => bail!("Invalid slip weights {:?}: {}", config.slip_weights, e),
        };
        let tiles: Vec<Vec<Tile>> = MAP
            .iter()
            .map(|row| row.chars().map(Tile::from_char).collect())
            .collect();
        let high = vec![(tiles.len() - 1) as f32, (tiles[0].len() - 1) as f32];
        let observation_space = BoxSpace::new(
            ArrayD::zeros(IxDyn(&[2])),
            ArrayD::from_shape_vec(IxDyn(&[2]), high)?,
        );
        let state =
            EnvironState::with_spaces(&config.environ, Discrete::new(4), observation_space)?;

        Ok(Self {
            state,
            tiles,
            position: (0, 0),
            slip,
            rough: config.rough,
            max_epoch: config.max_epoch,
        })
    }

    fn state(&self) -> &EnvironState<Discrete, BoxSpace> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EnvironState<Discrete, BoxSpace> {
        &mut self.state
    }

    fn on_reset(&mut self) -> Result<()> {
        self.position = (0, 0);
        Ok(())
    }

    fn update(&mut self, act: &Action) -> Result<Observation> {
        self.state.action_space()?.check(act.value())?;
        let direction = self.direction(act.index().unwrap_or(0));
        let (row, col) = self.position;
        self.position = match direction {
            0 => (row, col.saturating_sub(1)),
            1 => ((row + 1).min(self.n_rows() - 1), col),
            2 => (row, (col + 1).min(self.n_cols() - 1)),
            _ => (row.saturating_sub(1), col),
        };
        Ok(self.obs())
    }

    fn get_reward(&self, obs: &Observation) -> Reward {
        let pos = obs.to_vec();
        let tile = match pos.as_slice() {
            [row, col] => self
                .tiles
                .get(*row as usize)
                .and_then(|r| r.get(*col as usize)),
            _ => None,
        };
        match tile {
            Some(Tile::Goal) => Reward::new(1.0),
            _ => Reward::zero(),
        }
    }

    fn is_complete(&self, epoch: usize) -> bool {
        matches!(self.tile(), Tile::Hole | Tile::Goal) || epoch >= self.max_epoch
    }

    fn discount_reward(&self, episode: &Episode, gamma: f32) -> f32 {
        gamma.powi(episode.len().saturating_sub(1) as i32)
    }
}
