use strum::{EnumCount, EnumIter, VariantArray};

use crate::{
    env::{DiscreteActionSpace, Environment, Report},
    error::{Error, Result},
};

/// A move between orthogonally adjacent cells
#[derive(EnumIter, EnumCount, VariantArray, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Action {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

/// Classification of a cell by its position and reward
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Square {
    Start,
    Goal,
    Trap,
    Bonus,
    Open,
}

/// Layout and reward table of a [`Maze`]
///
/// Rewards are indexed by the destination state of a transition, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeConfig {
    pub rows: usize,
    pub cols: usize,
    pub rewards: Vec<f32>,
}

impl Default for MazeConfig {
    /// The 6x6 reference maze: two walls of traps, a small bonus at (4, 4), and the exit at (5, 5)
    fn default() -> Self {
        #[rustfmt::skip]
        let rewards = vec![
            0.0, -10.0, 0.0,   0.0,   0.0,  0.0,
            0.0, -10.0, 0.0,   0.0, -10.0,  0.0,
            0.0, -10.0, 0.0, -10.0,   0.0,  0.0,
            0.0, -10.0, 0.0, -10.0,   0.0,  0.0,
            0.0, -10.0, 0.0, -10.0,   1.0,  0.0,
            0.0,   0.0, 0.0, -10.0,   0.0, 50.0,
        ];
        Self {
            rows: 6,
            cols: 6,
            rewards,
        }
    }
}

/// A grid maze with a fixed start in the top-left corner and a fixed exit in the bottom-right corner
///
/// States are cell indices `row * cols + col`. Actions pointing off the grid are not offered by
/// [`valid_actions`](Maze::valid_actions), and taking one anyway leaves the agent in place.
///
/// Intended for use with a [QTableAgent](crate::algo::tabular::q_table::QTableAgent)
#[derive(Debug, Clone)]
pub struct Maze {
    rows: usize,
    cols: usize,
    rewards: Vec<f32>,
    pos: usize,
    pub report: Report,
}

impl Maze {
    /// Build a maze from a configuration
    ///
    /// Fails if either dimension is zero, if the grid has a single cell, or if the reward table
    /// does not hold exactly one finite reward per cell.
    pub fn new(config: MazeConfig) -> Result<Self> {
        let MazeConfig {
            rows,
            cols,
            rewards,
        } = config;

        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        if rows * cols < 2 {
            return Err(Error::DegenerateMaze);
        }
        if rewards.len() != rows * cols {
            return Err(Error::RewardTableSize {
                expected: rows * cols,
                got: rewards.len(),
            });
        }
        if let Some((state, &value)) = rewards.iter().enumerate().find(|(_, r)| !r.is_finite()) {
            return Err(Error::NonFiniteReward { state, value });
        }

        Ok(Self {
            rows,
            cols,
            rewards,
            pos: 0,
            report: Report::new(vec!["reward", "steps"]),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn num_states(&self) -> usize {
        self.rows * self.cols
    }

    pub const fn start(&self) -> usize {
        0
    }

    pub fn terminal(&self) -> usize {
        self.num_states() - 1
    }

    /// The state the agent currently occupies
    pub fn position(&self) -> usize {
        self.pos
    }

    /// `(row, col)` of a state
    pub fn coords(&self, state: usize) -> (usize, usize) {
        (state / self.cols, state % self.cols)
    }

    /// Actions that keep the agent on the grid from `state`
    pub fn valid_actions(&self, state: usize) -> Vec<Action> {
        debug_assert!(state < self.num_states(), "State {state} is out of range");
        let (row, col) = self.coords(state);

        Action::VARIANTS
            .iter()
            .copied()
            .filter(|action| match action {
                Action::Up => row != 0,
                Action::Down => row != self.rows - 1,
                Action::Left => col != 0,
                Action::Right => col != self.cols - 1,
            })
            .collect()
    }

    /// The state reached by taking `action` in `state`, or `state` itself if the action points off the grid
    pub fn next_state(&self, state: usize, action: Action) -> usize {
        if !self.valid_actions(state).contains(&action) {
            return state;
        }

        match action {
            Action::Up => state - self.cols,
            Action::Down => state + self.cols,
            Action::Left => state - 1,
            Action::Right => state + 1,
        }
    }

    /// Reward for arriving in `state`
    pub fn reward(&self, state: usize) -> f32 {
        self.rewards[state]
    }

    pub fn square(&self, state: usize) -> Square {
        if state == self.start() {
            Square::Start
        } else if state == self.terminal() {
            Square::Goal
        } else if self.rewards[state] < 0.0 {
            Square::Trap
        } else if self.rewards[state] > 0.0 {
            Square::Bonus
        } else {
            Square::Open
        }
    }
}

impl Default for Maze {
    fn default() -> Self {
        Self::new(MazeConfig::default()).expect("The reference maze is valid")
    }
}

impl Environment for Maze {
    type State = usize;
    type Action = Action;

    fn is_active(&self) -> bool {
        self.pos != self.terminal()
    }

    fn step(&mut self, action: Self::Action) -> (Self::State, f32) {
        self.pos = self.next_state(self.pos, action);
        let reward = self.reward(self.pos);

        self.report["steps"] += 1.0;
        self.report["reward"] += reward as f64;

        (self.pos, reward)
    }

    fn reset(&mut self) -> Self::State {
        self.pos = self.start();
        self.pos
    }
}

impl DiscreteActionSpace for Maze {
    fn actions(&self) -> Vec<Self::Action> {
        self.valid_actions(self.pos)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    fn leaves_grid(maze: &Maze, state: usize, action: Action) -> bool {
        let (row, col) = maze.coords(state);
        match action {
            Action::Up => row == 0,
            Action::Down => row == maze.rows() - 1,
            Action::Left => col == 0,
            Action::Right => col == maze.cols() - 1,
        }
    }

    #[test]
    fn valid_actions_exclude_exactly_off_grid_moves() {
        let maze = Maze::default();
        for state in 0..maze.num_states() {
            let valid = maze.valid_actions(state);
            for action in Action::iter() {
                assert_eq!(
                    valid.contains(&action),
                    !leaves_grid(&maze, state, action),
                    "{action:?} validity at state {state}"
                );
            }
        }

        assert_eq!(maze.valid_actions(0), vec![Action::Down, Action::Right]);
        assert_eq!(maze.valid_actions(35), vec![Action::Up, Action::Left]);
        assert_eq!(maze.valid_actions(14).len(), 4, "Interior cell has every move");
    }

    #[test]
    fn invalid_actions_self_loop() {
        let maze = Maze::default();
        for state in 0..maze.num_states() {
            for action in Action::iter().filter(|&a| leaves_grid(&maze, state, a)) {
                assert_eq!(maze.next_state(state, action), state, "{action:?} from {state}");
            }
        }
    }

    #[test]
    fn valid_actions_move_one_cell() {
        let maze = Maze::default();
        for state in 0..maze.num_states() {
            for action in maze.valid_actions(state) {
                let (r0, c0) = maze.coords(state);
                let (r1, c1) = maze.coords(maze.next_state(state, action));
                let dr = r0.abs_diff(r1);
                let dc = c0.abs_diff(c1);
                assert_eq!(dr + dc, 1, "{action:?} from {state} moves exactly one cell");
            }
        }

        assert_eq!(maze.next_state(14, Action::Up), 8);
        assert_eq!(maze.next_state(14, Action::Down), 20);
        assert_eq!(maze.next_state(14, Action::Left), 13);
        assert_eq!(maze.next_state(14, Action::Right), 15);
    }

    #[test]
    fn single_row_maze_has_no_vertical_moves() {
        let maze = Maze::new(MazeConfig {
            rows: 1,
            cols: 3,
            rewards: vec![0.0, 0.0, 1.0],
        })
        .unwrap();

        assert_eq!(maze.valid_actions(1), vec![Action::Left, Action::Right]);
        assert_eq!(maze.next_state(1, Action::Up), 1, "Up self-loops");
        assert_eq!(maze.next_state(1, Action::Down), 1, "Down self-loops");
    }

    #[test]
    fn reference_rewards() {
        let maze = Maze::default();
        assert_eq!(maze.start(), 0);
        assert_eq!(maze.terminal(), 35);
        assert_eq!(maze.reward(35), 50.0, "Exit reward is on the terminal state");
        assert_eq!(maze.reward(28), 1.0, "Bonus cell");

        let traps: Vec<usize> = (0..maze.num_states())
            .filter(|&s| maze.square(s) == Square::Trap)
            .collect();
        assert_eq!(traps, vec![1, 7, 10, 13, 15, 19, 21, 25, 27, 33]);
        assert!(traps.iter().all(|&s| maze.reward(s) == -10.0), "Traps cost 10");

        assert_eq!(maze.square(0), Square::Start);
        assert_eq!(maze.square(35), Square::Goal);
        assert_eq!(maze.square(28), Square::Bonus);
        assert_eq!(maze.square(2), Square::Open);
    }

    #[test]
    fn rejects_bad_configs() {
        let err = |rows, cols, rewards| Maze::new(MazeConfig { rows, cols, rewards }).unwrap_err();

        assert_eq!(err(0, 3, vec![]), Error::InvalidDimensions { rows: 0, cols: 3 });
        assert_eq!(err(1, 1, vec![0.0]), Error::DegenerateMaze);
        assert_eq!(
            err(2, 2, vec![0.0; 3]),
            Error::RewardTableSize {
                expected: 4,
                got: 3
            }
        );
        assert_eq!(
            err(1, 2, vec![f32::NAN, 1.0]).to_string(),
            "reward NaN for state 0 is not finite"
        );
    }

    #[test]
    fn environment_step_and_reset() {
        let mut maze = Maze::default();
        assert_eq!(maze.reset(), 0, "Reset returns the start state");
        assert!(maze.is_active(), "Start is not terminal");
        assert_eq!(maze.actions(), vec![Action::Down, Action::Right]);

        assert_eq!(maze.step(Action::Right), (1, -10.0), "Stepped into a trap");
        assert_eq!(maze.step(Action::Up), (1, -10.0), "Off-grid move stays in the trap");
        assert_eq!(maze.step(Action::Right), (2, 0.0));
        assert_eq!(maze.position(), 2);

        let report = maze.report.take();
        assert_eq!(report["steps"], 3.0, "Report steps correct");
        assert_eq!(report["reward"], -20.0, "Report reward correct");

        for action in [Action::Right, Action::Right, Action::Right] {
            maze.step(action);
        }
        for _ in 0..5 {
            maze.step(Action::Down);
        }
        assert_eq!(maze.position(), 35);
        assert!(!maze.is_active(), "Terminal state reached");
    }
}
