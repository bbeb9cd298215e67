use std::{collections::BTreeMap, thread, time::Duration};

use log::{debug, info, trace, warn};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    assert_interval,
    ds::QTable,
    env::{DiscreteActionSpace, Environment},
    exploration::{Choice, EpsilonGreedy},
    gym::{Action, Maze},
    memory::Exp,
    render::Render,
};

type E = Maze;

/// Configuration for the [`QTableAgent`]
#[derive(Debug, Clone, PartialEq)]
pub struct QTableAgentConfig {
    /// The learning rate
    ///
    /// **Default**: `0.1`
    pub alpha: f32,
    /// The discount factor
    ///
    /// **Default**: `0.9`
    pub gamma: f32,
    /// Episodes to train for whenever [`play`](QTableAgent::play) finds the agent incompetent
    ///
    /// **Default**: `222`
    pub episodes: u32,
    /// Probability of exploiting during that training
    ///
    /// **Default**: `0.7`
    pub epsilon: f32,
    /// Pause between steps of the final playback
    ///
    /// **Default**: no pause
    pub step_delay: Duration,
    /// Seed for the agent's random source, drawn from entropy if `None`
    pub seed: Option<u64>,
}

impl Default for QTableAgentConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            episodes: 222,
            epsilon: 0.7,
            step_delay: Duration::ZERO,
            seed: None,
        }
    }
}

/// A Q-learning agent that learns to escape a [`Maze`] with a dense Q-table
///
/// Each step of an episode is learned from immediately with the update
///
/// Q(s,a) ← Q(s,a) + α(r(s') + γ·max<sub>a'</sub>Q(s',a') - Q(s,a))
///
/// where the maximum only ranges over the actions that are valid in s'.
/// All random decisions (exploration and greedy tie-breaks) come from a single seedable source
/// owned by the agent, so two agents built with the same seed learn identically.
pub struct QTableAgent {
    q_table: QTable,
    rng: StdRng,
    alpha: f32,     // learning rate
    gamma: f32,     // discount factor
    episodes: u32,  // retraining episodes
    epsilon: f32,   // retraining exploit probability
    episode: u32,   // completed training episodes
    step_delay: Duration,
}

impl QTableAgent {
    /// Initialize a new `QTableAgent` with a zeroed table sized for `env`
    ///
    /// **Panics** if `alpha`, `gamma`, or `epsilon` is not in the interval `[0,1]`
    pub fn new(env: &E, config: QTableAgentConfig) -> Self {
        assert_interval!(config.alpha, 0.0, 1.0);
        assert_interval!(config.gamma, 0.0, 1.0);
        assert_interval!(config.epsilon, 0.0, 1.0);

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            q_table: QTable::new(env.num_states()),
            rng,
            alpha: config.alpha,
            gamma: config.gamma,
            episodes: config.episodes,
            epsilon: config.epsilon,
            episode: 0,
            step_delay: config.step_delay,
        }
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Number of training episodes completed so far
    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// Choose an action among the valid actions of `state`
    ///
    /// With probability `epsilon` one of the highest valued actions is picked, otherwise any valid action.
    /// Ties are broken uniformly at random in both cases.
    pub fn choose(&mut self, env: &E, state: usize, epsilon: f32) -> Action {
        let actions = env.valid_actions(state);
        self.act(EpsilonGreedy::new(epsilon), state, &actions)
    }

    fn act(&mut self, policy: EpsilonGreedy, state: usize, actions: &[Action]) -> Action {
        let candidates = match policy.choose(&mut self.rng) {
            Choice::Explore => actions.to_vec(),
            Choice::Exploit => self.q_table.greedy_actions(state, actions),
        };

        *candidates
            .choose(&mut self.rng)
            .expect("There is always at least one action available")
    }

    fn update(&mut self, experience: Exp<E>, next_actions: &[Action]) {
        trace!("{experience:?}");
        let Exp {
            state,
            action,
            next_state,
            reward,
        } = experience;

        let next_max = self.q_table.max_over(next_state, next_actions);
        self.q_table.update(state, action, reward, next_max, self.alpha, self.gamma);
    }

    /// Run a single training episode from the start state until the exit is reached
    ///
    /// There is no step limit. `render` sees the start state and every state visited after it.
    ///
    /// **Returns** the episode's report (`"steps"` and `"reward"`)
    pub fn learn_episode(
        &mut self,
        env: &mut E,
        render: &mut impl Render,
        epsilon: f32,
    ) -> BTreeMap<&'static str, f64> {
        assert_eq!(
            env.num_states(),
            self.q_table.num_states(),
            "Maze does not match the size of the Q-table"
        );
        let policy = EpsilonGreedy::new(epsilon);

        let mut state = env.reset();
        env.report.take();
        render.render(state);

        while env.is_active() {
            let action = self.act(policy, state, &env.actions());
            let (next_state, reward) = env.step(action);
            let next_actions = env.actions();

            self.update(
                Exp {
                    state,
                    action,
                    next_state,
                    reward,
                },
                &next_actions,
            );

            state = next_state;
            render.render(state);
        }

        self.episode += 1;
        env.report.take()
    }

    /// Train for `episodes` episodes with a fixed `epsilon`
    pub fn learn(&mut self, env: &mut E, render: &mut impl Render, episodes: u32, epsilon: f32) {
        info!("Agent is learning for {episodes} episodes (epsilon = {epsilon})");
        for _ in 0..episodes {
            let report = self.learn_episode(env, render, epsilon);
            debug!(
                "Episode {}: {} steps, reward {}",
                self.episode, report["steps"], report["reward"]
            );
        }
        info!("Learning completed, {} episodes in total", self.episode);
    }

    fn greedy_step(&mut self, env: &mut E, state: usize) -> usize {
        let action = self.act(EpsilonGreedy::GREEDY, state, &env.actions());
        env.step(action).0
    }

    /// Check whether the greedy policy escapes the maze within one step per cell
    ///
    /// Does not learn or render.
    pub fn test_agent(&mut self, env: &mut E) -> bool {
        let cap = env.num_states();
        let mut state = env.reset();
        let mut steps = 0;

        while env.is_active() {
            if steps == cap {
                info!("No intelligence: the exit was not reached within {cap} steps");
                return false;
            }
            state = self.greedy_step(env, state);
            steps += 1;
        }

        info!("Intelligent: the exit was reached in {steps} steps");
        true
    }

    /// Walk greedily from the start to the exit, rendering each step
    ///
    /// If [`test_agent`](QTableAgent::test_agent) fails first, the agent trains once more for the
    /// configured number of episodes at the configured epsilon before playing.
    ///
    /// **Returns** the number of steps the playback took
    pub fn play(&mut self, env: &mut E, render: &mut impl Render) -> usize {
        info!(
            "Testing if the agent can exit the maze within {} steps",
            env.num_states()
        );
        if !self.test_agent(env) {
            warn!("The agent needs to learn before playing");
            self.learn(env, render, self.episodes, self.epsilon);
        }

        info!("Agent is playing...");
        let mut state = env.reset();
        render.render(state);
        let mut steps = 0;

        while env.is_active() {
            state = self.greedy_step(env, state);
            steps += 1;
            render.render(state);
            if !self.step_delay.is_zero() {
                thread::sleep(self.step_delay);
            }
        }

        info!("Congratulations, the agent reached the exit in {steps} steps");
        steps
    }
}
