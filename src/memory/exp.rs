use std::fmt;

use crate::env::Environment;

/// Represents a single experience or transition in the environment
pub struct Exp<E: Environment> {
    /// The state of the environment before taking the action
    pub state: E::State,
    /// The action taken in the given state
    pub action: E::Action,
    /// The state of the environment after the action is taken
    pub next_state: E::State,
    /// The reward of `next_state`
    pub reward: f32,
}

impl<E> Clone for Exp<E>
where
    E: Environment,
    E::State: Clone,
    E::Action: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            action: self.action.clone(),
            next_state: self.next_state.clone(),
            reward: self.reward,
        }
    }
}

impl<E> fmt::Debug for Exp<E>
where
    E: Environment,
    E::State: fmt::Debug,
    E::Action: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} --{:?}--> {:?} ({})",
            self.state, self.action, self.next_state, self.reward
        )
    }
}
