use std::{
    collections::BTreeMap,
    ops::{Index, IndexMut},
};

/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// This base trait represents the common case of a discrete-time MDP with one agent,
/// a single start state, and a single terminal state.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// A representation of an action that an agent can take to affect the environment
    type Action;

    /// Determine if the current state is active or terminal
    fn is_active(&self) -> bool;

    /// Update the environment in response to an action taken by an agent, producing a new state and
    /// the reward associated with that new state
    ///
    /// **Returns** `(next_state, reward)`
    fn step(&mut self, action: Self::Action) -> (Self::State, f32);

    /// Reset the environment to its initial state
    ///
    /// **Returns** the state
    fn reset(&mut self) -> Self::State;
}

/// An environment with a finite set of actions
pub trait DiscreteActionSpace: Environment {
    /// Get the actions available in the current state
    ///
    /// The returned `Vec` should never be empty.
    fn actions(&self) -> Vec<Self::Action>;
}

/// Named per-episode counters accumulated by an environment
///
/// Keys are fixed at construction, [`take`](Report::take) drains the values and resets them to zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    values: BTreeMap<&'static str, f64>,
}

impl Report {
    pub fn new(keys: Vec<&'static str>) -> Self {
        Self {
            values: keys.into_iter().map(|k| (k, 0.0)).collect(),
        }
    }

    /// The names of the tracked counters, in sorted order
    pub fn keys(&self) -> Vec<&'static str> {
        self.values.keys().copied().collect()
    }

    /// Get a counter by name, if tracked
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Access a counter for modification
    pub fn entry(
        &mut self,
        key: &'static str,
    ) -> std::collections::btree_map::Entry<'_, &'static str, f64> {
        self.values.entry(key)
    }

    /// Take the current values, leaving every counter at zero
    pub fn take(&mut self) -> BTreeMap<&'static str, f64> {
        let reset = self.values.keys().map(|&k| (k, 0.0)).collect();
        std::mem::replace(&mut self.values, reset)
    }
}

impl Index<&str> for Report {
    type Output = f64;

    fn index(&self, key: &str) -> &Self::Output {
        &self.values[key]
    }
}

impl IndexMut<&str> for Report {
    fn index_mut(&mut self, key: &str) -> &mut Self::Output {
        self.values
            .get_mut(key)
            .unwrap_or_else(|| panic!("Report does not track `{key}`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_take_resets() {
        let mut report = Report::new(vec!["steps", "reward"]);
        report.entry("steps").and_modify(|x| *x += 1.0);
        report["reward"] += 2.5;

        assert_eq!(report.keys(), vec!["reward", "steps"], "Keys are sorted");

        let taken = report.take();
        assert_eq!(taken["steps"], 1.0, "Steps were recorded");
        assert_eq!(taken["reward"], 2.5, "Reward was recorded");
        assert_eq!(report["steps"], 0.0, "Steps were reset");
        assert_eq!(report.get("reward"), Some(0.0), "Reward was reset");
        assert_eq!(report.get("score"), None, "Untracked key is absent");
    }
}
