use strum::EnumCount;

use crate::gym::Action;

/// Dense table of action values, one row per state and one column per [`Action`]
///
/// Every state has an entry for every action, including actions that would leave the grid from that
/// state. Those entries stay at zero because callers only read and write the valid ones.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    values: Vec<[f32; Action::COUNT]>,
}

impl QTable {
    /// A table of zeros for `num_states` states
    pub fn new(num_states: usize) -> Self {
        Self {
            values: vec![[0.0; Action::COUNT]; num_states],
        }
    }

    pub fn num_states(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, state: usize, action: Action) -> f32 {
        self.values[state][action as usize]
    }

    pub fn set(&mut self, state: usize, action: Action, value: f32) {
        self.values[state][action as usize] = value;
    }

    /// Highest value at `state` among `actions` only
    ///
    /// `actions` should be the valid actions for `state` and is never empty on a grid.
    pub fn max_over(&self, state: usize, actions: &[Action]) -> f32 {
        debug_assert!(!actions.is_empty(), "There is always at least one action available");
        actions
            .iter()
            .map(|&a| self.get(state, a))
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Every action among `actions` whose value at `state` equals the maximum over `actions`
    pub fn greedy_actions(&self, state: usize, actions: &[Action]) -> Vec<Action> {
        let max = self.max_over(state, actions);
        actions
            .iter()
            .copied()
            .filter(|&a| self.get(state, a) == max)
            .collect()
    }

    /// Q(s,a) += α(r + γ·max<sub>a'</sub>Q(s',a') - Q(s,a))
    ///
    /// ### Parameters
    /// - `reward` - The reward of the state the action led to
    /// - `next_max` - The maximum value over the valid actions of that state
    /// - `alpha` - The learning rate
    /// - `gamma` - The discount factor
    pub fn update(
        &mut self,
        state: usize,
        action: Action,
        reward: f32,
        next_max: f32,
        alpha: f32,
        gamma: f32,
    ) {
        let q = &mut self.values[state][action as usize];
        *q += alpha * (reward + gamma * next_max - *q);
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    fn bits(table: &QTable) -> Vec<u32> {
        (0..table.num_states())
            .flat_map(|s| Action::iter().map(move |a| (s, a)))
            .map(|(s, a)| table.get(s, a).to_bits())
            .collect()
    }

    #[test]
    fn starts_at_zero() {
        let table = QTable::new(36);
        assert_eq!(table.num_states(), 36);
        for state in 0..36 {
            for action in Action::iter() {
                assert_eq!(table.get(state, action), 0.0, "({state}, {action:?}) is zero");
            }
        }
    }

    #[test]
    fn update_applies_bellman_step() {
        let mut table = QTable::new(4);
        table.set(2, Action::Right, 1.0);

        table.update(2, Action::Right, 5.0, 10.0, 0.5, 0.9);
        // 1 + 0.5 * (5 + 9 - 1)
        assert_eq!(table.get(2, Action::Right), 7.5);

        table.update(2, Action::Right, 0.0, 0.0, 0.0, 0.9);
        assert_eq!(table.get(2, Action::Right), 7.5, "Zero learning rate is a no-op");
    }

    #[test]
    fn update_touches_only_target_entry() {
        let mut table = QTable::new(9);
        for state in 0..9 {
            table.set(state, Action::Up, state as f32 * 0.25);
            table.set(state, Action::Left, -(state as f32));
        }
        let before = bits(&table);

        table.update(4, Action::Down, -10.0, 3.0, 0.1, 0.9);
        let after = bits(&table);

        let changed: Vec<usize> = (0..before.len()).filter(|&i| before[i] != after[i]).collect();
        assert_eq!(changed, vec![4 * Action::COUNT + Action::Down as usize]);
    }

    #[test]
    fn max_ignores_unlisted_actions() {
        let mut table = QTable::new(2);
        table.set(0, Action::Up, 100.0);
        table.set(0, Action::Down, -1.0);
        table.set(0, Action::Right, -2.0);

        assert_eq!(table.max_over(0, &[Action::Down, Action::Right]), -1.0);
        assert_eq!(table.max_over(1, &[Action::Up, Action::Left]), 0.0);
    }

    #[test]
    fn greedy_actions_keep_ties() {
        let mut table = QTable::new(1);
        let all: Vec<Action> = Action::iter().collect();
        assert_eq!(table.greedy_actions(0, &all), all, "All zero values tie");

        table.set(0, Action::Left, 2.0);
        table.set(0, Action::Down, 2.0);
        table.set(0, Action::Up, 1.0);
        assert_eq!(
            table.greedy_actions(0, &all),
            vec![Action::Down, Action::Left]
        );
        assert_eq!(
            table.greedy_actions(0, &[Action::Up, Action::Right]),
            vec![Action::Up]
        );
    }
}
