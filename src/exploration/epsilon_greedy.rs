use rand::Rng;

use crate::assert_interval;

use super::Choice;

/// Epsilon greedy exploration policy with a fixed threshold
///
/// Here `epsilon` is the probability of **exploiting**: a uniform draw above `epsilon` explores,
/// anything else exploits. `1.0` is therefore fully greedy and `0.0` is a pure random walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f32,
}

impl EpsilonGreedy {
    /// Always exploit
    pub const GREEDY: Self = Self { epsilon: 1.0 };

    /// **Panics** if `epsilon` is not in the interval `[0,1]`
    pub fn new(epsilon: f32) -> Self {
        assert_interval!(epsilon, 0.0, 1.0);
        Self { epsilon }
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Invoke the policy with the given random source
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Choice {
        if rng.gen::<f32>() > self.epsilon {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn extremes_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert_eq!(EpsilonGreedy::GREEDY.choose(&mut rng), Choice::Exploit);
        }
        // a draw of exactly 0.0 is not above 0.0, so a zero threshold can still exploit
        let explored = (0..1000)
            .filter(|_| EpsilonGreedy::new(0.0).choose(&mut rng) == Choice::Explore)
            .count();
        assert!(explored >= 999, "Zero threshold explores");
    }

    #[test]
    fn exploit_rate_tracks_epsilon() {
        let mut rng = StdRng::seed_from_u64(42);
        let policy = EpsilonGreedy::new(0.7);
        let trials = 20_000;
        let exploits = (0..trials)
            .filter(|_| policy.choose(&mut rng) == Choice::Exploit)
            .count();
        let rate = exploits as f64 / trials as f64;
        assert!((rate - 0.7).abs() < 0.02, "Exploit rate {rate} is near 0.7");
    }

    #[test]
    #[should_panic]
    fn rejects_epsilon_above_one() {
        EpsilonGreedy::new(1.2);
    }
}
