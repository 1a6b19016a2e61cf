//! Random policy for baselines and exploration.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::trait_::Policy;
use crate::rl::action_table::ACTION_COUNT;

/// Uniformly random action selection over the action table.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a reproducible random policy.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for RandomPolicy {
    fn select_actions(&mut self, features: &[Vec<f32>]) -> Vec<usize> {
        (0..features.len())
            .map(|_| self.rng.gen_range(0..ACTION_COUNT))
            .collect()
    }

    fn name(&self) -> &str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_policy_returns_correct_count() {
        let mut policy = RandomPolicy::seeded(1);
        let feats = vec![vec![0.0; 10]; 4];
        assert_eq!(policy.select_actions(&feats).len(), 4);
    }

    #[test]
    fn random_policy_actions_in_range() {
        let mut policy = RandomPolicy::seeded(2);
        let feats = vec![vec![0.0; 10]; 200];
        assert!(policy.select_actions(&feats).iter().all(|&a| a < ACTION_COUNT));
    }

    #[test]
    fn seeded_policies_agree() {
        let feats = vec![vec![0.0; 3]; 16];
        let a = RandomPolicy::seeded(9).select_actions(&feats);
        let b = RandomPolicy::seeded(9).select_actions(&feats);
        assert_eq!(a, b);
    }
}
