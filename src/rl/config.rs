//! Hyperparameters for the DQN agent and its reward shaping.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::action_table::ACTION_COUNT;
use crate::features::FEATURE_DIM;

/// Configuration for online DQN training.
///
/// Controls exploration, optimisation, replay memory, target-network
/// synchronisation and checkpointing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DqnConfig {
    // --- Exploration ---
    /// Probability of taking a uniformly random action.
    pub epsilon: f64,

    // --- Optimisation ---
    /// Discount factor γ.
    pub gamma: f64,
    /// Adam learning rate.
    pub lr: f64,
    /// Transitions per gradient step.
    pub batch_size: usize,
    /// Width of both hidden layers.
    pub hidden_dim: usize,

    // --- Replay ---
    /// Maximum number of stored transitions.
    pub buffer_size: usize,

    // --- Schedules ---
    /// Copy online weights into the target network every this many steps.
    pub target_sync_every: u64,
    /// Write a checkpoint every this many steps (0 disables).
    pub checkpoint_every: u64,
    /// Directory for periodic checkpoints.
    pub checkpoint_dir: PathBuf,
    /// File name of the weights read by `load`.
    pub weights_file: String,

    // --- Reward shaping ---
    pub win_reward: f64,
    pub loss_reward: f64,
    /// Reward for every non-winning step, draws included.
    pub step_reward: f64,
}

impl DqnConfig {
    /// Input width of the Q-network.
    pub fn state_dim(&self) -> usize {
        FEATURE_DIM
    }

    /// Output width of the Q-network.
    pub fn action_dim(&self) -> usize {
        ACTION_COUNT
    }
}

impl Default for DqnConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            gamma: 0.99,
            lr: 1e-3,
            batch_size: 64,
            hidden_dim: 128,
            buffer_size: 10_000,
            target_sync_every: 10,
            checkpoint_every: 1_000,
            checkpoint_dir: PathBuf::from("agents"),
            weights_file: "dqn_model.ot".to_string(),
            win_reward: 100.0,
            loss_reward: -100.0,
            step_reward: -20.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = DqnConfig::default();
        assert!(cfg.epsilon >= 0.0 && cfg.epsilon <= 1.0);
        assert!(cfg.gamma > 0.0 && cfg.gamma < 1.0);
        assert!(cfg.batch_size <= cfg.buffer_size);
        assert_eq!(cfg.action_dim(), 17);
        assert_eq!(cfg.state_dim(), FEATURE_DIM);
    }

    #[test]
    fn loads_partial_json() {
        let cfg: DqnConfig = serde_json::from_str(r#"{"epsilon": 0.0, "batch_size": 8}"#).unwrap();
        assert_eq!(cfg.epsilon, 0.0);
        assert_eq!(cfg.batch_size, 8);
        assert_eq!(cfg.buffer_size, 10_000);
    }
}
