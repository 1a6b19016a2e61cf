//! Reinforcement-learning building blocks for octospace agents.
//!
//! The action table, policies, reward shaping and replay memory only need
//! `rand`. The Q-network and the DQN trainer are behind the `rl-nn` feature
//! flag, which brings in `tch`.

// Always available.
pub mod action_table;
pub mod config;
pub mod policy;
pub mod reward;
pub mod training;

#[cfg(feature = "rl-nn")]
pub mod network;

pub use action_table::{decode, encode, ACTION_COUNT, HOLD};
pub use config::DqnConfig;
pub use policy::{GreedyHeuristicPolicy, Policy, RandomPolicy};
pub use reward::RewardComputer;
pub use training::{ReplayBuffer, Transition};

#[cfg(feature = "rl-nn")]
pub use network::QNetwork;
#[cfg(feature = "rl-nn")]
pub use training::DqnTrainer;
