//! Training infrastructure: replay memory and (with `rl-nn`) the DQN trainer.

#[cfg(feature = "rl-nn")]
pub mod dqn;
pub mod replay;

#[cfg(feature = "rl-nn")]
pub use dqn::DqnTrainer;
pub use replay::{ReplayBuffer, Transition};
