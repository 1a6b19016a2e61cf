//! Deep Q-learning trainer with a target network.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tch::{nn, nn::OptimizerConfig, Device, Kind, Tensor};
use tracing::debug;

use super::replay::{ReplayBuffer, Transition};
use crate::error::Result;
use crate::rl::config::DqnConfig;
use crate::rl::network::QNetwork;
use crate::rl::policy::{argmax, epsilon_greedy};

/// Online DQN learner.
///
/// Holds the online and target Q-networks, the replay memory and the Adam
/// optimizer. One trainer is shared by all ships of a player.
pub struct DqnTrainer {
    /// Network being optimised.
    pub q_network: QNetwork,
    /// Slow-moving copy used for bootstrapped targets.
    pub target_network: QNetwork,
    /// Experience memory.
    pub replay: ReplayBuffer,
    /// Hyperparameters.
    pub config: DqnConfig,
    optimizer: nn::Optimizer,
    rng: StdRng,
    updates: u64,
}

impl DqnTrainer {
    /// Creates a trainer with freshly initialised networks.
    pub fn new(config: DqnConfig, device: Device) -> Result<Self> {
        Self::with_rng(config, device, StdRng::from_entropy())
    }

    /// Creates a trainer whose exploration and sampling are reproducible.
    pub fn seeded(config: DqnConfig, device: Device, seed: u64) -> Result<Self> {
        Self::with_rng(config, device, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: DqnConfig, device: Device, rng: StdRng) -> Result<Self> {
        let q_network = QNetwork::new(
            config.state_dim(),
            config.action_dim(),
            config.hidden_dim,
            device,
        );
        let mut target_network = QNetwork::new(
            config.state_dim(),
            config.action_dim(),
            config.hidden_dim,
            device,
        );
        target_network.copy_from(&q_network)?;

        let optimizer = nn::Adam::default().build(q_network.var_store(), config.lr)?;

        Ok(Self {
            q_network,
            target_network,
            replay: ReplayBuffer::new(config.buffer_size),
            config,
            optimizer,
            rng,
            updates: 0,
        })
    }

    /// Epsilon-greedy action for one state.
    pub fn predict_action(&mut self, state: &[f32]) -> Result<usize> {
        let q = self.q_network.q_values(state)?;
        Ok(epsilon_greedy(&mut self.rng, self.config.epsilon, &q))
    }

    /// Highest-valued action for one state.
    pub fn greedy_action(&self, state: &[f32]) -> Result<usize> {
        let q = self.q_network.q_values(state)?;
        Ok(argmax(&q).unwrap_or(0))
    }

    /// Stores a transition and runs one update.
    pub fn train(&mut self, transition: Transition) -> Result<Option<f64>> {
        self.replay.add(transition);
        self.update()
    }

    /// One gradient step on a sampled batch.
    ///
    /// Returns `Ok(None)` without touching the network while the buffer holds
    /// fewer than `batch_size` transitions; otherwise the MSE loss.
    pub fn update(&mut self) -> Result<Option<f64>> {
        let batch_size = self.config.batch_size;
        let state_dim = self.config.state_dim() as i64;

        let (states, actions, rewards, next_states, dones) = {
            let Some(batch) = self.replay.sample(&mut self.rng, batch_size) else {
                return Ok(None);
            };
            let mut states = Vec::with_capacity(batch.len() * state_dim as usize);
            let mut next_states = Vec::with_capacity(batch.len() * state_dim as usize);
            let mut actions = Vec::with_capacity(batch.len());
            let mut rewards = Vec::with_capacity(batch.len());
            let mut dones = Vec::with_capacity(batch.len());
            for t in batch {
                states.extend_from_slice(&t.state);
                next_states.extend_from_slice(&t.next_state);
                actions.push(t.action as i64);
                rewards.push(t.reward as f32);
                dones.push(if t.done { 1.0f32 } else { 0.0 });
            }
            (states, actions, rewards, next_states, dones)
        };

        let n = actions.len() as i64;
        let device = self.q_network.device();
        let states = Tensor::from_slice(&states)
            .reshape([n, state_dim])
            .to_device(device);
        let next_states = Tensor::from_slice(&next_states)
            .reshape([n, state_dim])
            .to_device(device);
        let actions = Tensor::from_slice(&actions).to_device(device);
        let rewards = Tensor::from_slice(&rewards).to_device(device);
        let dones = Tensor::from_slice(&dones).to_device(device);

        let q_taken = self
            .q_network
            .forward(&states)
            .gather(1, &actions.unsqueeze(1), false)
            .squeeze_dim(1);

        let gamma = self.config.gamma;
        let target = tch::no_grad(|| {
            let (next_max, _) = self.target_network.forward(&next_states).max_dim(1, false);
            &rewards + gamma * next_max * (1.0 - &dones)
        });

        let loss = q_taken.mse_loss(&target.to_kind(Kind::Float), tch::Reduction::Mean);
        self.optimizer.zero_grad();
        loss.backward();
        self.optimizer.step();
        self.updates += 1;

        let loss = f64::try_from(&loss)?;
        debug!(update = self.updates, loss, "dqn update");
        Ok(Some(loss))
    }

    /// Copies the online weights into the target network.
    pub fn sync_target(&mut self) -> Result<()> {
        self.target_network.copy_from(&self.q_network)
    }

    /// Number of gradient steps taken so far.
    pub fn updates(&self) -> u64 {
        self.updates
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.q_network.save(path)
    }

    /// Loads online weights and mirrors them into the target network.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.q_network.load(path)?;
        self.sync_target()
    }

    /// Moves both networks to `device`.
    pub fn set_device(&mut self, device: Device) {
        self.q_network.set_device(device);
        self.target_network.set_device(device);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> DqnConfig {
        DqnConfig {
            batch_size: 4,
            buffer_size: 16,
            hidden_dim: 16,
            ..DqnConfig::default()
        }
    }

    fn transition(action: usize, reward: f64, done: bool) -> Transition {
        let dim = DqnConfig::default().state_dim();
        Transition {
            state: vec![0.1; dim],
            action,
            reward,
            next_state: vec![0.2; dim],
            done,
        }
    }

    #[test]
    fn update_waits_for_a_full_batch() {
        let mut trainer = DqnTrainer::seeded(small_config(), Device::Cpu, 1).unwrap();
        for i in 0..3 {
            assert_eq!(trainer.train(transition(i, -20.0, false)).unwrap(), None);
        }
        assert!(trainer.train(transition(3, 100.0, true)).unwrap().is_some());
        assert_eq!(trainer.updates(), 1);
    }

    #[test]
    fn predict_action_in_range() {
        let mut trainer = DqnTrainer::seeded(small_config(), Device::Cpu, 2).unwrap();
        let state = vec![0.0; trainer.config.state_dim()];
        for _ in 0..20 {
            assert!(trainer.predict_action(&state).unwrap() < trainer.config.action_dim());
        }
    }

    #[test]
    fn target_matches_online_after_sync() {
        let mut trainer = DqnTrainer::seeded(small_config(), Device::Cpu, 3).unwrap();
        for i in 0..8 {
            trainer.train(transition(i % 17, 1.0, i % 2 == 0)).unwrap();
        }
        trainer.sync_target().unwrap();
        let s = vec![0.3; trainer.config.state_dim()];
        assert_eq!(
            trainer.q_network.q_values(&s).unwrap(),
            trainer.target_network.q_values(&s).unwrap()
        );
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join(format!("octospace-dqn-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("weights.ot");

        let trainer = DqnTrainer::seeded(small_config(), Device::Cpu, 4).unwrap();
        trainer.save(&path).unwrap();
        let mut other = DqnTrainer::seeded(small_config(), Device::Cpu, 5).unwrap();
        other.load(&path).unwrap();

        let s = vec![0.7; trainer.config.state_dim()];
        assert_eq!(
            trainer.greedy_action(&s).unwrap(),
            other.greedy_action(&s).unwrap()
        );
        std::fs::remove_dir_all(&dir).ok();
    }
}
