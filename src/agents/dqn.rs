//! Online-learning DQN agent.
//!
//! This module is only available with the `rl-nn` feature.

use std::path::{Path, PathBuf};

use tch::Device;
use tracing::{debug, info};

use super::trait_::Agent;
use crate::error::Result;
use crate::features::{FeatureConfig, FeatureExtractor};
use crate::game::{Action, Observation, Side, StepInfo};
use crate::rl::action_table;
use crate::rl::config::DqnConfig;
use crate::rl::reward::RewardComputer;
use crate::rl::training::{DqnTrainer, Transition};

/// Agent that picks per-ship actions with a Q-network and keeps learning
/// from the feedback delivered with every observation.
pub struct DqnAgent {
    side: Side,
    extractor: FeatureExtractor,
    trainer: DqnTrainer,
    steps: u64,
    training: bool,
}

impl DqnAgent {
    pub fn new(
        side: Side,
        features: FeatureConfig,
        config: DqnConfig,
        device: Device,
    ) -> Result<Self> {
        Ok(Self::with_trainer(side, features, DqnTrainer::new(config, device)?))
    }

    pub fn with_trainer(side: Side, features: FeatureConfig, trainer: DqnTrainer) -> Self {
        Self {
            side,
            extractor: FeatureExtractor::new(side, features),
            trainer,
            steps: 0,
            training: true,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn trainer(&self) -> &DqnTrainer {
        &self.trainer
    }

    pub fn is_training(&self) -> bool {
        self.training
    }

    /// Writes the current online weights to `path`.
    pub fn save_model(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.trainer.save(path)?;
        info!(path = %path.display(), "model saved");
        Ok(())
    }

    fn checkpoint_path(&self) -> PathBuf {
        self.trainer
            .config
            .checkpoint_dir
            .join(format!("dqn_step_{}.ot", self.steps))
    }

    /// Feeds one transition per surviving ship to the trainer.
    ///
    /// A ship contributes only if it is visible in both observations and
    /// received a command on the previous step.
    fn learn(&mut self, obs: &Observation, info: &StepInfo) -> Result<()> {
        let (reward, done) = RewardComputer::compute(info, &self.trainer.config);

        for ship in &obs.allied_ships {
            let Some(prev_action) = info.actions.for_ship(ship.id) else {
                continue;
            };
            let Some(state) = self.extractor.extract(&info.prev_obs, ship.id) else {
                continue;
            };
            let Some(next_state) = self.extractor.extract(obs, ship.id) else {
                continue;
            };
            if let Some(loss) = self.trainer.train(Transition {
                state,
                action: action_table::encode(prev_action),
                reward,
                next_state,
                done,
            })? {
                debug!(ship = ship.id, loss, "trained on transition");
            }
        }
        Ok(())
    }

    fn after_step(&mut self) -> Result<()> {
        self.steps += 1;
        let cfg = &self.trainer.config;
        let sync = cfg.target_sync_every > 0 && self.steps % cfg.target_sync_every == 0;
        let checkpoint = cfg.checkpoint_every > 0 && self.steps % cfg.checkpoint_every == 0;

        if sync {
            self.trainer.sync_target()?;
        }
        if checkpoint {
            let path = self.checkpoint_path();
            self.save_model(&path)?;
        }
        Ok(())
    }
}

impl Agent for DqnAgent {
    fn get_action(&mut self, obs: &Observation, info: Option<&StepInfo>) -> Result<Action> {
        match info {
            None => self.extractor.reset(),
            Some(info) if self.training => self.learn(obs, info)?,
            Some(_) => {}
        }

        let mut ships_actions = Vec::with_capacity(obs.allied_ships.len());
        for (id, features) in self.extractor.extract_all(obs) {
            let idx = if self.training {
                self.trainer.predict_action(&features)?
            } else {
                self.trainer.greedy_action(&features)?
            };
            ships_actions.push(action_table::decode(idx, id)?);
        }

        if self.training {
            self.after_step()?;
        }
        Ok(Action::new(ships_actions, 1))
    }

    /// Loads `weights_file` from `dir` into both networks.
    fn load(&mut self, dir: &Path) -> Result<()> {
        let path = dir.join(&self.trainer.config.weights_file);
        self.trainer.load(&path)?;
        info!(path = %path.display(), "model loaded");
        Ok(())
    }

    fn eval(&mut self) {
        self.training = false;
    }

    fn to_device(&mut self, device: Device) {
        self.trainer.set_device(device);
    }

    fn name(&self) -> &str {
        "dqn"
    }
}
