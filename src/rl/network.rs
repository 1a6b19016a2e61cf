//! Q-value network using tch-rs (PyTorch bindings).
//!
//! This module is only available with the `rl-nn` feature.

use std::path::Path;

use tch::{nn, nn::Module, Device, Kind, Tensor};

use crate::error::Result;

/// MLP mapping a ship's feature vector to one Q-value per action.
///
/// Architecture: `state_dim → hidden → hidden → action_dim` with ReLU
/// activations and a linear output.
pub struct QNetwork {
    vs: nn::VarStore,
    net: nn::Sequential,
    state_dim: usize,
    action_dim: usize,
}

impl QNetwork {
    pub fn new(state_dim: usize, action_dim: usize, hidden_dim: usize, device: Device) -> Self {
        let vs = nn::VarStore::new(device);
        let p = &vs.root();
        let net = nn::seq()
            .add(nn::linear(
                p / "fc1",
                state_dim as i64,
                hidden_dim as i64,
                Default::default(),
            ))
            .add_fn(|x| x.relu())
            .add(nn::linear(
                p / "fc2",
                hidden_dim as i64,
                hidden_dim as i64,
                Default::default(),
            ))
            .add_fn(|x| x.relu())
            .add(nn::linear(
                p / "fc3",
                hidden_dim as i64,
                action_dim as i64,
                Default::default(),
            ));

        Self {
            vs,
            net,
            state_dim,
            action_dim,
        }
    }

    /// Forward pass over a `[batch, state_dim]` tensor.
    pub fn forward(&self, states: &Tensor) -> Tensor {
        self.net.forward(states)
    }

    /// Q-values for a single state, computed without gradient tracking.
    pub fn q_values(&self, state: &[f32]) -> Result<Vec<f32>> {
        let device = self.vs.device();
        let q = tch::no_grad(|| {
            let input = Tensor::from_slice(state)
                .reshape([1, self.state_dim as i64])
                .to_device(device);
            self.forward(&input)
                .squeeze_dim(0)
                .to_kind(Kind::Float)
                .to_device(Device::Cpu)
        });
        Ok(Vec::<f32>::try_from(&q)?)
    }

    pub fn state_dim(&self) -> usize {
        self.state_dim
    }

    pub fn action_dim(&self) -> usize {
        self.action_dim
    }

    pub fn device(&self) -> Device {
        self.vs.device()
    }

    /// Moves all weights to `device`.
    pub fn set_device(&mut self, device: Device) {
        self.vs.set_device(device);
    }

    /// Overwrites this network's weights with those of `other`.
    pub fn copy_from(&mut self, other: &QNetwork) -> Result<()> {
        self.vs.copy(&other.vs)?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.vs.save(path)?;
        Ok(())
    }

    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.vs.load(path)?;
        Ok(())
    }

    /// Returns a reference to the variable store.
    pub fn var_store(&self) -> &nn::VarStore {
        &self.vs
    }

    /// Returns a mutable reference to the variable store for optimization.
    pub fn var_store_mut(&mut self) -> &mut nn::VarStore {
        &mut self.vs
    }
}
