//! Agent trait for the octospace environment.

use std::path::Path;

use crate::error::Result;
use crate::game::{Action, Observation, StepInfo};

/// A player that turns each observation into an action.
///
/// The environment calls [`Agent::get_action`] once per step. `info` is
/// `None` on the first step of an episode and carries feedback about the
/// previous step afterwards.
pub trait Agent {
    fn get_action(&mut self, obs: &Observation, info: Option<&StepInfo>) -> Result<Action>;

    /// Loads whatever weights the agent needs from `dir`.
    fn load(&mut self, _dir: &Path) -> Result<()> {
        Ok(())
    }

    /// Switches the agent to inference mode.
    fn eval(&mut self) {}

    /// Moves any network weights to `device`.
    #[cfg(feature = "rl-nn")]
    fn to_device(&mut self, _device: tch::Device) {}

    /// Returns a human-readable name for this agent.
    fn name(&self) -> &str;
}
