//! Agents playing the octospace game.

#[cfg(feature = "rl-nn")]
pub mod dqn;
pub mod dummy;
pub mod policy_agent;
pub mod runner;
pub mod trait_;

#[cfg(feature = "rl-nn")]
pub use dqn::DqnAgent;
pub use dummy::DummyAgent;
pub use policy_agent::PolicyAgent;
pub use trait_::Agent;

use crate::features::FeatureConfig;
use crate::game::Side;
use crate::rl::policy::{GreedyHeuristicPolicy, RandomPolicy};

/// Agent built on the greedy heuristic policy.
pub type GreedyAgent = PolicyAgent<GreedyHeuristicPolicy>;

/// Agent choosing uniformly from the action table.
pub type RandomAgent = PolicyAgent<RandomPolicy>;

impl GreedyAgent {
    pub fn greedy(side: Side, config: FeatureConfig) -> Self {
        PolicyAgent::new(side, GreedyHeuristicPolicy::new(config.clone()), config)
    }
}

/// Names accepted by [`by_name`].
#[cfg(not(feature = "rl-nn"))]
pub const AGENT_NAMES: &[&str] = &["dummy", "random", "greedy"];

/// Names accepted by [`by_name`].
#[cfg(feature = "rl-nn")]
pub const AGENT_NAMES: &[&str] = &["dummy", "random", "greedy", "dqn"];

/// Builds one of the bundled agents with default settings.
pub fn by_name(name: &str, side: Side) -> crate::error::Result<Option<Box<dyn Agent>>> {
    let agent: Box<dyn Agent> = match name {
        "dummy" => Box::new(DummyAgent::new(side)),
        "random" => Box::new(RandomAgent::random(side)),
        "greedy" => Box::new(GreedyAgent::greedy(side, FeatureConfig::default())),
        #[cfg(feature = "rl-nn")]
        "dqn" => Box::new(DqnAgent::new(
            side,
            FeatureConfig::default(),
            crate::rl::DqnConfig::default(),
            tch::Device::cuda_if_available(),
        )?),
        _ => return Ok(None),
    };
    Ok(Some(agent))
}
