//! Agent driven by any per-ship [`Policy`].

use tracing::trace;

use super::trait_::Agent;
use crate::error::Result;
use crate::features::{FeatureConfig, FeatureExtractor};
use crate::game::{Action, Observation, Side, StepInfo};
use crate::rl::action_table;
use crate::rl::policy::{Policy, RandomPolicy};

/// Encodes every allied ship, lets the policy choose table indices and
/// decodes them back into ship commands.
pub struct PolicyAgent<P: Policy> {
    policy: P,
    extractor: FeatureExtractor,
    construction: u32,
}

impl<P: Policy> PolicyAgent<P> {
    pub fn new(side: Side, policy: P, config: FeatureConfig) -> Self {
        Self {
            policy,
            extractor: FeatureExtractor::new(side, config),
            construction: 1,
        }
    }

    /// Sets how many ships to order each step.
    pub fn with_construction(mut self, construction: u32) -> Self {
        self.construction = construction;
        self
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }
}

impl PolicyAgent<RandomPolicy> {
    /// Baseline agent choosing uniformly from the action table.
    pub fn random(side: Side) -> Self {
        Self::new(side, RandomPolicy::new(), FeatureConfig::default())
    }
}

impl<P: Policy> Agent for PolicyAgent<P> {
    fn get_action(&mut self, obs: &Observation, info: Option<&StepInfo>) -> Result<Action> {
        if info.is_none() {
            self.extractor.reset();
        }

        let (ids, features): (Vec<u32>, Vec<Vec<f32>>) =
            self.extractor.extract_all(obs).into_iter().unzip();
        let choices = self.policy.select_actions(&features);

        let ships_actions = ids
            .iter()
            .zip(choices)
            .map(|(&id, idx)| action_table::decode(idx, id))
            .collect::<Result<Vec<_>>>()?;
        trace!(policy = self.policy.name(), ships = ships_actions.len(), "selected actions");

        Ok(Action::new(ships_actions, self.construction))
    }

    fn name(&self) -> &str {
        self.policy.name()
    }
}
