//! Terminal-outcome reward used by the online learner.

use super::config::DqnConfig;
use crate::game::{EpisodeOutcome, StepInfo};

/// Turns step feedback into a scalar reward and a done flag.
pub struct RewardComputer;

impl RewardComputer {
    /// Returns `(reward, done)` for the transition that led to `info`.
    ///
    /// Wins and losses get the configured terminal rewards; every other step,
    /// including a draw, gets `step_reward`.
    pub fn compute(info: &StepInfo, config: &DqnConfig) -> (f64, bool) {
        let outcome = info.outcome();
        let reward = match outcome {
            EpisodeOutcome::Win => config.win_reward,
            EpisodeOutcome::Loss => config.loss_reward,
            EpisodeOutcome::Draw | EpisodeOutcome::Running => config.step_reward,
        };
        (reward, outcome.is_terminal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Action, Observation};

    fn info(reward: i32, terminated: bool) -> StepInfo {
        StepInfo {
            reward,
            terminated,
            prev_obs: Observation::default(),
            actions: Action::default(),
        }
    }

    #[test]
    fn terminal_rewards() {
        let cfg = DqnConfig::default();
        assert_eq!(RewardComputer::compute(&info(1, true), &cfg), (100.0, true));
        assert_eq!(RewardComputer::compute(&info(-1, true), &cfg), (-100.0, true));
    }

    #[test]
    fn draw_and_running_steps() {
        let cfg = DqnConfig::default();
        assert_eq!(RewardComputer::compute(&info(0, true), &cfg), (-20.0, true));
        assert_eq!(RewardComputer::compute(&info(0, false), &cfg), (-20.0, false));
    }
}
