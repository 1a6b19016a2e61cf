//! Fixed-behaviour agent used as a submission skeleton.

use super::trait_::Agent;
use crate::error::Result;
use crate::game::{Action, Direction, Observation, ShipAction, Side, StepInfo, MAX_SPEED};

/// Sends every ship right at full speed and orders one ship per step.
#[derive(Debug, Clone)]
pub struct DummyAgent {
    side: Side,
}

impl DummyAgent {
    pub fn new(side: Side) -> Self {
        Self { side }
    }

    pub fn side(&self) -> Side {
        self.side
    }
}

impl Agent for DummyAgent {
    fn get_action(&mut self, obs: &Observation, _info: Option<&StepInfo>) -> Result<Action> {
        let ships_actions = obs
            .allied_ships
            .iter()
            .map(|s| ShipAction::movement(s.id, Direction::Right, MAX_SPEED))
            .collect();
        Ok(Action::new(ships_actions, 1))
    }

    fn name(&self) -> &str {
        "dummy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ShipState;

    #[test]
    fn moves_every_ship_right() {
        let obs = Observation {
            allied_ships: vec![ShipState::new(1, 0, 0, 100), ShipState::new(4, 5, 5, 100)],
            ..Observation::default()
        };
        let action = DummyAgent::new(Side::Left).get_action(&obs, None).unwrap();
        assert_eq!(action.construction, 1);
        assert_eq!(
            action.ships_actions,
            vec![
                ShipAction::movement(1, Direction::Right, 3),
                ShipAction::movement(4, Direction::Right, 3),
            ]
        );
    }

    #[test]
    fn no_ships_no_commands() {
        let action = DummyAgent::new(Side::Right)
            .get_action(&Observation::default(), None)
            .unwrap();
        assert!(action.ships_actions.is_empty());
    }
}
