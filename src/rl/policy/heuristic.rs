//! Greedy heuristic policy (baseline).
//!
//! Reads the per-ship feature vector and picks, in order of preference:
//! fire at an enemy lined up within range, capture the nearest unoccupied
//! planet, attack the nearest enemy planet, chase the nearest enemy ship.

use super::trait_::Policy;
use crate::features::extractor::{
    FEAT_FIRE_READY, FEAT_IN_RANGE, FEAT_NEAREST_ENEMY, FEAT_NEAREST_ENEMY_PLANET,
    FEAT_NEAREST_FREE_PLANET, FEAT_POSITION, FEATURE_DIM,
};
use crate::features::FeatureConfig;
use crate::game::{Direction, Position, ShipAction, MAX_SPEED};
use crate::rl::action_table::{encode, HOLD};

/// In-range flag order in the feature vector.
const RANGE_DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

/// Greedy heuristic over extracted features.
pub struct GreedyHeuristicPolicy {
    config: FeatureConfig,
}

impl GreedyHeuristicPolicy {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    fn select_one(&self, f: &[f32]) -> usize {
        if f.len() < FEATURE_DIM {
            return HOLD;
        }

        if f[FEAT_FIRE_READY] > 0.5 {
            let lined_up = f[FEAT_IN_RANGE..FEAT_IN_RANGE + 4]
                .iter()
                .position(|&flag| flag > 0.5);
            if let Some(i) = lined_up {
                return encode(&ShipAction::fire(0, RANGE_DIRECTIONS[i]));
            }
        }

        let me = match self.cell(f, FEAT_POSITION) {
            Some(p) => p,
            None => return HOLD,
        };

        let target = [
            FEAT_NEAREST_FREE_PLANET,
            FEAT_NEAREST_ENEMY_PLANET,
            FEAT_NEAREST_ENEMY,
        ]
        .into_iter()
        .find_map(|offset| self.cell(f, offset));

        let Some(target) = target else {
            return HOLD;
        };
        let Some(direction) = me.direction_to(&target) else {
            return HOLD;
        };
        let speed = me.offset_along(&target, direction).clamp(0, MAX_SPEED as i32) as u8;
        encode(&ShipAction::movement(0, direction, speed))
    }

    /// Denormalizes the coordinate pair at `offset`; `None` for the sentinel.
    fn cell(&self, f: &[f32], offset: usize) -> Option<Position> {
        let (x, y) = (f[offset], f[offset + 1]);
        if x == self.config.missing_coord && y == self.config.missing_coord {
            return None;
        }
        let scale = self.config.map_extent();
        Some(Position::new((x * scale).round() as i32, (y * scale).round() as i32))
    }
}

impl Policy for GreedyHeuristicPolicy {
    fn select_actions(&mut self, features: &[Vec<f32>]) -> Vec<usize> {
        features.iter().map(|f| self.select_one(f)).collect()
    }

    fn name(&self) -> &str {
        "greedy_heuristic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureExtractor;
    use crate::game::{Observation, PlanetState, ShipState, Side};
    use crate::rl::action_table::decode;

    fn features(obs: &Observation, ship_id: u32) -> Vec<f32> {
        FeatureExtractor::new(Side::Left, FeatureConfig::default())
            .extract(obs, ship_id)
            .unwrap()
    }

    #[test]
    fn heuristic_returns_correct_count() {
        let mut policy = GreedyHeuristicPolicy::new(FeatureConfig::default());
        let feats = vec![vec![0.5; FEATURE_DIM]; 4];
        assert_eq!(policy.select_actions(&feats).len(), 4);
    }

    #[test]
    fn fires_at_lined_up_enemy() {
        let obs = Observation {
            allied_ships: vec![ShipState::new(1, 20, 20, 100)],
            enemy_ships: vec![ShipState::new(9, 25, 20, 100)],
            ..Observation::default()
        };
        let mut policy = GreedyHeuristicPolicy::new(FeatureConfig::default());
        let a = policy.select_actions(&[features(&obs, 1)])[0];
        assert_eq!(decode(a, 1).unwrap(), ShipAction::fire(1, Direction::Right));
    }

    #[test]
    fn moves_when_gun_is_cooling_down() {
        let mut me = ShipState::new(1, 20, 20, 100);
        me.firing_cooldown = 4;
        let obs = Observation {
            allied_ships: vec![me],
            enemy_ships: vec![ShipState::new(9, 25, 20, 100)],
            planets_occupation: vec![PlanetState::new(20, 10, -1)],
            ..Observation::default()
        };
        let mut policy = GreedyHeuristicPolicy::new(FeatureConfig::default());
        let a = policy.select_actions(&[features(&obs, 1)])[0];
        assert_eq!(decode(a, 1).unwrap(), ShipAction::movement(1, Direction::Up, 3));
    }

    #[test]
    fn slows_down_near_target() {
        let obs = Observation {
            allied_ships: vec![ShipState::new(1, 20, 20, 100)],
            planets_occupation: vec![PlanetState::new(22, 20, -1)],
            ..Observation::default()
        };
        let mut policy = GreedyHeuristicPolicy::new(FeatureConfig::default());
        let a = policy.select_actions(&[features(&obs, 1)])[0];
        assert_eq!(decode(a, 1).unwrap(), ShipAction::movement(1, Direction::Right, 2));
    }

    #[test]
    fn falls_back_to_enemy_planet_then_hold() {
        let obs = Observation {
            allied_ships: vec![ShipState::new(1, 20, 20, 100)],
            planets_occupation: vec![PlanetState::new(20, 60, 100)],
            ..Observation::default()
        };
        let mut policy = GreedyHeuristicPolicy::new(FeatureConfig::default());
        let a = policy.select_actions(&[features(&obs, 1)])[0];
        assert_eq!(decode(a, 1).unwrap(), ShipAction::movement(1, Direction::Down, 3));

        let alone = Observation {
            allied_ships: vec![ShipState::new(1, 20, 20, 100)],
            ..Observation::default()
        };
        assert_eq!(policy.select_actions(&[features(&alone, 1)])[0], HOLD);
    }
}
