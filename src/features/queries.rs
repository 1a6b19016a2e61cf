//! Lookups over a single observation, relative to one of the player's ships.
//!
//! Every `nearest_*` query returns `None` when the candidate collection is
//! empty or when the queried ship is not among the allied ships.

use crate::game::{Observation, PlanetState, Position, ShipState, Side};

/// Default reach, in cells, of [`enemy_in_range`].
pub const DEFAULT_FIRE_RANGE: i32 = 8;

pub fn self_ship(obs: &Observation, ship_id: u32) -> Option<&ShipState> {
    obs.allied_ship(ship_id)
}

/// Allied ships other than `ship_id`.
pub fn allied_ships(obs: &Observation, ship_id: u32) -> Vec<&ShipState> {
    obs.allied_ships.iter().filter(|s| s.id != ship_id).collect()
}

pub fn enemy_ships(obs: &Observation) -> &[ShipState] {
    &obs.enemy_ships
}

pub fn self_ship_coords(obs: &Observation, ship_id: u32) -> Option<Position> {
    self_ship(obs, ship_id).map(|s| s.position)
}

pub fn self_ship_health(obs: &Observation, ship_id: u32) -> Option<i32> {
    self_ship(obs, ship_id).map(|s| s.health)
}

/// Squared Euclidean distance between two cells.
pub fn distance(a: Position, b: Position) -> i64 {
    a.distance_to(&b)
}

/// Ship from `ships` closest to `ship_id`.
pub fn nearest_ship<'a, I>(obs: &Observation, ships: I, ship_id: u32) -> Option<&'a ShipState>
where
    I: IntoIterator<Item = &'a ShipState>,
{
    let origin = self_ship_coords(obs, ship_id)?;
    ships
        .into_iter()
        .min_by_key(|s| distance(origin, s.position))
}

/// Planet from `planets` closest to `ship_id`.
pub fn nearest_planet<'a, I>(obs: &Observation, planets: I, ship_id: u32) -> Option<&'a PlanetState>
where
    I: IntoIterator<Item = &'a PlanetState>,
{
    let origin = self_ship_coords(obs, ship_id)?;
    planets
        .into_iter()
        .min_by_key(|p| distance(origin, p.position))
}

pub fn nearest_allied_ship(obs: &Observation, ship_id: u32) -> Option<&ShipState> {
    nearest_ship(obs, allied_ships(obs, ship_id), ship_id)
}

pub fn nearest_enemy_ship(obs: &Observation, ship_id: u32) -> Option<&ShipState> {
    nearest_ship(obs, enemy_ships(obs), ship_id)
}

pub fn allied_ships_count(obs: &Observation, ship_id: u32) -> usize {
    obs.allied_ships.iter().filter(|s| s.id != ship_id).count()
}

pub fn enemy_ships_count(obs: &Observation) -> usize {
    obs.enemy_ships.len()
}

pub fn planets(obs: &Observation) -> &[PlanetState] {
    &obs.planets_occupation
}

pub fn unoccupied_planets(obs: &Observation) -> Vec<&PlanetState> {
    planets(obs).iter().filter(|p| p.is_unoccupied()).collect()
}

/// Planets leaning toward the left player (progress in `[0, 50)`).
pub fn first_player_planets(obs: &Observation) -> Vec<&PlanetState> {
    planets_owned_by(obs, Side::Left)
}

/// Planets leaning toward the right player (progress in `[50, 100]`).
pub fn second_player_planets(obs: &Observation) -> Vec<&PlanetState> {
    planets_owned_by(obs, Side::Right)
}

fn planets_owned_by(obs: &Observation, side: Side) -> Vec<&PlanetState> {
    planets(obs)
        .iter()
        .filter(|p| p.owner() == Some(side))
        .collect()
}

pub fn allied_planets(obs: &Observation, side: Side) -> Vec<&PlanetState> {
    planets_owned_by(obs, side)
}

pub fn enemy_planets(obs: &Observation, side: Side) -> Vec<&PlanetState> {
    planets_owned_by(obs, side.opponent())
}

pub fn allied_planets_count(obs: &Observation, side: Side) -> usize {
    allied_planets(obs, side).len()
}

pub fn enemy_planets_count(obs: &Observation, side: Side) -> usize {
    enemy_planets(obs, side).len()
}

pub fn nearest_unoccupied_planet(obs: &Observation, ship_id: u32) -> Option<&PlanetState> {
    nearest_planet(obs, unoccupied_planets(obs), ship_id)
}

pub fn nearest_allied_planet(obs: &Observation, side: Side, ship_id: u32) -> Option<&PlanetState> {
    nearest_planet(obs, allied_planets(obs, side), ship_id)
}

pub fn nearest_enemy_planet(obs: &Observation, side: Side, ship_id: u32) -> Option<&PlanetState> {
    nearest_planet(obs, enemy_planets(obs, side), ship_id)
}

/// Flags `[N, S, W, E]` set when an enemy sits in a straight line from the
/// ship, at most `reach` cells away.
///
/// Returns all zeros if the ship is not present.
pub fn enemy_in_range(obs: &Observation, ship_id: u32, reach: i32) -> [u8; 4] {
    let mut result = [0u8; 4];
    let Some(me) = self_ship_coords(obs, ship_id) else {
        return result;
    };
    let within = |d: i32| d > 0 && d <= reach;

    for enemy in enemy_ships(obs) {
        let Position { x, y } = enemy.position;
        if me.x == x && within(me.y - y) {
            result[0] = 1;
        }
        if me.x == x && within(y - me.y) {
            result[1] = 1;
        }
        if me.y == y && within(me.x - x) {
            result[2] = 1;
        }
        if me.y == y && within(x - me.x) {
            result[3] = 1;
        }
        if result.iter().all(|&f| f == 1) {
            break;
        }
    }

    result
}

/// Planet located exactly at `coords`, whoever holds it.
pub fn base_planet(obs: &Observation, coords: Position) -> Option<&PlanetState> {
    planets(obs).iter().find(|p| p.position == coords)
}

/// Allied planet at `coords`; `None` once the base has been lost or is hidden.
pub fn self_base_planet(obs: &Observation, side: Side, coords: Position) -> Option<&PlanetState> {
    allied_planets(obs, side)
        .into_iter()
        .find(|p| p.position == coords)
}

/// Enemy planet at `coords`; `None` when not visible or no longer enemy-held.
pub fn enemy_base_planet(obs: &Observation, side: Side, coords: Position) -> Option<&PlanetState> {
    enemy_planets(obs, side)
        .into_iter()
        .find(|p| p.position == coords)
}

/// How firmly `side` holds the planet at `coords`, in `[0, 100]`.
pub fn base_health(obs: &Observation, side: Side, coords: Position) -> Option<i32> {
    base_planet(obs, coords).map(|p| p.strength_for(side))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs() -> Observation {
        Observation {
            allied_ships: vec![
                ShipState::new(1, 10, 10, 100),
                ShipState::new(2, 12, 10, 90),
                ShipState::new(3, 40, 40, 50),
            ],
            enemy_ships: vec![ShipState::new(8, 10, 4, 70), ShipState::new(9, 30, 10, 70)],
            planets_occupation: vec![
                PlanetState::new(9, 9, 0),
                PlanetState::new(20, 20, -1),
                PlanetState::new(60, 60, -1),
                PlanetState::new(90, 90, 100),
                PlanetState::new(50, 10, 75),
            ],
            resources: 10,
            map: None,
        }
    }

    #[test]
    fn allied_ships_exclude_self() {
        let o = obs();
        let ids: Vec<u32> = allied_ships(&o, 1).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(allied_ships_count(&o, 1), 2);
        assert_eq!(enemy_ships_count(&o), 2);
    }

    #[test]
    fn nearest_ships() {
        let o = obs();
        assert_eq!(nearest_allied_ship(&o, 1).map(|s| s.id), Some(2));
        assert_eq!(nearest_enemy_ship(&o, 1).map(|s| s.id), Some(8));
        assert_eq!(nearest_enemy_ship(&o, 3).map(|s| s.id), Some(9));
    }

    #[test]
    fn nearest_returns_none_on_empty_collection() {
        let mut o = obs();
        o.enemy_ships.clear();
        o.allied_ships.truncate(1);
        assert!(nearest_enemy_ship(&o, 1).is_none());
        assert!(nearest_allied_ship(&o, 1).is_none());
        assert!(nearest_planet(&o, Vec::<&PlanetState>::new(), 1).is_none());
    }

    #[test]
    fn nearest_returns_none_for_unknown_ship() {
        let o = obs();
        assert!(nearest_enemy_ship(&o, 77).is_none());
        assert!(nearest_unoccupied_planet(&o, 77).is_none());
        assert_eq!(self_ship_health(&o, 77), None);
        assert_eq!(self_ship_health(&o, 2), Some(90));
    }

    #[test]
    fn planet_partitions_by_side() {
        let o = obs();
        assert_eq!(unoccupied_planets(&o).len(), 2);
        assert_eq!(first_player_planets(&o).len(), 1);
        assert_eq!(second_player_planets(&o).len(), 2);
        assert_eq!(allied_planets_count(&o, Side::Left), 1);
        assert_eq!(enemy_planets_count(&o, Side::Left), 2);
        assert_eq!(allied_planets_count(&o, Side::Right), 2);
        assert_eq!(enemy_planets_count(&o, Side::Right), 1);
    }

    #[test]
    fn nearest_planets() {
        let o = obs();
        assert_eq!(
            nearest_unoccupied_planet(&o, 1).map(|p| p.position),
            Some(Position::new(20, 20))
        );
        assert_eq!(
            nearest_allied_planet(&o, Side::Left, 1).map(|p| p.position),
            Some(Position::new(9, 9))
        );
        assert_eq!(
            nearest_enemy_planet(&o, Side::Left, 1).map(|p| p.position),
            Some(Position::new(50, 10))
        );
    }

    #[test]
    fn enemy_in_range_flags() {
        let o = obs();
        // enemy 8 is 6 cells north of ship 1; enemy 9 is 20 cells east (out of reach)
        assert_eq!(enemy_in_range(&o, 1, DEFAULT_FIRE_RANGE), [1, 0, 0, 0]);
        assert_eq!(enemy_in_range(&o, 1, 20), [1, 0, 0, 1]);
        assert_eq!(enemy_in_range(&o, 3, DEFAULT_FIRE_RANGE), [0, 0, 0, 0]);
        assert_eq!(enemy_in_range(&o, 99, DEFAULT_FIRE_RANGE), [0, 0, 0, 0]);
    }

    #[test]
    fn enemy_on_same_cell_is_not_in_range() {
        let mut o = obs();
        o.enemy_ships = vec![ShipState::new(8, 10, 10, 70)];
        assert_eq!(enemy_in_range(&o, 1, DEFAULT_FIRE_RANGE), [0, 0, 0, 0]);
    }

    #[test]
    fn base_lookups() {
        let o = obs();
        let home = Position::new(9, 9);
        let away = Position::new(90, 90);
        assert!(self_base_planet(&o, Side::Left, home).is_some());
        assert!(self_base_planet(&o, Side::Left, away).is_none());
        assert!(enemy_base_planet(&o, Side::Left, away).is_some());
        assert_eq!(base_health(&o, Side::Left, home), Some(100));
        assert_eq!(base_health(&o, Side::Right, away), Some(100));
        assert_eq!(base_health(&o, Side::Left, away), Some(0));
        assert_eq!(base_health(&o, Side::Left, Position::new(1, 1)), None);
    }
}
