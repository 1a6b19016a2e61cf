//! Observation -> fixed-size feature vector for a single ship.
//!
//! Layout (`FEATURE_DIM` = 26 entries, all `f32`):
//!   [0:2]   own position (x, y), normalized by map size
//!   [2]     own health / 100
//!   [3]     fire ready
//!   [4]     move ready
//!   [5:7]   nearest allied ship (x, y)
//!   [7:9]   nearest enemy ship (x, y)
//!   [9:11]  nearest unoccupied planet (x, y)
//!   [11:13] nearest allied planet (x, y)
//!   [13:15] nearest enemy planet (x, y)
//!   [15]    own base health / 100
//!   [16]    enemy base health / 100
//!   [17:21] counts: allied ships, enemy ships, allied planets, enemy planets
//!   [21]    resources
//!   [22:26] enemy in range: [N, S, W, E]
//!
//! Coordinates that cannot be resolved are written as `missing_coord`
//! (default `-1.0`); an unseen base has health `0.0`.

use tracing::debug;

use super::config::FeatureConfig;
use super::queries;
use crate::game::{Observation, Position, Side};

/// Number of features per ship.
pub const FEATURE_DIM: usize = 26;

pub const FEAT_POSITION: usize = 0;
pub const FEAT_HEALTH: usize = 2;
pub const FEAT_FIRE_READY: usize = 3;
pub const FEAT_MOVE_READY: usize = 4;
pub const FEAT_NEAREST_ALLY: usize = 5;
pub const FEAT_NEAREST_ENEMY: usize = 7;
pub const FEAT_NEAREST_FREE_PLANET: usize = 9;
pub const FEAT_NEAREST_ALLIED_PLANET: usize = 11;
pub const FEAT_NEAREST_ENEMY_PLANET: usize = 13;
pub const FEAT_OWN_BASE_HEALTH: usize = 15;
pub const FEAT_ENEMY_BASE_HEALTH: usize = 16;
pub const FEAT_COUNTS: usize = 17;
pub const FEAT_RESOURCES: usize = 21;
pub const FEAT_IN_RANGE: usize = 22;

/// Home and enemy base coordinates for one episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseCoords {
    pub own: Position,
    pub enemy: Position,
}

impl BaseCoords {
    /// Infers base coordinates from an early observation.
    ///
    /// The own base is the allied planet closest to the fleet's centroid (or to
    /// the side's home corner when no ship is visible). Bases are placed
    /// symmetrically, so the enemy base is the point reflection of ours.
    pub fn locate(obs: &Observation, side: Side, map_size: i32) -> Self {
        let anchor = fleet_centroid(obs).unwrap_or_else(|| match side {
            Side::Left => Position::new(0, 0),
            Side::Right => Position::new(map_size - 1, map_size - 1),
        });

        let own = queries::allied_planets(obs, side)
            .into_iter()
            .min_by_key(|p| p.position.distance_to(&anchor))
            .map(|p| p.position)
            .unwrap_or(anchor);

        Self {
            own,
            enemy: own.mirrored(map_size),
        }
    }
}

fn fleet_centroid(obs: &Observation) -> Option<Position> {
    let n = obs.allied_ships.len() as i32;
    if n == 0 {
        return None;
    }
    let (sx, sy) = obs
        .allied_ships
        .iter()
        .fold((0, 0), |(sx, sy), s| (sx + s.position.x, sy + s.position.y));
    Some(Position::new(sx / n, sy / n))
}

/// Builds per-ship feature vectors and owns the per-episode base cache.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    side: Side,
    config: FeatureConfig,
    bases: Option<BaseCoords>,
}

impl FeatureExtractor {
    pub fn new(side: Side, config: FeatureConfig) -> Self {
        Self {
            side,
            config,
            bases: None,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Base coordinates, computed from `obs` the first time they are needed.
    pub fn bases(&mut self, obs: &Observation) -> BaseCoords {
        if let Some(bases) = self.bases {
            return bases;
        }
        let bases = BaseCoords::locate(obs, self.side, self.config.map_size);
        debug!(side = %self.side, own = %bases.own, enemy = %bases.enemy, "located bases");
        self.bases = Some(bases);
        bases
    }

    pub fn cached_bases(&self) -> Option<BaseCoords> {
        self.bases
    }

    /// Forgets the base cache; call between episodes.
    pub fn reset(&mut self) {
        self.bases = None;
    }

    /// Encodes the view of `ship_id`. Returns `None` if the ship is not allied.
    pub fn extract(&mut self, obs: &Observation, ship_id: u32) -> Option<Vec<f32>> {
        let me = *queries::self_ship(obs, ship_id)?;
        let bases = self.bases(obs);
        let cfg = &self.config;
        let side = self.side;
        let mut v = vec![0.0f32; FEATURE_DIM];

        let (x, y) = me.position.normalized(cfg.map_extent());
        v[FEAT_POSITION] = x;
        v[FEAT_POSITION + 1] = y;
        v[FEAT_HEALTH] = me.health as f32 / 100.0;
        v[FEAT_FIRE_READY] = flag(me.can_fire());
        v[FEAT_MOVE_READY] = flag(me.can_move());

        self.put_coords(
            &mut v,
            FEAT_NEAREST_ALLY,
            queries::nearest_allied_ship(obs, ship_id).map(|s| s.position),
        );
        self.put_coords(
            &mut v,
            FEAT_NEAREST_ENEMY,
            queries::nearest_enemy_ship(obs, ship_id).map(|s| s.position),
        );
        self.put_coords(
            &mut v,
            FEAT_NEAREST_FREE_PLANET,
            queries::nearest_unoccupied_planet(obs, ship_id).map(|p| p.position),
        );
        self.put_coords(
            &mut v,
            FEAT_NEAREST_ALLIED_PLANET,
            queries::nearest_allied_planet(obs, side, ship_id).map(|p| p.position),
        );
        self.put_coords(
            &mut v,
            FEAT_NEAREST_ENEMY_PLANET,
            queries::nearest_enemy_planet(obs, side, ship_id).map(|p| p.position),
        );

        v[FEAT_OWN_BASE_HEALTH] = queries::self_base_planet(obs, side, bases.own)
            .map_or(0.0, |p| p.strength_for(side) as f32 / 100.0);
        v[FEAT_ENEMY_BASE_HEALTH] = queries::enemy_base_planet(obs, side, bases.enemy)
            .map_or(0.0, |p| p.strength_for(side.opponent()) as f32 / 100.0);

        let counts = [
            queries::allied_ships_count(obs, ship_id),
            queries::enemy_ships_count(obs),
            queries::allied_planets_count(obs, side),
            queries::enemy_planets_count(obs, side),
        ];
        for (i, c) in counts.iter().enumerate() {
            v[FEAT_COUNTS + i] = *c as f32 / cfg.count_scale;
        }
        v[FEAT_RESOURCES] = obs.resources as f32 / cfg.resource_scale;

        let in_range = queries::enemy_in_range(obs, ship_id, cfg.fire_range);
        for (i, f) in in_range.iter().enumerate() {
            v[FEAT_IN_RANGE + i] = *f as f32;
        }

        Some(v)
    }

    /// Encodes every allied ship, in observation order.
    pub fn extract_all(&mut self, obs: &Observation) -> Vec<(u32, Vec<f32>)> {
        obs.allied_ships
            .iter()
            .filter_map(|s| self.extract(obs, s.id).map(|f| (s.id, f)))
            .collect()
    }

    fn put_coords(&self, v: &mut [f32], offset: usize, pos: Option<Position>) {
        let (x, y) = match pos {
            Some(p) => p.normalized(self.config.map_extent()),
            None => (self.config.missing_coord, self.config.missing_coord),
        };
        v[offset] = x;
        v[offset + 1] = y;
    }
}

#[inline]
fn flag(b: bool) -> f32 {
    if b {
        1.0
    } else {
        0.0
    }
}
