//! Observation schema delivered by the game environment each step.

use serde::{Deserialize, Deserializer, Serialize};

use super::action::Action;
use super::types::{Position, Side};

/// Occupation progress value of a planet nobody has claimed.
pub const UNOCCUPIED: i32 = -1;

/// Progress threshold separating left-held (below) from right-held planets.
pub const OWNERSHIP_THRESHOLD: i32 = 50;

/// Wire form of a ship: `(id, x, y, health, firing_cooldown, move_cooldown)`.
type ShipTuple = (u32, i32, i32, i32, i32, i32);

/// Wire form of a planet: `(x, y, occupation_progress)`.
type PlanetTuple = (i32, i32, i32);

/// A visible ship, allied or enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ShipTuple", into = "ShipTuple")]
pub struct ShipState {
    pub id: u32,
    pub position: Position,
    /// Health points in `[1, 100]`.
    pub health: i32,
    /// Steps until the ship may fire again, `[0, 10]`.
    pub firing_cooldown: i32,
    /// Steps until the ship may move again, `[0, 3]`.
    pub move_cooldown: i32,
}

impl ShipState {
    pub fn new(id: u32, x: i32, y: i32, health: i32) -> Self {
        Self {
            id,
            position: Position::new(x, y),
            health,
            firing_cooldown: 0,
            move_cooldown: 0,
        }
    }

    pub fn can_fire(&self) -> bool {
        self.firing_cooldown == 0
    }

    pub fn can_move(&self) -> bool {
        self.move_cooldown == 0
    }
}

impl From<ShipTuple> for ShipState {
    fn from((id, x, y, health, firing_cooldown, move_cooldown): ShipTuple) -> Self {
        Self {
            id,
            position: Position::new(x, y),
            health,
            firing_cooldown,
            move_cooldown,
        }
    }
}

impl From<ShipState> for ShipTuple {
    fn from(s: ShipState) -> Self {
        (
            s.id,
            s.position.x,
            s.position.y,
            s.health,
            s.firing_cooldown,
            s.move_cooldown,
        )
    }
}

/// A visible planet and its occupation progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PlanetTuple", into = "PlanetTuple")]
pub struct PlanetState {
    pub position: Position,
    /// `-1` unoccupied, `0` held by the left player, `100` held by the right
    /// player; values in between mean the planet is contested.
    pub occupation_progress: i32,
}

impl PlanetState {
    pub fn new(x: i32, y: i32, occupation_progress: i32) -> Self {
        Self {
            position: Position::new(x, y),
            occupation_progress,
        }
    }

    pub fn is_unoccupied(&self) -> bool {
        self.occupation_progress == UNOCCUPIED
    }

    /// Side currently leaning on this planet, or `None` when unoccupied.
    pub fn owner(&self) -> Option<Side> {
        if self.is_unoccupied() {
            None
        } else if self.occupation_progress < OWNERSHIP_THRESHOLD {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// How firmly `side` holds this planet, in `[0, 100]`.
    ///
    /// An unoccupied planet has strength 0 for both sides.
    pub fn strength_for(&self, side: Side) -> i32 {
        if self.is_unoccupied() {
            return 0;
        }
        let progress = self.occupation_progress.clamp(0, 100);
        match side {
            Side::Left => 100 - progress,
            Side::Right => progress,
        }
    }
}

impl From<PlanetTuple> for PlanetState {
    fn from((x, y, occupation_progress): PlanetTuple) -> Self {
        PlanetState::new(x, y, occupation_progress)
    }
}

impl From<PlanetState> for PlanetTuple {
    fn from(p: PlanetState) -> Self {
        (p.position.x, p.position.y, p.occupation_progress)
    }
}

/// Per-step snapshot of the visible game state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(default)]
    pub allied_ships: Vec<ShipState>,
    #[serde(default)]
    pub enemy_ships: Vec<ShipState>,
    #[serde(default)]
    pub planets_occupation: Vec<PlanetState>,
    #[serde(default, deserialize_with = "scalar_or_first")]
    pub resources: u32,
    /// Visibility-masked board; passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<Vec<Vec<i64>>>,
}

impl Observation {
    /// Looks up one of the player's own ships by id.
    pub fn allied_ship(&self, ship_id: u32) -> Option<&ShipState> {
        self.allied_ships.iter().find(|s| s.id == ship_id)
    }
}

// Some environment builds wrap the resource counter in a one-element array.
fn scalar_or_first<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Resources {
        Scalar(u32),
        List(Vec<u32>),
    }

    Ok(match Resources::deserialize(deserializer)? {
        Resources::Scalar(n) => n,
        Resources::List(v) => v.first().copied().unwrap_or(0),
    })
}

/// How an episode stands after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeOutcome {
    Win,
    Loss,
    /// Terminated without a winner.
    Draw,
    Running,
}

impl EpisodeOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, EpisodeOutcome::Running)
    }
}

/// Feedback about the previous step, delivered alongside the next observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// `1` on a win, `-1` on a loss, `0` otherwise.
    #[serde(default)]
    pub reward: i32,
    #[serde(default)]
    pub terminated: bool,
    pub prev_obs: Observation,
    pub actions: Action,
}

impl StepInfo {
    pub fn outcome(&self) -> EpisodeOutcome {
        match self.reward {
            1 => EpisodeOutcome::Win,
            -1 => EpisodeOutcome::Loss,
            _ if self.terminated => EpisodeOutcome::Draw,
            _ => EpisodeOutcome::Running,
        }
    }
}
