//! Action schema returned to the game environment each step.

use serde::{Deserialize, Serialize};

use super::types::{ActionType, Direction};
use crate::error::Error;

/// Maximum number of cells a ship can move in one step.
pub const MAX_SPEED: u8 = 3;

/// Maximum number of ships that can be queued for construction per step.
pub const MAX_CONSTRUCTION: u32 = 10;

/// Command for a single ship: `[ship_id, action_type, direction, speed]`.
///
/// The speed is ignored when firing and may be omitted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<i64>")]
pub struct ShipAction {
    pub ship_id: u32,
    pub action_type: ActionType,
    pub direction: Direction,
    pub speed: u8,
}

impl ShipAction {
    /// Moves `speed` cells toward `direction`; speed is capped at [`MAX_SPEED`].
    pub fn movement(ship_id: u32, direction: Direction, speed: u8) -> Self {
        Self {
            ship_id,
            action_type: ActionType::Move,
            direction,
            speed: speed.min(MAX_SPEED),
        }
    }

    pub fn fire(ship_id: u32, direction: Direction) -> Self {
        Self {
            ship_id,
            action_type: ActionType::Fire,
            direction,
            speed: 0,
        }
    }

    /// A zero-speed move, which leaves the ship in place.
    pub fn hold(ship_id: u32) -> Self {
        Self::movement(ship_id, Direction::Right, 0)
    }

    pub fn is_hold(&self) -> bool {
        self.action_type == ActionType::Move && self.speed == 0
    }
}

impl TryFrom<Vec<i64>> for ShipAction {
    type Error = Error;

    fn try_from(raw: Vec<i64>) -> Result<Self, Self::Error> {
        let field = |idx: usize, name: &'static str| {
            raw.get(idx).copied().ok_or(Error::InvalidShipAction {
                field: name,
                value: raw.len() as i64,
            })
        };

        let id = field(0, "ship_id")?;
        let ship_id = u32::try_from(id).map_err(|_| Error::InvalidShipAction {
            field: "ship_id",
            value: id,
        })?;

        let kind = field(1, "action_type")?;
        let action_type = u8::try_from(kind)
            .ok()
            .and_then(ActionType::from_index)
            .ok_or(Error::InvalidShipAction {
                field: "action_type",
                value: kind,
            })?;

        let dir = field(2, "direction")?;
        let direction = u8::try_from(dir)
            .ok()
            .and_then(Direction::from_index)
            .ok_or(Error::InvalidShipAction {
                field: "direction",
                value: dir,
            })?;

        let speed = raw.get(3).copied().unwrap_or(0);
        if !(0..=MAX_SPEED as i64).contains(&speed) {
            return Err(Error::InvalidShipAction {
                field: "speed",
                value: speed,
            });
        }

        Ok(Self {
            ship_id,
            action_type,
            direction,
            speed: speed as u8,
        })
    }
}

impl From<ShipAction> for Vec<i64> {
    fn from(a: ShipAction) -> Self {
        vec![
            a.ship_id as i64,
            a.action_type.index() as i64,
            a.direction.index() as i64,
            a.speed as i64,
        ]
    }
}

/// Full per-step command: one entry per ship plus a construction order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAction")]
pub struct Action {
    #[serde(default)]
    pub ships_actions: Vec<ShipAction>,
    #[serde(default)]
    pub construction: u32,
}

#[derive(Deserialize)]
struct RawAction {
    #[serde(default)]
    ships_actions: Vec<ShipAction>,
    #[serde(default)]
    construction: i64,
}

impl TryFrom<RawAction> for Action {
    type Error = Error;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        if !(0..=MAX_CONSTRUCTION as i64).contains(&raw.construction) {
            return Err(Error::InvalidConstruction(raw.construction));
        }
        Ok(Self {
            ships_actions: raw.ships_actions,
            construction: raw.construction as u32,
        })
    }
}

impl Action {
    pub fn new(ships_actions: Vec<ShipAction>, construction: u32) -> Self {
        Self {
            ships_actions,
            construction: construction.min(MAX_CONSTRUCTION),
        }
    }

    /// Returns the command issued to `ship_id`, if any.
    pub fn for_ship(&self, ship_id: u32) -> Option<&ShipAction> {
        self.ships_actions.iter().find(|a| a.ship_id == ship_id)
    }
}
