//! Compact 17-way action space for per-ship policies.
//!
//! ```text
//! 0                 hold (move with speed 0)
//! 1 + 4*d + 0..=2   move toward direction d with speed 1..=3
//! 1 + 4*d + 3       fire toward direction d
//! ```
//!
//! with `d` the game direction index (0=right, 1=down, 2=left, 3=up).

use crate::error::{Error, Result};
use crate::game::{ActionType, Direction, ShipAction, MAX_SPEED};

/// Number of entries in the table.
pub const ACTION_COUNT: usize = 17;

/// Index of the hold action.
pub const HOLD: usize = 0;

const SLOTS_PER_DIRECTION: usize = 4;
const FIRE_SLOT: usize = 3;

/// Maps a ship command to its table index.
///
/// Every zero-speed move collapses onto [`HOLD`], whatever its direction.
pub fn encode(action: &ShipAction) -> usize {
    let d = action.direction.index() as usize;
    match action.action_type {
        ActionType::Fire => 1 + d * SLOTS_PER_DIRECTION + FIRE_SLOT,
        ActionType::Move if action.speed == 0 => HOLD,
        ActionType::Move => {
            let speed = action.speed.min(MAX_SPEED) as usize;
            1 + d * SLOTS_PER_DIRECTION + (speed - 1)
        }
    }
}

/// Expands a table index into a command for `ship_id`.
pub fn decode(index: usize, ship_id: u32) -> Result<ShipAction> {
    if index == HOLD {
        return Ok(ShipAction::hold(ship_id));
    }
    if index >= ACTION_COUNT {
        return Err(Error::InvalidActionIndex(index));
    }
    let slot = index - 1;
    let direction = Direction::all()[slot / SLOTS_PER_DIRECTION];
    let kind = slot % SLOTS_PER_DIRECTION;
    Ok(if kind == FIRE_SLOT {
        ShipAction::fire(ship_id, direction)
    } else {
        ShipAction::movement(ship_id, direction, kind as u8 + 1)
    })
}
