//! Game schema for the octospace environment.
//!
//! The environment itself is external; this module only models what it
//! sends (observations, step feedback) and what it expects back (actions).

pub mod action;
pub mod observation;
pub mod types;

pub use action::{Action, ShipAction, MAX_CONSTRUCTION, MAX_SPEED};
pub use observation::{
    EpisodeOutcome, Observation, PlanetState, ShipState, StepInfo, OWNERSHIP_THRESHOLD, UNOCCUPIED,
};
pub use types::{ActionType, Direction, Position, Side};
