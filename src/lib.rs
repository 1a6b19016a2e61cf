//! octospace - starter toolkit for the octospace competition
//!
//! Observation schema and feature extraction for the two-player space game,
//! the 17-way action table, baseline and DQN agents, plus the image
//! watermark, dataset and submission helpers used by the side tasks.

pub mod agents;
pub mod dataset;
pub mod error;
pub mod features;
pub mod game;
pub mod logging;
pub mod rl;
pub mod submit;
pub mod watermark;

pub use error::{Error, Result};
