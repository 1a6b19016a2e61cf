//! Line-oriented driver: one JSON request in, one JSON action out.
//!
//! Each input line is `{"obs": <Observation>, "info": <StepInfo or null>}`.
//! An `info` without `prev_obs` (such as the `{}` sent on reset) counts as
//! the first step of an episode. The reply is the serialized [`Action`]
//! followed by a newline. Blank lines are skipped. A malformed line, including
//! one that is not valid UTF-8, is logged and answered with an empty action.

use std::io::{BufRead, Write};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use super::trait_::Agent;
use crate::error::Result;
use crate::game::{Action, Observation, StepInfo};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub obs: Observation,
    #[serde(default, deserialize_with = "step_info_or_reset")]
    pub info: Option<StepInfo>,
}

fn step_info_or_reset<'de, D>(deserializer: D) -> std::result::Result<Option<StepInfo>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(value) if value.get("prev_obs").is_some() => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Answers every line of `input` on `output` until EOF. Returns the number
/// of requests served.
pub fn run<A, R, W>(agent: &mut A, mut input: R, mut output: W) -> Result<usize>
where
    A: Agent + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut served = 0;
    let mut line = Vec::new();
    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let action = match serde_json::from_slice::<Request>(&line) {
            Ok(req) => agent.get_action(&req.obs, req.info.as_ref()).unwrap_or_else(|e| {
                warn!(agent = agent.name(), error = %e, "agent failed; sending empty action");
                Action::default()
            }),
            Err(e) => {
                warn!(error = %e, "malformed request");
                Action::default()
            }
        };

        serde_json::to_writer(&mut output, &action)?;
        output.write_all(b"\n")?;
        output.flush()?;
        served += 1;
        debug!(served, ships = action.ships_actions.len(), "step answered");
    }
    Ok(served)
}
