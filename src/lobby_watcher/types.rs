// Types and constants for the lobby watcher

use serde_json::{json, Value};

use crate::error::LcuError;

pub const GAMEFLOW_PHASE_URI: &str = "/lol-gameflow/v1/gameflow-phase";
pub const CHAMP_SELECT_PHASE: &str = "ChampSelect";

// WAMP opcode for subscribe
const WAMP_SUBSCRIBE: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverState {
  Disconnected,
  Subscribed,
  InChampionSelect,
  Idle,
}

/// What the caller should do after feeding the observer a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverAction {
  None,
  RunPipeline,
  Teardown,
}

/// `OnJsonApiEvent` plus the phase URI with slashes turned into underscores.
pub fn subscription_topic() -> String {
  format!("OnJsonApiEvent{}", GAMEFLOW_PHASE_URI.replace('/', "_"))
}

pub fn subscription_frame() -> String {
  json!([WAMP_SUBSCRIBE, subscription_topic()]).to_string()
}

/// Pull the phase name out of `[opcode, topic, { data: <phase>, ... }]`.
pub fn decode_phase(text: &str) -> Result<String, LcuError> {
  let value: Value = serde_json::from_str(text)?;
  let Value::Array(frame) = value else {
    return Err(LcuError::EventDecode("frame is not an array".to_string()));
  };

  frame
    .get(2)
    .and_then(|payload| payload.get("data"))
    .and_then(|data| data.as_str())
    .map(|phase| phase.to_string())
    .ok_or_else(|| LcuError::EventDecode("no phase at index 2".to_string()))
}
