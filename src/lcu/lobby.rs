// Lobby roster, region and gameflow phase lookups

use super::gateway::RequestGateway;
use super::types::{LobbyRosterEntry, ParticipantsResponse, RegionLocale};
use crate::logging::log_warn;

pub const PARTICIPANTS_ENDPOINT: &str = "//riotclient/chat/v5/participants";
pub const REGION_LOCALE_ENDPOINT: &str = "/riotclient/region-locale";
pub const GAMEFLOW_PHASE_ENDPOINT: &str = "/lol-gameflow/v1/gameflow-phase";

const CHAMP_SELECT_CID_MARKER: &str = "champ-select";

/// Participants of the champion select chat room, in the order the client lists them.
///
/// A failed or malformed lookup yields an empty roster.
pub async fn champ_select_roster(gateway: &dyn RequestGateway) -> Vec<LobbyRosterEntry> {
  let Some(value) = gateway.get(PARTICIPANTS_ENDPOINT).await else {
    return Vec::new();
  };

  match serde_json::from_value::<ParticipantsResponse>(value) {
    Ok(resp) => resp
      .participants
      .into_iter()
      .filter(|p| p.cid.contains(CHAMP_SELECT_CID_MARKER))
      .map(LobbyRosterEntry::from)
      .collect(),
    Err(e) => {
      log_warn(&format!("Unexpected participants payload: {}", e));
      Vec::new()
    }
  }
}

/// Web region used by the multisearch link, e.g. "euw".
pub async fn region_code(gateway: &dyn RequestGateway) -> String {
  let Some(value) = gateway.get(REGION_LOCALE_ENDPOINT).await else {
    return String::new();
  };

  match serde_json::from_value::<RegionLocale>(value) {
    Ok(locale) => locale
      .web_region
      .filter(|r| !r.is_empty())
      .or_else(|| locale.region.map(|r| r.to_lowercase()))
      .unwrap_or_default(),
    Err(e) => {
      log_warn(&format!("Unexpected region-locale payload: {}", e));
      String::new()
    }
  }
}

pub async fn current_phase(gateway: &dyn RequestGateway) -> Option<String> {
  gateway
    .get(GAMEFLOW_PHASE_ENDPOINT)
    .await
    .and_then(|v| v.as_str().map(|s| s.to_string()))
}
