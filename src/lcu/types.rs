// Types for the local client API

use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcuConnection {
  pub port: String,
  pub token: String,
}

impl LcuConnection {
  pub fn base_url(&self) -> String {
    format!("https://127.0.0.1:{}", self.port)
  }

  pub fn ws_url(&self) -> String {
    format!("wss://127.0.0.1:{}/", self.port)
  }

  pub fn auth_header(&self) -> String {
    let auth = general_purpose::STANDARD.encode(format!("riot:{}", self.token));
    format!("Basic {}", auth)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConversation {
  pub id: String,
  #[serde(rename = "type", default)]
  pub conversation_type: String,
}

// Riot Client chat participants use snake_case field names
#[derive(Debug, Clone, Deserialize)]
pub struct ChatParticipant {
  #[serde(default)]
  pub cid: String,
  #[serde(default)]
  pub game_name: String,
  #[serde(default)]
  pub game_tag: String,
  #[serde(default)]
  pub puuid: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantsResponse {
  #[serde(default)]
  pub participants: Vec<ChatParticipant>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionLocale {
  #[serde(default)]
  pub web_region: Option<String>,
  #[serde(default)]
  pub region: Option<String>,
}

/// One lobby participant, in the order the client lists them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LobbyRosterEntry {
  pub puuid: String,
  pub game_name: String,
  pub game_tag: String,
}

impl LobbyRosterEntry {
  pub fn riot_id(&self) -> String {
    format!("{}#{}", self.game_name, self.game_tag)
  }
}

impl From<ChatParticipant> for LobbyRosterEntry {
  fn from(p: ChatParticipant) -> Self {
    Self {
      puuid: p.puuid,
      game_name: p.game_name,
      game_tag: p.game_tag,
    }
  }
}
