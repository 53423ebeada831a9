// Match history lookup and its columnar projection

use serde::Deserialize;
use serde_json::Value;

use crate::lcu::RequestGateway;
use crate::logging::{log_debug, log_warn};

pub const DEFAULT_WINDOW_START: u32 = 0;
pub const DEFAULT_WINDOW_END: u32 = 21;
pub const ITEM_SLOTS: usize = 7;

/// A numeric stat as the client may send it: a number, or a comma-joined string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
  Int(i64),
  Float(f64),
  Text(String),
  Missing,
}

impl Default for NumericField {
  fn default() -> Self {
    Self::Int(0)
  }
}

impl NumericField {
  pub fn total(&self) -> i64 {
    match self {
      Self::Int(v) => *v,
      Self::Float(v) => v.round() as i64,
      Self::Text(s) => s
        .split(',')
        .filter_map(|part| part.trim().parse::<f64>().ok())
        .map(|v| v.round() as i64)
        .sum(),
      Self::Missing => 0,
    }
  }
}

/// Win flag as a bool or as its "true"/"false" string form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WinField {
  Flag(bool),
  Text(String),
  Missing,
}

impl Default for WinField {
  fn default() -> Self {
    Self::Flag(false)
  }
}

impl WinField {
  pub fn label(&self) -> &'static str {
    let won = match self {
      Self::Flag(b) => *b,
      Self::Text(s) => s.trim().eq_ignore_ascii_case("true"),
      Self::Missing => false,
    };
    if won {
      "true"
    } else {
      "false"
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStats {
  #[serde(default)]
  pub kills: NumericField,
  #[serde(default)]
  pub deaths: NumericField,
  #[serde(default)]
  pub assists: NumericField,
  #[serde(default)]
  pub neutral_minions_killed: NumericField,
  #[serde(default)]
  pub total_minions_killed: NumericField,
  #[serde(default)]
  pub gold_earned: NumericField,
  #[serde(default)]
  pub win: WinField,
  #[serde(default)]
  pub caused_early_surrender: bool,
  #[serde(default)]
  pub item0: Option<i64>,
  #[serde(default)]
  pub item1: Option<i64>,
  #[serde(default)]
  pub item2: Option<i64>,
  #[serde(default)]
  pub item3: Option<i64>,
  #[serde(default)]
  pub item4: Option<i64>,
  #[serde(default)]
  pub item5: Option<i64>,
  #[serde(default)]
  pub item6: Option<i64>,
}

impl RawStats {
  pub fn items(&self) -> [Option<i64>; ITEM_SLOTS] {
    [
      self.item0, self.item1, self.item2, self.item3, self.item4, self.item5, self.item6,
    ]
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTimeline {
  #[serde(default)]
  pub lane: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParticipant {
  #[serde(default)]
  pub champion_id: i64,
  #[serde(default)]
  pub spell1_id: i64,
  #[serde(default)]
  pub spell2_id: i64,
  #[serde(default)]
  pub stats: RawStats,
  #[serde(default)]
  pub timeline: RawTimeline,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGame {
  #[serde(default)]
  pub queue_id: i64,
  #[serde(default)]
  pub game_mode: String,
  #[serde(default)]
  pub game_type: String,
  #[serde(default)]
  pub participants: Vec<RawParticipant>,
}

/// Per-player columns; index `i` of every column refers to the same match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchHistoryBundle {
  pub queue_ids: Vec<i64>,
  pub game_modes: Vec<String>,
  pub game_types: Vec<String>,
  pub champion_ids: Vec<i64>,
  pub kills: Vec<i64>,
  pub deaths: Vec<i64>,
  pub assists: Vec<i64>,
  pub minions: Vec<i64>,
  pub gold: Vec<i64>,
  pub wins: Vec<String>,
  pub early_surrenders: Vec<bool>,
  pub lanes: Vec<String>,
  pub spell1_ids: Vec<i64>,
  pub spell2_ids: Vec<i64>,
  pub items: Vec<[Option<i64>; ITEM_SLOTS]>,
}

impl MatchHistoryBundle {
  pub fn len(&self) -> usize {
    self.wins.len()
  }

  pub fn is_empty(&self) -> bool {
    self.wins.is_empty()
  }

  fn push(&mut self, game: &RawGame, participant: &RawParticipant) {
    let stats = &participant.stats;
    self.queue_ids.push(game.queue_id);
    self.game_modes.push(game.game_mode.clone());
    self.game_types.push(game.game_type.clone());
    self.champion_ids.push(participant.champion_id);
    self.kills.push(stats.kills.total());
    self.deaths.push(stats.deaths.total());
    self.assists.push(stats.assists.total());
    self
      .minions
      .push(stats.neutral_minions_killed.total() + stats.total_minions_killed.total());
    self.gold.push(stats.gold_earned.total());
    self.wins.push(stats.win.label().to_string());
    self.early_surrenders.push(stats.caused_early_surrender);
    self
      .lanes
      .push(participant.timeline.lane.clone().unwrap_or_default());
    self.spell1_ids.push(participant.spell1_id);
    self.spell2_ids.push(participant.spell2_id);
    self.items.push(stats.items());
  }
}

pub fn match_history_endpoint(puuid: &str, window_start: u32, window_end: u32) -> String {
  format!(
    "/lol-match-history/v1/products/lol/{}/matches?begIndex={}&endIndex={}",
    puuid, window_start, window_end
  )
}

/// Project raw games into columns, reading only the first participant of each.
///
/// Games without participants are skipped whole. `None` when nothing is left.
pub fn bundle_from_games(games: &[RawGame]) -> Option<MatchHistoryBundle> {
  let mut bundle = MatchHistoryBundle::default();
  for game in games {
    match game.participants.first() {
      Some(participant) => bundle.push(game, participant),
      None => log_debug("Skipping match without participants"),
    }
  }

  if bundle.is_empty() {
    None
  } else {
    Some(bundle)
  }
}

/// Extract `games.games` from the match history payload.
pub fn parse_match_list(payload: &Value) -> Option<Vec<RawGame>> {
  let list = payload.get("games")?.get("games")?;
  if !list.is_array() {
    return None;
  }
  match serde_json::from_value::<Vec<RawGame>>(list.clone()) {
    Ok(games) => Some(games),
    Err(e) => {
      log_warn(&format!("Unexpected match list shape: {}", e));
      None
    }
  }
}

/// `None` means no statistics are available for this player, which is not the
/// same as a player with zero games.
pub async fn fetch_for_player(
  gateway: &dyn RequestGateway,
  puuid: &str,
  window_start: u32,
  window_end: u32,
) -> Option<MatchHistoryBundle> {
  let endpoint = match_history_endpoint(puuid, window_start, window_end);
  let payload = gateway.get(&endpoint).await?;

  let Some(games) = parse_match_list(&payload) else {
    log_warn(&format!("No match list for puuid {}", puuid));
    return None;
  };

  bundle_from_games(&games)
}
