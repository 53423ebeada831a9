// Ranked standing lookup and rank label formatting

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

use crate::lcu::RequestGateway;
use crate::logging::log_warn;

pub const SOLO_QUEUE: &str = "RANKED_SOLO_5x5";
pub const FLEX_QUEUE: &str = "RANKED_FLEX_SR";

const DIVISIONED_TIERS: [&str; 7] = [
  "IRON", "BRONZE", "SILVER", "GOLD", "PLATINUM", "EMERALD", "DIAMOND",
];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStanding {
  #[serde(default)]
  pub tier: Option<String>,
  #[serde(default)]
  pub division: Option<String>,
  #[serde(default)]
  pub is_provisional: bool,
}

impl QueueStanding {
  pub fn is_valid(&self) -> bool {
    let tier = self.tier.as_deref().unwrap_or("");
    let division = self.division.as_deref().unwrap_or("");
    !tier.is_empty() && !division.is_empty() && tier != "NA" && !self.is_provisional
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedStatsResponse {
  #[serde(default)]
  pub queue_map: HashMap<String, QueueStanding>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankedStanding {
  /// Divisioned tier: first letter of the tier plus the decoded division.
  /// A division that is not a Roman numeral leaves just the letter.
  Division { letter: char, division: Option<u32> },
  /// Tier without divisions, printed as-is (e.g. "MASTER").
  Apex(String),
  Unranked,
}

impl fmt::Display for RankedStanding {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Division {
        letter,
        division: Some(n),
      } => write!(f, "{}{}", letter, n),
      Self::Division {
        letter,
        division: None,
      } => write!(f, "{}", letter),
      Self::Apex(tier) => write!(f, "{}", tier),
      Self::Unranked => write!(f, "Unranked"),
    }
  }
}

/// Decode a Roman numeral, right to left: add each value unless it is strictly
/// smaller than the one seen before it, in which case subtract it.
pub fn roman_to_number(roman: &str) -> Option<u32> {
  if roman.is_empty() {
    return None;
  }

  let mut number: i64 = 0;
  let mut prev_value: i64 = 0;
  for c in roman.chars().rev() {
    let current_value: i64 = match c {
      'I' => 1,
      'V' => 5,
      'X' => 10,
      'L' => 50,
      'C' => 100,
      'D' => 500,
      'M' => 1000,
      _ => return None,
    };
    if current_value < prev_value {
      number -= current_value;
    } else {
      number += current_value;
    }
    prev_value = current_value;
  }

  u32::try_from(number).ok()
}

pub fn format_standing(standing: &QueueStanding) -> RankedStanding {
  let tier = standing.tier.clone().unwrap_or_default();
  if DIVISIONED_TIERS.contains(&tier.as_str()) {
    let division = standing.division.as_deref().and_then(roman_to_number);
    match tier.chars().next() {
      Some(letter) => RankedStanding::Division { letter, division },
      None => RankedStanding::Unranked,
    }
  } else {
    RankedStanding::Apex(tier)
  }
}

/// Solo queue if valid, else flex if valid, else unranked.
pub fn resolve_standing(stats: &RankedStatsResponse) -> RankedStanding {
  [SOLO_QUEUE, FLEX_QUEUE]
    .iter()
    .filter_map(|queue| stats.queue_map.get(*queue))
    .find(|standing| standing.is_valid())
    .map(format_standing)
    .unwrap_or(RankedStanding::Unranked)
}

pub fn ranked_stats_endpoint(puuid: &str) -> String {
  format!("/lol-ranked/v1/ranked-stats/{}", puuid)
}

/// Any failure along the way reads as unranked.
pub async fn fetch_for_player(gateway: &dyn RequestGateway, puuid: &str) -> RankedStanding {
  let Some(value) = gateway.get(&ranked_stats_endpoint(puuid)).await else {
    return RankedStanding::Unranked;
  };

  match serde_json::from_value::<RankedStatsResponse>(value) {
    Ok(stats) => resolve_standing(&stats),
    Err(e) => {
      log_warn(&format!("Unexpected ranked stats for puuid {}: {}", puuid, e));
      RankedStanding::Unranked
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn standing(tier: &str, division: &str, provisional: bool) -> QueueStanding {
    QueueStanding {
      tier: Some(tier.to_string()),
      division: Some(division.to_string()),
      is_provisional: provisional,
    }
  }

  fn stats(solo: Option<QueueStanding>, flex: Option<QueueStanding>) -> RankedStatsResponse {
    let mut queue_map = HashMap::new();
    if let Some(s) = solo {
      queue_map.insert(SOLO_QUEUE.to_string(), s);
    }
    if let Some(f) = flex {
      queue_map.insert(FLEX_QUEUE.to_string(), f);
    }
    RankedStatsResponse { queue_map }
  }

  fn to_roman(mut n: u32) -> String {
    let table = [(10, "X"), (9, "IX"), (5, "V"), (4, "IV"), (1, "I")];
    let mut out = String::new();
    for (value, symbol) in table {
      while n >= value {
        out.push_str(symbol);
        n -= value;
      }
    }
    out
  }

  #[test]
  fn roman_numerals_round_trip_over_division_range() {
    for n in 1..=12 {
      assert_eq!(roman_to_number(&to_roman(n)), Some(n), "numeral {}", to_roman(n));
    }
  }

  #[test]
  fn roman_numeral_rejects_unknown_symbols() {
    assert_eq!(roman_to_number("NA"), None);
    assert_eq!(roman_to_number(""), None);
  }

  #[test]
  fn gold_four_formats_as_g4() {
    let s = stats(Some(standing("GOLD", "IV", false)), None);
    assert_eq!(resolve_standing(&s).to_string(), "G4");
  }

  #[test]
  fn provisional_solo_falls_back_to_flex() {
    let s = stats(
      Some(standing("GOLD", "IV", true)),
      Some(standing("SILVER", "II", false)),
    );
    assert_eq!(resolve_standing(&s).to_string(), "S2");
  }

  #[test]
  fn both_queues_invalid_is_unranked() {
    let s = stats(
      Some(standing("NA", "I", false)),
      Some(standing("", "", false)),
    );
    assert_eq!(resolve_standing(&s), RankedStanding::Unranked);
    assert_eq!(resolve_standing(&RankedStatsResponse::default()).to_string(), "Unranked");
  }

  #[test]
  fn apex_tier_prints_unchanged() {
    // Apex tiers report the placeholder division "NA"
    let s = stats(Some(standing("CHALLENGER", "NA", false)), None);
    assert_eq!(resolve_standing(&s).to_string(), "CHALLENGER");
  }

  #[test]
  fn parses_client_payload() {
    let payload = serde_json::json!({
      "queueMap": {
        "RANKED_SOLO_5x5": { "tier": "EMERALD", "division": "III", "isProvisional": false },
        "RANKED_FLEX_SR": { "tier": "", "division": "NA", "isProvisional": false }
      }
    });
    let parsed: RankedStatsResponse = serde_json::from_value(payload).unwrap();
    assert_eq!(resolve_standing(&parsed).to_string(), "E3");
  }
}
