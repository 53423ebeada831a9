// Report line and multisearch link formatting

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::lcu::LobbyRosterEntry;
use crate::stats::{DerivedStats, RankedStanding};

pub const FIELD_DELIMITER: &str = " - ";
pub const MULTISEARCH_BASE: &str = "https://www.op.gg/multisearch";

// Everything except the characters encodeURIComponent leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
  .remove(b'-')
  .remove(b'_')
  .remove(b'.')
  .remove(b'!')
  .remove(b'~')
  .remove(b'*')
  .remove(b'\'')
  .remove(b'(')
  .remove(b')');

pub fn encode_uri_component(value: &str) -> String {
  utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// `<name> - <rank> - <winRate> - <roles> - <kda>`
pub fn format_report_line(entry: &LobbyRosterEntry, rank: &RankedStanding, stats: &DerivedStats) -> String {
  [
    entry.game_name.clone(),
    rank.to_string(),
    stats.win_rate.clone(),
    stats.roles.clone(),
    stats.kda.clone(),
  ]
  .join(FIELD_DELIMITER)
}

pub fn multisearch_link(region: &str, roster: &[LobbyRosterEntry]) -> String {
  let names = roster
    .iter()
    .map(|entry| encode_uri_component(&entry.riot_id()))
    .collect::<Vec<_>>()
    .join("%2C");
  format!("{}/{}?summoners={}", MULTISEARCH_BASE, region, names)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(name: &str, tag: &str) -> LobbyRosterEntry {
    LobbyRosterEntry {
      puuid: format!("puuid-{}", name),
      game_name: name.to_string(),
      game_tag: tag.to_string(),
    }
  }

  #[test]
  fn report_line_has_fixed_field_order() {
    let stats = DerivedStats {
      win_rate: "73%".to_string(),
      roles: "Mid".to_string(),
      kda: "3.25 KDA".to_string(),
    };
    let rank = RankedStanding::Division {
      letter: 'G',
      division: Some(4),
    };
    assert_eq!(
      format_report_line(&entry("PlayerOne", "EUW"), &rank, &stats),
      "PlayerOne - G4 - 73% - Mid - 3.25 KDA"
    );
  }

  #[test]
  fn link_encodes_names_and_joins_with_encoded_comma() {
    let roster = vec![entry("Faker Fan", "KR1"), entry("Ünïcode", "EUW")];
    assert_eq!(
      multisearch_link("euw", &roster),
      "https://www.op.gg/multisearch/euw?summoners=Faker%20Fan%23KR1%2C%C3%9Cn%C3%AFcode%23EUW"
    );
  }

  #[test]
  fn encode_matches_uri_component_rules() {
    assert_eq!(encode_uri_component("a-b_c.d!e~f*g'h(i)"), "a-b_c.d!e~f*g'h(i)");
    assert_eq!(encode_uri_component("a b#c,d/e"), "a%20b%23c%2Cd%2Fe");
  }
}
