// Tests for roster ordering and partial failures during report assembly

use super::test_helpers::*;

#[cfg(test)]
mod report_order_tests {
  use super::*;
  use crate::config::PluginOptions;
  use crate::lcu::LobbyRosterEntry;
  use crate::report::pipeline::AggregationPipeline;
  use std::time::Duration;

  fn roster(players: &[&Player]) -> Vec<LobbyRosterEntry> {
    players
      .iter()
      .map(|p| LobbyRosterEntry {
        puuid: p.puuid.to_string(),
        game_name: p.game_name.to_string(),
        game_tag: p.game_tag.to_string(),
      })
      .collect()
  }

  /// Scenario: the first player's lookups are the slowest to answer.
  /// Expected: lines still follow roster order.
  #[tokio::test]
  async fn test_lines_follow_roster_not_completion_order() {
    let players = [&ALPHA, &BRAVO, &CHARLIE];
    let gateway = lobby_gateway(&players)
      .delay(&history_endpoint(&ALPHA), Duration::from_millis(120))
      .delay(&ranked_endpoint(&ALPHA), Duration::from_millis(120))
      .delay(&history_endpoint(&BRAVO), Duration::from_millis(60));

    let pipeline = AggregationPipeline::new(&gateway, PluginOptions::default());
    let report = pipeline.build_report(&roster(&players), "euw").await;

    // Completion order really was reversed
    let completed = gateway.completed();
    let charlie_done = completed.iter().position(|e| *e == history_endpoint(&CHARLIE)).unwrap();
    let alpha_done = completed.iter().position(|e| *e == history_endpoint(&ALPHA)).unwrap();
    assert!(charlie_done < alpha_done);

    let names: Vec<&str> = report
      .players
      .iter()
      .map(|p| p.entry.game_name.as_str())
      .collect();
    assert_eq!(names, vec!["Alpha", "Bravo Two", "Charlie"]);
    assert!(report.lines()[0].starts_with("Alpha - "));
    assert!(report.lines()[2].starts_with("Charlie - "));
  }

  /// Scenario: exactly one player's match history lookup fails.
  /// Expected: every player still gets a line; the failing one keeps its rank
  /// and shows sentinels only in the statistics fields.
  #[tokio::test]
  async fn test_single_failure_degrades_only_that_line() {
    let players = [&ALPHA, &BRAVO, &CHARLIE];
    let gateway = lobby_gateway(&[&ALPHA, &CHARLIE])
      .respond(&history_endpoint(&BRAVO), serde_json::json!({ "games": {} }))
      .respond(&ranked_endpoint(&BRAVO), ranked("GOLD", "III"));

    let pipeline = AggregationPipeline::new(&gateway, PluginOptions::default());
    let report = pipeline.build_report(&roster(&players), "euw").await;

    assert_eq!(report.players.len(), 3);
    assert_eq!(report.lines()[1], "Bravo Two - G3 - N/A - N/A - N/A");
    assert_eq!(report.lines()[0], "Alpha - G3 - 75% - Middle - 5.00 KDA");
    assert_eq!(report.lines()[2], "Charlie - G3 - 75% - Middle - 5.00 KDA");
  }

  /// Scenario: a player's ranked lookup fails but their history is fine.
  /// Expected: only the rank field falls back to "Unranked".
  #[tokio::test]
  async fn test_ranked_failure_degrades_only_rank() {
    let players = [&ALPHA, &BRAVO];
    let gateway = lobby_gateway(&[&ALPHA]).respond(&history_endpoint(&BRAVO), match_history(4, 3));

    let pipeline = AggregationPipeline::new(&gateway, PluginOptions::default());
    let report = pipeline.build_report(&roster(&players), "euw").await;

    assert_eq!(report.lines()[1], "Bravo Two - Unranked - 75% - Middle - 5.00 KDA");
  }

  #[tokio::test]
  async fn test_empty_roster_yields_bare_link() {
    let gateway = ScriptedGateway::new();
    let pipeline = AggregationPipeline::new(&gateway, PluginOptions::default());
    let report = pipeline.build_report(&[], "na").await;

    assert!(report.players.is_empty());
    assert_eq!(report.link, "https://www.op.gg/multisearch/na?summoners=");
  }
}
