// Aggregation pipeline: one run per champion select entry

use futures_util::future::join_all;
use std::time::Duration;

use super::format::{format_report_line, multisearch_link};
use super::overlay::{OverlayHandle, PresentationSink};
use crate::config::PluginOptions;
use crate::lcu::chat::{champion_select_conversation, post_message};
use crate::lcu::lobby::{champ_select_roster, region_code};
use crate::lcu::{LobbyRosterEntry, RequestGateway};
use crate::logging::{log_debug, log_info, log_warn};
use crate::stats::engine::{column_average, ranked_win_rate};
use crate::stats::match_history::{self, DEFAULT_WINDOW_END, DEFAULT_WINDOW_START};
use crate::stats::ranked;
use crate::stats::{DerivedStats, MatchHistoryBundle, RankedStanding};

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerReport {
  pub entry: LobbyRosterEntry,
  pub rank: RankedStanding,
  pub stats: DerivedStats,
  pub line: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyReport {
  /// Roster order, never completion order.
  pub players: Vec<PlayerReport>,
  pub link: String,
}

impl LobbyReport {
  pub fn lines(&self) -> Vec<String> {
    self.players.iter().map(|p| p.line.clone()).collect()
  }
}

pub struct AggregationPipeline<'a> {
  gateway: &'a dyn RequestGateway,
  overlay: Option<&'a dyn PresentationSink>,
  options: PluginOptions,
  settle_delay: Duration,
}

impl<'a> AggregationPipeline<'a> {
  pub fn new(gateway: &'a dyn RequestGateway, options: PluginOptions) -> Self {
    Self {
      gateway,
      overlay: None,
      options,
      settle_delay: DEFAULT_SETTLE_DELAY,
    }
  }

  pub fn with_overlay(mut self, overlay: &'a dyn PresentationSink) -> Self {
    self.overlay = Some(overlay);
    self
  }

  pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
    self.settle_delay = settle_delay;
    self
  }

  /// Run once to completion. Returns the overlay handle when one was rendered;
  /// the caller owns its teardown.
  pub async fn run(&self) -> Option<OverlayHandle> {
    // Give the lobby roster time to populate
    tokio::time::sleep(self.settle_delay).await;

    let Some(conversation) = champion_select_conversation(self.gateway).await else {
      log_debug("No champion select chat yet, skipping lobby report");
      return None;
    };

    let (roster, region) = tokio::join!(champ_select_roster(self.gateway), region_code(self.gateway));
    log_info(&format!(
      "Champion select roster has {} player(s), region '{}'",
      roster.len(),
      region
    ));

    let report = self.build_report(&roster, &region).await;
    for line in report.lines() {
      log_info(&line);
    }

    if self.options.textchat {
      for line in report.lines() {
        if !post_message(self.gateway, &conversation.id, &line).await {
          log_warn(&format!("Chat post failed for line: {}", line));
        }
      }
      if !post_message(self.gateway, &conversation.id, &report.link).await {
        log_warn("Chat post failed for multisearch link");
      }
    }

    if self.options.popup {
      if let Some(sink) = self.overlay {
        return sink.render(&report.lines(), &report.link);
      }
    }
    None
  }

  /// Query every player concurrently and assemble their lines in roster order.
  pub async fn build_report(&self, roster: &[LobbyRosterEntry], region: &str) -> LobbyReport {
    let lookups = roster.iter().map(|entry| async move {
      tokio::join!(
        match_history::fetch_for_player(
          self.gateway,
          &entry.puuid,
          DEFAULT_WINDOW_START,
          DEFAULT_WINDOW_END
        ),
        ranked::fetch_for_player(self.gateway, &entry.puuid)
      )
    });
    let results = join_all(lookups).await;

    let players = roster
      .iter()
      .zip(results)
      .map(|(entry, (history, rank))| {
        log_history_figures(entry, history.as_ref());
        let stats = DerivedStats::from_bundle(history.as_ref());
        let line = format_report_line(entry, &rank, &stats);
        PlayerReport {
          entry: entry.clone(),
          rank,
          stats,
          line,
        }
      })
      .collect();

    LobbyReport {
      players,
      link: multisearch_link(region, roster),
    }
  }
}

fn log_history_figures(entry: &LobbyRosterEntry, history: Option<&MatchHistoryBundle>) {
  match history {
    Some(bundle) => log_info(&format!(
      "{}: {} games, solo queue win rate {}, avg CS {}, avg gold {}",
      entry.riot_id(),
      bundle.len(),
      ranked_win_rate(&bundle.wins, &bundle.queue_ids),
      column_average(&bundle.minions),
      column_average(&bundle.gold)
    )),
    None => log_debug(&format!("{}: no match history", entry.riot_id())),
  }
}
