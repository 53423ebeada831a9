// Derived statistics over match history columns
//
// Every function here is pure and fails soft to "N/A" when the column it needs
// is absent.

use super::match_history::MatchHistoryBundle;

pub const NOT_AVAILABLE: &str = "N/A";
pub const PERFECT_KDA: &str = "PERFECT KDA";
pub const RANKED_SOLO_QUEUE_ID: i64 = 420;

const NO_ROLE: &str = "NONE";

/// Presentation strings for one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedStats {
  pub win_rate: String,
  pub roles: String,
  pub kda: String,
}

impl DerivedStats {
  pub fn from_bundle(bundle: Option<&MatchHistoryBundle>) -> Self {
    Self {
      win_rate: win_rate(bundle.map(|b| b.wins.as_slice())),
      roles: most_common_role(bundle.map(|b| b.lanes.as_slice())),
      kda: kda(
        bundle.map(|b| b.kills.as_slice()),
        bundle.map(|b| b.assists.as_slice()),
        bundle.map(|b| b.deaths.as_slice()),
      ),
    }
  }
}

/// Rounded percentage of `"true"` entries, half-up.
pub fn win_rate<S: AsRef<str>>(wins: Option<&[S]>) -> String {
  let Some(wins) = wins.filter(|w| !w.is_empty()) else {
    return NOT_AVAILABLE.to_string();
  };

  let total = wins.len();
  let won = wins.iter().map(|w| w.as_ref()).filter(|w| *w == "true").count();
  // Integer form of round(100 * won / total) with halves rounded up
  let percent = (200 * won + total) / (2 * total);
  format!("{}%", percent)
}

fn capitalize(role: &str) -> String {
  let mut chars = role.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

/// Every role tied for the highest count, capitalized, in first-seen order.
pub fn most_common_role<S: AsRef<str>>(roles: Option<&[S]>) -> String {
  let Some(roles) = roles else {
    return NOT_AVAILABLE.to_string();
  };

  let mut tally: Vec<(String, usize)> = Vec::new();
  for role in roles {
    let role = role.as_ref().trim();
    if role.is_empty() || role.eq_ignore_ascii_case(NO_ROLE) {
      continue;
    }
    let key = role.to_lowercase();
    match tally.iter_mut().find(|(name, _)| *name == key) {
      Some((_, count)) => *count += 1,
      None => tally.push((key, 1)),
    }
  }

  let Some(max) = tally.iter().map(|(_, count)| *count).max() else {
    return NOT_AVAILABLE.to_string();
  };

  tally
    .iter()
    .filter(|(_, count)| *count == max)
    .map(|(name, _)| capitalize(name))
    .collect::<Vec<_>>()
    .join("/")
}

/// `(kills + assists) / deaths` over all matches, two decimals.
pub fn kda(kills: Option<&[i64]>, assists: Option<&[i64]>, deaths: Option<&[i64]>) -> String {
  let (Some(kills), Some(assists), Some(deaths)) = (kills, assists, deaths) else {
    return NOT_AVAILABLE.to_string();
  };

  let total_kills: i64 = kills.iter().sum();
  let total_assists: i64 = assists.iter().sum();
  let total_deaths: i64 = deaths.iter().sum();

  if total_deaths == 0 {
    return PERFECT_KDA.to_string();
  }

  // Hundredths, halves rounded up like the win rate
  let hundredths = (200 * (total_kills + total_assists) + total_deaths) / (2 * total_deaths);
  format!("{}.{:02} KDA", hundredths / 100, hundredths % 100)
}

/// Win rate restricted to ranked solo games.
pub fn ranked_win_rate<S: AsRef<str>>(wins: &[S], queue_ids: &[i64]) -> String {
  let ranked: Vec<&str> = wins
    .iter()
    .zip(queue_ids)
    .filter(|(_, queue)| **queue == RANKED_SOLO_QUEUE_ID)
    .map(|(win, _)| win.as_ref())
    .collect();
  win_rate(Some(ranked.as_slice()))
}

/// Mean of a numeric column, rounded to a whole number.
pub fn column_average(values: &[i64]) -> String {
  if values.is_empty() {
    return NOT_AVAILABLE.to_string();
  }
  let mean = values.iter().sum::<i64>() as f64 / values.len() as f64;
  format!("{}", mean.round() as i64)
}
