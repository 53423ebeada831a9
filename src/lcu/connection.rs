// Lockfile discovery for the League client and the Riot Client

use std::fs;
use std::path::{Path, PathBuf};

use super::types::LcuConnection;
use crate::config::SavedConfig;
use crate::error::LcuError;
use crate::logging::log_debug;

const LOCKFILE_NAMES: [&str; 3] = ["lockfile", "LeagueClientUx.lockfile", "LeagueClient.lockfile"];

/// Parse `name:pid:port:token:protocol`.
pub fn parse_lockfile(content: &str) -> Result<LcuConnection, LcuError> {
  let parts: Vec<&str> = content.trim().split(':').collect();
  if parts.len() < 5 {
    return Err(LcuError::InvalidLockfile(format!(
      "expected 5 fields, found {}",
      parts.len()
    )));
  }
  let port = parts[2].to_string();
  let token = parts[3].to_string();
  if port.is_empty() || token.is_empty() {
    return Err(LcuError::InvalidLockfile("empty port or token".to_string()));
  }
  Ok(LcuConnection { port, token })
}

fn league_search_dirs(config: &SavedConfig) -> Vec<PathBuf> {
  let mut search_dirs = vec![];

  if let Some(league_path) = &config.league_path {
    search_dirs.push(PathBuf::from(league_path));
  }

  if search_dirs.is_empty() {
    search_dirs = vec![
      PathBuf::from("C:\\Riot Games\\League of Legends"),
      PathBuf::from("C:\\Program Files\\Riot Games\\League of Legends"),
      PathBuf::from("C:\\Program Files (x86)\\Riot Games\\League of Legends"),
    ];
  }

  search_dirs
}

/// Read the first usable lockfile in `dir`, returning its path alongside the connection.
pub fn read_lockfile_once(dir: &Path) -> Option<(LcuConnection, PathBuf)> {
  for name in LOCKFILE_NAMES {
    let path = dir.join(name);
    if let Ok(content) = fs::read_to_string(&path) {
      match parse_lockfile(&content) {
        Ok(conn) => return Some((conn, path)),
        Err(e) => log_debug(&format!("Skipping {}: {}", path.display(), e)),
      }
    }
  }
  None
}

pub fn find_league_connection(config: &SavedConfig) -> Result<(LcuConnection, PathBuf), LcuError> {
  let search_dirs = league_search_dirs(config);
  for dir in &search_dirs {
    if let Some(found) = read_lockfile_once(dir) {
      return Ok(found);
    }
  }

  Err(LcuError::LockfileNotFound(
    search_dirs
      .iter()
      .map(|d| d.display().to_string())
      .collect::<Vec<_>>()
      .join(", "),
  ))
}

/// The Riot Client serves the chat participants endpoint; it is optional.
pub fn find_riot_client_connection(config: &SavedConfig) -> Option<LcuConnection> {
  let path = match &config.riot_client_lockfile {
    Some(p) => PathBuf::from(p),
    None => std::env::var("LOCALAPPDATA")
      .map(|dir| {
        PathBuf::from(dir)
          .join("Riot Games")
          .join("Riot Client")
          .join("Config")
          .join("lockfile")
      })
      .ok()?,
  };

  let content = fs::read_to_string(&path).ok()?;
  match parse_lockfile(&content) {
    Ok(conn) => Some(conn),
    Err(e) => {
      log_debug(&format!("Riot Client lockfile unusable: {}", e));
      None
    }
  }
}
