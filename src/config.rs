// Configuration: saved settings and the textchat/popup options

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::logging::log_warn;

pub const DATA_DIR_ENV: &str = "LOBBY_REVEAL_HOME";
pub const CONFIG_FILE: &str = "config.json";
pub const OPTIONS_FILE: &str = "options.json";

/// Root of everything the process writes (config, logs, overlay).
pub fn data_dir() -> PathBuf {
  if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
    if !dir.trim().is_empty() {
      return PathBuf::from(dir);
    }
  }
  std::env::var("APPDATA")
    .map(|ap| PathBuf::from(ap).join("lobby-reveal"))
    .unwrap_or_else(|_| PathBuf::from(".").join("lobby-reveal"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedConfig {
  #[serde(default)]
  pub league_path: Option<String>,
  #[serde(default)]
  pub riot_client_lockfile: Option<String>,
  #[serde(default = "default_settle_delay_ms")]
  pub settle_delay_ms: u64,
  #[serde(default = "default_reconnect_delay_ms")]
  pub reconnect_delay_ms: u64,
  #[serde(default)]
  pub verbose_logging: bool,
}

fn default_settle_delay_ms() -> u64 {
  5000
}

fn default_reconnect_delay_ms() -> u64 {
  2000
}

impl Default for SavedConfig {
  fn default() -> Self {
    Self {
      league_path: None,
      riot_client_lockfile: None,
      settle_delay_ms: default_settle_delay_ms(),
      reconnect_delay_ms: default_reconnect_delay_ms(),
      verbose_logging: false,
    }
  }
}

impl SavedConfig {
  pub fn settle_delay(&self) -> Duration {
    Duration::from_millis(self.settle_delay_ms)
  }

  pub fn reconnect_delay(&self) -> Duration {
    Duration::from_millis(self.reconnect_delay_ms)
  }
}

/// Where the report goes. Both outputs are on unless the options file says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginOptions {
  #[serde(default = "enabled")]
  pub textchat: bool,
  #[serde(default = "enabled")]
  pub popup: bool,
}

fn enabled() -> bool {
  true
}

impl Default for PluginOptions {
  fn default() -> Self {
    Self {
      textchat: true,
      popup: true,
    }
  }
}

fn read_json_or_default<T>(file: &Path) -> T
where
  T: for<'de> Deserialize<'de> + Default,
{
  let Ok(contents) = std::fs::read_to_string(file) else {
    return T::default();
  };
  match serde_json::from_str::<T>(&contents) {
    Ok(value) => value,
    Err(e) => {
      log_warn(&format!(
        "Ignoring malformed {}: {}",
        file.display(),
        e
      ));
      T::default()
    }
  }
}

pub fn load_config(config_dir: &Path) -> SavedConfig {
  read_json_or_default(&config_dir.join(CONFIG_FILE))
}

pub fn load_plugin_options(config_dir: &Path) -> PluginOptions {
  read_json_or_default(&config_dir.join(OPTIONS_FILE))
}
