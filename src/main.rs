use lobby_reveal_lib::config::{data_dir, load_config, load_plugin_options};
use lobby_reveal_lib::lobby_watcher::start_lobby_watcher;
use lobby_reveal_lib::logging::{init_log_dir, log_error, log_info, set_verbose_logging};

#[tokio::main(flavor = "current_thread")]
async fn main() {
  let data_dir = data_dir();
  init_log_dir(data_dir.join("logs"));

  let config_dir = data_dir.join("config");
  let config = load_config(&config_dir);
  let options = load_plugin_options(&config_dir);
  set_verbose_logging(config.verbose_logging);

  log_info(&format!("Data directory: {}", data_dir.display()));
  if !options.textchat && !options.popup {
    log_info("Both textchat and popup are disabled; reports will only be logged");
  }

  tokio::select! {
    _ = start_lobby_watcher(config, options, data_dir) => {}
    res = tokio::signal::ctrl_c() => {
      if let Err(e) = res {
        log_error(&format!("Failed to listen for Ctrl+C: {}", e));
      }
      log_info("Shutting down");
    }
  }
}
