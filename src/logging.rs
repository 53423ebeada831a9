// Logging utilities for the lobby watcher and report pipeline

use chrono::Local;
use once_cell::sync::Lazy;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

const LOG_BUFFER_LIMIT: usize = 2000;
const LIVE_LOG_FILE: &str = "lobby-reveal-live.log";

// Global in-memory log buffer
pub static LOG_BUFFER: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub static VERBOSE_LOGGING: Lazy<AtomicBool> = Lazy::new(|| AtomicBool::new(false));

// Directory of the on-disk live log; unset means memory + stdout only
static LOG_DIR: Lazy<Mutex<Option<PathBuf>>> = Lazy::new(|| Mutex::new(None));

pub fn init_log_dir(dir: PathBuf) {
  if let Err(e) = std::fs::create_dir_all(&dir) {
    // Non-fatal: we still keep logs in memory
    eprintln!("[Lobby Reveal] Failed to ensure logs dir exists: {}", e);
    return;
  }
  if let Ok(mut guard) = LOG_DIR.lock() {
    *guard = Some(dir);
  }
}

pub fn set_verbose_logging(flag: bool) {
  VERBOSE_LOGGING.store(flag, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
  VERBOSE_LOGGING.load(Ordering::Relaxed)
}

fn record(message: &str) {
  if let Ok(mut buf) = LOG_BUFFER.lock() {
    buf.push(message.to_string());
    if buf.len() > LOG_BUFFER_LIMIT {
      let excess = buf.len() - LOG_BUFFER_LIMIT;
      buf.drain(0..excess);
    }
  }

  let dir = match LOG_DIR.lock() {
    Ok(guard) => guard.clone(),
    Err(_) => None,
  };
  let Some(dir) = dir else {
    return;
  };

  let live_log = dir.join(LIVE_LOG_FILE);
  // Ignore failures to avoid taking the watcher down over a log line
  if let Ok(mut f) = File::options().create(true).append(true).open(&live_log) {
    let stamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    if let Err(e) = writeln!(f, "{} {}", stamp, message) {
      eprintln!("[Lobby Reveal] Failed to write to live log: {}", e);
    }
  }
}

pub fn append_global_log(message: &str) {
  println!("{}", message);
  record(message);
}

/// Log helper for important messages (always logged)
pub fn log_info(message: &str) {
  append_global_log(&format!("[Lobby Reveal] {}", message));
}

/// Log helper for warnings (always logged)
pub fn log_warn(message: &str) {
  append_global_log(&format!("[Lobby Reveal][WARN] {}", message));
}

/// Log helper for errors (always logged, to stderr)
pub fn log_error(message: &str) {
  let line = format!("[Lobby Reveal][ERROR] {}", message);
  eprintln!("{}", line);
  record(&line);
}

/// Log helper for debug messages (only in verbose mode)
pub fn log_debug(message: &str) {
  if is_verbose() {
    append_global_log(&format!("[Lobby Reveal][DEBUG] {}", message));
  }
}
