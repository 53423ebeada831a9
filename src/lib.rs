// Lobby Reveal: champion select lobby statistics for the League client

pub mod config;
pub mod error;
pub mod lcu;
pub mod lobby_watcher;
pub mod logging;
pub mod report;
pub mod stats;

pub use error::LcuError;
