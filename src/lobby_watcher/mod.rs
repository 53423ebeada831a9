// Lobby watcher module - gameflow phase observation over the client event feed

pub mod types;
pub mod observer;
pub mod watcher;

// Re-export public types and functions
pub use observer::LobbyObserver;
pub use types::{ObserverAction, ObserverState};
pub use watcher::{start_lobby_watcher, EventTransport, LobbyWatcher, WsTransport};
