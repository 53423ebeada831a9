// LCU module - connection discovery and the local API surface

pub mod types;
pub mod connection;
pub mod gateway;
pub mod chat;
pub mod lobby;

// Re-export public types and functions
pub use types::{ChatConversation, LcuConnection, LobbyRosterEntry};
pub use connection::{find_league_connection, find_riot_client_connection};
pub use gateway::{LcuGateway, RequestGateway};
