use std::io;
use tokio_tungstenite::tungstenite;

// Error handling for client discovery and the event feed

#[derive(Debug)]
pub enum LcuError {
  IoError(io::Error),
  LockfileNotFound(String),
  InvalidLockfile(String),
  HttpError(reqwest::Error),
  JsonError(serde_json::Error),
  TlsError(native_tls::Error),
  WebSocketError(tungstenite::Error),
  InvalidRequest(String),
  EventDecode(String),
  ConnectionClosed,
}

impl std::fmt::Display for LcuError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::IoError(err) => write!(f, "IO Error: {}", err),
      Self::LockfileNotFound(msg) => write!(f, "Lockfile not found: {}", msg),
      Self::InvalidLockfile(msg) => write!(f, "Invalid lockfile: {}", msg),
      Self::HttpError(err) => write!(f, "HTTP error: {}", err),
      Self::JsonError(err) => write!(f, "JSON error: {}", err),
      Self::TlsError(err) => write!(f, "TLS error: {}", err),
      Self::WebSocketError(err) => write!(f, "WebSocket error: {}", err),
      Self::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
      Self::EventDecode(msg) => write!(f, "Malformed event: {}", msg),
      Self::ConnectionClosed => write!(f, "Event feed closed"),
    }
  }
}

impl std::error::Error for LcuError {}

impl From<io::Error> for LcuError {
  fn from(err: io::Error) -> Self {
    Self::IoError(err)
  }
}

impl From<reqwest::Error> for LcuError {
  fn from(err: reqwest::Error) -> Self {
    Self::HttpError(err)
  }
}

impl From<serde_json::Error> for LcuError {
  fn from(err: serde_json::Error) -> Self {
    Self::JsonError(err)
  }
}

impl From<native_tls::Error> for LcuError {
  fn from(err: native_tls::Error) -> Self {
    Self::TlsError(err)
  }
}

impl From<tungstenite::Error> for LcuError {
  fn from(err: tungstenite::Error) -> Self {
    Self::WebSocketError(err)
  }
}
