// Lobby watcher: event feed session and reconnect loop

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use native_tls::TlsConnector;
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{Connector, MaybeTlsStream, WebSocketStream};

use super::observer::LobbyObserver;
use super::types::{subscription_frame, ObserverAction};
use crate::config::{PluginOptions, SavedConfig};
use crate::error::LcuError;
use crate::lcu::lobby::current_phase;
use crate::lcu::{find_league_connection, find_riot_client_connection, LcuConnection, LcuGateway, RequestGateway};
use crate::logging::{log_debug, log_error, log_info, log_warn};
use crate::report::{AggregationPipeline, HtmlOverlaySink, PresentationSink};

pub const OVERLAY_DIR: &str = "overlay";

/// Duplex text channel carrying the client's event feed.
#[async_trait]
pub trait EventTransport: Send {
  async fn send_text(&mut self, text: String) -> Result<(), LcuError>;

  /// Next text frame, or `None` once the feed has closed.
  async fn next_text(&mut self) -> Option<Result<String, LcuError>>;
}

pub struct WsTransport {
  socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsTransport {
  pub async fn connect(conn: &LcuConnection) -> Result<Self, LcuError> {
    let tls = TlsConnector::builder()
      .danger_accept_invalid_certs(true)
      .build()?;

    let mut request = conn.ws_url().into_client_request()?;
    let auth = HeaderValue::from_str(&conn.auth_header())
      .map_err(|e| LcuError::InvalidRequest(format!("bad auth header: {}", e)))?;
    request.headers_mut().insert("Authorization", auth);
    request
      .headers_mut()
      .insert("Sec-WebSocket-Protocol", HeaderValue::from_static("wamp"));

    let (socket, _response) =
      tokio_tungstenite::connect_async_tls_with_config(request, None, false, Some(Connector::NativeTls(tls))).await?;

    Ok(Self { socket })
  }
}

#[async_trait]
impl EventTransport for WsTransport {
  async fn send_text(&mut self, text: String) -> Result<(), LcuError> {
    self.socket.send(Message::Text(text.into())).await?;
    Ok(())
  }

  async fn next_text(&mut self) -> Option<Result<String, LcuError>> {
    loop {
      match self.socket.next().await? {
        Ok(Message::Text(text)) => return Some(Ok(text.to_string())),
        Ok(Message::Close(_)) => return None,
        // Pings are answered by tungstenite itself
        Ok(_) => continue,
        Err(e) => return Some(Err(e.into())),
      }
    }
  }
}

/// One connection's worth of lobby watching.
pub struct LobbyWatcher<'a> {
  gateway: &'a dyn RequestGateway,
  overlay: Option<&'a dyn PresentationSink>,
  options: PluginOptions,
  settle_delay: Duration,
  observer: &'a mut LobbyObserver,
}

impl<'a> LobbyWatcher<'a> {
  pub fn new(gateway: &'a dyn RequestGateway, observer: &'a mut LobbyObserver, options: PluginOptions) -> Self {
    Self {
      gateway,
      overlay: None,
      options,
      settle_delay: crate::report::pipeline::DEFAULT_SETTLE_DELAY,
      observer,
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

  pub fn observer(&self) -> &LobbyObserver {
    self.observer
  }

  async fn apply(&mut self, action: ObserverAction) {
    match action {
      ObserverAction::RunPipeline => {
        let mut pipeline = AggregationPipeline::new(self.gateway, self.options).with_settle_delay(self.settle_delay);
        if let Some(sink) = self.overlay {
          pipeline = pipeline.with_overlay(sink);
        }
        if let Some(handle) = pipeline.run().await {
          if let Some(previous) = self.observer.hold_overlay(handle) {
            self.remove_overlay(previous);
          }
        }
      }
      ObserverAction::Teardown => {
        if let Some(handle) = self.observer.take_overlay() {
          self.remove_overlay(handle);
        }
      }
      ObserverAction::None => {}
    }
  }

  fn remove_overlay(&self, handle: crate::report::OverlayHandle) {
    match self.overlay {
      Some(sink) => sink.remove(handle),
      None => log_debug(&format!("No overlay sink to remove {}", handle.id)),
    }
  }

  /// Subscribe, catch up on the current phase, then react to events until the
  /// feed closes (`Ok`) or fails (`Err`).
  pub async fn run_session<T: EventTransport + ?Sized>(&mut self, transport: &mut T) -> Result<(), LcuError> {
    transport.send_text(subscription_frame()).await?;
    self.observer.on_subscribed();
    log_info("Subscribed to gameflow phase events");

    // Starting mid champion select would otherwise wait for an event that never comes
    if let Some(phase) = current_phase(self.gateway).await {
      log_debug(&format!("Current phase on connect: {}", phase));
      let action = self.observer.on_phase(&phase);
      self.apply(action).await;
    }

    while let Some(frame) = transport.next_text().await {
      let text = frame?;
      let action = self.observer.on_frame(&text);
      self.apply(action).await;
    }
    Ok(())
  }

  pub fn disconnect(&mut self) {
    if let Some(handle) = self.observer.on_disconnected() {
      self.remove_overlay(handle);
    }
  }
}

/// Watch the client forever, reconnecting whenever it goes away.
pub async fn start_lobby_watcher(config: SavedConfig, options: PluginOptions, data_dir: PathBuf) {
  let sink = HtmlOverlaySink::new(data_dir.join(OVERLAY_DIR));
  log_info(&format!(
    "Lobby watcher starting (textchat: {}, popup: {})",
    options.textchat, options.popup
  ));

  // Shared by every connection so a reconnect inside champion select does not report again
  let mut observer = LobbyObserver::new();

  loop {
    let (league, lockfile) = match find_league_connection(&config) {
      Ok(found) => found,
      Err(e) => {
        log_debug(&format!("{}. Is League running?", e));
        tokio::time::sleep(config.reconnect_delay()).await;
        continue;
      }
    };
    log_debug(&format!("Using lockfile {}", lockfile.display()));

    let riot_client = find_riot_client_connection(&config);
    if riot_client.is_none() {
      log_debug("Riot Client lockfile not found, routing chat participants through League client");
    }

    let gateway = match LcuGateway::new(league.clone(), riot_client) {
      Ok(gateway) => gateway,
      Err(e) => {
        log_error(&format!("Could not build HTTP client: {}", e));
        tokio::time::sleep(config.reconnect_delay()).await;
        continue;
      }
    };

    let mut transport = match WsTransport::connect(&league).await {
      Ok(transport) => {
        log_info(&format!("Connected to client event feed on port {}", league.port));
        transport
      }
      Err(e) => {
        log_warn(&format!("WebSocket connect failed: {}", e));
        tokio::time::sleep(config.reconnect_delay()).await;
        continue;
      }
    };

    let mut watcher = LobbyWatcher::new(&gateway, &mut observer, options)
      .with_overlay(&sink)
      .with_settle_delay(config.settle_delay());

    match watcher.run_session(&mut transport).await {
      Ok(()) => log_info("Client event feed closed"),
      Err(e) => log_warn(&format!("Client event feed failed: {}", e)),
    }
    watcher.disconnect();

    tokio::time::sleep(config.reconnect_delay()).await;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::lcu::lobby::GAMEFLOW_PHASE_ENDPOINT;
  use crate::report::tests::test_helpers::{lobby_gateway, RecordingSink, ALPHA};
  use serde_json::json;
  use std::collections::VecDeque;

  fn phase_frame(phase: &str) -> String {
    json!([8, "OnJsonApiEvent_lol-gameflow_v1_gameflow-phase", { "data": phase, "eventType": "Update", "uri": "/lol-gameflow/v1/gameflow-phase" }]).to_string()
  }

  #[derive(Default)]
  struct ScriptedTransport {
    inbound: VecDeque<Result<String, LcuError>>,
    sent: Vec<String>,
  }

  impl ScriptedTransport {
    fn with_frames(frames: Vec<String>) -> Self {
      Self {
        inbound: frames.into_iter().map(Ok).collect(),
        sent: Vec::new(),
      }
    }
  }

  #[async_trait]
  impl EventTransport for ScriptedTransport {
    async fn send_text(&mut self, text: String) -> Result<(), LcuError> {
      self.sent.push(text);
      Ok(())
    }

    async fn next_text(&mut self) -> Option<Result<String, LcuError>> {
      self.inbound.pop_front()
    }
  }

  #[tokio::test]
  async fn session_subscribes_runs_once_and_tears_down() {
    let gateway = lobby_gateway(&[&ALPHA]);
    let sink = RecordingSink::default();
    let mut transport = ScriptedTransport::with_frames(vec![
      String::new(),
      phase_frame("Lobby"),
      phase_frame("ChampSelect"),
      phase_frame("ChampSelect"),
      "garbage".to_string(),
      phase_frame("InProgress"),
    ]);

    let mut observer = LobbyObserver::new();
    let mut watcher = LobbyWatcher::new(&gateway, &mut observer, PluginOptions::default())
      .with_overlay(&sink)
      .with_settle_delay(Duration::ZERO);
    watcher.run_session(&mut transport).await.unwrap();

    assert_eq!(transport.sent, vec![subscription_frame()]);
    // One report line plus the link, from a single run
    assert_eq!(gateway.posted_bodies().len(), 2);
    assert_eq!(sink.rendered.lock().unwrap().len(), 1);
    assert_eq!(sink.removed.lock().unwrap().len(), 1);
    assert!(!watcher.observer().has_overlay());
  }

  #[tokio::test]
  async fn session_bootstraps_from_current_phase() {
    let gateway = lobby_gateway(&[&ALPHA]).respond(GAMEFLOW_PHASE_ENDPOINT, json!("ChampSelect"));
    let mut transport = ScriptedTransport::default();

    let mut observer = LobbyObserver::new();
    let mut watcher = LobbyWatcher::new(&gateway, &mut observer, PluginOptions { textchat: true, popup: false })
      .with_settle_delay(Duration::ZERO);
    watcher.run_session(&mut transport).await.unwrap();

    assert_eq!(
      gateway.posted_bodies(),
      vec![
        "Alpha - G3 - 75% - Middle - 5.00 KDA".to_string(),
        "https://www.op.gg/multisearch/euw?summoners=Alpha%23EUW".to_string(),
      ]
    );
  }

  #[tokio::test]
  async fn transport_error_ends_session_and_disconnect_removes_overlay() {
    let gateway = lobby_gateway(&[&ALPHA]);
    let sink = RecordingSink::default();
    let mut transport = ScriptedTransport::with_frames(vec![phase_frame("ChampSelect")]);
    transport.inbound.push_back(Err(LcuError::ConnectionClosed));

    let mut observer = LobbyObserver::new();
    let mut watcher = LobbyWatcher::new(&gateway, &mut observer, PluginOptions::default())
      .with_overlay(&sink)
      .with_settle_delay(Duration::ZERO);
    assert!(watcher.run_session(&mut transport).await.is_err());
    assert!(watcher.observer().has_overlay());

    watcher.disconnect();
    assert!(!watcher.observer().has_overlay());
    assert_eq!(sink.removed.lock().unwrap().len(), 1);
  }

  /// Scenario: the feed drops mid champion select and the next connection
  /// still reports ChampSelect as the current phase.
  /// Expected: the lobby is reported once; leaving and re-entering reports again.
  #[tokio::test]
  async fn reconnect_during_champ_select_reports_once() {
    let gateway = lobby_gateway(&[&ALPHA]).respond(GAMEFLOW_PHASE_ENDPOINT, json!("ChampSelect"));
    let sink = RecordingSink::default();
    let mut observer = LobbyObserver::new();

    let mut first = ScriptedTransport::default();
    first.inbound.push_back(Err(LcuError::ConnectionClosed));
    {
      let mut watcher = LobbyWatcher::new(&gateway, &mut observer, PluginOptions::default())
        .with_overlay(&sink)
        .with_settle_delay(Duration::ZERO);
      assert!(watcher.run_session(&mut first).await.is_err());
      watcher.disconnect();
    }
    assert_eq!(gateway.posted_bodies().len(), 2);
    assert_eq!(sink.removed.lock().unwrap().len(), 1);

    let mut second = ScriptedTransport::with_frames(vec![phase_frame("ChampSelect")]);
    {
      let mut watcher = LobbyWatcher::new(&gateway, &mut observer, PluginOptions::default())
        .with_overlay(&sink)
        .with_settle_delay(Duration::ZERO);
      watcher.run_session(&mut second).await.unwrap();
    }
    assert_eq!(
      gateway.posted_bodies(),
      vec![
        "Alpha - G3 - 75% - Middle - 5.00 KDA".to_string(),
        "https://www.op.gg/multisearch/euw?summoners=Alpha%23EUW".to_string(),
      ]
    );
    assert_eq!(sink.rendered.lock().unwrap().len(), 1);

    // A genuinely new champion select after leaving is reported
    let mut third = ScriptedTransport::with_frames(vec![phase_frame("InProgress"), phase_frame("ChampSelect")]);
    {
      let mut watcher = LobbyWatcher::new(&gateway, &mut observer, PluginOptions::default())
        .with_overlay(&sink)
        .with_settle_delay(Duration::ZERO);
      watcher.run_session(&mut third).await.unwrap();
    }
    assert_eq!(gateway.posted_bodies().len(), 4);
  }
}
