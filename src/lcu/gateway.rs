// Request gateway: every outbound call to the local API goes through here

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;

use super::types::LcuConnection;
use crate::error::LcuError;
use crate::logging::{log_debug, log_error};

const RIOT_CLIENT_PREFIX: &str = "//riotclient";

/// Uniform access to the local API.
///
/// Implementations never surface transport or status errors to the caller:
/// every failure is logged and comes back as `None`, so callers only ever
/// check for presence.
#[async_trait]
pub trait RequestGateway: Send + Sync {
  async fn call(&self, method: Method, endpoint: &str, payload: Option<&Value>) -> Option<Value>;

  async fn get(&self, endpoint: &str) -> Option<Value> {
    self.call(Method::GET, endpoint, None).await
  }

  async fn post(&self, endpoint: &str, payload: &Value) -> Option<Value> {
    self.call(Method::POST, endpoint, Some(payload)).await
  }
}

pub struct LcuGateway {
  client: reqwest::Client,
  league: LcuConnection,
  riot_client: Option<LcuConnection>,
}

impl LcuGateway {
  pub fn new(league: LcuConnection, riot_client: Option<LcuConnection>) -> Result<Self, LcuError> {
    // The client serves a self-signed certificate on 127.0.0.1
    let client = reqwest::Client::builder()
      .danger_accept_invalid_certs(true)
      .timeout(Duration::from_secs(10))
      .connect_timeout(Duration::from_secs(2))
      .pool_max_idle_per_host(4)
      .build()?;

    Ok(Self {
      client,
      league,
      riot_client,
    })
  }

  /// Map an endpoint to a full URL plus the connection whose credentials it needs.
  ///
  /// `//riotclient/...` endpoints belong to the Riot Client when its lockfile is
  /// known; otherwise they are tried against the League client as `/riotclient/...`.
  fn resolve(&self, endpoint: &str) -> (String, &LcuConnection) {
    if let Some(rest) = endpoint.strip_prefix(RIOT_CLIENT_PREFIX) {
      if let Some(rc) = &self.riot_client {
        return (format!("{}{}", rc.base_url(), rest), rc);
      }
      return (format!("{}{}", self.league.base_url(), &endpoint[1..]), &self.league);
    }
    (format!("{}{}", self.league.base_url(), endpoint), &self.league)
  }

  async fn send(&self, method: Method, endpoint: &str, payload: Option<&Value>) -> Result<Value, String> {
    let (url, conn) = self.resolve(endpoint);

    let mut request = self
      .client
      .request(method.clone(), &url)
      .header(AUTHORIZATION, conn.auth_header())
      .header(ACCEPT, "application/json")
      .header(CONTENT_TYPE, "application/json");

    if method != Method::GET {
      if let Some(body) = payload {
        request = request.json(body);
      }
    }

    let response = request
      .send()
      .await
      .map_err(|e| format!("request failed: {}", e))?;

    let status = response.status();
    if !status.is_success() {
      return Err(format!("HTTP error! status: {}", status));
    }

    response
      .json::<Value>()
      .await
      .map_err(|e| format!("failed to parse response: {}", e))
  }
}

#[async_trait]
impl RequestGateway for LcuGateway {
  async fn call(&self, method: Method, endpoint: &str, payload: Option<&Value>) -> Option<Value> {
    match self.send(method.clone(), endpoint, payload).await {
      Ok(value) => {
        log_debug(&format!("{} {} ok", method, endpoint));
        Some(value)
      }
      Err(e) => {
        log_error(&format!("Request {} {} failed: {}", method, endpoint, e));
        None
      }
    }
  }
}
