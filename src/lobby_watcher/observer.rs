// Lobby observer: phase state machine and overlay ownership

use super::types::{decode_phase, ObserverAction, ObserverState, CHAMP_SELECT_PHASE};
use crate::logging::{log_debug, log_info, log_warn};
use crate::report::OverlayHandle;

/// Tracks the gameflow phase and decides when a report run is due.
///
/// Runs are edge-triggered: repeated `ChampSelect` events while already in
/// champion select do not start another run. One observer outlives any number
/// of connections, so a reconnect mid champion select does not report twice.
#[derive(Debug)]
pub struct LobbyObserver {
  state: ObserverState,
  overlay: Option<OverlayHandle>,
  // Set once the current champion select has been reported; cleared on leaving it
  reported: bool,
}

impl Default for LobbyObserver {
  fn default() -> Self {
    Self::new()
  }
}

impl LobbyObserver {
  pub fn new() -> Self {
    Self {
      state: ObserverState::Disconnected,
      overlay: None,
      reported: false,
    }
  }

  pub fn state(&self) -> ObserverState {
    self.state
  }

  pub fn has_overlay(&self) -> bool {
    self.overlay.is_some()
  }

  pub fn on_subscribed(&mut self) {
    self.state = ObserverState::Subscribed;
  }

  /// Hands back any held overlay so the caller can remove it. Whether the
  /// current champion select was already reported survives the disconnect.
  pub fn on_disconnected(&mut self) -> Option<OverlayHandle> {
    self.state = ObserverState::Disconnected;
    self.overlay.take()
  }

  pub fn on_phase(&mut self, phase: &str) -> ObserverAction {
    if phase == CHAMP_SELECT_PHASE {
      if self.state == ObserverState::InChampionSelect {
        log_debug("Repeated ChampSelect event ignored");
        return ObserverAction::None;
      }
      self.state = ObserverState::InChampionSelect;
      if self.reported {
        log_info("Back in an already reported champion select");
        return ObserverAction::None;
      }
      log_info("Entered champion select");
      self.reported = true;
      return ObserverAction::RunPipeline;
    }

    let was_in_champ_select = self.state == ObserverState::InChampionSelect;
    self.state = ObserverState::Idle;
    self.reported = false;
    if was_in_champ_select {
      log_info(&format!("Left champion select, phase is now {}", phase));
    }
    if was_in_champ_select || self.overlay.is_some() {
      ObserverAction::Teardown
    } else {
      ObserverAction::None
    }
  }

  /// Decode one inbound frame. Malformed frames are logged and dropped.
  pub fn on_frame(&mut self, text: &str) -> ObserverAction {
    // The client acknowledges a subscription with an empty frame
    if text.trim().is_empty() {
      return ObserverAction::None;
    }
    match decode_phase(text) {
      Ok(phase) => self.on_phase(&phase),
      Err(e) => {
        log_warn(&format!("Dropping event: {}", e));
        ObserverAction::None
      }
    }
  }

  /// Take ownership of a freshly rendered overlay, returning any it replaces.
  pub fn hold_overlay(&mut self, handle: OverlayHandle) -> Option<OverlayHandle> {
    self.overlay.replace(handle)
  }

  pub fn take_overlay(&mut self) -> Option<OverlayHandle> {
    self.overlay.take()
  }
}
