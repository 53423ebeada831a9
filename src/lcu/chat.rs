// Champion select chat: locate the conversation and post report lines

use serde_json::json;

use super::gateway::RequestGateway;
use super::types::ChatConversation;
use crate::logging::{log_debug, log_warn};

pub const CONVERSATIONS_ENDPOINT: &str = "/lol-chat/v1/conversations";
pub const CHAMPION_SELECT_CONVERSATION: &str = "championSelect";

pub fn messages_endpoint(chat_id: &str) -> String {
  format!("{}/{}/messages", CONVERSATIONS_ENDPOINT, chat_id)
}

/// Find the champion select conversation, if the client has opened one yet.
pub async fn champion_select_conversation(gateway: &dyn RequestGateway) -> Option<ChatConversation> {
  let conversations = gateway.get(CONVERSATIONS_ENDPOINT).await?;

  let conversations: Vec<ChatConversation> = match serde_json::from_value(conversations) {
    Ok(list) => list,
    Err(e) => {
      log_warn(&format!("Unexpected conversations payload: {}", e));
      return None;
    }
  };

  let found = conversations
    .into_iter()
    .find(|c| c.conversation_type == CHAMPION_SELECT_CONVERSATION);

  if found.is_none() {
    log_debug("No championSelect conversation found");
  }
  found
}

/// Post one message. Returns whether the client accepted it; failures are already logged.
pub async fn post_message(gateway: &dyn RequestGateway, chat_id: &str, message: &str) -> bool {
  let payload = json!({
    "body": message,
    "type": "celebration"
  });
  gateway.post(&messages_endpoint(chat_id), &payload).await.is_some()
}
