//! Requests to a hosted assistant thread.
//!
//! The assistant endpoint replies with the thread's message list. The user's
//! question is the first entry and the assistant's answer the second, so the
//! answer is read from a fixed position.

use core::fmt::{Display, Formatter};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
  endpoints::Endpoint,
  error::Result,
  utils::{nth, parse_body, post_json},
  Dispatcher, RequestHandler, ResponseType,
};

pub const DEFAULT_ASSISTANT_ID: &str = "asst_BJazzPrqisexDOnT6GfE76jY";
pub const DEFAULT_THREAD_ID: &str = "thread_a2YfpinOlgziNSj7K6tmGBbj";

/// Position of the assistant's reply in `messages`.
pub const ASSISTANT_REPLY_INDEX: usize = 1;
/// Position of the text part in a message's `content`.
pub const CONTENT_INDEX: usize = 0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssistantPayload {
  pub assistant_id: String,
  pub new_thread:   bool,
  pub thread_id:    String,
  pub question:     String,
}

#[derive(Clone, Debug)]
pub struct AssistantRequest {
  pub message:   String,
  pub thread_id: Option<String>,
}

impl AssistantRequest {
  /// A question that starts a fresh thread.
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message:   message.into(),
      thread_id: None,
    }
  }

  /// Continue an existing thread instead of opening a new one.
  pub fn continue_thread(mut self, thread_id: impl Into<String>) -> Self {
    self.thread_id = Some(thread_id.into());
    self
  }

  pub fn build_payload(&self) -> AssistantPayload {
    AssistantPayload {
      assistant_id: DEFAULT_ASSISTANT_ID.to_string(),
      new_thread:   self.thread_id.is_none(),
      thread_id:    self
        .thread_id
        .clone()
        .unwrap_or_else(|| DEFAULT_THREAD_ID.to_string()),
      question:     self.message.clone(),
    }
  }
}

pub struct AssistantResponse(String);

impl AssistantResponse {
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl Display for AssistantResponse {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl ResponseType for AssistantResponse {}

#[derive(Deserialize)]
struct ThreadBody {
  messages: Vec<ThreadMessage>,
}

#[derive(Deserialize)]
struct ThreadMessage {
  content: Vec<ContentPart>,
}

#[derive(Deserialize)]
struct ContentPart {
  text: TextPart,
}

#[derive(Deserialize)]
struct TextPart {
  value: String,
}

fn extract_reply(body: &str) -> Result<String> {
  let endpoint = Endpoint::Assistant;
  let body: ThreadBody = parse_body(endpoint, body)?;
  let reply = nth(&body.messages, ASSISTANT_REPLY_INDEX, endpoint, "messages")?;
  let part = nth(&reply.content, CONTENT_INDEX, endpoint, "content")?;
  Ok(part.text.value.clone())
}

#[async_trait]
impl RequestHandler for AssistantRequest {
  type Res = AssistantResponse;
  async fn send(&self, dispatcher: &Dispatcher, id: u64) -> Result<Self::Res> {
    let payload = self.build_payload();
    let body = post_json(dispatcher, Endpoint::Assistant, id, &payload).await?;
    Ok(AssistantResponse(extract_reply(&body)?))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::DispatchError;

  #[test]
  fn new_request_opens_a_thread() {
    let payload = AssistantRequest::new("hei").build_payload();
    assert_eq!(
      payload,
      AssistantPayload {
        assistant_id: DEFAULT_ASSISTANT_ID.to_string(),
        new_thread:   true,
        thread_id:    DEFAULT_THREAD_ID.to_string(),
        question:     "hei".to_string(),
      }
    );
  }

  #[test]
  fn continued_request_keeps_its_thread() {
    let payload = AssistantRequest::new("og så?")
      .continue_thread("thread_abc")
      .build_payload();
    assert!(!payload.new_thread);
    assert_eq!(payload.thread_id, "thread_abc");
  }

  #[test]
  fn reads_the_second_message() {
    let body = r#"{"messages":[
      {"content":[{"text":{"value":"first"}}]},
      {"content":[{"text":{"value":"second"}}]}
    ]}"#;
    assert_eq!(extract_reply(body).unwrap(), "second");
  }

  #[test]
  fn empty_content_is_missing_index() {
    let body = r#"{"messages":[
      {"content":[{"text":{"value":"first"}}]},
      {"content":[]}
    ]}"#;
    assert!(matches!(
      extract_reply(body),
      Err(DispatchError::MissingIndex {
        field: "content",
        len: 0,
        ..
      })
    ));
  }
}
