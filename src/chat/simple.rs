use core::fmt::{Display, Formatter};

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
  catalog::{Catalog, OptionTemplate},
  endpoints::Endpoint,
  error::Result,
  utils::{nth, parse_body, post_json},
  Dispatcher, RequestHandler, ResponseType,
};

/// Index of the choice whose content is returned.
pub const CHOICE_INDEX: usize = 0;

#[derive(Clone, Debug)]
pub struct SimpleChatRequest {
  pub chosen_option:   String,
  pub message:         String,
  pub kontekst:        String,
  pub message_history: Option<String>,
  pub base64_string:   Option<String>,
}

impl SimpleChatRequest {
  pub fn new(
    chosen_option: impl Into<String>,
    message: impl Into<String>,
    kontekst: impl Into<String>,
  ) -> Self {
    Self {
      chosen_option:   chosen_option.into(),
      message:         message.into(),
      kontekst:        kontekst.into(),
      message_history: None,
      base64_string:   None,
    }
  }

  pub fn with_message_history(mut self, history: impl Into<String>) -> Self {
    self.message_history = Some(history.into());
    self
  }

  /// Attaches a base64-encoded image for presets that accept one.
  pub fn with_base64_string(mut self, encoded: impl Into<String>) -> Self {
    self.base64_string = Some(encoded.into());
    self
  }

  /// A copy of the chosen template with this request's fields laid over it.
  pub fn build_payload(&self, catalog: &Catalog) -> Result<OptionTemplate> {
    let mut payload = catalog.get(&self.chosen_option)?.clone();
    payload.message = Some(self.message.clone());
    payload.kontekst = Some(self.kontekst.clone());
    if let Some(history) = &self.message_history {
      payload.message_history = Some(history.clone());
    }
    if let Some(encoded) = &self.base64_string {
      payload.base64_string = Some(encoded.clone());
    }
    Ok(payload)
  }
}

pub struct ChatResponse(String);

impl ChatResponse {
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl Display for ChatResponse {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl ResponseType for ChatResponse {}

#[derive(Deserialize)]
struct ChatCompletionBody {
  choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
  message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
  content: String,
}

#[async_trait]
impl RequestHandler for SimpleChatRequest {
  type Res = ChatResponse;
  async fn send(&self, dispatcher: &Dispatcher, id: u64) -> Result<Self::Res> {
    let payload = self.build_payload(dispatcher.catalog())?;
    let body = post_json(dispatcher, Endpoint::Chat, id, &payload).await?;

    let body: ChatCompletionBody = parse_body(Endpoint::Chat, &body)?;
    let choice = nth(&body.choices, CHOICE_INDEX, Endpoint::Chat, "choices")?;
    Ok(ChatResponse(choice.message.content.clone()))
  }
}
