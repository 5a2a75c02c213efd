use async_trait::async_trait;
use serde_json::Value;

use crate::{
  catalog::{Catalog, OptionTemplate},
  endpoints::Endpoint,
  error::Result,
  utils::post_json,
  Dispatcher, RequestHandler, ResponseType,
};

/// A question for the Nora model. The template's `question` field carries the
/// caller's message.
#[derive(Clone, Debug)]
pub struct NoraChatRequest {
  pub chosen_option: String,
  pub message:       String,
}

impl NoraChatRequest {
  pub fn new(
    chosen_option: impl Into<String>,
    message: impl Into<String>,
  ) -> Self {
    Self {
      chosen_option: chosen_option.into(),
      message:       message.into(),
    }
  }

  pub fn build_payload(&self, catalog: &Catalog) -> Result<OptionTemplate> {
    let mut payload = catalog.get(&self.chosen_option)?.clone();
    payload.question = Some(self.message.clone());
    Ok(payload)
  }
}

/// The backend's reply, unprocessed. A body that is not JSON is kept as a
/// string value.
pub struct NoraResponse(Value);

impl NoraResponse {
  pub fn into_inner(self) -> Value {
    self.0
  }
}

impl ResponseType for NoraResponse {}

#[async_trait]
impl RequestHandler for NoraChatRequest {
  type Res = NoraResponse;
  async fn send(&self, dispatcher: &Dispatcher, id: u64) -> Result<Self::Res> {
    let payload = self.build_payload(dispatcher.catalog())?;
    let body = post_json(dispatcher, Endpoint::Nora, id, &payload).await?;

    let value = serde_json::from_str(&body).unwrap_or(Value::String(body));
    Ok(NoraResponse(value))
  }
}
