use core::fmt::{Display, Formatter};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
  endpoints::Endpoint,
  error::Result,
  utils::{parse_body, post_json},
  Dispatcher, RequestHandler, ResponseType,
};

pub const VISION_MODEL: &str = "gpt-4-turbo";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisionPayload {
  pub model:     String,
  pub question:  String,
  pub bilde_url: String,
}

/// A question about the image at `image_url`.
#[derive(Clone, Debug)]
pub struct VisionRequest {
  pub message:   String,
  pub image_url: String,
}

impl VisionRequest {
  pub fn new(message: impl Into<String>, image_url: impl Into<String>) -> Self {
    Self {
      message:   message.into(),
      image_url: image_url.into(),
    }
  }

  pub fn build_payload(&self) -> VisionPayload {
    VisionPayload {
      model:     VISION_MODEL.to_string(),
      question:  self.message.clone(),
      bilde_url: self.image_url.clone(),
    }
  }
}

pub struct VisionResponse(String);

impl VisionResponse {
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl Display for VisionResponse {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl ResponseType for VisionResponse {}

#[derive(Deserialize)]
struct VisionBody {
  message: VisionMessage,
}

#[derive(Deserialize)]
struct VisionMessage {
  content: String,
}

#[async_trait]
impl RequestHandler for VisionRequest {
  type Res = VisionResponse;
  async fn send(&self, dispatcher: &Dispatcher, id: u64) -> Result<Self::Res> {
    let payload = self.build_payload();
    let body = post_json(dispatcher, Endpoint::Vision, id, &payload).await?;

    let body: VisionBody = parse_body(Endpoint::Vision, &body)?;
    Ok(VisionResponse(body.message.content))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kontekst_becomes_the_image_url() {
    let payload = VisionRequest::new("Hva ser du?", "https://example.org/a.png")
      .build_payload();
    assert_eq!(
      serde_json::to_value(&payload).unwrap(),
      serde_json::json!({
        "model": "gpt-4-turbo",
        "question": "Hva ser du?",
        "bilde_url": "https://example.org/a.png"
      })
    );
  }
}
