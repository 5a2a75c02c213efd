pub mod assistant;
pub mod catalog;
pub mod chat;
pub mod endpoints;
pub mod error;
pub mod policies;
pub mod prelude;
pub mod utils;
pub mod vision;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tinyrand::Rand;

use crate::{
  assistant::AssistantRequest,
  catalog::Catalog,
  chat::{nora::NoraChatRequest, simple::SimpleChatRequest},
  endpoints::Endpoints,
  error::Result,
  policies::Policies,
  vision::VisionRequest,
};

pub trait ResponseType: 'static + Send {}

/// One kind of outbound request: how to build its payload, where to send it,
/// and what to pull out of the reply.
#[async_trait]
pub trait RequestHandler: Sync {
  type Res: ResponseType;
  async fn send(&self, dispatcher: &Dispatcher, id: u64) -> Result<Self::Res>;
}

/// Sends requests to the configured backends.
///
/// Cloning is cheap and clones share the HTTP connection pool and catalog.
#[derive(Clone)]
pub struct Dispatcher {
  client:    reqwest::Client,
  catalog:   Arc<Catalog>,
  endpoints: Arc<Endpoints>,
  policies:  Policies,
}

impl Dispatcher {
  pub fn new(catalog: Catalog, endpoints: Endpoints, policies: Policies) -> Self {
    Self::with_client(reqwest::Client::new(), catalog, endpoints, policies)
  }

  pub fn with_client(
    client: reqwest::Client,
    catalog: Catalog,
    endpoints: Endpoints,
    policies: Policies,
  ) -> Self {
    Self {
      client,
      catalog: Arc::new(catalog),
      endpoints: Arc::new(endpoints),
      policies,
    }
  }

  pub fn catalog(&self) -> &Catalog {
    &self.catalog
  }

  pub fn endpoints(&self) -> &Endpoints {
    &self.endpoints
  }

  pub fn policies(&self) -> &Policies {
    &self.policies
  }

  pub fn client(&self) -> &reqwest::Client {
    &self.client
  }

  pub async fn dispatch<Req>(&self, request: &Req) -> Result<Req::Res>
  where
    Req: RequestHandler,
  {
    let id = tinyrand_std::thread_rand().next_u64();
    request.send(self, id).await
  }

  /// Sends `message` and `kontekst` with the template for `chosen_option` to
  /// the chat endpoint and returns the first choice's content.
  pub async fn simple_chat(
    &self,
    chosen_option: &str,
    message: &str,
    kontekst: &str,
  ) -> Result<String> {
    let request = SimpleChatRequest::new(chosen_option, message, kontekst);
    Ok(self.dispatch(&request).await?.into_inner())
  }

  /// Asks the Nora model and returns its reply body untouched.
  pub async fn nora_chat(
    &self,
    chosen_option: &str,
    message: &str,
  ) -> Result<Value> {
    let request = NoraChatRequest::new(chosen_option, message);
    Ok(self.dispatch(&request).await?.into_inner())
  }

  pub async fn assistant(&self, message: &str) -> Result<String> {
    let request = AssistantRequest::new(message);
    Ok(self.dispatch(&request).await?.into_inner())
  }

  /// Asks the vision endpoint about the image at `image_url`.
  pub async fn vision(&self, message: &str, image_url: &str) -> Result<String> {
    let request = VisionRequest::new(message, image_url);
    Ok(self.dispatch(&request).await?.into_inner())
  }
}
