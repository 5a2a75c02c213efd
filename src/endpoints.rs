use core::fmt::{Display, Formatter};

use crate::error::{DispatchError, Result};

/// The backend endpoints a request can be dispatched to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
  /// OpenAI-compatible chat completions.
  Chat,
  /// The alternate "Nora" model.
  Nora,
  /// Hosted assistant threads.
  Assistant,
  /// Image description.
  Vision,
}

impl Endpoint {
  pub const ALL: [Endpoint; 4] = [
    Endpoint::Chat,
    Endpoint::Nora,
    Endpoint::Assistant,
    Endpoint::Vision,
  ];

  /// The environment variable `Endpoints::from_env` reads this endpoint's URL
  /// from.
  pub fn env_var(self) -> &'static str {
    match self {
      Endpoint::Chat => "PUBLIC_LOCAL_OPENAICHAT",
      Endpoint::Nora => "PUBLIC_LOCAL_NORACHAT",
      Endpoint::Assistant => "PUBLIC_LOCAL_OPENAIASSISTANT",
      Endpoint::Vision => "PUBLIC_LOCAL_OPENAIVISION",
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Endpoint::Chat => "chat",
      Endpoint::Nora => "nora",
      Endpoint::Assistant => "assistant",
      Endpoint::Vision => "vision",
    }
  }
}

impl Display for Endpoint {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// URLs for each backend endpoint. Built once at startup and handed to the
/// `Dispatcher`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Endpoints {
  pub chat:      Option<String>,
  pub nora:      Option<String>,
  pub assistant: Option<String>,
  pub vision:    Option<String>,
}

impl Endpoints {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, endpoint: Endpoint, url: impl Into<String>) -> Self {
    *self.slot_mut(endpoint) = Some(url.into());
    self
  }

  /// Loads `.env` if present, then reads one variable per endpoint. Values
  /// are trimmed and blank ones are treated as unset. Variables already in
  /// the process environment win over `.env`.
  pub fn from_env() -> Self {
    dotenv::dotenv().ok();
    Self::from_lookup(|name| std::env::var(name).ok())
  }

  pub(crate) fn from_lookup(
    mut lookup: impl FnMut(&'static str) -> Option<String>,
  ) -> Self {
    let mut endpoints = Self::default();
    for endpoint in Endpoint::ALL {
      let url = lookup(endpoint.env_var())
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty());
      *endpoints.slot_mut(endpoint) = url;
    }
    endpoints
  }

  pub fn get(&self, endpoint: Endpoint) -> Option<&str> {
    match endpoint {
      Endpoint::Chat => self.chat.as_deref(),
      Endpoint::Nora => self.nora.as_deref(),
      Endpoint::Assistant => self.assistant.as_deref(),
      Endpoint::Vision => self.vision.as_deref(),
    }
  }

  pub fn url(&self, endpoint: Endpoint) -> Result<&str> {
    self
      .get(endpoint)
      .ok_or(DispatchError::EndpointNotConfigured(endpoint))
  }

  fn slot_mut(&mut self, endpoint: Endpoint) -> &mut Option<String> {
    match endpoint {
      Endpoint::Chat => &mut self.chat,
      Endpoint::Nora => &mut self.nora,
      Endpoint::Assistant => &mut self.assistant,
      Endpoint::Vision => &mut self.vision,
    }
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  #[test]
  fn lookup_maps_each_variable_to_its_endpoint() {
    let vars: HashMap<&str, &str> = [
      ("PUBLIC_LOCAL_OPENAICHAT", "http://localhost:7071/api/chat"),
      ("PUBLIC_LOCAL_NORACHAT", "http://localhost:7071/api/nora"),
      ("PUBLIC_LOCAL_OPENAIASSISTANT", " http://localhost:7071/api/asst "),
      ("PUBLIC_LOCAL_OPENAIVISION", ""),
    ]
    .into_iter()
    .collect();

    let endpoints =
      Endpoints::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

    assert_eq!(endpoints.get(Endpoint::Chat), Some("http://localhost:7071/api/chat"));
    assert_eq!(endpoints.get(Endpoint::Nora), Some("http://localhost:7071/api/nora"));
    assert_eq!(
      endpoints.get(Endpoint::Assistant),
      Some("http://localhost:7071/api/asst")
    );
    assert_eq!(endpoints.get(Endpoint::Vision), None);
  }

  #[test]
  fn missing_url_is_a_typed_error() {
    let endpoints = Endpoints::new().with(Endpoint::Chat, "http://chat");
    assert_eq!(endpoints.url(Endpoint::Chat).unwrap(), "http://chat");
    assert!(matches!(
      endpoints.url(Endpoint::Vision),
      Err(DispatchError::EndpointNotConfigured(Endpoint::Vision))
    ));
  }
}
