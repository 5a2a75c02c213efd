//! Error types for dispatching requests.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::endpoints::Endpoint;

#[derive(Debug, Error)]
pub enum DispatchError {
  /// The caller asked for an option key the catalog does not know.
  #[error("unsupported option identifier: {0}")]
  UnknownOption(String),

  /// A template with this key is already in the catalog.
  #[error("option identifier already defined: {0}")]
  DuplicateOption(String),

  #[error("invalid catalog definition: {0}")]
  InvalidCatalog(#[source] serde_json::Error),

  #[error("no URL configured for the {0} endpoint")]
  EndpointNotConfigured(Endpoint),

  /// The request never completed (DNS, refused connection, broken body).
  #[error("request to the {endpoint} endpoint failed: {source}")]
  Transport {
    endpoint: Endpoint,
    #[source]
    source:   reqwest::Error,
  },

  #[error("the {endpoint} endpoint answered {status}: {body}")]
  Status {
    endpoint: Endpoint,
    status:   StatusCode,
    body:     String,
  },

  #[error("request to the {endpoint} endpoint timed out after {}s", after.as_secs_f32())]
  Timeout { endpoint: Endpoint, after: Duration },

  /// The response body is not shaped like the endpoint's documented reply.
  #[error("unexpected response shape from the {endpoint} endpoint: {source}")]
  MalformedResponse {
    endpoint: Endpoint,
    #[source]
    source:   serde_json::Error,
  },

  /// A fixed-index extraction ran past the end of a response list.
  #[error(
    "the {endpoint} endpoint returned {len} entries in `{field}`, expected \
     index {index}"
  )]
  MissingIndex {
    endpoint: Endpoint,
    field:    &'static str,
    index:    usize,
    len:      usize,
  },
}

pub type Result<T, E = DispatchError> = std::result::Result<T, E>;
