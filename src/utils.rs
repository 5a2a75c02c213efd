use log::{debug, error, log_enabled, Level};
use serde::{de::DeserializeOwned, Serialize};
use tokio::time::timeout;

use crate::{
  endpoints::Endpoint,
  error::{DispatchError, Result},
  Dispatcher,
};

/// POSTs `payload` as JSON to `endpoint` and returns the raw body of a
/// successful reply.
pub(crate) async fn post_json<P>(
  dispatcher: &Dispatcher,
  endpoint: Endpoint,
  id: u64,
  payload: &P,
) -> Result<String>
where
  P: Serialize + Sync + ?Sized,
{
  let url = dispatcher.endpoints().url(endpoint)?;
  debug!("starting request {} to the {} endpoint", id, endpoint);
  if log_enabled!(Level::Debug) {
    if let Ok(body) = serde_json::to_string(payload) {
      debug!("request {} payload: {}", id, body);
    }
  }

  let timer = timing::start();
  let request = async {
    let response = dispatcher
      .client()
      .post(url)
      .json(payload)
      .send()
      .await
      .map_err(|source| DispatchError::Transport { endpoint, source })?;

    let status = response.status();
    let body = response
      .text()
      .await
      .map_err(|source| DispatchError::Transport { endpoint, source })?;
    if !status.is_success() {
      return Err(DispatchError::Status {
        endpoint,
        status,
        body,
      });
    }
    Ok::<_, DispatchError>(body)
  };

  let result = match dispatcher.policies().timeout_policy.timeout {
    Some(after) => match timeout(after, request).await {
      Ok(result) => result,
      Err(_) => Err(DispatchError::Timeout { endpoint, after }),
    },
    None => request.await,
  };

  match &result {
    Ok(_) => debug!(
      "got response for {} in {}",
      id,
      timer.elapsed().as_secs_f32()
    ),
    Err(err) => error!("request {} failed: {}", id, err),
  }
  result
}

pub(crate) fn parse_body<T: DeserializeOwned>(
  endpoint: Endpoint,
  body: &str,
) -> Result<T> {
  serde_json::from_str(body)
    .map_err(|source| DispatchError::MalformedResponse { endpoint, source })
}

/// Fixed-index access into a response list.
pub(crate) fn nth<'a, T>(
  items: &'a [T],
  index: usize,
  endpoint: Endpoint,
  field: &'static str,
) -> Result<&'a T> {
  items.get(index).ok_or(DispatchError::MissingIndex {
    endpoint,
    field,
    index,
    len: items.len(),
  })
}
