//! Policies for controlling request behavior.

use tokio::time::Duration;

#[derive(Clone, Debug, Default)]
pub struct Policies {
  pub timeout_policy: TimeoutPolicy,
}

/// A policy for bounding how long a single request may take.
///
/// With no timeout set, a request waits for as long as the backend holds the
/// connection open.
#[derive(Clone, Debug, Default)]
pub struct TimeoutPolicy {
  pub timeout: Option<Duration>,
}

impl TimeoutPolicy {
  /// Returns a new timeout policy with the given timeout.
  pub fn new(timeout: Duration) -> Self {
    Self {
      timeout: Some(timeout),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_policy_never_times_out() {
    assert_eq!(Policies::default().timeout_policy.timeout, None);
    assert_eq!(
      TimeoutPolicy::new(Duration::from_secs(5)).timeout,
      Some(Duration::from_secs(5))
    );
  }
}
