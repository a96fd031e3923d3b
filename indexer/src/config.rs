use std::time::Duration;

/// Connection settings of the HTTP indexer client.
#[derive(Debug, Clone)]
pub struct Config {
  /// Base URL of the indexer REST API, without the `/v2` suffix.
  pub base_url: String,

  /// Sent as the `X-Indexer-API-Token` header when set. Public
  /// indexers usually don't require one.
  pub api_token: Option<String>,

  /// Upper bound on a single request, including reading the body.
  pub timeout: Duration,
}

impl Config {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      ..Default::default()
    }
  }

  /// Joins the base url with an API path, tolerating a trailing
  /// slash on the configured base.
  pub(crate) fn url(&self, path: &str) -> String {
    format!("{}{path}", self.base_url.trim_end_matches('/'))
  }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      base_url: "https://mainnet-idx.algonode.cloud".into(),
      api_token: None,
      timeout: Duration::from_secs(30),
    }
  }
}
