use {
  clap::Parser,
  humantime::Duration,
  impact_indexer::{Config, SearchQuery},
  impact_primitives::TxType,
};

/// Balance Impact Scanner
///
/// Walks the asset transfer history of an account and prints one JSON
/// line for every atomic group in which the account traded ALGO
/// against another asset.
#[derive(Debug, Parser)]
pub struct CliOptions {
  /// Account whose history is scanned
  #[clap(value_name = "ADDRESS")]
  pub address: String,

  /// Maximum number of transactions per history page
  #[clap(value_name = "LIMIT")]
  limit: Option<u64>,

  /// First round of the scanned history
  #[clap(value_name = "MIN_ROUND")]
  min_round: Option<u64>,

  /// Last round of the scanned history
  #[clap(value_name = "MAX_ROUND")]
  max_round: Option<u64>,

  /// Base URL of the indexer REST API
  #[clap(long, short,
    default_value = "https://mainnet-idx.algonode.cloud",
    value_name = "URL")]
  indexer: String,

  /// API token of the indexer, if it requires one
  #[clap(long, env = "INDEXER_API_TOKEN", value_name = "TOKEN")]
  token: Option<String>,

  /// Pause between two history pages
  #[clap(long, short = 'd', default_value = "1s", value_name = "DURATION")]
  page_delay: Duration,

  /// Timeout of a single indexer request
  #[clap(long, default_value = "30s", value_name = "DURATION")]
  timeout: Duration,
}

impl CliOptions {
  pub fn indexer_config(&self) -> Config {
    Config {
      base_url: self.indexer.clone(),
      api_token: self.token.clone(),
      timeout: self.timeout.into(),
    }
  }

  /// The first page of the scanned history.
  pub fn query(&self) -> SearchQuery {
    let mut query =
      SearchQuery::for_address(self.address.as_str()).tx_type(TxType::Axfer);
    if let Some(round) = self.min_round {
      query = query.min_round(round);
    }
    if let Some(round) = self.max_round {
      query = query.max_round(round);
    }
    if let Some(limit) = self.limit {
      query = query.limit(limit);
    }
    query
  }

  pub fn page_delay(&self) -> std::time::Duration {
    self.page_delay.into()
  }
}
