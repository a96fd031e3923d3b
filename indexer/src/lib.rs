mod config;
mod http;
mod query;

pub use {
  config::Config,
  http::HttpIndexer,
  query::{SearchQuery, TransactionPage},
};
use {
  async_trait::async_trait,
  impact_primitives::{AssetId, AssetParams, Block, Transaction},
  std::sync::Arc,
  thiserror::Error,
};

#[derive(Debug, Error)]
pub enum Error {
  #[error("HTTP transport error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("Indexer responded with status {status} for {url}")]
  Status { status: u16, url: String },

  #[error("Malformed indexer response: {0}")]
  Decode(#[from] serde_json::Error),

  #[error("API token is not a valid header value")]
  InvalidApiToken,
}

/// The ledger query service.
///
/// Every method corresponds to exactly one request/response pair with
/// the service. Entities the service does not know about are reported
/// as `Ok(None)`, while transport and service failures are errors that
/// the caller is expected to handle (retry, back off or abort). No
/// implementation retries internally.
#[async_trait]
pub trait Indexer: Send + Sync {
  /// Resolves a transaction id to the confirmed transaction.
  async fn lookup_transaction(
    &self,
    id: &str,
  ) -> Result<Option<Transaction>, Error>;

  /// Fetches the block confirmed at the given round.
  async fn lookup_block(&self, round: u64) -> Result<Option<Block>, Error>;

  /// Fetches the parameters of an asset.
  async fn lookup_asset(
    &self,
    id: AssetId,
  ) -> Result<Option<AssetParams>, Error>;

  /// Returns one page of transactions matching the query. The page
  /// carries a continuation token when more results are available.
  async fn search_transactions(
    &self,
    query: &SearchQuery,
  ) -> Result<TransactionPage, Error>;
}

#[async_trait]
impl<T: Indexer + ?Sized> Indexer for Arc<T> {
  async fn lookup_transaction(
    &self,
    id: &str,
  ) -> Result<Option<Transaction>, Error> {
    (**self).lookup_transaction(id).await
  }

  async fn lookup_block(&self, round: u64) -> Result<Option<Block>, Error> {
    (**self).lookup_block(round).await
  }

  async fn lookup_asset(
    &self,
    id: AssetId,
  ) -> Result<Option<AssetParams>, Error> {
    (**self).lookup_asset(id).await
  }

  async fn search_transactions(
    &self,
    query: &SearchQuery,
  ) -> Result<TransactionPage, Error> {
    (**self).search_transactions(query).await
  }
}
