mod cache;
mod delta;
mod group;
mod impact;
mod normalize;

pub use {
  cache::{AssetCache, AssetMetadata},
  delta::{accumulate, RawBalanceDeltas, TouchedAssets},
  group::{
    lookup_group,
    lookup_group_by_id,
    lookup_group_by_txn,
    lookup_group_by_txn_id,
    GroupLookup,
    GroupSelector,
  },
  impact::{
    GroupImpact,
    ImpactCalculator,
    ImpactOptions,
    TransactionImpact,
    TransactionSelector,
  },
  normalize::{normalize, scale, AssetKey, BalanceImpact},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("Indexer error: {0}")]
  Indexer(#[from] impact_indexer::Error),

  #[error("Invalid group id {0:?}: {1}")]
  InvalidGroupId(String, base64::DecodeError),
}
