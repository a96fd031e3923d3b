use {
  crate::Error,
  dashmap::DashMap,
  impact_indexer::Indexer,
  impact_primitives::{
    AssetId,
    AssetParams,
    NATIVE_ASSET_ID,
    NATIVE_DECIMALS,
    NATIVE_UNIT_NAME,
  },
  std::sync::Arc,
  tracing::{debug, warn},
};

/// The parts of an asset's parameters needed to present amounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetMetadata {
  pub decimals: u32,
  pub unit_name: String,
}

impl AssetMetadata {
  /// Fixed parameters of the native coin.
  pub fn native() -> Self {
    Self {
      decimals: NATIVE_DECIMALS,
      unit_name: NATIVE_UNIT_NAME.to_owned(),
    }
  }

  /// Assets without a unit name are labeled with their id.
  pub fn from_params(id: AssetId, params: AssetParams) -> Self {
    Self {
      decimals: params.decimals,
      unit_name: params.unit_name.unwrap_or_else(|| id.to_string()),
    }
  }

  /// Presentation used for assets the indexer does not know about.
  fn unresolved(id: AssetId) -> Self {
    Self {
      decimals: 0,
      unit_name: id.to_string(),
    }
  }
}

/// Memoizes asset metadata fetched from the indexer.
///
/// Cloning the cache yields another handle to the same entries, so
/// one instance can be shared by many computations and tasks. Entries
/// are never evicted, asset parameters relevant here don't change
/// once the asset is created. Two concurrent misses for the same id
/// both fetch and the last write wins, which is harmless because
/// both fetches return identical metadata.
#[derive(Debug, Clone, Default)]
pub struct AssetCache {
  entries: Arc<DashMap<AssetId, AssetMetadata>>,
}

impl AssetCache {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, id: AssetId) -> Option<AssetMetadata> {
    self.entries.get(&id).map(|entry| entry.value().clone())
  }

  pub fn set(&self, id: AssetId, metadata: AssetMetadata) {
    self.entries.insert(id, metadata);
  }

  pub fn has(&self, id: AssetId) -> bool {
    self.entries.contains_key(&id)
  }

  pub fn clear(&self) {
    self.entries.clear();
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Returns the metadata of an asset, fetching and caching it on a
  /// miss. The native coin is answered without touching the cache or
  /// the indexer.
  ///
  /// Assets unknown to the indexer resolve to zero decimals labeled
  /// by their id. That fallback is not cached, so a later call will
  /// ask the indexer again.
  pub async fn resolve(
    &self,
    indexer: &impl Indexer,
    id: AssetId,
  ) -> Result<AssetMetadata, Error> {
    if id == NATIVE_ASSET_ID {
      return Ok(AssetMetadata::native());
    }

    if let Some(metadata) = self.get(id) {
      debug!("asset {id} metadata cache hit");
      return Ok(metadata);
    }

    debug!("asset {id} metadata cache miss, querying indexer");
    match indexer.lookup_asset(id).await? {
      Some(params) => {
        let metadata = AssetMetadata::from_params(id, params);
        self.set(id, metadata.clone());
        Ok(metadata)
      }
      None => {
        warn!("asset {id} is unknown to the indexer, using raw units");
        Ok(AssetMetadata::unresolved(id))
      }
    }
  }
}
