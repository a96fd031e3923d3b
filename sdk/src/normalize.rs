use {
  crate::{
    cache::AssetCache,
    delta::{RawBalanceDeltas, TouchedAssets},
    Error,
    ImpactOptions,
  },
  impact_indexer::Indexer,
  impact_primitives::{Address, AssetId},
  serde::{Serialize, Serializer},
  std::{
    collections::{btree_map, BTreeMap, HashMap},
    fmt::Display,
  },
};

/// Key of an amount in a [`BalanceImpact`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetKey {
  Id(AssetId),
  UnitName(String),
}

impl Display for AssetKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      AssetKey::Id(id) => write!(f, "{id}"),
      AssetKey::UnitName(name) => write!(f, "{name}"),
    }
  }
}

impl From<AssetId> for AssetKey {
  fn from(id: AssetId) -> Self {
    AssetKey::Id(id)
  }
}

impl From<&str> for AssetKey {
  fn from(name: &str) -> Self {
    AssetKey::UnitName(name.to_owned())
  }
}

// JSON object keys must be strings
impl Serialize for AssetKey {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

/// Net balance change per account and asset, ready for presentation.
///
/// Zero amounts and accounts left without any entry are never
/// present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BalanceImpact(BTreeMap<Address, BTreeMap<AssetKey, f64>>);

impl BalanceImpact {
  pub fn account(&self, account: &str) -> Option<&BTreeMap<AssetKey, f64>> {
    self.0.get(account)
  }

  pub fn amount(&self, account: &str, key: impl Into<AssetKey>) -> Option<f64> {
    self.account(account)?.get(&key.into()).copied()
  }

  pub fn accounts(&self) -> impl Iterator<Item = &Address> {
    self.0.keys()
  }

  pub fn iter(
    &self,
  ) -> btree_map::Iter<'_, Address, BTreeMap<AssetKey, f64>> {
    self.0.iter()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

/// Converts an amount in base units to whole units of an asset with
/// the given number of decimals.
pub fn scale(raw: i128, decimals: u32) -> f64 {
  raw as f64 / 10f64.powi(decimals as i32)
}

/// Turns raw integer deltas into a [`BalanceImpact`].
///
/// Metadata of every touched asset is resolved once, up front,
/// through the cache: decimals first when `convert_decimals` is set,
/// then unit names in a separate pass when `unit_name_keys` is set.
/// With both options off no metadata is resolved.
///
/// Distinct assets sharing a unit name are merged under that name.
pub async fn normalize(
  indexer: &impl Indexer,
  cache: &AssetCache,
  deltas: &RawBalanceDeltas,
  touched: &TouchedAssets,
  options: ImpactOptions,
) -> Result<BalanceImpact, Error> {
  let mut decimals = HashMap::new();
  if options.convert_decimals {
    for &id in touched {
      decimals.insert(id, cache.resolve(indexer, id).await?.decimals);
    }
  }

  let mut unit_names = HashMap::new();
  if options.unit_name_keys {
    for &id in touched {
      unit_names.insert(id, cache.resolve(indexer, id).await?.unit_name);
    }
  }

  let mut output = BTreeMap::new();
  for (account, assets) in deltas.iter() {
    let mut entries: BTreeMap<AssetKey, f64> = BTreeMap::new();
    for (&id, &raw) in assets {
      let amount = match decimals.get(&id) {
        Some(&decimals) => scale(raw, decimals),
        None => raw as f64,
      };

      let key = match unit_names.get(&id) {
        Some(name) => AssetKey::UnitName(name.clone()),
        None => AssetKey::Id(id),
      };

      *entries.entry(key).or_default() += amount;
    }

    entries.retain(|_, amount| *amount != 0.0);
    if !entries.is_empty() {
      output.insert(account.clone(), entries);
    }
  }

  Ok(BalanceImpact(output))
}
