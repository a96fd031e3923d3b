use {
  crate::{
    cache::AssetCache,
    delta::{accumulate, RawBalanceDeltas, TouchedAssets},
    group::{lookup_group, GroupSelector},
    normalize::{normalize, BalanceImpact},
    Error,
  },
  impact_indexer::Indexer,
  impact_primitives::{Block, Transaction},
  serde::{Deserialize, Serialize},
  tracing::debug,
};

/// Controls how a balance impact is computed and presented.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(default, rename_all = "kebab-case")]
pub struct ImpactOptions {
  /// Scale base units by each asset's decimals.
  pub convert_decimals: bool,

  /// Key amounts by asset unit name instead of asset id.
  pub unit_name_keys: bool,

  /// Debit transaction fees from their payers.
  pub include_fees: bool,
}

/// Describes which single transaction to compute the impact of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionSelector {
  TxnId(String),
  Txn(Transaction),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionImpact {
  pub balance_impact: BalanceImpact,
  pub transaction: Transaction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupImpact {
  pub balance_impact: BalanceImpact,
  pub group: Vec<Transaction>,
  pub block: Block,
}

/// Computes balance impacts against one indexer.
///
/// Owns the asset metadata cache used to present amounts, so
/// metadata fetched for one computation is reused by all later ones.
/// Pass a clone of an existing [`AssetCache`] to [`Self::with_cache`]
/// to share metadata between calculators.
pub struct ImpactCalculator<I: Indexer> {
  indexer: I,
  cache: AssetCache,
}

impl<I: Indexer> ImpactCalculator<I> {
  pub fn new(indexer: I) -> Self {
    Self::with_cache(indexer, AssetCache::default())
  }

  pub fn with_cache(indexer: I, cache: AssetCache) -> Self {
    Self { indexer, cache }
  }

  pub fn indexer(&self) -> &I {
    &self.indexer
  }

  pub fn cache(&self) -> &AssetCache {
    &self.cache
  }

  /// Balance impact of one transaction, including everything its
  /// inner transactions move.
  ///
  /// Returns `None` when the transaction id is unknown.
  pub async fn transaction_balance_impact(
    &self,
    selector: TransactionSelector,
    options: ImpactOptions,
  ) -> Result<Option<TransactionImpact>, Error> {
    let transaction = match selector {
      TransactionSelector::Txn(txn) => txn,
      TransactionSelector::TxnId(id) => {
        match self.indexer.lookup_transaction(&id).await? {
          Some(txn) => txn,
          None => {
            debug!("transaction {id} not found");
            return Ok(None);
          }
        }
      }
    };

    let mut deltas = RawBalanceDeltas::default();
    let touched = accumulate(&transaction, &mut deltas, options.include_fees);
    let balance_impact = self.normalize(&deltas, &touched, options).await?;

    Ok(Some(TransactionImpact {
      balance_impact,
      transaction,
    }))
  }

  /// Combined balance impact of all members of an atomic group.
  ///
  /// A supplied block saves the block round trip whichever way the
  /// group is selected. Returns `None` when the selected transaction
  /// or round cannot be found, or the selected transaction is not a
  /// confirmed group member. A group with no members in the block
  /// yields an empty impact.
  pub async fn group_balance_impact(
    &self,
    selector: &GroupSelector,
    block: Option<Block>,
    options: ImpactOptions,
  ) -> Result<Option<GroupImpact>, Error> {
    let lookup = match lookup_group(&self.indexer, selector, block).await? {
      Some(lookup) => lookup,
      None => return Ok(None),
    };

    let mut deltas = RawBalanceDeltas::default();
    let mut touched = TouchedAssets::new();
    for txn in &lookup.group {
      touched.extend(accumulate(txn, &mut deltas, options.include_fees));
    }

    let balance_impact = self.normalize(&deltas, &touched, options).await?;
    Ok(Some(GroupImpact {
      balance_impact,
      group: lookup.group,
      block: lookup.block,
    }))
  }

  async fn normalize(
    &self,
    deltas: &RawBalanceDeltas,
    touched: &TouchedAssets,
    options: ImpactOptions,
  ) -> Result<BalanceImpact, Error> {
    normalize(&self.indexer, &self.cache, deltas, touched, options).await
  }
}
