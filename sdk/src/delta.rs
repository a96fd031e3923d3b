use {
  impact_primitives::{Address, AssetId, Transaction, NATIVE_ASSET_ID},
  std::collections::{btree_map, BTreeMap, BTreeSet},
};

/// Set of asset ids whose balances were touched by a computation.
pub type TouchedAssets = BTreeSet<AssetId>;

/// Unscaled balance changes per account and asset.
///
/// Amounts are kept in network base units. Every ledger amount is an
/// unsigned 64-bit value, a signed 128-bit accumulator holds any sum
/// of them a transaction group can produce without overflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBalanceDeltas {
  accounts: BTreeMap<Address, BTreeMap<AssetId, i128>>,
}

impl RawBalanceDeltas {
  /// Adds a signed amount to the balance change of an account.
  pub fn add(&mut self, account: &Address, asset: AssetId, amount: i128) {
    *self
      .accounts
      .entry(account.clone())
      .or_default()
      .entry(asset)
      .or_default() += amount;
  }

  /// Moves `amount` of `asset` from one account to another.
  fn transfer(
    &mut self,
    from: &Address,
    to: &Address,
    asset: AssetId,
    amount: u64,
  ) {
    self.add(from, asset, -i128::from(amount));
    self.add(to, asset, i128::from(amount));
  }

  pub fn get(&self, account: &str, asset: AssetId) -> Option<i128> {
    self.accounts.get(account)?.get(&asset).copied()
  }

  /// Net change of one asset across all accounts.
  pub fn net(&self, asset: AssetId) -> i128 {
    self
      .accounts
      .values()
      .filter_map(|assets| assets.get(&asset))
      .sum()
  }

  pub fn is_empty(&self) -> bool {
    self.accounts.is_empty()
  }

  pub fn iter(
    &self,
  ) -> btree_map::Iter<'_, Address, BTreeMap<AssetId, i128>> {
    self.accounts.iter()
  }
}

/// Accumulates the balance changes caused by a transaction and all
/// of its inner transactions into `deltas`.
///
/// Returns the ids of every asset whose balance was touched. When
/// `include_fees` is set, fees are debited from their payers without
/// a matching credit, since they are paid to the protocol's fee sink.
pub fn accumulate(
  tx: &Transaction,
  deltas: &mut RawBalanceDeltas,
  include_fees: bool,
) -> TouchedAssets {
  let mut touched = TouchedAssets::new();
  accumulate_into(tx, deltas, include_fees, &mut touched);
  touched
}

fn accumulate_into(
  tx: &Transaction,
  deltas: &mut RawBalanceDeltas,
  include_fees: bool,
  touched: &mut TouchedAssets,
) {
  if include_fees {
    if let Some(fee) = tx.fee.filter(|fee| *fee != 0) {
      deltas.add(&tx.sender, NATIVE_ASSET_ID, -i128::from(fee));
      touched.insert(NATIVE_ASSET_ID);
    }
  }

  if let Some(pay) = &tx.payment_transaction {
    deltas.transfer(&tx.sender, &pay.receiver, NATIVE_ASSET_ID, pay.amount);
    touched.insert(NATIVE_ASSET_ID);

    // closing an account sweeps its remainder in the same transaction
    if let (Some(close_to), Some(amount)) =
      (&pay.close_remainder_to, pay.close_amount)
    {
      if amount != 0 {
        deltas.transfer(&tx.sender, close_to, NATIVE_ASSET_ID, amount);
      }
    }
  }

  if let Some(axfer) = &tx.asset_transfer_transaction {
    // clawback names the revoked account explicitly
    let source = axfer.sender.as_ref().unwrap_or(&tx.sender);
    deltas.transfer(source, &axfer.receiver, axfer.asset_id, axfer.amount);
    touched.insert(axfer.asset_id);

    if let (Some(close_to), Some(amount)) = (&axfer.close_to, axfer.close_amount)
    {
      if amount != 0 {
        deltas.transfer(source, close_to, axfer.asset_id, amount);
      }
    }
  }

  for inner in &tx.inner_txns {
    accumulate_into(inner, deltas, include_fees, touched);
  }
}
