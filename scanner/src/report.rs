use {
  impact_indexer::Indexer,
  impact_primitives::{Block, GroupId, Transaction, NATIVE_UNIT_NAME},
  impact_sdk::{AssetKey, GroupImpact, GroupSelector, ImpactCalculator, ImpactOptions},
  serde::Serialize,
  std::collections::{BTreeMap, HashSet},
  time::{format_description::well_known::Rfc3339, OffsetDateTime},
  tracing::{debug, warn},
};

/// Field names of [`TradeLine`] that an asset key must not shadow.
const RESERVED_KEYS: [&str; 4] = ["ts", "acct", "rate", "txId"];

const OPTIONS: ImpactOptions = ImpactOptions {
  convert_decimals: true,
  unit_name_keys: true,
  include_fees: false,
};

/// One printed line: what the scanned account gave and received in a
/// group that traded ALGO against another asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeLine {
  pub ts: Option<String>,

  /// Prefix of the account that sent the trade's transfer.
  pub acct: Option<String>,

  /// ALGO paid or received per unit of the other asset, rounded.
  pub rate: u64,

  /// Amounts by asset key. Keys equal to one of the line's own field
  /// names are prefixed with `asset:`.
  #[serde(flatten)]
  pub amounts: BTreeMap<String, f64>,

  #[serde(rename = "txId")]
  pub tx_id: Option<String>,
}

impl TradeLine {
  /// Builds the line for `address` out of a group impact.
  ///
  /// Groups where the account's impact does not involve ALGO and at
  /// least one other asset are not trades and produce nothing.
  pub fn from_group(
    address: &str,
    impact: &GroupImpact,
    round_time: Option<u64>,
  ) -> Option<Self> {
    let amounts = impact.balance_impact.account(address)?;
    let algo = *amounts.get(&AssetKey::from(NATIVE_UNIT_NAME))?;
    let (_, other) = amounts
      .iter()
      .find(|(key, _)| **key != AssetKey::from(NATIVE_UNIT_NAME))?;

    let transfer = impact
      .group
      .iter()
      .find(|tx| tx.is_transfer() && tx.sender.as_str() == address);

    Some(Self {
      ts: round_time.and_then(timestamp),
      acct: transfer.map(|tx| tx.sender.chars().take(8).collect()),
      rate: (algo / other).abs().round() as u64,
      amounts: amounts
        .iter()
        .map(|(key, amount)| (amount_key(key), *amount))
        .collect(),
      tx_id: transfer.and_then(|tx| tx.id.clone()),
    })
  }
}

fn amount_key(key: &AssetKey) -> String {
  let key = key.to_string();
  match RESERVED_KEYS.contains(&key.as_str()) {
    true => format!("asset:{key}"),
    false => key,
  }
}

fn timestamp(unix: u64) -> Option<String> {
  let time = OffsetDateTime::from_unix_timestamp(unix as i64).ok()?;
  time.format(&Rfc3339).ok()
}

/// Turns pages of an account's history into trade lines.
///
/// Every group is reported at most once, however many of its members
/// show up in the history. The block of the latest round is kept, since
/// a busy account often has several groups confirmed in the same round
/// and the history lists them next to each other.
pub struct Scanner {
  address: String,
  processed: HashSet<GroupId>,
  block: Option<Block>,
}

impl Scanner {
  pub fn new(address: impl Into<String>) -> Self {
    Self {
      address: address.into(),
      processed: HashSet::new(),
      block: None,
    }
  }

  pub async fn process<I: Indexer>(
    &mut self,
    calculator: &ImpactCalculator<I>,
    page: &[Transaction],
  ) -> Result<Vec<TradeLine>, impact_sdk::Error> {
    let mut lines = vec![];
    for txn in page {
      let (group_id, round) = match (&txn.group, txn.confirmed_round) {
        (Some(group_id), Some(round)) => (group_id, round),
        _ => continue,
      };

      if self.processed.contains(group_id) {
        continue;
      }

      let cached = self.block.clone().filter(|block| block.round == round);
      let is_cached = cached.is_some();
      let selector = GroupSelector::GroupId {
        group_id: group_id.clone(),
        round,
      };

      match calculator
        .group_balance_impact(&selector, cached, OPTIONS)
        .await?
      {
        Some(impact) => {
          if !is_cached {
            self.block = Some(impact.block.clone());
          }
          if let Some(line) =
            TradeLine::from_group(&self.address, &impact, txn.round_time)
          {
            lines.push(line);
          }
        }
        None => warn!("group {group_id} not found in round {round}"),
      }

      debug!("processed group {group_id}");
      self.processed.insert(group_id.clone());
    }
    Ok(lines)
  }
}

#[cfg(test)]
mod tests {
  use {
    super::{timestamp, Scanner, TradeLine},
    async_trait::async_trait,
    impact_indexer::{Error, Indexer, SearchQuery, TransactionPage},
    impact_primitives::{
      AssetId,
      AssetParams,
      AssetTransfer,
      Block,
      GroupId,
      Payment,
      Transaction,
      TxType,
    },
    impact_sdk::{GroupImpact, ImpactCalculator},
    std::sync::atomic::{AtomicUsize, Ordering},
  };

  const USDC: AssetId = 31566704;

  struct Blocks {
    blocks: Vec<Block>,
    unit_name: &'static str,
    block_lookups: AtomicUsize,
  }

  impl Blocks {
    fn new(blocks: Vec<Block>) -> Self {
      Self {
        blocks,
        unit_name: "USDC",
        block_lookups: AtomicUsize::new(0),
      }
    }
  }

  #[async_trait]
  impl Indexer for Blocks {
    async fn lookup_transaction(
      &self,
      _: &str,
    ) -> Result<Option<Transaction>, Error> {
      Ok(None)
    }

    async fn lookup_block(&self, round: u64) -> Result<Option<Block>, Error> {
      self.block_lookups.fetch_add(1, Ordering::SeqCst);
      Ok(self.blocks.iter().find(|b| b.round == round).cloned())
    }

    async fn lookup_asset(
      &self,
      _: AssetId,
    ) -> Result<Option<AssetParams>, Error> {
      Ok(Some(AssetParams {
        decimals: 6,
        unit_name: Some(self.unit_name.into()),
      }))
    }

    async fn search_transactions(
      &self,
      _: &SearchQuery,
    ) -> Result<TransactionPage, Error> {
      Ok(TransactionPage::default())
    }
  }

  fn member(
    id: &str,
    sender: &str,
    group: &GroupId,
    payment: Option<Payment>,
    transfer: Option<AssetTransfer>,
  ) -> Transaction {
    let tx_type = match payment {
      Some(_) => TxType::Pay,
      None => TxType::Axfer,
    };
    let mut tx = Transaction::new(sender, tx_type);
    tx.id = Some(id.into());
    tx.group = Some(group.clone());
    tx.confirmed_round = Some(500);
    tx.round_time = Some(1_700_000_000);
    tx.payment_transaction = payment;
    tx.asset_transfer_transaction = transfer;
    tx
  }

  /// TRADERACCOUNT buys 4 USDC for 20 ALGO from the pool, and a second
  /// group in the same round only moves ALGO.
  fn trading_block() -> (Block, GroupId, GroupId) {
    let trade = GroupId::from_bytes(vec![1; 32]);
    let plain = GroupId::from_bytes(vec![2; 32]);
    let block = Block::new(500, vec![
      member(
        "PAY1",
        "TRADERACCOUNT",
        &trade,
        Some(Payment {
          receiver: "POOL".into(),
          amount: 20_000_000,
          close_remainder_to: None,
          close_amount: None,
        }),
        None,
      ),
      member("XFER1", "POOL", &trade, None, Some(AssetTransfer {
        asset_id: USDC,
        amount: 4_000_000,
        receiver: "TRADERACCOUNT".into(),
        sender: None,
        close_to: None,
        close_amount: None,
      })),
      member(
        "PAY2",
        "TRADERACCOUNT",
        &plain,
        Some(Payment {
          receiver: "FRIEND".into(),
          amount: 1,
          close_remainder_to: None,
          close_amount: None,
        }),
        None,
      ),
    ]);
    (block, trade, plain)
  }

  #[tokio::test]
  async fn reports_each_trade_once() -> anyhow::Result<()> {
    let (block, _, _) = trading_block();
    let page = block.transactions.clone();
    let calculator = ImpactCalculator::new(Blocks::new(vec![block]));

    let mut scanner = Scanner::new("TRADERACCOUNT");
    let lines = scanner.process(&calculator, &page).await?;

    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert_eq!(line.rate, 5);
    assert_eq!(line.acct.as_deref(), Some("TRADERAC"));
    assert_eq!(line.tx_id.as_deref(), Some("PAY1"));
    assert_eq!(line.ts.as_deref(), Some("2023-11-14T22:13:20Z"));

    let json = serde_json::to_value(line)?;
    assert_eq!(json["ALGO"], -20.0);
    assert_eq!(json["USDC"], 4.0);
    assert_eq!(json["txId"], "PAY1");

    // both groups share round 500, so the block is fetched once
    assert_eq!(calculator.indexer().block_lookups.load(Ordering::SeqCst), 1);

    // the same page again yields nothing new
    let lines = scanner.process(&calculator, &page).await?;
    assert!(lines.is_empty());
    Ok(())
  }

  #[tokio::test]
  async fn only_the_latest_block_is_kept() -> anyhow::Result<()> {
    let (first, _, _) = trading_block();

    // the same trade again, as a new group one round later
    let again = GroupId::from_bytes(vec![3; 32]);
    let mut second = first.clone();
    second.round = 501;
    for tx in &mut second.transactions {
      tx.group = Some(again.clone());
      tx.confirmed_round = Some(501);
    }

    let page: Vec<_> = first
      .transactions
      .iter()
      .chain(&second.transactions)
      .cloned()
      .collect();
    let calculator = ImpactCalculator::new(Blocks::new(vec![first, second]));

    let mut scanner = Scanner::new("TRADERACCOUNT");
    let lines = scanner.process(&calculator, &page).await?;

    assert_eq!(lines.len(), 2);
    assert_eq!(calculator.indexer().block_lookups.load(Ordering::SeqCst), 2);
    assert_eq!(scanner.block.as_ref().map(|block| block.round), Some(501));
    Ok(())
  }

  #[tokio::test]
  async fn asset_keys_do_not_shadow_line_fields() -> anyhow::Result<()> {
    let (block, _, _) = trading_block();
    let page = block.transactions.clone();
    let calculator = ImpactCalculator::new(Blocks {
      unit_name: "rate",
      ..Blocks::new(vec![block])
    });

    let lines = Scanner::new("TRADERACCOUNT")
      .process(&calculator, &page)
      .await?;
    assert_eq!(lines[0].amounts.get("asset:rate"), Some(&4.0));

    let json = serde_json::to_value(&lines[0])?;
    assert_eq!(json["rate"], 5);
    assert_eq!(json["asset:rate"], 4.0);
    assert_eq!(json["ALGO"], -20.0);
    Ok(())
  }

  #[test]
  fn timestamps_are_rfc3339() {
    assert_eq!(timestamp(0).as_deref(), Some("1970-01-01T00:00:00Z"));
  }

  #[test]
  fn non_trades_are_skipped() {
    let (block, _, plain) = trading_block();
    let impact = GroupImpact {
      balance_impact: Default::default(),
      group: block.group(&plain).cloned().collect(),
      block,
    };
    assert!(TradeLine::from_group("TRADERACCOUNT", &impact, None).is_none());
  }
}
