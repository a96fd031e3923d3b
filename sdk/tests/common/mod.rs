#![allow(dead_code)]

use {
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
  std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
  },
};

pub const USDC: AssetId = 31566704;
pub const NOUNIT: AssetId = 777;

/// In-memory indexer that counts how often each lookup is issued.
#[derive(Default)]
pub struct MockIndexer {
  pub transactions: HashMap<String, Transaction>,
  pub blocks: HashMap<u64, Block>,
  pub assets: HashMap<AssetId, AssetParams>,
  pub unavailable: bool,

  pub transaction_lookups: AtomicUsize,
  pub block_lookups: AtomicUsize,
  pub asset_lookups: AtomicUsize,
}

impl MockIndexer {
  /// An indexer that knows USDC (6 decimals) and an asset without a
  /// unit name (2 decimals).
  pub fn with_assets() -> Self {
    let mut indexer = Self::default();
    indexer.assets.insert(USDC, AssetParams {
      decimals: 6,
      unit_name: Some("USDC".into()),
    });
    indexer.assets.insert(NOUNIT, AssetParams {
      decimals: 2,
      unit_name: None,
    });
    indexer
  }

  /// Registers a block and indexes all its transactions by id.
  pub fn add_block(&mut self, block: Block) {
    for tx in &block.transactions {
      if let Some(id) = &tx.id {
        self.transactions.insert(id.clone(), tx.clone());
      }
    }
    self.blocks.insert(block.round, block);
  }

  pub fn transaction_lookups(&self) -> usize {
    self.transaction_lookups.load(Ordering::SeqCst)
  }

  pub fn block_lookups(&self) -> usize {
    self.block_lookups.load(Ordering::SeqCst)
  }

  pub fn asset_lookups(&self) -> usize {
    self.asset_lookups.load(Ordering::SeqCst)
  }

  fn check_available(&self, url: &str) -> Result<(), Error> {
    match self.unavailable {
      true => Err(Error::Status {
        status: 503,
        url: url.to_owned(),
      }),
      false => Ok(()),
    }
  }
}

#[async_trait]
impl Indexer for MockIndexer {
  async fn lookup_transaction(
    &self,
    id: &str,
  ) -> Result<Option<Transaction>, Error> {
    self.transaction_lookups.fetch_add(1, Ordering::SeqCst);
    self.check_available("/v2/transactions")?;
    Ok(self.transactions.get(id).cloned())
  }

  async fn lookup_block(&self, round: u64) -> Result<Option<Block>, Error> {
    self.block_lookups.fetch_add(1, Ordering::SeqCst);
    self.check_available("/v2/blocks")?;
    Ok(self.blocks.get(&round).cloned())
  }

  async fn lookup_asset(
    &self,
    id: AssetId,
  ) -> Result<Option<AssetParams>, Error> {
    self.asset_lookups.fetch_add(1, Ordering::SeqCst);
    self.check_available("/v2/assets")?;
    Ok(self.assets.get(&id).cloned())
  }

  async fn search_transactions(
    &self,
    _: &SearchQuery,
  ) -> Result<TransactionPage, Error> {
    Ok(TransactionPage::default())
  }
}

pub fn pay(sender: &str, receiver: &str, amount: u64) -> Transaction {
  let mut tx = Transaction::new(sender, TxType::Pay);
  tx.payment_transaction = Some(Payment {
    receiver: receiver.into(),
    amount,
    close_remainder_to: None,
    close_amount: None,
  });
  tx
}

pub fn axfer(
  sender: &str,
  receiver: &str,
  asset: AssetId,
  amount: u64,
) -> Transaction {
  let mut tx = Transaction::new(sender, TxType::Axfer);
  tx.asset_transfer_transaction = Some(AssetTransfer {
    asset_id: asset,
    amount,
    receiver: receiver.into(),
    sender: None,
    close_to: None,
    close_amount: None,
  });
  tx
}

/// Marks a transaction as a confirmed group member.
pub fn confirmed(
  mut tx: Transaction,
  id: &str,
  group: Option<&GroupId>,
  round: u64,
) -> Transaction {
  tx.id = Some(id.into());
  tx.group = group.cloned();
  tx.confirmed_round = Some(round);
  tx
}

/// A swap of 5 ALGO for 10 USDC between ALICE and BOB, next to an
/// unrelated payment, confirmed at round 1000.
pub fn swap_block(group: &GroupId) -> Block {
  Block::new(1000, vec![
    confirmed(pay("CAROL", "DAVE", 1), "unrelated", None, 1000),
    confirmed(pay("ALICE", "BOB", 5_000_000), "leg-1", Some(group), 1000),
    confirmed(axfer("BOB", "ALICE", USDC, 10_000_000), "leg-2", Some(group), 1000),
  ])
}
