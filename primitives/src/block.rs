use {
  crate::{GroupId, Transaction},
  serde::{Deserialize, Serialize},
};

/// All transactions confirmed together at one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
  pub round: u64,

  /// Unix timestamp (seconds) of the block.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timestamp: Option<u64>,

  /// Empty rounds are served by the indexer without this field.
  #[serde(default)]
  pub transactions: Vec<Transaction>,
}

impl Block {
  pub fn new(round: u64, transactions: Vec<Transaction>) -> Self {
    Self {
      round,
      timestamp: None,
      transactions,
    }
  }

  /// Looks up a top-level transaction by its id.
  pub fn transaction(&self, id: &str) -> Option<&Transaction> {
    self
      .transactions
      .iter()
      .find(|tx| tx.id.as_deref() == Some(id))
  }

  /// Iterates over the members of an atomic group in block order.
  pub fn group<'a>(
    &'a self,
    id: &'a GroupId,
  ) -> impl Iterator<Item = &'a Transaction> + 'a {
    self.transactions.iter().filter(move |tx| tx.belongs_to(id))
  }
}
