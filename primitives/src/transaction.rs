use {
  crate::{Address, AssetId, GroupId},
  serde::{Deserialize, Serialize},
};

/// Transaction type tag as reported by the indexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
  /// Native coin payment.
  Pay,
  /// Key registration.
  Keyreg,
  /// Asset configuration.
  Acfg,
  /// Asset transfer, opt-in, clawback or close-out.
  Axfer,
  /// Asset freeze.
  Afrz,
  /// Application call, the usual carrier of inner transactions.
  Appl,
  /// State proof.
  Stpf,
  /// Heartbeat.
  Hb,
  #[serde(other)]
  Unknown,
}

impl TxType {
  /// The tag as it appears on the wire and in indexer queries.
  pub fn as_str(&self) -> &'static str {
    match self {
      TxType::Pay => "pay",
      TxType::Keyreg => "keyreg",
      TxType::Acfg => "acfg",
      TxType::Axfer => "axfer",
      TxType::Afrz => "afrz",
      TxType::Appl => "appl",
      TxType::Stpf => "stpf",
      TxType::Hb => "hb",
      TxType::Unknown => "unknown",
    }
  }
}

/// Payload of a native coin payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Payment {
  pub receiver: Address,

  #[serde(default)]
  pub amount: u64,

  /// When set, the sender account is closed and everything left
  /// in it after the payment is swept to this account.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub close_remainder_to: Option<Address>,

  /// Amount actually swept to `close_remainder_to`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub close_amount: Option<u64>,
}

/// Payload of an asset transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AssetTransfer {
  pub asset_id: AssetId,

  #[serde(default)]
  pub amount: u64,

  pub receiver: Address,

  /// Only present in clawback transactions. Names the account the
  /// asset is revoked from, the outer sender is then the clawback
  /// authority and its asset balance is not touched.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sender: Option<Address>,

  /// When set, the sender opts out of the asset and its remaining
  /// holding is moved to this account.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub close_to: Option<Address>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub close_amount: Option<u64>,
}

/// A confirmed transaction as returned by the indexer.
///
/// Inner transactions issued by application calls have the same
/// shape and are nested recursively under `inner_txns`. They carry
/// no `id` of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Transaction {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,

  pub sender: Address,

  pub tx_type: TxType,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub fee: Option<u64>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub group: Option<GroupId>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub confirmed_round: Option<u64>,

  /// Unix timestamp (seconds) of the confirming block.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub round_time: Option<u64>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub payment_transaction: Option<Payment>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub asset_transfer_transaction: Option<AssetTransfer>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub inner_txns: Vec<Transaction>,
}

impl Transaction {
  /// Creates a transaction of the given type with no payload,
  /// fee, group or inner transactions.
  pub fn new(sender: impl Into<Address>, tx_type: TxType) -> Self {
    Self {
      id: None,
      sender: sender.into(),
      tx_type,
      fee: None,
      group: None,
      confirmed_round: None,
      round_time: None,
      payment_transaction: None,
      asset_transfer_transaction: None,
      inner_txns: vec![],
    }
  }

  /// True if this transaction is a member of the given atomic group.
  pub fn belongs_to(&self, group: &GroupId) -> bool {
    self.group.as_ref() == Some(group)
  }

  /// True for payments and asset transfers, the two transaction
  /// types that move value between accounts directly.
  pub fn is_transfer(&self) -> bool {
    matches!(self.tx_type, TxType::Pay | TxType::Axfer)
  }
}
