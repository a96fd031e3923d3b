use serde::{Deserialize, Serialize};

/// Numeric identifier of a fungible asset on the ledger.
pub type AssetId = u64;

/// The native coin is addressed with this sentinel asset id.
/// Its parameters are fixed by the protocol and never looked up.
pub const NATIVE_ASSET_ID: AssetId = 0;

/// Number of decimal places of the native coin (1 ALGO = 10^6 microalgos).
pub const NATIVE_DECIMALS: u32 = 6;

pub const NATIVE_UNIT_NAME: &str = "ALGO";

/// Asset parameters as reported by the indexer.
///
/// Only the fields needed to present amounts to humans are decoded,
/// everything else in the indexer document is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AssetParams {
  #[serde(default)]
  pub decimals: u32,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub unit_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
  pub index: AssetId,
  pub params: AssetParams,
}
