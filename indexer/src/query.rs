use {
  impact_primitives::{Address, Transaction, TxType},
  serde::{Deserialize, Serialize},
};

/// Filters for a transaction history search.
///
/// Unset fields are not sent to the indexer. `next` carries the
/// continuation token of the previous page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
  pub address: Option<Address>,
  pub tx_type: Option<TxType>,
  pub min_round: Option<u64>,
  pub max_round: Option<u64>,
  pub limit: Option<u64>,
  pub next: Option<String>,
}

impl SearchQuery {
  pub fn for_address(address: impl Into<Address>) -> Self {
    Self {
      address: Some(address.into()),
      ..Default::default()
    }
  }

  pub fn tx_type(mut self, tx_type: TxType) -> Self {
    self.tx_type = Some(tx_type);
    self
  }

  pub fn min_round(mut self, round: u64) -> Self {
    self.min_round = Some(round);
    self
  }

  pub fn max_round(mut self, round: u64) -> Self {
    self.max_round = Some(round);
    self
  }

  pub fn limit(mut self, limit: u64) -> Self {
    self.limit = Some(limit);
    self
  }

  /// The same query positioned at the page following `token`.
  pub fn after(&self, token: impl Into<String>) -> Self {
    Self {
      next: Some(token.into()),
      ..self.clone()
    }
  }

  pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
    let mut params = vec![];
    if let Some(address) = &self.address {
      params.push(("address", address.to_string()));
    }
    if let Some(tx_type) = self.tx_type {
      params.push(("tx-type", tx_type.as_str().to_owned()));
    }
    if let Some(round) = self.min_round {
      params.push(("min-round", round.to_string()));
    }
    if let Some(round) = self.max_round {
      params.push(("max-round", round.to_string()));
    }
    if let Some(limit) = self.limit {
      params.push(("limit", limit.to_string()));
    }
    if let Some(next) = &self.next {
      params.push(("next", next.clone()));
    }
    params
  }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransactionPage {
  #[serde(default)]
  pub transactions: Vec<Transaction>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub next_token: Option<String>,
}
