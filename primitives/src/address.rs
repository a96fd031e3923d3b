use {
  serde::{Deserialize, Serialize},
  std::{
    borrow::Borrow,
    fmt::{Debug, Display},
    ops::Deref,
  },
};

/// Represents the address of a ledger account.
///
/// Addresses are carried verbatim as the indexer reports them
/// (base32 text with an embedded checksum). They are never decoded
/// or validated here, only compared and used as map keys.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
  pub fn new(value: impl Into<String>) -> Self {
    Self(value.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl AsRef<str> for Address {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl Borrow<str> for Address {
  fn borrow(&self) -> &str {
    &self.0
  }
}

impl Deref for Address {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl Display for Address {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl Debug for Address {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "address({})", self.0)
  }
}

impl From<&str> for Address {
  fn from(value: &str) -> Self {
    Self(value.to_owned())
  }
}

impl From<String> for Address {
  fn from(value: String) -> Self {
    Self(value)
  }
}

impl From<Address> for String {
  fn from(addr: Address) -> Self {
    addr.0
  }
}
