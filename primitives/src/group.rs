use {
  crate::b64::{self, ToBase64String},
  serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer},
  std::{
    fmt::{Debug, Display},
    str::FromStr,
  },
};

/// Identifier shared by all transactions of one atomic group.
///
/// On the wire and at API boundaries the id travels as standard
/// base64 text, internally it is kept as the raw digest bytes so
/// that equality is a plain byte comparison.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(Vec<u8>);

impl GroupId {
  pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
    Self(bytes.into())
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.0
  }
}

impl AsRef<[u8]> for GroupId {
  fn as_ref(&self) -> &[u8] {
    &self.0
  }
}

impl Display for GroupId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_bytes().to_b64())
  }
}

impl Debug for GroupId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "group({})", self.as_bytes().to_b64())
  }
}

impl FromStr for GroupId {
  type Err = base64::DecodeError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    b64::decode(s).map(Self)
  }
}

impl TryFrom<&str> for GroupId {
  type Error = base64::DecodeError;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    FromStr::from_str(value)
  }
}

impl Serialize for GroupId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.as_bytes().to_b64())
  }
}

impl<'de> Deserialize<'de> for GroupId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let text = String::deserialize(deserializer)?;
    text.parse().map_err(D::Error::custom)
  }
}
