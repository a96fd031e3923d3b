use base64::{engine::general_purpose::STANDARD, Engine as _};

pub trait ToBase64String {
  fn to_b64(&self) -> String;
}

impl ToBase64String for &[u8] {
  fn to_b64(&self) -> String {
    STANDARD.encode(self)
  }
}

pub(crate) fn decode(value: &str) -> Result<Vec<u8>, base64::DecodeError> {
  STANDARD.decode(value)
}
