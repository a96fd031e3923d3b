mod address;
mod asset;
mod b64;
mod block;
mod group;
mod transaction;

pub use {
  address::Address,
  asset::{
    Asset,
    AssetId,
    AssetParams,
    NATIVE_ASSET_ID,
    NATIVE_DECIMALS,
    NATIVE_UNIT_NAME,
  },
  b64::ToBase64String,
  block::Block,
  group::GroupId,
  transaction::{AssetTransfer, Payment, Transaction, TxType},
};
