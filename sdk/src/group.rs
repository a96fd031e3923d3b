use {
  crate::Error,
  impact_indexer::Indexer,
  impact_primitives::{Block, GroupId, Transaction},
  serde::Serialize,
  tracing::{debug, warn},
};

/// Members of an atomic group and the block that confirmed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupLookup {
  /// Group members in block order.
  pub group: Vec<Transaction>,
  pub block: Block,
}

/// Describes how to find an atomic group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupSelector {
  /// Any member's transaction id.
  TxnId(String),

  /// Any member, which must carry its group id and confirmed round.
  Txn(Transaction),

  /// The group id and the round it was confirmed in.
  GroupId { group_id: GroupId, round: u64 },
}

impl GroupSelector {
  /// Selects a group by its base64-encoded id.
  pub fn encoded(group_id: &str, round: u64) -> Result<Self, Error> {
    let group_id = group_id
      .parse()
      .map_err(|e| Error::InvalidGroupId(group_id.to_owned(), e))?;
    Ok(GroupSelector::GroupId { group_id, round })
  }
}

/// Collects all transactions of a group confirmed at `round`.
///
/// The block is fetched from the indexer unless one is supplied.
/// Returns `None` when the indexer has no block for that round. A
/// block without members of the group yields an empty group.
pub async fn lookup_group_by_id(
  indexer: &impl Indexer,
  group_id: &GroupId,
  round: u64,
  block: Option<Block>,
) -> Result<Option<GroupLookup>, Error> {
  let block = match block {
    Some(block) => {
      if block.round != round {
        warn!(
          "supplied block is for round {} while group {group_id} was \
           requested at round {round}",
          block.round
        );
      }
      block
    }
    None => match indexer.lookup_block(round).await? {
      Some(block) => block,
      None => {
        debug!("round {round} not found");
        return Ok(None);
      }
    },
  };

  let group: Vec<_> = block.group(group_id).cloned().collect();
  debug!(
    "group {group_id} has {} members in round {round}",
    group.len()
  );
  Ok(Some(GroupLookup { group, block }))
}

/// Collects the group the given transaction belongs to.
///
/// Returns `None` for transactions that are not part of a group or
/// don't carry the round they were confirmed in.
pub async fn lookup_group_by_txn(
  indexer: &impl Indexer,
  txn: &Transaction,
  block: Option<Block>,
) -> Result<Option<GroupLookup>, Error> {
  match (&txn.group, txn.confirmed_round) {
    (Some(group_id), Some(round)) => {
      lookup_group_by_id(indexer, group_id, round, block).await
    }
    _ => {
      debug!("transaction {:?} is not a confirmed group member", txn.id);
      Ok(None)
    }
  }
}

/// Collects the group of the transaction with the given id.
///
/// When a block is supplied the transaction is searched for in that
/// block only, otherwise it is looked up through the indexer.
pub async fn lookup_group_by_txn_id(
  indexer: &impl Indexer,
  txn_id: &str,
  block: Option<Block>,
) -> Result<Option<GroupLookup>, Error> {
  let txn = match &block {
    Some(block) => block.transaction(txn_id).cloned(),
    None => indexer.lookup_transaction(txn_id).await?,
  };

  match txn {
    Some(txn) => lookup_group_by_txn(indexer, &txn, block).await,
    None => {
      debug!("transaction {txn_id} not found");
      Ok(None)
    }
  }
}

/// Resolves any [`GroupSelector`] to the group it designates.
pub async fn lookup_group(
  indexer: &impl Indexer,
  selector: &GroupSelector,
  block: Option<Block>,
) -> Result<Option<GroupLookup>, Error> {
  match selector {
    GroupSelector::TxnId(id) => {
      lookup_group_by_txn_id(indexer, id, block).await
    }
    GroupSelector::Txn(txn) => lookup_group_by_txn(indexer, txn, block).await,
    GroupSelector::GroupId { group_id, round } => {
      lookup_group_by_id(indexer, group_id, *round, block).await
    }
  }
}

#[cfg(test)]
mod tests {
  use {super::GroupSelector, crate::Error};

  #[test]
  fn encoded_selector() -> anyhow::Result<()> {
    match GroupSelector::encoded("AQID", 12)? {
      GroupSelector::GroupId { group_id, round } => {
        assert_eq!(group_id.as_bytes(), &[1, 2, 3]);
        assert_eq!(round, 12);
      }
      other => panic!("unexpected selector {other:?}"),
    }

    assert!(matches!(
      GroupSelector::encoded("%%%", 12),
      Err(Error::InvalidGroupId(..))
    ));
    Ok(())
  }
}
