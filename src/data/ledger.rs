use std::collections::{BTreeMap, HashSet};

use crate::data::types::{EventId, WorkRecord};

/// Ordered, deduplicated log of factory events.
///
/// Records are keyed for identity by (tx hash, log index) and ordered by
/// (block number, log index), so merging the same log twice is a no-op and
/// snapshots come out in a stable chain order regardless of whether a record
/// arrived via historical backfill or a live subscription. The ledger is only
/// mutated on successfully decoded logs; a failed fetch leaves it untouched.
#[derive(Default)]
pub struct EventLedger {
    by_position: BTreeMap<(u64, u64), WorkRecord>,
    seen: HashSet<EventId>,
}

impl EventLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a single record. Returns false if it was already present.
    pub fn merge(&mut self, record: WorkRecord) -> bool {
        if !self.seen.insert(record.id()) {
            return false;
        }
        self.by_position
            .insert((record.block_number, record.log_index), record);
        true
    }

    /// Merge a batch of records, returning how many were new.
    pub fn merge_batch(&mut self, records: Vec<WorkRecord>) -> usize {
        records.into_iter().filter(|r| self.merge(r.clone())).count()
    }

    /// Complete snapshot, most-recent-first (reverse chain order).
    pub fn snapshot(&self) -> Vec<WorkRecord> {
        self.by_position.values().rev().cloned().collect()
    }

    /// Highest block number seen so far; used to bound backfill queries.
    pub fn last_block(&self) -> Option<u64> {
        self.by_position.keys().next_back().map(|(block, _)| *block)
    }

    pub fn len(&self) -> usize {
        self.by_position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_position.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{Address, B256, U256};

    use super::*;

    fn record(block: u64, log_index: u64, tx_byte: u8) -> WorkRecord {
        WorkRecord {
            contract: Address::ZERO,
            name: [0u8; 32],
            requester: Address::ZERO,
            validator: Address::ZERO,
            deadline: 0,
            value: U256::ZERO,
            block_number: block,
            tx_hash: B256::from_slice(&[tx_byte; 32]),
            log_index,
        }
    }

    #[test]
    fn test_merge_dedups_by_identity() {
        let mut ledger = EventLedger::new();
        assert!(ledger.merge(record(10, 0, 1)));
        assert!(!ledger.merge(record(10, 0, 1)));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_merge_batch_counts_new_only() {
        let mut ledger = EventLedger::new();
        ledger.merge(record(10, 0, 1));
        let added = ledger.merge_batch(vec![record(10, 0, 1), record(11, 0, 2)]);
        assert_eq!(added, 1);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_snapshot_is_reverse_chain_order() {
        let mut ledger = EventLedger::new();
        // Inserted out of order on purpose
        ledger.merge(record(12, 0, 3));
        ledger.merge(record(10, 1, 1));
        ledger.merge(record(10, 0, 2));
        ledger.merge(record(11, 0, 4));

        let blocks: Vec<(u64, u64)> = ledger
            .snapshot()
            .iter()
            .map(|r| (r.block_number, r.log_index))
            .collect();
        assert_eq!(blocks, [(12, 0), (11, 0), (10, 1), (10, 0)]);
    }

    #[test]
    fn test_last_block() {
        let mut ledger = EventLedger::new();
        assert_eq!(ledger.last_block(), None);
        ledger.merge(record(10, 0, 1));
        ledger.merge(record(42, 0, 2));
        assert_eq!(ledger.last_block(), Some(42));
    }

    #[test]
    fn test_same_block_distinct_logs_kept() {
        let mut ledger = EventLedger::new();
        ledger.merge(record(10, 0, 1));
        ledger.merge(record(10, 1, 1));
        assert_eq!(ledger.len(), 2);
    }
}
