use alloy::primitives::{Address, B256, U256};

use crate::utils;

/// Maximum visible characters for an address or name cell.
const LABEL_MAX: usize = 20;
/// Decoded names longer than this get shortened to LABEL_MAX.
const NAME_LIMIT: usize = 23;

/// Unique identity of an on-chain log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventId {
    pub tx_hash: B256,
    pub log_index: u64,
}

/// A decoded factory event. Immutable once read from the chain.
#[derive(Debug, Clone)]
pub struct WorkRecord {
    pub contract: Address,
    /// Raw zero-padded name word as emitted.
    pub name: [u8; 32],
    pub requester: Address,
    pub validator: Address,
    /// Seconds since epoch.
    pub deadline: u64,
    /// Smallest currency unit (wei).
    pub value: U256,
    pub block_number: u64,
    pub tx_hash: B256,
    pub log_index: u64,
}

impl WorkRecord {
    pub fn id(&self) -> EventId {
        EventId {
            tx_hash: self.tx_hash,
            log_index: self.log_index,
        }
    }

    pub fn decoded_name(&self) -> String {
        utils::decode_name(&self.name)
    }
}

/// One labeled field of a display row.
pub type LabeledField = (&'static str, String);

/// A derived, ephemeral table row: a title/value header pair plus the
/// labeled fields shown beneath it. Rebuilt wholesale on every refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub headers: [String; 2],
    pub vals: Vec<LabeledField>,
}

/// Transform records into display rows, one per record, order preserved.
pub fn build_display_rows(records: &[WorkRecord]) -> Vec<DisplayRow> {
    records.iter().map(build_display_row).collect()
}

fn build_display_row(record: &WorkRecord) -> DisplayRow {
    let contract = utils::truncate_label(&format!("{}", record.contract), LABEL_MAX);
    let requester = utils::truncate_label(&format!("{}", record.requester), LABEL_MAX);
    let validator = utils::truncate_label(&format!("{}", record.validator), LABEL_MAX);

    let mut name = record.decoded_name();
    if name.chars().count() > NAME_LIMIT {
        name = utils::truncate_label(&name, LABEL_MAX);
    }

    let value = format!("{} ETH", utils::format_ether(record.value));
    let deadline = utils::format_deadline(record.deadline);

    DisplayRow {
        headers: [name, value.clone()],
        vals: vec![
            ("contract", contract),
            ("requester", requester),
            ("validator", validator),
            ("deadline", deadline),
            ("value", value),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, value_wei: u128) -> WorkRecord {
        let mut raw = [0u8; 32];
        raw[..name.len()].copy_from_slice(name.as_bytes());
        WorkRecord {
            contract: Address::from_slice(&[0x11; 20]),
            name: raw,
            requester: Address::from_slice(&[0x22; 20]),
            validator: Address::from_slice(&[0x33; 20]),
            deadline: 1700000000,
            value: U256::from(value_wei),
            block_number: 960_001,
            tx_hash: B256::ZERO,
            log_index: 0,
        }
    }

    #[test]
    fn test_one_row_per_record_in_order() {
        let records = vec![record("first", 1), record("second", 2), record("third", 3)];
        let rows = build_display_rows(&records);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].headers[0], "first");
        assert_eq!(rows[1].headers[0], "second");
        assert_eq!(rows[2].headers[0], "third");
    }

    #[test]
    fn test_addresses_truncated_to_twenty_plus_ellipsis() {
        let rows = build_display_rows(&[record("job", 0)]);
        let (label, contract) = &rows[0].vals[0];
        assert_eq!(*label, "contract");
        assert_eq!(contract.len(), 23);
        assert!(contract.ends_with("..."));
        assert!(contract.starts_with("0x"));
    }

    #[test]
    fn test_value_header_exact_ether_string() {
        let rows = build_display_rows(&[record("job", 1_000_000_000_000_000_000)]);
        assert_eq!(rows[0].headers[1], "1 ETH");
        assert_eq!(rows[0].vals[4], ("value", "1 ETH".to_string()));
    }

    #[test]
    fn test_deadline_formatted() {
        let rows = build_display_rows(&[record("job", 0)]);
        assert_eq!(rows[0].vals[3], ("deadline", "11/14/2023 10:13:20 PM".to_string()));
    }

    #[test]
    fn test_name_within_limit_untouched() {
        // 23 chars: at the limit, left alone
        let name = "a".repeat(23);
        let rows = build_display_rows(&[record(&name, 0)]);
        assert_eq!(rows[0].headers[0], name);
    }

    #[test]
    fn test_name_over_limit_truncated() {
        let name = "b".repeat(24);
        let rows = build_display_rows(&[record(&name, 0)]);
        assert_eq!(rows[0].headers[0], format!("{}...", "b".repeat(20)));
    }

    #[test]
    fn test_field_order() {
        let rows = build_display_rows(&[record("job", 0)]);
        let labels: Vec<&str> = rows[0].vals.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["contract", "requester", "validator", "deadline", "value"]);
    }
}
