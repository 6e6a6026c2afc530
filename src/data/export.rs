use std::fs;

use serde::Serialize;

use crate::data::types::WorkRecord;

/// Flat, fully-expanded form of a record for export. Addresses and hashes
/// are written untruncated; amounts stay in wei so nothing is lossy.
#[derive(Serialize)]
struct ExportRecord {
    contract: String,
    name: String,
    requester: String,
    validator: String,
    deadline: u64,
    value_wei: String,
    block_number: u64,
    tx_hash: String,
    log_index: u64,
}

impl From<&WorkRecord> for ExportRecord {
    fn from(r: &WorkRecord) -> Self {
        Self {
            contract: format!("{:#x}", r.contract),
            name: r.decoded_name(),
            requester: format!("{:#x}", r.requester),
            validator: format!("{:#x}", r.validator),
            deadline: r.deadline,
            value_wei: r.value.to_string(),
            block_number: r.block_number,
            tx_hash: format!("{:#x}", r.tx_hash),
            log_index: r.log_index,
        }
    }
}

/// Export records to CSV.
pub fn export_records_csv(records: &[WorkRecord], path: &str) -> Result<String, String> {
    let file = fs::File::create(path).map_err(|e| format!("Failed to create file: {e}"))?;
    let mut wtr = csv::Writer::from_writer(file);

    for record in records {
        wtr.serialize(ExportRecord::from(record))
            .map_err(|e| format!("Failed to write CSV row: {e}"))?;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {e}"))?;
    Ok(format!("Exported {} records to {path}", records.len()))
}

/// Export records to pretty-printed JSON.
pub fn export_records_json(records: &[WorkRecord], path: &str) -> Result<String, String> {
    let out: Vec<ExportRecord> = records.iter().map(ExportRecord::from).collect();
    let json = serde_json::to_string_pretty(&out)
        .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
    fs::write(path, json).map_err(|e| format!("Failed to write file: {e}"))?;
    Ok(format!("Exported {} records to {path}", records.len()))
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{Address, B256, U256};

    use super::*;

    fn sample_records() -> Vec<WorkRecord> {
        let mut name = [0u8; 32];
        name[..7].copy_from_slice(b"widgets");
        vec![
            WorkRecord {
                contract: Address::from_slice(&[0x11; 20]),
                name,
                requester: Address::from_slice(&[0x22; 20]),
                validator: Address::from_slice(&[0x33; 20]),
                deadline: 1700000000,
                value: U256::from(10u64).pow(U256::from(18u64)),
                block_number: 960_100,
                tx_hash: B256::from_slice(&[0xaa; 32]),
                log_index: 0,
            },
            WorkRecord {
                contract: Address::from_slice(&[0x44; 20]),
                name: [0u8; 32],
                requester: Address::from_slice(&[0x55; 20]),
                validator: Address::from_slice(&[0x66; 20]),
                deadline: 1700000012,
                value: U256::from(5u64),
                block_number: 960_101,
                tx_hash: B256::from_slice(&[0xbb; 32]),
                log_index: 2,
            },
        ]
    }

    #[test]
    fn test_export_records_csv() {
        let records = sample_records();
        let path = "/tmp/onyx-tui-test-records.csv";
        let result = export_records_csv(&records, path);
        assert!(result.is_ok());

        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("contract"));
        assert!(contents.contains("widgets"));
        assert!(contents.contains("960100"));
        assert!(contents.contains("1000000000000000000"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_export_records_csv_empty() {
        let path = "/tmp/onyx-tui-test-records-empty.csv";
        let result = export_records_csv(&[], path);
        assert!(result.is_ok());
        assert!(result.unwrap().contains("0 records"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_export_records_json() {
        let records = sample_records();
        let path = "/tmp/onyx-tui-test-records.json";
        let result = export_records_json(&records, path);
        assert!(result.is_ok());

        let contents = fs::read_to_string(path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[0]["name"], "widgets");

        let _ = fs::remove_file(path);
    }
}
