use alloy::primitives::{Address, U256};
use alloy::rpc::types::{BlockNumberOrTag, Filter, Log};
use alloy::sol;
use alloy::sol_types::{SolCall, SolEvent};
use color_eyre::eyre::Result;

use crate::data::types::WorkRecord;

sol! {
    /// Factory event: a validator signed off a deployed work contract.
    /// Indexed on the engineer so the live filter can scope to one account.
    #[derive(Debug)]
    event Validated(
        address _contract,
        bytes32 _name,
        address _req,
        address _val,
        address indexed _eng,
        uint256 _deadline,
        uint256 value
    );

    /// Factory event: an engineer claimed a work contract. Indexed on the
    /// requester, the account that funded it.
    #[derive(Debug)]
    event Claimed(
        address _contract,
        bytes32 _name,
        address indexed _req,
        address _val,
        address _eng,
        uint256 _deadline,
        uint256 value
    );

    // ReqEngContract accessors
    function dataHash() external view returns (string);
    function submit() external;

    // OnyxToken (ERC-20 subset)
    function transfer(address _to, uint256 _value) external returns (bool);
    function balanceOf(address _owner) external view returns (uint256);
}

/// Filter for Validated events scoped to one engineer account.
pub fn validated_filter(factory: Address, engineer: Address, from_block: u64) -> Filter {
    Filter::new()
        .address(factory)
        .event_signature(Validated::SIGNATURE_HASH)
        .topic1(engineer.into_word())
        .from_block(from_block)
        .to_block(BlockNumberOrTag::Latest)
}

/// Filter for Claimed events scoped to one requester account.
pub fn claimed_filter(factory: Address, requester: Address, from_block: u64) -> Filter {
    Filter::new()
        .address(factory)
        .event_signature(Claimed::SIGNATURE_HASH)
        .topic1(requester.into_word())
        .from_block(from_block)
        .to_block(BlockNumberOrTag::Latest)
}

/// Live variant of the account-scoped filters, watching from the chain head.
pub fn live_filter(factory: Address, account: Address) -> Filter {
    Filter::new()
        .address(factory)
        .event_signature(vec![Validated::SIGNATURE_HASH, Claimed::SIGNATURE_HASH])
        .topic1(account.into_word())
        .from_block(BlockNumberOrTag::Latest)
}

/// Decode a raw log into a record if it is a Validated event. Logs still
/// pending (no block number yet) are skipped.
pub fn decode_validated(log: &Log) -> Option<WorkRecord> {
    let decoded = log.log_decode::<Validated>().ok()?;
    let data = decoded.inner.data;
    Some(WorkRecord {
        contract: data._contract,
        name: data._name.0,
        requester: data._req,
        validator: data._val,
        deadline: u64::try_from(data._deadline).unwrap_or(u64::MAX),
        value: data.value,
        block_number: log.block_number?,
        tx_hash: log.transaction_hash?,
        log_index: log.log_index?,
    })
}

/// Decode a raw log into a record if it is a Claimed event.
pub fn decode_claimed(log: &Log) -> Option<WorkRecord> {
    let decoded = log.log_decode::<Claimed>().ok()?;
    let data = decoded.inner.data;
    Some(WorkRecord {
        contract: data._contract,
        name: data._name.0,
        requester: data._req,
        validator: data._val,
        deadline: u64::try_from(data._deadline).unwrap_or(u64::MAX),
        value: data.value,
        block_number: log.block_number?,
        tx_hash: log.transaction_hash?,
        log_index: log.log_index?,
    })
}

// --- Calldata helpers ---

pub fn data_hash_calldata() -> Vec<u8> {
    dataHashCall {}.abi_encode()
}

pub fn decode_data_hash(ret: &[u8]) -> Result<String> {
    Ok(dataHashCall::abi_decode_returns(ret, true)?._0)
}

pub fn submit_calldata() -> Vec<u8> {
    submitCall {}.abi_encode()
}

pub fn transfer_calldata(to: Address, value: U256) -> Vec<u8> {
    transferCall { _to: to, _value: value }.abi_encode()
}

pub fn balance_of_calldata(owner: Address) -> Vec<u8> {
    balanceOfCall { _owner: owner }.abi_encode()
}

pub fn decode_balance_of(ret: &[u8]) -> Result<U256> {
    Ok(balanceOfCall::abi_decode_returns(ret, true)?._0)
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{FixedBytes, B256};

    use super::*;

    fn raw_log(data: alloy::primitives::LogData, address: Address) -> Log {
        Log {
            inner: alloy::primitives::Log { address, data },
            block_number: Some(960_123),
            transaction_hash: Some(B256::from_slice(&[0xab; 32])),
            log_index: Some(3),
            ..Default::default()
        }
    }

    #[test]
    fn test_decode_validated_round_trip() {
        let mut name = [0u8; 32];
        name[..4].copy_from_slice(b"task");
        let event = Validated {
            _contract: Address::from_slice(&[0x11; 20]),
            _name: FixedBytes(name),
            _req: Address::from_slice(&[0x22; 20]),
            _val: Address::from_slice(&[0x33; 20]),
            _eng: Address::from_slice(&[0x44; 20]),
            _deadline: U256::from(1700000000u64),
            value: U256::from(10u64).pow(U256::from(18u64)),
        };
        let log = raw_log(event.encode_log_data(), Address::from_slice(&[0xfa; 20]));

        let record = decode_validated(&log).expect("decodes");
        assert_eq!(record.contract, Address::from_slice(&[0x11; 20]));
        assert_eq!(record.decoded_name(), "task");
        assert_eq!(record.deadline, 1700000000);
        assert_eq!(record.block_number, 960_123);
        assert_eq!(record.log_index, 3);
    }

    #[test]
    fn test_decode_validated_rejects_claimed() {
        let event = Claimed {
            _contract: Address::ZERO,
            _name: FixedBytes([0u8; 32]),
            _req: Address::ZERO,
            _val: Address::ZERO,
            _eng: Address::ZERO,
            _deadline: U256::ZERO,
            value: U256::ZERO,
        };
        let log = raw_log(event.encode_log_data(), Address::ZERO);
        assert!(decode_validated(&log).is_none());
        assert!(decode_claimed(&log).is_some());
    }

    #[test]
    fn test_validated_filter_scopes_to_engineer() {
        let factory = Address::from_slice(&[0xfa; 20]);
        let engineer = Address::from_slice(&[0x44; 20]);
        let filter = validated_filter(factory, engineer, 960_000);
        assert_eq!(
            filter.topics[0],
            Validated::SIGNATURE_HASH.into()
        );
        assert_eq!(filter.topics[1], engineer.into_word().into());
    }
}
