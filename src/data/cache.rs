use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use alloy::primitives::{Address, U256};
use lru::LruCache;

/// Content identifiers are written once per contract, long TTL.
const DATA_HASH_TTL: Duration = Duration::from_secs(3600);
/// Balances move with every transfer, short TTL.
const BALANCE_TTL: Duration = Duration::from_secs(30);

const DATA_HASH_CACHE_SIZE: usize = 200;

pub struct DataCache {
    data_hashes: LruCache<Address, (Instant, String)>,
    balances: Option<(Instant, (U256, U256))>,
}

impl DataCache {
    pub fn new() -> Self {
        Self {
            data_hashes: LruCache::new(NonZeroUsize::new(DATA_HASH_CACHE_SIZE).unwrap()),
            balances: None,
        }
    }

    /// Cached content identifier for a work contract, unless expired.
    pub fn get_data_hash(&mut self, contract: &Address) -> Option<String> {
        let entry = self.data_hashes.get(contract)?;
        if entry.0.elapsed() < DATA_HASH_TTL {
            Some(entry.1.clone())
        } else {
            self.data_hashes.pop(contract);
            None
        }
    }

    pub fn put_data_hash(&mut self, contract: Address, hash: String) {
        self.data_hashes.put(contract, (Instant::now(), hash));
    }

    /// Cached (eth, onx) balance pair for the active account.
    pub fn get_balances(&self) -> Option<(U256, U256)> {
        let (at, pair) = self.balances.as_ref()?;
        if at.elapsed() < BALANCE_TTL {
            Some(*pair)
        } else {
            None
        }
    }

    pub fn put_balances(&mut self, eth: U256, onx: U256) {
        self.balances = Some((Instant::now(), (eth, onx)));
    }
}

impl Default for DataCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_hash_round_trip() {
        let mut cache = DataCache::new();
        let addr = Address::from_slice(&[0x11; 20]);
        assert!(cache.get_data_hash(&addr).is_none());
        cache.put_data_hash(addr, "Qmabc".to_string());
        assert_eq!(cache.get_data_hash(&addr), Some("Qmabc".to_string()));
    }

    #[test]
    fn test_balances_round_trip() {
        let mut cache = DataCache::new();
        assert!(cache.get_balances().is_none());
        cache.put_balances(U256::from(1u64), U256::from(2u64));
        assert_eq!(
            cache.get_balances(),
            Some((U256::from(1u64), U256::from(2u64)))
        );
    }
}
