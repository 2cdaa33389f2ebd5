use crate::domain::event::{AccountId, ACCOUNT_ID_LEN};
use crate::domain::ports::GateStateStore;
use crate::error::{GateError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for the two config scalars.
pub const CF_CONFIG: &str = "config";
/// Column Family for per-recipient last-payment timestamps.
pub const CF_RECIPIENTS: &str = "recipients";

const KEY_PAYMENT_AMOUNT: &[u8] = b"payment_amount";
const KEY_COOLDOWN_SECONDS: &[u8] = b"cooldown_seconds";

/// A durable gate state store backed by RocksDB.
///
/// Config scalars and recipient timestamps live in separate Column
/// Families. All integers are stored as 8-byte big-endian values;
/// recipient keys are the raw 20-byte identifiers, matching the ledger
/// namespace layout.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbGateStore {
    db: Arc<DB>,
}

impl RocksDbGateStore {
    /// Opens or creates a RocksDB instance at the specified path,
    /// ensuring both column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_config = ColumnFamilyDescriptor::new(CF_CONFIG, Options::default());
        let cf_recipients = ColumnFamilyDescriptor::new(CF_RECIPIENTS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_config, cf_recipients])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| GateError::Storage(format!("{name} column family not found")))
    }

    fn get_u64(&self, cf_name: &str, key: &[u8]) -> Result<Option<u64>> {
        let cf = self.cf(cf_name)?;
        match self.db.get_cf(cf, key)? {
            Some(bytes) => Ok(Some(decode_u64(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put_u64(&self, cf_name: &str, key: &[u8], value: u64) -> Result<()> {
        let cf = self.cf(cf_name)?;
        self.db.put_cf(cf, key, value.to_be_bytes())?;
        Ok(())
    }
}

fn decode_u64(bytes: &[u8]) -> Result<u64> {
    let bytes: [u8; 8] = bytes
        .try_into()
        .map_err(|_| GateError::Storage(format!("expected 8-byte value, got {}", bytes.len())))?;
    Ok(u64::from_be_bytes(bytes))
}

#[async_trait]
impl GateStateStore for RocksDbGateStore {
    async fn payment_amount(&self) -> Result<Option<u64>> {
        self.get_u64(CF_CONFIG, KEY_PAYMENT_AMOUNT)
    }

    async fn set_payment_amount(&self, drops: u64) -> Result<()> {
        self.put_u64(CF_CONFIG, KEY_PAYMENT_AMOUNT, drops)
    }

    async fn cooldown_seconds(&self) -> Result<Option<u64>> {
        self.get_u64(CF_CONFIG, KEY_COOLDOWN_SECONDS)
    }

    async fn set_cooldown_seconds(&self, seconds: u64) -> Result<()> {
        self.put_u64(CF_CONFIG, KEY_COOLDOWN_SECONDS, seconds)
    }

    async fn last_payment_time(&self, recipient: &AccountId) -> Result<Option<u64>> {
        self.get_u64(CF_RECIPIENTS, recipient.as_bytes())
    }

    async fn record_payment_time(&self, recipient: &AccountId, timestamp: u64) -> Result<()> {
        self.put_u64(CF_RECIPIENTS, recipient.as_bytes(), timestamp)
    }

    async fn recipients(&self) -> Result<Vec<(AccountId, u64)>> {
        let cf = self.cf(CF_RECIPIENTS)?;
        let mut all = Vec::new();
        let iter = self.db.iterator_cf(cf, rocksdb::IteratorMode::Start);

        for item in iter {
            let (key, value) =
                item.map_err(|e| GateError::Storage(format!("iteration error: {e}")))?;
            let recipient = AccountId::from_slice(&key).ok_or_else(|| {
                GateError::Storage(format!(
                    "expected {ACCOUNT_ID_LEN}-byte recipient key, got {}",
                    key.len()
                ))
            })?;
            all.push((recipient, decode_u64(&value)?));
        }

        // RocksDB iterates keys in order, so the report is already sorted.
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn account(byte: u8) -> AccountId {
        AccountId::new([byte; ACCOUNT_ID_LEN])
    }

    #[tokio::test]
    async fn test_open_creates_column_families() {
        let dir = tempdir().unwrap();
        let store = RocksDbGateStore::open(dir.path()).expect("failed to open RocksDB");

        assert!(store.db.cf_handle(CF_CONFIG).is_some());
        assert!(store.db.cf_handle(CF_RECIPIENTS).is_some());
    }

    #[tokio::test]
    async fn test_config_round_trip() {
        let dir = tempdir().unwrap();
        let store = RocksDbGateStore::open(dir.path()).unwrap();

        assert_eq!(store.payment_amount().await.unwrap(), None);
        assert_eq!(store.cooldown_seconds().await.unwrap(), None);

        store.set_payment_amount(500_000).await.unwrap();
        store.set_cooldown_seconds(10).await.unwrap();

        assert_eq!(store.payment_amount().await.unwrap(), Some(500_000));
        assert_eq!(store.cooldown_seconds().await.unwrap(), Some(10));
    }

    #[tokio::test]
    async fn test_recipient_timestamps_survive_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = RocksDbGateStore::open(dir.path()).unwrap();
            store.record_payment_time(&account(2), 100).await.unwrap();
        }

        let store = RocksDbGateStore::open(dir.path()).unwrap();
        assert_eq!(store.last_payment_time(&account(2)).await.unwrap(), Some(100));
        assert_eq!(store.last_payment_time(&account(3)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_recipients_iterates_in_key_order() {
        let dir = tempdir().unwrap();
        let store = RocksDbGateStore::open(dir.path()).unwrap();

        store.record_payment_time(&account(3), 30).await.unwrap();
        store.record_payment_time(&account(1), 10).await.unwrap();

        let all = store.recipients().await.unwrap();
        assert_eq!(all, vec![(account(1), 10), (account(3), 30)]);
    }
}
