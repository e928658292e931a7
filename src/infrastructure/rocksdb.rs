use crate::domain::event::BenefitEvent;
use crate::domain::ports::{EventLog, UserBenefitStore};
use crate::domain::user_benefit::UserBenefit;
use crate::error::{BenefitsError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Direction, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Column Family for user-benefit records, keyed `len(user) ++ user ++ benefit`
/// with a big-endian `u32` length.
pub const CF_USER_BENEFITS: &str = "user_benefits";
/// Column Family for the event log, keyed `user_benefit_id ++ event_id`.
pub const CF_EVENTS: &str = "events";

/// A persistent store implementation using RocksDB.
///
/// Holds both user-benefit records and the event log in separate Column
/// Families. Values are JSON. `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at `path`, creating the column
    /// families on first use.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_records = ColumnFamilyDescriptor::new(CF_USER_BENEFITS, Options::default());
        let cf_events = ColumnFamilyDescriptor::new(CF_EVENTS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_records, cf_events])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            BenefitsError::InternalError(Box::new(std::io::Error::other(format!(
                "{name} column family not found"
            ))))
        })
    }

    /// Values stored under keys starting with `prefix`, in key order.
    fn scan_prefix<T: serde::de::DeserializeOwned>(
        &self,
        cf_name: &str,
        prefix: &[u8],
    ) -> Result<Vec<T>> {
        let cf = self.cf(cf_name)?;
        let mut out = Vec::new();
        for item in self
            .db
            .iterator_cf(cf, IteratorMode::From(prefix, Direction::Forward))
        {
            let (key, value) = item?;
            if !key.starts_with(prefix) {
                break;
            }
            out.push(serde_json::from_slice(&value)?);
        }
        Ok(out)
    }
}

fn record_key(user_id: &str, benefit_id: &str) -> Vec<u8> {
    let mut key = user_prefix(user_id);
    key.extend_from_slice(benefit_id.as_bytes());
    key
}

fn user_prefix(user_id: &str) -> Vec<u8> {
    let user = user_id.as_bytes();
    let mut key = Vec::with_capacity(user.len() + 4);
    key.extend_from_slice(&(user.len() as u32).to_be_bytes());
    key.extend_from_slice(user);
    key
}

fn event_key(event: &BenefitEvent) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(event.user_benefit_id.as_bytes());
    key.extend_from_slice(event.id.as_bytes());
    key
}

#[async_trait]
impl UserBenefitStore for RocksDBStore {
    async fn store(&self, record: UserBenefit) -> Result<()> {
        let cf = self.cf(CF_USER_BENEFITS)?;
        let key = record_key(&record.user_id, &record.benefit_id);
        let value = serde_json::to_vec(&record)?;
        self.db.put_cf(cf, key, value)?;
        Ok(())
    }

    async fn get(&self, user_id: &str, benefit_id: &str) -> Result<Option<UserBenefit>> {
        let cf = self.cf(CF_USER_BENEFITS)?;
        match self.db.get_cf(cf, record_key(user_id, benefit_id))? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn for_user(&self, user_id: &str) -> Result<Vec<UserBenefit>> {
        self.scan_prefix(CF_USER_BENEFITS, &user_prefix(user_id))
    }

    async fn get_all(&self) -> Result<Vec<UserBenefit>> {
        // Keys sort by user length first.
        let mut all: Vec<UserBenefit> = self.scan_prefix(CF_USER_BENEFITS, &[])?;
        all.sort_by(|a, b| {
            a.user_id
                .cmp(&b.user_id)
                .then_with(|| a.benefit_id.cmp(&b.benefit_id))
        });
        Ok(all)
    }
}

#[async_trait]
impl EventLog for RocksDBStore {
    async fn append(&self, event: BenefitEvent) -> Result<()> {
        let cf = self.cf(CF_EVENTS)?;
        let value = serde_json::to_vec(&event)?;
        self.db.put_cf(cf, event_key(&event), value)?;
        Ok(())
    }

    async fn for_user_benefit(&self, user_benefit_id: Uuid) -> Result<Vec<BenefitEvent>> {
        self.scan_prefix(CF_EVENTS, user_benefit_id.as_bytes())
    }
}
