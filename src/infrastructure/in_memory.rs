use crate::domain::event::BenefitEvent;
use crate::domain::ports::{EventLog, UserBenefitStore};
use crate::domain::user_benefit::UserBenefit;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

type RecordKey = (String, String);

/// A thread-safe in-memory store for user-benefit records.
///
/// Uses `Arc<RwLock<HashMap<(user, benefit), UserBenefit>>>` so clones share
/// the same map. Last write wins.
#[derive(Default, Clone)]
pub struct InMemoryUserBenefitStore {
    records: Arc<RwLock<HashMap<RecordKey, UserBenefit>>>,
}

impl InMemoryUserBenefitStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserBenefitStore for InMemoryUserBenefitStore {
    async fn store(&self, record: UserBenefit) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(
            (record.user_id.clone(), record.benefit_id.clone()),
            record,
        );
        Ok(())
    }

    async fn get(&self, user_id: &str, benefit_id: &str) -> Result<Option<UserBenefit>> {
        let records = self.records.read().await;
        Ok(records
            .get(&(user_id.to_string(), benefit_id.to_string()))
            .cloned())
    }

    async fn for_user(&self, user_id: &str) -> Result<Vec<UserBenefit>> {
        let records = self.records.read().await;
        let mut found: Vec<UserBenefit> = records
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.benefit_id.cmp(&b.benefit_id));
        Ok(found)
    }

    async fn get_all(&self) -> Result<Vec<UserBenefit>> {
        let records = self.records.read().await;
        let mut all: Vec<UserBenefit> = records.values().cloned().collect();
        all.sort_by(|a, b| {
            a.user_id
                .cmp(&b.user_id)
                .then_with(|| a.benefit_id.cmp(&b.benefit_id))
        });
        Ok(all)
    }
}

/// Append-only in-memory event log.
#[derive(Default, Clone)]
pub struct InMemoryEventLog {
    events: Arc<RwLock<Vec<BenefitEvent>>>,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventLog for InMemoryEventLog {
    async fn append(&self, event: BenefitEvent) -> Result<()> {
        self.events.write().await.push(event);
        Ok(())
    }

    async fn for_user_benefit(&self, user_benefit_id: Uuid) -> Result<Vec<BenefitEvent>> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|e| e.user_benefit_id == user_benefit_id)
            .cloned()
            .collect())
    }
}
