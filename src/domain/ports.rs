use super::event::BenefitEvent;
use super::user_benefit::UserBenefit;
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Keyed by `(user_id, benefit_id)`; storing an existing key overwrites it.
#[async_trait]
pub trait UserBenefitStore: Send + Sync {
    async fn store(&self, record: UserBenefit) -> Result<()>;
    async fn get(&self, user_id: &str, benefit_id: &str) -> Result<Option<UserBenefit>>;
    async fn for_user(&self, user_id: &str) -> Result<Vec<UserBenefit>>;
    async fn get_all(&self) -> Result<Vec<UserBenefit>>;
}

#[async_trait]
pub trait EventLog: Send + Sync {
    async fn append(&self, event: BenefitEvent) -> Result<()>;
    /// Events of one user-benefit record, oldest first.
    async fn for_user_benefit(&self, user_benefit_id: Uuid) -> Result<Vec<BenefitEvent>>;
}

pub type UserBenefitStoreBox = Box<dyn UserBenefitStore>;
pub type EventLogBox = Box<dyn EventLog>;
