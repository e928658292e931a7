use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BenefitEventType {
    Requested,
    Activated,
    Deactivated,
}

/// Append-only audit entry for a user-benefit status change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitEvent {
    pub id: Uuid,
    pub benefit_id: String,
    pub user_benefit_id: Uuid,
    pub event_type: BenefitEventType,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub metadata: Value,
}

impl BenefitEvent {
    /// Event ids are UUIDv7 so their byte order follows creation time.
    pub fn new(
        benefit_id: impl Into<String>,
        user_benefit_id: Uuid,
        event_type: BenefitEventType,
        metadata: Value,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            benefit_id: benefit_id.into(),
            user_benefit_id,
            event_type,
            timestamp: Utc::now(),
            metadata,
        }
    }
}
