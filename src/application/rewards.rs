use crate::domain::rewards::{TotalRewardsSummary, calculate_total_rewards};
use crate::error::{BenefitsError, Result};
use crate::infrastructure::reference_data::ReferenceData;
use std::sync::Arc;
use tracing::debug;

/// Looks up profiles and compensation benefits and runs the rewards calculator.
#[derive(Clone)]
pub struct RewardsService {
    data: Arc<ReferenceData>,
}

impl RewardsService {
    pub fn new(data: Arc<ReferenceData>) -> Self {
        Self { data }
    }

    pub fn summary(&self, user_id: &str) -> Result<TotalRewardsSummary> {
        let profile = self
            .data
            .profile(user_id)
            .ok_or_else(|| BenefitsError::UserNotFound(user_id.to_string()))?;
        let benefits = self.data.active_compensation(user_id);
        debug!(user_id, benefits = benefits.len(), "calculating total rewards");
        Ok(calculate_total_rewards(profile, &benefits))
    }

    /// Summaries for every known user, in profile order.
    pub fn all_summaries(&self) -> Result<Vec<TotalRewardsSummary>> {
        self.data
            .profiles
            .iter()
            .map(|p| self.summary(&p.user_id))
            .collect()
    }
}
