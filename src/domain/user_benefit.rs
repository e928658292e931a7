use super::formula::CostBreakdown;
use super::money::{Money, Price};
use crate::error::BenefitsError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BenefitStatus {
    #[default]
    Available,
    Requested,
    Active,
}

impl BenefitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Requested => "REQUESTED",
            Self::Active => "ACTIVE",
        }
    }

    /// Allowed moves: AVAILABLE -> REQUESTED -> ACTIVE, and REQUESTED/ACTIVE
    /// back to AVAILABLE on cancel.
    pub fn can_transition_to(self, next: BenefitStatus) -> bool {
        use BenefitStatus::*;
        matches!(
            (self, next),
            (Available, Requested) | (Requested, Active) | (Requested, Available) | (Active, Available)
        )
    }
}

impl fmt::Display for BenefitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's enrollment in one catalog benefit.
///
/// Created on the first request and never deleted; cancelling resets it to
/// `Available` so a later request reuses the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBenefit {
    pub id: Uuid,
    pub benefit_id: String,
    pub user_id: String,
    pub status: BenefitStatus,
    pub vehicle_price: Option<Price>,
    pub gross_cost: Option<Money>,
    pub net_cost: Option<Money>,
    pub savings: Option<Money>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserBenefit {
    pub fn new(user_id: impl Into<String>, benefit_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            benefit_id: benefit_id.into(),
            user_id: user_id.into(),
            status: BenefitStatus::Available,
            vehicle_price: None,
            gross_cost: None,
            net_cost: None,
            savings: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn set_costs(&mut self, costs: Option<CostBreakdown>) {
        self.gross_cost = costs.map(|c| c.gross_cost);
        self.net_cost = costs.map(|c| c.net_cost);
        self.savings = costs.map(|c| c.savings);
    }

    fn move_to(&mut self, next: BenefitStatus) {
        self.status = next;
        self.updated_at = Utc::now();
    }

    /// AVAILABLE -> REQUESTED, recording the simulated costs.
    pub fn request(
        &mut self,
        vehicle_price: Option<Price>,
        costs: Option<CostBreakdown>,
    ) -> Result<(), BenefitsError> {
        if !self.status.can_transition_to(BenefitStatus::Requested) {
            return Err(BenefitsError::AlreadyInStatus(self.status));
        }
        if vehicle_price.is_some() {
            self.vehicle_price = vehicle_price;
        }
        if costs.is_some() {
            self.set_costs(costs);
        }
        self.move_to(BenefitStatus::Requested);
        Ok(())
    }

    /// REQUESTED -> ACTIVE
    pub fn activate(&mut self) -> Result<(), BenefitsError> {
        match self.status {
            BenefitStatus::Requested => {
                self.move_to(BenefitStatus::Active);
                Ok(())
            }
            BenefitStatus::Active => Err(BenefitsError::AlreadyInStatus(BenefitStatus::Active)),
            BenefitStatus::Available => Err(BenefitsError::InvalidTransition {
                action: "activate",
                expected: "REQUESTED",
            }),
        }
    }

    /// REQUESTED/ACTIVE -> AVAILABLE, dropping the price and computed costs.
    pub fn cancel(&mut self) -> Result<(), BenefitsError> {
        if !self.status.can_transition_to(BenefitStatus::Available) {
            return Err(BenefitsError::InvalidTransition {
                action: "cancel",
                expected: "REQUESTED or ACTIVE",
            });
        }
        self.vehicle_price = None;
        self.set_costs(None);
        self.move_to(BenefitStatus::Available);
        Ok(())
    }
}
