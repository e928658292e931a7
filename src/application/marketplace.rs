use crate::domain::catalog::{BenefitCategory, Catalog, CatalogEntry, CatalogStatus};
use crate::domain::event::{BenefitEvent, BenefitEventType};
use crate::domain::formula::CostBreakdown;
use crate::domain::money::{Money, Price};
use crate::domain::ports::{EventLogBox, UserBenefitStoreBox};
use crate::domain::user_benefit::{BenefitStatus, UserBenefit};
use crate::error::{BenefitsError, Result};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveBenefitsSummary {
    pub active_benefits: Vec<UserBenefit>,
    pub total_savings: Money,
    pub count: usize,
}

/// Entry point for every marketplace action a user can take.
///
/// `Marketplace` owns the catalog and the storage backends. Each operation
/// reads the current record, applies the status change on the domain type and
/// writes the record back before appending the matching event.
pub struct Marketplace {
    catalog: Catalog,
    records: UserBenefitStoreBox,
    events: EventLogBox,
}

impl Marketplace {
    /// Creates a new `Marketplace`.
    ///
    /// # Arguments
    ///
    /// * `catalog` - The benefits on offer.
    /// * `records` - The store for user-benefit records.
    /// * `events` - The append-only event log.
    pub fn new(catalog: Catalog, records: UserBenefitStoreBox, events: EventLogBox) -> Self {
        Self {
            catalog,
            records,
            events,
        }
    }

    pub fn catalog(&self) -> &[CatalogEntry] {
        self.catalog.entries()
    }

    /// Marks every benefit whose catalog status is ACTIVE as active for
    /// `user_id`. Existing records are left untouched.
    pub async fn seed_active_benefits(&self, user_id: &str) -> Result<usize> {
        let mut seeded = 0;
        for entry in self
            .catalog
            .entries()
            .iter()
            .filter(|e| e.status == CatalogStatus::Active)
        {
            if self.records.get(user_id, &entry.id).await?.is_some() {
                continue;
            }
            let mut record = UserBenefit::new(user_id, entry.id.clone());
            record.status = BenefitStatus::Active;
            // Pre-enrolled benefits count their whole value as savings.
            match entry.fixed_value {
                Some(value) => {
                    let costs = CostBreakdown::from_fixed_value(value);
                    record.gross_cost = Some(costs.gross_cost);
                    record.net_cost = Some(costs.net_cost);
                    record.savings = Some(value.round_cents());
                }
                None => record.savings = Some(Money::ZERO),
            }
            self.records.store(record).await?;
            seeded += 1;
        }
        info!(user_id, seeded, "seeded active catalog benefits");
        Ok(seeded)
    }

    /// The user's record for `benefit_id`, or `None` if it was never requested.
    pub async fn user_benefit(&self, user_id: &str, benefit_id: &str) -> Result<Option<UserBenefit>> {
        self.catalog.require(benefit_id)?;
        self.records.get(user_id, benefit_id).await
    }

    fn estimate_costs(entry: &CatalogEntry, vehicle_price: Option<Price>) -> Result<Option<CostBreakdown>> {
        if let (Some(formula), Some(price)) = (entry.formula(), vehicle_price) {
            return Ok(Some(formula?.apply(price)?));
        }
        match (entry.category, entry.fixed_value) {
            (BenefitCategory::Health, Some(value)) => Ok(Some(CostBreakdown::from_fixed_value(value))),
            _ => Ok(None),
        }
    }

    /// AVAILABLE -> REQUESTED. Creates the record on first request.
    pub async fn request(
        &self,
        user_id: &str,
        benefit_id: &str,
        vehicle_price: Option<Price>,
    ) -> Result<UserBenefit> {
        let entry = self.catalog.require(benefit_id)?;
        let mut record = self
            .records
            .get(user_id, benefit_id)
            .await?
            .unwrap_or_else(|| UserBenefit::new(user_id, benefit_id));

        if !record.status.can_transition_to(BenefitStatus::Requested) {
            warn!(user_id, benefit_id, status = %record.status, "request rejected");
            return Err(BenefitsError::AlreadyInStatus(record.status));
        }
        let costs = Self::estimate_costs(entry, vehicle_price)?;
        record.request(vehicle_price, costs)?;

        self.records.store(record.clone()).await?;
        self.events
            .append(BenefitEvent::new(
                benefit_id,
                record.id,
                BenefitEventType::Requested,
                json!({
                    "vehiclePrice": vehicle_price,
                    "grossCost": record.gross_cost,
                    "netCost": record.net_cost,
                    "savings": record.savings,
                }),
            ))
            .await?;

        info!(user_id, benefit_id, "benefit requested");
        Ok(record)
    }

    /// REQUESTED -> ACTIVE
    pub async fn activate(&self, user_id: &str, benefit_id: &str) -> Result<UserBenefit> {
        self.catalog.require(benefit_id)?;
        let mut record = self
            .records
            .get(user_id, benefit_id)
            .await?
            .ok_or(BenefitsError::NotRequested)?;

        let previous = record.status;
        if let Err(e) = record.activate() {
            warn!(user_id, benefit_id, status = %previous, "activation rejected");
            return Err(e);
        }

        self.records.store(record.clone()).await?;
        self.events
            .append(BenefitEvent::new(
                benefit_id,
                record.id,
                BenefitEventType::Activated,
                json!({ "previousStatus": previous, "savings": record.savings }),
            ))
            .await?;

        info!(user_id, benefit_id, "benefit activated");
        Ok(record)
    }

    /// REQUESTED/ACTIVE -> AVAILABLE
    pub async fn cancel(&self, user_id: &str, benefit_id: &str) -> Result<UserBenefit> {
        self.catalog.require(benefit_id)?;
        let mut record = self
            .records
            .get(user_id, benefit_id)
            .await?
            .ok_or(BenefitsError::NotRequested)?;

        let previous = record.status;
        if let Err(e) = record.cancel() {
            warn!(user_id, benefit_id, status = %previous, "cancellation rejected");
            return Err(e);
        }

        self.records.store(record.clone()).await?;
        self.events
            .append(BenefitEvent::new(
                benefit_id,
                record.id,
                BenefitEventType::Deactivated,
                json!({ "previousStatus": previous }),
            ))
            .await?;

        info!(user_id, benefit_id, previous = %previous, "benefit cancelled");
        Ok(record)
    }

    /// Leasing cost estimate for `benefit_id` without enrolling.
    pub fn simulate(&self, benefit_id: &str, vehicle_price: Price) -> Result<CostBreakdown> {
        let entry = self.catalog.require(benefit_id)?;
        let formula = entry.formula().ok_or(BenefitsError::SimulationUnsupported)??;
        formula.apply(vehicle_price)
    }

    pub async fn active_summary(&self, user_id: &str) -> Result<ActiveBenefitsSummary> {
        let active_benefits: Vec<UserBenefit> = self
            .records
            .for_user(user_id)
            .await?
            .into_iter()
            .filter(|r| r.status == BenefitStatus::Active)
            .collect();
        let total_savings = active_benefits.iter().filter_map(|r| r.savings).sum();

        Ok(ActiveBenefitsSummary {
            count: active_benefits.len(),
            active_benefits,
            total_savings,
        })
    }

    /// Event history of the user's record for `benefit_id`, oldest first.
    pub async fn events(&self, user_id: &str, benefit_id: &str) -> Result<Vec<BenefitEvent>> {
        match self.user_benefit(user_id, benefit_id).await? {
            Some(record) => self.events.for_user_benefit(record.id).await,
            None => Ok(Vec::new()),
        }
    }

    /// Every stored record, ordered by user then benefit.
    pub async fn into_records(self) -> Result<Vec<UserBenefit>> {
        self.records.get_all().await
    }
}
