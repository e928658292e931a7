use super::AppState;
use crate::application::marketplace::ActiveBenefitsSummary;
use crate::domain::catalog::CatalogEntry;
use crate::domain::event::BenefitEvent;
use crate::domain::formula::CostBreakdown;
use crate::domain::money::{Money, Price};
use crate::domain::rewards::TotalRewardsSummary;
use crate::domain::user_benefit::{BenefitStatus, UserBenefit};
use crate::error::{BenefitsError, Result};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: Option<String>,
}

impl UserQuery {
    fn resolve<'a>(&'a self, state: &'a AppState) -> &'a str {
        self.user_id.as_deref().unwrap_or(&*state.demo_user)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePriceBody {
    pub vehicle_price: Option<Money>,
}

impl VehiclePriceBody {
    fn price(&self) -> Result<Option<Price>> {
        self.vehicle_price.map(Price::try_from).transpose()
    }
}

/// What `GET /api/benefits/{id}` returns: the stored record, or a stub when
/// the user never requested the benefit.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BenefitView {
    Enrolled(UserBenefit),
    NotEnrolled { enrolled: bool, status: BenefitStatus },
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn catalog(State(state): State<AppState>) -> Json<Vec<CatalogEntry>> {
    Json(state.marketplace.catalog().to_vec())
}

pub async fn get_benefit(
    State(state): State<AppState>,
    Path(benefit_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<BenefitView>> {
    let view = match state
        .marketplace
        .user_benefit(query.resolve(&state), &benefit_id)
        .await?
    {
        Some(record) => BenefitView::Enrolled(record),
        None => BenefitView::NotEnrolled {
            enrolled: false,
            status: BenefitStatus::Available,
        },
    };
    Ok(Json(view))
}

pub async fn request_benefit(
    State(state): State<AppState>,
    Path(benefit_id): Path<String>,
    Query(query): Query<UserQuery>,
    body: std::result::Result<Json<VehiclePriceBody>, JsonRejection>,
) -> Result<Json<UserBenefit>> {
    let Json(body) = body?;
    let record = state
        .marketplace
        .request(query.resolve(&state), &benefit_id, body.price()?)
        .await?;
    Ok(Json(record))
}

pub async fn activate_benefit(
    State(state): State<AppState>,
    Path(benefit_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<UserBenefit>> {
    let record = state
        .marketplace
        .activate(query.resolve(&state), &benefit_id)
        .await?;
    Ok(Json(record))
}

pub async fn cancel_benefit(
    State(state): State<AppState>,
    Path(benefit_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<UserBenefit>> {
    let record = state
        .marketplace
        .cancel(query.resolve(&state), &benefit_id)
        .await?;
    Ok(Json(record))
}

pub async fn simulate_benefit(
    State(state): State<AppState>,
    Path(benefit_id): Path<String>,
    body: std::result::Result<Json<VehiclePriceBody>, JsonRejection>,
) -> Result<Json<CostBreakdown>> {
    let Json(body) = body?;
    let price = body.price()?.ok_or_else(|| {
        BenefitsError::ValidationError("vehiclePrice is required".to_string())
    })?;
    Ok(Json(state.marketplace.simulate(&benefit_id, price)?))
}

pub async fn benefit_events(
    State(state): State<AppState>,
    Path(benefit_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<BenefitEvent>>> {
    let events = state
        .marketplace
        .events(query.resolve(&state), &benefit_id)
        .await?;
    Ok(Json(events))
}

pub async fn active_summary(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ActiveBenefitsSummary>> {
    let summary = state
        .marketplace
        .active_summary(query.resolve(&state))
        .await?;
    Ok(Json(summary))
}

pub async fn rewards_summary(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<TotalRewardsSummary>> {
    Ok(Json(state.rewards.summary(query.resolve(&state))?))
}

pub async fn rewards_summaries(
    State(state): State<AppState>,
) -> Result<Json<Vec<TotalRewardsSummary>>> {
    Ok(Json(state.rewards.all_summaries()?))
}
