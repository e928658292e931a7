#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::io::{Error, Write};
use std::sync::Arc;
use tempfile::NamedTempFile;
use total_rewards::application::marketplace::Marketplace;
use total_rewards::application::rewards::RewardsService;
use total_rewards::infrastructure::in_memory::{InMemoryEventLog, InMemoryUserBenefitStore};
use total_rewards::infrastructure::reference_data::{DEMO_USER_ID, ReferenceData};
use total_rewards::interfaces::http::{AppState, router};
use tower::ServiceExt;

/// Writes an actions CSV with the standard header followed by `rows`.
pub fn actions_csv(rows: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "action, user, benefit, vehicle_price")?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    Ok(file)
}

/// Router over the embedded demo data with the demo user's active benefits seeded.
pub async fn test_app() -> Router {
    let data = ReferenceData::embedded().unwrap();
    let rewards = RewardsService::new(Arc::new(data.clone()));
    let marketplace = Marketplace::new(
        data.catalog,
        Box::new(InMemoryUserBenefitStore::new()),
        Box::new(InMemoryEventLog::new()),
    );
    marketplace.seed_active_benefits(DEMO_USER_ID).await.unwrap();
    router(AppState::new(marketplace, rewards, DEMO_USER_ID))
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
