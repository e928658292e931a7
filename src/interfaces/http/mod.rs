//! JSON HTTP surface over the marketplace and rewards services.

pub mod error;
pub mod handlers;

use crate::application::marketplace::Marketplace;
use crate::application::rewards::RewardsService;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub marketplace: Arc<Marketplace>,
    pub rewards: RewardsService,
    /// User the dashboard acts on when a request carries no `userId`.
    pub demo_user: Arc<str>,
}

impl AppState {
    pub fn new(marketplace: Marketplace, rewards: RewardsService, demo_user: &str) -> Self {
        Self {
            marketplace: Arc::new(marketplace),
            rewards,
            demo_user: Arc::from(demo_user),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let benefits = Router::new()
        .route("/catalog", get(handlers::catalog))
        .route("/active-summary", get(handlers::active_summary))
        .route(
            "/{benefit_id}",
            get(handlers::get_benefit).post(handlers::request_benefit),
        )
        .route("/{benefit_id}/activate", post(handlers::activate_benefit))
        .route("/{benefit_id}/cancel", post(handlers::cancel_benefit))
        .route("/{benefit_id}/simulate", post(handlers::simulate_benefit))
        .route("/{benefit_id}/events", get(handlers::benefit_events));

    let rewards = Router::new()
        .route("/summary", get(handlers::rewards_summary))
        .route("/summaries", get(handlers::rewards_summaries));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/benefits", benefits)
        .nest("/api/rewards", rewards)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the API on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    info!(addr = %listener.local_addr()?, "total rewards API listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await
}
