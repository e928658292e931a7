use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{send, test_app};

#[tokio::test]
async fn test_health() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_catalog_is_normalized() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/api/benefits/catalog", None).await;
    assert_eq!(status, StatusCode::OK);

    let entries = body.as_array().unwrap();
    let bike = entries.iter().find(|e| e["id"] == "bike-leasing").unwrap();
    assert_eq!(bike["simulationConfig"]["hasCalculator"], true);
    assert_eq!(bike["simulationConfig"]["formula"], "(price * 0.036) * 0.6");

    let car = entries.iter().find(|e| e["id"] == "company-car").unwrap();
    assert_eq!(car["hasCalculator"], true);
    assert_eq!(car["simulationFormula"], "(price * 0.01) * 0.58");
}

#[tokio::test]
async fn test_unrequested_benefit_is_available() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/api/benefits/bike-leasing", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "enrolled": false, "status": "AVAILABLE" }));
}

#[tokio::test]
async fn test_unknown_benefit_is_404() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/api/benefits/yacht", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "BENEFIT_NOT_FOUND");
}

#[tokio::test]
async fn test_seeded_active_summary() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/api/benefits/active-summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    // Seeded benefits save their full fixed value: 49 + 30
    assert_eq!(body["totalSavings"], 79.0);
}

#[tokio::test]
async fn test_request_activate_cancel_flow() {
    let app = test_app().await;

    let (status, requested) = send(
        &app,
        "POST",
        "/api/benefits/bike-leasing",
        Some(json!({ "vehiclePrice": 3000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(requested["status"], "REQUESTED");
    assert_eq!(requested["grossCost"], 108.0);
    assert_eq!(requested["netCost"], 64.8);
    assert_eq!(requested["savings"], 43.2);
    assert_eq!(requested["vehiclePrice"], 3000.0);

    let (status, active) = send(&app, "POST", "/api/benefits/bike-leasing/activate", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(active["status"], "ACTIVE");
    assert_eq!(active["id"], requested["id"]);

    let (_, summary) = send(&app, "GET", "/api/benefits/active-summary", None).await;
    // Two seeded benefits plus the bike lease
    assert_eq!(summary["count"], 3);

    let (status, cancelled) = send(&app, "POST", "/api/benefits/bike-leasing/cancel", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "AVAILABLE");
    assert!(cancelled["savings"].is_null());

    let (_, events) = send(&app, "GET", "/api/benefits/bike-leasing/events", None).await;
    let kinds: Vec<&str> = events
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["eventType"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, ["REQUESTED", "ACTIVATED", "DEACTIVATED"]);
}

#[tokio::test]
async fn test_invalid_transitions_are_4xx() {
    let app = test_app().await;

    let (status, body) = send(&app, "POST", "/api/benefits/bike-leasing/activate", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Benefit not requested yet");

    send(&app, "POST", "/api/benefits/gym-membership", Some(json!({}))).await;
    let (status, body) = send(&app, "POST", "/api/benefits/gym-membership", Some(json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Benefit is already REQUESTED");

    // Seeded as ACTIVE for the demo user
    let (status, body) = send(&app, "POST", "/api/benefits/mental-health/activate", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn test_user_id_query_isolates_users() {
    let app = test_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/benefits/gym-membership?userId=someone-else",
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, mine) = send(&app, "GET", "/api/benefits/gym-membership", None).await;
    assert_eq!(mine["enrolled"], false);

    let (_, theirs) = send(&app, "GET", "/api/benefits/gym-membership?userId=someone-else", None).await;
    assert_eq!(theirs["status"], "REQUESTED");
    assert_eq!(theirs["savings"], 15.6);
}

#[tokio::test]
async fn test_simulate() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/benefits/company-car/simulate",
        Some(json!({ "vehiclePrice": 45000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "grossCost": 450.0, "netCost": 261.0, "savings": 189.0 }));

    let (status, body) = send(
        &app,
        "POST",
        "/api/benefits/gym-membership/simulate",
        Some(json!({ "vehiclePrice": 45000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Benefit does not support simulation");

    let (status, body) = send(
        &app,
        "POST",
        "/api/benefits/company-car/simulate",
        Some(json!({ "vehiclePrice": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(&app, "POST", "/api/benefits/company-car/simulate", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_json_error() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/benefits/bike-leasing",
        Some(json!({ "vehiclePrice": "lots" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_rewards_summary() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/api/rewards/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], "orbit-demo-user");
    assert_eq!(body["visualBreakdown"]["baseSalary"], 5200.0);
    assert_eq!(body["visualBreakdown"]["taxSavings"], 83.6);
    assert_eq!(body["totalMonthlyComp"], 6121.6);

    let (_, private) = send(&app, "GET", "/api/rewards/summary?userId=orbit-private-user", None).await;
    for field in ["baseSalary", "cashBonus", "employerPension", "benefitsValue", "taxSavings"] {
        assert!(private["visualBreakdown"][field].is_null(), "{field} leaked");
    }
    assert!(private["totalMonthlyComp"].is_null());
    assert!(private["ytdTotal"].is_null());

    let (status, body) = send(&app, "GET", "/api/rewards/summary?userId=ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User with ID ghost not found");

    let (_, all) = send(&app, "GET", "/api/rewards/summaries", None).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}
