// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use busops_domain::{BusId, RouteId};
use rust_decimal_macros::dec;
use time::macros::date;
use tower::ServiceExt;

/// Helper to create test app state with in-memory persistence.
fn create_test_app_state() -> AppState {
    let persistence: SqlitePersistence =
        SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        pricing: PricingConfig::new(dec!(5), dec!(100)).expect("valid pricing"),
        analytics_weeks: 8,
    }
}

/// Seeds one bus on one route for Monday to Wednesday of the week of 2026-03-02.
async fn seed_schedule(app_state: &AppState) -> (BusId, RouteId) {
    let mut persistence = app_state.persistence.lock().await;
    let bus_id: BusId = persistence
        .create_bus("KA-01-0001", 50, dec!(10))
        .expect("bus created");
    let route_id: RouteId = persistence
        .create_route("12A", "Central - Airport", dec!(40))
        .expect("route created");
    for day in [
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 03),
        date!(2026 - 03 - 04),
    ] {
        persistence
            .create_assignment(bus_id, route_id, day)
            .expect("assignment created");
    }
    (bus_id, route_id)
}

async fn send(app: Router, request: Request<Body>) -> (HttpStatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body_bytes.to_vec())
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_generate_weekly_report_creates_records() {
    let app_state: AppState = create_test_app_state();
    seed_schedule(&app_state).await;
    let app: Router = build_router(app_state.clone());

    let (status, body) = send(app, post_empty("/reports/weekly?today=2026-03-11")).await;

    assert_eq!(status, HttpStatusCode::OK);
    let response: GenerateWeeklyReportResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.week_start, "2026-03-02");
    assert_eq!(response.created_count, 1);
    assert!(!response.no_data);

    let stored = app_state
        .persistence
        .lock()
        .await
        .list_performances_for_week(date!(2026 - 03 - 02))
        .unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_generate_weekly_report_without_schedule() {
    let app_state: AppState = create_test_app_state();
    let app: Router = build_router(app_state);

    let (status, body) = send(app, post_empty("/reports/weekly?today=2026-03-11")).await;

    assert_eq!(status, HttpStatusCode::OK);
    let response: GenerateWeeklyReportResponse = serde_json::from_slice(&body).unwrap();
    assert!(response.no_data);
    assert!(response.groups.is_empty());
}

#[tokio::test]
async fn test_generate_weekly_report_rejects_non_monday_week() {
    let app_state: AppState = create_test_app_state();
    let app: Router = build_router(app_state);

    let (status, body) = send(app, post_empty("/reports/weekly?week_start=2026-03-03")).await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(error.error);
    assert!(error.message.contains("Monday"));
}

#[tokio::test]
async fn test_update_actual_passengers_then_read_back() {
    let app_state: AppState = create_test_app_state();
    seed_schedule(&app_state).await;
    let app: Router = build_router(app_state);

    let (_, body) = send(
        app.clone(),
        post_empty("/reports/weekly?week_start=2026-03-02"),
    )
    .await;
    let generated: GenerateWeeklyReportResponse = serde_json::from_slice(&body).unwrap();
    let performance_id: i64 = generated.groups[0].performance_id.unwrap();

    let request_body = UpdateActualPassengersRequest {
        actual_passengers: 20,
    };
    let (status, body) = send(
        app.clone(),
        Request::builder()
            .method("PUT")
            .uri(format!("/performances/{performance_id}/actual_passengers"))
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&request_body).unwrap()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    let updated: PerformanceInfo = serde_json::from_slice(&body).unwrap();
    assert_eq!(updated.total_passengers, 20);
    assert_eq!(updated.total_revenue, dec!(2000));
    assert_eq!(updated.total_profit, dec!(800));

    let (status, body) = send(app, get_request(&format!("/performances/{performance_id}"))).await;
    assert_eq!(status, HttpStatusCode::OK);
    let fetched: PerformanceInfo = serde_json::from_slice(&body).unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_get_missing_performance_is_not_found() {
    let app_state: AppState = create_test_app_state();
    let app: Router = build_router(app_state);

    let (status, body) = send(app, get_request("/performances/999")).await;

    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(error.error);
}

#[tokio::test]
async fn test_list_performances_for_week() {
    let app_state: AppState = create_test_app_state();
    seed_schedule(&app_state).await;
    let app: Router = build_router(app_state);

    send(
        app.clone(),
        post_empty("/reports/weekly?week_start=2026-03-02"),
    )
    .await;
    let (status, body) = send(app, get_request("/performances?week_start=2026-03-02")).await;

    assert_eq!(status, HttpStatusCode::OK);
    let response: ListPerformancesResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.performances.len(), 1);
    assert_eq!(response.summary.total_cost, dec!(1200));
}

#[tokio::test]
async fn test_dashboards() {
    let app_state: AppState = create_test_app_state();
    seed_schedule(&app_state).await;
    let app: Router = build_router(app_state);

    send(app.clone(), post_empty("/reports/weekly?today=2026-03-11")).await;

    let (status, body) = send(app.clone(), get_request("/dashboard/admin?today=2026-03-11")).await;
    assert_eq!(status, HttpStatusCode::OK);
    let admin: AdminDashboardResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(admin.records.len(), 1);
    assert_eq!(admin.total_cost, dec!(1200));

    let (status, body) = send(app, get_request("/dashboard/analytics?today=2026-03-11&weeks=4")).await;
    assert_eq!(status, HttpStatusCode::OK);
    let analytics: AnalyticsDashboardResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(analytics.lookback_weeks, 4);
    assert_eq!(analytics.weekly_trend.len(), 1);
    assert_eq!(analytics.top_routes.len(), 1);
}

#[tokio::test]
async fn test_import_buses_csv() {
    let app_state: AppState = create_test_app_state();
    let app: Router = build_router(app_state.clone());

    let (status, body) = send(
        app,
        Request::builder()
            .method("POST")
            .uri("/import/buses")
            .header("content-type", "text/csv")
            .body(Body::from(
                "number_plate,capacity,mileage_km_per_liter\nKA-01-0007,45,6.5\n",
            ))
            .unwrap(),
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    let response: ImportCsvResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.imported_count, 1);
    assert_eq!(app_state.persistence.lock().await.list_buses().unwrap().len(), 1);
}

#[tokio::test]
async fn test_import_unknown_kind_is_bad_request() {
    let app_state: AppState = create_test_app_state();
    let app: Router = build_router(app_state);

    let (status, _) = send(
        app,
        Request::builder()
            .method("POST")
            .uri("/import/drivers")
            .body(Body::from("name\nAlice\n"))
            .unwrap(),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
}

#[test]
fn test_api_error_status_mapping() {
    let cases: [(ApiError, HttpStatusCode); 4] = [
        (
            ApiError::InvalidInput {
                field: String::from("week_start"),
                message: String::from("bad"),
            },
            HttpStatusCode::BAD_REQUEST,
        ),
        (
            ApiError::ResourceNotFound {
                resource_type: String::from("Record"),
                message: String::from("missing"),
            },
            HttpStatusCode::NOT_FOUND,
        ),
        (
            ApiError::DomainRuleViolation {
                rule: String::from("positive_fuel_mileage"),
                message: String::from("zero"),
            },
            HttpStatusCode::UNPROCESSABLE_ENTITY,
        ),
        (
            ApiError::Internal {
                message: String::from("boom"),
            },
            HttpStatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (api_error, expected) in cases {
        let http_error: HttpError = HttpError::from(api_error);
        assert_eq!(http_error.status, expected);
    }
}

#[test]
fn test_args_defaults() {
    let args: Args = Args::try_parse_from(["busops-server"]).unwrap();

    assert_eq!(args.port, 3000);
    assert_eq!(args.ticket_price_per_km, dec!(1.00));
    assert_eq!(args.fuel_price_per_liter, dec!(100.00));
    assert_eq!(args.analytics_weeks, 8);
}
