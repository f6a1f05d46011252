// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use busops_api::{
    AdminDashboardResponse, AnalyticsDashboardResponse, ApiError, GenerateWeeklyReportResponse,
    ImportCsvResponse, ImportKind, ListPerformancesResponse, PerformanceInfo,
    UpdateActualPassengersRequest, generate_weekly_report, generate_weekly_report_for_week,
    get_admin_dashboard, get_analytics_dashboard, get_performance, import_csv, list_performances,
    translate_domain_error, update_actual_passengers,
};
use busops_domain::{PricingConfig, WeekWindow, parse_date};
use busops_persistence::SqlitePersistence;
use clap::Parser;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::{Date, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{error, info};

/// Bus Operations Server - HTTP server for weekly bus performance reporting
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "BUSOPS_DATABASE")]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, env = "BUSOPS_PORT", default_value_t = 3000)]
    port: u16,

    /// Ticket price charged per kilometer travelled
    #[arg(long, env = "BUSOPS_TICKET_PRICE_PER_KM", default_value = "1.00")]
    ticket_price_per_km: Decimal,

    /// Fuel price per liter
    #[arg(long, env = "BUSOPS_FUEL_PRICE_PER_LITER", default_value = "100.00")]
    fuel_price_per_liter: Decimal,

    /// Number of weeks covered by the analytics dashboard
    #[arg(long, env = "BUSOPS_ANALYTICS_WEEKS", default_value_t = 8)]
    analytics_weeks: u32,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a Mutex, so report generation and
/// passenger updates never interleave.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<SqlitePersistence>>,
    pricing: PricingConfig,
    analytics_weeks: u32,
}

/// Optional overrides for report generation.
#[derive(Debug, Default, Deserialize)]
struct WeeklyReportQuery {
    /// Monday of the week to report. Defaults to the last complete week.
    week_start: Option<String>,
    /// The date the last complete week is measured from. Defaults to today.
    today: Option<String>,
}

/// Optional reference date for dashboards.
#[derive(Debug, Default, Deserialize)]
struct DashboardQuery {
    today: Option<String>,
    /// Analytics lookback in weeks.
    weeks: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ListPerformancesQuery {
    /// Monday of the week to list. Defaults to the last complete week.
    week_start: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

fn parse_query_date(value: Option<&str>) -> Result<Option<Date>, HttpError> {
    value
        .map(|raw| parse_date(raw).map_err(|e| HttpError::from(translate_domain_error(e))))
        .transpose()
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Handler for POST `/reports/weekly` endpoint.
///
/// Generates or refreshes the weekly performance records.
async fn handle_generate_weekly_report(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<WeeklyReportQuery>,
) -> Result<Json<GenerateWeeklyReportResponse>, HttpError> {
    info!(
        week_start = ?query.week_start,
        "Handling generate_weekly_report request"
    );

    let week_start: Option<Date> = parse_query_date(query.week_start.as_deref())?;
    let reference: Date = parse_query_date(query.today.as_deref())?.unwrap_or_else(today);

    let mut persistence = app_state.persistence.lock().await;
    let response: GenerateWeeklyReportResponse = match week_start {
        Some(start) => {
            let window: WeekWindow = WeekWindow::starting(start).map_err(translate_domain_error)?;
            generate_weekly_report_for_week(&mut persistence, &app_state.pricing, window)?
        }
        None => generate_weekly_report(&mut persistence, &app_state.pricing, reference)?,
    };

    Ok(Json(response))
}

/// Handler for GET `/dashboard/admin` endpoint.
async fn handle_admin_dashboard(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<AdminDashboardResponse>, HttpError> {
    info!("Handling admin_dashboard request");

    let reference: Date = parse_query_date(query.today.as_deref())?.unwrap_or_else(today);
    let mut persistence = app_state.persistence.lock().await;
    let response: AdminDashboardResponse = get_admin_dashboard(&mut persistence, reference)?;

    Ok(Json(response))
}

/// Handler for GET `/dashboard/analytics` endpoint.
async fn handle_analytics_dashboard(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<AnalyticsDashboardResponse>, HttpError> {
    let weeks: u32 = query.weeks.unwrap_or(app_state.analytics_weeks);
    info!(weeks, "Handling analytics_dashboard request");

    let reference: Date = parse_query_date(query.today.as_deref())?.unwrap_or_else(today);
    let mut persistence = app_state.persistence.lock().await;
    let response: AnalyticsDashboardResponse =
        get_analytics_dashboard(&mut persistence, reference, weeks)?;

    Ok(Json(response))
}

/// Handler for GET `/performances` endpoint.
async fn handle_list_performances(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListPerformancesQuery>,
) -> Result<Json<ListPerformancesResponse>, HttpError> {
    info!(week_start = ?query.week_start, "Handling list_performances request");

    let week_start: Date = match parse_query_date(query.week_start.as_deref())? {
        Some(start) => start,
        None => WeekWindow::previous_week(today())
            .map_err(translate_domain_error)?
            .start(),
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: ListPerformancesResponse = list_performances(&mut persistence, week_start)?;

    Ok(Json(response))
}

/// Handler for GET `/performances/{performance_id}` endpoint.
async fn handle_get_performance(
    AxumState(app_state): AxumState<AppState>,
    Path(performance_id): Path<i64>,
) -> Result<Json<PerformanceInfo>, HttpError> {
    info!(performance_id, "Handling get_performance request");

    let mut persistence = app_state.persistence.lock().await;
    let response: PerformanceInfo = get_performance(&mut persistence, performance_id)?;

    Ok(Json(response))
}

/// Handler for PUT `/performances/{performance_id}/actual_passengers` endpoint.
async fn handle_update_actual_passengers(
    AxumState(app_state): AxumState<AppState>,
    Path(performance_id): Path<i64>,
    Json(request): Json<UpdateActualPassengersRequest>,
) -> Result<Json<PerformanceInfo>, HttpError> {
    info!(
        performance_id,
        actual_passengers = request.actual_passengers,
        "Handling update_actual_passengers request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: PerformanceInfo = update_actual_passengers(
        &mut persistence,
        &app_state.pricing,
        performance_id,
        &request,
    )?;

    Ok(Json(response))
}

/// Handler for POST `/import/{kind}` endpoint.
///
/// The request body is the CSV text.
async fn handle_import_csv(
    AxumState(app_state): AxumState<AppState>,
    Path(kind): Path<String>,
    body: String,
) -> Result<Json<ImportCsvResponse>, HttpError> {
    let kind: ImportKind = kind.parse()?;
    info!(
        kind = kind.as_str(),
        bytes = body.len(),
        "Handling import_csv request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ImportCsvResponse = import_csv(&mut persistence, kind, &body, today())?;

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/reports/weekly", post(handle_generate_weekly_report))
        .route("/dashboard/admin", get(handle_admin_dashboard))
        .route("/dashboard/analytics", get(handle_analytics_dashboard))
        .route("/performances", get(handle_list_performances))
        .route("/performances/{performance_id}", get(handle_get_performance))
        .route(
            "/performances/{performance_id}/actual_passengers",
            put(handle_update_actual_passengers),
        )
        .route("/import/{kind}", post(handle_import_csv))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Bus Operations Server");

    let pricing: PricingConfig =
        PricingConfig::new(args.ticket_price_per_km, args.fuel_price_per_liter)?;
    info!(
        ticket_price_per_km = %pricing.ticket_price_per_km(),
        fuel_price_per_liter = %pricing.fuel_price_per_liter(),
        "Pricing configured"
    );

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        pricing,
        analytics_weeks: args.analytics_weeks,
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
