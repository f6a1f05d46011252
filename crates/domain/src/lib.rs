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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod aggregation;
mod analytics;
mod dates;
mod error;
mod financial;
mod performance;
mod types;
mod week;

#[cfg(test)]
mod tests;

pub use aggregation::{ScheduleGroup, aggregate_schedules, estimate_demand};
pub use analytics::{
    BusRanking, BusWeekSummary, DemandBucket, RANKING_LIMIT, RouteRanking, RouteWeekSummary,
    WeekTotals, WeeklyTrendPoint, bus_leaderboard, demand_pattern, rank_buses, rank_routes,
    route_leaderboard, week_totals, weekly_trend,
};
pub use dates::{format_date, format_time, parse_date, parse_time};
pub use error::DomainError;
pub use financial::{
    AVERAGE_JOURNEY_FRACTION, FinancialFigures, FinancialInputs, MONEY_SCALE, PricingConfig,
    compute_financials,
};
pub use performance::{PerformanceDraft, PerformanceKey, ProfitStatus, WeeklyPerformance};
pub use types::{Bus, BusAssignment, BusId, PreInform, PreInformStatus, Route, RouteId};
pub use week::{WeekWindow, lookback_cutoff};
