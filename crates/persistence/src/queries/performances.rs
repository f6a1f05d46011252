// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use busops_domain::{PerformanceKey, WeeklyPerformance, format_date};
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::Date;

use crate::data_models::PerformanceRow;
use crate::diesel_schema::weekly_performances;
use crate::error::PersistenceError;

fn into_records(rows: Vec<PerformanceRow>) -> Result<Vec<WeeklyPerformance>, PersistenceError> {
    rows.into_iter().map(PerformanceRow::into_domain).collect()
}

/// Retrieves a weekly performance by identifier.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no record has this identifier, or
/// `PersistenceError::ReconstructionError` if the stored row is inconsistent.
pub fn get_performance(
    conn: &mut SqliteConnection,
    performance_id: i64,
) -> Result<WeeklyPerformance, PersistenceError> {
    weekly_performances::table
        .filter(weekly_performances::performance_id.eq(performance_id))
        .select(PerformanceRow::as_select())
        .first::<PerformanceRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Weekly performance {performance_id}")))?
        .into_domain()
}

/// Looks up the record for a (bus, route, week) key.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is inconsistent.
pub fn find_performance(
    conn: &mut SqliteConnection,
    key: &PerformanceKey,
) -> Result<Option<WeeklyPerformance>, PersistenceError> {
    weekly_performances::table
        .filter(weekly_performances::bus_id.eq(key.bus_id.value()))
        .filter(weekly_performances::route_id.eq(key.route_id.value()))
        .filter(weekly_performances::week_start_date.eq(format_date(key.week_start)))
        .select(PerformanceRow::as_select())
        .first::<PerformanceRow>(conn)
        .optional()?
        .map(PerformanceRow::into_domain)
        .transpose()
}

/// Lists the records of the week starting `week_start`, ordered by bus then route.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is inconsistent.
pub fn list_performances_for_week(
    conn: &mut SqliteConnection,
    week_start: Date,
) -> Result<Vec<WeeklyPerformance>, PersistenceError> {
    let rows: Vec<PerformanceRow> = weekly_performances::table
        .filter(weekly_performances::week_start_date.eq(format_date(week_start)))
        .order((
            weekly_performances::bus_id.asc(),
            weekly_performances::route_id.asc(),
        ))
        .select(PerformanceRow::as_select())
        .load::<PerformanceRow>(conn)?;
    into_records(rows)
}

/// Lists records whose week starts on or after `since`, ordered by week, bus and route.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is inconsistent.
pub fn list_performances_since(
    conn: &mut SqliteConnection,
    since: Date,
) -> Result<Vec<WeeklyPerformance>, PersistenceError> {
    let rows: Vec<PerformanceRow> = weekly_performances::table
        .filter(weekly_performances::week_start_date.ge(format_date(since)))
        .order((
            weekly_performances::week_start_date.asc(),
            weekly_performances::bus_id.asc(),
            weekly_performances::route_id.asc(),
        ))
        .select(PerformanceRow::as_select())
        .load::<PerformanceRow>(conn)?;
    into_records(rows)
}
