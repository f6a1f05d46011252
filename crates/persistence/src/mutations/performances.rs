// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly performance writes.
//!
//! Rows are only ever written from a domain-derived `WeeklyPerformance`, so
//! there is no path that stores financial figures supplied by a caller.

use busops::WeeklyReportPlan;
use busops_domain::{WeeklyPerformance, format_date};
use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::PerformanceValues;
use crate::diesel_schema::weekly_performances;
use crate::error::PersistenceError;

/// Inserts or updates the record for its (bus, route, week) key.
///
/// Must run inside a transaction when combined with other writes.
fn upsert_performance(
    conn: &mut SqliteConnection,
    record: &WeeklyPerformance,
) -> Result<i64, PersistenceError> {
    let values: PerformanceValues = PerformanceValues::from(record);

    let existing_id: Option<i64> = weekly_performances::table
        .filter(weekly_performances::bus_id.eq(values.bus_id))
        .filter(weekly_performances::route_id.eq(values.route_id))
        .filter(weekly_performances::week_start_date.eq(&values.week_start_date))
        .select(weekly_performances::performance_id)
        .first::<i64>(conn)
        .optional()?;

    if let Some(performance_id) = existing_id {
        diesel::update(
            weekly_performances::table
                .filter(weekly_performances::performance_id.eq(performance_id)),
        )
        .set((
            &values,
            weekly_performances::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;
        debug!(performance_id, "Updated weekly performance");
        return Ok(performance_id);
    }

    diesel::insert_into(weekly_performances::table)
        .values(&values)
        .execute(conn)?;
    let performance_id: i64 = conn.get_last_insert_rowid()?;
    debug!(performance_id, "Inserted weekly performance");
    Ok(performance_id)
}

/// Persists every successful group of a report plan in one transaction.
///
/// Returns the stored identifiers in plan order. Failed groups are skipped.
/// If any write fails, nothing from the plan is stored.
///
/// # Errors
///
/// Returns an error if any write fails.
pub fn persist_weekly_report(
    conn: &mut SqliteConnection,
    plan: &WeeklyReportPlan,
) -> Result<Vec<i64>, PersistenceError> {
    let records: Vec<&WeeklyPerformance> = plan.records_to_persist();
    let week_start: String = format_date(plan.window().start());

    let ids: Vec<i64> = conn.transaction::<_, PersistenceError, _>(|conn| {
        records
            .iter()
            .map(|record| upsert_performance(conn, record))
            .collect()
    })?;

    info!(
        %week_start,
        stored = ids.len(),
        failed = plan.failed_count(),
        "Persisted weekly report"
    );
    Ok(ids)
}

/// Stores a single record, inserting or updating by key.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn save_performance(
    conn: &mut SqliteConnection,
    record: &WeeklyPerformance,
) -> Result<i64, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| upsert_performance(conn, record))
}
