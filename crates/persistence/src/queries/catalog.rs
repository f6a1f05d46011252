// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use busops_domain::{Bus, BusAssignment, BusId, PreInform, Route, RouteId, format_date};
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::Date;
use tracing::debug;

use crate::data_models::{
    AssignmentRow, BusRow, PreInformRow, RouteRow, assignment_from_row,
};
use crate::diesel_schema::{bus_assignments, buses, pre_informs, routes};
use crate::error::PersistenceError;

/// Lists every bus ordered by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_buses(conn: &mut SqliteConnection) -> Result<Vec<Bus>, PersistenceError> {
    buses::table
        .order(buses::bus_id.asc())
        .select(BusRow::as_select())
        .load::<BusRow>(conn)?
        .into_iter()
        .map(BusRow::into_domain)
        .collect()
}

/// Retrieves a bus by identifier.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the bus does not exist.
pub fn get_bus(conn: &mut SqliteConnection, bus_id: BusId) -> Result<Bus, PersistenceError> {
    buses::table
        .filter(buses::bus_id.eq(bus_id.value()))
        .select(BusRow::as_select())
        .first::<BusRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Bus {bus_id}")))?
        .into_domain()
}

/// Lists every route ordered by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_routes(conn: &mut SqliteConnection) -> Result<Vec<Route>, PersistenceError> {
    routes::table
        .order(routes::route_id.asc())
        .select(RouteRow::as_select())
        .load::<RouteRow>(conn)?
        .into_iter()
        .map(RouteRow::into_domain)
        .collect()
}

/// Retrieves a route by identifier.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the route does not exist.
pub fn get_route(conn: &mut SqliteConnection, route_id: RouteId) -> Result<Route, PersistenceError> {
    routes::table
        .filter(routes::route_id.eq(route_id.value()))
        .select(RouteRow::as_select())
        .first::<RouteRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Route {route_id}")))?
        .into_domain()
}

/// Lists assignments with a service date in `[start, end]`, each joined with
/// its route's current distance.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_assignments_between(
    conn: &mut SqliteConnection,
    start: Date,
    end: Date,
) -> Result<Vec<BusAssignment>, PersistenceError> {
    let rows: Vec<AssignmentRow> = bus_assignments::table
        .inner_join(routes::table)
        .filter(bus_assignments::service_date.ge(format_date(start)))
        .filter(bus_assignments::service_date.le(format_date(end)))
        .order((
            bus_assignments::service_date.asc(),
            bus_assignments::assignment_id.asc(),
        ))
        .select((
            bus_assignments::assignment_id,
            bus_assignments::bus_id,
            bus_assignments::route_id,
            bus_assignments::service_date,
            routes::total_distance_km,
        ))
        .load::<AssignmentRow>(conn)?;

    debug!(%start, %end, count = rows.len(), "Loaded bus assignments");
    rows.into_iter().map(assignment_from_row).collect()
}

/// Lists pre-informs with a travel date in `[start, end]`.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_pre_informs_between(
    conn: &mut SqliteConnection,
    start: Date,
    end: Date,
) -> Result<Vec<PreInform>, PersistenceError> {
    let rows: Vec<PreInformRow> = pre_informs::table
        .filter(pre_informs::date_of_travel.ge(format_date(start)))
        .filter(pre_informs::date_of_travel.le(format_date(end)))
        .order(pre_informs::pre_inform_id.asc())
        .select(PreInformRow::as_select())
        .load::<PreInformRow>(conn)?;

    debug!(%start, %end, count = rows.len(), "Loaded pre-informs by travel date");
    rows.into_iter().map(PreInformRow::into_domain).collect()
}

/// Lists pre-informs submitted on or after `since`.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_pre_informs_submitted_since(
    conn: &mut SqliteConnection,
    since: Date,
) -> Result<Vec<PreInform>, PersistenceError> {
    pre_informs::table
        .filter(pre_informs::submitted_on.ge(format_date(since)))
        .order(pre_informs::pre_inform_id.asc())
        .select(PreInformRow::as_select())
        .load::<PreInformRow>(conn)?
        .into_iter()
        .map(PreInformRow::into_domain)
        .collect()
}
