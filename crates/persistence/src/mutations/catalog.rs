// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use busops_domain::{BusId, PreInform, RouteId, format_date, format_time};
use diesel::SqliteConnection;
use diesel::prelude::*;
use rust_decimal::Decimal;
use time::Date;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{bus_assignments, buses, pre_informs, routes};
use crate::error::PersistenceError;

/// Creates a bus and returns its identifier.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the number plate is taken.
pub fn create_bus(
    conn: &mut SqliteConnection,
    number_plate: &str,
    capacity: u32,
    mileage_km_per_liter: Decimal,
) -> Result<BusId, PersistenceError> {
    diesel::insert_into(buses::table)
        .values((
            buses::number_plate.eq(number_plate),
            buses::capacity.eq(i64::from(capacity)),
            buses::mileage_km_per_liter.eq(mileage_km_per_liter.to_string()),
        ))
        .execute(conn)?;

    let bus_id: i64 = conn.get_last_insert_rowid()?;
    info!(bus_id, number_plate, "Created bus");
    Ok(BusId::new(bus_id))
}

/// Creates a route and returns its identifier.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the route number is taken.
pub fn create_route(
    conn: &mut SqliteConnection,
    route_number: &str,
    name: &str,
    total_distance_km: Decimal,
) -> Result<RouteId, PersistenceError> {
    diesel::insert_into(routes::table)
        .values((
            routes::route_number.eq(route_number),
            routes::name.eq(name),
            routes::total_distance_km.eq(total_distance_km.to_string()),
        ))
        .execute(conn)?;

    let route_id: i64 = conn.get_last_insert_rowid()?;
    info!(route_id, route_number, "Created route");
    Ok(RouteId::new(route_id))
}

/// Assigns a bus to a route for one service day and returns the assignment identifier.
///
/// # Errors
///
/// Returns `PersistenceError::ReferenceViolation` if the bus or route does not exist.
pub fn create_assignment(
    conn: &mut SqliteConnection,
    bus_id: BusId,
    route_id: RouteId,
    service_date: Date,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(bus_assignments::table)
        .values((
            bus_assignments::bus_id.eq(bus_id.value()),
            bus_assignments::route_id.eq(route_id.value()),
            bus_assignments::service_date.eq(format_date(service_date)),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}

/// Stores a pre-inform and returns its identifier.
///
/// # Errors
///
/// Returns `PersistenceError::ReferenceViolation` if the route does not exist.
pub fn create_pre_inform(
    conn: &mut SqliteConnection,
    pre_inform: &PreInform,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(pre_informs::table)
        .values((
            pre_informs::route_id.eq(pre_inform.route_id.value()),
            pre_informs::date_of_travel.eq(format_date(pre_inform.date_of_travel)),
            pre_informs::desired_time.eq(format_time(pre_inform.desired_time)),
            pre_informs::boarding_stop.eq(&pre_inform.boarding_stop),
            pre_informs::passenger_count.eq(i64::from(pre_inform.passenger_count)),
            pre_informs::status.eq(pre_inform.status.as_str()),
            pre_informs::submitted_on.eq(format_date(pre_inform.submitted_on)),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
