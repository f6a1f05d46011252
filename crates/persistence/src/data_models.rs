// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversions to and from domain values.

use busops_domain::{
    Bus, BusAssignment, BusId, FinancialFigures, PerformanceDraft, PerformanceKey, PreInform,
    PreInformStatus, Route, RouteId, WeeklyPerformance, format_date, parse_date, parse_time,
};
use diesel::prelude::*;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use time::Date;

use crate::diesel_schema::{buses, pre_informs, routes, weekly_performances};
use crate::error::PersistenceError;

/// A stored bus.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = buses)]
pub struct BusRow {
    pub bus_id: i64,
    pub number_plate: String,
    pub capacity: i64,
    pub mileage_km_per_liter: String,
}

impl BusRow {
    pub fn into_domain(self) -> Result<Bus, PersistenceError> {
        Ok(Bus {
            bus_id: BusId::new(self.bus_id),
            capacity: to_count(self.capacity, "capacity")?,
            mileage_km_per_liter: parse_decimal(&self.mileage_km_per_liter, "mileage")?,
            number_plate: self.number_plate,
        })
    }
}

/// A stored route.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = routes)]
pub struct RouteRow {
    pub route_id: i64,
    pub route_number: String,
    pub name: String,
    pub total_distance_km: String,
}

impl RouteRow {
    pub fn into_domain(self) -> Result<Route, PersistenceError> {
        Ok(Route {
            route_id: RouteId::new(self.route_id),
            total_distance_km: parse_decimal(&self.total_distance_km, "total_distance_km")?,
            route_number: self.route_number,
            name: self.name,
        })
    }
}

/// An assignment joined with its route's distance.
pub type AssignmentRow = (i64, i64, i64, String, String);

pub fn assignment_from_row(row: AssignmentRow) -> Result<BusAssignment, PersistenceError> {
    let (assignment_id, bus_id, route_id, service_date, distance) = row;
    Ok(BusAssignment {
        assignment_id: Some(assignment_id),
        bus_id: BusId::new(bus_id),
        route_id: RouteId::new(route_id),
        service_date: parse_stored_date(&service_date)?,
        route_distance_km: parse_decimal(&distance, "total_distance_km")?,
    })
}

/// A stored pre-inform.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pre_informs)]
pub struct PreInformRow {
    pub pre_inform_id: i64,
    pub route_id: i64,
    pub date_of_travel: String,
    pub desired_time: String,
    pub boarding_stop: String,
    pub passenger_count: i64,
    pub status: String,
    pub submitted_on: String,
}

impl PreInformRow {
    pub fn into_domain(self) -> Result<PreInform, PersistenceError> {
        Ok(PreInform {
            pre_inform_id: Some(self.pre_inform_id),
            route_id: RouteId::new(self.route_id),
            date_of_travel: parse_stored_date(&self.date_of_travel)?,
            desired_time: parse_time(&self.desired_time)
                .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?,
            passenger_count: to_count(self.passenger_count, "passenger_count")?,
            status: PreInformStatus::from_str(&self.status)
                .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?,
            submitted_on: parse_stored_date(&self.submitted_on)?,
            boarding_stop: self.boarding_stop,
        })
    }
}

/// A stored weekly performance.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = weekly_performances)]
pub struct PerformanceRow {
    pub performance_id: i64,
    pub bus_id: i64,
    pub route_id: i64,
    pub week_start_date: String,
    pub estimated_passengers: i64,
    pub actual_passengers: i64,
    pub total_passengers: i64,
    pub total_kms: String,
    pub total_revenue: String,
    pub total_cost: String,
    pub total_profit: String,
}

impl PerformanceRow {
    /// Rehydrates the row, re-checking the derived-field invariants.
    pub fn into_domain(self) -> Result<WeeklyPerformance, PersistenceError> {
        let draft: PerformanceDraft = PerformanceDraft {
            key: PerformanceKey {
                bus_id: BusId::new(self.bus_id),
                route_id: RouteId::new(self.route_id),
                week_start: parse_stored_date(&self.week_start_date)?,
            },
            estimated_passengers: to_count(self.estimated_passengers, "estimated_passengers")?,
            actual_passengers: to_count(self.actual_passengers, "actual_passengers")?,
            total_kms: parse_decimal(&self.total_kms, "total_kms")?,
        };
        let figures: FinancialFigures = FinancialFigures {
            revenue: parse_decimal(&self.total_revenue, "total_revenue")?,
            cost: parse_decimal(&self.total_cost, "total_cost")?,
            profit: parse_decimal(&self.total_profit, "total_profit")?,
        };
        let total_passengers: u32 = to_count(self.total_passengers, "total_passengers")?;

        WeeklyPerformance::restore(self.performance_id, draft, total_passengers, figures)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
    }
}

/// Column values written for a weekly performance.
///
/// Only built from a domain-derived record, so stored totals always
/// satisfy the derived-field invariants.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = weekly_performances)]
pub struct PerformanceValues {
    pub bus_id: i64,
    pub route_id: i64,
    pub week_start_date: String,
    pub estimated_passengers: i64,
    pub actual_passengers: i64,
    pub total_passengers: i64,
    pub total_kms: String,
    pub total_revenue: String,
    pub total_cost: String,
    pub total_profit: String,
}

impl From<&WeeklyPerformance> for PerformanceValues {
    fn from(record: &WeeklyPerformance) -> Self {
        Self {
            bus_id: record.bus_id().value(),
            route_id: record.route_id().value(),
            week_start_date: format_date(record.week_start()),
            estimated_passengers: i64::from(record.estimated_passengers()),
            actual_passengers: i64::from(record.actual_passengers()),
            total_passengers: i64::from(record.total_passengers()),
            total_kms: record.total_kms().to_string(),
            total_revenue: record.total_revenue().to_string(),
            total_cost: record.total_cost().to_string(),
            total_profit: record.total_profit().to_string(),
        }
    }
}

pub fn parse_stored_date(value: &str) -> Result<Date, PersistenceError> {
    parse_date(value).map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

fn parse_decimal(value: &str, column: &str) -> Result<Decimal, PersistenceError> {
    Decimal::from_str(value).map_err(|e| {
        PersistenceError::ReconstructionError(format!("Invalid decimal in {column}: {value} ({e})"))
    })
}

fn to_count(value: i64, column: &str) -> Result<u32, PersistenceError> {
    value.to_u32().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("Invalid count in {column}: {value}"))
    })
}
