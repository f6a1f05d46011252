// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use busops_domain::{
    Bus, BusAssignment, BusId, PerformanceDraft, PerformanceKey, PreInform, PreInformStatus,
    PricingConfig, Route, RouteId, WeekWindow, WeeklyPerformance,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use time::macros::{date, time};
use time::{Date, Duration};

/// Wednesday 2026-03-11; the previous week is 2026-03-02 .. 2026-03-08.
pub const TODAY: Date = date!(2026 - 03 - 11);

pub fn last_week() -> WeekWindow {
    WeekWindow::previous_week(TODAY).unwrap()
}

pub fn create_test_pricing() -> PricingConfig {
    PricingConfig::new(dec!(5), dec!(100)).unwrap()
}

pub fn create_test_bus(id: i64, mileage: Decimal) -> Bus {
    Bus {
        bus_id: BusId::new(id),
        number_plate: format!("BUS-{id}"),
        capacity: 40,
        mileage_km_per_liter: mileage,
    }
}

pub fn create_test_route(id: i64, distance: Decimal) -> Route {
    Route {
        route_id: RouteId::new(id),
        route_number: format!("{id}A"),
        name: format!("Line {id}"),
        total_distance_km: distance,
    }
}

/// Assigns `bus` to `route` on `days` consecutive days from the start of last week.
pub fn create_daily_assignments(
    bus: i64,
    route: i64,
    days: i64,
    distance: Decimal,
) -> Vec<BusAssignment> {
    (0..days)
        .map(|offset| BusAssignment {
            assignment_id: None,
            bus_id: BusId::new(bus),
            route_id: RouteId::new(route),
            service_date: last_week().start() + Duration::days(offset),
            route_distance_km: distance,
        })
        .collect()
}

pub fn create_test_pre_inform(route: i64, day: Date, passengers: u32) -> PreInform {
    PreInform {
        pre_inform_id: None,
        route_id: RouteId::new(route),
        date_of_travel: day,
        desired_time: time!(07:15),
        boarding_stop: String::from("Depot"),
        passenger_count: passengers,
        status: PreInformStatus::Noted,
        submitted_on: day,
    }
}

pub fn create_stored_performance(
    id: i64,
    bus: &Bus,
    route: &Route,
    week_start: Date,
    estimated: u32,
    actual: u32,
    kms: Decimal,
) -> WeeklyPerformance {
    let draft: PerformanceDraft = PerformanceDraft {
        key: PerformanceKey {
            bus_id: bus.bus_id,
            route_id: route.route_id,
            week_start,
        },
        estimated_passengers: estimated,
        actual_passengers: actual,
        total_kms: kms,
    };
    WeeklyPerformance::compute(draft, bus, route, &create_test_pricing())
        .unwrap()
        .with_id(id)
}
