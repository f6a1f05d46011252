// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use busops_domain::{
    BusId, PerformanceDraft, PerformanceKey, PreInform, PreInformStatus, PricingConfig, RouteId,
    WeeklyPerformance,
};
use rust_decimal_macros::dec;
use time::Date;
use time::macros::{date, time};

use crate::Persistence;

/// Monday 2026-03-02.
pub const WEEK_START: Date = date!(2026 - 03 - 02);

pub fn create_test_pricing() -> PricingConfig {
    PricingConfig::new(dec!(5), dec!(100)).expect("valid pricing")
}

/// Creates one bus (10 km/l) and one route (40 km).
pub fn seed_bus_and_route(persistence: &mut Persistence) -> (BusId, RouteId) {
    let bus_id: BusId = persistence
        .create_bus("KA-01-0001", 50, dec!(10))
        .expect("bus created");
    let route_id: RouteId = persistence
        .create_route("12A", "Central - Airport", dec!(40))
        .expect("route created");
    (bus_id, route_id)
}

pub fn create_test_pre_inform(route_id: RouteId, day: Date, passengers: u32) -> PreInform {
    PreInform {
        pre_inform_id: None,
        route_id,
        date_of_travel: day,
        desired_time: time!(09:45),
        boarding_stop: String::from("Market"),
        passenger_count: passengers,
        status: PreInformStatus::Pending,
        submitted_on: day,
    }
}

pub fn create_test_performance(
    persistence: &mut Persistence,
    bus_id: BusId,
    route_id: RouteId,
    estimated: u32,
    actual: u32,
) -> WeeklyPerformance {
    let bus = persistence.get_bus(bus_id).unwrap();
    let route = persistence.get_route(route_id).unwrap();
    let draft: PerformanceDraft = PerformanceDraft {
        key: PerformanceKey {
            bus_id,
            route_id,
            week_start: WEEK_START,
        },
        estimated_passengers: estimated,
        actual_passengers: actual,
        total_kms: dec!(200),
    };
    WeeklyPerformance::compute(draft, &bus, &route, &create_test_pricing()).unwrap()
}
