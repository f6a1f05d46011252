// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use time::Date;
use time::macros::{date, time};

use crate::{
    Bus, BusAssignment, BusId, PerformanceDraft, PerformanceKey, PreInform, PreInformStatus,
    PricingConfig, Route, RouteId, WeeklyPerformance,
};

/// Monday 2026-03-02.
pub const WEEK_START: Date = date!(2026 - 03 - 02);

pub fn create_test_bus(id: i64, mileage: Decimal) -> Bus {
    Bus {
        bus_id: BusId::new(id),
        number_plate: format!("KA-01-{id:04}"),
        capacity: 50,
        mileage_km_per_liter: mileage,
    }
}

pub fn create_test_route(id: i64, distance: Decimal) -> Route {
    Route {
        route_id: RouteId::new(id),
        route_number: format!("R{id}"),
        name: format!("Route {id}"),
        total_distance_km: distance,
    }
}

pub fn create_test_pricing() -> PricingConfig {
    PricingConfig::new(dec!(5), dec!(100)).unwrap()
}

pub fn create_test_assignment(bus: i64, route: i64, day: Date, distance: Decimal) -> BusAssignment {
    BusAssignment {
        assignment_id: None,
        bus_id: BusId::new(bus),
        route_id: RouteId::new(route),
        service_date: day,
        route_distance_km: distance,
    }
}

pub fn create_test_pre_inform(route: i64, day: Date, passengers: u32) -> PreInform {
    PreInform {
        pre_inform_id: None,
        route_id: RouteId::new(route),
        date_of_travel: day,
        desired_time: time!(08:30),
        boarding_stop: String::from("Central"),
        passenger_count: passengers,
        status: PreInformStatus::Pending,
        submitted_on: day,
    }
}

/// Builds a record whose revenue is `passengers * 20 * 5` and cost is `kms * 10`.
pub fn create_test_performance(
    bus: i64,
    route: i64,
    week_start: Date,
    estimated: u32,
    actual: u32,
    kms: Decimal,
) -> WeeklyPerformance {
    let draft: PerformanceDraft = PerformanceDraft {
        key: PerformanceKey {
            bus_id: BusId::new(bus),
            route_id: RouteId::new(route),
            week_start,
        },
        estimated_passengers: estimated,
        actual_passengers: actual,
        total_kms: kms,
    };
    WeeklyPerformance::compute(
        draft,
        &create_test_bus(bus, dec!(10)),
        &create_test_route(route, dec!(40)),
        &create_test_pricing(),
    )
    .unwrap()
}
