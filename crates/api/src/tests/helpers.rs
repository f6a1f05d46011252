// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use busops_domain::{BusId, PreInform, PreInformStatus, PricingConfig, RouteId};
use busops_persistence::SqlitePersistence;
use rust_decimal_macros::dec;
use time::Date;
use time::macros::{date, time};

/// A Wednesday; the last complete week is 2026-03-02 to 2026-03-08.
pub const TODAY: Date = date!(2026 - 03 - 11);

/// Monday of the week before `TODAY`.
pub const LAST_WEEK: Date = date!(2026 - 03 - 02);

/// Ticket 5 per km, fuel 100 per liter.
pub fn create_test_pricing() -> PricingConfig {
    PricingConfig::new(dec!(5), dec!(100)).expect("valid pricing")
}

pub fn create_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("in-memory database")
}

/// Seeds bus "KA-01-0001" (10 km/l) and route "12A" (40 km).
///
/// With the test pricing, revenue is 100 per passenger and cost is 10 per km.
pub fn seed_fleet(persistence: &mut SqlitePersistence) -> (BusId, RouteId) {
    let bus_id: BusId = persistence
        .create_bus("KA-01-0001", 50, dec!(10))
        .expect("bus created");
    let route_id: RouteId = persistence
        .create_route("12A", "Central - Airport", dec!(40))
        .expect("route created");
    (bus_id, route_id)
}

/// Assigns the bus to the route on Monday to Wednesday of last week (120 km).
pub fn seed_three_days(persistence: &mut SqlitePersistence, bus_id: BusId, route_id: RouteId) {
    for day in [
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 03),
        date!(2026 - 03 - 04),
    ] {
        persistence
            .create_assignment(bus_id, route_id, day)
            .expect("assignment created");
    }
}

pub fn add_pre_inform(
    persistence: &mut SqlitePersistence,
    route_id: RouteId,
    day: Date,
    passengers: u32,
) {
    let pre_inform: PreInform = PreInform {
        pre_inform_id: None,
        route_id,
        date_of_travel: day,
        desired_time: time!(09:45),
        boarding_stop: String::from("Market"),
        passenger_count: passengers,
        status: PreInformStatus::Pending,
        submitted_on: day,
    };
    persistence
        .create_pre_inform(&pre_inform)
        .expect("pre-inform created");
}

/// Seeds one bus on one route for three days with five estimated passengers
/// inside last week and ten outside it.
///
/// The generated record has revenue 500, cost 1200 and profit -700.
pub fn seed_scheduled_week(persistence: &mut SqlitePersistence) -> (BusId, RouteId) {
    let (bus_id, route_id) = seed_fleet(persistence);
    seed_three_days(persistence, bus_id, route_id);
    add_pre_inform(persistence, route_id, date!(2026 - 03 - 03), 2);
    add_pre_inform(persistence, route_id, date!(2026 - 03 - 05), 3);
    add_pre_inform(persistence, route_id, date!(2026 - 03 - 09), 10);
    (bus_id, route_id)
}
