// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::helpers::{
    WEEK_START, create_test_bus, create_test_performance, create_test_pricing, create_test_route,
};
use crate::{
    BusId, DomainError, FinancialFigures, PerformanceDraft, PerformanceKey, ProfitStatus, RouteId,
    WeeklyPerformance,
};

fn create_draft(estimated: u32, actual: u32, kms: Decimal) -> PerformanceDraft {
    PerformanceDraft {
        key: PerformanceKey {
            bus_id: BusId::new(1),
            route_id: RouteId::new(7),
            week_start: WEEK_START,
        },
        estimated_passengers: estimated,
        actual_passengers: actual,
        total_kms: kms,
    }
}

#[test]
fn test_compute_derives_totals_and_figures() {
    let record: WeeklyPerformance = create_test_performance(1, 7, WEEK_START, 30, 50, dec!(200));

    assert_eq!(record.total_passengers(), 80);
    assert_eq!(record.total_revenue(), dec!(5000));
    assert_eq!(record.total_cost(), dec!(2000));
    assert_eq!(record.total_profit(), dec!(3000));
    assert_eq!(record.performance_id(), None);
}

#[test]
fn test_compute_rounds_stored_values() {
    let bus = create_test_bus(1, dec!(3));
    let route = create_test_route(7, dec!(40));
    let record: WeeklyPerformance = WeeklyPerformance::compute(
        create_draft(0, 0, dec!(100.004)),
        &bus,
        &route,
        &create_test_pricing(),
    )
    .unwrap();

    assert_eq!(record.total_kms(), dec!(100.00));
    assert_eq!(record.total_cost(), dec!(3333.33));
    assert_eq!(
        record.total_profit(),
        record.total_revenue() - record.total_cost()
    );
}

#[test]
fn test_compute_rejects_mismatched_bus() {
    let result: Result<WeeklyPerformance, DomainError> = WeeklyPerformance::compute(
        create_draft(1, 1, dec!(10)),
        &create_test_bus(2, dec!(10)),
        &create_test_route(7, dec!(40)),
        &create_test_pricing(),
    );
    assert!(matches!(result, Err(DomainError::EntityMismatch { .. })));
}

#[test]
fn test_compute_rejects_zero_mileage_bus() {
    let result: Result<WeeklyPerformance, DomainError> = WeeklyPerformance::compute(
        create_draft(1, 1, dec!(10)),
        &create_test_bus(1, Decimal::ZERO),
        &create_test_route(7, dec!(40)),
        &create_test_pricing(),
    );
    assert!(matches!(
        result,
        Err(DomainError::InvalidFuelMileage {
            bus_id: Some(_),
            ..
        })
    ));
}

#[test]
fn test_with_estimates_preserves_actual_passengers_and_id() {
    let stored: WeeklyPerformance =
        create_test_performance(1, 7, WEEK_START, 30, 50, dec!(200)).with_id(42);

    let refreshed: WeeklyPerformance = stored
        .with_estimates(
            10,
            dec!(400),
            &create_test_bus(1, dec!(10)),
            &create_test_route(7, dec!(40)),
            &create_test_pricing(),
        )
        .unwrap();

    assert_eq!(refreshed.performance_id(), Some(42));
    assert_eq!(refreshed.actual_passengers(), 50);
    assert_eq!(refreshed.estimated_passengers(), 10);
    assert_eq!(refreshed.total_passengers(), 60);
    assert_eq!(refreshed.total_cost(), dec!(4000));
    assert_eq!(refreshed.total_revenue(), dec!(5000));
}

#[test]
fn test_with_actual_passengers_recomputes_revenue() {
    let stored: WeeklyPerformance = create_test_performance(1, 7, WEEK_START, 30, 0, dec!(200));
    assert_eq!(stored.total_revenue(), dec!(3000));

    let updated: WeeklyPerformance = stored
        .with_actual_passengers(
            50,
            &create_test_bus(1, dec!(10)),
            &create_test_route(7, dec!(40)),
            &create_test_pricing(),
        )
        .unwrap();

    assert_eq!(updated.total_revenue(), dec!(5000));
    assert_eq!(updated.total_passengers(), 80);
    assert_eq!(updated.total_kms(), stored.total_kms());
}

#[test]
fn test_restore_accepts_consistent_record() {
    let figures: FinancialFigures = FinancialFigures {
        revenue: dec!(5000.00),
        cost: dec!(2000.00),
        profit: dec!(3000.00),
    };
    let record: WeeklyPerformance =
        WeeklyPerformance::restore(9, create_draft(30, 50, dec!(200)), 80, figures).unwrap();

    assert_eq!(record.performance_id(), Some(9));
    assert_eq!(record.total_profit(), dec!(3000));
}

#[test]
fn test_restore_rejects_wrong_passenger_total() {
    let figures: FinancialFigures = FinancialFigures {
        revenue: dec!(5000),
        cost: dec!(2000),
        profit: dec!(3000),
    };
    let result: Result<WeeklyPerformance, DomainError> =
        WeeklyPerformance::restore(9, create_draft(30, 50, dec!(200)), 81, figures);
    assert!(matches!(
        result,
        Err(DomainError::CorruptPerformanceRecord {
            performance_id: 9,
            ..
        })
    ));
}

#[test]
fn test_restore_rejects_wrong_profit() {
    let figures: FinancialFigures = FinancialFigures {
        revenue: dec!(5000),
        cost: dec!(2000),
        profit: dec!(2999.99),
    };
    let result: Result<WeeklyPerformance, DomainError> =
        WeeklyPerformance::restore(9, create_draft(30, 50, dec!(200)), 80, figures);
    assert!(matches!(
        result,
        Err(DomainError::CorruptPerformanceRecord { .. })
    ));
}

#[test]
fn test_derived_ratios() {
    let record: WeeklyPerformance = create_test_performance(1, 7, WEEK_START, 30, 50, dec!(200));
    assert_eq!(record.profit_per_km(), dec!(15));
    assert_eq!(record.revenue_per_passenger(), dec!(62.5));
    assert_eq!(record.profit_status(), ProfitStatus::Profitable);
}

#[test]
fn test_derived_ratios_with_zero_divisors() {
    let record: WeeklyPerformance = create_test_performance(1, 7, WEEK_START, 0, 0, Decimal::ZERO);
    assert_eq!(record.profit_per_km(), Decimal::ZERO);
    assert_eq!(record.revenue_per_passenger(), Decimal::ZERO);
    assert_eq!(record.profit_status(), ProfitStatus::BreakEven);
}

#[test]
fn test_loss_status() {
    let record: WeeklyPerformance = create_test_performance(1, 7, WEEK_START, 0, 0, dec!(10));
    assert_eq!(record.profit_status(), ProfitStatus::Loss);
    assert_eq!(ProfitStatus::Loss.as_str(), "loss");
}
