// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::helpers::create_test_pricing;
use crate::{DomainError, FinancialFigures, FinancialInputs, PricingConfig, compute_financials};

fn create_inputs(estimated: u32, actual: u32) -> FinancialInputs {
    FinancialInputs {
        total_kms: dec!(200),
        estimated_passengers: estimated,
        actual_passengers: actual,
        route_total_distance_km: dec!(40),
        fuel_mileage_km_per_liter: dec!(10),
    }
}

#[test]
fn test_actual_passengers_override_estimates() {
    let figures: FinancialFigures =
        compute_financials(&create_inputs(30, 50), &create_test_pricing()).unwrap();

    assert_eq!(figures.cost, dec!(2000));
    assert_eq!(figures.revenue, dec!(5000));
    assert_eq!(figures.profit, dec!(3000));
}

#[test]
fn test_estimates_used_when_no_actuals() {
    let figures: FinancialFigures =
        compute_financials(&create_inputs(30, 0), &create_test_pricing()).unwrap();

    assert_eq!(figures.revenue, dec!(3000));
    assert_eq!(figures.cost, dec!(2000));
    assert_eq!(figures.profit, dec!(1000));
}

#[test]
fn test_no_passengers_yields_loss_of_fuel_cost() {
    let figures: FinancialFigures =
        compute_financials(&create_inputs(0, 0), &create_test_pricing()).unwrap();

    assert_eq!(figures.revenue, Decimal::ZERO);
    assert_eq!(figures.profit, dec!(-2000));
}

#[test]
fn test_zero_mileage_is_rejected() {
    let mut inputs: FinancialInputs = create_inputs(30, 0);
    inputs.fuel_mileage_km_per_liter = Decimal::ZERO;

    let result: Result<FinancialFigures, DomainError> =
        compute_financials(&inputs, &create_test_pricing());
    assert!(matches!(
        result,
        Err(DomainError::InvalidFuelMileage { bus_id: None, .. })
    ));
}

#[test]
fn test_negative_distance_is_rejected() {
    let mut inputs: FinancialInputs = create_inputs(30, 0);
    inputs.total_kms = dec!(-1);

    let result: Result<FinancialFigures, DomainError> =
        compute_financials(&inputs, &create_test_pricing());
    assert!(matches!(
        result,
        Err(DomainError::InvalidDistance {
            field: "total_kms",
            ..
        })
    ));
}

#[test]
fn test_results_keep_full_precision_until_rounded() {
    let mut inputs: FinancialInputs = create_inputs(0, 0);
    inputs.total_kms = dec!(100);
    inputs.fuel_mileage_km_per_liter = dec!(3);

    let figures: FinancialFigures = compute_financials(&inputs, &create_test_pricing()).unwrap();
    assert!(figures.cost.scale() > 2);

    let rounded: FinancialFigures = figures.rounded();
    assert_eq!(rounded.cost, dec!(3333.33));
    assert_eq!(rounded.profit, rounded.revenue - rounded.cost);
}

#[test]
fn test_pricing_rejects_negative_values() {
    assert!(matches!(
        PricingConfig::new(dec!(-0.01), dec!(100)),
        Err(DomainError::InvalidPrice {
            field: "ticket_price_per_km",
            ..
        })
    ));
    assert!(matches!(
        PricingConfig::new(dec!(1), dec!(-5)),
        Err(DomainError::InvalidPrice {
            field: "fuel_price_per_liter",
            ..
        })
    ));
    assert!(PricingConfig::new(Decimal::ZERO, Decimal::ZERO).is_ok());
}
