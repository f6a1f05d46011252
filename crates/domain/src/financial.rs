// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Share of a route's full length that an average passenger travels.
pub const AVERAGE_JOURNEY_FRACTION: Decimal = dec!(0.5);

/// Number of decimal places kept on stored monetary values.
pub const MONEY_SCALE: u32 = 2;

/// Process-wide prices used to derive revenue and cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    ticket_price_per_km: Decimal,
    fuel_price_per_liter: Decimal,
}

impl PricingConfig {
    /// Creates a validated pricing configuration.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if either price is negative.
    pub fn new(
        ticket_price_per_km: Decimal,
        fuel_price_per_liter: Decimal,
    ) -> Result<Self, DomainError> {
        if ticket_price_per_km < Decimal::ZERO {
            return Err(DomainError::InvalidPrice {
                field: "ticket_price_per_km",
                value: ticket_price_per_km,
            });
        }
        if fuel_price_per_liter < Decimal::ZERO {
            return Err(DomainError::InvalidPrice {
                field: "fuel_price_per_liter",
                value: fuel_price_per_liter,
            });
        }
        Ok(Self {
            ticket_price_per_km,
            fuel_price_per_liter,
        })
    }

    /// Fare charged per kilometer travelled.
    #[must_use]
    pub const fn ticket_price_per_km(&self) -> Decimal {
        self.ticket_price_per_km
    }

    /// Fuel price per liter.
    #[must_use]
    pub const fn fuel_price_per_liter(&self) -> Decimal {
        self.fuel_price_per_liter
    }
}

/// Inputs to the financial derivation for one bus on one route in one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinancialInputs {
    /// Kilometers driven during the week.
    pub total_kms: Decimal,
    /// Passengers estimated from pre-informs.
    pub estimated_passengers: u32,
    /// Passengers counted from ticket sales.
    pub actual_passengers: u32,
    /// Full length of the route.
    pub route_total_distance_km: Decimal,
    /// Kilometers per liter of the bus.
    pub fuel_mileage_km_per_liter: Decimal,
}

impl FinancialInputs {
    /// Passenger count used for revenue: actuals when present, otherwise estimates.
    #[must_use]
    pub const fn passengers_for_revenue(&self) -> u32 {
        if self.actual_passengers > 0 {
            self.actual_passengers
        } else {
            self.estimated_passengers
        }
    }
}

/// Revenue, cost and profit of a weekly performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialFigures {
    /// Ticket revenue.
    pub revenue: Decimal,
    /// Fuel cost.
    pub cost: Decimal,
    /// Revenue minus cost.
    pub profit: Decimal,
}

impl FinancialFigures {
    /// Rounds revenue and cost to the stored scale and re-derives profit.
    ///
    /// Profit is computed from the rounded values so that
    /// `profit == revenue - cost` holds exactly on what gets stored.
    #[must_use]
    pub fn rounded(&self) -> Self {
        let revenue: Decimal = self.revenue.round_dp(MONEY_SCALE);
        let cost: Decimal = self.cost.round_dp(MONEY_SCALE);
        Self {
            revenue,
            cost,
            profit: revenue - cost,
        }
    }
}

/// Derives revenue, cost and profit.
///
/// - revenue = passengers × (route distance × 0.5) × ticket price per km
/// - cost = (total kms ÷ mileage) × fuel price per liter
/// - profit = revenue − cost
///
/// Values are returned at full precision; rounding happens when a record is built.
///
/// # Errors
///
/// Returns an error if the mileage is not positive, a distance is negative,
/// or an intermediate value overflows.
pub fn compute_financials(
    inputs: &FinancialInputs,
    pricing: &PricingConfig,
) -> Result<FinancialFigures, DomainError> {
    if inputs.fuel_mileage_km_per_liter <= Decimal::ZERO {
        return Err(DomainError::InvalidFuelMileage {
            bus_id: None,
            mileage: inputs.fuel_mileage_km_per_liter,
        });
    }
    if inputs.total_kms < Decimal::ZERO {
        return Err(DomainError::InvalidDistance {
            field: "total_kms",
            value: inputs.total_kms,
        });
    }
    if inputs.route_total_distance_km < Decimal::ZERO {
        return Err(DomainError::InvalidDistance {
            field: "route_total_distance_km",
            value: inputs.route_total_distance_km,
        });
    }

    let passengers: Decimal = Decimal::from(inputs.passengers_for_revenue());
    let average_journey_km: Decimal = inputs
        .route_total_distance_km
        .checked_mul(AVERAGE_JOURNEY_FRACTION)
        .ok_or(DomainError::ArithmeticOverflow {
            operation: "average journey distance",
        })?;
    let revenue: Decimal = passengers
        .checked_mul(average_journey_km)
        .and_then(|v| v.checked_mul(pricing.ticket_price_per_km()))
        .ok_or(DomainError::ArithmeticOverflow {
            operation: "revenue",
        })?;

    let fuel_used_liters: Decimal = inputs
        .total_kms
        .checked_div(inputs.fuel_mileage_km_per_liter)
        .ok_or(DomainError::ArithmeticOverflow {
            operation: "fuel used",
        })?;
    let cost: Decimal = fuel_used_liters
        .checked_mul(pricing.fuel_price_per_liter())
        .ok_or(DomainError::ArithmeticOverflow { operation: "cost" })?;

    let profit: Decimal = revenue
        .checked_sub(cost)
        .ok_or(DomainError::ArithmeticOverflow {
            operation: "profit",
        })?;

    Ok(FinancialFigures {
        revenue,
        cost,
        profit,
    })
}
