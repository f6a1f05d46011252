// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The weekly performance record and its derived fields.
//!
//! A `WeeklyPerformance` can only be obtained by deriving it from its inputs
//! (`compute`, `with_estimates`, `with_actual_passengers`) or by rehydrating a
//! stored row (`restore`), which re-checks the derived-field invariants.
//! There is no way to assign passenger totals or financial figures directly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::error::DomainError;
use crate::financial::{
    FinancialFigures, FinancialInputs, MONEY_SCALE, PricingConfig, compute_financials,
};
use crate::types::{Bus, BusId, Route, RouteId};

/// Identity of a weekly performance: one record per bus, route and week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PerformanceKey {
    /// The bus.
    pub bus_id: BusId,
    /// The route.
    pub route_id: RouteId,
    /// Monday of the reported week.
    pub week_start: Date,
}

/// Caller-supplied inputs of a weekly performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceDraft {
    /// The record identity.
    pub key: PerformanceKey,
    /// Passengers estimated from pre-informs.
    pub estimated_passengers: u32,
    /// Passengers counted from ticket sales.
    pub actual_passengers: u32,
    /// Kilometers driven during the week.
    pub total_kms: Decimal,
}

/// Profitability classification of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfitStatus {
    /// Profit is above zero.
    Profitable,
    /// Profit is below zero.
    Loss,
    /// Profit is exactly zero.
    BreakEven,
}

impl ProfitStatus {
    /// Returns the display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Profitable => "profitable",
            Self::Loss => "loss",
            Self::BreakEven => "break_even",
        }
    }
}

/// Passenger, distance and financial figures for one bus on one route in one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPerformance {
    performance_id: Option<i64>,
    key: PerformanceKey,
    estimated_passengers: u32,
    actual_passengers: u32,
    total_passengers: u32,
    total_kms: Decimal,
    figures: FinancialFigures,
}

impl WeeklyPerformance {
    /// Derives a complete record from its inputs.
    ///
    /// Total passengers and all financial figures are computed here; revenue
    /// and cost are rounded to two decimal places and profit is taken from the
    /// rounded values.
    ///
    /// # Errors
    ///
    /// Returns an error if the bus or route does not match the key, the bus
    /// mileage is not positive, the distance is negative, or a value overflows.
    pub fn compute(
        draft: PerformanceDraft,
        bus: &Bus,
        route: &Route,
        pricing: &PricingConfig,
    ) -> Result<Self, DomainError> {
        if bus.bus_id != draft.key.bus_id {
            return Err(DomainError::EntityMismatch {
                reason: format!(
                    "record is for bus {} but bus {} was supplied",
                    draft.key.bus_id, bus.bus_id
                ),
            });
        }
        if route.route_id != draft.key.route_id {
            return Err(DomainError::EntityMismatch {
                reason: format!(
                    "record is for route {} but route {} was supplied",
                    draft.key.route_id, route.route_id
                ),
            });
        }

        let mileage: Decimal = bus.usable_mileage()?;
        let total_passengers: u32 = draft
            .estimated_passengers
            .checked_add(draft.actual_passengers)
            .ok_or(DomainError::PassengerCountOverflow)?;

        let total_kms: Decimal = draft.total_kms.round_dp(MONEY_SCALE);
        let inputs: FinancialInputs = FinancialInputs {
            total_kms,
            estimated_passengers: draft.estimated_passengers,
            actual_passengers: draft.actual_passengers,
            route_total_distance_km: route.total_distance_km,
            fuel_mileage_km_per_liter: mileage,
        };
        let figures: FinancialFigures = compute_financials(&inputs, pricing)?.rounded();

        Ok(Self {
            performance_id: None,
            key: draft.key,
            estimated_passengers: draft.estimated_passengers,
            actual_passengers: draft.actual_passengers,
            total_passengers,
            total_kms,
            figures,
        })
    }

    /// Rehydrates a stored record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CorruptPerformanceRecord` if the stored totals
    /// do not satisfy the derived-field invariants.
    pub fn restore(
        performance_id: i64,
        draft: PerformanceDraft,
        total_passengers: u32,
        figures: FinancialFigures,
    ) -> Result<Self, DomainError> {
        let expected_passengers: Option<u32> = draft
            .estimated_passengers
            .checked_add(draft.actual_passengers);
        if expected_passengers != Some(total_passengers) {
            return Err(DomainError::CorruptPerformanceRecord {
                performance_id,
                reason: format!(
                    "total passengers {total_passengers} != estimated {} + actual {}",
                    draft.estimated_passengers, draft.actual_passengers
                ),
            });
        }
        if figures.revenue.checked_sub(figures.cost) != Some(figures.profit) {
            return Err(DomainError::CorruptPerformanceRecord {
                performance_id,
                reason: format!(
                    "profit {} != revenue {} - cost {}",
                    figures.profit, figures.revenue, figures.cost
                ),
            });
        }

        Ok(Self {
            performance_id: Some(performance_id),
            key: draft.key,
            estimated_passengers: draft.estimated_passengers,
            actual_passengers: draft.actual_passengers,
            total_passengers,
            total_kms: draft.total_kms,
            figures,
        })
    }

    /// Returns a re-derived copy with fresh estimates and distance.
    ///
    /// Operator-entered actual passengers are preserved.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`WeeklyPerformance::compute`].
    pub fn with_estimates(
        &self,
        estimated_passengers: u32,
        total_kms: Decimal,
        bus: &Bus,
        route: &Route,
        pricing: &PricingConfig,
    ) -> Result<Self, DomainError> {
        let draft: PerformanceDraft = PerformanceDraft {
            key: self.key,
            estimated_passengers,
            actual_passengers: self.actual_passengers,
            total_kms,
        };
        let mut next: Self = Self::compute(draft, bus, route, pricing)?;
        next.performance_id = self.performance_id;
        Ok(next)
    }

    /// Returns a re-derived copy with a new actual passenger count.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`WeeklyPerformance::compute`].
    pub fn with_actual_passengers(
        &self,
        actual_passengers: u32,
        bus: &Bus,
        route: &Route,
        pricing: &PricingConfig,
    ) -> Result<Self, DomainError> {
        let draft: PerformanceDraft = PerformanceDraft {
            key: self.key,
            estimated_passengers: self.estimated_passengers,
            actual_passengers,
            total_kms: self.total_kms,
        };
        let mut next: Self = Self::compute(draft, bus, route, pricing)?;
        next.performance_id = self.performance_id;
        Ok(next)
    }

    /// Returns a copy carrying the identifier assigned by storage.
    #[must_use]
    pub fn with_id(mut self, performance_id: i64) -> Self {
        self.performance_id = Some(performance_id);
        self
    }

    /// The storage identifier, if persisted.
    #[must_use]
    pub const fn performance_id(&self) -> Option<i64> {
        self.performance_id
    }

    /// The record identity.
    #[must_use]
    pub const fn key(&self) -> PerformanceKey {
        self.key
    }

    /// The bus.
    #[must_use]
    pub const fn bus_id(&self) -> BusId {
        self.key.bus_id
    }

    /// The route.
    #[must_use]
    pub const fn route_id(&self) -> RouteId {
        self.key.route_id
    }

    /// Monday of the reported week.
    #[must_use]
    pub const fn week_start(&self) -> Date {
        self.key.week_start
    }

    /// Passengers estimated from pre-informs.
    #[must_use]
    pub const fn estimated_passengers(&self) -> u32 {
        self.estimated_passengers
    }

    /// Passengers counted from ticket sales.
    #[must_use]
    pub const fn actual_passengers(&self) -> u32 {
        self.actual_passengers
    }

    /// Estimated plus actual passengers.
    #[must_use]
    pub const fn total_passengers(&self) -> u32 {
        self.total_passengers
    }

    /// Kilometers driven during the week.
    #[must_use]
    pub const fn total_kms(&self) -> Decimal {
        self.total_kms
    }

    /// The derived financial figures.
    #[must_use]
    pub const fn figures(&self) -> FinancialFigures {
        self.figures
    }

    /// Ticket revenue.
    #[must_use]
    pub const fn total_revenue(&self) -> Decimal {
        self.figures.revenue
    }

    /// Fuel cost.
    #[must_use]
    pub const fn total_cost(&self) -> Decimal {
        self.figures.cost
    }

    /// Revenue minus cost.
    #[must_use]
    pub const fn total_profit(&self) -> Decimal {
        self.figures.profit
    }

    /// Profit per kilometer, or zero when no distance was driven.
    #[must_use]
    pub fn profit_per_km(&self) -> Decimal {
        ratio(self.figures.profit, self.total_kms)
    }

    /// Revenue per passenger, or zero when there were no passengers.
    #[must_use]
    pub fn revenue_per_passenger(&self) -> Decimal {
        ratio(self.figures.revenue, Decimal::from(self.total_passengers))
    }

    /// Classifies the record by the sign of its profit.
    #[must_use]
    pub fn profit_status(&self) -> ProfitStatus {
        if self.figures.profit > Decimal::ZERO {
            ProfitStatus::Profitable
        } else if self.figures.profit < Decimal::ZERO {
            ProfitStatus::Loss
        } else {
            ProfitStatus::BreakEven
        }
    }
}

/// Divides and rounds to two places, yielding zero for a zero divisor.
pub(crate) fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    exact_ratio(numerator, denominator).round_dp(MONEY_SCALE)
}

/// Divides without rounding, yielding zero for a zero divisor.
///
/// A quotient beyond the representable range saturates at `Decimal::MAX` or
/// `Decimal::MIN` according to its sign.
pub(crate) fn exact_ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or_else(|| {
        if numerator.is_sign_negative() == denominator.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}
