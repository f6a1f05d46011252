// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Time};

/// Canonical identifier of a bus.
///
/// Grouping and ranking always key on this identifier, never on the
/// number plate, so two buses sharing a display value stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BusId(i64);

impl BusId {
    /// Creates a new `BusId` from its storage identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the storage identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for BusId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical identifier of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RouteId(i64);

impl RouteId {
    /// Creates a new `RouteId` from its storage identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the storage identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RouteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bus in the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bus {
    /// The canonical identifier.
    pub bus_id: BusId,
    /// The registration plate (display only).
    pub number_plate: String,
    /// Seated and standing capacity.
    pub capacity: u32,
    /// Kilometers travelled per liter of fuel.
    pub mileage_km_per_liter: Decimal,
}

impl Bus {
    /// Returns the fuel mileage if it can be used for cost derivation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFuelMileage` if the mileage is zero or negative.
    pub fn usable_mileage(&self) -> Result<Decimal, DomainError> {
        if self.mileage_km_per_liter <= Decimal::ZERO {
            return Err(DomainError::InvalidFuelMileage {
                bus_id: Some(self.bus_id),
                mileage: self.mileage_km_per_liter,
            });
        }
        Ok(self.mileage_km_per_liter)
    }
}

/// A route in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// The canonical identifier.
    pub route_id: RouteId,
    /// The public route number (display only).
    pub route_number: String,
    /// The route name.
    pub name: String,
    /// Full length of the route in kilometers.
    pub total_distance_km: Decimal,
}

/// A single day's assignment of a bus to a route.
///
/// The route distance is resolved by the storage layer when the
/// assignment is read, so aggregation never needs a route lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusAssignment {
    /// The storage identifier, if persisted.
    pub assignment_id: Option<i64>,
    /// The assigned bus.
    pub bus_id: BusId,
    /// The assigned route.
    pub route_id: RouteId,
    /// The service day.
    pub service_date: Date,
    /// The route's total distance at read time.
    pub route_distance_km: Decimal,
}

/// Lifecycle state of a pre-inform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PreInformStatus {
    /// Submitted and awaiting the controller.
    #[default]
    Pending,
    /// Seen by the controller.
    Noted,
    /// The journey took place.
    Completed,
    /// Withdrawn by the passenger.
    Cancelled,
}

impl PreInformStatus {
    /// Converts this status to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Noted => "noted",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for PreInformStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "noted" => Ok(Self::Noted),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidPreInformStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for PreInformStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A passenger's advance declaration of intended travel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreInform {
    /// The storage identifier, if persisted.
    pub pre_inform_id: Option<i64>,
    /// The route the passenger intends to take.
    pub route_id: RouteId,
    /// The planned travel day.
    pub date_of_travel: Date,
    /// The preferred boarding time.
    pub desired_time: Time,
    /// The stop where the passenger boards.
    pub boarding_stop: String,
    /// Number of people travelling together.
    pub passenger_count: u32,
    /// Current lifecycle state.
    pub status: PreInformStatus,
    /// The day the pre-inform was submitted.
    pub submitted_on: Date,
}
