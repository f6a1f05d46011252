// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

use super::helpers::create_test_bus;
use crate::{BusId, DomainError, PreInformStatus, RouteId};

#[test]
fn test_pre_inform_status_round_trip() {
    for status in [
        PreInformStatus::Pending,
        PreInformStatus::Noted,
        PreInformStatus::Completed,
        PreInformStatus::Cancelled,
    ] {
        assert_eq!(PreInformStatus::from_str(status.as_str()), Ok(status));
    }
}

#[test]
fn test_pre_inform_status_is_case_insensitive() {
    assert_eq!(
        PreInformStatus::from_str(" Noted "),
        Ok(PreInformStatus::Noted)
    );
    assert_eq!(PreInformStatus::default(), PreInformStatus::Pending);
}

#[test]
fn test_pre_inform_status_rejects_unknown() {
    assert_eq!(
        PreInformStatus::from_str("lost"),
        Err(DomainError::InvalidPreInformStatus(String::from("lost")))
    );
}

#[test]
fn test_usable_mileage() {
    assert_eq!(
        create_test_bus(1, dec!(4.5)).usable_mileage(),
        Ok(dec!(4.5))
    );
    assert_eq!(
        create_test_bus(2, Decimal::ZERO).usable_mileage(),
        Err(DomainError::InvalidFuelMileage {
            bus_id: Some(BusId::new(2)),
            mileage: Decimal::ZERO,
        })
    );
}

#[test]
fn test_identifiers_are_distinct_by_value() {
    assert_ne!(BusId::new(1), BusId::new(2));
    assert_eq!(RouteId::new(7).value(), 7);
    assert_eq!(BusId::new(3).to_string(), "3");
}
