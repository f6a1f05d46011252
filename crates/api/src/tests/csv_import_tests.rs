// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use busops_domain::{Bus, PreInform, PreInformStatus};
use rust_decimal_macros::dec;
use time::macros::{date, time};

use crate::tests::helpers::{TODAY, create_test_persistence, seed_fleet};
use crate::{ApiError, CsvImportRowStatus, ImportCsvResponse, ImportKind, import_csv};

#[test]
fn test_import_kind_from_str() {
    assert_eq!("buses".parse::<ImportKind>().unwrap(), ImportKind::Buses);
    assert_eq!("Routes".parse::<ImportKind>().unwrap(), ImportKind::Routes);
    assert_eq!(
        "pre-informs".parse::<ImportKind>().unwrap(),
        ImportKind::PreInforms
    );
    assert!(matches!(
        "drivers".parse::<ImportKind>(),
        Err(ApiError::InvalidInput { .. })
    ));
}

#[test]
fn test_import_buses_with_loose_headers() {
    let mut persistence = create_test_persistence();
    let csv: &str = "Number Plate, Capacity ,MILEAGE_KM_PER_LITER\n\
                     KA-01-0001,50,4.5\n\
                     KA-01-0002,abc,5\n";

    let response: ImportCsvResponse =
        import_csv(&mut persistence, ImportKind::Buses, csv, TODAY).unwrap();

    assert_eq!(response.kind, "buses");
    assert_eq!(response.total_rows, 2);
    assert_eq!(response.imported_count, 1);
    assert_eq!(response.failed_count, 1);
    assert_eq!(response.rows[0].status, CsvImportRowStatus::Imported);
    assert!(response.rows[0].record_id.is_some());
    assert_eq!(response.rows[1].row_number, 2);
    assert!(response.rows[1].errors[0].contains("capacity"));

    let buses: Vec<Bus> = persistence.list_buses().unwrap();
    assert_eq!(buses.len(), 1);
    assert_eq!(buses[0].mileage_km_per_liter, dec!(4.5));
}

#[test]
fn test_import_rejects_zero_mileage_and_duplicate_plate() {
    let mut persistence = create_test_persistence();
    seed_fleet(&mut persistence);
    let csv: &str = "number_plate,capacity,mileage_km_per_liter\n\
                     KA-01-0009,50,0\n\
                     KA-01-0001,50,8\n";

    let response: ImportCsvResponse =
        import_csv(&mut persistence, ImportKind::Buses, csv, TODAY).unwrap();

    assert_eq!(response.imported_count, 0);
    assert_eq!(response.failed_count, 2);
    assert!(response.rows[0].errors[0].contains("greater than 0"));
    assert!(!response.rows[1].errors.is_empty());
    assert_eq!(persistence.list_buses().unwrap().len(), 1);
}

#[test]
fn test_import_missing_headers_is_rejected() {
    let mut persistence = create_test_persistence();
    let csv: &str = "route_number,name\n12A,Central\n";

    let result = import_csv(&mut persistence, ImportKind::Routes, csv, TODAY);

    match result {
        Err(ApiError::InvalidInput { field, message }) => {
            assert_eq!(field, "csv");
            assert!(message.contains("total_distance_km"));
        }
        other => panic!("expected invalid input, got {other:?}"),
    }
}

#[test]
fn test_import_routes_rejects_negative_distance() {
    let mut persistence = create_test_persistence();
    let csv: &str = "route_number,name,total_distance_km\n\
                     12A,Central - Airport,40\n\
                     14B,Harbour Loop,-3\n";

    let response: ImportCsvResponse =
        import_csv(&mut persistence, ImportKind::Routes, csv, TODAY).unwrap();

    assert_eq!(response.imported_count, 1);
    assert!(response.rows[1].errors[0].contains("must not be negative"));
}

#[test]
fn test_import_assignments_with_unknown_bus() {
    let mut persistence = create_test_persistence();
    let (bus_id, route_id) = seed_fleet(&mut persistence);
    let csv: String = format!(
        "bus_id,route_id,service_date\n{bus},{route},2026-03-02\n999,{route},2026-03-03\n{bus},{route},03/04/2026\n",
        bus = bus_id.value(),
        route = route_id.value(),
    );

    let response: ImportCsvResponse =
        import_csv(&mut persistence, ImportKind::Assignments, &csv, TODAY).unwrap();

    assert_eq!(response.imported_count, 1);
    assert_eq!(response.failed_count, 2);
    assert_eq!(response.rows[1].status, CsvImportRowStatus::Failed);
    assert!(response.rows[2].errors[0].starts_with("service_date"));
    assert_eq!(
        persistence
            .list_assignments_between(date!(2026 - 03 - 02), date!(2026 - 03 - 08))
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_import_pre_informs_applies_defaults() {
    let mut persistence = create_test_persistence();
    let (_, route_id) = seed_fleet(&mut persistence);
    let csv: String = format!(
        "route_id,date_of_travel,desired_time,boarding_stop,passenger_count,status,submitted_on\n\
         {route},2026-03-12,07:15,Market,3,,\n\
         {route},2026-03-13,18:00:00,Depot,1,cancelled,2026-03-01\n\
         {route},2026-03-13,18:00,Depot,1,lost,\n",
        route = route_id.value(),
    );

    let response: ImportCsvResponse =
        import_csv(&mut persistence, ImportKind::PreInforms, &csv, TODAY).unwrap();

    assert_eq!(response.imported_count, 2);
    assert!(response.rows[2].errors[0].starts_with("status"));

    let stored: Vec<PreInform> = persistence
        .list_pre_informs_between(date!(2026 - 03 - 12), date!(2026 - 03 - 13))
        .unwrap();
    assert_eq!(stored.len(), 2);
    let first: &PreInform = stored
        .iter()
        .find(|p| p.boarding_stop == "Market")
        .unwrap();
    assert_eq!(first.status, PreInformStatus::Pending);
    assert_eq!(first.submitted_on, TODAY);
    assert_eq!(first.desired_time, time!(07:15));
    let second: &PreInform = stored.iter().find(|p| p.boarding_stop == "Depot").unwrap();
    assert_eq!(second.status, PreInformStatus::Cancelled);
    assert_eq!(second.submitted_on, date!(2026 - 03 - 01));
}

#[test]
fn test_import_row_with_wrong_field_count_fails_alone() {
    let mut persistence = create_test_persistence();
    let csv: &str = "route_number,name,total_distance_km\n\
                     12A,Central - Airport\n\
                     14B,Harbour Loop,12.5\n";

    let response: ImportCsvResponse =
        import_csv(&mut persistence, ImportKind::Routes, csv, TODAY).unwrap();

    assert_eq!(response.total_rows, 2);
    assert_eq!(response.imported_count, 1);
    assert!(response.rows[0].errors[0].contains("CSV parse error"));
}
