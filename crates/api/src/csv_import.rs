// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk CSV import of buses, routes, assignments and pre-informs.
//!
//! Every row is parsed and stored on its own. A bad row is reported with
//! its errors and does not stop the rows after it.

use csv::StringRecord;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{info, warn};

use busops_domain::{
    BusId, DomainError, PreInform, PreInformStatus, RouteId, parse_date, parse_time,
};
use busops_persistence::SqlitePersistence;

use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::{CsvImportRowResult, CsvImportRowStatus, ImportCsvResponse};

/// The kind of record a CSV file carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `number_plate, capacity, mileage_km_per_liter`
    Buses,
    /// `route_number, name, total_distance_km`
    Routes,
    /// `bus_id, route_id, service_date`
    Assignments,
    /// `route_id, date_of_travel, desired_time, boarding_stop, passenger_count`
    /// plus optional `status` and `submitted_on`.
    PreInforms,
}

impl ImportKind {
    /// Returns the label used in URLs and responses.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buses => "buses",
            Self::Routes => "routes",
            Self::Assignments => "assignments",
            Self::PreInforms => "pre_informs",
        }
    }

    const fn required_headers(self) -> &'static [&'static str] {
        match self {
            Self::Buses => &["number_plate", "capacity", "mileage_km_per_liter"],
            Self::Routes => &["route_number", "name", "total_distance_km"],
            Self::Assignments => &["bus_id", "route_id", "service_date"],
            Self::PreInforms => &[
                "route_id",
                "date_of_travel",
                "desired_time",
                "boarding_stop",
                "passenger_count",
            ],
        }
    }
}

impl FromStr for ImportKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "buses" => Ok(Self::Buses),
            "routes" => Ok(Self::Routes),
            "assignments" => Ok(Self::Assignments),
            "pre_informs" => Ok(Self::PreInforms),
            _ => Err(ApiError::InvalidInput {
                field: String::from("kind"),
                message: format!(
                    "unknown import kind '{s}' (expected buses, routes, assignments or pre_informs)"
                ),
            }),
        }
    }
}

/// Normalizes a CSV header string for case-insensitive, whitespace-tolerant matching.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

fn validate_headers(
    headers: &StringRecord,
    kind: ImportKind,
) -> Result<HashMap<String, usize>, ApiError> {
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| (normalize_header(header), idx))
        .collect();

    let missing: Vec<&str> = kind
        .required_headers()
        .iter()
        .copied()
        .filter(|required| !header_map.contains_key(*required))
        .collect();

    if !missing.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("csv"),
            message: format!("Missing required headers: {}", missing.join(", ")),
        });
    }

    Ok(header_map)
}

/// Looks up row fields by normalized header name and collects parse errors.
struct RowReader<'a> {
    record: &'a StringRecord,
    header_map: &'a HashMap<String, usize>,
    errors: Vec<String>,
}

impl<'a> RowReader<'a> {
    const fn new(record: &'a StringRecord, header_map: &'a HashMap<String, usize>) -> Self {
        Self {
            record,
            header_map,
            errors: Vec::new(),
        }
    }

    fn optional(&self, name: &str) -> Option<String> {
        self.header_map
            .get(name)
            .and_then(|&idx| self.record.get(idx))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn required(&mut self, name: &str) -> Option<String> {
        let value: Option<String> = self.optional(name);
        if value.is_none() {
            self.errors
                .push(format!("{name}: required field is missing or empty"));
        }
        value
    }

    fn parsed<T: FromStr>(&mut self, name: &str) -> Option<T> {
        let raw: String = self.required(name)?;
        raw.parse::<T>().map_or_else(
            |_| {
                self.errors.push(format!("{name}: invalid value '{raw}'"));
                None
            },
            Some,
        )
    }

    fn decimal(&mut self, name: &str) -> Option<Decimal> {
        let value: Decimal = self.parsed(name)?;
        if value.is_sign_negative() {
            self.errors
                .push(format!("{name}: {value} must not be negative"));
            return None;
        }
        Some(value)
    }

    fn with_domain<T>(&mut self, name: &str, result: Result<T, DomainError>) -> Option<T> {
        result.map_or_else(
            |e| {
                self.errors.push(format!("{name}: {e}"));
                None
            },
            Some,
        )
    }

    fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

/// Imports `content` as records of `kind`.
///
/// Dates are `YYYY-MM-DD`, times `HH:MM` or `HH:MM:SS`. A pre-inform
/// without `status` is pending; without `submitted_on` it is stamped with
/// `today`.
///
/// # Errors
///
/// Returns an error if the CSV is malformed or required headers are
/// missing. Row-level failures are reported in the response.
pub fn import_csv(
    persistence: &mut SqlitePersistence,
    kind: ImportKind,
    content: &str,
    today: time::Date,
) -> Result<ImportCsvResponse, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(content.as_bytes());

    let headers: StringRecord = reader
        .headers()
        .map_err(|e| ApiError::InvalidInput {
            field: String::from("csv"),
            message: format!("Failed to read CSV headers: {e}"),
        })?
        .clone();
    let header_map: HashMap<String, usize> = validate_headers(&headers, kind)?;

    let mut rows: Vec<CsvImportRowResult> = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row_number: usize = idx + 1;
        let row: CsvImportRowResult = match result {
            Ok(record) => import_row(persistence, kind, &record, &header_map, today, row_number),
            Err(e) => CsvImportRowResult {
                row_number,
                status: CsvImportRowStatus::Failed,
                record_id: None,
                errors: vec![format!("CSV parse error: {e}")],
            },
        };
        rows.push(row);
    }

    let imported_count: usize = rows
        .iter()
        .filter(|r| r.status == CsvImportRowStatus::Imported)
        .count();
    let failed_count: usize = rows.len() - imported_count;

    if failed_count > 0 {
        warn!(
            kind = kind.as_str(),
            imported_count, failed_count, "CSV import finished with rejected rows"
        );
    } else {
        info!(kind = kind.as_str(), imported_count, "CSV import finished");
    }

    Ok(ImportCsvResponse {
        kind: String::from(kind.as_str()),
        total_rows: rows.len(),
        imported_count,
        failed_count,
        rows,
    })
}

fn import_row(
    persistence: &mut SqlitePersistence,
    kind: ImportKind,
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    today: time::Date,
    row_number: usize,
) -> CsvImportRowResult {
    let mut row: RowReader<'_> = RowReader::new(record, header_map);

    let stored: Option<Result<i64, ApiError>> = match kind {
        ImportKind::Buses => import_bus(persistence, &mut row),
        ImportKind::Routes => import_route(persistence, &mut row),
        ImportKind::Assignments => import_assignment(persistence, &mut row),
        ImportKind::PreInforms => import_pre_inform(persistence, &mut row, today),
    };

    let mut errors: Vec<String> = row.into_errors();
    let record_id: Option<i64> = match stored {
        Some(Ok(id)) if errors.is_empty() => Some(id),
        Some(Ok(_)) | None => None,
        Some(Err(e)) => {
            errors.push(e.to_string());
            None
        }
    };

    CsvImportRowResult {
        row_number,
        status: if record_id.is_some() {
            CsvImportRowStatus::Imported
        } else {
            CsvImportRowStatus::Failed
        },
        record_id,
        errors,
    }
}

// Each importer returns `None` when the row did not parse; the reader
// already holds the reasons.

fn import_bus(
    persistence: &mut SqlitePersistence,
    row: &mut RowReader<'_>,
) -> Option<Result<i64, ApiError>> {
    let number_plate: Option<String> = row.required("number_plate");
    let capacity: Option<u32> = row.parsed("capacity");
    let mileage: Option<Decimal> = row.decimal("mileage_km_per_liter");
    if mileage.is_some_and(|m| m.is_zero()) {
        row.errors.push(String::from(
            "mileage_km_per_liter: must be greater than 0",
        ));
        return None;
    }

    let (number_plate, capacity, mileage) = (number_plate?, capacity?, mileage?);
    Some(
        persistence
            .create_bus(&number_plate, capacity, mileage)
            .map(|id| id.value())
            .map_err(translate_persistence_error),
    )
}

fn import_route(
    persistence: &mut SqlitePersistence,
    row: &mut RowReader<'_>,
) -> Option<Result<i64, ApiError>> {
    let route_number: Option<String> = row.required("route_number");
    let name: Option<String> = row.required("name");
    let distance: Option<Decimal> = row.decimal("total_distance_km");

    let (route_number, name, distance) = (route_number?, name?, distance?);
    Some(
        persistence
            .create_route(&route_number, &name, distance)
            .map(|id| id.value())
            .map_err(translate_persistence_error),
    )
}

fn import_assignment(
    persistence: &mut SqlitePersistence,
    row: &mut RowReader<'_>,
) -> Option<Result<i64, ApiError>> {
    let bus_id: Option<i64> = row.parsed("bus_id");
    let route_id: Option<i64> = row.parsed("route_id");
    let service_date: Option<time::Date> = row
        .required("service_date")
        .and_then(|raw| row.with_domain("service_date", parse_date(&raw)));

    let (bus_id, route_id, service_date) = (bus_id?, route_id?, service_date?);
    Some(
        persistence
            .create_assignment(BusId::new(bus_id), RouteId::new(route_id), service_date)
            .map_err(translate_persistence_error),
    )
}

fn import_pre_inform(
    persistence: &mut SqlitePersistence,
    row: &mut RowReader<'_>,
    today: time::Date,
) -> Option<Result<i64, ApiError>> {
    let route_id: Option<i64> = row.parsed("route_id");
    let date_of_travel: Option<time::Date> = row
        .required("date_of_travel")
        .and_then(|raw| row.with_domain("date_of_travel", parse_date(&raw)));
    let desired_time: Option<time::Time> = row
        .required("desired_time")
        .and_then(|raw| row.with_domain("desired_time", parse_time(&raw)));
    let boarding_stop: Option<String> = row.required("boarding_stop");
    let passenger_count: Option<u32> = row.parsed("passenger_count");
    let status: Option<PreInformStatus> = match row.optional("status") {
        Some(raw) => row.with_domain("status", raw.parse::<PreInformStatus>()),
        None => Some(PreInformStatus::Pending),
    };
    let submitted_on: Option<time::Date> = match row.optional("submitted_on") {
        Some(raw) => row.with_domain("submitted_on", parse_date(&raw)),
        None => Some(today),
    };

    let pre_inform: PreInform = PreInform {
        pre_inform_id: None,
        route_id: RouteId::new(route_id?),
        date_of_travel: date_of_travel?,
        desired_time: desired_time?,
        boarding_stop: boarding_stop?,
        passenger_count: passenger_count?,
        status: status?,
        submitted_on: submitted_on?,
    };
    Some(
        persistence
            .create_pre_inform(&pre_inform)
            .map_err(translate_persistence_error),
    )
}
