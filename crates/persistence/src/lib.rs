// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the bus operations backend.
//!
//! Stores buses, routes, daily assignments, passenger pre-informs and
//! weekly performance records in `SQLite` through Diesel. The schema is
//! embedded and migrated on open, and foreign key enforcement is verified
//! before the adapter is handed out.
//!
//! ## Storage format
//!
//! - Decimal values are stored as canonical decimal text, never as floats.
//! - Dates are stored as `YYYY-MM-DD` text so range filters compare lexically.
//! - `weekly_performances` is unique on `(bus_id, route_id, week_start_date)`.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` gives every caller its own shared-cache
//! in-memory database, so tests never observe each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use busops::WeeklyReportPlan;
use busops_domain::{
    Bus, BusAssignment, BusId, PerformanceKey, PreInform, Route, RouteId, WeeklyPerformance,
};
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Counter for unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Alias kept for call sites that name the backend explicitly.
pub type SqlitePersistence = Persistence;

/// Persistence adapter owning a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates an adapter over a fresh, isolated in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_busops_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates an adapter over a file database, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// Creates a bus.
    ///
    /// # Errors
    ///
    /// Returns an error if the number plate is taken or the write fails.
    pub fn create_bus(
        &mut self,
        number_plate: &str,
        capacity: u32,
        mileage_km_per_liter: Decimal,
    ) -> Result<BusId, PersistenceError> {
        mutations::catalog::create_bus(&mut self.conn, number_plate, capacity, mileage_km_per_liter)
    }

    /// Creates a route.
    ///
    /// # Errors
    ///
    /// Returns an error if the route number is taken or the write fails.
    pub fn create_route(
        &mut self,
        route_number: &str,
        name: &str,
        total_distance_km: Decimal,
    ) -> Result<RouteId, PersistenceError> {
        mutations::catalog::create_route(&mut self.conn, route_number, name, total_distance_km)
    }

    /// Assigns a bus to a route for one service day.
    ///
    /// # Errors
    ///
    /// Returns an error if the bus or route does not exist.
    pub fn create_assignment(
        &mut self,
        bus_id: BusId,
        route_id: RouteId,
        service_date: Date,
    ) -> Result<i64, PersistenceError> {
        mutations::catalog::create_assignment(&mut self.conn, bus_id, route_id, service_date)
    }

    /// Stores a pre-inform.
    ///
    /// # Errors
    ///
    /// Returns an error if the route does not exist.
    pub fn create_pre_inform(&mut self, pre_inform: &PreInform) -> Result<i64, PersistenceError> {
        mutations::catalog::create_pre_inform(&mut self.conn, pre_inform)
    }

    /// Lists every bus.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_buses(&mut self) -> Result<Vec<Bus>, PersistenceError> {
        queries::catalog::list_buses(&mut self.conn)
    }

    /// Lists every route.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_routes(&mut self) -> Result<Vec<Route>, PersistenceError> {
        queries::catalog::list_routes(&mut self.conn)
    }

    /// Retrieves a bus.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the bus does not exist.
    pub fn get_bus(&mut self, bus_id: BusId) -> Result<Bus, PersistenceError> {
        queries::catalog::get_bus(&mut self.conn, bus_id)
    }

    /// Retrieves a route.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the route does not exist.
    pub fn get_route(&mut self, route_id: RouteId) -> Result<Route, PersistenceError> {
        queries::catalog::get_route(&mut self.conn, route_id)
    }

    /// Lists assignments served between `start` and `end`, inclusive.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_assignments_between(
        &mut self,
        start: Date,
        end: Date,
    ) -> Result<Vec<BusAssignment>, PersistenceError> {
        queries::catalog::list_assignments_between(&mut self.conn, start, end)
    }

    /// Lists pre-informs travelling between `start` and `end`, inclusive.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_pre_informs_between(
        &mut self,
        start: Date,
        end: Date,
    ) -> Result<Vec<PreInform>, PersistenceError> {
        queries::catalog::list_pre_informs_between(&mut self.conn, start, end)
    }

    /// Lists pre-informs submitted on or after `since`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_pre_informs_submitted_since(
        &mut self,
        since: Date,
    ) -> Result<Vec<PreInform>, PersistenceError> {
        queries::catalog::list_pre_informs_submitted_since(&mut self.conn, since)
    }

    // ========================================================================
    // Weekly performances
    // ========================================================================

    /// Retrieves a weekly performance.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the record does not exist.
    pub fn get_performance(
        &mut self,
        performance_id: i64,
    ) -> Result<WeeklyPerformance, PersistenceError> {
        queries::performances::get_performance(&mut self.conn, performance_id)
    }

    /// Looks up the record for a (bus, route, week) key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_performance(
        &mut self,
        key: &PerformanceKey,
    ) -> Result<Option<WeeklyPerformance>, PersistenceError> {
        queries::performances::find_performance(&mut self.conn, key)
    }

    /// Lists the records of one week.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_performances_for_week(
        &mut self,
        week_start: Date,
    ) -> Result<Vec<WeeklyPerformance>, PersistenceError> {
        queries::performances::list_performances_for_week(&mut self.conn, week_start)
    }

    /// Lists records whose week starts on or after `since`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_performances_since(
        &mut self,
        since: Date,
    ) -> Result<Vec<WeeklyPerformance>, PersistenceError> {
        queries::performances::list_performances_since(&mut self.conn, since)
    }

    /// Persists the successful groups of a report plan atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; nothing is stored in that case.
    pub fn persist_weekly_report(
        &mut self,
        plan: &WeeklyReportPlan,
    ) -> Result<Vec<i64>, PersistenceError> {
        mutations::performances::persist_weekly_report(&mut self.conn, plan)
    }

    /// Stores a single record, inserting or updating by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_performance(
        &mut self,
        record: &WeeklyPerformance,
    ) -> Result<i64, PersistenceError> {
        mutations::performances::save_performance(&mut self.conn, record)
    }
}
