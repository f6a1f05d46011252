// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Trend, ranking and leaderboard aggregation over weekly performances.
//!
//! Every function here is a fresh single pass over its input. Groups are
//! keyed by canonical identifiers and kept in first-seen order; all sorts are
//! stable, so records with equal sort keys keep their input order. Sums
//! saturate at the bounds of their type instead of overflowing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use time::Date;

use crate::performance::{WeeklyPerformance, exact_ratio, ratio};
use crate::types::{BusId, PreInform, RouteId};

/// Maximum number of entries in a route or bus ranking.
pub const RANKING_LIMIT: usize = 10;

/// Totals for one week of the trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTrendPoint {
    /// Monday of the week.
    pub week_start: Date,
    /// Sum of profit.
    pub total_profit: Decimal,
    /// Sum of revenue.
    pub total_revenue: Decimal,
    /// Sum of passengers.
    pub total_passengers: u64,
}

/// Aggregated performance of one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRanking {
    /// The route.
    pub route_id: RouteId,
    /// Sum of profit.
    pub total_profit: Decimal,
    /// Sum of kilometers.
    pub total_kms: Decimal,
    /// Sum of passengers.
    pub total_passengers: u64,
    /// Profit divided by kilometers, or zero without distance.
    pub profit_per_km: Decimal,
}

/// Aggregated performance of one bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusRanking {
    /// The bus.
    pub bus_id: BusId,
    /// Sum of profit.
    pub total_profit: Decimal,
    /// Sum of revenue.
    pub total_revenue: Decimal,
    /// Sum of kilometers.
    pub total_kms: Decimal,
    /// Sum of passengers.
    pub total_passengers: u64,
    /// Revenue divided by kilometers, or zero without distance.
    pub revenue_per_km: Decimal,
}

/// Number of pre-informs for one weekday and boarding hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandBucket {
    /// Day of the week of travel, Sunday = 1 through Saturday = 7.
    pub day_of_week: u8,
    /// Hour of the desired boarding time.
    pub hour: u8,
    /// Number of pre-informs in the bucket.
    pub demand_count: u32,
}

/// Totals across every record of a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WeekTotals {
    /// Sum of profit.
    pub total_profit: Decimal,
    /// Sum of revenue.
    pub total_revenue: Decimal,
    /// Sum of cost.
    pub total_cost: Decimal,
    /// Sum of passengers.
    pub total_passengers: u64,
    /// Number of records summed.
    pub record_count: usize,
}

impl WeekTotals {
    /// Mean passengers per record, rounded to one decimal place.
    #[must_use]
    pub fn average_passengers(&self) -> Decimal {
        if self.record_count == 0 {
            return Decimal::ZERO;
        }
        exact_ratio(
            Decimal::from(self.total_passengers),
            Decimal::from(self.record_count),
        )
        .round_dp(1)
    }
}

/// One line of the single-week route leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteWeekSummary {
    /// The route.
    pub route_id: RouteId,
    /// Sum of profit.
    pub total_profit: Decimal,
    /// Sum of passengers.
    pub total_passengers: u64,
}

/// One line of the single-week bus leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusWeekSummary {
    /// The bus.
    pub bus_id: BusId,
    /// Sum of profit.
    pub total_profit: Decimal,
    /// Number of route records the bus served.
    pub route_count: usize,
}

/// Accumulates values per key while remembering first-seen order.
struct OrderedGroups<K, V> {
    index: HashMap<K, usize>,
    values: Vec<V>,
}

impl<K: Eq + Hash + Copy, V> OrderedGroups<K, V> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            values: Vec::new(),
        }
    }

    fn entry(&mut self, key: K, init: impl FnOnce() -> V) -> &mut V {
        let position: usize = *self.index.entry(key).or_insert_with(|| {
            self.values.push(init());
            self.values.len() - 1
        });
        &mut self.values[position]
    }

    fn into_values(self) -> Vec<V> {
        self.values
    }
}

/// Sums profit, revenue and passengers per week, ascending by week.
#[must_use]
pub fn weekly_trend(records: &[WeeklyPerformance]) -> Vec<WeeklyTrendPoint> {
    let mut weeks: BTreeMap<Date, WeeklyTrendPoint> = BTreeMap::new();

    for record in records {
        let point: &mut WeeklyTrendPoint =
            weeks
                .entry(record.week_start())
                .or_insert_with(|| WeeklyTrendPoint {
                    week_start: record.week_start(),
                    total_profit: Decimal::ZERO,
                    total_revenue: Decimal::ZERO,
                    total_passengers: 0,
                });
        point.total_profit = point.total_profit.saturating_add(record.total_profit());
        point.total_revenue = point.total_revenue.saturating_add(record.total_revenue());
        point.total_passengers = point
            .total_passengers
            .saturating_add(u64::from(record.total_passengers()));
    }

    weeks.into_values().collect()
}

/// Ranks routes by total profit, highest first, keeping the top ten.
#[must_use]
pub fn rank_routes(records: &[WeeklyPerformance]) -> Vec<RouteRanking> {
    let mut groups: OrderedGroups<RouteId, RouteRanking> = OrderedGroups::new();

    for record in records {
        let entry: &mut RouteRanking = groups.entry(record.route_id(), || RouteRanking {
            route_id: record.route_id(),
            total_profit: Decimal::ZERO,
            total_kms: Decimal::ZERO,
            total_passengers: 0,
            profit_per_km: Decimal::ZERO,
        });
        entry.total_profit = entry.total_profit.saturating_add(record.total_profit());
        entry.total_kms = entry.total_kms.saturating_add(record.total_kms());
        entry.total_passengers = entry
            .total_passengers
            .saturating_add(u64::from(record.total_passengers()));
    }

    let mut rankings: Vec<RouteRanking> = groups.into_values();
    for ranking in &mut rankings {
        ranking.profit_per_km = ratio(ranking.total_profit, ranking.total_kms);
    }
    rankings.sort_by(|a, b| b.total_profit.cmp(&a.total_profit));
    rankings.truncate(RANKING_LIMIT);
    rankings
}

/// Ranks buses by revenue per kilometer, highest first, keeping the top ten.
#[must_use]
pub fn rank_buses(records: &[WeeklyPerformance]) -> Vec<BusRanking> {
    let mut groups: OrderedGroups<BusId, BusRanking> = OrderedGroups::new();

    for record in records {
        let entry: &mut BusRanking = groups.entry(record.bus_id(), || BusRanking {
            bus_id: record.bus_id(),
            total_profit: Decimal::ZERO,
            total_revenue: Decimal::ZERO,
            total_kms: Decimal::ZERO,
            total_passengers: 0,
            revenue_per_km: Decimal::ZERO,
        });
        entry.total_profit = entry.total_profit.saturating_add(record.total_profit());
        entry.total_revenue = entry.total_revenue.saturating_add(record.total_revenue());
        entry.total_kms = entry.total_kms.saturating_add(record.total_kms());
        entry.total_passengers = entry
            .total_passengers
            .saturating_add(u64::from(record.total_passengers()));
    }

    // Ordered on the unrounded ratio; only the reported figure is rounded.
    let mut keyed: Vec<(Decimal, BusRanking)> = groups
        .into_values()
        .into_iter()
        .map(|mut ranking| {
            let exact: Decimal = exact_ratio(ranking.total_revenue, ranking.total_kms);
            ranking.revenue_per_km = ratio(ranking.total_revenue, ranking.total_kms);
            (exact, ranking)
        })
        .collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    keyed
        .into_iter()
        .take(RANKING_LIMIT)
        .map(|(_, ranking)| ranking)
        .collect()
}

/// Counts pre-informs per (day of travel, boarding hour), ordered by day then hour.
///
/// Days are numbered Sunday = 1 through Saturday = 7.
#[must_use]
pub fn demand_pattern(pre_informs: &[PreInform]) -> Vec<DemandBucket> {
    let mut buckets: BTreeMap<(u8, u8), u32> = BTreeMap::new();

    for pre_inform in pre_informs {
        let day: u8 = pre_inform.date_of_travel.weekday().number_from_sunday();
        let hour: u8 = pre_inform.desired_time.hour();
        let count: &mut u32 = buckets.entry((day, hour)).or_insert(0);
        *count = count.saturating_add(1);
    }

    buckets
        .into_iter()
        .map(|((day_of_week, hour), demand_count)| DemandBucket {
            day_of_week,
            hour,
            demand_count,
        })
        .collect()
}

/// Sums profit, revenue, cost and passengers across `records`.
#[must_use]
pub fn week_totals(records: &[WeeklyPerformance]) -> WeekTotals {
    records
        .iter()
        .fold(WeekTotals::default(), |mut totals, record| {
            totals.total_profit = totals.total_profit.saturating_add(record.total_profit());
            totals.total_revenue = totals.total_revenue.saturating_add(record.total_revenue());
            totals.total_cost = totals.total_cost.saturating_add(record.total_cost());
            totals.total_passengers = totals
                .total_passengers
                .saturating_add(u64::from(record.total_passengers()));
            totals.record_count = totals.record_count.saturating_add(1);
            totals
        })
}

/// Sums profit and passengers per route, highest profit first.
#[must_use]
pub fn route_leaderboard(records: &[WeeklyPerformance]) -> Vec<RouteWeekSummary> {
    let mut groups: OrderedGroups<RouteId, RouteWeekSummary> = OrderedGroups::new();

    for record in records {
        let entry: &mut RouteWeekSummary = groups.entry(record.route_id(), || RouteWeekSummary {
            route_id: record.route_id(),
            total_profit: Decimal::ZERO,
            total_passengers: 0,
        });
        entry.total_profit = entry.total_profit.saturating_add(record.total_profit());
        entry.total_passengers = entry
            .total_passengers
            .saturating_add(u64::from(record.total_passengers()));
    }

    let mut summaries: Vec<RouteWeekSummary> = groups.into_values();
    summaries.sort_by(|a, b| b.total_profit.cmp(&a.total_profit));
    summaries
}

/// Sums profit and counts route records per bus, highest profit first.
#[must_use]
pub fn bus_leaderboard(records: &[WeeklyPerformance]) -> Vec<BusWeekSummary> {
    let mut groups: OrderedGroups<BusId, BusWeekSummary> = OrderedGroups::new();

    for record in records {
        let entry: &mut BusWeekSummary = groups.entry(record.bus_id(), || BusWeekSummary {
            bus_id: record.bus_id(),
            total_profit: Decimal::ZERO,
            route_count: 0,
        });
        entry.total_profit = entry.total_profit.saturating_add(record.total_profit());
        entry.route_count = entry.route_count.saturating_add(1);
    }

    let mut summaries: Vec<BusWeekSummary> = groups.into_values();
    summaries.sort_by(|a, b| b.total_profit.cmp(&a.total_profit));
    summaries
}
