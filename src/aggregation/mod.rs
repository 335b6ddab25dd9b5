//! Availability aggregation
//!
//! Pure functions over a snapshot of records. Nothing here mutates its input or
//! keeps state between calls; every pass starts from scratch.

use crate::error::{AppError, AppResult};
use crate::models::AvailabilityRecord;
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap, HashSet};

pub mod summary;

pub use summary::{MonthGroup, ParticipantSummary, SummaryView};

/// Users available on each date, in the order they first appear in the records.
pub type DateIndex = BTreeMap<NaiveDate, Vec<String>>;

/// Inclusive date range searched for common availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if end < start {
            return Err(AppError::invalid_input(format!(
                "window end {} is before start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// November 1 through December 31 of `year`.
    pub fn year_end(year: i32) -> Self {
        // Both dates exist in every year chrono can represent in practice.
        let start = NaiveDate::from_ymd_opt(year, 11, 1).unwrap_or(NaiveDate::MIN);
        let end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    /// Year-end window for the year `today` falls in.
    pub fn year_end_of(today: NaiveDate) -> Self {
        Self::year_end(today.year())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }
}

pub fn index_by_date(records: &[AvailabilityRecord]) -> DateIndex {
    let mut index = DateIndex::new();
    for record in records {
        let users = index.entry(record.date).or_default();
        if !users.contains(&record.user_name) {
            users.push(record.user_name.clone());
        }
    }
    index
}

/// Number of records per user. Duplicate dates are each counted.
pub fn count_by_user(records: &[AvailabilityRecord]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(record.user_name.clone()).or_insert(0) += 1;
    }
    counts
}

/// Distinct user names in first-appearance order.
pub fn distinct_users(records: &[AvailabilityRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.user_name.as_str()))
        .map(|r| r.user_name.clone())
        .collect()
}

/// Dates in `[start, end]` on which every user that appears anywhere in
/// `records` has a record. Empty when there are no users at all.
pub fn common_dates(records: &[AvailabilityRecord], start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let users: HashSet<&str> = records.iter().map(|r| r.user_name.as_str()).collect();
    if users.is_empty() || end < start {
        return Vec::new();
    }

    let mut by_date: HashMap<NaiveDate, HashSet<&str>> = HashMap::new();
    for record in records {
        by_date.entry(record.date).or_default().insert(record.user_name.as_str());
    }

    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| {
            by_date
                .get(d)
                .map_or(false, |present| users.is_subset(present))
        })
        .collect()
}

pub fn common_dates_in(records: &[AvailabilityRecord], window: DateWindow) -> Vec<NaiveDate> {
    common_dates(records, window.start, window.end)
}
