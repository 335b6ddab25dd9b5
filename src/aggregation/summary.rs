use super::{common_dates_in, count_by_user, distinct_users, DateWindow};
use crate::calendar::month_name;
use crate::models::AvailabilityRecord;
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantSummary {
    pub name: String,
    pub days_available: usize,
}

/// Common dates falling in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGroup {
    pub year: i32,
    pub month: u32,
    pub title: &'static str,
    pub dates: Vec<NaiveDate>,
}

impl MonthGroup {
    pub fn day_numbers(&self) -> Vec<u32> {
        self.dates.iter().map(|d| d.day()).collect()
    }
}

/// Everything the final screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub participants: Vec<ParticipantSummary>,
    pub common_dates: Vec<NaiveDate>,
    pub months: Vec<MonthGroup>,
}

impl SummaryView {
    pub fn build(records: &[AvailabilityRecord], window: DateWindow) -> Self {
        let counts = count_by_user(records);
        let participants = distinct_users(records)
            .into_iter()
            .map(|name| {
                let days_available = counts.get(&name).copied().unwrap_or(0);
                ParticipantSummary { name, days_available }
            })
            .collect();

        let common_dates = common_dates_in(records, window);
        let months = group_by_month(&common_dates);

        Self {
            participants,
            common_dates,
            months,
        }
    }

    pub fn has_common_dates(&self) -> bool {
        !self.common_dates.is_empty()
    }
}

/// Splits ascending dates into consecutive month groups.
pub fn group_by_month(dates: &[NaiveDate]) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();
    for date in dates {
        match groups.last_mut() {
            Some(group) if group.year == date.year() && group.month == date.month() => {
                group.dates.push(*date);
            }
            _ => groups.push(MonthGroup {
                year: date.year(),
                month: date.month(),
                title: month_name(date.month()),
                dates: vec![*date],
            }),
        }
    }
    groups
}
