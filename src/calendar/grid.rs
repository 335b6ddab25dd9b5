use crate::aggregation::DateIndex;
use crate::error::{AppError, AppResult};
use chrono::{Datelike, Duration, NaiveDate};

/// The month currently shown, navigable across chrono's whole date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(AppError::invalid_input(format!("no such month: {}-{}", year, month)));
        }
        Ok(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following month. Stays put at the last month chrono can represent.
    pub fn next(self) -> Self {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        Self::checked(year, month).unwrap_or(self)
    }

    /// The preceding month. Stays put at the first month chrono can represent.
    pub fn prev(self) -> Self {
        let (year, month) = if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        };
        Self::checked(year, month).unwrap_or(self)
    }

    fn checked(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

/// One slot of the padded month grid, before availability is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDay {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
    pub available_users: Vec<String>,
    pub is_current_user_available: bool,
}

impl CalendarCell {
    pub fn day_number(&self) -> u32 {
        self.date.day()
    }

    /// Only days of the displayed month react to clicks.
    pub fn is_toggleable(&self) -> bool {
        self.in_current_month
    }

    /// Users drawn as badges. Padding days from adjacent months show none.
    pub fn badge_users(&self) -> &[String] {
        if self.in_current_month {
            self.available_users.as_slice()
        } else {
            &[]
        }
    }
}

/// Days from the Monday on or before the 1st through the Sunday on or after the
/// last day of the month.
///
/// `today` must already be expressed in the reference time zone.
pub fn build_month_grid(year: i32, month: u32, today: NaiveDate) -> AppResult<Vec<GridDay>> {
    Ok(grid_for(MonthCursor::new(year, month)?, today))
}

pub fn grid_for(cursor: MonthCursor, today: NaiveDate) -> Vec<GridDay> {
    let first = cursor.first_day();
    let last = cursor.last_day();
    // Padding is dropped where it would leave chrono's date range
    let start = first
        .checked_sub_signed(Duration::days(first.weekday().num_days_from_monday() as i64))
        .unwrap_or(first);
    let end = last
        .checked_add_signed(Duration::days(6 - last.weekday().num_days_from_monday() as i64))
        .unwrap_or(last);

    start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| GridDay {
            date,
            in_current_month: cursor.contains(date),
            is_today: date == today,
        })
        .collect()
}

pub fn annotate(grid: &[GridDay], index: &DateIndex, current_user: &str) -> Vec<CalendarCell> {
    grid.iter()
        .map(|day| {
            let available_users = index.get(&day.date).cloned().unwrap_or_default();
            let is_current_user_available = available_users.iter().any(|u| u == current_user);
            CalendarCell {
                date: day.date,
                in_current_month: day.in_current_month,
                is_today: day.is_today,
                available_users,
                is_current_user_available,
            }
        })
        .collect()
}
