// Calendar view model: month grid, availability annotation and user colors.

use crate::aggregation::index_by_date;
use crate::models::AvailabilityRecord;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

pub mod colors;
pub mod grid;

pub use colors::{assign_colors, ColorMap, UserColor, PALETTE};
pub use grid::{annotate, build_month_grid, grid_for, CalendarCell, GridDay, MonthCursor};

pub const WEEKDAY_LABELS: [&str; 7] = ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"];

const MONTH_NAMES: [&str; 12] = [
    "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September", "Oktober",
    "November", "Dezember",
];

pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}

/// "November 2025"
pub fn month_title(cursor: MonthCursor) -> String {
    format!("{} {}", month_name(cursor.month()), cursor.year())
}

/// Calendar date of `now` in the reference zone, independent of the device's
/// own zone.
pub fn today_in(tz: Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Everything the calendar screen renders for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub title: String,
    pub cells: Vec<CalendarCell>,
    pub colors: ColorMap,
}

impl MonthView {
    pub fn build(
        records: &[AvailabilityRecord],
        cursor: MonthCursor,
        today: NaiveDate,
        current_user: &str,
    ) -> Self {
        let index = index_by_date(records);
        let cells = annotate(&grid_for(cursor, today), &index, current_user);
        Self {
            title: month_title(cursor),
            cells,
            colors: assign_colors(records, &PALETTE),
        }
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }
}
