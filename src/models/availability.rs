// file: src/models/availability.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire and key format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One participant's claim of being free on one date.
///
/// Presence of a record for `(user_name, date)` means "available"; toggling off
/// removes the record on the server instead of flipping `available`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    pub id: i64,
    pub user_name: String,
    pub date: NaiveDate,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl AvailabilityRecord {
    /// Locally created record standing in for a server row until the next fetch.
    pub fn provisional(id: i64, user_name: &str, date: NaiveDate) -> Self {
        Self {
            id,
            user_name: user_name.to_string(),
            date,
            available: true,
            created_at: None,
        }
    }

    pub fn is_provisional(&self) -> bool {
        self.id < 0
    }

    pub fn matches(&self, user_name: &str, date: NaiveDate) -> bool {
        self.user_name == user_name && self.date == date
    }

    pub fn date_key(&self) -> String {
        format_date(self.date)
    }

    /// Server timestamp, accepted either as RFC 3339 or as a plain
    /// `YYYY-MM-DD HH:MM:SS` value in UTC.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// Body of the toggle call. The server decides between add and remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub user_name: String,
    pub date: NaiveDate,
    pub available: bool,
}

impl AvailabilityRequest {
    pub fn toggle(user_name: &str, date: NaiveDate) -> Self {
        Self {
            user_name: user_name.to_string(),
            date,
            available: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub available: bool,
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Derives the list that results from toggling `(user_name, date)`: the first
/// matching record is dropped, or a provisional one is appended.
///
/// The input slice is left untouched so a snapshot held elsewhere stays intact.
pub fn toggled(
    records: &[AvailabilityRecord],
    user_name: &str,
    date: NaiveDate,
    provisional_id: i64,
) -> Vec<AvailabilityRecord> {
    match records.iter().position(|r| r.matches(user_name, date)) {
        Some(index) => records
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, r)| r.clone())
            .collect(),
        None => {
            let mut next = records.to_vec();
            next.push(AvailabilityRecord::provisional(provisional_id, user_name, date));
            next
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_record_deserializes_server_shape() {
        let json = r#"{"id":7,"user_name":"Wolfi","date":"2025-11-03","available":true,"created_at":"2025-10-01 12:30:00"}"#;
        let record: AvailabilityRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, 7);
        assert_eq!(record.user_name, "Wolfi");
        assert_eq!(record.date, day(2025, 11, 3));
        assert_eq!(record.date_key(), "2025-11-03");
        assert!(record.created_at_utc().is_some());
    }

    #[test]
    fn test_record_without_created_at() {
        let json = r#"{"id":1,"user_name":"Peter","date":"2025-12-24","available":true}"#;
        let record: AvailabilityRecord = serde_json::from_str(json).unwrap();
        assert!(record.created_at.is_none());
        assert!(record.created_at_utc().is_none());
    }

    #[test]
    fn test_request_uses_camel_case() {
        let request = AvailabilityRequest::toggle("Robert", day(2025, 11, 4));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["userName"], "Robert");
        assert_eq!(json["date"], "2025-11-04");
        assert_eq!(json["available"], true);
    }

    #[test]
    fn test_response_without_id() {
        let json = r#"{"message":"Availability removed","available":false}"#;
        let response: AvailabilityResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id, None);
        assert!(!response.available);
    }

    #[test]
    fn test_date_key_is_zero_padded() {
        let record = AvailabilityRecord::provisional(-1, "Peter", day(2025, 3, 7));
        assert_eq!(record.date_key(), "2025-03-07");
        assert_eq!(format_date(day(2025, 12, 24)), "2025-12-24");
    }

    #[test]
    fn test_toggled_adds_then_removes() {
        let original = vec![AvailabilityRecord::provisional(1, "Tobias", day(2025, 11, 1))];

        let added = toggled(&original, "Andreas", day(2025, 11, 1), -1);
        assert_eq!(added.len(), 2);
        assert!(added[1].is_provisional());

        let removed = toggled(&added, "Andreas", day(2025, 11, 1), -2);
        assert_eq!(removed, original);
        assert_eq!(original.len(), 1);
    }
}
