// src/models.rs

use chrono::NaiveDateTime;
use rusqlite::Row;

/// Format SQLite's `datetime()` writes into the timestamp columns.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One logged tea event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeaLogEntry {
    pub id: i64,
    pub tea_name: String,
    pub local_time: String, // stored as "YYYY-MM-DD HH:MM:SS" text
    pub utc_time: String,
}

impl TeaLogEntry {
    /// Maps one raw result row onto a typed entry.
    /// Expects columns in `id, tea_name, local_time, utc_time` order.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(TeaLogEntry {
            id: row.get(0)?,
            tea_name: row.get(1)?,
            local_time: row.get(2)?,
            utc_time: row.get(3)?,
        })
    }

    /// Parses the local timestamp for display. `None` if the stored text is
    /// not in the expected format.
    pub fn local_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.local_time, TIMESTAMP_FORMAT).ok()
    }

    /// Parses the UTC timestamp for display.
    pub fn utc_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.utc_time, TIMESTAMP_FORMAT).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_timestamps() {
        let entry = TeaLogEntry {
            id: 1,
            tea_name: "Sencha".to_string(),
            local_time: "2024-05-01 09:30:00".to_string(),
            utc_time: "2024-05-01 07:30:00".to_string(),
        };

        let utc = entry.utc_datetime().unwrap();
        assert_eq!(utc.format("%H:%M").to_string(), "07:30");
        assert!(entry.local_datetime().is_some());
    }

    #[test]
    fn unparseable_timestamp_yields_none() {
        let entry = TeaLogEntry {
            id: 2,
            tea_name: "Matcha".to_string(),
            local_time: String::new(),
            utc_time: "not a date".to_string(),
        };

        assert!(entry.local_datetime().is_none());
        assert!(entry.utc_datetime().is_none());
    }
}
