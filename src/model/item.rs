// File: ./src/model/item.rs
use crate::model::parser::to_naive_datetime;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

fn default_true() -> bool {
    true
}

fn default_reminder_minutes() -> u32 {
    30
}

/// One scheduled activity.
///
/// `date` and `time` are kept in their canonical text forms (`DD-MM-YYYY`,
/// `HH:MM`) because that is what the store, the replies and the exports use.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: i64,
    pub activity: String,
    pub date: String,
    pub time: String,
    pub created: String,
}

impl ScheduleEntry {
    /// Creates an entry with a fresh id and creation timestamp.
    ///
    /// The id is the current time in milliseconds; if that collides with an id
    /// already present in `existing` the next free value above the maximum is used.
    pub fn new(
        activity: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        existing: &[ScheduleEntry],
        now: NaiveDateTime,
    ) -> Self {
        let local = now
            .and_local_timezone(Local)
            .earliest()
            .unwrap_or_else(Local::now);
        let mut id = local.timestamp_millis();
        if existing.iter().any(|e| e.id == id) {
            id = existing.iter().map(|e| e.id).max().unwrap_or(id) + 1;
        }

        Self {
            id,
            activity: activity.into(),
            date: date.into(),
            time: time.into(),
            created: local.to_rfc3339(),
        }
    }

    pub fn naive_datetime(&self) -> Option<NaiveDateTime> {
        to_naive_datetime(&self.date, &self.time)
    }

    /// Chronological ordering; entries with unparseable dates sort last.
    pub fn cmp_chronological(&self, other: &Self) -> Ordering {
        match (self.naive_datetime(), other.naive_datetime()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.time.cmp(&other.time),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_true")]
    pub reminder_enabled: bool,
    #[serde(default = "default_reminder_minutes")]
    pub default_reminder_minutes: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reminder_enabled: true,
            default_reminder_minutes: 30,
        }
    }
}

/// The whole persisted document: schedules plus their sibling settings object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub schedules: Vec<ScheduleEntry>,
    #[serde(default)]
    pub settings: Settings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn ids_stay_distinct_within_a_store() {
        let now = at(8, 0);
        let first = ScheduleEntry::new("makan", "19-10-2026", "08:00", &[], now);
        let second = ScheduleEntry::new("kerja", "19-10-2026", "09:00", &[first.clone()], now);
        assert_ne!(first.id, second.id);
        assert_eq!(second.id, first.id + 1);
    }

    #[test]
    fn settings_use_camel_case_keys() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("reminderEnabled"));
        assert!(json.contains("defaultReminderMinutes"));
    }

    #[test]
    fn missing_settings_fall_back_to_defaults() {
        let data: StoreData = serde_json::from_str(r#"{"schedules": []}"#).unwrap();
        assert_eq!(data.settings, Settings::default());
    }

    #[test]
    fn chronological_order_uses_date_before_time() {
        let now = at(8, 0);
        let late_today = ScheduleEntry::new("a", "19-10-2026", "23:00", &[], now);
        let early_tomorrow = ScheduleEntry::new("b", "20-10-2026", "01:00", &[], now);
        assert_eq!(
            late_today.cmp_chronological(&early_tomorrow),
            Ordering::Less
        );
    }
}
