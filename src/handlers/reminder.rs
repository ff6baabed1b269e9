// File: ./src/handlers/reminder.rs
use super::{Env, Outcome};
use crate::model::ScheduleEntry;
use crate::model::display::EntryDisplay;
use crate::model::numerals::expand_number_words;
use chrono::{Duration, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_WINDOW_MINUTES: i64 = 60;

// Roughly 19 years; keeps the window far away from chrono's range limits.
const MAX_WINDOW_MINUTES: i64 = 10_000_000;

static WINDOW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(menit|jam|hari)").expect("valid window regex"));

/// Lookahead window in minutes requested by the input; 60 when none is given.
pub fn window_minutes(input: &str) -> i64 {
    let expanded = expand_number_words(input);
    let Some(caps) = WINDOW_RE.captures(&expanded) else {
        return DEFAULT_WINDOW_MINUTES;
    };
    let value: i64 = caps[1].parse().unwrap_or(MAX_WINDOW_MINUTES);
    let per_unit = match caps[2].to_lowercase().as_str() {
        "jam" => 60,
        "hari" => 60 * 24,
        _ => 1,
    };
    value.saturating_mul(per_unit).min(MAX_WINDOW_MINUTES)
}

/// "2 hari", "3 jam" or "45 menit", flooring to the largest whole unit.
pub fn window_label(minutes: i64) -> String {
    if minutes >= 1440 {
        format!("{} hari", minutes / 1440)
    } else if minutes >= 60 {
        format!("{} jam", minutes / 60)
    } else {
        format!("{} menit", minutes)
    }
}

/// Entries starting in `(now, now + minutes]`, soonest first, with minutes left.
pub fn upcoming(
    schedules: &[ScheduleEntry],
    now: NaiveDateTime,
    minutes: i64,
) -> Vec<(&ScheduleEntry, i64)> {
    let until = now + Duration::minutes(minutes);
    let mut due: Vec<(&ScheduleEntry, NaiveDateTime)> = schedules
        .iter()
        .filter_map(|s| s.naive_datetime().map(|dt| (s, dt)))
        .filter(|(_, dt)| *dt > now && *dt <= until)
        .collect();
    due.sort_by_key(|(_, dt)| *dt);
    due.into_iter()
        .map(|(s, dt)| (s, (dt - now).num_minutes()))
        .collect()
}

pub fn handle(input: &str, schedules: &[ScheduleEntry], env: &Env) -> Outcome {
    let minutes = window_minutes(input);
    let label = window_label(minutes);
    let due = upcoming(schedules, env.clock.now(), minutes);

    if due.is_empty() {
        return Outcome::Handled(format!("⏰ Tidak ada jadwal dalam {} ke depan.", label));
    }

    let mut out = format!("⏰ **REMINDER - Jadwal {} ke depan:**\n", label);
    for (i, (entry, left)) in due.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. 🔔 {}\n   📅 {} ⏰ {}\n   ⏳ {} menit lagi\n",
            i + 1,
            entry.activity,
            entry.display_date(),
            entry.time,
            left
        ));
    }
    Outcome::Handled(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Clock;
    use chrono::NaiveDate;

    fn env() -> Env {
        let now = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        Env {
            clock: Clock::Fixed(now),
            ..Env::default()
        }
    }

    fn entry(id: i64, activity: &str, date: &str, time: &str) -> ScheduleEntry {
        ScheduleEntry {
            id,
            activity: activity.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            created: String::new(),
        }
    }

    #[test]
    fn window_parsing() {
        assert_eq!(window_minutes("reminder 30 menit"), 30);
        assert_eq!(window_minutes("reminder 2 jam"), 120);
        assert_eq!(window_minutes("ingatkan satu hari ke depan"), 1440);
        assert_eq!(window_minutes("reminder dua puluh lima menit"), 25);
        assert_eq!(window_minutes("reminder nanti"), 60);
        assert_eq!(window_minutes("reminder 99999999999999999999 hari"), MAX_WINDOW_MINUTES);
    }

    #[test]
    fn labels_floor_to_the_largest_unit() {
        assert_eq!(window_label(45), "45 menit");
        assert_eq!(window_label(90), "1 jam");
        assert_eq!(window_label(2880), "2 hari");
    }

    #[test]
    fn window_is_open_at_now_and_closed_at_the_end() {
        let store = vec![
            entry(1, "sekarang", "19-10-2026", "08:00"),
            entry(2, "rapat", "19-10-2026", "09:00"),
            entry(3, "nanti", "19-10-2026", "09:01"),
            entry(4, "kopi", "19-10-2026", "08:30"),
        ];
        let text = handle("reminder 1 jam", &store, &env())
            .reply()
            .unwrap()
            .to_string();
        assert!(text.starts_with("⏰ **REMINDER - Jadwal 1 jam ke depan:**"));
        assert!(!text.contains("sekarang"));
        assert!(!text.contains("nanti"));
        let kopi = text.find("1. 🔔 kopi").unwrap();
        let rapat = text.find("2. 🔔 rapat").unwrap();
        assert!(kopi < rapat);
        assert!(text.contains("⏳ 30 menit lagi"));
        assert!(text.contains("⏳ 60 menit lagi"));
    }

    #[test]
    fn nothing_due() {
        assert_eq!(
            handle("reminder 2 jam", &[], &env()),
            Outcome::Handled("⏰ Tidak ada jadwal dalam 2 jam ke depan.".to_string())
        );
    }
}
