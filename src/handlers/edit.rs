// File: ./src/handlers/edit.rs
use super::{Env, Outcome};
use crate::model::ScheduleEntry;
use crate::model::display::{EntryDisplay, format_candidates};
use crate::model::matcher::find_targets;
use crate::model::parser::{
    MONTH_NAMES, is_valid_date, is_valid_time, parse_relative_date, parse_time,
};
use crate::model::validate::{ValidationError, validate_activity};
use once_cell::sync::Lazy;
use regex::Regex;

static EDIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:ubah|ganti|edit)\s+(.+?)(?:\s+(?:jadi|ke|menjadi)\s+(.+?))?$")
        .expect("valid edit regex")
});

static TIME_VALUE_RE: Lazy<Regex> = Lazy::new(|| {
    // A clock must stand alone so the year of "1/11/2026" is not read as one.
    Regex::new(r"(?i)(?:^|\s)\d{1,2}[.:]\d{2}\b|\b(?:jam|pukul)\s*\d{1,2}")
        .expect("valid time value regex")
});

static DATE_VALUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:hari ini|besok|lusa|minggu depan|bulan depan|senin|selasa|rabu|kamis|jum'?at|sabtu|minggu)\b|tanggal\s*\d+|\d{{1,2}}[\s/\-]\d{{1,2}}|\d{{1,2}}\s*(?:{})\b",
        MONTH_NAMES.join("|")
    ))
    .expect("valid date value regex")
});

/// Which field a replacement value targets, decided by its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Change {
    Time(String),
    Date(String),
    Activity(String),
}

impl Change {
    fn from_value(value: &str, env: &Env) -> Self {
        if TIME_VALUE_RE.is_match(value) {
            Change::Time(parse_time(value))
        } else if DATE_VALUE_RE.is_match(value) {
            Change::Date(parse_relative_date(value, env.clock.today()))
        } else {
            Change::Activity(value.trim().to_string())
        }
    }

    fn check(&self) -> Option<ValidationError> {
        match self {
            Change::Time(t) if !is_valid_time(t) => Some(ValidationError::InvalidTime),
            Change::Date(d) if !is_valid_date(d) => Some(ValidationError::InvalidDate),
            Change::Activity(a) if !validate_activity(a) => Some(ValidationError::ActivityTooShort),
            _ => None,
        }
    }

    fn apply(self, entry: &mut ScheduleEntry) {
        match self {
            Change::Time(t) => entry.time = t,
            Change::Date(d) => entry.date = d,
            Change::Activity(a) => entry.activity = a,
        }
    }
}

pub fn handle(input: &str, schedules: &[ScheduleEntry], env: &Env) -> Outcome {
    let Some(caps) = EDIT_RE.captures(input.trim()) else {
        return Outcome::NoMatch;
    };
    let key = caps[1].trim();
    let value = caps.get(2).map(|m| m.as_str().trim());

    let candidates = find_targets(key, schedules, env.match_threshold);
    let Some(best) = candidates.first() else {
        return Outcome::Handled(format!(
            "❌ Tidak ditemukan jadwal dengan kata kunci \"{}\"",
            key
        ));
    };

    let Some(value) = value else {
        if candidates.len() > 1 {
            return Outcome::Handled(format_candidates(
                &candidates,
                "Gunakan kata kunci yang lebih spesifik seperti \"ubah makan 08:00 jadi 10:00\"",
            ));
        }
        return Outcome::Handled(format!(
            "ℹ️ Jadwal ditemukan: \"{}\" pada {} {}.\nUntuk mengedit, gunakan format: \"Ubah [jadwal lama] jadi [jadwal baru]\"",
            best.entry.activity,
            best.entry.display_date(),
            best.entry.time
        ));
    };

    let change = Change::from_value(value, env);
    if let Some(err) = change.check() {
        return Outcome::Handled(format!("❌ {}", err));
    }

    let target_id = best.entry.id;
    let mut next = schedules.to_vec();
    let Some(entry) = next.iter_mut().find(|s| s.id == target_id) else {
        return Outcome::Handled(format!(
            "❌ Tidak ditemukan jadwal dengan kata kunci \"{}\"",
            key
        ));
    };
    change.apply(entry);
    log::info!("Edited schedule {}", target_id);

    let reply = format!(
        "✅ Jadwal berhasil diubah menjadi: \"{}\" pada {} {}",
        entry.activity,
        entry.display_date(),
        entry.time
    );
    Outcome::Mutated {
        reply,
        schedules: next,
    }
}
