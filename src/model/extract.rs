// File: src/model/extract.rs
//
// Pulls the free-text activity and the raw date/time phrases out of an
// utterance. The raw phrases are handed to `parser` for normalization.
use crate::model::parser::{MONTH_NAMES, PERIOD_RE};
use once_cell::sync::Lazy;
use regex::Regex;

const ADD_VERBS: [&str; 4] = ["tambah", "buat", "jadwalkan", "schedule"];

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid extractor regex")
}

static LEADING_VERB_RE: Lazy<Regex> =
    Lazy::new(|| re(r"(?i)^(?:tambah|buat|jadwalkan|schedule)\s+(?:jadwal(?:\s+|$))?"));

static TIME_PHRASE_RE: Lazy<Regex> = Lazy::new(|| {
    re(r"(?i)(?:^|\s+)(?:jam|pukul|pada)\s*\d{1,2}(?:[.:]?\d{2})?\s*(?:pagi|siang|sore|malam)?\b")
});

// "7 pagi" without jam/pukul; a trailing "ini" belongs to the same phrase.
static PERIOD_HOUR_RE: Lazy<Regex> =
    Lazy::new(|| re(r"(?i)\b\d{1,2}\s+(?:pagi|siang|sore|malam)(?:\s+ini)?\b"));

static BARE_CLOCK_RE: Lazy<Regex> = Lazy::new(|| re(r"\b\d{1,2}[:.]\d{2}\b"));

static ANCHORED_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    re(r"(?i)\b(?:jam|pukul)\s*\d{1,2}(?:[.:]?\d{2})?(?:\s*(?:pagi|siang|sore|malam)\b)?")
});

// "malam ini" and friends mean today; the period word itself is read by `time_phrase_for`.
static PERIOD_TODAY_RE: Lazy<Regex> =
    Lazy::new(|| re(r"(?i)\b(?:pagi|siang|sore|malam)\s+ini\b"));

static RELATIVE_DAY_RE: Lazy<Regex> =
    Lazy::new(|| re(r"(?i)\b(?:hari ini|besok|lusa|minggu depan|bulan depan)\b"));

static TANGGAL_RE: Lazy<Regex> = Lazy::new(|| {
    re(&format!(
        r"(?i)\btanggal\s*\d{{1,2}}(?:\s*(?:{})\b|[\s/\-]\d{{1,2}}(?:[\s/\-]\d{{2,4}})?\b)?",
        MONTH_NAMES.join("|")
    ))
});

static DAY_MONTH_NAME_RE: Lazy<Regex> =
    Lazy::new(|| re(&format!(r"(?i)\b\d{{1,2}}\s*(?:{})\b", MONTH_NAMES.join("|"))));

static NUMERIC_DATE_RE: Lazy<Regex> =
    Lazy::new(|| re(r"\b\d{1,2}[\s/\-]\d{1,2}(?:[\s/\-]\d{2,4})?\b"));

static WEEKDAY_RE: Lazy<Regex> = Lazy::new(|| {
    re(r"(?i)\b(?:hari\s+)?(?:senin|selasa|rabu|kamis|jum'?at|sabtu|minggu)\b")
});

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| re(r"\s+"));

/// Isolates the activity label of an add-style utterance.
///
/// "Buat jadwal rapat tim hari ini jam 3 sore" gives "rapat tim". Returns an
/// empty string when nothing but command words remain.
pub fn extract_activity(input: &str) -> String {
    let mut activity = LEADING_VERB_RE.replace(input.trim(), "").into_owned();

    activity = TIME_PHRASE_RE.replace_all(&activity, " ").into_owned();
    activity = PERIOD_HOUR_RE.replace_all(&activity, " ").into_owned();
    activity = PERIOD_TODAY_RE.replace_all(&activity, " ").into_owned();
    activity = PERIOD_RE.replace_all(&activity, " ").into_owned();

    for pattern in [
        &*RELATIVE_DAY_RE,
        &*TANGGAL_RE,
        &*DAY_MONTH_NAME_RE,
        &*NUMERIC_DATE_RE,
        &*WEEKDAY_RE,
        &*BARE_CLOCK_RE,
    ] {
        activity = pattern.replace_all(&activity, " ").into_owned();
    }

    let activity = WHITESPACE_RE.replace_all(&activity, " ").trim().to_string();

    let lower = activity.to_lowercase();
    if activity.is_empty() || ADD_VERBS.contains(&lower.as_str()) {
        return String::new();
    }
    activity
}

/// First date phrase in the input, or "hari ini" when there is none.
pub fn extract_date_pattern(input: &str) -> String {
    for pattern in [
        &*RELATIVE_DAY_RE,
        &*TANGGAL_RE,
        &*DAY_MONTH_NAME_RE,
        &*NUMERIC_DATE_RE,
        &*WEEKDAY_RE,
    ] {
        if let Some(m) = pattern.find(input) {
            return m.as_str().trim().to_string();
        }
    }
    "hari ini".to_string()
}

/// First "jam/pukul N[:.MM] [period]" phrase, or an empty string.
pub fn extract_time_pattern(input: &str) -> String {
    ANCHORED_TIME_RE
        .find(input)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// The phrase to normalize as the entry's time.
///
/// Prefers an anchored "jam 7" phrase, then an hour with a period word like
/// "7 pagi", then a bare clock token like "14.00".
/// A period word elsewhere in the input is carried over when the phrase has
/// none, so "nonton malam ini jam 7" reads as 19:00.
pub fn time_phrase_for(input: &str) -> String {
    let mut phrase = extract_time_pattern(input);
    if phrase.is_empty()
        && let Some(m) = PERIOD_HOUR_RE.find(input)
    {
        return m.as_str().to_string();
    }
    if phrase.is_empty()
        && let Some(m) = BARE_CLOCK_RE.find(input)
    {
        phrase = m.as_str().to_string();
    }
    if phrase.is_empty() {
        return phrase;
    }
    if !PERIOD_RE.is_match(&phrase)
        && let Some(period) = PERIOD_RE.find(input)
    {
        phrase.push(' ');
        phrase.push_str(period.as_str());
    }
    phrase
}

/// The input with its time phrases removed, so clock digits are never read as a day.
pub fn without_time_phrases(input: &str) -> String {
    let stripped = ANCHORED_TIME_RE.replace_all(input, " ");
    let stripped = PERIOD_HOUR_RE.replace_all(&stripped, " ");
    BARE_CLOCK_RE.replace_all(&stripped, " ").into_owned()
}
