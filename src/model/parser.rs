// File: src/model/parser.rs
//
// Indonesian date and time phrase normalization.
//
// Every function here is total: a phrase that carries nothing recognizable
// falls back to "today" or "00:00" instead of failing. Date functions take
// the reference day explicitly.
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MONTH_NAMES: [&str; 12] = [
    "januari",
    "februari",
    "maret",
    "april",
    "mei",
    "juni",
    "juli",
    "agustus",
    "september",
    "oktober",
    "november",
    "desember",
];

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MEI", "JUN", "JUL", "AGS", "SEP", "OKT", "NOV", "DES",
];

pub const WEEKDAY_NAMES: [(&str, Weekday); 7] = [
    ("senin", Weekday::Mon),
    ("selasa", Weekday::Tue),
    ("rabu", Weekday::Wed),
    ("kamis", Weekday::Thu),
    ("jumat", Weekday::Fri),
    ("sabtu", Weekday::Sat),
    ("minggu", Weekday::Sun),
];

/// Time-of-day qualifier that disambiguates a 1-12 hour numeral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Pagi,
    Siang,
    Sore,
    Malam,
}

impl Period {
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "pagi" => Some(Period::Pagi),
            "siang" => Some(Period::Siang),
            "sore" => Some(Period::Sore),
            "malam" => Some(Period::Malam),
            _ => None,
        }
    }

    /// Shifts a raw hour according to how the period word is used in speech.
    /// "jam 1 siang" is 13:00 and "jam 7 malam" is 19:00, but "7 pagi" stays 07:00.
    fn adjust(self, hour: u32) -> u32 {
        match self {
            Period::Pagi if hour == 12 => 0,
            Period::Pagi => hour,
            Period::Siang | Period::Sore if (1..=6).contains(&hour) => hour + 12,
            Period::Siang | Period::Sore => hour,
            Period::Malam if hour == 12 => 0,
            Period::Malam if (1..=11).contains(&hour) => hour + 12,
            Period::Malam => hour,
        }
    }
}

static CLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})(?:[:.](\d{1,2}))?").expect("valid clock regex"));

pub(crate) static PERIOD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(pagi|siang|sore|malam)\b").expect("valid period regex"));

// day, then either a month name or a separated numeric month with an optional year
static EXPLICIT_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?:tanggal\s*)?(\d{{1,2}})(?:\s*({})|[\s/\-](\d{{1,2}})(?:[\s/\-](\d{{4}}|\d{{2}})\b)?)?",
        MONTH_NAMES.join("|")
    ))
    .expect("valid date regex")
});

static WEEKDAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(senin|selasa|rabu|kamis|jum'?at|sabtu|minggu)\b").expect("valid weekday regex")
});

static HAS_DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("valid digit regex"));

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Normalizes a date phrase into `DD-MM-YYYY`.
///
/// Priority: "hari ini", "besok", "lusa", then an explicit day with an optional
/// month (name or number) and year, then `today`. An explicit day is not range
/// checked here; `validate` rejects "32-10-2026".
pub fn parse_date(phrase: &str, today: NaiveDate) -> String {
    let lower = phrase.to_lowercase();

    if lower.contains("hari ini") {
        return format_date(today);
    }
    if lower.contains("besok") {
        return format_date(today + Duration::days(1));
    }
    if lower.contains("lusa") {
        return format_date(today + Duration::days(2));
    }

    if let Some(caps) = EXPLICIT_DATE_RE.captures(&lower) {
        let day: u32 = caps[1].parse().unwrap_or(0);
        let month = if let Some(name) = caps.get(2) {
            month_from_name(name.as_str()).unwrap_or(today.month())
        } else if let Some(num) = caps.get(3) {
            num.as_str().parse().unwrap_or(today.month())
        } else {
            today.month()
        };
        let year = caps
            .get(4)
            .and_then(|y| y.as_str().parse::<i32>().ok())
            .map(|y| if y < 100 { 2000 + y } else { y })
            .unwrap_or(today.year());
        return format!("{:02}-{:02}-{}", day, month, year);
    }

    format_date(today)
}

/// Layer over `parse_date` that also understands "minggu depan", "bulan depan"
/// and weekday names.
pub fn parse_relative_date(phrase: &str, today: NaiveDate) -> String {
    let lower = phrase.to_lowercase();

    if lower.contains("minggu depan") {
        return format_date(today + Duration::days(7));
    }
    if lower.contains("bulan depan") {
        let next = today.checked_add_months(Months::new(1)).unwrap_or(today);
        return format_date(next);
    }

    let has_keyword = ["hari ini", "besok", "lusa"]
        .iter()
        .any(|k| lower.contains(k));
    if !has_keyword
        && !HAS_DIGIT_RE.is_match(&lower)
        && let Some(date) = parse_weekday(&lower, today)
    {
        return format_date(date);
    }

    parse_date(phrase, today)
}

/// Next occurrence of the named weekday strictly after `today`.
pub fn parse_weekday(phrase: &str, today: NaiveDate) -> Option<NaiveDate> {
    let caps = WEEKDAY_RE.captures(phrase)?;
    let word = caps[1].to_lowercase().replace('\'', "");
    let target = WEEKDAY_NAMES
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, wd)| *wd)?;

    let current = today.weekday().num_days_from_monday() as i64;
    let wanted = target.num_days_from_monday() as i64;
    let mut days_to_add = (wanted - current).rem_euclid(7);
    if days_to_add == 0 {
        days_to_add = 7;
    }
    Some(today + Duration::days(days_to_add))
}

fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    MONTH_NAMES
        .iter()
        .position(|m| *m == lower)
        .map(|idx| idx as u32 + 1)
}

/// Normalizes a time phrase into 24-hour `HH:MM`.
///
/// Reads the first `H`, `H:MM` or `H.MM` group, wraps hours past 24, clamps
/// minutes into 0-59 and applies a period word found anywhere in the phrase.
/// A phrase without digits yields `00:00`.
pub fn parse_time(phrase: &str) -> String {
    let lower = phrase.to_lowercase();
    let Some(caps) = CLOCK_RE.captures(&lower) else {
        return "00:00".to_string();
    };

    let mut hour: u32 = caps[1].parse().unwrap_or(0);
    let minute: u32 = caps
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
        .min(59);

    if hour > 24 {
        hour %= 24;
    }
    if hour == 24 {
        hour = 0;
    }

    if let Some(period) = PERIOD_RE
        .captures(&lower)
        .and_then(|c| Period::from_word(&c[1]))
    {
        hour = period.adjust(hour);
    }

    format!("{:02}:{:02}", hour % 24, minute)
}

/// `DD-MM-YYYY` to `DD MMM YYYY` with Indonesian month abbreviations.
/// Anything that does not split into a known month is returned unchanged.
pub fn format_display_date(date: &str) -> String {
    let parts: Vec<&str> = date.split('-').collect();
    if let [day, month, year] = parts.as_slice()
        && let Ok(m) = month.parse::<usize>()
        && (1..=12).contains(&m)
    {
        return format!("{} {} {}", day, MONTH_ABBREVIATIONS[m - 1], year);
    }
    date.to_string()
}

/// Parses a canonical `DD-MM-YYYY` string into a real calendar date.
pub fn to_naive_date(date: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = date.split('-').collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };
    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(day) || !all_digits(month) || !all_digits(year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

pub fn to_naive_datetime(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = to_naive_date(date)?;
    let time = NaiveTime::parse_from_str(time, "%H:%M").ok()?;
    Some(date.and_time(time))
}

pub fn is_valid_date(date: &str) -> bool {
    to_naive_date(date).is_some()
}

static VALID_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]?[0-9]|2[0-3]):[0-5][0-9]$").expect("valid time regex"));

pub fn is_valid_time(time: &str) -> bool {
    VALID_TIME_RE.is_match(time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn relative_keywords() {
        let today = day(2026, 10, 19);
        assert_eq!(parse_date("hari ini", today), "19-10-2026");
        assert_eq!(parse_date("rapat besok pagi", today), "20-10-2026");
        assert_eq!(parse_date("LUSA", today), "21-10-2026");
    }

    #[test]
    fn relative_keywords_cross_month_and_year() {
        assert_eq!(parse_date("besok", day(2026, 12, 31)), "01-01-2027");
        assert_eq!(parse_date("lusa", day(2028, 2, 28)), "01-03-2028");
    }

    #[test]
    fn explicit_dates() {
        let today = day(2026, 10, 19);
        assert_eq!(parse_date("10 September", today), "10-09-2026");
        assert_eq!(parse_date("tanggal 15", today), "15-10-2026");
        assert_eq!(parse_date("15/9", today), "15-09-2026");
        assert_eq!(parse_date("15-9", today), "15-09-2026");
        assert_eq!(parse_date("5 mei", today), "05-05-2026");
        assert_eq!(parse_date("1/2/2027", today), "01-02-2027");
        assert_eq!(parse_date("1-2-27", today), "01-02-2027");
    }

    #[test]
    fn out_of_range_day_is_left_for_validation() {
        assert_eq!(parse_date("tanggal 32", day(2026, 10, 19)), "32-10-2026");
    }

    #[test]
    fn unknown_phrase_defaults_to_today() {
        let today = day(2026, 10, 19);
        assert_eq!(parse_date("", today), "19-10-2026");
        assert_eq!(parse_date("kapan-kapan", today), "19-10-2026");
    }

    #[test]
    fn next_week_and_next_month() {
        let today = day(2026, 1, 31);
        assert_eq!(parse_relative_date("minggu depan", today), "07-02-2026");
        // clamped to the last day of February
        assert_eq!(parse_relative_date("bulan depan", today), "28-02-2026");
        assert_eq!(parse_relative_date("besok", today), "01-02-2026");
    }

    #[test]
    fn weekday_names_point_to_the_next_occurrence() {
        // 2026-10-19 is a Monday
        let monday = day(2026, 10, 19);
        assert_eq!(parse_relative_date("rabu", monday), "21-10-2026");
        assert_eq!(parse_relative_date("senin", monday), "26-10-2026");
        assert_eq!(parse_relative_date("hari minggu", monday), "25-10-2026");
        assert_eq!(parse_relative_date("jum'at", monday), "23-10-2026");
    }

    #[test]
    fn basic_times() {
        assert_eq!(parse_time("jam 7"), "07:00");
        assert_eq!(parse_time("pukul 15"), "15:00");
        assert_eq!(parse_time("7:30"), "07:30");
        assert_eq!(parse_time("13.45"), "13:45");
    }

    #[test]
    fn period_words() {
        assert_eq!(parse_time("7 pagi"), "07:00");
        assert_eq!(parse_time("12 pagi"), "00:00");
        assert_eq!(parse_time("1 siang"), "13:00");
        assert_eq!(parse_time("2 siang"), "14:00");
        assert_eq!(parse_time("12 siang"), "12:00");
        assert_eq!(parse_time("6 sore"), "18:00");
        assert_eq!(parse_time("7 sore"), "07:00");
        assert_eq!(parse_time("9 malam"), "21:00");
        assert_eq!(parse_time("12 malam"), "00:00");
        assert_eq!(parse_time("sekitar pukul 2 siang"), "14:00");
        assert_eq!(parse_time("jam 7 pagi untuk meeting"), "07:00");
    }

    #[test]
    fn overflow_and_clamping() {
        assert_eq!(parse_time("25"), "01:00");
        assert_eq!(parse_time("24:00"), "00:00");
        assert_eq!(parse_time("7:65"), "07:59");
        assert_eq!(parse_time("7:-5"), "07:00");
        assert_eq!(parse_time("23 malam"), "23:00");
    }

    #[test]
    fn no_digits_is_midnight() {
        assert_eq!(parse_time(""), "00:00");
        assert_eq!(parse_time("abc"), "00:00");
    }

    #[test]
    fn display_dates() {
        assert_eq!(format_display_date("05-08-2026"), "05 AGS 2026");
        assert_eq!(format_display_date("19-10-2026"), "19 OKT 2026");
        assert_eq!(format_display_date("rusak"), "rusak");
        assert_eq!(format_display_date("01-13-2026"), "01-13-2026");
    }

    #[test]
    fn calendar_validation() {
        assert!(is_valid_date("29-02-2028"));
        assert!(!is_valid_date("29-02-2026"));
        assert!(!is_valid_date("32-01-2026"));
        assert!(!is_valid_date("01-13-2026"));
        assert!(!is_valid_date("invalid"));
        assert!(is_valid_time("14:30"));
        assert!(is_valid_time("7:05"));
        assert!(!is_valid_time("25:70"));
        assert!(!is_valid_time("12:60"));
    }
}
