// File: ./src/handlers/search.rs
use super::{Env, Outcome};
use crate::model::ScheduleEntry;
use crate::model::display::format_search_results;
use crate::model::matcher::search_entries;
use once_cell::sync::Lazy;
use regex::Regex;

static SEARCH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:cari|find)\s+(.+)$|^kapan\s+(?:ada\s+)?(.+)$").expect("valid search regex")
});

pub fn handle(input: &str, schedules: &[ScheduleEntry], env: &Env) -> Outcome {
    if schedules.is_empty() {
        return Outcome::Handled("📅 Belum ada jadwal untuk dicari.".to_string());
    }

    let Some(caps) = SEARCH_RE.captures(input.trim()) else {
        return Outcome::NoMatch;
    };
    let Some(term) = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str().trim()) else {
        return Outcome::NoMatch;
    };

    if term.eq_ignore_ascii_case("ada") || term.chars().count() < 2 {
        return Outcome::Handled(format!(
            "❌ Kata kunci \"{}\" terlalu pendek. Gunakan kata kunci yang lebih spesifik.",
            term
        ));
    }

    let results = search_entries(term, schedules, env.search_threshold);
    if results.is_empty() {
        return Outcome::Handled(format!(
            "🔍 Tidak ditemukan jadwal dengan kata kunci \"{}\"",
            term
        ));
    }
    log::debug!("Search '{}' matched {} entries", term, results.len());
    Outcome::Handled(format_search_results(term, &results))
}
