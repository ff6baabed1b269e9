// File: ./src/handlers/add.rs
use super::{Env, Outcome};
use crate::model::extract::{
    extract_activity, extract_date_pattern, time_phrase_for, without_time_phrases,
};
use crate::model::parser::{format_display_date, parse_relative_date, parse_time};
use crate::model::validate::validate;
use crate::model::ScheduleEntry;
use once_cell::sync::Lazy;
use regex::Regex;

static ADD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:tambah|buat|jadwalkan|schedule)\s+\S").expect("valid add regex")
});

pub fn handle(input: &str, schedules: &[ScheduleEntry], env: &Env) -> Outcome {
    let input = input.trim();
    if !ADD_RE.is_match(input) {
        return Outcome::NoMatch;
    }

    let activity = extract_activity(input);
    let time = parse_time(&time_phrase_for(input));
    let date_phrase = extract_date_pattern(&without_time_phrases(input));
    let date = parse_relative_date(&date_phrase, env.clock.today());

    let validation = validate(&activity, &date, &time);
    if !validation.is_valid() {
        return Outcome::Handled(format!("❌ {}", validation.describe()));
    }

    let entry = ScheduleEntry::new(&activity, &date, &time, schedules, env.clock.now());
    log::info!("Adding schedule {} '{}' {} {}", entry.id, activity, date, time);

    let reply = format!(
        "✅ Jadwal '{}' ditambahkan untuk {} pukul {}",
        activity,
        format_display_date(&date),
        time
    );
    let mut next = schedules.to_vec();
    next.push(entry);
    Outcome::Mutated {
        reply,
        schedules: next,
    }
}
