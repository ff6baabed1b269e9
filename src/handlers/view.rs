// File: ./src/handlers/view.rs
use super::{Env, Outcome};
use crate::model::ScheduleEntry;
use crate::model::display::format_grouped;
use crate::model::parser::format_date;
use chrono::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Range {
    Today,
    Tomorrow,
    All,
}

impl Range {
    fn from_input(input: &str) -> Self {
        let lower = input.to_lowercase();
        if lower.contains("hari ini") {
            Range::Today
        } else if lower.contains("besok") {
            Range::Tomorrow
        } else if lower.contains("semua") {
            Range::All
        } else {
            Range::Today
        }
    }
}

pub fn handle(input: &str, schedules: &[ScheduleEntry], env: &Env) -> Outcome {
    if schedules.is_empty() {
        return Outcome::Handled("📅 Belum ada jadwal yang tersimpan.".to_string());
    }

    let today = env.clock.today();
    let wanted = match Range::from_input(input) {
        Range::Today => Some(format_date(today)),
        Range::Tomorrow => Some(format_date(today + Duration::days(1))),
        Range::All => None,
    };

    let selected: Vec<&ScheduleEntry> = schedules
        .iter()
        .filter(|s| wanted.as_ref().is_none_or(|d| &s.date == d))
        .collect();

    if selected.is_empty() {
        return Outcome::Handled("📅 Tidak ada jadwal untuk periode yang diminta.".to_string());
    }
    Outcome::Handled(format_grouped(&selected))
}
