// File: ./src/handlers/delete.rs
use super::{Env, Outcome};
use crate::model::ScheduleEntry;
use crate::model::display::{EntryDisplay, format_candidates};
use crate::model::matcher::find_targets;
use once_cell::sync::Lazy;
use regex::Regex;

static DELETE_ALL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:hapus|batalkan|delete)\s+semua\s*(?:jadwal)?$").expect("valid regex")
});

static DELETE_KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:hapus|batalkan|delete)\s+semua\s+(?:jadwal\s+)?(.+)$")
        .expect("valid regex")
});

static DELETE_ONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:hapus|batalkan|delete)\s+(?:jadwal\s+)?(.+)$").expect("valid regex")
});

fn not_found(keyword: &str) -> Outcome {
    Outcome::Handled(format!(
        "❌ Tidak ditemukan jadwal dengan kata kunci \"{}\"",
        keyword
    ))
}

pub fn handle(input: &str, schedules: &[ScheduleEntry], env: &Env) -> Outcome {
    let input = input.trim();
    if schedules.is_empty() {
        return Outcome::Handled("📅 Belum ada jadwal yang bisa dihapus.".to_string());
    }

    if DELETE_ALL_RE.is_match(input) {
        log::info!("Deleting all {} schedules", schedules.len());
        return Outcome::Mutated {
            reply: "✅ Semua jadwal berhasil dihapus.".to_string(),
            schedules: Vec::new(),
        };
    }

    if let Some(caps) = DELETE_KEYWORD_RE.captures(input) {
        let keyword = caps[1].trim();
        let needle = keyword.to_lowercase();
        let kept: Vec<ScheduleEntry> = schedules
            .iter()
            .filter(|s| !s.activity.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        let removed = schedules.len() - kept.len();
        if removed == 0 {
            return not_found(keyword);
        }
        log::info!("Deleting {} schedules matching '{}'", removed, keyword);
        return Outcome::Mutated {
            reply: format!(
                "✅ Berhasil menghapus {} jadwal yang mengandung \"{}\".",
                removed, keyword
            ),
            schedules: kept,
        };
    }

    let Some(caps) = DELETE_ONE_RE.captures(input) else {
        return Outcome::NoMatch;
    };
    let keyword = caps[1].trim();

    let candidates = find_targets(keyword, schedules, env.match_threshold);
    match candidates.as_slice() {
        [] => not_found(keyword),
        [only] => {
            let target = only.entry;
            log::info!("Deleting schedule {}", target.id);
            let reply = format!(
                "✅ Jadwal \"{}\" pada {} berhasil dihapus.",
                target.activity,
                target.display_date()
            );
            let kept = schedules
                .iter()
                .filter(|s| s.id != target.id)
                .cloned()
                .collect();
            Outcome::Mutated {
                reply,
                schedules: kept,
            }
        }
        _ => Outcome::Handled(format_candidates(
            &candidates,
            "Gunakan kata kunci yang lebih spesifik seperti \"hapus makan 08:00\"",
        )),
    }
}
