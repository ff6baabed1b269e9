// File: ./src/model/display.rs
use crate::model::item::ScheduleEntry;
use crate::model::matcher::MatchCandidate;
use crate::model::parser::format_display_date;

pub trait EntryDisplay {
    /// `- RAPAT TIM 15.00`, the line used in date-grouped listings.
    fn to_view_line(&self) -> String;
    /// `rapat tim - 19 OKT 2026 15:00`
    fn to_summary(&self) -> String;
    fn display_date(&self) -> String;
}

impl EntryDisplay for ScheduleEntry {
    fn to_view_line(&self) -> String {
        format!(
            "- {} {}",
            self.activity.to_uppercase(),
            self.time.replace(':', ".")
        )
    }

    fn to_summary(&self) -> String {
        format!("{} - {} {}", self.activity, self.display_date(), self.time)
    }

    fn display_date(&self) -> String {
        format_display_date(&self.date)
    }
}

/// Groups entries under `JADWAL <date>` headers.
///
/// Groups are chronological and entries inside a group are sorted by time.
/// Dates that do not parse are listed after all valid ones.
pub fn format_grouped(entries: &[&ScheduleEntry]) -> String {
    let mut sorted: Vec<&ScheduleEntry> = entries.to_vec();
    sorted.sort_by(|a, b| a.cmp_chronological(b));

    let mut groups: Vec<(&str, Vec<&ScheduleEntry>)> = Vec::new();
    for entry in sorted {
        match groups.iter_mut().find(|(date, _)| *date == entry.date) {
            Some((_, list)) => list.push(entry),
            None => groups.push((entry.date.as_str(), vec![entry])),
        }
    }

    groups
        .into_iter()
        .map(|(date, list)| {
            let mut block = format!("JADWAL {}", format_display_date(date));
            for entry in list {
                block.push('\n');
                block.push_str(&entry.to_view_line());
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Numbered candidate list shown when a keyword matches more than one entry.
pub fn format_candidates(candidates: &[MatchCandidate<'_>], tip: &str) -> String {
    let mut out = format!("🔍 Ditemukan {} jadwal:\n", candidates.len());
    for (i, c) in candidates.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, c.entry.to_summary()));
    }
    out.push_str(&format!("\n💡 Tip: {}", tip));
    out
}

/// Ranked search hits with their match percentage.
pub fn format_search_results(term: &str, candidates: &[MatchCandidate<'_>]) -> String {
    let mut out = format!("🔍 **HASIL PENCARIAN \"{}\":**\n", term);
    for (i, c) in candidates.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. 📌 {} ({}% cocok)\n   📅 {} ⏰ {}",
            i + 1,
            c.entry.activity,
            c.match_percent(),
            c.entry.display_date(),
            c.entry.time
        ));
    }
    out
}
