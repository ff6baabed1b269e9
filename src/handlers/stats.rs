// File: ./src/handlers/stats.rs
use super::{Env, Outcome};
use crate::model::ScheduleEntry;
use crate::model::parser::{format_date, format_display_date};

/// Aggregates over the whole store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleStats {
    pub total: usize,
    pub today: usize,
    pub busiest_date: (String, usize),
    pub most_frequent_activity: (String, usize),
    /// Up to five dates, by descending count; equal counts keep first-seen order.
    pub top_dates: Vec<(String, usize)>,
}

// Insertion-ordered tally so ties resolve to the key seen first.
fn tally<'a, I>(keys: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    for key in keys {
        match counts.iter_mut().find(|(k, _)| k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key.to_string(), 1)),
        }
    }
    counts
}

fn first_max(counts: &[(String, usize)]) -> Option<(String, usize)> {
    let mut best: Option<&(String, usize)> = None;
    for entry in counts {
        if best.is_none_or(|b| entry.1 > b.1) {
            best = Some(entry);
        }
    }
    best.cloned()
}

/// `None` for an empty store.
pub fn compute(schedules: &[ScheduleEntry], today: &str) -> Option<ScheduleStats> {
    let by_date = tally(schedules.iter().map(|s| s.date.as_str()));
    let folded: Vec<String> = schedules.iter().map(|s| s.activity.to_lowercase()).collect();
    let by_activity = tally(folded.iter().map(String::as_str));

    let busiest_date = first_max(&by_date)?;
    let most_frequent_activity = first_max(&by_activity)?;

    let mut top_dates = by_date;
    top_dates.sort_by(|a, b| b.1.cmp(&a.1));
    top_dates.truncate(5);

    Some(ScheduleStats {
        total: schedules.len(),
        today: schedules.iter().filter(|s| s.date == today).count(),
        busiest_date,
        most_frequent_activity,
        top_dates,
    })
}

pub fn handle(_input: &str, schedules: &[ScheduleEntry], env: &Env) -> Outcome {
    let today = format_date(env.clock.today());
    let Some(stats) = compute(schedules, &today) else {
        return Outcome::Handled("📊 Belum ada data jadwal untuk statistik.".to_string());
    };

    let mut out = String::from("📊 **STATISTIK JADWAL:**\n\n");
    out.push_str(&format!("📈 Total jadwal: {}\n", stats.total));
    out.push_str(&format!("📅 Jadwal hari ini: {}\n", stats.today));
    out.push_str(&format!(
        "🔥 Hari tersibuk: {} ({} jadwal)\n",
        format_display_date(&stats.busiest_date.0),
        stats.busiest_date.1
    ));
    out.push_str(&format!(
        "⭐ Aktivitas tersering: {} ({}x)\n\n",
        stats.most_frequent_activity.0, stats.most_frequent_activity.1
    ));
    out.push_str("📊 **TOP 5 HARI TERSIBUK:**");
    for (i, (date, count)) in stats.top_dates.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. {}: {} jadwal",
            i + 1,
            format_display_date(date),
            count
        ));
    }
    Outcome::Handled(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(activity: &str, date: &str) -> ScheduleEntry {
        ScheduleEntry {
            id: 0,
            activity: activity.to_string(),
            date: date.to_string(),
            time: "09:00".to_string(),
            created: String::new(),
        }
    }

    #[test]
    fn busiest_and_most_frequent() {
        let store = vec![
            entry("Rapat", "19-10-2026"),
            entry("rapat", "19-10-2026"),
            entry("makan", "20-10-2026"),
        ];
        let stats = compute(&store, "19-10-2026").unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.today, 2);
        assert_eq!(stats.busiest_date, ("19-10-2026".to_string(), 2));
        assert_eq!(stats.most_frequent_activity, ("rapat".to_string(), 2));
    }

    #[test]
    fn ties_go_to_the_first_seen_key() {
        let store = vec![
            entry("makan", "21-10-2026"),
            entry("rapat", "20-10-2026"),
            entry("rapat", "21-10-2026"),
            entry("makan", "20-10-2026"),
        ];
        let stats = compute(&store, "19-10-2026").unwrap();
        assert_eq!(stats.busiest_date.0, "21-10-2026");
        assert_eq!(stats.most_frequent_activity.0, "makan");
        assert_eq!(
            stats.top_dates,
            vec![("21-10-2026".to_string(), 2), ("20-10-2026".to_string(), 2)]
        );
    }

    #[test]
    fn top_five_only() {
        let store: Vec<ScheduleEntry> = (1..=7)
            .map(|d| entry("x", &format!("{:02}-11-2026", d)))
            .collect();
        let stats = compute(&store, "19-10-2026").unwrap();
        assert_eq!(stats.top_dates.len(), 5);
        assert_eq!(stats.top_dates[0].0, "01-11-2026");
    }

    #[test]
    fn empty_store() {
        assert!(compute(&[], "19-10-2026").is_none());
        assert_eq!(
            handle("statistik", &[], &Env::default()),
            Outcome::Handled("📊 Belum ada data jadwal untuk statistik.".to_string())
        );
    }
}
